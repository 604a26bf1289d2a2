use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::core::{ObjectList, TypeMeta};
use kube::Resource;
use serde::{Deserialize, Serialize};

/// A list of resources of one kind, as returned by a list call.
///
/// Unlike [`ObjectList`], `items` keeps apart a list that carries no items at all
/// (`None`) and a list whose items are known to be empty (`Some(vec![])`).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ResourceList<K> {
    #[serde(flatten)]
    pub types: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<K>>,
}

impl<K: Resource<DynamicType = ()>> ResourceList<K> {
    /// `apiVersion` of `K` and `<Kind>List`.
    pub fn list_type_meta() -> TypeMeta {
        TypeMeta {
            api_version: K::api_version(&()).into_owned(),
            kind: format!("{}List", K::kind(&())),
        }
    }

    pub fn new(items: Vec<K>) -> Self {
        ResourceList {
            types: Self::list_type_meta(),
            metadata: ListMeta::default(),
            items: Some(items),
        }
    }
}

impl<K> ResourceList<K> {
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.items.iter().flatten()
    }
}

impl<K: Resource<DynamicType = ()>> Default for ResourceList<K> {
    fn default() -> Self {
        ResourceList {
            types: Self::list_type_meta(),
            metadata: ListMeta::default(),
            items: None,
        }
    }
}

impl<K: Resource<DynamicType = ()> + Clone> From<ObjectList<K>> for ResourceList<K> {
    fn from(list: ObjectList<K>) -> Self {
        ResourceList {
            types: Self::list_type_meta(),
            metadata: list.metadata,
            items: Some(list.items),
        }
    }
}
