use crate::deep_copy::ApiObject;
use kube::{Resource, ResourceExt};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct ObjectMapKey {
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ObjectMapKey {
    pub fn new(kind: &str, namespace: &str, name: &str) -> ObjectMapKey {
        ObjectMapKey {
            kind: kind.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Returns None when the object misses `.metadata.name`.
    pub fn from_resource<K: Resource<DynamicType = ()>>(obj: &K) -> Option<ObjectMapKey> {
        let name = obj.meta().name.as_ref()?;
        Some(ObjectMapKey {
            kind: K::kind(&()).into_owned(),
            namespace: obj.namespace().unwrap_or_default(),
            name: name.clone(),
        })
    }
}

impl std::fmt::Display for ObjectMapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
    }
}

/// Objects keyed by kind, namespace and name.
///
/// The map owns its own copies: `insert` stores a deep copy of its argument and every
/// read hands out a fresh deep copy, so no caller ever holds storage shared with the map.
#[derive(Clone, Debug, Default)]
pub struct ObjectMap {
    inner: BTreeMap<ObjectMapKey, Box<dyn ApiObject>>,
}

impl ObjectMap {
    pub fn new() -> ObjectMap {
        ObjectMap {
            inner: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key(&self, key: &ObjectMapKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns the previously stored object, if any.
    pub fn insert(&mut self, key: ObjectMapKey, obj: &dyn ApiObject) -> Option<Box<dyn ApiObject>> {
        self.inner.insert(key, obj.deep_copy_object())
    }

    pub fn insert_resource<K>(&mut self, obj: &K) -> Option<ObjectMapKey>
    where
        K: ApiObject + Resource<DynamicType = ()>,
    {
        let key = ObjectMapKey::from_resource(obj)?;
        self.insert(key.clone(), obj);
        Some(key)
    }

    pub fn get(&self, key: &ObjectMapKey) -> Option<Box<dyn ApiObject>> {
        self.inner.get(key).map(|obj| obj.deep_copy_object())
    }

    /// Returns None when nothing is stored under `key` or the stored object is not a `K`.
    pub fn get_as<K: ApiObject + Clone>(&self, key: &ObjectMapKey) -> Option<K> {
        self.inner
            .get(key)
            .and_then(|obj| obj.downcast_ref::<K>())
            .cloned()
    }

    pub fn remove(&mut self, key: &ObjectMapKey) -> Option<Box<dyn ApiObject>> {
        self.inner.remove(key)
    }

    /// Drops every object of `kind`, returning how many were stored.
    pub fn remove_kind(&mut self, kind: &str) -> usize {
        let before = self.inner.len();
        self.inner.retain(|key, _| key.kind != kind);
        before - self.inner.len()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.inner.keys().filter(|key| key.kind == kind).count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ObjectMapKey> {
        self.inner.keys()
    }
}
