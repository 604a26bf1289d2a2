use crate::crds::*;
use crate::object_list::ResourceList;
use kube::core::TypeMeta;
use kube::Resource;
use std::any::Any;
use std::fmt::Debug;

/// Structural duplication of a record.
///
/// Every record in this crate derives `Clone` field by field, so a copy owns all of
/// its maps, sequences and nested records and shares no storage with its source.
/// This trait names the two forms callers rely on; both are provided for any `Clone` type.
pub trait DeepCopy: Clone {
    /// Overwrites `out` with a copy of `self`, reusing `out`'s allocations where possible.
    fn deep_copy_into(&self, out: &mut Self) {
        out.clone_from(self);
    }

    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

impl<T: Clone> DeepCopy for T {}

/// Copy-to-new-value form over an optional input: `None` in, `None` out.
pub fn deep_copy_opt<T: DeepCopy>(obj: Option<&T>) -> Option<T> {
    obj.map(DeepCopy::deep_copy)
}

/// A top-level API object (a resource kind or a resource-list kind) that generic code
/// can store, hand out and duplicate without knowing its concrete type.
pub trait ApiObject: Any + Debug + Send + Sync {
    fn type_meta(&self) -> TypeMeta;

    fn deep_copy_object(&self) -> Box<dyn ApiObject>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn ApiObject {
    pub fn downcast_ref<K: ApiObject>(&self) -> Option<&K> {
        self.as_any().downcast_ref::<K>()
    }

    pub fn downcast_mut<K: ApiObject>(&mut self) -> Option<&mut K> {
        self.as_any_mut().downcast_mut::<K>()
    }

    pub fn is<K: ApiObject>(&self) -> bool {
        self.as_any().is::<K>()
    }
}

impl Clone for Box<dyn ApiObject> {
    fn clone(&self) -> Self {
        self.deep_copy_object()
    }
}

fn resource_type_meta<K: Resource<DynamicType = ()>>() -> TypeMeta {
    TypeMeta {
        api_version: K::api_version(&()).into_owned(),
        kind: K::kind(&()).into_owned(),
    }
}

macro_rules! impl_api_object {
    ($($kind:ty),+ $(,)?) => {
        $(
            impl ApiObject for $kind {
                fn type_meta(&self) -> TypeMeta {
                    resource_type_meta::<$kind>()
                }

                fn deep_copy_object(&self) -> Box<dyn ApiObject> {
                    Box::new(self.deep_copy())
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }
            }

            impl ApiObject for ResourceList<$kind> {
                fn type_meta(&self) -> TypeMeta {
                    ResourceList::<$kind>::list_type_meta()
                }

                fn deep_copy_object(&self) -> Box<dyn ApiObject> {
                    Box::new(self.deep_copy())
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }
            }
        )+
    };
}

impl_api_object!(ClockServer, VersionServer);
