use crate::config::OperatorConfig;
use crate::deep_copy::ApiObject;
use crate::object_map::{ObjectMap, ObjectMapKey};
use futures::StreamExt;
use kube::{
    api::{Api, ListParams},
    core::NamespaceResourceScope,
    runtime::watcher::{self, watcher},
    Client, Resource,
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Duration;
use tracing::*;

/// Deep copies of every watched object, shared between the watch loops and their readers.
pub type SharedObjectMap = Arc<Mutex<ObjectMap>>;

pub fn lock(cache: &SharedObjectMap) -> MutexGuard<'_, ObjectMap> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn watched_api<K>(client: Client, config: &OperatorConfig) -> Api<K>
where
    K: Resource<DynamicType = (), Scope = NamespaceResourceScope>,
{
    match &config.watch_namespace {
        Some(namespace) => Api::namespaced(client, namespace),
        None => Api::all(client),
    }
}

/// Folds one watch event into `map`.
///
/// `Restarted` carries the full current set of objects, so every object of the kind
/// not in it is dropped.
pub fn apply_event<K>(map: &mut ObjectMap, event: watcher::Event<K>)
where
    K: ApiObject + Resource<DynamicType = ()>,
{
    match event {
        watcher::Event::Applied(obj) => match map.insert_resource(&obj) {
            Some(key) => debug!(object = %key, "Cached object"),
            None => warn!(kind = %K::kind(&()), "Skipping object without .metadata.name"),
        },
        watcher::Event::Deleted(obj) => {
            if let Some(key) = ObjectMapKey::from_resource(&obj) {
                if map.remove(&key).is_some() {
                    info!(object = %key, "Evicted deleted object");
                }
            }
        }
        watcher::Event::Restarted(objs) => {
            let kind = K::kind(&());
            let evicted = map.remove_kind(&kind);
            let cached = objs
                .iter()
                .filter_map(|obj| map.insert_resource(obj))
                .count();
            info!(kind = %kind, evicted, cached, "Resynced cache");
        }
    }
}

/// Keeps `cache` in sync with the objects `api` can see until the watch stream ends.
pub async fn run_watch_cache<K>(api: Api<K>, cache: SharedObjectMap, retry_after: Duration)
where
    K: ApiObject + Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + 'static,
{
    let mut events = watcher(api, ListParams::default()).boxed();
    while let Some(event) = events.next().await {
        match event {
            Ok(event) => apply_event(&mut lock(&cache), event),
            Err(err) => {
                warn!(
                    kind = %K::kind(&()),
                    error = &err as &dyn std::error::Error,
                    "Watch failed, retrying"
                );
                tokio::time::sleep(retry_after).await;
            }
        }
    }
    info!(kind = %K::kind(&()), "watch terminated");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crds::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn clock_server(name: &str, timezone: &str) -> ClockServer {
        ClockServer {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("example".to_string()),
                ..ObjectMeta::default()
            },
            spec: ClockServerSpec {
                version: "1.0.0".to_string(),
                timezone: timezone.to_string(),
            },
            status: None,
        }
    }

    fn key(name: &str) -> ObjectMapKey {
        ObjectMapKey::new("ClockServer", "example", name)
    }

    #[test]
    fn test_applied_inserts_and_updates() {
        let mut map = ObjectMap::new();
        apply_event(&mut map, watcher::Event::Applied(clock_server("a", "UTC")));
        apply_event(&mut map, watcher::Event::Applied(clock_server("a", "UTC+01:00")));
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get_as::<ClockServer>(&key("a")).unwrap().spec.timezone,
            "UTC+01:00"
        );
    }

    #[test]
    fn test_deleted_evicts_entry() {
        let mut map = ObjectMap::new();
        apply_event(&mut map, watcher::Event::Applied(clock_server("a", "UTC")));
        apply_event(&mut map, watcher::Event::Applied(clock_server("b", "UTC")));
        apply_event(&mut map, watcher::Event::Deleted(clock_server("a", "UTC")));
        assert!(!map.contains_key(&key("a")));
        assert!(map.contains_key(&key("b")));

        // A delete for an object never seen is a no-op.
        apply_event(&mut map, watcher::Event::Deleted(clock_server("c", "UTC")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_restarted_drops_objects_deleted_while_disconnected() {
        let mut map = ObjectMap::new();
        apply_event(&mut map, watcher::Event::Applied(clock_server("a", "UTC")));
        apply_event(&mut map, watcher::Event::Applied(clock_server("b", "UTC")));
        let vs = VersionServer {
            metadata: ObjectMeta {
                name: Some("v".to_string()),
                namespace: Some("example".to_string()),
                ..ObjectMeta::default()
            },
            ..VersionServer::default()
        };
        apply_event(&mut map, watcher::Event::Applied(vs));

        apply_event(
            &mut map,
            watcher::Event::Restarted(vec![clock_server("b", "UTC-02:00"), clock_server("c", "UTC")]),
        );
        assert!(!map.contains_key(&key("a")));
        assert_eq!(
            map.get_as::<ClockServer>(&key("b")).unwrap().spec.timezone,
            "UTC-02:00"
        );
        assert!(map.contains_key(&key("c")));
        assert_eq!(map.count_kind("VersionServer"), 1);
    }

    #[test]
    fn test_unnamed_object_is_skipped() {
        let mut map = ObjectMap::new();
        apply_event(&mut map, watcher::Event::Applied(ClockServer::default()));
        assert!(map.is_empty());
    }

    #[test]
    fn test_cached_copy_is_independent_of_event_object() {
        let cache: SharedObjectMap = Arc::new(Mutex::new(ObjectMap::new()));
        let cs = clock_server("a", "UTC");
        apply_event(&mut lock(&cache), watcher::Event::Applied(cs.clone()));

        let mut fetched = lock(&cache).get_as::<ClockServer>(&key("a")).unwrap();
        fetched.spec.timezone = "UTC+03:00".to_string();
        assert_eq!(lock(&cache).get_as::<ClockServer>(&key("a")), Some(cs));
    }
}
