use crate::object_list::ResourceList;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GROUP: &str = "example-solution.metalk8s.scality.com";
pub const VERSION: &str = "v1alpha1";

#[derive(CustomResource, Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "example-solution.metalk8s.scality.com",
    version = "v1alpha1",
    kind = "ClockServer"
)]
#[kube(shortname = "cs", namespaced, derive = "PartialEq")]
#[kube(status = "ClockServerStatus")]
#[serde(rename_all = "camelCase")]
pub struct ClockServerSpec {
    pub version: String,
    pub timezone: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClockServerStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    pub ready_replicas: i32,
}

impl Default for ClockServerSpec {
    fn default() -> Self {
        ClockServerSpec {
            version: String::new(),
            timezone: "UTC".to_string(),
        }
    }
}

impl Default for ClockServer {
    fn default() -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec: ClockServerSpec::default(),
            status: None,
        }
    }
}

#[derive(CustomResource, Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "example-solution.metalk8s.scality.com",
    version = "v1alpha1",
    kind = "VersionServer"
)]
#[kube(shortname = "vs", namespaced, derive = "PartialEq")]
#[kube(status = "VersionServerStatus")]
#[serde(rename_all = "camelCase")]
pub struct VersionServerSpec {
    pub version: String,
    pub replicas: i32,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionServerStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    pub replicas: i32,
    pub ready_replicas: i32,
}

impl Default for VersionServerSpec {
    fn default() -> Self {
        VersionServerSpec {
            version: String::new(),
            replicas: 1,
        }
    }
}

impl Default for VersionServer {
    fn default() -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec: VersionServerSpec::default(),
            status: None,
        }
    }
}

pub type ClockServerList = ResourceList<ClockServer>;

pub type VersionServerList = ResourceList<VersionServer>;
