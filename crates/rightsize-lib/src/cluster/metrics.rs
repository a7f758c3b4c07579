//! Typed `metrics.k8s.io/v1beta1` PodMetrics

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Resource;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const METRICS_API_GROUP: &str = "metrics.k8s.io";
pub const METRICS_API_VERSION: &str = "v1beta1";

/// Usage reported for a single container
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContainerMetrics {
    pub name: String,
    #[serde(default)]
    pub usage: Usage,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub cpu: Option<Quantity>,
    #[serde(default)]
    pub memory: Option<Quantity>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodMetrics {
    pub metadata: ObjectMeta,
    pub timestamp: Option<String>,
    pub window: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerMetrics>,
}

impl PodMetrics {
    /// Raw `(cpu, memory)` strings for the named container
    pub fn usage_for(&self, container: &str) -> Option<(String, String)> {
        self.containers
            .iter()
            .find(|c| c.name == container)
            .map(|c| {
                let cpu = c.usage.cpu.as_ref().map(|q| q.0.clone()).unwrap_or_default();
                let memory = c
                    .usage
                    .memory
                    .as_ref()
                    .map(|q| q.0.clone())
                    .unwrap_or_default();
                (cpu, memory)
            })
    }
}

impl Resource for PodMetrics {
    type DynamicType = ();
    type Scope = kube::core::NamespaceResourceScope;

    fn kind(_: &Self::DynamicType) -> Cow<'_, str> {
        Cow::Borrowed("PodMetrics")
    }

    fn group(_: &Self::DynamicType) -> Cow<'_, str> {
        Cow::Borrowed(METRICS_API_GROUP)
    }

    fn version(_: &Self::DynamicType) -> Cow<'_, str> {
        Cow::Borrowed(METRICS_API_VERSION)
    }

    fn plural(_: &Self::DynamicType) -> Cow<'_, str> {
        Cow::Borrowed("pods")
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
