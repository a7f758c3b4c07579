//! Core data models for the resource scan

use crate::quantity::ResourceQuantity;
use serde::{Deserialize, Serialize};

/// Highest-level workload controller that owns a pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevelOwner {
    pub kind: String,
    pub name: String,
}

impl TopLevelOwner {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// A single container examined during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerTarget {
    pub namespace: String,
    pub pod_name: String,
    pub container_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<TopLevelOwner>,
}

impl ContainerTarget {
    /// Path used in report lines, e.g. `default(Namespace)/Deployment/web/web-abc/app`.
    /// The parent segment is left out when the pod has no owner.
    pub fn display_path(&self) -> String {
        match &self.owner {
            Some(owner) => format!(
                "{}(Namespace)/{}/{}/{}/{}",
                self.namespace, owner.kind, owner.name, self.pod_name, self.container_name
            ),
            None => format!(
                "{}(Namespace)/{}/{}",
                self.namespace, self.pod_name, self.container_name
            ),
        }
    }
}

/// Current usage as reported by the metrics server, in raw quantity form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerUsage {
    pub cpu: String,
    pub memory: String,
}

/// Suggested requests and limits for one container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub cpu_request: ResourceQuantity,
    pub memory_request: ResourceQuantity,
    pub cpu_limit: ResourceQuantity,
    pub memory_limit: ResourceQuantity,
}

/// One report entry for a container with missing resource settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub target: ContainerTarget,
    pub usage: ContainerUsage,
    pub suggestion: SuggestionResult,
    pub manifest: String,
    pub generated_at: i64,
}
