//! In-place updates of workload pod templates
//!
//! Only Deployments, StatefulSets and DaemonSets are patched. Any other
//! controller kind is reported back to the caller without touching the cluster.
//!
//! The update is a plain read-modify-write of the whole object. The
//! resourceVersion is cleared before the write, so an edit made between the
//! read and the write is overwritten.

use crate::cluster::{ClusterApi, ClusterError};
use crate::models::{SuggestionResult, TopLevelOwner};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::core::v1::{PodSpec, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::{Resource, ResourceExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Controller kinds that can be patched in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    DaemonSet,
}

impl WorkloadKind {
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "Deployment" => Some(Self::Deployment),
            "StatefulSet" => Some(Self::StatefulSet),
            "DaemonSet" => Some(Self::DaemonSet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::DaemonSet => "DaemonSet",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live workload object read from the cluster
#[derive(Debug, Clone)]
pub enum Workload {
    Deployment(Deployment),
    StatefulSet(StatefulSet),
    DaemonSet(DaemonSet),
}

impl Workload {
    pub fn kind(&self) -> WorkloadKind {
        match self {
            Self::Deployment(_) => WorkloadKind::Deployment,
            Self::StatefulSet(_) => WorkloadKind::StatefulSet,
            Self::DaemonSet(_) => WorkloadKind::DaemonSet,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Deployment(obj) => obj.name_any(),
            Self::StatefulSet(obj) => obj.name_any(),
            Self::DaemonSet(obj) => obj.name_any(),
        }
    }

    pub fn resource_version(&self) -> Option<String> {
        match self {
            Self::Deployment(obj) => obj.resource_version(),
            Self::StatefulSet(obj) => obj.resource_version(),
            Self::DaemonSet(obj) => obj.resource_version(),
        }
    }

    fn clear_resource_version(&mut self) {
        match self {
            Self::Deployment(obj) => obj.meta_mut().resource_version = None,
            Self::StatefulSet(obj) => obj.meta_mut().resource_version = None,
            Self::DaemonSet(obj) => obj.meta_mut().resource_version = None,
        }
    }

    /// Pod spec inside the workload's template
    pub fn pod_spec(&self) -> Option<&PodSpec> {
        match self {
            Self::Deployment(obj) => obj.spec.as_ref()?.template.spec.as_ref(),
            Self::StatefulSet(obj) => obj.spec.as_ref()?.template.spec.as_ref(),
            Self::DaemonSet(obj) => obj.spec.as_ref()?.template.spec.as_ref(),
        }
    }

    pub fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        match self {
            Self::Deployment(obj) => obj.spec.as_mut()?.template.spec.as_mut(),
            Self::StatefulSet(obj) => obj.spec.as_mut()?.template.spec.as_mut(),
            Self::DaemonSet(obj) => obj.spec.as_mut()?.template.spec.as_mut(),
        }
    }
}

/// Result of a dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Updated {
        kind: WorkloadKind,
        name: String,
        namespace: String,
    },
    Unsupported {
        kind: String,
    },
    ContainerNotFound {
        kind: WorkloadKind,
        name: String,
        container: String,
    },
}

fn resource_map(cpu: String, memory: String) -> BTreeMap<String, Quantity> {
    BTreeMap::from([
        ("cpu".to_string(), Quantity(cpu)),
        ("memory".to_string(), Quantity(memory)),
    ])
}

/// Overwrite the named container's requests and limits
///
/// Both maps are replaced wholesale with cpu and memory entries. Returns
/// false if the pod spec has no container with that name.
pub fn apply_suggestion(
    spec: &mut PodSpec,
    container: &str,
    suggestion: &SuggestionResult,
) -> bool {
    let Some(target) = spec.containers.iter_mut().find(|c| c.name == container) else {
        return false;
    };

    let resources = target
        .resources
        .get_or_insert_with(ResourceRequirements::default);
    resources.requests = Some(resource_map(
        suggestion.cpu_request.to_string(),
        suggestion.memory_request.to_string(),
    ));
    resources.limits = Some(resource_map(
        suggestion.cpu_limit.to_string(),
        suggestion.memory_limit.to_string(),
    ));

    true
}

/// Patch the top-level controller's template for one container
pub async fn dispatch<C>(
    cluster: &C,
    owner: &TopLevelOwner,
    namespace: &str,
    container: &str,
    suggestion: &SuggestionResult,
) -> Result<DispatchOutcome, ClusterError>
where
    C: ClusterApi + ?Sized,
{
    let Some(kind) = WorkloadKind::from_kind(&owner.kind) else {
        debug!(kind = %owner.kind, name = %owner.name, "Controller kind not patchable");
        return Ok(DispatchOutcome::Unsupported {
            kind: owner.kind.clone(),
        });
    };

    let mut workload = cluster.get_workload(kind, namespace, &owner.name).await?;

    let applied = workload
        .pod_spec_mut()
        .map(|spec| apply_suggestion(spec, container, suggestion))
        .unwrap_or(false);
    if !applied {
        return Ok(DispatchOutcome::ContainerNotFound {
            kind,
            name: owner.name.clone(),
            container: container.to_string(),
        });
    }

    workload.clear_resource_version();
    cluster.replace_workload(namespace, &workload).await?;

    info!(
        kind = %kind,
        name = %owner.name,
        namespace = %namespace,
        container = %container,
        "Updated workload resources"
    );

    Ok(DispatchOutcome::Updated {
        kind,
        name: owner.name.clone(),
        namespace: namespace.to_string(),
    })
}
