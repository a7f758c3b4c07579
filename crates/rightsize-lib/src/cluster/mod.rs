//! Cluster access
//!
//! Every read and write the scan performs goes through [`ClusterApi`], so the
//! scan, owner resolution and patch logic can run against an in-memory fake
//! in tests and against a live API server through [`KubeCluster`].

mod kube_client;
pub mod metrics;

pub use kube_client::KubeCluster;

use crate::models::ContainerUsage;
use crate::patch::{Workload, WorkloadKind};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::ReplicaSet;
use k8s_openapi::api::core::v1::Pod;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("kubernetes API request failed: {0}")]
    Api(#[from] kube::Error),

    #[error("metrics unavailable for {namespace}/{pod}/{container}: {reason}")]
    MetricsUnavailable {
        namespace: String,
        pod: String,
        container: String,
        reason: String,
    },
}

impl ClusterError {
    pub fn metrics_unavailable(
        namespace: &str,
        pod: &str,
        container: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MetricsUnavailable {
            namespace: namespace.to_string(),
            pod: pod.to_string(),
            container: container.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_metrics_unavailable(&self) -> bool {
        matches!(self, Self::MetricsUnavailable { .. })
    }
}

/// Operations the scanner needs from the cluster
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// List pods in one namespace, or in all namespaces when `namespace` is None
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ClusterError>;

    /// Current CPU/memory usage of one container from the metrics API
    ///
    /// Returns [`ClusterError::MetricsUnavailable`] when the metrics server
    /// has nothing for the pod or container.
    async fn container_usage(
        &self,
        namespace: &str,
        pod: &str,
        container: &str,
    ) -> Result<ContainerUsage, ClusterError>;

    async fn get_replica_set(&self, namespace: &str, name: &str)
        -> Result<ReplicaSet, ClusterError>;

    async fn get_workload(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
    ) -> Result<Workload, ClusterError>;

    /// Submit the whole object as an update
    async fn replace_workload(
        &self,
        namespace: &str,
        workload: &Workload,
    ) -> Result<(), ClusterError>;
}
