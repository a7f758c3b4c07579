//! [`ClusterApi`] backed by a live API server

use super::metrics::PodMetrics;
use super::{ClusterApi, ClusterError};
use crate::models::ContainerUsage;
use crate::patch::{Workload, WorkloadKind};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams, PostParams};
use kube::Client;
use tracing::debug;

/// Cluster access through a `kube` client
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ClusterError> {
        let api: Api<Pod> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let pods = api.list(&ListParams::default()).await?;
        debug!(namespace = ?namespace, count = pods.items.len(), "Listed pods");
        Ok(pods.items)
    }

    async fn container_usage(
        &self,
        namespace: &str,
        pod: &str,
        container: &str,
    ) -> Result<ContainerUsage, ClusterError> {
        let api: Api<PodMetrics> = Api::namespaced(self.client.clone(), namespace);
        let metrics = api.get(pod).await.map_err(|e| {
            ClusterError::metrics_unavailable(namespace, pod, container, e.to_string())
        })?;

        let (cpu, memory) = metrics.usage_for(container).ok_or_else(|| {
            ClusterError::metrics_unavailable(
                namespace,
                pod,
                container,
                "no usage reported for container",
            )
        })?;

        Ok(ContainerUsage { cpu, memory })
    }

    async fn get_replica_set(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ReplicaSet, ClusterError> {
        let api: Api<ReplicaSet> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get(name).await?)
    }

    async fn get_workload(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
    ) -> Result<Workload, ClusterError> {
        let client = self.client.clone();
        let workload = match kind {
            WorkloadKind::Deployment => {
                let api: Api<Deployment> = Api::namespaced(client, namespace);
                Workload::Deployment(api.get(name).await?)
            }
            WorkloadKind::StatefulSet => {
                let api: Api<StatefulSet> = Api::namespaced(client, namespace);
                Workload::StatefulSet(api.get(name).await?)
            }
            WorkloadKind::DaemonSet => {
                let api: Api<DaemonSet> = Api::namespaced(client, namespace);
                Workload::DaemonSet(api.get(name).await?)
            }
        };
        Ok(workload)
    }

    async fn replace_workload(
        &self,
        namespace: &str,
        workload: &Workload,
    ) -> Result<(), ClusterError> {
        let client = self.client.clone();
        let params = PostParams::default();
        let name = workload.name();

        match workload {
            Workload::Deployment(obj) => {
                let api: Api<Deployment> = Api::namespaced(client, namespace);
                api.replace(&name, &params, obj).await?;
            }
            Workload::StatefulSet(obj) => {
                let api: Api<StatefulSet> = Api::namespaced(client, namespace);
                api.replace(&name, &params, obj).await?;
            }
            Workload::DaemonSet(obj) => {
                let api: Api<DaemonSet> = Api::namespaced(client, namespace);
                api.replace(&name, &params, obj).await?;
            }
        }

        debug!(kind = %workload.kind(), name = %name, namespace = %namespace, "Replaced workload");
        Ok(())
    }
}
