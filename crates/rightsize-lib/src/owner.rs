//! Top-level controller resolution
//!
//! Walks at most one hop past the pod's own owner reference, and only when
//! that owner is a ReplicaSet. Longer chains such as CronJob -> Job -> Pod
//! resolve to the intermediate owner (`Job`).

use crate::cluster::{ClusterApi, ClusterError};
use crate::models::TopLevelOwner;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use tracing::debug;

const REPLICA_SET_KIND: &str = "ReplicaSet";

/// The first owner reference on an object, if any
pub fn first_owner(meta: &ObjectMeta) -> Option<&OwnerReference> {
    meta.owner_references.as_ref()?.first()
}

/// Resolve a pod owner to the controller that should be patched
pub async fn resolve_top_level<C>(
    cluster: &C,
    namespace: &str,
    owner_kind: &str,
    owner_name: &str,
) -> Result<TopLevelOwner, ClusterError>
where
    C: ClusterApi + ?Sized,
{
    if owner_kind != REPLICA_SET_KIND {
        return Ok(TopLevelOwner::new(owner_kind, owner_name));
    }

    let replica_set = cluster.get_replica_set(namespace, owner_name).await?;
    let resolved = match first_owner(&replica_set.metadata) {
        Some(parent) => TopLevelOwner::new(&parent.kind, &parent.name),
        None => TopLevelOwner::new(REPLICA_SET_KIND, owner_name),
    };

    debug!(
        namespace = %namespace,
        replica_set = %owner_name,
        kind = %resolved.kind,
        name = %resolved.name,
        "Resolved ReplicaSet owner"
    );

    Ok(resolved)
}
