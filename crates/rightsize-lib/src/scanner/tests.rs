//! Scan scenarios against an in-memory cluster
//!
//! The fake cluster records every ReplicaSet read and every workload write,
//! so tests can assert which API calls a scan made.

use super::*;
use crate::models::{SuggestionResult, TopLevelOwner};
use crate::owner::resolve_top_level;
use crate::patch::{Workload, WorkloadKind};
use crate::quantity::ResourceQuantity;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{
    Deployment, DeploymentSpec, ReplicaSet, StatefulSet, StatefulSetSpec,
};
use k8s_openapi::api::core::v1::{PodSpec, PodTemplateSpec, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

fn not_found(what: &str) -> ClusterError {
    ClusterError::Api(kube::Error::Api(kube::error::ErrorResponse {
        status: "Failure".to_string(),
        message: format!("{} not found", what),
        reason: "NotFound".to_string(),
        code: 404,
    }))
}

#[derive(Default)]
struct FakeCluster {
    pods: Vec<Pod>,
    usage: HashMap<(String, String, String), ContainerUsage>,
    replica_sets: HashMap<String, ReplicaSet>,
    workloads: HashMap<String, Workload>,
    listed_namespaces: Mutex<Vec<Option<String>>>,
    replica_set_reads: Mutex<Vec<String>>,
    writes: Mutex<Vec<Workload>>,
}

impl FakeCluster {
    fn with_pod(mut self, pod: Pod) -> Self {
        self.pods.push(pod);
        self
    }

    fn with_usage(
        mut self,
        namespace: &str,
        pod: &str,
        container: &str,
        cpu: &str,
        memory: &str,
    ) -> Self {
        self.usage.insert(
            (namespace.to_string(), pod.to_string(), container.to_string()),
            ContainerUsage {
                cpu: cpu.to_string(),
                memory: memory.to_string(),
            },
        );
        self
    }

    fn with_replica_set(mut self, name: &str, owner: Option<(&str, &str)>) -> Self {
        let replica_set = ReplicaSet {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("default".to_string()),
                owner_references: owner.map(|(kind, name)| vec![owner_ref(kind, name)]),
                ..Default::default()
            },
            ..Default::default()
        };
        self.replica_sets.insert(name.to_string(), replica_set);
        self
    }

    fn with_workload(mut self, workload: Workload) -> Self {
        self.workloads.insert(workload.name(), workload);
        self
    }

    fn writes(&self) -> Vec<Workload> {
        self.writes.lock().unwrap().clone()
    }

    fn replica_set_reads(&self) -> Vec<String> {
        self.replica_set_reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterApi for FakeCluster {
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ClusterError> {
        self.listed_namespaces
            .lock()
            .unwrap()
            .push(namespace.map(str::to_string));
        Ok(self
            .pods
            .iter()
            .filter(|p| {
                namespace.map_or(true, |ns| p.metadata.namespace.as_deref() == Some(ns))
            })
            .cloned()
            .collect())
    }

    async fn container_usage(
        &self,
        namespace: &str,
        pod: &str,
        container: &str,
    ) -> Result<ContainerUsage, ClusterError> {
        self.usage
            .get(&(namespace.to_string(), pod.to_string(), container.to_string()))
            .cloned()
            .ok_or_else(|| {
                let reason = "pod metrics not found";
                ClusterError::metrics_unavailable(namespace, pod, container, reason)
            })
    }

    async fn get_replica_set(
        &self,
        _namespace: &str,
        name: &str,
    ) -> Result<ReplicaSet, ClusterError> {
        self.replica_set_reads.lock().unwrap().push(name.to_string());
        self.replica_sets
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(name))
    }

    async fn get_workload(
        &self,
        kind: WorkloadKind,
        _namespace: &str,
        name: &str,
    ) -> Result<Workload, ClusterError> {
        self.workloads
            .get(name)
            .filter(|w| w.kind() == kind)
            .cloned()
            .ok_or_else(|| not_found(name))
    }

    async fn replace_workload(
        &self,
        _namespace: &str,
        workload: &Workload,
    ) -> Result<(), ClusterError> {
        self.writes.lock().unwrap().push(workload.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingReporter {
    findings: Vec<Finding>,
    unavailable: Vec<String>,
    decisions: Vec<GateDecision>,
    outcomes: Vec<DispatchOutcome>,
    no_target: Vec<String>,
}

impl ScanReporter for RecordingReporter {
    fn finding(&mut self, finding: &Finding) {
        self.findings.push(finding.clone());
    }

    fn metrics_unavailable(&mut self, namespace: &str, pod_name: &str, container: &str) {
        self.unavailable
            .push(format!("{}/{}/{}", namespace, pod_name, container));
    }

    fn gate_decision(&mut self, _target: &ContainerTarget, decision: &GateDecision) {
        self.decisions.push(decision.clone());
    }

    fn patch_outcome(&mut self, _target: &ContainerTarget, outcome: &DispatchOutcome) {
        self.outcomes.push(outcome.clone());
    }

    fn no_patch_target(&mut self, target: &ContainerTarget) {
        self.no_target.push(target.container_name.clone());
    }
}

struct Scripted {
    answers: VecDeque<bool>,
    asked: usize,
}

impl Scripted {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: 0,
        }
    }
}

impl Confirmer for Scripted {
    fn confirm(&mut self, _question: &str) -> Result<bool, GateError> {
        self.asked += 1;
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// Operator hits Ctrl-C at the first prompt
struct Interrupting;

impl Confirmer for Interrupting {
    fn confirm(&mut self, _question: &str) -> Result<bool, GateError> {
        Err(GateError::Interrupted)
    }
}

fn owner_ref(kind: &str, name: &str) -> OwnerReference {
    OwnerReference {
        api_version: "apps/v1".to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
        uid: format!("{}-uid", name),
        ..Default::default()
    }
}

fn bare_container(name: &str) -> Container {
    Container {
        name: name.to_string(),
        ..Default::default()
    }
}

fn resource_list(pairs: &[(&str, &str)]) -> BTreeMap<String, Quantity> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Quantity(v.to_string())))
        .collect()
}

fn sized_container(name: &str) -> Container {
    Container {
        name: name.to_string(),
        resources: Some(ResourceRequirements {
            requests: Some(resource_list(&[("cpu", "100m"), ("memory", "128Mi")])),
            limits: Some(resource_list(&[("cpu", "200m"), ("memory", "256Mi")])),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn pod(
    namespace: &str,
    name: &str,
    containers: Vec<Container>,
    owner: Option<(&str, &str)>,
) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            owner_references: owner.map(|(kind, name)| vec![owner_ref(kind, name)]),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers,
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn template(containers: &[&str]) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: None,
        spec: Some(PodSpec {
            containers: containers.iter().map(|c| bare_container(c)).collect(),
            ..Default::default()
        }),
    }
}

fn deployment(name: &str, containers: &[&str]) -> Workload {
    Workload::Deployment(Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            resource_version: Some("4711".to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            template: template(containers),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn stateful_set(name: &str, containers: &[&str]) -> Workload {
    Workload::StatefulSet(StatefulSet {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            resource_version: Some("99".to_string()),
            ..Default::default()
        },
        spec: Some(StatefulSetSpec {
            template: template(containers),
            ..Default::default()
        }),
        ..Default::default()
    })
}

/// Pod `web-7d4b9c-x2x` owned by ReplicaSet `web-7d4b9c`, owned by Deployment `web`
fn deployment_cluster() -> FakeCluster {
    FakeCluster::default()
        .with_pod(pod(
            "default",
            "web-7d4b9c-x2x",
            vec![bare_container("app")],
            Some(("ReplicaSet", "web-7d4b9c")),
        ))
        .with_usage("default", "web-7d4b9c-x2x", "app", "250m", "64Mi")
        .with_replica_set("web-7d4b9c", Some(("Deployment", "web")))
        .with_workload(deployment("web", &["app"]))
}

fn settings(inplace_update: bool) -> ScanSettings {
    ScanSettings {
        namespace: None,
        buffer_percent: 20,
        inplace_update,
    }
}

#[test]
fn test_needs_resources() {
    assert!(needs_resources(&bare_container("a")));
    assert!(!needs_resources(&sized_container("a")));

    let mut requests_only = sized_container("a");
    requests_only.resources.as_mut().unwrap().limits = None;
    assert!(needs_resources(&requests_only));

    let mut partial = sized_container("a");
    partial.resources.as_mut().unwrap().limits = Some(resource_list(&[("cpu", "200m")]));
    assert!(needs_resources(&partial));

    let mut empty_maps = sized_container("a");
    empty_maps.resources.as_mut().unwrap().requests = Some(BTreeMap::new());
    assert!(needs_resources(&empty_maps));
}

#[tokio::test]
async fn test_missing_resources_reported_with_suggestion() {
    let scanner = Scanner::new(deployment_cluster(), settings(false)).unwrap();
    let mut reporter = RecordingReporter::default();
    let mut confirmer = Scripted::new(&[]);

    let summary = scanner.run(&mut reporter, &mut confirmer).await.unwrap();

    assert_eq!(summary.pods_scanned, 1);
    assert_eq!(summary.containers_flagged, 1);
    assert_eq!(summary.patched, 0);

    let finding = &reporter.findings[0];
    assert_eq!(
        finding.suggestion,
        SuggestionResult {
            cpu_request: ResourceQuantity::new(250, "m"),
            memory_request: ResourceQuantity::new(64, "Mi"),
            cpu_limit: ResourceQuantity::new(300, "m"),
            memory_limit: ResourceQuantity::new(76, "Mi"),
        }
    );
    assert_eq!(
        finding.target.owner,
        Some(TopLevelOwner::new("Deployment", "web"))
    );
    assert_eq!(
        finding.target.display_path(),
        "default(Namespace)/Deployment/web/web-7d4b9c-x2x/app"
    );
    assert!(finding.manifest.contains("cpu: 300m"));

    assert_eq!(confirmer.asked, 0);
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_fully_specified_containers_never_inspected() {
    let cluster = FakeCluster::default().with_pod(pod(
        "default",
        "db-0",
        vec![sized_container("postgres")],
        Some(("StatefulSet", "db")),
    ));
    let scanner = Scanner::new(cluster, settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();
    let mut confirmer = Scripted::new(&[true, false]);

    let summary = scanner.run(&mut reporter, &mut confirmer).await.unwrap();

    assert_eq!(summary.pods_scanned, 1);
    assert_eq!(summary.containers_flagged, 0);
    assert!(reporter.findings.is_empty());
    // No metrics lookup happened, so nothing was reported unavailable
    assert!(reporter.unavailable.is_empty());
    assert_eq!(confirmer.asked, 0);
}

#[tokio::test]
async fn test_metrics_unavailable_skips_container() {
    let cluster = FakeCluster::default()
        .with_pod(pod(
            "default",
            "web-7d4b9c-x2x",
            vec![bare_container("app"), bare_container("sidecar")],
            Some(("ReplicaSet", "web-7d4b9c")),
        ))
        .with_usage("default", "web-7d4b9c-x2x", "sidecar", "5m", "16Mi")
        .with_replica_set("web-7d4b9c", Some(("Deployment", "web")))
        .with_workload(deployment("web", &["app", "sidecar"]));
    let scanner = Scanner::new(cluster, settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();
    // Decline the sidecar patch so only the skip behaviour is observed
    let mut confirmer = Scripted::new(&[false]);

    let summary = scanner.run(&mut reporter, &mut confirmer).await.unwrap();

    assert_eq!(summary.skipped_no_metrics, 1);
    assert_eq!(reporter.unavailable, vec!["default/web-7d4b9c-x2x/app"]);
    assert_eq!(reporter.findings.len(), 1);
    assert_eq!(reporter.findings[0].target.container_name, "sidecar");
    // Only the sidecar reached the gate
    assert_eq!(confirmer.asked, 1);
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_empty_usage_treated_as_unavailable() {
    let cluster = FakeCluster::default()
        .with_pod(pod("default", "solo", vec![bare_container("app")], None))
        .with_usage("default", "solo", "app", "3m", "");
    let scanner = Scanner::new(cluster, settings(false)).unwrap();
    let mut reporter = RecordingReporter::default();

    let summary = scanner
        .run(&mut reporter, &mut Scripted::new(&[]))
        .await
        .unwrap();

    assert_eq!(summary.skipped_no_metrics, 1);
    assert!(reporter.findings.is_empty());
}

#[tokio::test]
async fn test_pod_without_owner_is_not_resolved_or_patched() {
    let cluster = FakeCluster::default()
        .with_pod(pod("default", "debug-shell", vec![bare_container("shell")], None))
        .with_usage("default", "debug-shell", "shell", "1m", "8Mi");
    let scanner = Scanner::new(cluster, settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();
    let mut confirmer = Scripted::new(&[true, false]);

    scanner.run(&mut reporter, &mut confirmer).await.unwrap();

    let finding = &reporter.findings[0];
    assert!(finding.target.owner.is_none());
    assert_eq!(
        finding.target.display_path(),
        "default(Namespace)/debug-shell/shell"
    );
    assert!(scanner.cluster().replica_set_reads().is_empty());
    assert_eq!(reporter.no_target, vec!["shell"]);
    assert_eq!(confirmer.asked, 0);
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_orphan_replica_set_resolves_to_itself() {
    let cluster = FakeCluster::default().with_replica_set("orphan-5f6", None);

    let owner = resolve_top_level(&cluster, "default", "ReplicaSet", "orphan-5f6")
        .await
        .unwrap();

    assert_eq!(owner, TopLevelOwner::new("ReplicaSet", "orphan-5f6"));
}

#[tokio::test]
async fn test_non_replica_set_owner_returned_unchanged() {
    let cluster = FakeCluster::default();

    let owner = resolve_top_level(&cluster, "batch", "Job", "nightly-28391")
        .await
        .unwrap();

    assert_eq!(owner, TopLevelOwner::new("Job", "nightly-28391"));
    assert!(cluster.replica_set_reads().is_empty());
}

#[tokio::test]
async fn test_unsupported_kind_performs_no_writes() {
    let cluster = FakeCluster::default();
    let suggestion = Suggester::new(20)
        .unwrap()
        .suggest(&ContainerUsage {
            cpu: "250m".to_string(),
            memory: "64Mi".to_string(),
        })
        .unwrap();

    let outcome = dispatch(
        &cluster,
        &TopLevelOwner::new("Job", "nightly-28391"),
        "batch",
        "worker",
        &suggestion,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Unsupported {
            kind: "Job".to_string()
        }
    );
    assert!(cluster.writes().is_empty());
}

#[tokio::test]
async fn test_confirmed_update_patches_deployment_template() {
    let scanner = Scanner::new(deployment_cluster(), settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();
    let mut confirmer = Scripted::new(&[true, false]);

    let summary = scanner.run(&mut reporter, &mut confirmer).await.unwrap();

    assert_eq!(summary.patched, 1);
    assert_eq!(reporter.decisions, vec![GateDecision::Apply]);
    assert_eq!(
        reporter.outcomes,
        vec![DispatchOutcome::Updated {
            kind: WorkloadKind::Deployment,
            name: "web".to_string(),
            namespace: "default".to_string(),
        }]
    );

    let writes = scanner.cluster().writes();
    assert_eq!(writes.len(), 1);
    let written = &writes[0];
    assert_eq!(written.kind(), WorkloadKind::Deployment);
    assert_eq!(written.resource_version(), None);

    let resources = written.pod_spec().unwrap().containers[0]
        .resources
        .as_ref()
        .unwrap();
    let requests = resources.requests.as_ref().unwrap();
    let limits = resources.limits.as_ref().unwrap();
    assert_eq!(requests["cpu"].0, "250m");
    assert_eq!(requests["memory"].0, "64Mi");
    assert_eq!(limits["cpu"].0, "300m");
    assert_eq!(limits["memory"].0, "76Mi");
}

#[tokio::test]
async fn test_statefulset_owner_is_patched_directly() {
    let cluster = FakeCluster::default()
        .with_pod(pod(
            "default",
            "queue-0",
            vec![bare_container("broker")],
            Some(("StatefulSet", "queue")),
        ))
        .with_usage("default", "queue-0", "broker", "40m", "300Mi")
        .with_workload(stateful_set("queue", &["broker"]));
    let scanner = Scanner::new(cluster, settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();

    scanner
        .run(&mut reporter, &mut Scripted::new(&[true, false]))
        .await
        .unwrap();

    assert!(scanner.cluster().replica_set_reads().is_empty());
    let writes = scanner.cluster().writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].kind(), WorkloadKind::StatefulSet);
    let limits = writes[0].pod_spec().unwrap().containers[0]
        .resources
        .as_ref()
        .and_then(|r| r.limits.as_ref())
        .unwrap();
    assert_eq!(limits["cpu"].0, "48m");
    assert_eq!(limits["memory"].0, "360Mi");
}

#[tokio::test]
async fn test_gitops_managed_resource_is_not_patched() {
    let scanner = Scanner::new(deployment_cluster(), settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();
    let mut confirmer = Scripted::new(&[true, true]);

    let summary = scanner.run(&mut reporter, &mut confirmer).await.unwrap();

    assert_eq!(summary.patched, 0);
    assert_eq!(reporter.decisions, vec![GateDecision::GitOpsManaged]);
    assert!(reporter.outcomes.is_empty());
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_declined_confirmation_makes_no_changes() {
    let scanner = Scanner::new(deployment_cluster(), settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();
    let mut confirmer = Scripted::new(&[false]);

    scanner.run(&mut reporter, &mut confirmer).await.unwrap();

    assert_eq!(confirmer.asked, 1);
    assert_eq!(reporter.decisions, vec![GateDecision::Declined]);
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_interrupt_at_prompt_stops_scan() {
    let cluster = deployment_cluster()
        .with_pod(pod(
            "default",
            "web-7d4b9c-y3y",
            vec![bare_container("app")],
            Some(("ReplicaSet", "web-7d4b9c")),
        ))
        .with_usage("default", "web-7d4b9c-y3y", "app", "250m", "64Mi");
    let scanner = Scanner::new(cluster, settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();

    let result = scanner.run(&mut reporter, &mut Interrupting).await;

    let err = result.unwrap_err();
    assert!(err.is_interrupted());
    // The second pod is never reached
    assert_eq!(reporter.findings.len(), 1);
    assert!(reporter.decisions.is_empty());
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_job_owned_pod_reports_unsupported() {
    let cluster = FakeCluster::default()
        .with_pod(pod(
            "batch",
            "nightly-28391-abcde",
            vec![bare_container("worker")],
            Some(("Job", "nightly-28391")),
        ))
        .with_usage("batch", "nightly-28391-abcde", "worker", "900m", "1Gi");
    let scanner = Scanner::new(cluster, settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();

    let summary = scanner
        .run(&mut reporter, &mut Scripted::new(&[true, false]))
        .await
        .unwrap();

    assert_eq!(summary.patched, 0);
    assert_eq!(
        reporter.outcomes,
        vec![DispatchOutcome::Unsupported {
            kind: "Job".to_string()
        }]
    );
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_container_missing_from_template_is_not_written() {
    let cluster = FakeCluster::default()
        .with_pod(pod(
            "default",
            "web-7d4b9c-x2x",
            vec![bare_container("injected-proxy")],
            Some(("ReplicaSet", "web-7d4b9c")),
        ))
        .with_usage("default", "web-7d4b9c-x2x", "injected-proxy", "2m", "20Mi")
        .with_replica_set("web-7d4b9c", Some(("Deployment", "web")))
        .with_workload(deployment("web", &["app"]));
    let scanner = Scanner::new(cluster, settings(true)).unwrap();
    let mut reporter = RecordingReporter::default();

    scanner
        .run(&mut reporter, &mut Scripted::new(&[true, false]))
        .await
        .unwrap();

    assert_eq!(
        reporter.outcomes,
        vec![DispatchOutcome::ContainerNotFound {
            kind: WorkloadKind::Deployment,
            name: "web".to_string(),
            container: "injected-proxy".to_string(),
        }]
    );
    assert!(scanner.cluster().writes().is_empty());
}

#[tokio::test]
async fn test_namespace_filter_passed_to_listing() {
    let cluster = deployment_cluster().with_pod(pod(
        "kube-system",
        "coredns-abc",
        vec![bare_container("coredns")],
        None,
    ));
    let scanner = Scanner::new(
        cluster,
        ScanSettings {
            namespace: Some("kube-system".to_string()),
            ..settings(false)
        },
    )
    .unwrap();
    let mut reporter = RecordingReporter::default();

    let summary = scanner
        .run(&mut reporter, &mut Scripted::new(&[]))
        .await
        .unwrap();

    assert_eq!(summary.pods_scanned, 1);
    assert_eq!(
        *scanner.cluster().listed_namespaces.lock().unwrap(),
        vec![Some("kube-system".to_string())]
    );
    // coredns has no usage in the fake, so it is skipped
    assert_eq!(reporter.unavailable, vec!["kube-system/coredns-abc/coredns"]);
}

#[tokio::test]
async fn test_missing_replica_set_aborts_scan() {
    let cluster = FakeCluster::default()
        .with_pod(pod(
            "default",
            "web-7d4b9c-x2x",
            vec![bare_container("app")],
            Some(("ReplicaSet", "web-7d4b9c")),
        ))
        .with_usage("default", "web-7d4b9c-x2x", "app", "250m", "64Mi");
    let scanner = Scanner::new(cluster, settings(false)).unwrap();
    let mut reporter = RecordingReporter::default();

    let result = scanner.run(&mut reporter, &mut Scripted::new(&[])).await;

    assert!(matches!(
        result,
        Err(ScanError::Cluster(ClusterError::Api(_)))
    ));
    assert!(reporter.findings.is_empty());
}

#[test]
fn test_negative_buffer_rejected_by_scanner() {
    let result = Scanner::new(
        FakeCluster::default(),
        ScanSettings {
            buffer_percent: -10,
            ..ScanSettings::default()
        },
    );
    assert!(matches!(
        result,
        Err(ScanError::Suggest(SuggestError::InvalidBuffer(-10)))
    ));
}
