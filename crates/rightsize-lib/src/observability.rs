//! Structured event logging for scans
//!
//! Every significant step of a scan is emitted as a `tracing` event with an
//! `event` field, so JSON log output can be filtered per event type.

use crate::gate::GateDecision;
use crate::models::{ContainerTarget, SuggestionResult};
use crate::patch::DispatchOutcome;
use crate::scanner::ScanSummary;
use tracing::{debug, info, warn};

/// Structured logger for scan events
///
/// Carries the scan scope (a namespace, or `*` for all namespaces) on
/// every record.
#[derive(Clone)]
pub struct ScanLogger {
    scope: String,
}

impl ScanLogger {
    pub fn new(namespace: Option<&str>) -> Self {
        Self {
            scope: namespace.unwrap_or("*").to_string(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Log scan startup
    pub fn log_scan_started(&self, buffer_percent: i64, inplace_update: bool) {
        info!(
            event = "scan_started",
            scope = %self.scope,
            buffer_percent = buffer_percent,
            inplace_update = inplace_update,
            "Resource scan started"
        );
    }

    /// Log a container with missing resource settings
    pub fn log_finding(&self, target: &ContainerTarget, suggestion: &SuggestionResult) {
        info!(
            event = "missing_resources",
            scope = %self.scope,
            namespace = %target.namespace,
            pod_name = %target.pod_name,
            container = %target.container_name,
            owner_kind = ?target.owner.as_ref().map(|o| o.kind.as_str()),
            owner_name = ?target.owner.as_ref().map(|o| o.name.as_str()),
            cpu_request = %suggestion.cpu_request,
            memory_request = %suggestion.memory_request,
            cpu_limit = %suggestion.cpu_limit,
            memory_limit = %suggestion.memory_limit,
            "Container is missing resource settings"
        );
    }

    /// Log a container skipped for lack of metrics
    pub fn log_metrics_unavailable(
        &self,
        namespace: &str,
        pod_name: &str,
        container: &str,
        reason: &str,
    ) {
        warn!(
            event = "metrics_unavailable",
            scope = %self.scope,
            namespace = %namespace,
            pod_name = %pod_name,
            container = %container,
            reason = %reason,
            "Metrics unavailable, skipping container"
        );
    }

    pub fn log_gate_decision(&self, target: &ContainerTarget, decision: &GateDecision) {
        debug!(
            event = "patch_confirmation",
            scope = %self.scope,
            namespace = %target.namespace,
            container = %target.container_name,
            decision = ?decision,
            "Operator answered patch confirmation"
        );
    }

    /// Log the result of a dispatch attempt
    pub fn log_patch_outcome(&self, target: &ContainerTarget, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Updated {
                kind,
                name,
                namespace,
            } => {
                info!(
                    event = "workload_patched",
                    scope = %self.scope,
                    namespace = %namespace,
                    kind = %kind,
                    name = %name,
                    container = %target.container_name,
                    "Workload resources updated"
                );
            }
            DispatchOutcome::Unsupported { kind } => {
                info!(
                    event = "patch_unsupported",
                    scope = %self.scope,
                    namespace = %target.namespace,
                    kind = %kind,
                    container = %target.container_name,
                    "Controller kind cannot be patched in place"
                );
            }
            DispatchOutcome::ContainerNotFound {
                kind,
                name,
                container,
            } => {
                warn!(
                    event = "patch_container_missing",
                    scope = %self.scope,
                    namespace = %target.namespace,
                    kind = %kind,
                    name = %name,
                    container = %container,
                    "Container not present in workload template"
                );
            }
        }
    }

    /// Log scan completion
    pub fn log_scan_completed(&self, summary: &ScanSummary) {
        info!(
            event = "scan_completed",
            scope = %self.scope,
            pods_scanned = summary.pods_scanned,
            containers_flagged = summary.containers_flagged,
            skipped_no_metrics = summary.skipped_no_metrics,
            patched = summary.patched,
            "Resource scan completed"
        );
    }
}
