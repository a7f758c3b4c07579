//! Pod scanning
//!
//! Walks every pod in scope and, for each container without complete
//! requests and limits, reads live usage, derives a suggestion, resolves the
//! owning controller and reports the result. With in-place updates enabled
//! the operator is asked before the controller is patched.
//!
//! The scan is strictly sequential. A container whose metrics cannot be read
//! is skipped; any other API failure ends the scan, as does Ctrl-C at a
//! confirmation prompt.

use crate::cluster::{ClusterApi, ClusterError};
use crate::gate::{confirm_patch, Confirmer, GateDecision, GateError};
use crate::manifest;
use crate::models::{ContainerTarget, ContainerUsage, Finding};
use crate::observability::ScanLogger;
use crate::owner::{first_owner, resolve_top_level};
use crate::patch::{dispatch, DispatchOutcome};
use crate::suggest::{SuggestError, Suggester, DEFAULT_BUFFER_PERCENT};
use k8s_openapi::api::core::v1::{Container, Pod};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::ResourceExt;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error(transparent)]
    Suggest(#[from] SuggestError),

    #[error(transparent)]
    Gate(#[from] GateError),
}

impl ScanError {
    /// True when the operator interrupted a confirmation prompt
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Gate(GateError::Interrupted))
    }
}

/// Settings for one scan
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Namespace to scan; None scans every namespace
    pub namespace: Option<String>,
    /// Percentage added on top of usage for limits
    pub buffer_percent: i64,
    /// Offer to patch the owning controller
    pub inplace_update: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            namespace: None,
            buffer_percent: DEFAULT_BUFFER_PERCENT,
            inplace_update: false,
        }
    }
}

/// Counters collected over a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub pods_scanned: usize,
    pub containers_flagged: usize,
    pub skipped_no_metrics: usize,
    pub patched: usize,
}

/// Receives scan results as they are produced
pub trait ScanReporter {
    fn finding(&mut self, finding: &Finding);

    fn metrics_unavailable(&mut self, namespace: &str, pod_name: &str, container: &str);

    fn gate_decision(&mut self, target: &ContainerTarget, decision: &GateDecision);

    fn patch_outcome(&mut self, target: &ContainerTarget, outcome: &DispatchOutcome);

    /// In-place update was requested but the pod has no owner to patch
    fn no_patch_target(&mut self, _target: &ContainerTarget) {}
}

fn defines_cpu_and_memory(map: Option<&BTreeMap<String, Quantity>>) -> bool {
    map.map(|m| m.contains_key("cpu") && m.contains_key("memory"))
        .unwrap_or(false)
}

/// True when requests or limits are unset or lack cpu/memory
pub fn needs_resources(container: &Container) -> bool {
    let Some(resources) = container.resources.as_ref() else {
        return true;
    };
    !defines_cpu_and_memory(resources.requests.as_ref())
        || !defines_cpu_and_memory(resources.limits.as_ref())
}

pub struct Scanner<C> {
    cluster: C,
    settings: ScanSettings,
    suggester: Suggester,
    logger: ScanLogger,
}

impl<C: ClusterApi> Scanner<C> {
    pub fn new(cluster: C, settings: ScanSettings) -> Result<Self, ScanError> {
        let suggester = Suggester::new(settings.buffer_percent)?;
        let logger = ScanLogger::new(settings.namespace.as_deref());
        Ok(Self {
            cluster,
            settings,
            suggester,
            logger,
        })
    }

    pub fn cluster(&self) -> &C {
        &self.cluster
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Scan every pod in scope
    pub async fn run<R, Q>(
        &self,
        reporter: &mut R,
        confirmer: &mut Q,
    ) -> Result<ScanSummary, ScanError>
    where
        R: ScanReporter + ?Sized,
        Q: Confirmer + ?Sized,
    {
        self.logger
            .log_scan_started(self.settings.buffer_percent, self.settings.inplace_update);

        let pods = self
            .cluster
            .list_pods(self.settings.namespace.as_deref())
            .await?;

        let mut summary = ScanSummary::default();
        for pod in &pods {
            summary.pods_scanned += 1;
            self.scan_pod(pod, &mut summary, reporter, confirmer).await?;
        }

        self.logger.log_scan_completed(&summary);
        Ok(summary)
    }

    async fn scan_pod<R, Q>(
        &self,
        pod: &Pod,
        summary: &mut ScanSummary,
        reporter: &mut R,
        confirmer: &mut Q,
    ) -> Result<(), ScanError>
    where
        R: ScanReporter + ?Sized,
        Q: Confirmer + ?Sized,
    {
        let Some(spec) = pod.spec.as_ref() else {
            return Ok(());
        };
        let namespace = pod.namespace().unwrap_or_default();
        let pod_name = pod.name_any();

        for container in spec.containers.iter().filter(|c| needs_resources(c)) {
            let Some(usage) = self
                .fetch_usage(&namespace, &pod_name, &container.name, summary, reporter)
                .await?
            else {
                continue;
            };

            let suggestion = self.suggester.suggest(&usage)?;

            let owner = match first_owner(&pod.metadata) {
                Some(reference) => Some(
                    resolve_top_level(&self.cluster, &namespace, &reference.kind, &reference.name)
                        .await?,
                ),
                None => None,
            };

            let target = ContainerTarget {
                namespace: namespace.clone(),
                pod_name: pod_name.clone(),
                container_name: container.name.clone(),
                owner,
            };

            let finding = Finding {
                manifest: manifest::render(&container.name, &suggestion),
                target,
                usage,
                suggestion,
                generated_at: chrono::Utc::now().timestamp(),
            };
            summary.containers_flagged += 1;
            self.logger.log_finding(&finding.target, &finding.suggestion);
            reporter.finding(&finding);

            if self.settings.inplace_update
                && self.offer_patch(&finding, reporter, confirmer).await?
            {
                summary.patched += 1;
            }
        }

        Ok(())
    }

    /// Usage for a container, or None when the metrics server has nothing
    async fn fetch_usage<R>(
        &self,
        namespace: &str,
        pod_name: &str,
        container: &str,
        summary: &mut ScanSummary,
        reporter: &mut R,
    ) -> Result<Option<ContainerUsage>, ScanError>
    where
        R: ScanReporter + ?Sized,
    {
        let reason = match self
            .cluster
            .container_usage(namespace, pod_name, container)
            .await
        {
            Ok(usage) if !usage.cpu.is_empty() && !usage.memory.is_empty() => {
                return Ok(Some(usage));
            }
            Ok(_) => "empty usage reading".to_string(),
            Err(e) if e.is_metrics_unavailable() => e.to_string(),
            Err(e) => return Err(e.into()),
        };

        summary.skipped_no_metrics += 1;
        self.logger
            .log_metrics_unavailable(namespace, pod_name, container, &reason);
        reporter.metrics_unavailable(namespace, pod_name, container);
        Ok(None)
    }

    /// Run the confirmation gate and, if approved, the dispatcher
    ///
    /// Returns true when the controller was updated.
    async fn offer_patch<R, Q>(
        &self,
        finding: &Finding,
        reporter: &mut R,
        confirmer: &mut Q,
    ) -> Result<bool, ScanError>
    where
        R: ScanReporter + ?Sized,
        Q: Confirmer + ?Sized,
    {
        let target = &finding.target;
        let Some(owner) = target.owner.as_ref() else {
            reporter.no_patch_target(target);
            return Ok(false);
        };

        let decision = confirm_patch(confirmer, &target.namespace, owner)?;
        self.logger.log_gate_decision(target, &decision);
        reporter.gate_decision(target, &decision);
        if decision != GateDecision::Apply {
            return Ok(false);
        }

        let outcome = dispatch(
            &self.cluster,
            owner,
            &target.namespace,
            &target.container_name,
            &finding.suggestion,
        )
        .await?;
        self.logger.log_patch_outcome(target, &outcome);
        reporter.patch_outcome(target, &outcome);

        Ok(matches!(outcome, DispatchOutcome::Updated { .. }))
    }
}
