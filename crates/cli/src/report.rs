//! Terminal reporting of scan results

use rightsize_lib::{
    ContainerTarget, DispatchOutcome, Finding, GateDecision, ScanReporter, ScanSummary,
};
use tabled::Tabled;

use crate::output::{
    info_line, render_table, separator, success_line, warning_line, OutputFormat,
};

const HELM_REMINDER: &str = "If the resources are managed by helm then make sure that the \
                             values.yaml is updated with the changes.";

/// Row for the current usage table
#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "CPU Current Usage")]
    cpu: String,
    #[tabled(rename = "Memory Current Usage")]
    memory: String,
}

/// Row for the suggestion table
#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "CPU Request(suggestion)")]
    cpu_request: String,
    #[tabled(rename = "Memory Request(suggestion)")]
    memory_request: String,
    #[tabled(rename = "CPU Limit(suggestion)")]
    cpu_limit: String,
    #[tabled(rename = "Memory Limit(suggestion)")]
    memory_limit: String,
}

/// Prints findings and patch results as they happen
///
/// In JSON mode stdout carries only findings; messages go to stderr.
pub struct TerminalReporter {
    format: OutputFormat,
}

impl TerminalReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn emit(&self, line: String) {
        match self.format {
            OutputFormat::Table => println!("{}", line),
            OutputFormat::Json => eprintln!("{}", line),
        }
    }

    /// Human-readable block for one finding
    pub fn render_finding(finding: &Finding) -> String {
        let usage = render_table(&[UsageRow {
            cpu: finding.usage.cpu.clone(),
            memory: finding.usage.memory.clone(),
        }]);
        let suggestion = render_table(&[SuggestionRow {
            cpu_request: finding.suggestion.cpu_request.to_string(),
            memory_request: finding.suggestion.memory_request.to_string(),
            cpu_limit: finding.suggestion.cpu_limit.to_string(),
            memory_limit: finding.suggestion.memory_limit.to_string(),
        }]);

        let lines = [
            info_line(&format!(
                "{} is missing resource details.",
                finding.target.display_path()
            )),
            info_line("Current resource usage (as per metrics server):"),
            usage,
            info_line("Suggested resource changes:"),
            suggestion,
            separator(),
            "Suggested resource section for the manifest in yaml format:".to_string(),
            finding.manifest.clone(),
            separator(),
        ];
        lines.join("\n") + "\n"
    }

    /// Message after the operator answered the confirmation prompts
    pub fn decision_lines(target: &ContainerTarget, decision: &GateDecision) -> Vec<String> {
        match (decision, &target.owner) {
            (GateDecision::Declined, _) => vec![info_line("No changes were made.")],
            (GateDecision::GitOpsManaged, Some(owner)) => vec![info_line(&format!(
                "Please update the manifest for {}(Namespace)/{}/{} in your GitOps \
                 repository or version control system.",
                target.namespace, owner.kind, owner.name
            ))],
            (GateDecision::GitOpsManaged, None) | (GateDecision::Apply, _) => Vec::new(),
        }
    }

    /// Message for the result of an in-place update
    pub fn outcome_lines(outcome: &DispatchOutcome) -> Vec<String> {
        match outcome {
            DispatchOutcome::Updated {
                kind,
                name,
                namespace,
            } => vec![
                success_line(&format!(
                    "Updated {} {} in namespace {}.",
                    kind, name, namespace
                )),
                info_line(HELM_REMINDER),
            ],
            DispatchOutcome::Unsupported { kind } => vec![info_line(&format!(
                "Unsupported top-level resource {}. Please update manually.",
                kind
            ))],
            DispatchOutcome::ContainerNotFound {
                kind,
                name,
                container,
            } => vec![warning_line(&format!(
                "Container {} not found in {} {}. No changes were made.",
                container, kind, name
            ))],
        }
    }

    /// Message when a pod has no controller to update
    pub fn no_patch_target_line(target: &ContainerTarget) -> String {
        info_line(&format!(
            "{} has no owning controller. Skipping in-place update.",
            target.display_path()
        ))
    }

    pub fn summary(&self, summary: &ScanSummary) {
        if let OutputFormat::Json = self.format {
            return;
        }
        if summary.containers_flagged == 0 && summary.skipped_no_metrics == 0 {
            self.emit(success_line(&format!(
                "All containers in {} pods define resource requests and limits",
                summary.pods_scanned
            )));
            return;
        }
        println!(
            "\nTotal: {} pods scanned, {} containers missing resources, \
             {} skipped without metrics, {} updated",
            summary.pods_scanned,
            summary.containers_flagged,
            summary.skipped_no_metrics,
            summary.patched
        );
    }
}

impl ScanReporter for TerminalReporter {
    fn finding(&mut self, finding: &Finding) {
        match self.format {
            OutputFormat::Table => println!("{}", Self::render_finding(finding)),
            OutputFormat::Json => match serde_json::to_string_pretty(finding) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!(error = %e, "Failed to serialize finding"),
            },
        }
    }

    fn metrics_unavailable(&mut self, namespace: &str, pod_name: &str, container: &str) {
        self.emit(warning_line(&format!(
            "Metrics unavailable for {}/{}/{}. Skipping.",
            namespace, pod_name, container
        )));
    }

    fn gate_decision(&mut self, target: &ContainerTarget, decision: &GateDecision) {
        for line in Self::decision_lines(target, decision) {
            self.emit(line);
        }
    }

    fn patch_outcome(&mut self, _target: &ContainerTarget, outcome: &DispatchOutcome) {
        for line in Self::outcome_lines(outcome) {
            self.emit(line);
        }
    }

    fn no_patch_target(&mut self, target: &ContainerTarget) {
        self.emit(Self::no_patch_target_line(target));
    }
}
