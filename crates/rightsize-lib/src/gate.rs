//! Operator confirmation before an in-place update

use crate::models::TopLevelOwner;
use serde::Serialize;
use thiserror::Error;

pub const APPLY_QUESTION: &str =
    "Do you want to apply the changes to the top-level parent resource? (yes/no): ";
pub const GITOPS_QUESTION: &str =
    "Is this resource managed by GitOps/version control? (yes/no): ";

/// Failures while asking the operator
#[derive(Debug, Error)]
pub enum GateError {
    /// The operator pressed Ctrl-C; the run stops
    #[error("interrupted at the confirmation prompt")]
    Interrupted,

    #[error("failed to read the answer: {0}")]
    Input(String),
}

/// Source of yes/no answers from the operator
pub trait Confirmer {
    /// Ask `question`; Ok(true) only for an explicit yes
    fn confirm(&mut self, question: &str) -> Result<bool, GateError>;
}

/// Normalise a free-text answer: only `yes` counts
pub fn is_yes(answer: &str) -> bool {
    answer.trim().to_lowercase() == "yes"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// Operator did not confirm, nothing is changed
    Declined,
    /// Desired state lives in a repository; the manifest has to be edited there
    GitOpsManaged,
    /// Proceed with the in-place patch
    Apply,
}

/// Run the two-step confirmation for patching `owner`
pub fn confirm_patch<Q>(
    confirmer: &mut Q,
    namespace: &str,
    owner: &TopLevelOwner,
) -> Result<GateDecision, GateError>
where
    Q: Confirmer + ?Sized,
{
    tracing::debug!(
        namespace = %namespace,
        kind = %owner.kind,
        name = %owner.name,
        "Requesting patch confirmation"
    );

    if !confirmer.confirm(APPLY_QUESTION)? {
        return Ok(GateDecision::Declined);
    }
    if confirmer.confirm(GITOPS_QUESTION)? {
        return Ok(GateDecision::GitOpsManaged);
    }
    Ok(GateDecision::Apply)
}
