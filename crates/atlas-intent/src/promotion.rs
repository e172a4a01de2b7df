//! Promote a queued job into a reusable workflow.

use tracing::info;

use crate::ids;
use crate::job::Job;
use crate::model::{PlanStep, Workflow};

/// Title used when the job's command has no words.
pub const DEFAULT_TITLE: &str = "Custom Automation";

/// Cadence label given to every promoted workflow.
pub const PROMOTED_CADENCE: &str = "On demand";

/// Number of command words kept in a promoted workflow's title.
const TITLE_WORDS: usize = 4;

/// Build a workflow from a job's command and frozen plan.
///
/// The job is borrowed immutably and never changes.  The new workflow's
/// identifier is unique within `existing`; callers are expected to add it
/// to the front of the registry.
pub fn promote(job: &Job, existing: &[Workflow]) -> Workflow {
    let steps = if job.plan().is_empty() {
        vec![PlanStep::new(
            "Document desired outcome",
            "Describe the goal, constraints, and success criteria.",
        )]
    } else {
        job.plan().to_vec()
    };

    let workflow = Workflow {
        id: ids::workflow_id(existing),
        title: promoted_title(job.command()),
        intent: job.command().to_string(),
        cadence: PROMOTED_CADENCE.to_string(),
        steps,
    };

    info!(
        job_id = %job.id(),
        workflow_id = %workflow.id,
        title = %workflow.title,
        "job promoted to workflow"
    );
    workflow
}

/// The first few words of `command` with the first character uppercased.
pub fn promoted_title(command: &str) -> String {
    let title = command
        .split_whitespace()
        .take(TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => DEFAULT_TITLE.to_string(),
    }
}
