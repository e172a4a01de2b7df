//! Plan synthesizer: turns a free-text command into an ordered plan.
//!
//! Three independent sources contribute steps, always in this order:
//!
//! 1. **Scenarios**: every catalog scenario whose keywords occur in the
//!    command contributes all of its template steps.
//! 2. **Workflows**: the first registered workflow sharing a token with the
//!    command contributes one summary step.
//! 3. **Applications**: up to four launch steps for matching applications.
//!
//! When a non-empty command produces nothing, a fixed three-step fallback
//! plan is returned instead.  The result is capped at [`MAX_PLAN_STEPS`].
//!
//! Synthesis is a pure function of its inputs apart from step identifiers,
//! which are freshly generated on every call.

use std::sync::LazyLock;

use tracing::debug;

use crate::catalog::ScenarioCatalog;
use crate::matcher::{best_workflow, match_applications, workflow_reference_step};
use crate::model::{Application, PlanStep, Workflow};

/// Maximum number of steps in a synthesized plan.
pub const MAX_PLAN_STEPS: usize = 6;

static BUILTIN: LazyLock<PlanSynthesizer> = LazyLock::new(PlanSynthesizer::builtin);

/// Synthesize a plan with the built-in scenario catalog.
///
/// Total over all inputs: an empty or whitespace-only command yields an
/// empty plan, anything else yields between one and [`MAX_PLAN_STEPS`]
/// steps.
pub fn synthesize(text: &str, applications: &[Application], workflows: &[Workflow]) -> Vec<PlanStep> {
    BUILTIN.synthesize(text, applications, workflows)
}

/// The generic guidance returned when nothing in the command matched.
pub fn fallback_plan() -> Vec<PlanStep> {
    vec![
        PlanStep::new(
            "Clarify outcome",
            "Break the request into 2-3 bullet goals so the desktop agent can prioritize.",
        ),
        PlanStep::new(
            "Select tools",
            "Decide which installed applications best match the task and prepare launch commands.",
        ),
        PlanStep::new(
            "Confirm automation window",
            "Block focus time and ensure prerequisite services are signed in before executing steps.",
        ),
    ]
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Plan synthesizer over a fixed scenario catalog.
///
/// Registries are passed per call and never retained, so one synthesizer
/// can serve concurrent callers holding different registry snapshots.
#[derive(Debug)]
pub struct PlanSynthesizer {
    catalog: ScenarioCatalog,
}

impl PlanSynthesizer {
    /// A synthesizer over the built-in scenario catalog.
    pub fn builtin() -> Self {
        Self::with_catalog(ScenarioCatalog::builtin())
    }

    /// A synthesizer over a custom scenario catalog.
    pub fn with_catalog(catalog: ScenarioCatalog) -> Self {
        Self { catalog }
    }

    /// The scenario catalog consulted by this synthesizer.
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    /// Build the plan for `text` against the given registry snapshots.
    pub fn synthesize(
        &self,
        text: &str,
        applications: &[Application],
        workflows: &[Workflow],
    ) -> Vec<PlanStep> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let lowered = trimmed.to_lowercase();
        let mut steps = Vec::new();

        // Source 1: scenarios, in catalog order.
        let scenarios = self.catalog.matching(&lowered);
        for scenario in &scenarios {
            steps.extend(scenario.instantiate());
        }
        let scenario_steps = steps.len();

        // Source 2: a single reference to the best workflow.
        let workflow = best_workflow(&lowered, workflows);
        if let Some(workflow) = workflow {
            steps.push(workflow_reference_step(workflow));
        }

        // Source 3: launch steps for matching applications.
        let launches = match_applications(&lowered, applications);
        let launch_steps = launches.len();
        steps.extend(launches);

        if steps.is_empty() {
            debug!(command = trimmed, "no source matched, using fallback plan");
            return fallback_plan();
        }

        let produced = steps.len();
        steps.truncate(MAX_PLAN_STEPS);

        debug!(
            command = trimmed,
            scenarios = scenarios.len(),
            scenario_steps,
            workflow = workflow.map(|w| w.id.as_str()),
            launch_steps,
            produced,
            kept = steps.len(),
            "plan synthesized"
        );

        steps
    }
}

impl Default for PlanSynthesizer {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
