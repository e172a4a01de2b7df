//! Registry matchers.
//!
//! Both matchers are pure functions of the lowercased command and a registry
//! snapshot.  Neither can fail: an empty registry or an empty match set
//! yields an empty result.

use crate::model::{Application, PlanStep, Workflow};

/// Maximum number of launch steps contributed by the application matcher.
pub const MAX_APPLICATION_STEPS: usize = 4;

/// Separator between step titles in a workflow reference summary.
const SUMMARY_SEPARATOR: &str = " · ";

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// Whether `app` matches the lowercased command.
///
/// The test is deliberately bidirectional: the application's text may
/// contain the whole command, or the command may mention the application
/// by name.
pub fn application_matches(lowered: &str, app: &Application) -> bool {
    app.haystack().contains(lowered) || lowered.contains(&app.name.to_lowercase())
}

/// Emit one launch step per matching application, in registry order, capped
/// at [`MAX_APPLICATION_STEPS`].
pub fn match_applications(lowered: &str, applications: &[Application]) -> Vec<PlanStep> {
    applications
        .iter()
        .filter(|app| application_matches(lowered, app))
        .take(MAX_APPLICATION_STEPS)
        .map(launch_step)
        .collect()
}

/// Build the launch step for a single application.
pub fn launch_step(app: &Application) -> PlanStep {
    let detail = if app.launch_command.is_empty() {
        format!("Trigger {} using your preferred app launcher.", app.name)
    } else {
        format!("Run \"{}\" from your terminal or launcher.", app.launch_command)
    };
    PlanStep::new(format!("Launch {}", app.name), detail).with_application(Some(app.id.clone()))
}

// ---------------------------------------------------------------------------
// Workflows
// ---------------------------------------------------------------------------

/// Workflows whose title or intent contains any whitespace-separated token
/// of the lowercased command, in registry order.
pub fn matching_workflows<'a>(lowered: &str, workflows: &'a [Workflow]) -> Vec<&'a Workflow> {
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    workflows
        .iter()
        .filter(|flow| {
            let haystack = flow.haystack();
            tokens.iter().any(|token| haystack.contains(token))
        })
        .collect()
}

/// The best workflow match (the first in registry order), if any.
pub fn best_workflow<'a>(lowered: &str, workflows: &'a [Workflow]) -> Option<&'a Workflow> {
    matching_workflows(lowered, workflows).into_iter().next()
}

/// Summarize a workflow as a single reference step.
///
/// The detail lists the workflow's step titles as `1. A · 2. B · ...`, and
/// the application reference is inherited from its first step.
pub fn workflow_reference_step(workflow: &Workflow) -> PlanStep {
    let detail = workflow
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {}", index + 1, step.title))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR);

    let application_id = workflow
        .steps
        .first()
        .and_then(|step| step.application_id.clone());

    PlanStep::new(format!("Reference workflow: {}", workflow.title), detail)
        .with_application(application_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str, name: &str, description: &str, launch: &str) -> Application {
        Application {
            id: id.into(),
            name: name.into(),
            category: "Tools".into(),
            description: description.into(),
            launch_command: launch.into(),
            pinned: false,
        }
    }

    fn flow(id: &str, title: &str, intent: &str, steps: Vec<PlanStep>) -> Workflow {
        Workflow {
            id: id.into(),
            title: title.into(),
            intent: intent.into(),
            cadence: "Weekly".into(),
            steps,
        }
    }

    #[test]
    fn command_mentioning_app_name_matches() {
        let apps = vec![app("figma", "Figma", "Interface design", "open -a Figma")];
        let steps = match_applications("open figma and export", &apps);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "Launch Figma");
        assert_eq!(steps[0].detail, "Run \"open -a Figma\" from your terminal or launcher.");
        assert_eq!(steps[0].application_id.as_deref(), Some("figma"));
    }

    #[test]
    fn short_command_inside_description_matches() {
        let apps = vec![app("arc", "Arc Browser", "Browser spaces for dashboards", "")];
        let steps = match_applications("dashboards", &apps);
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0].detail,
            "Trigger Arc Browser using your preferred app launcher."
        );
    }

    #[test]
    fn unrelated_command_matches_nothing() {
        let apps = vec![app("figma", "Figma", "Interface design", "")];
        assert!(match_applications("water the plants", &apps).is_empty());
        assert!(match_applications("figma", &[]).is_empty());
    }

    #[test]
    fn application_steps_are_capped() {
        let apps: Vec<Application> = (0..10)
            .map(|i| app(&format!("tool-{i}"), &format!("Tool{i}"), "automation tool", ""))
            .collect();
        let steps = match_applications("automation", &apps);
        assert_eq!(steps.len(), MAX_APPLICATION_STEPS);
        let ids: Vec<_> = steps.iter().filter_map(|s| s.application_id.as_deref()).collect();
        assert_eq!(ids, ["tool-0", "tool-1", "tool-2", "tool-3"]);
    }

    #[test]
    fn workflow_token_match_in_registry_order() {
        let flows = vec![
            flow("a", "Morning Review", "check inbox", vec![]),
            flow("b", "Inbox Zero", "archive mail", vec![]),
            flow("c", "Gardening", "water plants", vec![]),
        ];
        let hits: Vec<_> = matching_workflows("clean inbox", &flows)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(hits, ["a", "b"]);
        assert_eq!(best_workflow("clean inbox", &flows).map(|f| f.id.as_str()), Some("a"));
    }

    #[test]
    fn blank_command_matches_no_workflow() {
        let flows = vec![flow("a", "Morning Review", "check inbox", vec![])];
        assert!(matching_workflows("   ", &flows).is_empty());
    }

    #[test]
    fn reference_step_summarizes_titles() {
        let steps = vec![
            PlanStep::new("Capture", "x").with_application(Some("notion".into())),
            PlanStep::new("Review", "y"),
        ];
        let step = workflow_reference_step(&flow("a", "Standup", "daily", steps));
        assert_eq!(step.title, "Reference workflow: Standup");
        assert_eq!(step.detail, "1. Capture · 2. Review");
        assert_eq!(step.application_id.as_deref(), Some("notion"));
    }

    #[test]
    fn reference_step_for_empty_workflow() {
        let step = workflow_reference_step(&flow("a", "Empty", "nothing", vec![]));
        assert!(step.detail.is_empty());
        assert!(step.application_id.is_none());
    }
}
