//! Plain-text rendering of plans, jobs, and registries.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};

use atlas_intent::registry::resolve_application;
use atlas_intent::{Application, Job, PlanStep, Workflow};

/// Label shown when a step references an application that no longer exists.
pub const UNRESOLVED_APPLICATION: &str = "Custom";

/// Render a plan preview, one numbered card per step.
pub fn plan(steps: &[PlanStep], applications: &[Application]) -> String {
    if steps.is_empty() {
        return "  Draft an intent above to see suggestions.\n".into();
    }

    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step.title);
        if !step.detail.is_empty() {
            let _ = writeln!(out, "     {}", step.detail);
        }
        if let Some(label) = application_label(step, applications) {
            let _ = writeln!(out, "     [{label}]");
        }
    }
    out
}

/// Name of the application a step references, `Custom` when it no longer
/// resolves, or `None` for steps without a reference.
pub fn application_label<'a>(step: &PlanStep, applications: &'a [Application]) -> Option<&'a str> {
    let id = step.application_id.as_deref()?;
    Some(
        resolve_application(applications, id)
            .map(|app| app.name.as_str())
            .unwrap_or(UNRESOLVED_APPLICATION),
    )
}

/// Local `HH:MM` creation time.
pub fn clock_time(created_at: DateTime<Utc>) -> String {
    created_at.with_timezone(&Local).format("%H:%M").to_string()
}

/// Render the automation queue, newest first, numbered from 1.
pub fn jobs(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return "  Queue a command to begin your automation runbook.\n".into();
    }

    let mut out = String::new();
    for (i, job) in jobs.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {}  {:<9}  {}",
            i + 1,
            clock_time(job.created_at()),
            job.status().label(),
            job.command()
        );
        for step in job.plan() {
            let _ = writeln!(out, "       - {}", step.title);
        }
    }
    out
}

/// Render the application registry.  Pinned entries are starred.
pub fn applications(applications: &[Application]) -> String {
    let mut out = String::new();
    for app in applications {
        let marker = if app.pinned { '*' } else { ' ' };
        let _ = writeln!(out, "  {marker} {} ({}) [{}]", app.name, app.category, app.id);
        let _ = writeln!(out, "      {}", app.description);
        if !app.launch_command.is_empty() {
            let _ = writeln!(out, "      $ {}", app.launch_command);
        }
    }
    out
}

/// Render the workflow library.
pub fn workflows(workflows: &[Workflow]) -> String {
    if workflows.is_empty() {
        return "  Queue a command and elevate it to your workflow library.\n".into();
    }

    let mut out = String::new();
    for flow in workflows {
        let _ = writeln!(out, "  {} ({}) [{}]", flow.title, flow.cadence, flow.id);
        let _ = writeln!(out, "      {}", flow.intent);
        for step in &flow.steps {
            let _ = writeln!(out, "      - {}: {}", step.title, step.detail);
        }
    }
    out
}

// ── tests ────────────────────────────────────────────────────────────
