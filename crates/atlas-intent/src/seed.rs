//! Built-in seed registries.
//!
//! Used on first run and whenever a persisted registry is missing, empty, or
//! unreadable.

use crate::model::{Application, PlanStep, Workflow};

fn application(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    launch_command: &str,
    pinned: bool,
) -> Application {
    Application {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        launch_command: launch_command.to_string(),
        pinned,
    }
}

fn step(id: &str, title: &str, detail: &str, application_id: Option<&str>) -> PlanStep {
    PlanStep {
        id: id.to_string(),
        title: title.to_string(),
        detail: detail.to_string(),
        application_id: application_id.map(str::to_string),
    }
}

/// The five seed applications.
pub fn seed_applications() -> Vec<Application> {
    vec![
        application(
            "notion",
            "Notion",
            "Documentation",
            "Project wiki, daily journals, and quick capture database.",
            "open -a Notion",
            true,
        ),
        application(
            "vscode",
            "Visual Studio Code",
            "Development",
            "Primary code editor with project-specific profiles and tasks.",
            "code",
            true,
        ),
        application(
            "figma",
            "Figma",
            "Design",
            "Interface design, prototyping, and asset export workflows.",
            "open -a Figma",
            false,
        ),
        application(
            "arc",
            "Arc Browser",
            "Research",
            "Browser spaces for docs, dashboards, and experimentation.",
            "open -a Arc",
            false,
        ),
        application(
            "obsidian",
            "Obsidian",
            "Knowledge Base",
            "Local knowledge graph and long-form archival notes.",
            "open -a Obsidian",
            false,
        ),
    ]
}

/// The three seed workflows.
pub fn seed_workflows() -> Vec<Workflow> {
    vec![
        Workflow {
            id: "daily-standup".into(),
            title: "Daily Standup Prep".into(),
            intent: "Summarize yesterday, plan today, and surface blockers.".into(),
            cadence: "Weekdays · 08:45".into(),
            steps: vec![
                step(
                    "standup-1",
                    "Capture quick notes",
                    "Open Notion daily journal and drop bullet list of wins, blockers, and focus.",
                    Some("notion"),
                ),
                step(
                    "standup-2",
                    "Review task board",
                    "Check the sprint board in Linear and flag anything needing support.",
                    None,
                ),
                step(
                    "standup-3",
                    "Draft update snippet",
                    "Use VS Code snippets to produce Slack-ready status update.",
                    Some("vscode"),
                ),
            ],
        },
        Workflow {
            id: "design-refresh".into(),
            title: "Design Refresh Loop".into(),
            intent: "Prepare assets, sync comments, and export deliverables for a design iteration."
                .into(),
            cadence: "As needed".into(),
            steps: vec![
                step(
                    "design-1",
                    "Sync prototype",
                    "Open Figma file, accept comments, and snapshot current frames.",
                    Some("figma"),
                ),
                step(
                    "design-2",
                    "Update documentation",
                    "Log decisions in Notion design log and link latest prototype.",
                    Some("notion"),
                ),
                step(
                    "design-3",
                    "Automate export",
                    "Run VS Code task `npm run export:figma` to push production assets.",
                    Some("vscode"),
                ),
            ],
        },
        Workflow {
            id: "research-sprint".into(),
            title: "Research Sprint".into(),
            intent: "Collect references, cluster findings, and draft insights.".into(),
            cadence: "Weekly".into(),
            steps: vec![
                step(
                    "research-1",
                    "Capture sources",
                    "Use Arc split view to collect tabs and auto-organize by topic.",
                    Some("arc"),
                ),
                step(
                    "research-2",
                    "Synthesize notes",
                    "Transfer highlights into Obsidian canvas and map connections.",
                    Some("obsidian"),
                ),
                step(
                    "research-3",
                    "Publish recap",
                    "Drop summary into Notion research hub and assign follow-ups.",
                    Some("notion"),
                ),
            ],
        },
    ]
}
