//! Integration tests for the atlas-intent crate.
//!
//! These exercise the public API end to end: synthesis against the seed
//! registries, the queue lifecycle, and promotion back into the workflow
//! registry.

use atlas_intent::matcher::MAX_APPLICATION_STEPS;
use atlas_intent::{
    Application, ApplicationDraft, JobQueue, JobStatus, MAX_PLAN_STEPS, PlanSynthesizer, Workflow,
    promote, register_application, seed_applications, seed_workflows, synthesize,
};

fn titles(steps: &[atlas_intent::PlanStep]) -> Vec<&str> {
    steps.iter().map(|s| s.title.as_str()).collect()
}

fn tool(index: usize) -> Application {
    Application {
        id: format!("tool-{index}"),
        name: format!("Tool {index}"),
        category: "Automation".into(),
        description: "Batch export helper".into(),
        launch_command: String::new(),
        pinned: false,
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Synthesis properties
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn plans_never_exceed_six_steps() {
    let apps: Vec<Application> = (0..10).map(tool).collect();
    let flows = seed_workflows();
    let commands = [
        "sync design release research meeting export",
        "export",
        "batch",
        "status status status",
        "a",
        "tool",
    ];
    for command in commands {
        let plan = synthesize(command, &apps, &flows);
        assert!(plan.len() <= MAX_PLAN_STEPS, "{command}: {}", plan.len());
    }
}

#[test]
fn empty_command_ignores_registries() {
    let apps: Vec<Application> = (0..10).map(tool).collect();
    assert!(synthesize("", &apps, &seed_workflows()).is_empty());
}

#[test]
fn at_most_four_launch_steps() {
    let apps: Vec<Application> = (0..10).map(tool).collect();
    let plan = synthesize("batch export helper", &apps, &[]);
    let launches = plan.iter().filter(|s| s.title.starts_with("Launch ")).count();
    assert_eq!(launches, MAX_APPLICATION_STEPS);
}

#[test]
fn newly_registered_application_is_matched() {
    let mut apps = seed_applications();
    let raycast = register_application(
        ApplicationDraft {
            name: "Raycast".into(),
            launch_command: "open -a Raycast".into(),
            ..Default::default()
        },
        &apps,
    )
    .unwrap();
    apps.insert(0, raycast.clone());

    let plan = synthesize("open raycast", &apps, &[]);
    assert_eq!(titles(&plan), ["Launch Raycast"]);
    assert_eq!(plan[0].application_id.as_deref(), Some(raycast.id.as_str()));
}

#[test]
fn scenario_then_workflow_then_applications() {
    let plan = synthesize("research in arc browser", &seed_applications(), &seed_workflows());
    assert_eq!(
        titles(&plan),
        [
            "Open research stack",
            "Capture findings",
            "Reference workflow: Research Sprint",
            "Launch Arc Browser",
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════
//  Queue and promotion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn queue_promote_and_match_again() {
    let apps = seed_applications();
    let mut flows: Vec<Workflow> = seed_workflows();
    let synthesizer = PlanSynthesizer::builtin();
    let mut queue = JobQueue::new();

    let job_id = queue
        .commit("ship the release", &synthesizer, &apps, &flows)
        .unwrap()
        .id()
        .to_string();
    assert_eq!(queue.advance(&job_id).unwrap(), JobStatus::InProgress);

    let job = queue.get(&job_id).unwrap();
    let snapshot = job.clone();
    let workflow = promote(job, &flows);
    assert_eq!(workflow.title, "Ship the release");
    assert_eq!(workflow.steps, snapshot.plan());
    flows.insert(0, workflow);

    // The job is untouched by promotion.
    let job = queue.get(&job_id).unwrap();
    assert_eq!(job.status(), JobStatus::InProgress);
    assert_eq!(job.plan(), snapshot.plan());

    // The promoted workflow is now the first registry match for "ship".
    let plan = synthesize("ship it", &apps, &flows);
    assert!(
        plan.iter()
            .any(|s| s.title == "Reference workflow: Ship the release")
    );
    let reference = plan
        .iter()
        .find(|s| s.title.starts_with("Reference workflow:"))
        .unwrap();
    assert_eq!(reference.detail, "1. Run verification · 2. Create release notes");
    assert_eq!(reference.application_id.as_deref(), Some("vscode"));
}
