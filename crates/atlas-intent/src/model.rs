//! Records the engine reasons over: applications, workflows, and plan steps.
//!
//! These are also the persisted record shapes, so every type derives
//! `Serialize`/`Deserialize` with camelCase field names.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plan steps
// ---------------------------------------------------------------------------

/// A single actionable step inside a synthesized plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    /// Ephemeral identifier, unique within one plan.
    pub id: String,
    /// Short imperative title.
    pub title: String,
    /// Longer guidance text.
    pub detail: String,
    /// The application this step is best executed with, if any.
    ///
    /// Non-owning: the application may no longer be registered when the
    /// step is displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl PlanStep {
    /// Create a step with a freshly generated identifier.
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            id: crate::ids::step_id(),
            title: title.into(),
            detail: detail.into(),
            application_id: None,
        }
    }

    /// Attach an application reference to this step.
    pub fn with_application(mut self, application_id: Option<String>) -> Self {
        self.application_id = application_id;
        self
    }

    /// Compare title, detail, and application reference, ignoring the id.
    pub fn same_content(&self, other: &PlanStep) -> bool {
        self.title == other.title
            && self.detail == other.detail
            && self.application_id == other.application_id
    }
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// A desktop application the planner knows how to launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Stable identifier, unique within the registry.
    pub id: String,
    /// Display name (e.g. "Visual Studio Code").
    pub name: String,
    /// Category label (e.g. "Development").
    pub category: String,
    /// Free-text description of how the application is used.
    pub description: String,
    /// Shell command that launches the application.  May be empty.
    #[serde(default)]
    pub launch_command: String,
    /// Whether the application is pinned to the header.
    #[serde(default)]
    pub pinned: bool,
}

impl Application {
    /// Lowercased `"{name} {category} {description}"` used for matching.
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.name, self.category, self.description).to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Workflows
// ---------------------------------------------------------------------------

/// A reusable, named sequence of plan steps.
///
/// Steps are embedded copies frozen at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Unique identifier within the registry.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// What the workflow is for.
    pub intent: String,
    /// Free-text cadence label (e.g. "Weekly").
    pub cadence: String,
    /// Ordered steps.
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

impl Workflow {
    /// Lowercased `"{title} {intent}"` used for matching.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.title, self.intent).to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
