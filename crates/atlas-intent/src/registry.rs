//! Application registration and registry lookups.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{IntentError, Result};
use crate::ids;
use crate::model::Application;

/// Category assigned when a draft leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Automation";

/// Description assigned when a draft leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "Add notes so the agent understands how to use this tool.";

/// User-submitted fields for a new application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub launch_command: String,
    #[serde(default)]
    pub description: String,
}

/// Turn a draft into an application whose identifier is unique in `existing`.
///
/// All fields are trimmed.  A blank category or description is replaced
/// with a default; a blank name is rejected.
pub fn register_application(draft: ApplicationDraft, existing: &[Application]) -> Result<Application> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(IntentError::EmptyApplicationName);
    }

    let category = match draft.category.trim() {
        "" => DEFAULT_CATEGORY,
        other => other,
    };
    let description = match draft.description.trim() {
        "" => DEFAULT_DESCRIPTION,
        other => other,
    };

    let application = Application {
        id: ids::application_id(name, existing),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        launch_command: draft.launch_command.trim().to_string(),
        pinned: false,
    };

    info!(application_id = %application.id, name = %application.name, "application registered");
    Ok(application)
}

/// Pinned applications, in registry order.
pub fn pinned(applications: &[Application]) -> Vec<&Application> {
    applications.iter().filter(|app| app.pinned).collect()
}

/// Look up the application a plan step refers to.
///
/// Returns `None` when the reference no longer resolves.
pub fn resolve_application<'a>(applications: &'a [Application], id: &str) -> Option<&'a Application> {
    applications.iter().find(|app| app.id == id)
}
