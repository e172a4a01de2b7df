//! Identifier generation.
//!
//! Step and job identifiers are UUID v7 strings.  Registry identifiers are
//! human-readable (`figma-3c9a1f2`, `workflow-0b7e4d1`) and regenerated
//! until they do not collide with the registry they are joining.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::model::{Application, Workflow};

/// Number of hex digits in a short identifier suffix.
const SUFFIX_LEN: usize = 7;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is a valid regex"));

/// A fresh identifier for a plan step.
pub fn step_id() -> String {
    Uuid::now_v7().to_string()
}

/// A fresh identifier for a queued job.
pub fn job_id() -> String {
    Uuid::now_v7().to_string()
}

/// The last few hex digits of a fresh UUID v7, which come from its random bits.
pub fn short_suffix() -> String {
    let simple = Uuid::now_v7().simple().to_string();
    simple[simple.len() - SUFFIX_LEN..].to_string()
}

/// Lowercase `name` and collapse every run of non-alphanumeric characters
/// into a single dash.  Returns `app` when nothing alphanumeric remains.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let slug = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "app".to_string()
    } else {
        slug.to_string()
    }
}

/// Derive a unique application identifier from its display name.
pub fn application_id(name: &str, existing: &[Application]) -> String {
    let slug = slugify(name);
    loop {
        let candidate = format!("{slug}-{}", short_suffix());
        if !existing.iter().any(|app| app.id == candidate) {
            return candidate;
        }
    }
}

/// Derive a unique identifier for a promoted workflow.
pub fn workflow_id(existing: &[Workflow]) -> String {
    loop {
        let candidate = format!("workflow-{}", short_suffix());
        if !existing.iter().any(|flow| flow.id == candidate) {
            return candidate;
        }
    }
}
