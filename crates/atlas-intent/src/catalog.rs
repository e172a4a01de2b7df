//! Scenario catalog: keyword-triggered step templates.
//!
//! Each scenario declares a set of trigger keywords and an ordered list of
//! template steps.  A scenario matches when any of its keywords occurs as a
//! substring of the (lowercased) command text.
//!
//! All keywords of the catalog are compiled into one [`aho_corasick`]
//! automaton so a command is scanned once regardless of how many scenarios
//! are registered.  Overlapping search is used so that a keyword hidden
//! inside a longer one ("notes" inside "keynotes") still counts.
//!
//! # Example
//!
//! ```rust
//! # use atlas_intent::catalog::ScenarioCatalog;
//! let catalog = ScenarioCatalog::builtin();
//! let hits: Vec<&str> = catalog
//!     .matching("ship the release")
//!     .iter()
//!     .map(|s| s.id.as_str())
//!     .collect();
//! assert_eq!(hits, ["deploy"]);
//! ```

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

use crate::model::PlanStep;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A step template contributed by a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStep {
    pub title: String,
    pub detail: String,
    /// Application the step should be executed with, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

/// A built-in heuristic: trigger keywords plus the steps they contribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    /// Lowercase trigger keywords.
    pub keywords: Vec<String>,
    pub steps: Vec<TemplateStep>,
}

impl Scenario {
    /// Instantiate the template steps with fresh identifiers, in order.
    pub fn instantiate(&self) -> Vec<PlanStep> {
        self.steps
            .iter()
            .map(|step| {
                PlanStep::new(step.title.clone(), step.detail.clone())
                    .with_application(step.application_id.clone())
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only table of scenarios with a compiled keyword automaton.
///
/// The catalog is **not** `Clone` because it holds a compiled automaton.
/// Wrap in `Arc` if shared access is needed.
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    /// Automaton over every keyword of every scenario, in catalog order.
    automaton: Option<AhoCorasick>,
    /// For each automaton pattern, the index of the scenario that owns it.
    owners: Vec<usize>,
    /// Keyword strings parallel to `owners`, used when no automaton exists.
    keywords: Vec<String>,
}

impl ScenarioCatalog {
    /// Build a catalog from the given scenarios.
    ///
    /// Keywords are lowercased and empty keywords are dropped.
    pub fn new(mut scenarios: Vec<Scenario>) -> Self {
        let mut keywords = Vec::new();
        let mut owners = Vec::new();

        for (index, scenario) in scenarios.iter_mut().enumerate() {
            scenario.keywords = scenario
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            for keyword in &scenario.keywords {
                keywords.push(keyword.clone());
                owners.push(index);
            }
        }

        let automaton = if keywords.is_empty() {
            None
        } else {
            match AhoCorasick::new(&keywords) {
                Ok(ac) => {
                    tracing::trace!(count = keywords.len(), "scenario keyword automaton built");
                    Some(ac)
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to build scenario automaton, using substring scan");
                    None
                }
            }
        };

        Self {
            scenarios,
            automaton,
            owners,
            keywords,
        }
    }

    /// The built-in catalog of desktop-automation heuristics.
    pub fn builtin() -> Self {
        Self::new(builtin_scenarios())
    }

    /// All scenarios, in catalog order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Number of scenarios in the catalog.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the catalog has no scenarios.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Scenarios with at least one keyword contained in `lowered`, in
    /// catalog order.  `lowered` must already be lowercase.
    pub fn matching(&self, lowered: &str) -> Vec<&Scenario> {
        let mut hit = vec![false; self.scenarios.len()];

        match &self.automaton {
            Some(ac) => {
                for mat in ac.find_overlapping_iter(lowered) {
                    hit[self.owners[mat.pattern().as_usize()]] = true;
                }
            }
            None => {
                for (keyword, &owner) in self.keywords.iter().zip(&self.owners) {
                    if lowered.contains(keyword.as_str()) {
                        hit[owner] = true;
                    }
                }
            }
        }

        self.scenarios
            .iter()
            .zip(hit)
            .filter_map(|(scenario, hit)| hit.then_some(scenario))
            .collect()
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ScenarioCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioCatalog")
            .field("scenarios", &self.scenarios.len())
            .field("keywords", &self.keywords.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in scenarios
// ---------------------------------------------------------------------------

fn template(title: &str, detail: &str, application_id: Option<&str>) -> TemplateStep {
    TemplateStep {
        title: title.to_string(),
        detail: detail.to_string(),
        application_id: application_id.map(str::to_string),
    }
}

fn scenario(id: &str, keywords: &[&str], steps: Vec<TemplateStep>) -> Scenario {
    Scenario {
        id: id.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        steps,
    }
}

/// The built-in scenarios, in priority order.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        scenario(
            "sync",
            &["sync", "align", "status"],
            vec![
                template(
                    "Check comms",
                    "Scan inbox and chat for new context before automating any updates.",
                    None,
                ),
                template(
                    "Prep summary",
                    "Draft summary bullets and confirm wording before broadcasting updates.",
                    None,
                ),
            ],
        ),
        scenario(
            "design",
            &["design", "mockup", "prototype", "figma"],
            vec![
                template(
                    "Launch design workspace",
                    "Collect latest comments and open shared libraries inside Figma space.",
                    Some("figma"),
                ),
                template(
                    "Sync specs",
                    "Update implementation notes in Notion or VS Code workspace.",
                    None,
                ),
            ],
        ),
        scenario(
            "deploy",
            &["deploy", "release", "ship", "build"],
            vec![
                template(
                    "Run verification",
                    "Execute test suite locally and confirm green checks before deployment.",
                    Some("vscode"),
                ),
                template(
                    "Create release notes",
                    "Assemble concise change log and QA check list for stakeholders.",
                    None,
                ),
            ],
        ),
        scenario(
            "research",
            &["research", "investigate", "analysis", "insights"],
            vec![
                template(
                    "Open research stack",
                    "Arrange Arc spaces with search queries and reference dashboards.",
                    Some("arc"),
                ),
                template(
                    "Capture findings",
                    "Log key insights in Obsidian vault and tag follow-up questions.",
                    Some("obsidian"),
                ),
            ],
        ),
        scenario(
            "meeting",
            &["meeting", "call", "recording", "notes"],
            vec![
                template(
                    "Prep agenda",
                    "Pull latest agenda doc and confirm talking points.",
                    Some("notion"),
                ),
                template(
                    "Launch capture tools",
                    "Ready recorder, screen share, and note-taking template before joining.",
                    None,
                ),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(scenarios: &[&'a Scenario]) -> Vec<&'a str> {
        scenarios.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn builtin_has_five_scenarios() {
        let catalog = ScenarioCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.scenarios().iter().all(|s| s.steps.len() == 2));
    }

    #[test]
    fn keyword_substring_matches() {
        let catalog = ScenarioCatalog::builtin();
        // "prototypes" contains "prototype"; "building" contains "build".
        assert_eq!(ids(&catalog.matching("review prototypes")), ["design"]);
        assert_eq!(ids(&catalog.matching("building things")), ["deploy"]);
    }

    #[test]
    fn multiple_scenarios_in_catalog_order() {
        let catalog = ScenarioCatalog::builtin();
        let hits = catalog.matching("meeting notes about the release status");
        assert_eq!(ids(&hits), ["sync", "deploy", "meeting"]);
    }

    #[test]
    fn overlapping_keywords_are_all_seen() {
        let catalog = ScenarioCatalog::new(vec![
            scenario("long", &["keynotes"], vec![]),
            scenario("short", &["notes"], vec![]),
        ]);
        assert_eq!(ids(&catalog.matching("keynotes")), ["long", "short"]);
    }

    #[test]
    fn no_match_returns_empty() {
        let catalog = ScenarioCatalog::builtin();
        assert!(catalog.matching("water the plants").is_empty());
    }

    #[test]
    fn keywords_are_normalized() {
        let catalog = ScenarioCatalog::new(vec![scenario("x", &["  Focus ", ""], vec![])]);
        assert_eq!(catalog.scenarios()[0].keywords, ["focus"]);
        assert_eq!(ids(&catalog.matching("deep focus block")), ["x"]);
    }

    #[test]
    fn empty_catalog_matches_nothing() {
        let catalog = ScenarioCatalog::new(vec![]);
        assert!(catalog.is_empty());
        assert!(catalog.matching("anything").is_empty());
    }

    #[test]
    fn instantiate_preserves_order_and_references() {
        let catalog = ScenarioCatalog::builtin();
        let research = &catalog.matching("research")[0];
        let steps = research.instantiate();
        assert_eq!(steps[0].title, "Open research stack");
        assert_eq!(steps[0].application_id.as_deref(), Some("arc"));
        assert_eq!(steps[1].application_id.as_deref(), Some("obsidian"));
        assert_ne!(steps[0].id, steps[1].id);
    }
}
