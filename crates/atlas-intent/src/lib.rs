//! Intent-to-plan synthesis engine for the Atlas desktop planner.
//!
//! This crate provides:
//!
//! - **Plan synthesis**: rule-based conversion of a free-text command into
//!   a short, ordered plan via [`synthesizer::PlanSynthesizer`] and the
//!   [`synthesize`] shortcut.
//! - **Scenario catalog**: built-in keyword-triggered step templates
//!   matched with a single Aho-Corasick scan ([`catalog::ScenarioCatalog`]).
//! - **Registry matchers**: application launch steps and workflow reference
//!   steps ([`matcher`]).
//! - **Job queue and promotion**: queued commands with frozen plans, a
//!   cyclic status lifecycle, and promotion into reusable workflows.
//!
//! Nothing in this crate performs I/O.  Registries are passed in as
//! read-only snapshots on every call.

pub mod catalog;
pub mod error;
pub mod ids;
pub mod job;
pub mod matcher;
pub mod model;
pub mod promotion;
pub mod registry;
pub mod seed;
pub mod synthesizer;

pub use catalog::{Scenario, ScenarioCatalog, TemplateStep};
pub use error::{IntentError, Result};
pub use job::{Job, JobQueue, JobStatus};
pub use model::{Application, PlanStep, Workflow};
pub use promotion::promote;
pub use registry::{ApplicationDraft, register_application};
pub use seed::{seed_applications, seed_workflows};
pub use synthesizer::{MAX_PLAN_STEPS, PlanSynthesizer, synthesize};
