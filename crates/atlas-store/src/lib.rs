//! # atlas-store
//!
//! Persistence for the Atlas planner's two registries.
//!
//! Applications and workflows are kept as independent JSON collections in
//! a small SQLite key-value table (WAL mode, versioned layout).  A
//! missing or corrupt collection degrades to the built-in seed set instead
//! of failing.
//!
//! ## Quick start
//!
//! ```ignore
//! use atlas_store::{Database, RegistryStore};
//!
//! let db = Database::open("data/atlas.db").await?;
//! let registries = RegistryStore::new(db);
//! let applications = registries.load_applications().await?;
//! let workflows = registries.load_workflows().await?;
//! let plan = atlas_intent::synthesize("ship the release", &applications, &workflows);
//! ```

pub mod db;
pub mod error;
pub mod registry_store;
pub mod schema;

// ── re-exports ───────────────────────────────────────────────────────

pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use registry_store::{APPLICATIONS_KEY, RegistryStore, WORKFLOWS_KEY};
