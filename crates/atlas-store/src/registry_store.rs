//! Registry persistence.
//!
//! The application and workflow registries are stored as two independent
//! entries of the `collections` key-value table, each holding an ordered
//! JSON array of records.  Loading never fails because of the payload:
//! a missing, empty, or unreadable collection is replaced by the built-in
//! seed set.  SQLite failures still propagate.

use chrono::Utc;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use atlas_intent::{
    Application, ApplicationDraft, Workflow, register_application, seed_applications,
    seed_workflows,
};

use crate::db::Database;
use crate::error::{StoreError, StoreResult};

/// Collection key holding the application registry.
pub const APPLICATIONS_KEY: &str = "atlas.applications";

/// Collection key holding the workflow registry.
pub const WORKFLOWS_KEY: &str = "atlas.workflows";

// ═══════════════════════════════════════════════════════════════════════
//  RegistryStore
// ═══════════════════════════════════════════════════════════════════════

/// Load and replace the persisted registries.
#[derive(Clone)]
pub struct RegistryStore {
    db: Database,
}

impl RegistryStore {
    /// Create a registry store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the application registry, falling back to the seed set.
    #[instrument(skip(self))]
    pub async fn load_applications(&self) -> StoreResult<Vec<Application>> {
        self.db
            .execute(|conn| {
                let payload = read_payload(conn, APPLICATIONS_KEY)?;
                Ok(decode_or_seed(APPLICATIONS_KEY, payload, seed_applications))
            })
            .await
    }

    /// Replace the whole application registry.
    #[instrument(skip(self, applications), fields(count = applications.len()))]
    pub async fn save_applications(&self, applications: &[Application]) -> StoreResult<()> {
        let payload = serde_json::to_string(applications)?;
        self.db
            .execute(move |conn| write_payload(conn, APPLICATIONS_KEY, &payload))
            .await
    }

    /// Load the workflow registry, falling back to the seed set.
    #[instrument(skip(self))]
    pub async fn load_workflows(&self) -> StoreResult<Vec<Workflow>> {
        self.db
            .execute(|conn| {
                let payload = read_payload(conn, WORKFLOWS_KEY)?;
                Ok(decode_or_seed(WORKFLOWS_KEY, payload, seed_workflows))
            })
            .await
    }

    /// Replace the whole workflow registry.
    #[instrument(skip(self, workflows), fields(count = workflows.len()))]
    pub async fn save_workflows(&self, workflows: &[Workflow]) -> StoreResult<()> {
        let payload = serde_json::to_string(workflows)?;
        self.db
            .execute(move |conn| write_payload(conn, WORKFLOWS_KEY, &payload))
            .await
    }

    /// Register a new application and put it at the front of the registry.
    ///
    /// Reading, registering, and writing happen in one transaction so the
    /// generated identifier is unique against the stored registry.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_application(&self, draft: ApplicationDraft) -> StoreResult<Application> {
        self.db
            .execute_mut(move |conn| {
                let tx = conn.transaction()?;
                let payload = read_payload(&tx, APPLICATIONS_KEY)?;
                let mut applications = decode_or_seed(APPLICATIONS_KEY, payload, seed_applications);

                let application = register_application(draft, &applications)?;
                applications.insert(0, application.clone());

                write_payload(&tx, APPLICATIONS_KEY, &serde_json::to_string(&applications)?)?;
                tx.commit()?;

                info!(application_id = %application.id, total = applications.len(), "application saved");
                Ok(application)
            })
            .await
    }

    /// Put a workflow at the front of the registry.
    ///
    /// Fails with [`StoreError::Duplicate`] when its identifier is taken.
    #[instrument(skip(self, workflow), fields(workflow_id = %workflow.id))]
    pub async fn add_workflow(&self, workflow: Workflow) -> StoreResult<()> {
        self.db
            .execute_mut(move |conn| {
                let tx = conn.transaction()?;
                let payload = read_payload(&tx, WORKFLOWS_KEY)?;
                let mut workflows = decode_or_seed(WORKFLOWS_KEY, payload, seed_workflows);

                if workflows.iter().any(|w| w.id == workflow.id) {
                    return Err(StoreError::Duplicate {
                        entity: "workflow",
                        id: workflow.id,
                    });
                }

                let workflow_id = workflow.id.clone();
                workflows.insert(0, workflow);

                write_payload(&tx, WORKFLOWS_KEY, &serde_json::to_string(&workflows)?)?;
                tx.commit()?;

                info!(workflow_id = %workflow_id, total = workflows.len(), "workflow saved");
                Ok(())
            })
            .await
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Internal helpers
// ═══════════════════════════════════════════════════════════════════════

fn read_payload(conn: &Connection, key: &str) -> StoreResult<Option<String>> {
    let result = conn.query_row(
        "SELECT payload FROM collections WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
    );
    match result {
        Ok(payload) => Ok(Some(payload)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StoreError::Sqlite(e)),
    }
}

fn write_payload(conn: &Connection, key: &str, payload: &str) -> StoreResult<()> {
    let now = Utc::now().timestamp();
    conn.execute(
        "INSERT INTO collections (key, payload, updated_at) VALUES (?1, ?2, ?3) \
         ON CONFLICT(key) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
        rusqlite::params![key, payload, now],
    )?;
    debug!(key, bytes = payload.len(), "collection written");
    Ok(())
}

/// Decode a stored collection, substituting `seed()` when it is missing,
/// empty, or cannot be parsed.
fn decode_or_seed<T>(key: &str, payload: Option<String>, seed: fn() -> Vec<T>) -> Vec<T>
where
    T: DeserializeOwned,
{
    let Some(payload) = payload else {
        debug!(key, "collection not stored yet, using seed set");
        return seed();
    };

    match serde_json::from_str::<Vec<T>>(&payload) {
        Ok(records) if records.is_empty() => {
            debug!(key, "collection is empty, using seed set");
            seed()
        }
        Ok(records) => records,
        Err(err) => {
            warn!(key, %err, "failed to parse stored collection, using seed set");
            seed()
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────
