//! Integration tests for the atlas-store crate.
//!
//! These run against a real SQLite database on disk (via tempfile) and
//! check that registries survive closing and reopening the database.

use atlas_intent::{ApplicationDraft, JobQueue, PlanSynthesizer, promote};
use atlas_store::{APPLICATIONS_KEY, Database, RegistryStore};

// ═══════════════════════════════════════════════════════════════════════
//  Database lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn reopening_keeps_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("atlas.db");

    let db = Database::open(db_path.clone()).await.unwrap();
    drop(db);
    let db = Database::open(db_path).await.unwrap();

    let version = db.execute(atlas_store::schema::version).await.unwrap();
    assert_eq!(version, atlas_store::schema::SCHEMA_VERSION);
}

// ═══════════════════════════════════════════════════════════════════════
//  Registry persistence
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn registered_application_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("atlas.db");

    let added = {
        let db = Database::open(db_path.clone()).await.unwrap();
        RegistryStore::new(db)
            .add_application(ApplicationDraft {
                name: "  Raycast ".into(),
                launch_command: "open -a Raycast".into(),
                ..Default::default()
            })
            .await
            .unwrap()
    };
    assert!(added.id.starts_with("raycast-"));
    assert_eq!(added.name, "Raycast");
    assert_eq!(added.category, "Automation");

    let db = Database::open(db_path).await.unwrap();
    let apps = RegistryStore::new(db).load_applications().await.unwrap();
    assert_eq!(apps.len(), 6);
    assert_eq!(apps[0], added);
}

#[tokio::test]
async fn second_registration_gets_distinct_id() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("atlas.db"))
        .await
        .unwrap();
    let store = RegistryStore::new(db);

    let draft = ApplicationDraft {
        name: "Raycast".into(),
        ..Default::default()
    };
    let first = store.add_application(draft.clone()).await.unwrap();
    let second = store.add_application(draft).await.unwrap();

    assert!(first.id.starts_with("raycast-"));
    assert!(second.id.starts_with("raycast-"));
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn promoted_workflow_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("atlas.db");

    let workflow = {
        let db = Database::open(db_path.clone()).await.unwrap();
        let store = RegistryStore::new(db);
        let apps = store.load_applications().await.unwrap();
        let flows = store.load_workflows().await.unwrap();

        let mut queue = JobQueue::new();
        let job = queue
            .commit(
                "prepare design mockup export",
                &PlanSynthesizer::builtin(),
                &apps,
                &flows,
            )
            .unwrap();
        let workflow = promote(job, &flows);
        store.add_workflow(workflow.clone()).await.unwrap();
        workflow
    };
    assert_eq!(workflow.title, "Prepare design mockup export");
    assert_eq!(workflow.cadence, "On demand");

    let db = Database::open(db_path).await.unwrap();
    let flows = RegistryStore::new(db).load_workflows().await.unwrap();
    assert_eq!(flows.len(), 4);
    assert_eq!(flows[0], workflow);
}

#[tokio::test]
async fn corrupt_applications_keep_workflows_intact() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("atlas.db"))
        .await
        .unwrap();

    db.execute(|conn| {
        conn.execute(
            "INSERT INTO collections (key, payload, updated_at) VALUES (?1, 'not json', 0)",
            rusqlite::params![APPLICATIONS_KEY],
        )?;
        Ok(())
    })
    .await
    .unwrap();

    let store = RegistryStore::new(db);
    let apps = store.load_applications().await.unwrap();
    assert_eq!(apps, atlas_intent::seed_applications());
    assert_eq!(store.load_workflows().await.unwrap().len(), 3);
}
