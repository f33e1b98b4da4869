use super::*;
use siteplan_core::{Edge, PageId, PageNode, Section};

fn sample_document() -> HierarchyDocument {
    let mut doc = HierarchyDocument::default();
    doc.nodes
        .push(PageNode::new(PageId::from("home"), "Home", "Home"));
    doc.nodes
        .push(PageNode::new(PageId::from("about"), "About Us", "Users"));
    doc.edges.push(Edge::link(
        "e-home-about",
        PageId::from("home"),
        PageId::from("about"),
    ));
    doc.sections_map
        .insert(PageId::from("home"), vec![Section::new("hero", "Hero")]);
    doc.sections_map.insert(PageId::from("about"), Vec::new());
    doc
}

#[test]
fn test_save_then_load_round_trips() -> Result<(), StorageError> {
    let storage = Storage::new_in_memory()?;
    let doc = sample_document();
    storage.save(&doc)?;
    assert_eq!(storage.load()?, Some(doc));
    Ok(())
}

#[test]
fn test_load_with_nothing_saved_is_none() -> Result<(), StorageError> {
    let storage = Storage::new_in_memory()?;
    assert_eq!(storage.load()?, None);
    Ok(())
}

#[test]
fn test_save_overwrites_the_previous_document() -> Result<(), StorageError> {
    let storage = Storage::new_in_memory()?;
    storage.save(&sample_document())?;

    let mut next = sample_document();
    next.edges.clear();
    storage.save(&next)?;

    assert_eq!(storage.load()?, Some(next));
    Ok(())
}

#[test]
fn test_corrupt_payload_recovers_to_none() -> Result<(), StorageError> {
    let storage = Storage::new_in_memory()?;
    let conn = storage.conn().unwrap();
    conn.execute(
        "INSERT INTO document (key, value) VALUES (?1, ?2)",
        params![STORAGE_KEY, "{ not json"],
    )?;
    assert_eq!(storage.load()?, None);
    Ok(())
}

#[test]
fn test_clear_removes_the_document() -> Result<(), StorageError> {
    let storage = Storage::new_in_memory()?;
    storage.save(&sample_document())?;
    storage.clear()?;
    assert_eq!(storage.load()?, None);
    Ok(())
}

#[test]
fn test_clear_on_an_empty_slot_is_fine() -> Result<(), StorageError> {
    Storage::new_in_memory()?.clear()
}

#[test]
fn test_disabled_storage_is_a_silent_noop() -> Result<(), StorageError> {
    let storage = Storage::disabled();
    storage.save(&sample_document())?;
    assert_eq!(storage.load()?, None);
    storage.clear()?;
    Ok(())
}

#[test]
fn test_documents_survive_a_reopen() -> Result<(), StorageError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("siteplan.db");
    {
        let storage = Storage::open(&path)?;
        storage.save(&sample_document())?;
    }
    let storage = Storage::open(&path)?;
    assert_eq!(storage.load()?, Some(sample_document()));
    Ok(())
}

#[test]
fn test_schema_version_is_stamped() -> Result<(), StorageError> {
    let storage = Storage::new_in_memory()?;
    assert_eq!(schema::schema_version(storage.conn().unwrap())?, SCHEMA_VERSION);
    Ok(())
}

#[tokio::test]
async fn test_load_from_file_round_trips_an_export() -> Result<(), StorageError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(EXPORT_FILE_NAME);
    let doc = sample_document();
    export_to_file(&doc, &path)?;
    assert_eq!(load_from_file(&path).await?, doc);
    Ok(())
}

#[tokio::test]
async fn test_load_from_file_accepts_the_minimal_document() -> Result<(), StorageError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("minimal.json");
    std::fs::write(&path, r#"{"nodes":[],"edges":[],"sectionsMap":{}}"#)?;
    assert_eq!(load_from_file(&path).await?, HierarchyDocument::default());
    Ok(())
}

#[tokio::test]
async fn test_load_from_file_rejects_garbage_as_invalid_json() -> Result<(), StorageError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("junk.json");
    std::fs::write(&path, "not json")?;
    let err = load_from_file(&path).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidJson(_)));
    Ok(())
}

#[tokio::test]
async fn test_load_from_file_reports_missing_files_as_io() {
    let err = load_from_file("/definitely/not/here.json").await.unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

#[test]
fn test_export_is_pretty_printed() -> Result<(), StorageError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(EXPORT_FILE_NAME);
    export_to_file(&sample_document(), &path)?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("{\n  \"nodes\": ["));
    assert!(text.contains("\"strokeWidth\": 2"));
    Ok(())
}
