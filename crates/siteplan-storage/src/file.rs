use crate::StorageError;
use siteplan_core::HierarchyDocument;
use std::path::Path;

/// Filename suggested for exports.
pub const EXPORT_FILE_NAME: &str = "page-hierarchy.json";

/// Reads a document from a user-picked JSON file.
///
/// The two failure kinds stay distinct so callers can word them apart: an
/// unreadable file is `Io`, unparseable content is `InvalidJson`.
pub async fn load_from_file(path: impl AsRef<Path>) -> Result<HierarchyDocument, StorageError> {
    let text = tokio::fs::read_to_string(path).await?;
    let document = serde_json::from_str(&text)?;
    Ok(document)
}

/// Writes the document as pretty-printed JSON, 2-space indent. The output
/// is byte-stable for an unchanged document.
pub fn export_to_file(
    document: &HierarchyDocument,
    path: impl AsRef<Path>,
) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    Ok(())
}
