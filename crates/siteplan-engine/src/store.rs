use crate::bootstrap;
use crate::events::{DocumentOrigin, EventBus, StoreEvent};
use crate::mutation::Mutation;
use crate::ops;
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use siteplan_core::{GraphError, HierarchyDocument};
use siteplan_graph::layout;
use siteplan_storage::{Storage, StorageError};
use std::path::Path;

/// Which dataset a `load` ended up installing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The persisted document was restored.
    Storage,
    /// The slot was empty or unreadable; the starter dataset is in place.
    Bootstrap,
}

/// Headless orchestrator around one hierarchy document.
///
/// Any shell (CLI, desktop, tests) reads state snapshots, applies mutations,
/// and subscribes to `StoreEvent`s. The document is only ever replaced
/// wholesale; racing writers follow last-write-wins.
pub struct HierarchyStore {
    state: Mutex<HierarchyDocument>,
    storage: Storage,
    events: EventBus,
}

impl HierarchyStore {
    /// Starts from the laid-out starter dataset. Call `load` to swap in the
    /// persisted document, when one exists.
    pub fn new(storage: Storage) -> Self {
        Self {
            state: Mutex::new(laid_out(bootstrap::initial_document())),
            storage,
            events: EventBus::new(),
        }
    }

    /// Snapshot of the current document.
    pub fn state(&self) -> HierarchyDocument {
        self.state.lock().clone()
    }

    /// Subscribe to store events. Intended for a single consumer pump; each
    /// event goes to one receiver.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.events.receiver()
    }

    /// Validates and applies one mutation. On success the document is
    /// swapped for a re-laid-out copy and an event is published; on error
    /// the last valid document stays untouched.
    pub fn apply(&self, mutation: Mutation) -> Result<(), GraphError> {
        let current = self.state();
        let (next, event) = match mutation {
            Mutation::AddPage { parent, name } => {
                let (next, id) = ops::add_page(&current, &parent, &name)?;
                let label = name.trim().to_string();
                (next, StoreEvent::PageAdded { id, label })
            }
            Mutation::DeletePage { id } => {
                let (next, removed) = ops::delete_page(&current, &id)?;
                (next, StoreEvent::PageDeleted { removed })
            }
            Mutation::Connect { source, target } => {
                let next = ops::connect(&current, &source, &target)?;
                (next, StoreEvent::EdgeConnected { source, target })
            }
            Mutation::AddSection { page, name } => {
                let (next, section_id) = ops::add_section(&current, &page, &name)?;
                (next, StoreEvent::SectionAdded { page, section_id })
            }
            Mutation::DeleteSection { page, section_id } => {
                let next = ops::delete_section(&current, &page, &section_id);
                (next, StoreEvent::SectionDeleted { page, section_id })
            }
            Mutation::ReorderSections { page, from, to } => {
                let next = ops::reorder_sections(&current, &page, from, to);
                (next, StoreEvent::SectionsReordered { page })
            }
        };

        *self.state.lock() = laid_out(next);
        self.events.publish(event);
        Ok(())
    }

    /// Persists the current document to the storage slot.
    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(&self.state())?;
        self.events.publish(StoreEvent::DocumentSaved);
        Ok(())
    }

    /// Installs the saved document, or the starter dataset when the slot is
    /// empty or unreadable.
    pub fn load(&self) -> Result<LoadOutcome, StorageError> {
        match self.storage.load()? {
            Some(document) => {
                self.install(document, DocumentOrigin::Storage);
                Ok(LoadOutcome::Storage)
            }
            None => {
                self.install(bootstrap::initial_document(), DocumentOrigin::Bootstrap);
                Ok(LoadOutcome::Bootstrap)
            }
        }
    }

    /// Discards the working document for a fresh starter dataset. The
    /// storage slot keeps whatever it had until the next `save`.
    pub fn reset(&self) {
        self.install(bootstrap::initial_document(), DocumentOrigin::Reset);
    }

    /// Empties the storage slot without touching the working document.
    pub fn clear_saved(&self) -> Result<(), StorageError> {
        self.storage.clear()
    }

    /// Replaces the working document with the contents of a JSON file. A
    /// failed read or parse leaves the current document in place.
    pub async fn import_from_file(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let document = siteplan_storage::load_from_file(path).await?;
        self.install(document, DocumentOrigin::Import);
        Ok(())
    }

    /// Writes the current document to `path` as pretty-printed JSON.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        siteplan_storage::export_to_file(&self.state(), path)
    }

    fn install(&self, document: HierarchyDocument, origin: DocumentOrigin) {
        let repaired = ops::normalize(&document);
        *self.state.lock() = laid_out(repaired);
        self.events.publish(StoreEvent::DocumentReplaced { origin });
    }
}

fn laid_out(mut document: HierarchyDocument) -> HierarchyDocument {
    document.nodes = layout(&document.nodes, &document.edges);
    document
}
