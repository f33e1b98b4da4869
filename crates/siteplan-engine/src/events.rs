use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};
use siteplan_core::PageId;

/// Where a wholesale document replacement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentOrigin {
    /// First run, or the storage slot was empty or unreadable.
    Bootstrap,
    /// Restored from the storage slot.
    Storage,
    /// Imported from a user-picked file.
    Import,
    /// Explicit reset back to the starter dataset.
    Reset,
}

/// Facts the store announces after each successful operation. Shells turn
/// these into toasts or log lines; the engine never renders copy itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreEvent {
    DocumentReplaced { origin: DocumentOrigin },
    DocumentSaved,
    PageAdded { id: PageId, label: String },
    PageDeleted { removed: Vec<PageId> },
    EdgeConnected { source: PageId, target: PageId },
    SectionAdded { page: PageId, section_id: String },
    SectionDeleted { page: PageId, section_id: String },
    SectionsReordered { page: PageId },
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<StoreEvent>,
    rx: Receiver<StoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<StoreEvent> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<StoreEvent> {
        self.rx.clone()
    }

    pub fn publish(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_events_arrive_in_order() {
        let bus = EventBus::new();
        bus.publish(StoreEvent::DocumentSaved);
        bus.publish(StoreEvent::SectionsReordered {
            page: PageId::from("home"),
        });

        let rx = bus.receiver();
        assert!(matches!(rx.recv().unwrap(), StoreEvent::DocumentSaved));
        match rx.recv().unwrap() {
            StoreEvent::SectionsReordered { page } => assert_eq!(page.as_str(), "home"),
            other => panic!("expected SectionsReordered, got {other:?}"),
        }
    }
}
