pub mod bootstrap;
pub mod events;
pub mod mutation;
pub mod ops;
pub mod store;

pub use events::{DocumentOrigin, EventBus, StoreEvent};
pub use mutation::Mutation;
pub use store::{HierarchyStore, LoadOutcome};
