use crate::PageId;
use thiserror::Error;

/// Failures surfaced across the mutation boundary. These are returned as
/// values; nothing in the engine panics on bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("id already exists: {0}")]
    DuplicateId(String),
    #[error("unknown page: {0}")]
    UnknownPage(PageId),
    #[error("the home page cannot be deleted")]
    RootDeletion,
    #[error("edges cannot point at the home page")]
    RootTarget,
    #[error("a page cannot link to itself")]
    SelfLink,
    #[error("edge already exists: {source} -> {target}")]
    DuplicateEdge { source: PageId, target: PageId },
    #[error("connection would create a cycle: {source} -> {target}")]
    CycleDetected { source: PageId, target: PageId },
}
