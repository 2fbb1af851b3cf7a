//! Error types for metsedit operations.

use thiserror::Error;

/// Errors that can occur while editing a container document.
///
/// Every variant is a deterministic precondition violation: given the same
/// document state, the same call fails the same way. Nothing here is
/// retryable, and a failed operation leaves the document unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The referenced div could not be located in the tree.
    #[error("Child div element not found")]
    ChildNotFound,

    /// A sibling or parent position was requested for the tree root.
    #[error("Root element cannot have a parent")]
    RootCannotHaveParent,

    /// Removal of the tree root was requested.
    #[error("Root element cannot be removed")]
    RootCannotBeRemoved,

    /// A move would place a div inside its own subtree, detaching it.
    #[error("Div element cannot be moved into its own subtree")]
    MoveIntoOwnSubtree,

    /// No metadata section exists at the given index.
    #[error("MdSec element with index: {0} does not exist")]
    MdSecIndexNotFound(usize),

    /// No metadata section carries the given id.
    #[error("MdSec element with id: {0} was not found")]
    MdSecIdNotFound(String),

    /// None of the sections referenced by the div hold structured records.
    #[error("Div element with id: {0} does not have metadata!")]
    DivWithoutMetadata(String),

    /// The section exists but has no payload at all.
    #[error("MdSec element with index: {0} does not have data")]
    MdSecWithoutData(usize),

    /// The section has a payload, but not of the structured kind.
    #[error("MdSec element with index: {0} does not have structured metadata")]
    MdSecWithoutRecords(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
