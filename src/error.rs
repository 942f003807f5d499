//! Error types for editor operations.

use thiserror::Error;

/// Errors raised by the annotation store and the editor state machine.
///
/// These indicate a bug in the caller (an index that the store never handed
/// out), so they are surfaced instead of being silently ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Rectangle index outside the store
    #[error("Rectangle index {index} out of range (store holds {len})")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of rectangles in the store
        len: usize,
    },
}

/// Errors raised when binding input listeners to a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A listener set is already attached; detach it first
    #[error("A listener set is already attached to this session")]
    AlreadyAttached,

    /// The subscription belongs to a listener set that was detached
    #[error("Subscription {id} is no longer active")]
    StaleSubscription {
        /// Identifier of the rejected subscription
        id: u64,
    },

    /// An editor operation failed while handling an event
    #[error(transparent)]
    Editor(#[from] EditorError),
}
