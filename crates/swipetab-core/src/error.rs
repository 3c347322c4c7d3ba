//! Error types for swipetab-core.

use std::thread::ThreadId;

use thiserror::Error;

/// Errors raised by the core systems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("invalid or disconnected connection ID")]
    InvalidConnection,

    /// An object with UI-thread affinity was used from another thread.
    #[error("accessed from thread \"{name}\" ({actual:?}), owned by {expected:?}")]
    WrongThread {
        /// Thread the object is bound to.
        expected: ThreadId,
        /// Thread that attempted the access.
        actual: ThreadId,
        /// Name of the offending thread.
        name: String,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
