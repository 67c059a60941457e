//! Error types for lessons and the memory model
//!
//! [`MemoryError`] covers slice bounds and index failures raised by
//! [`crate::memory::slice::SharedSlice`]. [`LessonError`] is what lesson code
//! and the [`crate::session::Session`] return; memory errors convert into it.
//!
//! A missing map key is deliberately absent from both: lookups report it with
//! a found-flag instead (see [`crate::memory::map::lookup`]).

use std::io;
use thiserror::Error;

/// Failures of slice indexing and reslicing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Index past the viewed length
    #[error("index out of range [{index}] with length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Reslice bounds outside `0..=capacity` or inverted
    #[error("slice bounds out of range [{low}:{high}] with capacity {capacity}")]
    SliceBounds {
        low: usize,
        high: usize,
        capacity: usize,
    },

    /// `make` called with a length larger than its capacity
    #[error("len larger than cap in make: len {len}, cap {capacity}")]
    LenExceedsCapacity { len: usize, capacity: usize },
}

/// Errors that stop a lesson or a history operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LessonError {
    /// Wrong number of user arguments; the binary exits silently with status 1
    #[error("expected {expected} argument(s), got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("integer division by zero")]
    DivisionByZero,

    /// Closing a resource that was already closed
    #[error("{resource} is closed")]
    Closed { resource: String },

    /// I/O failure reported by a reader or writer; keeps the kind and message
    #[error("i/o error ({kind:?}): {message}")]
    Io { kind: io::ErrorKind, message: String },

    /// Snapshot history limit exceeded
    #[error("snapshot memory limit exceeded: {current} bytes used, limit {limit}")]
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation failed (already at an end, empty history)
    #[error("{message}")]
    History { message: String },

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

impl From<io::Error> for LessonError {
    fn from(err: io::Error) -> Self {
        LessonError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl LessonError {
    /// Whether this error should end the process without any message
    pub fn is_silent(&self) -> bool {
        matches!(self, LessonError::ArgumentCount { .. })
    }
}
