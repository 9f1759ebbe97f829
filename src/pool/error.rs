//! Error type for pool submissions.

use std::fmt;

/// Error type for task submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The pool has not been started yet.
    NotStarted,
    /// The task queue is at capacity.
    Full,
    /// The pool has been shut down.
    Stopped,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::NotStarted => write!(f, "worker pool not started"),
            PoolError::Full => write!(f, "worker pool queue is full"),
            PoolError::Stopped => write!(f, "worker pool is stopped"),
        }
    }
}

impl std::error::Error for PoolError {}
