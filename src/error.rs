//! Error types for bus operations.

use std::error::Error;
use std::fmt;

use crate::pool::PoolError;

/// Boxed opaque error, used for handler-raised failures.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Error type for command bus operations.
#[derive(Debug)]
pub enum BusError {
    /// Command name is empty.
    InvalidCommand,
    /// Payload is not well-formed JSON.
    InvalidPayload(String),
    /// Handler failed the registration contract check.
    InvalidHandler,
    /// A handler is already registered for this command.
    AlreadyRegistered(String),
    /// No handler registered for this command.
    HandlerNotFound(String),
    /// The bus has begun shutting down and accepts no new work.
    ShuttingDown,
    /// The worker pool refused the dispatch submission.
    Rejected(PoolError),
    /// Registry lock poisoned by a panicking thread.
    LockPoisoned(&'static str),
    /// Error raised by the handler itself, passed through unmodified.
    Handler(BoxError),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::InvalidCommand => write!(f, "command name cannot be empty"),
            BusError::InvalidPayload(msg) => write!(f, "payload is not valid JSON: {}", msg),
            BusError::InvalidHandler => write!(f, "handler is not valid"),
            BusError::AlreadyRegistered(name) => {
                write!(f, "command {} is already registered with a handler", name)
            }
            BusError::HandlerNotFound(name) => {
                write!(f, "no handler registered for command {}", name)
            }
            BusError::ShuttingDown => write!(f, "bus is shutting down"),
            BusError::Rejected(e) => write!(f, "dispatch rejected: {}", e),
            BusError::LockPoisoned(operation) => {
                write!(f, "registry lock poisoned during {}", operation)
            }
            BusError::Handler(e) => write!(f, "handler error: {}", e),
        }
    }
}

impl Error for BusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BusError::Rejected(e) => Some(e),
            BusError::Handler(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<PoolError> for BusError {
    fn from(err: PoolError) -> Self {
        BusError::Rejected(err)
    }
}
