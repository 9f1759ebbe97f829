//! Command bus — registration, validation, and execution routing.
//!
//! The bus owns a registry of command → handler and a worker pool. Both
//! invocation paths funnel through one execution routine:
//!
//! ```text
//! execute(cmd, payload) ──┐
//!                         ├── validate → lookup → invoke handler
//! dispatch(cmd, payload) ─┘         (runs later, on a pool worker,
//!        │                           result discarded)
//!        └── validated synchronously before the task is queued
//! ```

mod command_bus;
mod task;

pub use command_bus::CommandBus;

pub(crate) use command_bus::Registry;
