//! Deferred execution unit for dispatched commands.

use std::sync::Arc;

use super::Registry;
use crate::command::Command;
use crate::message::Message;

/// One dispatched invocation, queued for a pool worker.
///
/// Holds its captures as plain fields rather than closing over the bus, so
/// ownership of the payload and the registry handle is explicit: the task
/// owns the payload outright and keeps the registry alive until it runs.
pub(crate) struct DispatchTask {
    registry: Arc<Registry>,
    command: Command,
    payload: Message,
}

impl DispatchTask {
    pub(crate) fn new(registry: Arc<Registry>, command: Command, payload: Message) -> Self {
        Self {
            registry,
            command,
            payload,
        }
    }

    /// Run the shared execution routine and discard the outcome.
    ///
    /// Fire-and-forget: the caller of `dispatch()` has long since returned,
    /// so there is nobody to hand the result or error to. Callers that need
    /// the outcome use `execute()` instead.
    pub(crate) fn run(self) {
        let _ = self.registry.run(&self.command, &self.payload);
    }
}
