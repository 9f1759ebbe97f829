//! Command handlers.

use crate::error::{BoxError, BusError};
use crate::message::Message;

/// The result of running a handler: an output payload or an opaque error.
pub type HandlerResult = Result<Message, BoxError>;

/// A command handler — a function from input payload to output payload.
///
/// Handlers own one command's business logic. The bus never interprets a
/// handler's output or error; on the execute path both are handed back to
/// the caller, on the dispatch path both are discarded.
pub type Handler = Box<dyn Fn(&Message) -> HandlerResult + Send + Sync>;

/// Registration-time contract check for handlers.
///
/// The type system already rules out an absent handler, so nothing is
/// rejected today; registration still routes through here so handlers are
/// validated the same way commands are.
pub(crate) fn valid(_handler: &Handler) -> Result<(), BusError> {
    Ok(())
}
