//! An in-process command bus.
//!
//! Callers register a handler per named command, then invoke commands
//! either synchronously (`execute` — blocks, result returned) or
//! asynchronously (`dispatch` — queued onto a bounded worker pool,
//! result discarded). The bus decouples *what was requested* from *who
//! handles it*, and on the async path decouples *accepted* from *done*.
//!
//! ## Quick start
//!
//! ```
//! use command_bus::{CommandBus, Message};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Greet {
//!     name: String,
//! }
//!
//! let bus = CommandBus::with_options("greeter", 2, 100);
//!
//! bus.register("greet", |payload: &Message| {
//!     let greet: Greet = payload.decode()?;
//!     let reply = Message::encode(&format!("hello, {}", greet.name))?;
//!     Ok(reply)
//! })
//! .unwrap();
//!
//! let payload = Message::encode(&Greet { name: "Alice".into() }).unwrap();
//!
//! // Synchronous: the handler's result comes back.
//! let reply = bus.execute("greet", &payload).unwrap();
//! assert_eq!(reply.decode::<String>().unwrap(), "hello, Alice");
//!
//! // Asynchronous: accepted now, runs on a background worker.
//! bus.dispatch("greet", payload).unwrap();
//!
//! // Drains all accepted work before returning.
//! bus.shutdown();
//! ```
//!
//! ## Guarantees, briefly
//!
//! - Commands and payloads are validated at every entry point, before a
//!   handler ever sees them; `dispatch` rejects bad input synchronously
//!   rather than dropping it later.
//! - One handler per command, permanently; duplicate registration fails
//!   and leaves the original handler bound.
//! - `shutdown` stops acceptance first, then blocks until every already
//!   accepted unit of work has run. No retry, no redelivery, no ordering
//!   guarantee across distinct commands.

mod bus;
mod command;
mod error;
mod handler;
mod message;
mod pool;

pub use bus::CommandBus;
pub use command::Command;
pub use error::{BoxError, BusError};
pub use handler::{Handler, HandlerResult};
pub use message::Message;
pub use pool::{PoolError, PoolStats, Task, ThreadPool, WorkerPool};
