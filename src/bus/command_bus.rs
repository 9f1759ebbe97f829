//! The command bus: registry, validation, and both invocation paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::task::DispatchTask;
use crate::command::Command;
use crate::error::BusError;
use crate::handler::{self, Handler, HandlerResult};
use crate::message::Message;
use crate::pool::{ThreadPool, WorkerPool};

/// The command → handler registry plus the shared execution routine.
///
/// Shared between the bus and in-flight dispatch tasks via `Arc`, so queued
/// work can still reach its handler while the bus itself is draining.
pub(crate) struct Registry {
    handlers: RwLock<HashMap<Command, Handler>>,
}

impl Registry {
    fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    fn insert(&self, command: Command, handler: Handler) -> Result<(), BusError> {
        command.valid()?;
        handler::valid(&handler)?;

        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| BusError::LockPoisoned("register"))?;
        if handlers.contains_key(&command) {
            return Err(BusError::AlreadyRegistered(command.name().to_string()));
        }
        handlers.insert(command, handler);
        Ok(())
    }

    /// The shared execution routine: validate, look up, invoke.
    ///
    /// Both `execute` and dispatched tasks land here, so a deferred
    /// invocation is held to exactly the same rules as a synchronous one —
    /// the public entry points have already validated by the time this
    /// runs, and it validates again anyway.
    pub(crate) fn run(&self, command: &Command, payload: &Message) -> Result<Message, BusError> {
        command.valid()?;
        payload.valid()?;

        let handlers = self
            .handlers
            .read()
            .map_err(|_| BusError::LockPoisoned("execute"))?;
        let handler = handlers
            .get(command)
            .ok_or_else(|| BusError::HandlerNotFound(command.name().to_string()))?;

        handler(payload).map_err(BusError::Handler)
    }

    fn commands(&self) -> Vec<Command> {
        match self.handlers.read() {
            Ok(handlers) => handlers.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// An in-process command bus.
///
/// Callers register one handler per named command, then invoke commands
/// either synchronously ([`execute`](CommandBus::execute) — blocks, returns
/// the handler's result) or asynchronously
/// ([`dispatch`](CommandBus::dispatch) — queues the work on a bounded pool
/// of background workers and discards the result).
///
/// Registration is expected to finish during setup, before concurrent
/// traffic begins; the registry is guarded by a read/write lock so late
/// registration is safe, but nothing orders a late `register` against
/// in-flight invocations.
///
/// ## Example
///
/// ```
/// use command_bus::{CommandBus, Message};
///
/// let bus = CommandBus::with_options("orders", 2, 16);
///
/// bus.register("echo", |payload: &Message| Ok(payload.clone()))
///     .unwrap();
///
/// // Synchronous: result comes back to the caller.
/// let out = bus.execute("echo", &Message::from(r#"{"v":1}"#)).unwrap();
/// assert_eq!(out.as_str(), Some(r#"{"v":1}"#));
///
/// // Asynchronous: accepted now, runs on a worker, result discarded.
/// bus.dispatch("echo", Message::from(r#"{"v":2}"#)).unwrap();
///
/// // Drains the queued dispatch before returning.
/// bus.shutdown();
/// ```
pub struct CommandBus<P: WorkerPool = ThreadPool> {
    name: String,
    registry: Arc<Registry>,
    pool: P,
    quit: AtomicBool,
}

impl CommandBus<ThreadPool> {
    /// Create a bus with a single worker and a queue capacity of one —
    /// fully serialized async execution.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let pool = ThreadPool::new(name.clone(), 1, 1);
        Self::with_pool(name, pool)
    }

    /// Create a bus with the given worker count and queue capacity
    /// (both clamped to a minimum of 1).
    pub fn with_options(name: impl Into<String>, workers: usize, queue_capacity: usize) -> Self {
        let name = name.into();
        let pool = ThreadPool::new(name.clone(), workers, queue_capacity);
        Self::with_pool(name, pool)
    }
}

impl<P: WorkerPool> CommandBus<P> {
    /// Create a bus over a caller-supplied worker pool. The bus owns the
    /// pool's lifecycle from here: it is started now and shut down by
    /// [`shutdown`](CommandBus::shutdown).
    pub fn with_pool(name: impl Into<String>, pool: P) -> Self {
        pool.start();
        Self {
            name: name.into(),
            registry: Arc::new(Registry::new()),
            pool,
            quit: AtomicBool::new(false),
        }
    }

    /// The bus's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying worker pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Names of all registered commands, in no particular order.
    pub fn commands(&self) -> Vec<Command> {
        self.registry.commands()
    }

    /// Register a handler for a command.
    ///
    /// Checked in order: the command must be valid, the handler must pass
    /// the contract check, and the command must not already have a handler.
    /// The first failing check wins; on failure the registry is untouched.
    /// Registration is permanent — handlers are never replaced or removed.
    pub fn register<C, F>(&self, command: C, handler: F) -> Result<(), BusError>
    where
        C: Into<Command>,
        F: Fn(&Message) -> HandlerResult + Send + Sync + 'static,
    {
        self.registry.insert(command.into(), Box::new(handler))
    }

    /// Execute a command synchronously on the calling thread.
    ///
    /// Fails with [`BusError::ShuttingDown`] once shutdown has begun,
    /// before any other check. Otherwise validates the command and
    /// payload, looks up the handler, and returns its result and error
    /// untouched.
    pub fn execute<C>(&self, command: C, payload: &Message) -> Result<Message, BusError>
    where
        C: Into<Command>,
    {
        if self.quit.load(Ordering::SeqCst) {
            return Err(BusError::ShuttingDown);
        }
        let command = command.into();
        self.validate(&command, payload)?;
        self.registry.run(&command, payload)
    }

    /// Dispatch a command for asynchronous execution.
    ///
    /// Validation is identical to [`execute`](CommandBus::execute) and
    /// happens here, synchronously — a malformed command or payload is
    /// rejected at call time, never silently dropped later. On success the
    /// invocation is queued and this returns immediately; the handler's
    /// eventual result and error are discarded. If the pool refuses the
    /// submission (queue full, pool stopped) that surfaces here as
    /// [`BusError::Rejected`].
    pub fn dispatch<C>(&self, command: C, payload: Message) -> Result<(), BusError>
    where
        C: Into<Command>,
    {
        if self.quit.load(Ordering::SeqCst) {
            return Err(BusError::ShuttingDown);
        }
        let command = command.into();
        self.validate(&command, &payload)?;

        let task = DispatchTask::new(Arc::clone(&self.registry), command, payload);
        self.pool.submit(Box::new(move || task.run()))?;
        Ok(())
    }

    /// Begin shutdown: stop accepting work, then block until every queued
    /// and in-flight dispatch has finished.
    ///
    /// The acceptance flag flips before the pool drains, so work accepted
    /// earlier still runs while new `execute`/`dispatch` calls already fail
    /// with [`BusError::ShuttingDown`]. Terminal — there is no restart —
    /// and safe to call more than once.
    pub fn shutdown(&self) {
        self.quit.store(true, Ordering::SeqCst);
        self.pool.shutdown();
    }

    fn validate(&self, command: &Command, payload: &Message) -> Result<(), BusError> {
        command.valid()?;
        payload.valid()
    }
}
