//! Bounded worker pool for background task execution.
//!
//! The bus hands the async half of its work to a [`WorkerPool`]: a
//! fire-and-forget executor with a bounded queue and an orderly,
//! draining shutdown. [`ThreadPool`] is the included implementation —
//! a fixed set of `std::thread` workers pulling from a bounded channel.
//!
//! The trait exists so tests (and embedders with their own executors)
//! can substitute the pool behind the bus.

mod error;
mod thread_pool;

pub use error::PoolError;
pub use thread_pool::{PoolStats, ThreadPool};

/// A zero-argument unit of background work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Interface the bus requires from a worker pool.
pub trait WorkerPool: Send + Sync {
    /// Begin processing submitted tasks. Calling `start` on a running or
    /// stopped pool is a no-op.
    fn start(&self);

    /// Enqueue a task without blocking. Fails if the queue is full or the
    /// pool is not running.
    fn submit(&self, task: Task) -> Result<(), PoolError>;

    /// Stop accepting new tasks and block until every queued and in-flight
    /// task has finished. Must be safe to call more than once.
    fn shutdown(&self);
}
