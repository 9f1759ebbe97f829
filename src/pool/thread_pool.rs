//! Fixed-size thread pool backed by a bounded channel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use super::{PoolError, Task, WorkerPool};

/// Statistics from a thread pool.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of tasks run to completion.
    pub tasks_completed: usize,
    /// Number of submissions refused because the queue was full.
    pub tasks_rejected: usize,
}

enum Phase {
    Idle,
    Running,
    Stopped,
}

struct Shared {
    phase: Phase,
    sender: Option<SyncSender<Task>>,
    // Held until start() hands it to the workers.
    receiver: Option<Receiver<Task>>,
    handles: Vec<JoinHandle<()>>,
}

/// A fixed set of worker threads pulling tasks from a bounded queue.
///
/// Workers share one channel receiver; each task runs on whichever worker
/// picks it up first, so ordering across tasks is best-effort FIFO only.
/// [`WorkerPool::shutdown`] drops the sending half and joins every worker;
/// workers keep pulling until the queue is empty, so all accepted work runs
/// before shutdown returns.
///
/// ## Example
///
/// ```
/// use command_bus::{ThreadPool, WorkerPool};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let pool = ThreadPool::new("example", 2, 8);
/// pool.start();
///
/// let ran = Arc::new(AtomicUsize::new(0));
/// let probe = Arc::clone(&ran);
/// pool.submit(Box::new(move || {
///     probe.fetch_add(1, Ordering::SeqCst);
/// }))
/// .unwrap();
///
/// pool.shutdown();
/// assert_eq!(ran.load(Ordering::SeqCst), 1);
/// ```
pub struct ThreadPool {
    name: String,
    workers: usize,
    shared: Mutex<Shared>,
    completed: Arc<AtomicUsize>,
    rejected: AtomicUsize,
}

impl ThreadPool {
    /// Create a pool with the given worker count and queue capacity.
    ///
    /// The name is for diagnostics only. Worker count and capacity are
    /// clamped to a minimum of 1.
    pub fn new(name: impl Into<String>, workers: usize, queue_capacity: usize) -> Self {
        let (sender, receiver) = sync_channel(queue_capacity.max(1));
        Self {
            name: name.into(),
            workers: workers.max(1),
            shared: Mutex::new(Shared {
                phase: Phase::Idle,
                sender: Some(sender),
                receiver: Some(receiver),
                handles: Vec::new(),
            }),
            completed: Arc::new(AtomicUsize::new(0)),
            rejected: AtomicUsize::new(0),
        }
    }

    /// The pool's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Snapshot of completed/rejected counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            tasks_completed: self.completed.load(Ordering::SeqCst),
            tasks_rejected: self.rejected.load(Ordering::SeqCst),
        }
    }
}

impl WorkerPool for ThreadPool {
    fn start(&self) {
        let mut shared = self.shared.lock().unwrap();
        if !matches!(shared.phase, Phase::Idle) {
            return;
        }
        let receiver = match shared.receiver.take() {
            Some(rx) => Arc::new(Mutex::new(rx)),
            None => return,
        };

        for _ in 0..self.workers {
            let rx = Arc::clone(&receiver);
            let completed = Arc::clone(&self.completed);

            let handle = thread::spawn(move || loop {
                // Take the lock only long enough to pull the next task;
                // the task itself runs unlocked.
                let task = match rx.lock() {
                    Ok(guard) => guard.recv(),
                    Err(_) => break,
                };
                match task {
                    Ok(task) => {
                        task();
                        completed.fetch_add(1, Ordering::SeqCst);
                    }
                    // Sender dropped and queue drained.
                    Err(_) => break,
                }
            });
            shared.handles.push(handle);
        }

        shared.phase = Phase::Running;
    }

    fn submit(&self, task: Task) -> Result<(), PoolError> {
        let shared = self.shared.lock().unwrap();
        match shared.phase {
            Phase::Idle => Err(PoolError::NotStarted),
            Phase::Stopped => Err(PoolError::Stopped),
            Phase::Running => {
                let sender = shared.sender.as_ref().ok_or(PoolError::Stopped)?;
                sender.try_send(task).map_err(|e| match e {
                    TrySendError::Full(_) => {
                        self.rejected.fetch_add(1, Ordering::SeqCst);
                        PoolError::Full
                    }
                    TrySendError::Disconnected(_) => PoolError::Stopped,
                })
            }
        }
    }

    fn shutdown(&self) {
        let handles = {
            let mut shared = self.shared.lock().unwrap();
            // Dropping the sender disconnects the channel; workers finish
            // whatever is queued, then exit.
            shared.sender = None;
            shared.phase = Phase::Stopped;
            std::mem::take(&mut shared.handles)
        };
        for handle in handles {
            let _ = handle.join();
        }
    }
}
