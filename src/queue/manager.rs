//! MessageQueue - Facade coordinating the staging queue components
//!
//! The MessageQueue owns the ready queue, the staging channel feeding the
//! persistence worker, and the worker task handle. Construction replays the
//! log store into the ready queue (recovery) before any producer or consumer
//! access is possible, then starts the worker.

use crate::queue::error::QueueResult;
use crate::queue::message::Message;
use crate::queue::ready::ReadyQueue;
use crate::queue::store::LogStore;
use crate::queue::worker::{PersistenceWorker, WorkerCommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Default number of messages accumulated before a batch write
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Polling interval while waiting for the staging buffer to drain
const FLUSH_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Bounded wait for worker termination before forced cancellation
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Configuration accepted by [`MessageQueue::create`]
///
/// # Example
///
/// ```rust
/// use duraq::queue::QueueConfig;
///
/// let config = QueueConfig::new("logs/messages.log")
///     .with_batch_size(100)
///     .with_verbose_logging(false);
/// ```
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Location of the append-only log store
    pub path: PathBuf,
    /// Number of messages accumulated before a batch write
    pub batch_size: usize,
    /// Log every enqueue operation
    pub verbose_logging: bool,
}

impl QueueConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            verbose_logging: false,
        }
    }

    /// Set the batching threshold (clamped to at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_verbose_logging(mut self, verbose_logging: bool) -> Self {
        self.verbose_logging = verbose_logging;
        self
    }
}

/// In-process staging queue with asynchronous batch persistence
///
/// Buffers messages in memory for immediate consumption while a background
/// worker appends them to an append-only log, so unconsumed messages survive
/// a process restart. `enqueue` and `dequeue` are safe under arbitrary
/// concurrent invocation and never surface errors; durability housekeeping
/// happens on the worker task, never on the caller's thread.
///
/// # Thread Safety
///
/// Share the queue across threads as `Arc<MessageQueue>`. All state is
/// protected by atomics or short, I/O-free critical sections.
///
/// # Example
///
/// ```rust,no_run
/// use duraq::queue::{Message, MessageQueue, QueueConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = MessageQueue::create(QueueConfig::new("logs/messages.log")).await?;
///
/// queue.enqueue(Message::from_text("hello"));
/// assert_eq!(queue.size(), 1);
///
/// let message = queue.dequeue();
/// assert!(message.is_some());
///
/// queue.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct MessageQueue {
    ready: ReadyQueue,
    staging: UnboundedSender<WorkerCommand>,
    /// Messages handed to the staging buffer but not yet written
    pending: Arc<AtomicUsize>,
    worker: Mutex<Option<JoinHandle<()>>>,
    shutting_down: AtomicBool,
    verbose_logging: bool,
}

impl MessageQueue {
    /// Create a queue, performing recovery before anything else
    ///
    /// Opens the log store (a missing file is the normal first run), replays
    /// every record in file order into the ready queue, then starts the
    /// persistence worker. Fails only if an existing store cannot be read.
    pub async fn create(config: QueueConfig) -> QueueResult<Arc<Self>> {
        let store = LogStore::new(config.path);
        let recovered = store.replay()?;
        if !recovered.is_empty() {
            log::info!(
                "recovered {} message(s) from {}",
                recovered.len(),
                store.path().display()
            );
        }

        let ready = ReadyQueue::new();
        for message in recovered {
            ready.push(message);
        }

        let (staging, commands) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let worker = PersistenceWorker::new(
            store,
            commands,
            config.batch_size.max(1),
            Arc::clone(&pending),
        );
        let handle = tokio::spawn(worker.run());

        Ok(Arc::new(Self {
            ready,
            staging,
            pending,
            worker: Mutex::new(Some(handle)),
            shutting_down: AtomicBool::new(false),
            verbose_logging: config.verbose_logging,
        }))
    }

    /// Append a message to the ready queue and stage it for persistence
    ///
    /// Returns immediately; disk I/O happens on the worker task. Never
    /// errors, for any payload. Once shutdown has begun the message is
    /// dropped silently.
    pub fn enqueue(&self, message: Message) {
        if self.shutting_down.load(Ordering::SeqCst) {
            log::debug!(
                "enqueue after shutdown, dropping {} byte payload",
                message.len()
            );
            return;
        }

        if self.verbose_logging {
            log::info!("enqueued: {message}");
        }

        self.pending.fetch_add(1, Ordering::SeqCst);
        self.ready.push(message.clone());
        if self.staging.send(WorkerCommand::Persist(message)).is_err() {
            // Worker already gone; the entry stays consumable in memory only.
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Remove and return the oldest message, or `None` when empty
    ///
    /// Does not affect the staging buffer or the log store: a message
    /// dequeued before its batch was written is still persisted.
    pub fn dequeue(&self) -> Option<Message> {
        self.ready.pop()
    }

    /// Current number of messages available for consumption
    pub fn size(&self) -> usize {
        self.ready.len()
    }

    /// Block until the staging buffer has been fully drained into the store
    ///
    /// Forces the worker to write any partially accumulated batch, then
    /// waits on a short polling interval until no staged message remains
    /// unwritten. Usable as an explicit durability checkpoint.
    pub async fn flush(&self) {
        while self.pending.load(Ordering::SeqCst) > 0 {
            if self.staging.is_closed() {
                // Worker is gone; nothing further will ever be written.
                break;
            }
            // Re-request on every poll so entries staged behind an earlier
            // flush marker cannot stall in an unfull batch.
            let _ = self.staging.send(WorkerCommand::Flush);
            tokio::time::sleep(FLUSH_POLL_INTERVAL).await;
        }
    }

    /// Stop the worker after a final drain-and-flush of staged messages
    ///
    /// Waits up to a bounded grace period for the worker to terminate, then
    /// forces cancellation and logs the failure. Idempotent; always returns
    /// and never surfaces an error to the caller.
    pub async fn shutdown(&self) {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            return;
        }

        let _ = self.staging.send(WorkerCommand::Shutdown);

        let handle = self.worker.lock().unwrap().take();
        if let Some(handle) = handle {
            let abort = handle.abort_handle();
            match timeout(SHUTDOWN_GRACE_PERIOD, handle).await {
                Ok(Ok(())) => log::debug!("persistence worker stopped cleanly"),
                Ok(Err(e)) => log::warn!("persistence worker task failed during shutdown: {e}"),
                Err(_) => {
                    log::warn!(
                        "persistence worker did not stop within {:?}, forcing cancellation",
                        SHUTDOWN_GRACE_PERIOD
                    );
                    abort.abort();
                }
            }
        }
    }

    /// Whether shutdown has been initiated
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }
}
