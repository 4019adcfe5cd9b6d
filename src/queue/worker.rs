//! Persistence Worker
//!
//! A single background task drains the staging channel, accumulates batches
//! and appends them to the log store. Batching amortises the per-write I/O
//! cost; a single writer keeps persistence order deterministic and removes
//! any need for write-side locking on the log file.

use crate::queue::message::Message;
use crate::queue::store::LogStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

/// Commands accepted by the persistence worker
#[derive(Debug)]
pub(crate) enum WorkerCommand {
    /// Stage one message for the next batch write
    Persist(Message),
    /// Write any partially accumulated batch immediately
    Flush,
    /// Drain everything still staged, write it, then exit
    Shutdown,
}

/// Background task state for batched log-store writes
///
/// One worker runs per queue instance for the instance's lifetime. It is the
/// only writer to the log store. The shared `pending` counter is decremented
/// once per message after each append attempt, whether or not the write
/// succeeded, so flush waiters always make progress.
pub(crate) struct PersistenceWorker {
    store: LogStore,
    commands: UnboundedReceiver<WorkerCommand>,
    batch_size: usize,
    pending: Arc<AtomicUsize>,
}

impl PersistenceWorker {
    pub(crate) fn new(
        store: LogStore,
        commands: UnboundedReceiver<WorkerCommand>,
        batch_size: usize,
        pending: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            store,
            commands,
            batch_size,
            pending,
        }
    }

    /// Run until shutdown is commanded or every sender is dropped
    pub(crate) async fn run(mut self) {
        let mut batch: Vec<Message> = Vec::with_capacity(self.batch_size);

        'main: while let Some(command) = self.commands.recv().await {
            match command {
                WorkerCommand::Persist(message) => {
                    batch.push(message);
                    let mut flush_requested = false;

                    // Opportunistically drain already-available entries, up
                    // to the batch size, without blocking further.
                    while batch.len() < self.batch_size {
                        match self.commands.try_recv() {
                            Ok(WorkerCommand::Persist(message)) => batch.push(message),
                            Ok(WorkerCommand::Flush) => {
                                flush_requested = true;
                                break;
                            }
                            Ok(WorkerCommand::Shutdown) => break 'main,
                            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                        }
                    }

                    if batch.len() >= self.batch_size || flush_requested {
                        self.write_batch(&mut batch);
                    }
                }
                WorkerCommand::Flush => self.write_batch(&mut batch),
                WorkerCommand::Shutdown => break,
            }
        }

        // Best-effort final flush: everything handed to the staging buffer
        // before shutdown (or before the queue was dropped) must still reach
        // the store.
        self.drain_remaining(&mut batch);
        self.write_batch(&mut batch);
        log::debug!(
            "persistence worker for {} stopped",
            self.store.path().display()
        );
    }

    /// Append the accumulated batch and clear it
    ///
    /// An I/O failure is logged and does not terminate the worker; the
    /// messages of the failed batch remain only in memory.
    fn write_batch(&self, batch: &mut Vec<Message>) {
        if batch.is_empty() {
            return;
        }

        let count = batch.len();
        match self.store.append(batch) {
            Ok(()) => log::debug!(
                "persisted batch of {} message(s) to {}",
                count,
                self.store.path().display()
            ),
            Err(e) => log::error!("failed to persist batch of {count} message(s): {e}"),
        }

        self.pending.fetch_sub(count, Ordering::SeqCst);
        batch.clear();
    }

    /// Pull every message still sitting in the staging channel into the batch
    fn drain_remaining(&mut self, batch: &mut Vec<Message>) {
        while let Ok(command) = self.commands.try_recv() {
            if let WorkerCommand::Persist(message) = command {
                batch.push(message);
            }
        }
    }
}
