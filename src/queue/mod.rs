//! Durable Staging Queue Component
//!
//! An in-process, single-node staging queue that buffers messages in memory
//! for immediate consumption while a background worker asynchronously
//! persists them to an append-only log, so unconsumed messages survive a
//! process restart.
//!
//! # Overview
//!
//! - **Non-blocking producers**: `enqueue` never waits on disk I/O
//! - **Strict FIFO delivery**: insertion order is consumption order
//! - **Batched persistence**: a single worker amortises I/O across batches
//! - **Crash recovery**: construction replays the log into the ready queue
//! - **Graceful shutdown**: buffered entries are flushed before the worker
//!   stops, with a bounded grace period and forced cancellation fallback
//!
//! # Architecture
//!
//! ```text
//!  enqueue(payload)                          dequeue()
//!        │                                       ▲
//!        ▼                                       │
//! ┌─────────────────────────────────────────────────────────┐
//! │                     MessageQueue                        │
//! │   ┌──────────────┐              ┌───────────────────┐   │
//! │   │  ReadyQueue  │              │  Staging channel  │   │
//! │   │  (in-memory  │              │  (awaiting        │   │
//! │   │   FIFO)      │              │   persistence)    │   │
//! │   └──────────────┘              └─────────┬─────────┘   │
//! │          ▲                                │ drain       │
//! │          │ replay on startup              ▼             │
//! │   ┌──────┴───────┐   batch write  ┌───────────────┐     │
//! │   │   LogStore   │◄───────────────│ Persistence   │     │
//! │   │ (append-only │                │ Worker (task) │     │
//! │   │  log file)   │                └───────────────┘     │
//! │   └──────────────┘                                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! A message removed from the ready queue before its batch was written is
//! still persisted: the two in-memory structures are deliberately distinct.
//! Conversely the log is append-only and never compacted, so a restart
//! replays every historical record (see [`LogStore`]).
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use duraq::queue::{Message, MessageQueue, QueueConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = MessageQueue::create(
//!     QueueConfig::new("logs/messages.log").with_batch_size(100),
//! )
//! .await?;
//!
//! queue.enqueue(Message::from_text("hello, world"));
//!
//! while let Some(message) = queue.dequeue() {
//!     println!("consumed: {}", message.text());
//! }
//!
//! queue.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod consumer;
mod error;
mod manager;
mod message;
mod producer;
mod ready;
mod store;
mod worker;

pub use consumer::Consumer;
pub use error::{QueueError, QueueResult};
pub use manager::{MessageQueue, QueueConfig, DEFAULT_BATCH_SIZE};
pub use message::Message;
pub use producer::Producer;
pub use store::LogStore;

#[cfg(test)]
mod tests;
