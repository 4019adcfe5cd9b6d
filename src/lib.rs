//! duraq - durable in-process staging queue
//!
//! Buffers messages in memory for immediate consumption and asynchronously
//! persists them in batches to an append-only log, so unconsumed messages
//! survive a process restart. See the [`queue`] module for the full design.
//!
//! This crate is a library and emits diagnostics through the [`log`] facade;
//! installing a logger is the embedding application's responsibility.

pub mod queue;

pub use queue::{Consumer, Message, MessageQueue, Producer, QueueConfig, QueueError, QueueResult};
