//! Consumer convenience wrapper
//!
//! A thin handle for call sites that only dequeue. Any number of consumers
//! may drain the same queue concurrently; each message is delivered to
//! exactly one of them.

use crate::queue::manager::MessageQueue;
use crate::queue::message::Message;
use std::sync::Arc;

/// Handle that only dequeues messages
///
/// # Example
///
/// ```rust,no_run
/// # use duraq::queue::{Consumer, MessageQueue, QueueConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = MessageQueue::create(QueueConfig::new("logs/messages.log")).await?;
/// let consumer = Consumer::new(queue);
///
/// while let Some(message) = consumer.poll() {
///     println!("received: {}", message.text());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Consumer {
    queue: Arc<MessageQueue>,
}

impl Consumer {
    pub fn new(queue: Arc<MessageQueue>) -> Self {
        Self { queue }
    }

    /// Remove and return the oldest available message, or `None` when empty
    pub fn poll(&self) -> Option<Message> {
        self.queue.dequeue()
    }
}
