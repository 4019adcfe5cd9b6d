//! Producer convenience wrapper
//!
//! A thin handle for call sites that only enqueue. Any number of producers
//! may operate concurrently against the same queue.

use crate::queue::manager::MessageQueue;
use crate::queue::message::Message;
use std::sync::Arc;

/// Handle that only enqueues messages
///
/// # Example
///
/// ```rust,no_run
/// # use duraq::queue::{MessageQueue, Producer, QueueConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = MessageQueue::create(QueueConfig::new("logs/messages.log")).await?;
/// let producer = Producer::new(queue);
///
/// producer.produce_text("hello");
/// producer.produce(vec![0x00, 0x0a, 0xff]);
/// # Ok(())
/// # }
/// ```
pub struct Producer {
    queue: Arc<MessageQueue>,
}

impl Producer {
    pub fn new(queue: Arc<MessageQueue>) -> Self {
        Self { queue }
    }

    /// Enqueue a raw byte payload
    pub fn produce(&self, payload: impl Into<Vec<u8>>) {
        self.queue.enqueue(Message::new(payload));
    }

    /// Enqueue a UTF-8 text payload
    pub fn produce_text(&self, payload: impl Into<String>) {
        self.queue.enqueue(Message::from_text(payload));
    }
}
