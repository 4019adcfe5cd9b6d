//! In-memory Ready Queue
//!
//! An owned, encapsulated concurrent FIFO holding messages available for
//! immediate consumption. Producers only append, consumers only remove from
//! the front, and no caller ever holds a reference to the internal storage.
//! All critical sections are O(1) and free of I/O.

use crate::queue::message::Message;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Concurrent FIFO of messages awaiting consumption
///
/// Insertion order is delivery order, with no priority. A single mutex covers
/// push, pop and len, so `len()` always reflects a state that existed at some
/// point during the call.
#[derive(Debug, Default)]
pub(crate) struct ReadyQueue {
    messages: Mutex<VecDeque<Message>>,
}

impl ReadyQueue {
    pub(crate) fn new() -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
        }
    }

    /// Append a message at the back of the queue
    pub(crate) fn push(&self, message: Message) {
        self.messages.lock().unwrap().push_back(message);
    }

    /// Remove and return the oldest message, or `None` when empty
    pub(crate) fn pop(&self) -> Option<Message> {
        self.messages.lock().unwrap().pop_front()
    }

    /// Current number of queued messages
    pub(crate) fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}
