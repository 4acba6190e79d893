//! Delivery targets
//!
//! The routing core stores and copies targets but never calls them. Only the
//! post office hands messages to a sink.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::delivery::Message;

/// Something a routed message can be handed to, typically a queue
pub trait Sink: Send + Sync + fmt::Debug {
    /// Name of the sink, used in logs
    fn name(&self) -> &str;

    /// Accept a message
    ///
    /// Returns `false` if the sink is closed and the message was dropped.
    fn deliver(&self, message: Message) -> bool;
}

/// Sink backed by an unbounded tokio channel
#[derive(Debug)]
pub struct QueueSink {
    name: String,
    tx: mpsc::UnboundedSender<Message>,
    delivered: AtomicU64,
}

impl QueueSink {
    /// Create a queue sink and the receiver its messages arrive on
    pub fn new(name: impl Into<String>) -> (Arc<Self>, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Arc::new(Self {
            name: name.into(),
            tx,
            delivered: AtomicU64::new(0),
        });
        (sink, rx)
    }

    /// Number of messages accepted so far
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl Sink for QueueSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, message: Message) -> bool {
        if self.tx.send(message).is_ok() {
            self.delivered.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}
