//! Message fan-out over the address index

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;

use crate::registry::AddressManager;
use crate::stats::RoutingStats;

use super::message::Message;

/// Hands each published message to every sink bound to its address
///
/// Which consumer of a sink eventually receives the message is up to the
/// sink; the post office only resolves the set of sinks.
pub struct PostOffice {
    addresses: Arc<AddressManager>,
    messages_routed: AtomicU64,
    messages_unroutable: AtomicU64,
    deliveries: AtomicU64,
    failed_deliveries: AtomicU64,
}

impl PostOffice {
    /// Create a post office routing through `addresses`
    pub fn new(addresses: Arc<AddressManager>) -> Self {
        Self {
            addresses,
            messages_routed: AtomicU64::new(0),
            messages_unroutable: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            failed_deliveries: AtomicU64::new(0),
        }
    }

    /// The address index used for routing
    pub fn addresses(&self) -> &Arc<AddressManager> {
        &self.addresses
    }

    /// Publish a payload to an address
    pub async fn publish(&self, address: &str, payload: Bytes) -> usize {
        self.route(Message::new(address, payload)).await
    }

    /// Route a message to every bound sink
    ///
    /// Returns the number of sinks that accepted it.
    pub async fn route(&self, message: Message) -> usize {
        let bindings = self.addresses.route(message.address()).await;

        if bindings.is_empty() {
            self.messages_unroutable.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(address = %message.address(), "No bindings, message dropped");
            return 0;
        }

        self.messages_routed.fetch_add(1, Ordering::Relaxed);

        let mut delivered = 0;
        for binding in &bindings {
            if binding.target().deliver(message.clone()) {
                delivered += 1;
            } else {
                self.failed_deliveries.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    address = %message.address(),
                    binding = %binding.unique_name(),
                    sink = %binding.target().name(),
                    "Sink closed, delivery failed"
                );
            }
        }

        self.deliveries
            .fetch_add(delivered as u64, Ordering::Relaxed);

        tracing::trace!(
            address = %message.address(),
            bindings = bindings.len(),
            delivered = delivered,
            "Message routed"
        );

        delivered
    }

    /// Counter snapshot
    pub fn stats(&self) -> RoutingStats {
        RoutingStats {
            messages_routed: self.messages_routed.load(Ordering::Relaxed),
            messages_unroutable: self.messages_unroutable.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            failed_deliveries: self.failed_deliveries.load(Ordering::Relaxed),
        }
    }
}
