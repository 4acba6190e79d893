//! Statistics for the address index and message routing

/// Point-in-time size of an address index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Original bindings (mirrors not counted)
    pub bindings: usize,
    /// Addresses with a non-empty binding set, mirrors included
    pub mapped_addresses: usize,
    /// Tracked concrete addresses
    pub concrete_addresses: usize,
    /// Tracked wildcard addresses
    pub wildcard_addresses: usize,
    /// Pattern to concrete links, each counted once
    pub links: usize,
}

impl IndexStats {
    /// Total tracked addresses
    pub fn tracked_addresses(&self) -> usize {
        self.concrete_addresses + self.wildcard_addresses
    }
}

/// Post office message counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingStats {
    /// Messages that reached at least one binding
    pub messages_routed: u64,
    /// Messages published to an address with no bindings
    pub messages_unroutable: u64,
    /// Successful hand-offs to sinks
    pub deliveries: u64,
    /// Hand-offs refused by a closed sink
    pub failed_deliveries: u64,
}

impl RoutingStats {
    /// Total messages seen
    pub fn messages(&self) -> u64 {
        self.messages_routed + self.messages_unroutable
    }
}
