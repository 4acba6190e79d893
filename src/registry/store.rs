//! Address manager implementation
//!
//! The shared entry point for binding, unbinding and routing. Wraps either a
//! plain `RoutingTable` or a `WildcardIndex`, chosen by configuration, behind
//! a single `RwLock`.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::address::Address;
use crate::binding::{Binding, Bindings, Sink};
use crate::error::Result;
use crate::stats::IndexStats;

use super::config::AddressManagerConfig;
use super::table::RoutingTable;
use super::wildcard::WildcardIndex;

#[derive(Debug)]
enum Index {
    Simple(RoutingTable),
    Wildcard(WildcardIndex),
}

impl Index {
    fn lookup(&self, address: &str) -> Option<&dyn Bindings> {
        match self {
            Index::Simple(table) => table.get_bindings(address),
            Index::Wildcard(index) => index.lookup(address),
        }
    }

    fn needs_materialization(&self, address: &str) -> bool {
        match self {
            Index::Simple(_) => false,
            Index::Wildcard(index) => index.needs_materialization(address),
        }
    }
}

/// Concurrent address index shared by every routing caller
///
/// Bind, unbind, clear, and the first route to an untracked address that a
/// pattern matches hold the write lock for their whole link and mirror
/// update, so readers never see a half-propagated binding. Every other route
/// only takes the read lock.
pub struct AddressManager {
    index: RwLock<Index>,
    config: AddressManagerConfig,
}

impl AddressManager {
    /// Create a manager with default configuration (wildcards enabled)
    pub fn new() -> Self {
        let config = AddressManagerConfig::default();
        let index = Self::build_index(&config);
        Self {
            index: RwLock::new(index),
            config,
        }
    }

    /// Create a manager with custom configuration
    pub fn with_config(config: AddressManagerConfig) -> Result<Self> {
        config.validate()?;
        let index = Self::build_index(&config);
        Ok(Self {
            index: RwLock::new(index),
            config,
        })
    }

    fn build_index(config: &AddressManagerConfig) -> Index {
        let table = RoutingTable::new(Arc::clone(&config.bindings_factory));
        if config.wildcard_routing_enabled {
            Index::Wildcard(WildcardIndex::new(table, config.wildcard))
        } else {
            Index::Simple(table)
        }
    }

    /// Get the manager configuration
    pub fn config(&self) -> &AddressManagerConfig {
        &self.config
    }

    /// Parse an address the way this manager interprets it
    pub fn parse_address(&self, raw: &str) -> Result<Address> {
        if self.config.wildcard_routing_enabled {
            Address::parse(raw, &self.config.wildcard)
        } else {
            Address::literal(raw)
        }
    }

    /// Bind `target` to `address` under a unique name
    ///
    /// Returns whether the address already had bindings. Fails without
    /// changing anything if the address is malformed or the name is taken.
    pub async fn bind(
        &self,
        address: &str,
        unique_name: &str,
        target: Arc<dyn Sink>,
    ) -> Result<bool> {
        let address = match self.parse_address(address) {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(address = %address, binding = %unique_name, error = %e, "Bind rejected");
                return Err(e);
            }
        };
        let binding = Binding::new(unique_name, address.clone(), target);

        let mut index = self.index.write().await;
        let result = match &mut *index {
            Index::Simple(table) => table.add_binding(binding),
            Index::Wildcard(index) => index.bind(binding),
        };

        match &result {
            Ok(existed) => tracing::info!(
                binding = %unique_name,
                address = %address,
                existing_address = *existed,
                "Binding added"
            ),
            Err(e) => tracing::warn!(binding = %unique_name, error = %e, "Bind rejected"),
        }

        result
    }

    /// Remove a binding by unique name
    pub async fn unbind(&self, unique_name: &str) -> Result<Binding> {
        let mut index = self.index.write().await;
        let result = match &mut *index {
            Index::Simple(table) => table.remove_binding(unique_name),
            Index::Wildcard(index) => index.unbind(unique_name),
        };

        match &result {
            Ok(binding) => tracing::info!(
                binding = %unique_name,
                address = %binding.address(),
                "Binding removed"
            ),
            Err(e) => tracing::warn!(binding = %unique_name, error = %e, "Unbind rejected"),
        }

        result
    }

    /// Every binding reachable from `address`
    ///
    /// Empty if nothing is bound to the address or to a pattern matching it.
    pub async fn route(&self, address: &str) -> Vec<Binding> {
        {
            let index = self.index.read().await;
            if let Some(set) = index.lookup(address) {
                tracing::trace!(address = %address, bindings = set.len(), "Route hit");
                return set.bindings();
            }
            if !index.needs_materialization(address) {
                return Vec::new();
            }
        }

        let mut index = self.index.write().await;
        match &mut *index {
            Index::Simple(table) => table
                .get_bindings(address)
                .map(|set| set.bindings())
                .unwrap_or_default(),
            Index::Wildcard(index) => index.route(address),
        }
    }

    /// Original binding by unique name
    pub async fn binding(&self, unique_name: &str) -> Option<Binding> {
        let index = self.index.read().await;
        match &*index {
            Index::Simple(table) => table.binding(unique_name).cloned(),
            Index::Wildcard(index) => index.binding(unique_name).cloned(),
        }
    }

    /// Whether an address is currently tracked
    pub async fn contains_address(&self, address: &str) -> bool {
        let index = self.index.read().await;
        match &*index {
            Index::Simple(table) => table.get_bindings(address).is_some(),
            Index::Wildcard(index) => index.contains_address(address),
        }
    }

    /// Addresses linked to `address` by wildcard matching
    pub async fn linked_addresses(&self, address: &str) -> Vec<Address> {
        let index = self.index.read().await;
        match &*index {
            Index::Simple(_) => Vec::new(),
            Index::Wildcard(index) => index.linked_addresses(address),
        }
    }

    /// Index size snapshot
    pub async fn stats(&self) -> IndexStats {
        let index = self.index.read().await;
        match &*index {
            Index::Simple(table) => IndexStats {
                bindings: table.binding_count(),
                mapped_addresses: table.address_count(),
                concrete_addresses: table.address_count(),
                wildcard_addresses: 0,
                links: 0,
            },
            Index::Wildcard(index) => index.stats(),
        }
    }

    /// Drop every binding, address and link
    pub async fn clear(&self) {
        let mut index = self.index.write().await;
        match &mut *index {
            Index::Simple(table) => table.clear(),
            Index::Wildcard(index) => index.clear(),
        }
        tracing::info!("Address index cleared");
    }
}

impl Default for AddressManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::binding::QueueSink;
    use crate::error::RoutingError;

    fn sink(name: &str) -> Arc<dyn Sink> {
        let (sink, _rx) = QueueSink::new(name);
        sink
    }

    fn names(bindings: &[Binding]) -> Vec<&str> {
        let mut names: Vec<&str> = bindings.iter().map(|b| b.unique_name()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn test_bind_and_route() {
        let manager = AddressManager::new();

        assert!(!manager.bind("a.*", "sub1", sink("q1")).await.unwrap());
        assert!(!manager.bind("a.b", "sub2", sink("q2")).await.unwrap());
        assert!(manager.bind("a.b", "sub3", sink("q3")).await.unwrap());

        let routed = manager.route("a.b").await;
        assert_eq!(names(&routed), vec!["sub1", "sub2", "sub3"]);
    }

    #[tokio::test]
    async fn test_route_materializes_lazily() {
        let manager = AddressManager::new();
        manager.bind("orders.#", "audit", sink("audit")).await.unwrap();

        assert!(!manager.contains_address("orders.eu.created").await);

        let routed = manager.route("orders.eu.created").await;
        assert_eq!(names(&routed), vec!["audit"]);
        assert!(manager.contains_address("orders.eu.created").await);
    }

    #[tokio::test]
    async fn test_unmatched_route_stays_on_read_lock() {
        let manager = AddressManager::new();
        manager.bind("a.*", "sub1", sink("q1")).await.unwrap();
        manager.route("a.b").await;

        // A writer would block behind this guard
        let guard = manager.index.read().await;
        for address in ["x.y", "q.*", "a..b", "a.b"] {
            let routed = tokio::time::timeout(Duration::from_millis(200), manager.route(address))
                .await
                .unwrap_or_else(|_| panic!("route({}) waited for the write lock", address));
            if address == "a.b" {
                assert_eq!(names(&routed), vec!["sub1"]);
            } else {
                assert!(routed.is_empty());
            }
        }
        drop(guard);

        assert!(!manager.contains_address("x.y").await);
        assert!(!manager.contains_address("q.*").await);
    }

    #[tokio::test]
    async fn test_bind_rejects_malformed() {
        let manager = AddressManager::new();

        let result = manager.bind("a.#.b", "sub1", sink("q1")).await;
        assert!(matches!(
            result,
            Err(RoutingError::MalformedAddress { .. })
        ));
        assert_eq!(manager.stats().await, IndexStats::default());
    }

    #[tokio::test]
    async fn test_bind_rejects_duplicate() {
        let manager = AddressManager::new();
        manager.bind("a.b", "sub1", sink("q1")).await.unwrap();

        let result = manager.bind("a.*", "sub1", sink("q2")).await;
        assert_eq!(result, Err(RoutingError::DuplicateBinding("sub1".into())));
        assert!(!manager.contains_address("a.*").await);
    }

    #[tokio::test]
    async fn test_unbind() {
        let manager = AddressManager::new();
        manager.bind("a.b", "sub1", sink("q1")).await.unwrap();

        let removed = manager.unbind("sub1").await.unwrap();
        assert_eq!(removed.address().as_str(), "a.b");
        assert!(manager.route("a.b").await.is_empty());

        assert_eq!(
            manager.unbind("sub1").await.unwrap_err(),
            RoutingError::UnknownBinding("sub1".into())
        );
    }

    #[tokio::test]
    async fn test_wildcards_disabled() {
        let config = AddressManagerConfig::default().disable_wildcard_routing();
        let manager = AddressManager::with_config(config).unwrap();

        manager.bind("a.*", "sub1", sink("q1")).await.unwrap();

        assert!(manager.route("a.b").await.is_empty());
        assert_eq!(names(&manager.route("a.*").await), vec!["sub1"]);
        assert!(manager.linked_addresses("a.*").await.is_empty());
        // '#' in the middle is just a character here
        assert!(manager.bind("a.#.b", "sub2", sink("q2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let config = AddressManagerConfig::default().single_word('#');
        assert!(matches!(
            AddressManager::with_config(config),
            Err(RoutingError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_binding_lookup() {
        let manager = AddressManager::new();
        manager.bind("a.*", "sub1", sink("q1")).await.unwrap();
        manager.route("a.b").await;

        let binding = manager.binding("sub1").await.unwrap();
        assert_eq!(binding.address().as_str(), "a.*");
        assert_eq!(binding.target().name(), "q1");
        assert!(manager.binding("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let manager = AddressManager::new();
        manager.bind("a.*", "sub1", sink("q1")).await.unwrap();
        manager.bind("a.b", "sub2", sink("q2")).await.unwrap();

        manager.clear().await;

        assert_eq!(manager.stats().await, IndexStats::default());
        assert!(manager.route("a.b").await.is_empty());
    }

    #[test]
    fn test_blocking_use() {
        let manager = AddressManager::new();

        tokio_test::block_on(async {
            manager.bind("x.*", "sub1", sink("q1")).await.unwrap();
            assert_eq!(names(&manager.route("x.y").await), vec!["sub1"]);
        });
    }
}
