//! Base routing table
//!
//! A flat map from address to its binding set, plus a name index of the
//! original bindings. It knows nothing about wildcards: `orders.*` is just
//! another key here.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::address::Address;
use crate::binding::{Binding, Bindings, BindingsFactory};
use crate::error::{Result, RoutingError};

/// Address to binding set map
pub struct RoutingTable {
    /// Binding sets, never empty
    mappings: HashMap<Address, Box<dyn Bindings>>,

    /// Original bindings by unique name (mirrors are not listed)
    names: HashMap<Arc<str>, Binding>,

    factory: Arc<dyn BindingsFactory>,
}

impl RoutingTable {
    /// Create an empty table
    pub fn new(factory: Arc<dyn BindingsFactory>) -> Self {
        Self {
            mappings: HashMap::new(),
            names: HashMap::new(),
            factory,
        }
    }

    /// Register a binding under its own address
    ///
    /// Returns whether the address already had a binding set.
    pub fn add_binding(&mut self, binding: Binding) -> Result<bool> {
        if self.names.contains_key(binding.unique_name()) {
            return Err(RoutingError::DuplicateBinding(
                binding.unique_name().to_string(),
            ));
        }

        self.names
            .insert(Arc::from(binding.unique_name()), binding.clone());
        let address = binding.address().clone();
        Ok(self.add_mapping(&address, binding))
    }

    /// Remove a binding by unique name from its own address
    pub fn remove_binding(&mut self, unique_name: &str) -> Result<Binding> {
        let binding = self
            .names
            .remove(unique_name)
            .ok_or_else(|| RoutingError::UnknownBinding(unique_name.to_string()))?;

        self.remove_mapping(binding.address().as_str(), unique_name);
        Ok(binding)
    }

    /// Binding set for an address, if any
    pub fn get_bindings(&self, address: &str) -> Option<&dyn Bindings> {
        self.mappings.get(address).map(|set| &**set)
    }

    /// Original binding by unique name
    pub fn binding(&self, unique_name: &str) -> Option<&Binding> {
        self.names.get(unique_name)
    }

    /// Put a binding into the set of `address`, creating the set if needed
    ///
    /// Returns whether the set already existed.
    pub(crate) fn add_mapping(&mut self, address: &Address, binding: Binding) -> bool {
        if let Some(set) = self.mappings.get_mut(address.as_str()) {
            set.add_binding(binding);
            return true;
        }

        let mut set = self.factory.create_bindings(address);
        set.add_binding(binding);
        self.mappings.insert(address.clone(), set);
        false
    }

    /// Take a binding out of the set of `address`, dropping the set once empty
    pub(crate) fn remove_mapping(&mut self, address: &str, unique_name: &str) -> Option<Binding> {
        let set = self.mappings.get_mut(address)?;
        let removed = set.remove_binding(unique_name);

        if set.is_empty() {
            self.mappings.remove(address);
            tracing::trace!(address = %address, "Binding set emptied");
        }

        removed
    }

    /// Drop every binding
    pub fn clear(&mut self) {
        self.mappings.clear();
        self.names.clear();
    }

    /// Number of original bindings
    pub fn binding_count(&self) -> usize {
        self.names.len()
    }

    /// Number of addresses with a binding set
    pub fn address_count(&self) -> usize {
        self.mappings.len()
    }
}

impl fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingTable")
            .field("addresses", &self.mappings.len())
            .field("bindings", &self.names.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{DefaultBindingsFactory, QueueSink};

    fn table() -> RoutingTable {
        RoutingTable::new(Arc::new(DefaultBindingsFactory))
    }

    fn binding(name: &str, address: &str) -> Binding {
        let (sink, _rx) = QueueSink::new(name);
        Binding::new(name, Address::literal(address).unwrap(), sink)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut table = table();

        assert!(!table.add_binding(binding("q1", "orders")).unwrap());
        assert!(table.add_binding(binding("q2", "orders")).unwrap());

        let set = table.get_bindings("orders").unwrap();
        assert_eq!(set.len(), 2);
        assert!(table.get_bindings("payments").is_none());
        assert_eq!(table.binding_count(), 2);
        assert_eq!(table.address_count(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut table = table();
        table.add_binding(binding("q1", "orders")).unwrap();

        let result = table.add_binding(binding("q1", "payments"));
        assert_eq!(result, Err(RoutingError::DuplicateBinding("q1".into())));
        assert!(table.get_bindings("payments").is_none());
    }

    #[test]
    fn test_remove_evicts_empty_set() {
        let mut table = table();
        table.add_binding(binding("q1", "orders")).unwrap();

        let removed = table.remove_binding("q1").unwrap();
        assert_eq!(removed.unique_name(), "q1");
        assert!(table.get_bindings("orders").is_none());
        assert_eq!(table.address_count(), 0);

        assert_eq!(
            table.remove_binding("q1").unwrap_err(),
            RoutingError::UnknownBinding("q1".into())
        );
    }

    #[test]
    fn test_mappings_do_not_register_names() {
        let mut table = table();
        let original = binding("q1", "orders.*");
        table.add_binding(original.clone()).unwrap();

        let mirror_address = Address::literal("orders.eu").unwrap();
        assert!(!table.add_mapping(&mirror_address, original));

        assert_eq!(table.binding_count(), 1);
        assert_eq!(table.address_count(), 2);

        assert!(table.remove_mapping("orders.eu", "q1").is_some());
        assert!(table.get_bindings("orders.eu").is_none());
        assert!(table.binding("q1").is_some());
    }

    #[test]
    fn test_clear() {
        let mut table = table();
        table.add_binding(binding("q1", "orders")).unwrap();
        table.clear();

        assert_eq!(table.address_count(), 0);
        assert!(table.binding("q1").is_none());
    }
}
