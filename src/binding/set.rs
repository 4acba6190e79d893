//! Per-address binding collections
//!
//! The routing table never builds binding storage itself; it asks a
//! `BindingsFactory` for an empty `Bindings` whenever an address gains its
//! first binding.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::address::Address;

use super::entry::Binding;

/// All bindings reachable from one address, keyed by unique name
pub trait Bindings: Send + Sync + fmt::Debug {
    /// Insert a binding, replacing any binding with the same unique name
    fn add_binding(&mut self, binding: Binding);

    /// Remove the binding with this unique name
    fn remove_binding(&mut self, unique_name: &str) -> Option<Binding>;

    /// Look up a binding by unique name
    fn get(&self, unique_name: &str) -> Option<&Binding>;

    /// Snapshot of every binding in the set
    fn bindings(&self) -> Vec<Binding>;

    /// Number of bindings in the set
    fn len(&self) -> usize;

    /// Whether the set is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Creates empty binding sets for addresses
pub trait BindingsFactory: Send + Sync + fmt::Debug {
    /// Create an empty set for `address`
    fn create_bindings(&self, address: &Address) -> Box<dyn Bindings>;
}

/// Hash map backed binding set
#[derive(Debug)]
pub struct BindingSet {
    address: Address,
    bindings: HashMap<Arc<str>, Binding>,
}

impl BindingSet {
    /// Create an empty set for `address`
    pub fn new(address: Address) -> Self {
        Self {
            address,
            bindings: HashMap::new(),
        }
    }

    /// The address this set belongs to
    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl Bindings for BindingSet {
    fn add_binding(&mut self, binding: Binding) {
        self.bindings
            .insert(Arc::from(binding.unique_name()), binding);
    }

    fn remove_binding(&mut self, unique_name: &str) -> Option<Binding> {
        self.bindings.remove(unique_name)
    }

    fn get(&self, unique_name: &str) -> Option<&Binding> {
        self.bindings.get(unique_name)
    }

    fn bindings(&self) -> Vec<Binding> {
        self.bindings.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }
}

/// Factory producing `BindingSet`s
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBindingsFactory;

impl BindingsFactory for DefaultBindingsFactory {
    fn create_bindings(&self, address: &Address) -> Box<dyn Bindings> {
        Box::new(BindingSet::new(address.clone()))
    }
}
