//! Wildcard-aware index over the routing table
//!
//! Concrete addresses and wildcard patterns are tracked in two maps whose
//! values are link sets: `orders.eu` is linked to `orders.*` when the pattern
//! matches it, and the link is recorded on both sides.
//!
//! ```text
//!   wildcards                         concrete
//!   ┌───────────┐                     ┌───────────┐
//!   │ orders.*  │◄───────────────────►│ orders.eu │
//!   │ orders.#  │◄───────────┬───────►│ orders    │
//!   └───────────┘            └───────►│ orders.eu │
//!                                     └───────────┘
//! ```
//!
//! Bindings follow the links. A binding on a pattern is mirrored into every
//! linked concrete address, and a newly tracked concrete address pulls in the
//! bindings of every pattern it is linked to. Routing then stays a single map
//! lookup in the base table.
//!
//! Links only ever join a pattern to a concrete address.

use std::collections::{HashMap, HashSet};

use crate::address::{Address, WildcardConfiguration};
use crate::binding::{Binding, Bindings};
use crate::error::Result;
use crate::stats::IndexStats;

use super::table::RoutingTable;

/// Routing table plus the pattern/concrete link graph
#[derive(Debug)]
pub struct WildcardIndex {
    table: RoutingTable,
    config: WildcardConfiguration,

    /// Concrete address to linked patterns
    concrete: HashMap<Address, HashSet<Address>>,

    /// Pattern to linked concrete addresses
    wildcards: HashMap<Address, HashSet<Address>>,

    /// Concrete addresses first tracked by `route` rather than by a binding
    routed: HashSet<Address>,
}

impl WildcardIndex {
    /// Wrap a routing table
    pub fn new(table: RoutingTable, config: WildcardConfiguration) -> Self {
        Self {
            table,
            config,
            concrete: HashMap::new(),
            wildcards: HashMap::new(),
            routed: HashSet::new(),
        }
    }

    /// Parse an address with this index's wildcard tokens
    pub fn parse(&self, raw: &str) -> Result<Address> {
        Address::parse(raw, &self.config)
    }

    /// The underlying routing table
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Register a binding and propagate it across links
    ///
    /// Returns whether the binding's address already had a binding set.
    pub fn bind(&mut self, binding: Binding) -> Result<bool> {
        let existed = self.table.add_binding(binding.clone())?;
        let address = binding.address().clone();
        let fresh = self.materialize(&address);

        if address.has_wildcard() {
            if let Some(linked) = self.wildcards.get(address.as_str()) {
                for concrete in linked {
                    self.table.add_mapping(concrete, binding.clone());
                }
                tracing::debug!(
                    binding = %binding.unique_name(),
                    address = %address,
                    mirrors = linked.len(),
                    "Wildcard binding mirrored"
                );
            }
        } else if fresh {
            self.mirror_in(&address);
        }

        Ok(existed)
    }

    /// Remove a binding, its mirrors, and any addresses left empty
    pub fn unbind(&mut self, unique_name: &str) -> Result<Binding> {
        let binding = self.table.remove_binding(unique_name)?;
        let address = binding.address().clone();

        if address.has_wildcard() {
            if let Some(linked) = self.wildcards.get(address.as_str()) {
                for concrete in linked {
                    self.table.remove_mapping(concrete.as_str(), unique_name);
                }
            }
        } else if !self.routed.contains(address.as_str()) && !self.has_own_bindings(&address) {
            // Mirrors were pulled in for this binding alone
            self.strip_mirrors(&address);
        }

        // Mirrors must be gone before emptiness is checked
        self.collect(&address);

        Ok(binding)
    }

    /// Bindings for an address already present in the table
    pub fn lookup(&self, address: &str) -> Option<&dyn Bindings> {
        self.table.get_bindings(address)
    }

    /// Whether `route` could find more than `lookup` for this address
    ///
    /// Only true for an untracked concrete address that some pattern matches.
    pub fn needs_materialization(&self, address: &str) -> bool {
        self.table.get_bindings(address).is_none() && self.matched_concrete(address).is_some()
    }

    /// Parse `raw` as a concrete address that at least one pattern matches
    fn matched_concrete(&self, raw: &str) -> Option<Address> {
        if self.wildcards.is_empty() {
            return None;
        }

        let address = match self.parse(raw) {
            Ok(address) => address,
            Err(e) => {
                tracing::debug!(address = %raw, error = %e, "Unroutable address");
                return None;
            }
        };

        if address.has_wildcard() || !self.wildcards.keys().any(|w| w.matches(&address)) {
            return None;
        }
        Some(address)
    }

    /// Resolve the bindings for an address, tracking it if a pattern matches
    ///
    /// An address nobody has bound to is materialized on first use so that
    /// publishing to it reaches wildcard subscribers. Addresses no pattern
    /// matches are not tracked.
    pub fn route(&mut self, raw: &str) -> Vec<Binding> {
        if let Some(set) = self.table.get_bindings(raw) {
            return set.bindings();
        }
        // Another writer may have changed the patterns since the read check
        let Some(address) = self.matched_concrete(raw) else {
            return Vec::new();
        };

        self.materialize(&address);
        self.mirror_in(&address);
        self.routed.insert(address.clone());

        let bindings = self
            .table
            .get_bindings(raw)
            .map(|set| set.bindings())
            .unwrap_or_default();

        tracing::debug!(
            address = %address,
            bindings = bindings.len(),
            "Address materialized on route"
        );

        bindings
    }

    /// Original binding by unique name
    pub fn binding(&self, unique_name: &str) -> Option<&Binding> {
        self.table.binding(unique_name)
    }

    /// Whether an address is tracked in either map
    pub fn contains_address(&self, address: &str) -> bool {
        self.concrete.contains_key(address) || self.wildcards.contains_key(address)
    }

    /// Addresses currently linked to `address`
    pub fn linked_addresses(&self, address: &str) -> Vec<Address> {
        self.concrete
            .get(address)
            .or_else(|| self.wildcards.get(address))
            .map(|linked| linked.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Drop every binding, address, and link
    pub fn clear(&mut self) {
        self.table.clear();
        self.concrete.clear();
        self.wildcards.clear();
        self.routed.clear();
    }

    /// Size snapshot
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            bindings: self.table.binding_count(),
            mapped_addresses: self.table.address_count(),
            concrete_addresses: self.concrete.len(),
            wildcard_addresses: self.wildcards.len(),
            links: self.concrete.values().map(HashSet::len).sum(),
        }
    }

    /// Track an address and link it to every matching address on the other side
    ///
    /// Returns `false` if the address was already tracked.
    fn materialize(&mut self, address: &Address) -> bool {
        let is_wildcard = address.has_wildcard();
        let (own, other) = if is_wildcard {
            (&mut self.wildcards, &mut self.concrete)
        } else {
            (&mut self.concrete, &mut self.wildcards)
        };

        if own.contains_key(address.as_str()) {
            return false;
        }

        let mut linked = HashSet::new();
        for (candidate, candidate_links) in other.iter_mut() {
            let matched = if is_wildcard {
                address.matches(candidate)
            } else {
                candidate.matches(address)
            };

            if matched {
                candidate_links.insert(address.clone());
                linked.insert(candidate.clone());
                tracing::debug!(address = %address, linked = %candidate, "Addresses linked");
            }
        }

        own.insert(address.clone(), linked);
        true
    }

    /// Copy every binding of the patterns linked to a concrete address into it
    fn mirror_in(&mut self, address: &Address) {
        let Some(linked) = self.concrete.get(address.as_str()) else {
            return;
        };

        for wildcard in linked {
            let mirrored = self
                .table
                .get_bindings(wildcard.as_str())
                .map(|set| set.bindings())
                .unwrap_or_default();

            for binding in mirrored {
                self.table.add_mapping(address, binding);
            }
        }
    }

    /// Remove every mirrored pattern binding from a concrete address
    fn strip_mirrors(&mut self, address: &Address) {
        let Some(linked) = self.concrete.get(address.as_str()) else {
            return;
        };

        for wildcard in linked {
            let mirrored = self
                .table
                .get_bindings(wildcard.as_str())
                .map(|set| set.bindings())
                .unwrap_or_default();

            for binding in mirrored {
                self.table
                    .remove_mapping(address.as_str(), binding.unique_name());
            }
        }
    }

    fn has_own_bindings(&self, address: &Address) -> bool {
        self.table
            .get_bindings(address.as_str())
            .map(|set| {
                set.bindings()
                    .iter()
                    .any(|b| b.address() == address)
            })
            .unwrap_or(false)
    }

    /// Evict `address` if its binding set is gone, then any neighbour left empty
    fn collect(&mut self, address: &Address) {
        let mut pending = vec![address.clone()];

        while let Some(candidate) = pending.pop() {
            if self.table.get_bindings(candidate.as_str()).is_some() {
                continue;
            }

            let (own, other) = if candidate.has_wildcard() {
                (&mut self.wildcards, &mut self.concrete)
            } else {
                (&mut self.concrete, &mut self.wildcards)
            };

            let Some(linked) = own.remove(candidate.as_str()) else {
                continue;
            };

            for neighbour in linked {
                if let Some(links) = other.get_mut(neighbour.as_str()) {
                    links.remove(candidate.as_str());
                }
                pending.push(neighbour);
            }
            self.routed.remove(candidate.as_str());

            tracing::debug!(address = %candidate, "Address evicted");
        }
    }
}
