//! Binding entry type
//!
//! A binding attaches a delivery target to an address under a process-wide
//! unique name. When wildcard routing copies a binding to another address the
//! copy is the same `Binding` value: it keeps its original address and shares
//! the target `Arc`.

use std::fmt;
use std::sync::Arc;

use crate::address::Address;

use super::sink::Sink;

/// A named subscription of a sink to an address
#[derive(Clone)]
pub struct Binding {
    unique_name: Arc<str>,
    address: Address,
    target: Arc<dyn Sink>,
}

impl Binding {
    /// Create a binding
    pub fn new(unique_name: impl Into<String>, address: Address, target: Arc<dyn Sink>) -> Self {
        Self {
            unique_name: Arc::from(unique_name.into()),
            address,
            target,
        }
    }

    /// The process-wide unique name
    pub fn unique_name(&self) -> &str {
        &self.unique_name
    }

    /// The address this binding was created for
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The delivery target
    pub fn target(&self) -> &Arc<dyn Sink> {
        &self.target
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("unique_name", &&*self.unique_name)
            .field("address", &self.address)
            .field("target", &self.target.name())
            .finish()
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.unique_name, self.address)
    }
}
