//! Address manager configuration

use std::sync::Arc;

use crate::address::WildcardConfiguration;
use crate::binding::{BindingsFactory, DefaultBindingsFactory};
use crate::error::Result;

/// Configuration for an `AddressManager`
#[derive(Debug, Clone)]
pub struct AddressManagerConfig {
    /// Interpret `*` and `#` segments as wildcards and keep the link index
    ///
    /// When disabled, every address is a plain name and routing is a single
    /// map lookup.
    pub wildcard_routing_enabled: bool,

    /// Delimiter and wildcard tokens
    pub wildcard: WildcardConfiguration,

    /// Source of empty binding sets
    pub bindings_factory: Arc<dyn BindingsFactory>,
}

impl Default for AddressManagerConfig {
    fn default() -> Self {
        Self {
            wildcard_routing_enabled: true,
            wildcard: WildcardConfiguration::default(),
            bindings_factory: Arc::new(DefaultBindingsFactory),
        }
    }
}

impl AddressManagerConfig {
    /// Turn off wildcard interpretation
    pub fn disable_wildcard_routing(mut self) -> Self {
        self.wildcard_routing_enabled = false;
        self
    }

    /// Set the segment delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.wildcard = self.wildcard.delimiter(delimiter);
        self
    }

    /// Set the single-word wildcard token
    pub fn single_word(mut self, token: char) -> Self {
        self.wildcard = self.wildcard.single_word(token);
        self
    }

    /// Set the any-words wildcard token
    pub fn any_words(mut self, token: char) -> Self {
        self.wildcard = self.wildcard.any_words(token);
        self
    }

    /// Use a custom binding set factory
    pub fn bindings_factory(mut self, factory: Arc<dyn BindingsFactory>) -> Self {
        self.bindings_factory = factory;
        self
    }

    /// Check the configuration for conflicts
    pub fn validate(&self) -> Result<()> {
        if self.wildcard_routing_enabled {
            self.wildcard.validate()?;
        }
        Ok(())
    }
}
