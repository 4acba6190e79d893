//! Error types
//!
//! Every failure the routing core reports is a `RoutingError`. Errors are
//! returned synchronously from the mutating call that caused them and leave
//! the index unchanged.

use std::fmt;

/// Result type alias for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Error type for address and binding operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// No binding with this unique name is registered
    UnknownBinding(String),
    /// A binding with this unique name is already registered
    DuplicateBinding(String),
    /// The address cannot be parsed into valid segments
    MalformedAddress {
        /// The offending address
        address: String,
        /// What is wrong with it
        reason: &'static str,
    },
    /// The manager configuration is inconsistent
    InvalidConfig(&'static str),
}

impl RoutingError {
    pub(crate) fn malformed(address: &str, reason: &'static str) -> Self {
        RoutingError::MalformedAddress {
            address: address.to_string(),
            reason,
        }
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::UnknownBinding(name) => write!(f, "Unknown binding: {}", name),
            RoutingError::DuplicateBinding(name) => {
                write!(f, "Binding already exists: {}", name)
            }
            RoutingError::MalformedAddress { address, reason } => {
                write!(f, "Malformed address '{}': {}", address, reason)
            }
            RoutingError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for RoutingError {}
