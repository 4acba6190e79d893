//! Addresses and wildcard matching
//!
//! An address is a delimiter-separated name such as `orders.eu.created`.
//! Addresses that contain a wildcard segment are patterns; the rest are
//! concrete addresses that messages are published to.

pub mod name;
pub mod wildcard;

pub use name::{Address, Segment};
pub use wildcard::{matches, WildcardConfiguration};
