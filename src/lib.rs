//! Address routing core for a message broker
//!
//! Decides, for every address a message is published to, which bindings
//! receive it. Bindings may be made on wildcard patterns:
//!
//! - `*` matches exactly one `.`-delimited segment
//! - `#` matches any number of trailing segments
//!
//! # Example
//!
//! ```no_run
//! use addr_router::{AddressManager, QueueSink};
//!
//! # async fn run() -> addr_router::Result<()> {
//! let manager = AddressManager::new();
//! let (sink, _rx) = QueueSink::new("eu-audit");
//!
//! manager.bind("orders.eu.#", "audit", sink).await?;
//!
//! let bindings = manager.route("orders.eu.created").await;
//! assert_eq!(bindings.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod binding;
pub mod delivery;
pub mod error;
pub mod registry;
pub mod stats;

pub use address::{Address, WildcardConfiguration};
pub use binding::{Binding, BindingSet, Bindings, BindingsFactory, QueueSink, Sink};
pub use delivery::{Message, PostOffice};
pub use error::{Result, RoutingError};
pub use registry::{AddressManager, AddressManagerConfig};
pub use stats::{IndexStats, RoutingStats};
