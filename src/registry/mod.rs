//! Address registry for broker routing
//!
//! The registry decides which bindings a message published to an address
//! reaches, including bindings on wildcard patterns.
//!
//! # Architecture
//!
//! ```text
//!                     Arc<AddressManager>
//!                ┌──────────────────────────────┐
//!                │ RwLock<                      │
//!                │   WildcardIndex {            │
//!                │     concrete:  addr -> links │
//!                │     wildcards: addr -> links │
//!                │     table: RoutingTable {    │
//!                │       addr -> Bindings       │
//!                │     }                        │
//!                │   }                          │
//!                │ >                            │
//!                └──────────────┬───────────────┘
//!                               │
//!        ┌──────────────────────┼──────────────────────┐
//!        ▼                      ▼                      ▼
//!   bind(addr, name)       unbind(name)          route(addr)
//!   link + mirror          unmirror + evict      read lock hit, or
//!                                                write lock + materialize
//! ```
//!
//! With wildcard routing disabled the manager holds the `RoutingTable` alone.

pub mod config;
pub mod store;
pub mod table;
pub mod wildcard;

pub use config::AddressManagerConfig;
pub use store::AddressManager;
pub use table::RoutingTable;
pub use wildcard::WildcardIndex;
