//! Bindings and their targets
//!
//! ```text
//!   Binding "sub1" ──► address "orders.*" ──► Arc<dyn Sink>
//!                                              ▲
//!   mirror under "orders.eu" ──────────────────┘  (same Binding, same sink)
//! ```

pub mod entry;
pub mod set;
pub mod sink;

pub use entry::Binding;
pub use set::{BindingSet, Bindings, BindingsFactory, DefaultBindingsFactory};
pub use sink::{QueueSink, Sink};
