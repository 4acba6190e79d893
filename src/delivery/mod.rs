//! Message delivery on top of the address index
//!
//! `bytes::Bytes` is reference counted, so fanning a message out to several
//! sinks clones a pointer, not the payload.

pub mod message;
pub mod post_office;

pub use message::Message;
pub use post_office::PostOffice;
