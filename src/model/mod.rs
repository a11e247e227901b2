//! Message, envelope, address, and attachment types read by the transport.

pub mod address;
pub mod attachment;
pub mod mail;
