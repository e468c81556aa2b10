//! Infrastructure adapters implementing the port traits.

pub mod gateway;
pub mod http;
pub mod memory;
