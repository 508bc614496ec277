//! Adapters implementing the ports.

pub mod store;
