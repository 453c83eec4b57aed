//! Adapters implementing the domain ports.

pub mod metrics;
pub mod publishers;
pub mod sqlite;
pub mod writers;
