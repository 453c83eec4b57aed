//! Domain layer for the Ecole content pipeline
//!
//! This module contains core models, the error taxonomy and the port traits
//! implemented by adapters.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
