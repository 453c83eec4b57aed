//! Layered configuration for the pipeline.
//!
//! Built-in defaults are overlaid by `.ecole/config.yaml`, then
//! `.ecole/local.yaml`, then `ECOLE_`-prefixed environment variables, and
//! validated before any store is opened.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
