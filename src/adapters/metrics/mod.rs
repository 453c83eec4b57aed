//! Outcome metrics sources.

pub mod simulated;

pub use simulated::SimulatedMetrics;
