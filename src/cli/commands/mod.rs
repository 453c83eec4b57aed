//! CLI command implementations.

pub mod analyst;
pub mod attempt;
pub mod play;
pub mod task;

pub use analyst::AnalystArgs;
pub use attempt::AttemptArgs;
pub use play::PlayArgs;
pub use task::TaskArgs;
