//! Generation backends.

pub mod mock;

pub use mock::MockWriter;
