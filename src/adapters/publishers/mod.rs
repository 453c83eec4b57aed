//! Channel publishers.

pub mod outbox;
pub mod registry;

pub use outbox::OutboxPublisher;
pub use registry::PublisherRegistry;
