//! One publisher per workstream.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use super::OutboxPublisher;
use crate::domain::models::Workstream;
use crate::domain::ports::Publisher;

#[derive(Clone, Default)]
pub struct PublisherRegistry {
    publishers: BTreeMap<Workstream, Arc<dyn Publisher>>,
}

impl PublisherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outbox publishers for every workstream, sharing one root directory.
    pub fn outbox(root: impl AsRef<Path>) -> Self {
        Workstream::ALL.iter().fold(Self::new(), |registry, ws| {
            registry.with(Arc::new(OutboxPublisher::new(*ws, root.as_ref())))
        })
    }

    /// Register a publisher under its own workstream, replacing any previous one.
    #[must_use]
    pub fn with(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publishers.insert(publisher.workstream(), publisher);
        self
    }

    pub fn get(&self, workstream: Workstream) -> Option<Arc<dyn Publisher>> {
        self.publishers.get(&workstream).cloned()
    }

    pub fn workstreams(&self) -> impl Iterator<Item = Workstream> + '_ {
        self.publishers.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbox_covers_every_workstream() {
        let registry = PublisherRegistry::outbox("outbox");
        assert_eq!(registry.workstreams().collect::<Vec<_>>(), Workstream::ALL.to_vec());
        assert_eq!(registry.get(Workstream::Tpt).unwrap().workstream(), Workstream::Tpt);
    }

    #[test]
    fn test_empty_registry() {
        assert!(PublisherRegistry::new().get(Workstream::XPost).is_none());
    }
}
