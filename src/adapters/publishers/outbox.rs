//! File outbox publisher.
//!
//! Each shipped attempt gets its own directory under the outbox root:
//!
//! ```text
//! <outbox>/<attempt_id>/<workstream>.json   {"workstream": ..., "draft": ...}
//! <outbox>/<attempt_id>/<workstream>.md     long-form body, when the channel has one
//! ```

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Draft, Workstream};
use crate::domain::ports::Publisher;

#[derive(Serialize)]
struct OutboxEntry<'a> {
    workstream: Workstream,
    draft: &'a Draft,
}

#[derive(Debug, Clone)]
pub struct OutboxPublisher {
    workstream: Workstream,
    root: PathBuf,
}

impl OutboxPublisher {
    pub fn new(workstream: Workstream, root: impl Into<PathBuf>) -> Self {
        Self {
            workstream,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn publish_error(path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::PublishFailure(format!("{}: {err}", path.display()))
}

#[async_trait]
impl Publisher for OutboxPublisher {
    fn workstream(&self) -> Workstream {
        self.workstream
    }

    async fn publish(&self, attempt_id: Uuid, draft: &Draft) -> DomainResult<String> {
        let dir = self.root.join(attempt_id.to_string());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| publish_error(&dir, e))?;

        let entry = OutboxEntry {
            workstream: self.workstream,
            draft,
        };
        let json = serde_json::to_string_pretty(&entry)?;
        let json_path = dir.join(format!("{}.json", self.workstream));
        tokio::fs::write(&json_path, json)
            .await
            .map_err(|e| publish_error(&json_path, e))?;

        if let Some(body) = draft.packaging.get(&self.workstream).and_then(|p| p.body_md()) {
            let md_path = dir.join(format!("{}.md", self.workstream));
            tokio::fs::write(&md_path, body)
                .await
                .map_err(|e| publish_error(&md_path, e))?;
        }

        tracing::info!(
            attempt_id = %attempt_id,
            workstream = %self.workstream,
            path = %json_path.display(),
            "Draft written to outbox"
        );
        Ok(json_path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ChannelPackage;

    #[tokio::test]
    async fn test_publish_writes_json_entry() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = OutboxPublisher::new(Workstream::XPost, dir.path());
        let id = Uuid::new_v4();

        let location = publisher.publish(id, &Draft::new("hello")).await.unwrap();

        assert!(location.ends_with("x_post.json"));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&location).unwrap()).unwrap();
        assert_eq!(written["workstream"], "x_post");
        assert_eq!(written["draft"]["text"], "hello");
        assert!(!dir.path().join(id.to_string()).join("x_post.md").exists());
    }

    #[tokio::test]
    async fn test_publish_writes_markdown_body_for_long_form() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = OutboxPublisher::new(Workstream::Medium, dir.path());
        let mut draft = Draft::new("text");
        draft.packaging.insert(
            Workstream::Medium,
            ChannelPackage::Article {
                title: "Title".to_string(),
                body_md: "# Body".to_string(),
            },
        );
        let id = Uuid::new_v4();

        publisher.publish(id, &draft).await.unwrap();

        let md = std::fs::read_to_string(dir.path().join(id.to_string()).join("medium.md")).unwrap();
        assert_eq!(md, "# Body");
    }

    #[tokio::test]
    async fn test_unwritable_root_is_publish_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let publisher = OutboxPublisher::new(Workstream::XPost, &blocker);

        let err = publisher.publish(Uuid::new_v4(), &Draft::new("x")).await.unwrap_err();
        assert!(matches!(err, DomainError::PublishFailure(_)));
    }
}
