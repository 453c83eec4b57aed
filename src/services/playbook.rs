//! Playbook service: manages the set of selectable plays.

use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Play, PlayConfig, Workstream};
use crate::domain::ports::PlayRepository;

pub struct PlaybookService {
    plays: Arc<dyn PlayRepository>,
}

impl PlaybookService {
    pub fn new(plays: Arc<dyn PlayRepository>) -> Self {
        Self { plays }
    }

    /// Persist every configured play.
    ///
    /// New plays start with empty arm statistics; plays already stored keep
    /// theirs and only pick up workstream, active flag and params.
    pub async fn seed(&self, playbook: &[PlayConfig]) -> DomainResult<usize> {
        let plays = playbook
            .iter()
            .map(|entry| -> DomainResult<Play> {
                let workstream: Workstream = entry.workstream.parse()?;
                let mut play = Play::new(&entry.id, workstream).with_params(entry.params.clone());
                play.active = entry.active;
                Ok(play)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        for play in &plays {
            self.plays.persist(play).await?;
        }
        info!(count = plays.len(), "Playbook seeded");
        Ok(plays.len())
    }

    pub async fn deactivate(&self, id: &str) -> DomainResult<()> {
        self.plays.set_active(id, false).await?;
        info!(play_id = id, "Play deactivated");
        Ok(())
    }

    pub async fn list_active(&self, workstream: Workstream) -> DomainResult<Vec<Play>> {
        self.plays.list_active(workstream).await
    }

    pub async fn list(&self, workstream: Option<Workstream>) -> DomainResult<Vec<Play>> {
        self.plays.list(workstream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqlitePlayRepository};
    use crate::domain::errors::DomainError;
    use crate::domain::models::Config;

    async fn service() -> (PlaybookService, Arc<SqlitePlayRepository>) {
        let pool = create_migrated_test_pool().await.unwrap();
        let repo = Arc::new(SqlitePlayRepository::new(pool));
        (PlaybookService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_seed_default_playbook() {
        let (service, _) = service().await;
        let seeded = service.seed(&Config::default().plays).await.unwrap();
        assert_eq!(seeded, 6);

        let x_posts = service.list_active(Workstream::XPost).await.unwrap();
        let ids: Vec<_> = x_posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["x_hot_take_v1", "x_myth_buster_v1"]);
    }

    #[tokio::test]
    async fn test_reseed_keeps_arm_statistics() {
        let (service, repo) = service().await;
        let playbook = vec![PlayConfig::new("p1", Workstream::XPost)];
        service.seed(&playbook).await.unwrap();
        repo.record_reward("p1", 0.9).await.unwrap();

        service.seed(&playbook).await.unwrap();

        let play = repo.get("p1").await.unwrap().unwrap();
        assert_eq!(play.arm.n, 1);
    }

    #[tokio::test]
    async fn test_seed_rejects_unknown_workstream() {
        let (service, repo) = service().await;
        let mut entry = PlayConfig::new("p1", Workstream::XPost);
        entry.workstream = "fax".to_string();

        let err = service.seed(&[entry]).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidWorkstream(_)));
        assert!(repo.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_removes_from_selection_pool() {
        let (service, _) = service().await;
        service.seed(&Config::default().plays).await.unwrap();

        service.deactivate("x_hot_take_v1").await.unwrap();

        let active = service.list_active(Workstream::XPost).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(service.list(Some(Workstream::XPost)).await.unwrap().len(), 2);
        assert!(matches!(
            service.deactivate("ghost").await,
            Err(DomainError::PlayNotFound(_))
        ));
    }
}
