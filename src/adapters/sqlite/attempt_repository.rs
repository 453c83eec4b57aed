//! SQLite implementation of the AttemptRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{parse_count, parse_datetime, parse_optional_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ArmState, AttemptRecord, Workstream};
use crate::domain::ports::{AttemptFilter, AttemptRepository};

#[derive(Clone)]
pub struct SqliteAttemptRepository {
    pool: SqlitePool,
}

impl SqliteAttemptRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptRepository for SqliteAttemptRepository {
    async fn insert(&self, attempt: &AttemptRecord) -> DomainResult<()> {
        let context_json = serde_json::to_string(&attempt.context)?;
        let quality_json = serde_json::to_string(&attempt.quality_gate)?;
        let policy_json = serde_json::to_string(&attempt.policy_gate)?;
        let decision_json = serde_json::to_string(&attempt.ship_decision)?;

        sqlx::query(
            r#"INSERT INTO attempts (id, workstream, play_id, context, draft_hash, quality_gate,
               policy_gate, ship_decision, artifact_location, propensity, reward, settled,
               created_at, settled_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(attempt.id.to_string())
        .bind(attempt.workstream.as_str())
        .bind(&attempt.chosen_arm_id)
        .bind(&context_json)
        .bind(&attempt.draft_hash)
        .bind(&quality_json)
        .bind(&policy_json)
        .bind(&decision_json)
        .bind(&attempt.artifact_location)
        .bind(attempt.propensity)
        .bind(attempt.reward)
        .bind(attempt.settled)
        .bind(attempt.created_at.to_rfc3339())
        .bind(attempt.settled_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<AttemptRecord>> {
        let row: Option<AttemptRow> = sqlx::query_as("SELECT * FROM attempts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AttemptRecord::try_from).transpose()
    }

    async fn list(&self, filter: AttemptFilter) -> DomainResult<Vec<AttemptRecord>> {
        let workstream = filter.workstream.map(|ws| ws.as_str());
        let rows: Vec<AttemptRow> = sqlx::query_as(
            r#"SELECT * FROM attempts
               WHERE (? IS NULL OR workstream = ?)
                 AND (? IS NULL OR settled = ?)
               ORDER BY created_at DESC, rowid DESC
               LIMIT ?"#,
        )
        .bind(workstream)
        .bind(workstream)
        .bind(filter.settled)
        .bind(filter.settled)
        .bind(filter.limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttemptRecord::try_from).collect()
    }

    async fn list_unsettled(&self) -> DomainResult<Vec<AttemptRecord>> {
        let rows: Vec<AttemptRow> = sqlx::query_as(
            "SELECT * FROM attempts WHERE settled = 0 ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttemptRecord::try_from).collect()
    }

    async fn settle(&self, id: Uuid, reward: f64) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"UPDATE attempts SET reward = ?, settled = 1, settled_at = ?
               WHERE id = ? AND settled = 0 AND reward IS NULL"#,
        )
        .bind(reward)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn settle_and_credit(
        &self,
        id: Uuid,
        play_id: &str,
        reward: f64,
    ) -> DomainResult<Option<ArmState>> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query(
            r#"UPDATE attempts SET reward = ?, settled = 1, settled_at = ?
               WHERE id = ? AND settled = 0 AND reward IS NULL"#,
        )
        .bind(reward)
        .bind(&now)
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() != 1 {
            tx.rollback().await?;
            return Ok(None);
        }

        let credited: Result<Option<(f64, i64)>, sqlx::Error> = sqlx::query_as(
            r#"UPDATE plays SET reward_sum = reward_sum + ?, n = n + 1, updated_at = ?
               WHERE id = ?
               RETURNING reward_sum, n"#,
        )
        .bind(reward)
        .bind(&now)
        .bind(play_id)
        .fetch_optional(&mut *tx)
        .await;

        let (reward_sum, n) = match credited {
            Ok(Some(row)) => row,
            Ok(None) => {
                tx.rollback().await?;
                return Err(DomainError::PlayNotFound(play_id.to_string()));
            }
            Err(err) => {
                tx.rollback().await?;
                return Err(err.into());
            }
        };

        tx.commit().await?;
        Ok(Some(ArmState::new(reward_sum, parse_count(n)?)))
    }
}

#[derive(sqlx::FromRow)]
struct AttemptRow {
    id: String,
    workstream: String,
    play_id: String,
    context: String,
    draft_hash: String,
    quality_gate: String,
    policy_gate: String,
    ship_decision: String,
    artifact_location: Option<String>,
    propensity: Option<f64>,
    reward: Option<f64>,
    settled: bool,
    created_at: String,
    settled_at: Option<String>,
}

impl TryFrom<AttemptRow> for AttemptRecord {
    type Error = DomainError;

    fn try_from(row: AttemptRow) -> Result<Self, Self::Error> {
        let workstream: Workstream = row
            .workstream
            .parse()
            .map_err(|_| DomainError::SerializationError(format!("Invalid workstream: {}", row.workstream)))?;

        Ok(Self {
            id: parse_uuid(&row.id)?,
            workstream,
            chosen_arm_id: row.play_id,
            context: serde_json::from_str(&row.context)?,
            draft_hash: row.draft_hash,
            quality_gate: serde_json::from_str(&row.quality_gate)?,
            policy_gate: serde_json::from_str(&row.policy_gate)?,
            ship_decision: serde_json::from_str(&row.ship_decision)?,
            artifact_location: row.artifact_location,
            propensity: row.propensity,
            reward: row.reward,
            settled: row.settled,
            created_at: parse_datetime(&row.created_at)?,
            settled_at: parse_optional_datetime(row.settled_at)?,
        })
    }
}
