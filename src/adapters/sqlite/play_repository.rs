//! SQLite implementation of the PlayRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{parse_count, parse_datetime, parse_json_or_default};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ArmState, Play, Workstream};
use crate::domain::ports::PlayRepository;

#[derive(Clone)]
pub struct SqlitePlayRepository {
    pool: SqlitePool,
}

impl SqlitePlayRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayRepository for SqlitePlayRepository {
    async fn list_active(&self, workstream: Workstream) -> DomainResult<Vec<Play>> {
        let rows: Vec<PlayRow> = sqlx::query_as(
            "SELECT * FROM plays WHERE workstream = ? AND active = 1 ORDER BY id",
        )
        .bind(workstream.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Play::try_from).collect()
    }

    async fn list(&self, workstream: Option<Workstream>) -> DomainResult<Vec<Play>> {
        let rows: Vec<PlayRow> = match workstream {
            Some(ws) => {
                sqlx::query_as("SELECT * FROM plays WHERE workstream = ? ORDER BY id")
                    .bind(ws.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM plays ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(Play::try_from).collect()
    }

    async fn get(&self, id: &str) -> DomainResult<Option<Play>> {
        let row: Option<PlayRow> = sqlx::query_as("SELECT * FROM plays WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Play::try_from).transpose()
    }

    async fn persist(&self, play: &Play) -> DomainResult<()> {
        let params_json = serde_json::to_string(&play.params)?;

        sqlx::query(
            r#"INSERT INTO plays (id, workstream, reward_sum, n, active, params, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   workstream = excluded.workstream,
                   active = excluded.active,
                   params = excluded.params,
                   updated_at = excluded.updated_at"#,
        )
        .bind(&play.id)
        .bind(play.workstream.as_str())
        .bind(play.arm.reward_sum)
        .bind(count_to_i64(play.arm.n)?)
        .bind(play.active)
        .bind(&params_json)
        .bind(play.created_at.to_rfc3339())
        .bind(play.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_reward(&self, id: &str, reward: f64) -> DomainResult<ArmState> {
        let row: Option<(f64, i64)> = sqlx::query_as(
            r#"UPDATE plays SET reward_sum = reward_sum + ?, n = n + 1, updated_at = ?
               WHERE id = ?
               RETURNING reward_sum, n"#,
        )
        .bind(reward)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let (reward_sum, n) = row.ok_or_else(|| DomainError::PlayNotFound(id.to_string()))?;
        Ok(ArmState::new(reward_sum, parse_count(n)?))
    }

    async fn set_active(&self, id: &str, active: bool) -> DomainResult<()> {
        let result = sqlx::query("UPDATE plays SET active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PlayNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn count_to_i64(n: u64) -> DomainResult<i64> {
    i64::try_from(n).map_err(|e| DomainError::SerializationError(e.to_string()))
}

#[derive(sqlx::FromRow)]
struct PlayRow {
    id: String,
    workstream: String,
    reward_sum: f64,
    n: i64,
    active: bool,
    params: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PlayRow> for Play {
    type Error = DomainError;

    fn try_from(row: PlayRow) -> Result<Self, Self::Error> {
        let workstream: Workstream = row
            .workstream
            .parse()
            .map_err(|_| DomainError::SerializationError(format!("Invalid workstream: {}", row.workstream)))?;

        Ok(Self {
            id: row.id,
            workstream,
            arm: ArmState::new(row.reward_sum, parse_count(row.n)?),
            active: row.active,
            params: parse_json_or_default(row.params)?,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
