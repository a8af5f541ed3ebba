use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::rivalry::{CreateRivalryRequest, RivalryFilter, RivalryResponse};
use crate::error::{Result, StorageError};
use crate::models::{Rivalry, RivalryStatus};

/// Rivalry joined with the usernames of both participants
#[derive(Debug, Clone, FromRow)]
pub struct RivalryWithNames {
    #[sqlx(flatten)]
    pub rivalry: Rivalry,
    pub challenger_name: Option<String>,
    pub opponent_name: Option<String>,
}

impl RivalryWithNames {
    /// Response for `rivalry`, keeping the participant names of this row
    pub fn response_for(&self, rivalry: Rivalry) -> RivalryResponse {
        RivalryResponse::with_names(
            rivalry,
            self.challenger_name.clone(),
            self.opponent_name.clone(),
        )
    }
}

impl From<RivalryWithNames> for RivalryResponse {
    fn from(row: RivalryWithNames) -> Self {
        RivalryResponse::with_names(row.rivalry, row.challenger_name, row.opponent_name)
    }
}

const SELECT_WITH_NAMES: &str = r#"
    SELECT r.id, r.challenger_id, r.opponent_id, r.challenger_driver, r.opponent_driver,
           r.race_duration, r.status, r.created_at, r.started_at,
           cp.username AS challenger_name,
           op.username AS opponent_name
    FROM rivalries r
    LEFT JOIN profiles cp ON cp.id = r.challenger_id
    LEFT JOIN profiles op ON op.id = r.opponent_id
    WHERE 1=1
"#;

/// Repository for Rivalry database operations
pub struct RivalryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RivalryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a rivalry together with both participants' usernames
    pub async fn find_with_names(&self, id: i64) -> Result<RivalryWithNames> {
        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELECT_WITH_NAMES);
        query.push(" AND r.id = ");
        query.push_bind(id);

        let row = query
            .build_query_as::<RivalryWithNames>()
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(row)
    }

    /// List rivalries, newest first
    pub async fn list(
        &self,
        filter: &RivalryFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<RivalryWithNames>, i64)> {
        let total_items = self.count(filter).await?;

        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELECT_WITH_NAMES);
        push_filters(&mut query, filter);
        query.push(" ORDER BY r.created_at DESC, r.id DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let rows: Vec<RivalryWithNames> = query.build_query_as().fetch_all(self.pool).await?;

        Ok((rows, total_items))
    }

    pub async fn count(&self, filter: &RivalryFilter) -> Result<i64> {
        let mut query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM rivalries r WHERE 1=1");
        push_filters(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Create a new pending rivalry
    pub async fn create(&self, req: &CreateRivalryRequest) -> Result<Rivalry> {
        let rivalry = sqlx::query_as::<_, Rivalry>(
            r#"
            INSERT INTO rivalries (challenger_id, opponent_id, challenger_driver, race_duration, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, challenger_id, opponent_id, challenger_driver, opponent_driver,
                      race_duration, status, created_at, started_at
            "#,
        )
        .bind(req.challenger_id)
        .bind(req.opponent_id)
        .bind(req.challenger_driver.trim())
        .bind(req.race_duration)
        .bind(RivalryStatus::Pending.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation(
                    "Challenger or opponent profile does not exist".to_string(),
                )
            } else if err.is_check_violation() {
                StorageError::ConstraintViolation("Invalid rivalry terms".to_string())
            } else {
                err
            }
        })?;

        Ok(rivalry)
    }

    /// Persist a status change, only if the stored status is still `expected`.
    pub async fn apply_transition(
        &self,
        updated: &Rivalry,
        expected: RivalryStatus,
    ) -> Result<Rivalry> {
        let rivalry = sqlx::query_as::<_, Rivalry>(
            r#"
            UPDATE rivalries
            SET
                status = $1,
                opponent_driver = $2,
                started_at = $3
            WHERE id = $4 AND status = $5
            RETURNING id, challenger_id, opponent_id, challenger_driver, opponent_driver,
                      race_duration, status, created_at, started_at
            "#,
        )
        .bind(updated.status.as_str())
        .bind(updated.opponent_driver.as_deref())
        .bind(updated.started_at)
        .bind(updated.id)
        .bind(expected.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| {
            StorageError::ConstraintViolation(format!(
                "Rivalry {} is no longer {}",
                updated.id, expected
            ))
        })?;

        Ok(rivalry)
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &RivalryFilter) {
    if let Some(user_id) = filter.user_id {
        push_participant(query, user_id);
    }

    if let Some(status) = filter.status {
        query.push(" AND r.status = ");
        query.push_bind(status.as_str());
    }
}

fn push_participant(query: &mut QueryBuilder<'_, Postgres>, user_id: Uuid) {
    query.push(" AND (r.challenger_id = ");
    query.push_bind(user_id);
    query.push(" OR r.opponent_id = ");
    query.push_bind(user_id);
    query.push(")");
}
