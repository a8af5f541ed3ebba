use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{RACE_STATUS_COMPLETED, Race};

pub struct RaceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RaceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Completed races on or after `since`, oldest first, at most `limit` of them
    pub async fn eligible_for_rivalry(&self, since: NaiveDate, limit: i32) -> Result<Vec<Race>> {
        let races = sqlx::query_as::<_, Race>(
            r#"
            SELECT id, name, date, status, location
            FROM races
            WHERE status = $1
              AND date >= $2
            ORDER BY date ASC, id ASC
            LIMIT $3
            "#,
        )
        .bind(RACE_STATUS_COMPLETED)
        .bind(since)
        .bind(i64::from(limit.max(0)))
        .fetch_all(self.pool)
        .await?;

        Ok(races)
    }
}
