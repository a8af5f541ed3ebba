use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::PredictionScore;

pub struct PredictionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PredictionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Graded scores of one user for the given races, keyed by race id.
    /// Ungraded predictions are left out.
    pub async fn scores_for_user(
        &self,
        user_id: Uuid,
        race_ids: &[i64],
    ) -> Result<HashMap<i64, Decimal>> {
        let predictions = sqlx::query_as::<_, PredictionScore>(
            r#"
            SELECT user_id, race_id, manual_score
            FROM predictions
            WHERE user_id = $1
              AND race_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(race_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(predictions
            .into_iter()
            .filter_map(|p| p.manual_score.map(|score| (p.race_id, score)))
            .collect())
    }
}
