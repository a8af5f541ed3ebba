use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Points a user earned for their prediction on a race
///
/// `manual_score` stays null until the race has been graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PredictionScore {
    pub user_id: Uuid,
    pub race_id: i64,
    pub manual_score: Option<Decimal>,
}
