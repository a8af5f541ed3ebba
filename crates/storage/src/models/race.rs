use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const RACE_STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Race {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub status: String,
    pub location: Option<String>,
}
