use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a rivalry.
///
/// `pending -> active -> completed`, or `pending -> declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RivalryStatus {
    Pending,
    Active,
    Completed,
    Declined,
}

impl RivalryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Declined => "declined",
        }
    }

    /// Whether head-to-head scores mean anything for a rivalry in this state
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::Active | Self::Completed)
    }
}

impl fmt::Display for RivalryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rivalry status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for RivalryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "declined" => Ok(Self::Declined),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for RivalryStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A head-to-head prediction challenge between two users over a fixed number of races.
///
/// The drivers are display labels only and never affect scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rivalry {
    pub id: i64,
    pub challenger_id: Uuid,
    pub opponent_id: Uuid,
    pub challenger_driver: String,
    pub opponent_driver: Option<String>,
    pub race_duration: i32,
    #[sqlx(try_from = "String")]
    pub status: RivalryStatus,
    pub created_at: NaiveDateTime,
    pub started_at: Option<NaiveDateTime>,
}

impl Rivalry {
    /// Races this rivalry counts, never negative
    pub fn race_limit(&self) -> usize {
        usize::try_from(self.race_duration).unwrap_or(0)
    }

    /// First race date that counts: the calendar day the challenge was issued,
    /// time of day ignored
    pub fn eligible_since(&self) -> NaiveDate {
        self.created_at.date()
    }
}
