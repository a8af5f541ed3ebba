use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Matchup, Rivalry, RivalryStatus, RivalrySummary};

/// Request payload for challenging another user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRivalryRequest {
    pub challenger_id: Uuid,

    pub opponent_id: Uuid,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Driver must be between 1 and 100 characters"
    ))]
    pub challenger_driver: String,

    #[validate(range(
        min = 1,
        max = 24,
        message = "Race duration must be between 1 and 24 races"
    ))]
    pub race_duration: i32,
}

impl CreateRivalryRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_participants(&self) -> Result<(), &'static str> {
        if self.challenger_id == self.opponent_id {
            return Err("You cannot challenge yourself");
        }

        Ok(())
    }
}

/// Request payload for the opponent accepting a challenge
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AcceptRivalryRequest {
    pub user_id: Uuid,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Driver must be between 1 and 100 characters"
    ))]
    pub driver: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeclineRivalryRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RivalryFilter {
    /// Only rivalries where this user is challenger or opponent
    pub user_id: Option<Uuid>,
    pub status: Option<RivalryStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RivalryResponse {
    pub id: i64,
    pub challenger_id: Uuid,
    pub challenger_name: Option<String>,
    pub opponent_id: Uuid,
    pub opponent_name: Option<String>,
    pub challenger_driver: String,
    pub opponent_driver: Option<String>,
    pub race_duration: i32,
    pub status: RivalryStatus,
    pub created_at: NaiveDateTime,
    pub started_at: Option<NaiveDateTime>,
    /// Races scored so far; zero until the rivalry is active
    pub races_completed: u32,
    pub challenger_points: Decimal,
    pub opponent_points: Decimal,
}

impl RivalryResponse {
    pub fn with_names(
        rivalry: Rivalry,
        challenger_name: Option<String>,
        opponent_name: Option<String>,
    ) -> Self {
        Self {
            challenger_name,
            opponent_name,
            ..Self::from(rivalry)
        }
    }

    /// Fill race progress and point totals from a head-to-head tally
    pub fn with_summary(self, summary: &RivalrySummary) -> Self {
        Self {
            races_completed: summary.races_completed,
            challenger_points: summary.p1_points,
            opponent_points: summary.p2_points,
            ..self
        }
    }
}

impl From<Rivalry> for RivalryResponse {
    fn from(rivalry: Rivalry) -> Self {
        Self {
            id: rivalry.id,
            challenger_id: rivalry.challenger_id,
            challenger_name: None,
            opponent_id: rivalry.opponent_id,
            opponent_name: None,
            challenger_driver: rivalry.challenger_driver,
            opponent_driver: rivalry.opponent_driver,
            race_duration: rivalry.race_duration,
            status: rivalry.status,
            created_at: rivalry.created_at,
            started_at: rivalry.started_at,
            races_completed: 0,
            challenger_points: Decimal::ZERO,
            opponent_points: Decimal::ZERO,
        }
    }
}

/// Rivalry with its race log and head-to-head tally
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RivalryDetailResponse {
    pub rivalry: RivalryResponse,
    pub matchups: Vec<Matchup>,
    pub summary: RivalrySummary,
}
