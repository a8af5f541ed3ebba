use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Side that took a race. `P1` is always the challenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    P1,
    P2,
    Draw,
}

impl Winner {
    pub fn from_scores(p1_score: Decimal, p2_score: Decimal) -> Self {
        match p1_score.cmp(&p2_score) {
            Ordering::Greater => Self::P1,
            Ordering::Less => Self::P2,
            Ordering::Equal => Self::Draw,
        }
    }
}

/// Per-race comparison of both participants' prediction scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Matchup {
    pub race_id: i64,
    pub race_name: String,
    pub race_date: NaiveDate,
    pub p1_score: Decimal,
    pub p2_score: Decimal,
    pub winner: Winner,
}

/// Win/loss/draw tally over a list of matchups
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct RivalrySummary {
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub draws: u32,
    pub p1_win_rate: f64,
    pub p1_points: Decimal,
    pub p2_points: Decimal,
    pub point_differential: Decimal,
    pub races_completed: u32,
}
