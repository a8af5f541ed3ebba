pub mod matchup;
pub mod prediction;
pub mod race;
pub mod rivalry;

pub use matchup::{Matchup, RivalrySummary, Winner};
pub use prediction::PredictionScore;
pub use race::{RACE_STATUS_COMPLETED, Race};
pub use rivalry::{Rivalry, RivalryStatus};
