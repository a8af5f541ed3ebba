use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Rivalry, RivalryStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} a rivalry that is {status}")]
    InvalidStatus {
        action: &'static str,
        status: RivalryStatus,
    },

    #[error("only the challenged user can respond to this rivalry")]
    NotOpponent,

    #[error("a driver must be selected to accept a rivalry")]
    MissingDriver,

    #[error("{counted} of {required} races completed")]
    QuotaNotReached { counted: usize, required: i32 },
}

fn require_status(
    rivalry: &Rivalry,
    expected: RivalryStatus,
    action: &'static str,
) -> Result<(), TransitionError> {
    if rivalry.status == expected {
        Ok(())
    } else {
        Err(TransitionError::InvalidStatus {
            action,
            status: rivalry.status,
        })
    }
}

fn require_opponent(rivalry: &Rivalry, acting_user: Uuid) -> Result<(), TransitionError> {
    if rivalry.opponent_id == acting_user {
        Ok(())
    } else {
        Err(TransitionError::NotOpponent)
    }
}

/// Opponent takes up a pending challenge with their chosen driver
pub fn accept(
    rivalry: &Rivalry,
    acting_user: Uuid,
    driver: &str,
    now: NaiveDateTime,
) -> Result<Rivalry, TransitionError> {
    require_status(rivalry, RivalryStatus::Pending, "accept")?;
    require_opponent(rivalry, acting_user)?;

    let driver = driver.trim();
    if driver.is_empty() {
        return Err(TransitionError::MissingDriver);
    }

    Ok(Rivalry {
        opponent_driver: Some(driver.to_string()),
        status: RivalryStatus::Active,
        started_at: Some(now),
        ..rivalry.clone()
    })
}

pub fn decline(rivalry: &Rivalry, acting_user: Uuid) -> Result<Rivalry, TransitionError> {
    require_status(rivalry, RivalryStatus::Pending, "decline")?;
    require_opponent(rivalry, acting_user)?;

    Ok(Rivalry {
        status: RivalryStatus::Declined,
        ..rivalry.clone()
    })
}

/// Status check for `complete`, cheap enough to run before counting races
pub fn ensure_completable(rivalry: &Rivalry) -> Result<(), TransitionError> {
    require_status(rivalry, RivalryStatus::Active, "complete")
}

/// Closes an active rivalry once every race it covers has been run
pub fn complete(rivalry: &Rivalry, races_counted: usize) -> Result<Rivalry, TransitionError> {
    ensure_completable(rivalry)?;

    if races_counted < rivalry.race_limit() {
        return Err(TransitionError::QuotaNotReached {
            counted: races_counted,
            required: rivalry.race_duration,
        });
    }

    Ok(Rivalry {
        status: RivalryStatus::Completed,
        ..rivalry.clone()
    })
}
