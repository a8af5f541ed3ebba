use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        rivalry::{
            AcceptRivalryRequest, CreateRivalryRequest, DeclineRivalryRequest,
            RivalryDetailResponse, RivalryFilter, RivalryResponse,
        },
    },
    error::Result,
    models::Rivalry,
    repository::rivalry::{RivalryRepository, RivalryWithNames},
    services::{rivalry_aggregator, rivalry_lifecycle},
};

/// Response for a rivalry with its race progress and point totals filled in
async fn with_progress(
    pool: &PgPool,
    found: &RivalryWithNames,
    rivalry: Rivalry,
) -> Result<RivalryResponse> {
    let summary = rivalry_aggregator::load_summary(pool, &rivalry).await?;
    Ok(found.response_for(rivalry).with_summary(&summary))
}

/// List rivalries with filtering and pagination
pub async fn list_rivalries(
    pool: &PgPool,
    filter: &RivalryFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<RivalryResponse>, i64)> {
    let repo = RivalryRepository::new(pool);
    let (rows, total_items) = repo.list(filter, pagination).await?;

    let mut rivalries = Vec::with_capacity(rows.len());
    for row in &rows {
        rivalries.push(with_progress(pool, row, row.rivalry.clone()).await?);
    }

    Ok((rivalries, total_items))
}

/// Get a rivalry with its race log and head-to-head summary
///
/// Pending and declined rivalries have no races to score and come back empty.
pub async fn get_rivalry_detail(pool: &PgPool, id: i64) -> Result<RivalryDetailResponse> {
    let repo = RivalryRepository::new(pool);
    let found = repo.find_with_names(id).await?;

    let matchups = if found.rivalry.status.is_scored() {
        rivalry_aggregator::load_matchups(pool, &found.rivalry).await?
    } else {
        Vec::new()
    };
    let summary = rivalry_aggregator::summarize(&matchups);

    Ok(RivalryDetailResponse {
        rivalry: RivalryResponse::from(found).with_summary(&summary),
        matchups,
        summary,
    })
}

/// Create a new pending rivalry
pub async fn create_rivalry(pool: &PgPool, request: &CreateRivalryRequest) -> Result<Rivalry> {
    let repo = RivalryRepository::new(pool);
    let rivalry = repo.create(request).await?;

    tracing::info!(
        rivalry_id = rivalry.id,
        challenger_id = %rivalry.challenger_id,
        opponent_id = %rivalry.opponent_id,
        race_duration = rivalry.race_duration,
        "Rivalry created"
    );

    Ok(rivalry)
}

/// Opponent accepts a pending rivalry
pub async fn accept_rivalry(
    pool: &PgPool,
    id: i64,
    request: &AcceptRivalryRequest,
) -> Result<RivalryResponse> {
    let repo = RivalryRepository::new(pool);
    let found = repo.find_with_names(id).await?;

    let now = chrono::Utc::now().naive_utc();
    let accepted =
        rivalry_lifecycle::accept(&found.rivalry, request.user_id, &request.driver, now)?;
    let stored = repo.apply_transition(&accepted, found.rivalry.status).await?;

    tracing::info!(rivalry_id = id, "Rivalry accepted");
    with_progress(pool, &found, stored).await
}

/// Opponent declines a pending rivalry
pub async fn decline_rivalry(
    pool: &PgPool,
    id: i64,
    request: &DeclineRivalryRequest,
) -> Result<RivalryResponse> {
    let repo = RivalryRepository::new(pool);
    let found = repo.find_with_names(id).await?;

    let declined = rivalry_lifecycle::decline(&found.rivalry, request.user_id)?;
    let stored = repo.apply_transition(&declined, found.rivalry.status).await?;

    tracing::info!(rivalry_id = id, "Rivalry declined");
    Ok(found.response_for(stored))
}

/// Mark an active rivalry completed once all of its races are in
pub async fn complete_rivalry(pool: &PgPool, id: i64) -> Result<RivalryDetailResponse> {
    let repo = RivalryRepository::new(pool);
    let found = repo.find_with_names(id).await?;
    let existing = &found.rivalry;

    rivalry_lifecycle::ensure_completable(existing)?;

    let matchups = rivalry_aggregator::load_matchups(pool, existing).await?;
    let completed = rivalry_lifecycle::complete(existing, matchups.len())?;
    let stored = repo.apply_transition(&completed, existing.status).await?;

    let summary = rivalry_aggregator::summarize(&matchups);
    tracing::info!(
        rivalry_id = id,
        p1_wins = summary.p1_wins,
        p2_wins = summary.p2_wins,
        draws = summary.draws,
        "Rivalry completed"
    );

    Ok(RivalryDetailResponse {
        rivalry: found.response_for(stored).with_summary(&summary),
        matchups,
        summary,
    })
}
