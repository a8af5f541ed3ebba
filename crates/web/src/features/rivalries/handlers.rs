use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        rivalry::{
            AcceptRivalryRequest, CreateRivalryRequest, DeclineRivalryRequest,
            RivalryDetailResponse, RivalryFilter, RivalryResponse,
        },
    },
};
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/rivalries",
    params(PaginationParams, RivalryFilter),
    responses(
        (status = 200, description = "Rivalries retrieved successfully", body = PaginatedResponse<RivalryResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "rivalries"
)]
pub async fn list_rivalries(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<RivalryFilter>,
) -> WebResult<Response> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (rivalries, total_items) =
        services::list_rivalries(db.pool(), &filter, &pagination).await?;

    let response = PaginatedResponse::new(
        rivalries,
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/rivalries/{id}",
    params(
        ("id" = i64, Path, description = "Rivalry ID")
    ),
    responses(
        (status = 200, description = "Rivalry with race log and head-to-head summary", body = RivalryDetailResponse),
        (status = 404, description = "Rivalry not found")
    ),
    tag = "rivalries"
)]
pub async fn get_rivalry(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    let detail = services::get_rivalry_detail(db.pool(), id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rivalries",
    request_body = CreateRivalryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Challenge sent", body = RivalryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Unknown participant")
    ),
    tag = "rivalries"
)]
pub async fn create_rivalry(
    State(db): State<Database>,
    Json(req): Json<CreateRivalryRequest>,
) -> WebResult<Response> {
    req.validate()?;

    req.validate_participants()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let rivalry = services::create_rivalry(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(RivalryResponse::from(rivalry))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rivalries/{id}/accept",
    params(
        ("id" = i64, Path, description = "Rivalry ID")
    ),
    request_body = AcceptRivalryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rivalry accepted", body = RivalryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the opponent can accept"),
        (status = 404, description = "Rivalry not found"),
        (status = 409, description = "Rivalry is not pending")
    ),
    tag = "rivalries"
)]
pub async fn accept_rivalry(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<AcceptRivalryRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let rivalry = services::accept_rivalry(db.pool(), id, &req).await?;

    Ok(Json(rivalry).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rivalries/{id}/decline",
    params(
        ("id" = i64, Path, description = "Rivalry ID")
    ),
    request_body = DeclineRivalryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rivalry declined", body = RivalryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the opponent can decline"),
        (status = 404, description = "Rivalry not found"),
        (status = 409, description = "Rivalry is not pending")
    ),
    tag = "rivalries"
)]
pub async fn decline_rivalry(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<DeclineRivalryRequest>,
) -> WebResult<Response> {
    let rivalry = services::decline_rivalry(db.pool(), id, &req).await?;

    Ok(Json(rivalry).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rivalries/{id}/complete",
    params(
        ("id" = i64, Path, description = "Rivalry ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rivalry completed with its final tally", body = RivalryDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rivalry not found"),
        (status = 409, description = "Rivalry is not active or races remain")
    ),
    tag = "rivalries"
)]
pub async fn complete_rivalry(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    let detail = services::complete_rivalry(db.pool(), id).await?;

    Ok(Json(detail).into_response())
}
