use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    accept_rivalry, complete_rivalry, create_rivalry, decline_rivalry, get_rivalry,
    list_rivalries,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_rivalry))
        .route("/:id/accept", post(accept_rivalry))
        .route("/:id/decline", post(decline_rivalry))
        .route("/:id/complete", post(complete_rivalry))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_rivalries))
        .route("/:id", get(get_rivalry))
        .merge(protected)
}
