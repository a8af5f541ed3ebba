use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::rivalries::handlers::list_rivalries,
        features::rivalries::handlers::get_rivalry,
        features::rivalries::handlers::create_rivalry,
        features::rivalries::handlers::accept_rivalry,
        features::rivalries::handlers::decline_rivalry,
        features::rivalries::handlers::complete_rivalry,
    ),
    components(
        schemas(
            storage::dto::rivalry::CreateRivalryRequest,
            storage::dto::rivalry::AcceptRivalryRequest,
            storage::dto::rivalry::DeclineRivalryRequest,
            storage::dto::rivalry::RivalryResponse,
            storage::dto::rivalry::RivalryDetailResponse,
            storage::dto::common::PaginationMeta,
            storage::models::Rivalry,
            storage::models::RivalryStatus,
            storage::models::Race,
            storage::models::Matchup,
            storage::models::Winner,
            storage::models::RivalrySummary,
        )
    ),
    tags(
        (name = "rivalries", description = "Head-to-head prediction rivalries"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Paddock rivalries API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Connecting to database at: {}", config.database_host());
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, write endpoints will reject every request");
    }

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, routes::router(db, api_keys))
        .await
        .context("Server error")?;

    Ok(())
}
