//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{GatewayFeedbackAdapter, ServiceAccountAuth, SheetStoreAdapter, SheetsClient},
    config::{Config, ServiceAccountSource},
    error::ApiError,
    web::{
        auth_handler, daily_goals_handler, dashboard_handler, fetch_reports_handler,
        generate_report_handler, rest::ApiDoc, state::AppState, weekly_goals_handler,
    },
};
use axum::{
    http::Method,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Sheet Store Adapter ---
    let auth = match &config.service_account {
        ServiceAccountSource::Inline(json) => ServiceAccountAuth::from_json(json)?,
        ServiceAccountSource::File(path) => ServiceAccountAuth::from_file(path)?,
    };
    let sheets = SheetsClient::new(config.sheet_id.clone());
    let store = Arc::new(SheetStoreAdapter::new(auth, sheets));

    // --- 3. Initialize the Feedback Adapter ---
    let feedback = Arc::new(GatewayFeedbackAdapter::new(
        config.ai_gateway_url.clone(),
        config.ai_api_key.clone(),
        config.report_model.clone(),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store,
        feedback,
        config: config.clone(),
    });

    // Permissive cross-origin policy: any origin may call these endpoints;
    // the layer also short-circuits OPTIONS preflights with headers only.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/auth", post(auth_handler))
        .route("/daily-goals", post(daily_goals_handler))
        .route("/weekly-goals", post(weekly_goals_handler))
        .route("/generate-report", post(generate_report_handler))
        .route("/fetch-reports", post(fetch_reports_handler))
        .route("/dashboard", post(dashboard_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
