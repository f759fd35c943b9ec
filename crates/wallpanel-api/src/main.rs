use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wallpanel_core::{
    validate_wall, OptimizationReport, OptimizationRequest, Optimizer, OptimizerError, Wall,
};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting wall panel API");

    let addr = std::env::var("WALLPANEL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|err| panic!("Failed to bind to {addr}: {err}"));

    info!("API server listening on http://{}", addr);

    axum::serve(listener, app()).await.expect("Server error");
}

fn app() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/optimize", post(optimize))
        .route("/api/validate", post(validate))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "wallpanel-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Main optimization endpoint, the UI's "compute" action
async fn optimize(
    Json(request): Json<OptimizationRequest>,
) -> Result<Json<OptimizationReport>, AppError> {
    info!(
        "Received optimization request with {} walls, panel {} x {}",
        request.walls.len(),
        request.panel.width,
        request.panel.height
    );

    let optimizer = Optimizer::new(request)?;
    let report = optimizer.optimize()?;

    info!(
        "Optimization complete: {} panels, {} offcuts reused, {:.2}% waste",
        report.new_panels, report.offcuts_consumed, report.waste_percentage
    );

    Ok(Json(report))
}

/// Opening checks the wall editor runs before accepting an edit
async fn validate(Json(wall): Json<Wall>) -> Json<serde_json::Value> {
    let issues = validate_wall(&wall);
    info!("Validated wall '{}': {} issue(s)", wall.id, issues.len());

    Json(json!({
        "valid": issues.is_empty(),
        "issues": issues,
    }))
}

/// Application error type
struct AppError(anyhow::Error);

impl From<OptimizerError> for AppError {
    fn from(err: OptimizerError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = if self.0.downcast_ref::<OptimizerError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
