//! HTTP routes for the dashboard page and its JSON API

use super::view::{render_dashboard, render_disconnected, PageContext};
use super::{Dashboard, Feedback};
use crate::error::{FaucetError, FaucetResult};
use crate::reader::FaucetView;
use crate::writer::{Action, TxOutcome};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use mtk_common::UnitsError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Body of both the HTML form and the JSON action endpoint
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    #[serde(default)]
    pub amount: String,
}

/// Success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub data: T,
    pub timestamp: String,
}

impl<T> SuccessResponse<T> {
    fn new(data: T) -> Json<Self> {
        Json(Self {
            data,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Dashboard routes
pub fn router(dashboard: Arc<Dashboard>, cors_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(index_handler))
        .route("/actions/:action", post(form_action_handler))
        .route("/api/status", get(status_handler))
        .route("/api/actions/:action", post(api_action_handler))
        .route("/api/info", get(info_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(dashboard)
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn render(dashboard: &Dashboard, feedback: &Feedback) -> Html<String> {
    if dashboard.account().is_none() {
        return Html(render_disconnected(dashboard.app_name()));
    }
    let view = dashboard.snapshot().await.view();
    let ctx = PageContext {
        app_name: dashboard.app_name(),
        token_symbol: dashboard.token_symbol(),
        busy: dashboard.is_busy(),
        feedback,
    };
    Html(render_dashboard(&ctx, &view))
}

/// Dashboard page
pub async fn index_handler(State(dashboard): State<Arc<Dashboard>>) -> Html<String> {
    render(&dashboard, &Feedback::default()).await
}

/// Form submission; re-renders the page with the outcome
pub async fn form_action_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Path(action): Path<Action>,
    Form(request): Form<AmountRequest>,
) -> Html<String> {
    info!("Form action {}: amount={:?}", action, request.amount);
    let feedback = dashboard.handle(action, &request.amount).await;
    render(&dashboard, &feedback).await
}

/// Status payload: display values plus the connected account
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub connected: bool,
    pub busy: bool,
    #[serde(flatten)]
    pub view: FaucetView,
}

pub async fn status_handler(
    State(dashboard): State<Arc<Dashboard>>,
) -> Json<SuccessResponse<StatusResponse>> {
    let view = dashboard.snapshot().await.view();
    SuccessResponse::new(StatusResponse {
        connected: dashboard.account().is_some(),
        busy: dashboard.is_busy(),
        view,
    })
}

/// JSON action; blank amounts are rejected instead of ignored
pub async fn api_action_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Path(action): Path<Action>,
    Json(request): Json<AmountRequest>,
) -> FaucetResult<Json<SuccessResponse<TxOutcome>>> {
    info!("API action {}: amount={:?}", action, request.amount);
    match dashboard.submit(action, &request.amount).await {
        Ok(Some(outcome)) => Ok(SuccessResponse::new(outcome)),
        Ok(None) => Err(FaucetError::InvalidAmount(UnitsError::Empty)),
        Err(e) => {
            error!("API action {} failed: {}", action, e);
            Err(e)
        }
    }
}

/// App name, supported chains and wallet-connect project id
pub async fn info_handler(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": dashboard.app_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "token_symbol": dashboard.token_symbol(),
        "project_id": dashboard.project_id(),
        "chains": dashboard.chains(),
        "account": dashboard.account(),
        "endpoints": {
            "GET /": "Dashboard page",
            "POST /actions/{action}": "Submit a dashboard form",
            "GET /api/status": "Faucet status",
            "POST /api/actions/{action}": "Submit an action as JSON",
            "GET /health": "Health check",
            "GET /metrics": "Prometheus metrics"
        }
    }))
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn metrics_handler(
    State(dashboard): State<Arc<Dashboard>>,
) -> Result<String, StatusCode> {
    dashboard.metrics().gather().map_err(|e| {
        error!("Failed to gather metrics: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
