use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Helpdesk API",
        "version": version,
        "endpoints": {
            "users": "GET, POST /api/users",
            "user_tickets": "GET /api/users/:id/tickets",
            "tickets": "GET, POST /api/tickets",
            "ticket": "PUT, DELETE /api/tickets/:id",
            "health": "GET /health",
        }
    }))
}

/// GET /health - store connectivity probe
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "database unavailable",
                    "status": "degraded",
                    "timestamp": now
                })),
            )
        }
    }
}
