pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
pub use crate::state::AppState;

/// Full router with middleware applied
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .merge(user_routes())
        .merge(ticket_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match middleware::cors_layer(&config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id/tickets", get(users::tickets))
}

fn ticket_routes() -> Router<AppState> {
    use handlers::tickets;

    Router::new()
        .route("/api/tickets", get(tickets::list).post(tickets::create))
        .route(
            "/api/tickets/:id",
            axum::routing::put(tickets::update_status).delete(tickets::delete),
        )
}
