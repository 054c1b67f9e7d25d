use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use serde_json::Value;
use tracing::{debug, info};

use crate::database::models::{NewUser, PayloadError, Ticket, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::state::AppState;

use super::utils::{body_object, path_id};

const CREATE_FAILED: &str = "Failed to create user";
const NOT_FOUND: &str = "User not found";

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state
        .store
        .list_users()
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, "Failed to load users"))?;
    Ok(ApiResponse::success(users))
}

/// POST /api/users - body `{username, email}`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Message> {
    let new_user = match NewUser::from_payload(&body_object(body)) {
        Ok(user) => user,
        Err(PayloadError::Missing(field)) => {
            debug!("Rejecting user without {}", field);
            return Err(ApiError::missing_data());
        }
        Err(e @ PayloadError::Invalid(_)) => {
            debug!("Rejecting user: {}", e);
            return Err(ApiError::internal_server_error(CREATE_FAILED));
        }
    };

    let id = state
        .store
        .insert_user(&new_user)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, CREATE_FAILED))?;

    info!("Created user {} ({})", id, new_user.username);
    Ok(ApiResponse::created(Message::new("User created successfully")))
}

/// GET /api/users/:id/tickets
pub async fn tickets(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<Ticket>> {
    let user_id = path_id(path, NOT_FOUND)?;
    let tickets = state
        .store
        .list_tickets_for_user(user_id)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, "Failed to load tickets"))?;
    Ok(ApiResponse::success(tickets))
}
