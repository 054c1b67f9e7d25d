use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use serde_json::Value;
use tracing::{debug, info};

use crate::database::models::{NewTicket, PayloadError, Ticket, TicketField};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::state::AppState;

use super::utils::{body_object, path_id};

const CREATE_FAILED: &str = "Failed to create ticket";
const NOT_FOUND: &str = "Ticket not found";

/// GET /api/tickets
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Ticket>> {
    let tickets = state
        .store
        .list_tickets()
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, "Failed to load tickets"))?;
    Ok(ApiResponse::success(tickets))
}

/// POST /api/tickets - body `{title, description, user_id}`
///
/// The owning user is not looked up first; an unknown `user_id` is rejected
/// by the store and reported as a failed create.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Message> {
    let new_ticket = match NewTicket::from_payload(&body_object(body)) {
        Ok(ticket) => ticket,
        Err(PayloadError::Missing(field)) => {
            debug!("Rejecting ticket without {}", field);
            return Err(ApiError::missing_data());
        }
        Err(e @ PayloadError::Invalid(_)) => {
            debug!("Rejecting ticket: {}", e);
            return Err(ApiError::internal_server_error(CREATE_FAILED));
        }
    };

    let id = state
        .store
        .insert_ticket(&new_ticket)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, CREATE_FAILED))?;

    info!("Created ticket {} for user {}", id, new_ticket.user_id);
    Ok(ApiResponse::created(Message::new("Ticket created successfully")))
}

/// PUT /api/tickets/:id - body `{status}`
pub async fn update_status(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Message> {
    let id = path_id(path, NOT_FOUND)?;

    // An unknown ticket is a 404 whatever the body holds
    state
        .store
        .find_ticket(id)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, "Failed to update ticket"))?;

    let field = match TicketField::status_from_payload(&body_object(body)) {
        Ok(field) => field,
        Err(e) => {
            debug!("Rejecting status update for ticket {}: {}", id, e);
            return Err(ApiError::missing_data());
        }
    };

    state
        .store
        .update_ticket(id, &field)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, "Failed to update ticket"))?;

    info!("Updated ticket {} {:?}", id, field);
    Ok(ApiResponse::success(Message::new("Ticket status updated successfully")))
}

/// DELETE /api/tickets/:id
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Message> {
    let id = path_id(path, NOT_FOUND)?;

    state
        .store
        .delete_ticket(id)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND, "Failed to delete ticket"))?;

    info!("Deleted ticket {}", id);
    Ok(ApiResponse::success(Message::new("Ticket deleted successfully")))
}
