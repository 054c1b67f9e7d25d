use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::{require_all, required_id, required_text, PayloadError};

pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_STATUS_LEN: usize = 20;

/// Status assigned to every ticket at creation
pub const DEFAULT_STATUS: &str = "Open";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub user_id: i32,
}

/// Insert payload for the `ticket` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub status: String,
    pub user_id: i32,
}

impl NewTicket {
    pub fn new(title: impl Into<String>, description: impl Into<String>, user_id: i32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: DEFAULT_STATUS.to_string(),
            user_id,
        }
    }

    /// Build from a `POST /api/tickets` body. Any `status` in the body is
    /// ignored; new tickets always start out open.
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self, PayloadError> {
        require_all(body, &["title", "description", "user_id"])?;
        Ok(Self::new(
            required_text(body, "title")?,
            required_text(body, "description")?,
            required_id(body, "user_id")?,
        ))
    }
}

/// The ticket columns that may change after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketField {
    Status(String),
}

impl TicketField {
    pub fn column(&self) -> &'static str {
        match self {
            TicketField::Status(_) => "status",
        }
    }

    /// Parse a `PUT /api/tickets/:id` body
    pub fn status_from_payload(body: &Map<String, Value>) -> Result<Self, PayloadError> {
        require_all(body, &["status"])?;
        Ok(TicketField::Status(required_text(body, "status")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_ticket_defaults_to_open() {
        let body = json!({"title": "Printer", "description": "Jammed again", "user_id": 3, "status": "Closed"});
        let ticket = NewTicket::from_payload(body.as_object().unwrap()).unwrap();
        assert_eq!(ticket.status, DEFAULT_STATUS);
        assert_eq!(ticket.user_id, 3);
    }

    #[test]
    fn missing_description_is_reported() {
        let body = json!({"title": "Printer", "user_id": 3});
        let err = NewTicket::from_payload(body.as_object().unwrap()).unwrap_err();
        assert_eq!(err, PayloadError::Missing("description"));
    }

    #[test]
    fn zero_user_id_counts_as_missing() {
        let body = json!({"title": "Printer", "description": "Jammed", "user_id": 0});
        let err = NewTicket::from_payload(body.as_object().unwrap()).unwrap_err();
        assert_eq!(err, PayloadError::Missing("user_id"));
    }

    #[test]
    fn status_payload() {
        let body = json!({"status": "Closed"});
        assert_eq!(
            TicketField::status_from_payload(body.as_object().unwrap()),
            Ok(TicketField::Status("Closed".into()))
        );
        let empty = json!({});
        assert_eq!(
            TicketField::status_from_payload(empty.as_object().unwrap()),
            Err(PayloadError::Missing("status"))
        );
    }
}
