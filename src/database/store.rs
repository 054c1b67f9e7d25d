use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewTicket, NewUser, Ticket, TicketField, User};

/// Persistence gateway shared by all handlers.
///
/// Listing operations return rows ordered by id. Inserts run in their own
/// transaction and leave nothing behind on failure.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create the `user` and `ticket` tables if they are missing
    async fn ensure_schema(&self) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;

    /// Returns the generated id
    async fn insert_user(&self, user: &NewUser) -> Result<i32, DatabaseError>;

    async fn list_tickets(&self) -> Result<Vec<Ticket>, DatabaseError>;

    /// Tickets owned by `user_id`; `NotFound` when the user does not exist
    async fn list_tickets_for_user(&self, user_id: i32) -> Result<Vec<Ticket>, DatabaseError>;

    /// Returns the generated id. The owning user is checked by the store's
    /// foreign key, not beforehand.
    async fn insert_ticket(&self, ticket: &NewTicket) -> Result<i32, DatabaseError>;

    /// `NotFound` when no ticket has this id
    async fn find_ticket(&self, id: i32) -> Result<Ticket, DatabaseError>;

    async fn update_ticket(&self, id: i32, field: &TicketField) -> Result<(), DatabaseError>;

    async fn delete_ticket(&self, id: i32) -> Result<(), DatabaseError>;
}
