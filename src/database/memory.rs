use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::ticket::{MAX_STATUS_LEN, MAX_TITLE_LEN};
use crate::database::models::user::{MAX_EMAIL_LEN, MAX_USERNAME_LEN};
use crate::database::models::{NewTicket, NewUser, Ticket, TicketField, User};
use crate::database::store::Store;

/// In-process `Store` that enforces the same constraints as the SQL schema:
/// unique username/email, ticket → user foreign key, and column lengths.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    tickets: BTreeMap<i32, Ticket>,
    last_user_id: i32,
    last_ticket_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_length(column: &str, value: &str, max: usize) -> Result<(), DatabaseError> {
    if value.chars().count() > max {
        return Err(DatabaseError::Constraint(format!(
            "value too long for column {} (max {})",
            column, max
        )));
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i32, DatabaseError> {
        check_length("username", &user.username, MAX_USERNAME_LEN)?;
        check_length("email", &user.email, MAX_EMAIL_LEN)?;

        let mut tables = self.tables.write().await;
        if let Some(existing) = tables
            .users
            .values()
            .find(|u| u.username == user.username || u.email == user.email)
        {
            let column = if existing.username == user.username { "username" } else { "email" };
            return Err(DatabaseError::Constraint(format!("duplicate key value for {}", column)));
        }

        tables.last_user_id += 1;
        let id = tables.last_user_id;
        tables.users.insert(
            id,
            User {
                id,
                username: user.username.clone(),
                email: user.email.clone(),
            },
        );
        Ok(id)
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.tickets.values().cloned().collect())
    }

    async fn list_tickets_for_user(&self, user_id: i32) -> Result<Vec<Ticket>, DatabaseError> {
        let tables = self.tables.read().await;
        if !tables.users.contains_key(&user_id) {
            return Err(DatabaseError::NotFound(format!("user {}", user_id)));
        }
        Ok(tables
            .tickets
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_ticket(&self, ticket: &NewTicket) -> Result<i32, DatabaseError> {
        check_length("title", &ticket.title, MAX_TITLE_LEN)?;
        check_length("status", &ticket.status, MAX_STATUS_LEN)?;

        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&ticket.user_id) {
            return Err(DatabaseError::Constraint(format!(
                "ticket.user_id {} does not reference an existing user",
                ticket.user_id
            )));
        }

        tables.last_ticket_id += 1;
        let id = tables.last_ticket_id;
        tables.tickets.insert(
            id,
            Ticket {
                id,
                title: ticket.title.clone(),
                description: ticket.description.clone(),
                status: ticket.status.clone(),
                user_id: ticket.user_id,
            },
        );
        Ok(id)
    }

    async fn find_ticket(&self, id: i32) -> Result<Ticket, DatabaseError> {
        let tables = self.tables.read().await;
        tables
            .tickets
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("ticket {}", id)))
    }

    async fn update_ticket(&self, id: i32, field: &TicketField) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let ticket = tables
            .tickets
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("ticket {}", id)))?;

        match field {
            TicketField::Status(status) => {
                check_length("status", status, MAX_STATUS_LEN)?;
                ticket.status = status.clone();
            }
        }
        Ok(())
    }

    async fn delete_ticket(&self, id: i32) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables
            .tickets
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("ticket {}", id)))
    }
}
