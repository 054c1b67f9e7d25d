use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewTicket, NewUser, Ticket, TicketField, User};
use crate::database::schema::ALL_TABLES;
use crate::database::store::Store;

const TICKET_COLUMNS: &str = "id, title, description, status, user_id";

/// `Store` backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::connect(url, config).await?;
        Ok(Self::new(pool))
    }

    async fn user_exists(&self, id: i32) -> Result<bool, DatabaseError> {
        let found: Option<(i32,)> = sqlx::query_as(r#"SELECT id FROM "user" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for (table, ddl) in ALL_TABLES {
            sqlx::query(ddl).execute(&self.pool).await?;
            debug!("Ensured table {}", DatabaseManager::quote_identifier(table));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(r#"SELECT id, username, email FROM "user" ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let inserted: Result<(i32,), sqlx::Error> =
            sqlx::query_as(r#"INSERT INTO "user" (username, email) VALUES ($1, $2) RETURNING id"#)
                .bind(&user.username)
                .bind(&user.email)
                .fetch_one(&mut *tx)
                .await;

        match inserted {
            Ok((id,)) => {
                tx.commit().await?;
                Ok(id)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, DatabaseError> {
        let sql = format!("SELECT {} FROM ticket ORDER BY id", TICKET_COLUMNS);
        let tickets = sqlx::query_as::<_, Ticket>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    async fn list_tickets_for_user(&self, user_id: i32) -> Result<Vec<Ticket>, DatabaseError> {
        if !self.user_exists(user_id).await? {
            return Err(DatabaseError::NotFound(format!("user {}", user_id)));
        }

        let sql = format!(
            "SELECT {} FROM ticket WHERE user_id = $1 ORDER BY id",
            TICKET_COLUMNS
        );
        let tickets = sqlx::query_as::<_, Ticket>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    async fn insert_ticket(&self, ticket: &NewTicket) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let inserted: Result<(i32,), sqlx::Error> = sqlx::query_as(
            "INSERT INTO ticket (title, description, status, user_id) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(&ticket.status)
        .bind(ticket.user_id)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok((id,)) => {
                tx.commit().await?;
                Ok(id)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn find_ticket(&self, id: i32) -> Result<Ticket, DatabaseError> {
        let sql = format!("SELECT {} FROM ticket WHERE id = $1", TICKET_COLUMNS);
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("ticket {}", id)))
    }

    async fn update_ticket(&self, id: i32, field: &TicketField) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE ticket SET {} = $1 WHERE id = $2",
            DatabaseManager::quote_identifier(field.column())
        );
        let query = match field {
            TicketField::Status(status) => sqlx::query::<sqlx::Postgres>(&sql).bind(status),
        };

        let result = query.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("ticket {}", id)));
        }
        Ok(())
    }

    async fn delete_ticket(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM ticket WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("ticket {}", id)));
        }
        Ok(())
    }
}
