#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use helpdesk_api::config::AppConfig;
use helpdesk_api::database::{MemoryStore, Store};
use helpdesk_api::AppState;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the router on a free port, backed by a fresh in-memory store
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(Arc::new(MemoryStore::new())).await
    }

    pub async fn spawn_with(store: Arc<dyn Store>) -> Result<Self> {
        store.ensure_schema().await?;

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let app = helpdesk_api::app(AppState::new(store), &AppConfig::testing());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn post_json(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self.client.post(self.url(path)).json(&body).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn put_json(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self.client.put(self.url(path)).json(&body).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn delete(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.delete(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    /// Create a user and return its id as listed by the API
    pub async fn create_user(&self, username: &str, email: &str) -> Result<i64> {
        let (status, body) = self
            .post_json("/api/users", json!({ "username": username, "email": email }))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create user failed: {} {}", status, body);

        let (_, users) = self.get_json("/api/users").await?;
        users
            .as_array()
            .and_then(|list| list.iter().find(|u| u["username"] == username))
            .and_then(|u| u["id"].as_i64())
            .context("created user not listed")
    }

    /// Create a ticket and return its id as listed by the API
    pub async fn create_ticket(&self, title: &str, user_id: i64) -> Result<i64> {
        let (status, body) = self
            .post_json(
                "/api/tickets",
                json!({ "title": title, "description": format!("{} details", title), "user_id": user_id }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create ticket failed: {} {}", status, body);

        let (_, tickets) = self.get_json("/api/tickets").await?;
        tickets
            .as_array()
            .and_then(|list| list.iter().rev().find(|t| t["title"] == title))
            .and_then(|t| t["id"].as_i64())
            .context("created ticket not listed")
    }
}
