use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `None` or the literal `memory` selects the in-process store
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
}

/// Which persistence gateway the configuration asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No database URL configured for {0:?}; set {1}")]
    MissingDatabaseUrl(Environment, &'static str),
}

pub const MEMORY_URL: &str = "memory";

impl Environment {
    /// Name of the variable holding the database URL for this environment
    pub fn database_url_var(&self) -> &'static str {
        match self {
            Environment::Development => "DEV_DATABASE_URL",
            Environment::Testing => "TEST_DATABASE_URL",
            Environment::Production => "DATABASE_URL",
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("HELPDESK_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("testing") | Ok("test") => Environment::Testing,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Testing => Self::testing(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database URL: environment-specific variable first, then the generic one
        let url = env::var(self.environment.database_url_var())
            .ok()
            .or_else(|| match self.environment {
                Environment::Development => env::var("DATABASE_URL").ok(),
                _ => None,
            });
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database.url = Some(url);
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Server overrides
        if let Ok(v) = env::var("HELPDESK_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("HELPDESK_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = parse_origins(&v);
        }

        self
    }

    /// Resolve the configured store. Only the testing environment may fall
    /// back to memory when no URL is set.
    pub fn store_backend(&self) -> Result<StoreBackend, ConfigError> {
        match self.database.url.as_deref() {
            Some(MEMORY_URL) => Ok(StoreBackend::Memory),
            Some(url) => Ok(StoreBackend::Postgres(url.to_string())),
            None if self.environment == Environment::Testing => Ok(StoreBackend::Memory),
            None => Err(ConfigError::MissingDatabaseUrl(
                self.environment,
                self.environment.database_url_var(),
            )),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    pub fn testing() -> Self {
        Self {
            environment: Environment::Testing,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
