//! Postgres connection.
//!
//! The shop client is single-user: exactly one connection is opened at
//! startup, shared by every operation, and closed once at exit.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the process-wide Postgres handle.
pub type DbPool = PgPool;

/// Where and as whom to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ConnectionConfig {
    /// Config for `localhost` with an empty password.
    pub fn local(database: impl Into<String>, port: u16, user: impl Into<String>) -> Self {
        Self {
            host: "localhost".to_owned(),
            port,
            database: database.into(),
            user: user.into(),
            password: String::new(),
        }
    }

    /// `postgres://user@host:port/database`, without the password.
    pub fn display_url(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }

    fn options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);
        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

/// Open the single connection described by `config`.
///
/// The pool ceiling is 1 and the connection is established eagerly, so a
/// bad host or credentials fail here rather than on the first query.
pub async fn connect(config: &ConnectionConfig) -> Result<DbPool, DbError> {
    info!("Connecting to {}", config.display_url());
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(config.options())
        .await?;
    Ok(pool)
}

/// Close the connection. Waits for the in-flight statement, if any.
pub async fn close(pool: &DbPool) {
    info!("Disconnecting from database");
    pool.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_config_uses_localhost_and_empty_password() {
        let config = ConnectionConfig::local("shop", 5432, "mechanic");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.password, "");
        assert_eq!(config.display_url(), "postgres://mechanic@localhost:5432/shop");
    }

    #[test]
    fn display_url_never_contains_password() {
        let mut config = ConnectionConfig::local("shop", 5433, "admin");
        config.password = "hunter2".into();
        assert!(!config.display_url().contains("hunter2"));
    }
}
