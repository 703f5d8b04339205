//! Database access layer
//!
//! Holds the pooled sea-orm connection and the schema migrations. The
//! analytic queries themselves live in [`crate::analytics`]; this module only
//! provides the shared handle plus migration and health plumbing.

use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};
use thiserror::Error;

pub mod config;
pub mod entities;
pub mod migration;

pub use config::DatabaseConfig;

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Long-lived database handle, constructed once at process start
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect using the configured URL and pool size
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let mut options = ConnectOptions::new(config.url.clone());

        // Every pooled connection to an in-memory SQLite URL gets its own
        // empty database, so the pool must stay at a single connection there.
        if config.url.contains(":memory:") {
            options.max_connections(1).min_connections(1);
        } else {
            options.max_connections(config.max_connections);
        }

        let connection = sea_orm::Database::connect(options)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(Self { connection })
    }

    /// Run all pending migrations
    pub async fn migrate(&self) -> DatabaseResult<()> {
        use crate::database::migration::Migrator;
        use sea_orm_migration::MigratorTrait;

        tracing::info!("Running database migrations");

        Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::Migration(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Successfully completed all migrations");
        Ok(())
    }

    /// Health check for the database connection
    pub async fn ping(&self) -> DatabaseResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| DatabaseError::Database(format!("db error: {}", e)))
    }

    /// Get the underlying connection (for queries and admin operations)
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

#[async_trait]
impl crate::health::HealthChecker for Database {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> crate::health::HealthCheckResult {
        match self.ping().await {
            Ok(_) => crate::health::HealthCheckResult::healthy_with_details(serde_json::json!({
                "status": "healthy",
                "connection": "ok"
            })),
            Err(err) => crate::health::HealthCheckResult::unhealthy_with_details(
                "DB health check failed".to_string(),
                serde_json::json!({
                    "status": "unhealthy",
                    "error": err.to_string()
                }),
            ),
        }
    }
}
