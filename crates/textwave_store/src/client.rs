//! Database client for Textwave
//!
//! This module provides a database client that is designed to be database
//! agnostic, using SQLx as the underlying database library.

use crate::error::StoreError;
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::sync::Arc;
use std::time::Duration;
use textwave_config::{AppConfig, DatabaseConfig};
use tracing::{debug, error};

/// Database client for Textwave
///
/// This client provides a database-agnostic interface to the database,
/// using SQLx as the underlying database library.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a new database client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database configuration is missing or the
    /// connection fails.
    pub async fn new(config: &Arc<AppConfig>) -> Result<Self, StoreError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| StoreError::Config("Database configuration is missing".to_string()))?;

        Self::from_config(db_config).await
    }

    /// Create a new database client from a database configuration.
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, StoreError> {
        Self::from_url(&db_config.url).await
    }

    /// Create a new database client from a database URL.
    pub async fn from_url(db_url: &str) -> Result<Self, StoreError> {
        if db_url.is_empty() {
            return Err(StoreError::Url("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url).await?;
        Ok(Self { pool })
    }

    /// Create a connection pool for the given URL.
    async fn create_pool(db_url: &str) -> Result<Pool<sqlx::Any>, StoreError> {
        debug!("Creating database pool");

        // Register the bundled drivers with the Any driver
        sqlx::any::install_default_drivers();

        let pool_options = PoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600));

        // For SQLite file URLs, make sure the database file and its directory
        // exist before connecting; the Any driver cannot set create_if_missing.
        if db_url.starts_with("sqlite:") {
            let db_path = db_url
                .strip_prefix("sqlite://")
                .or_else(|| db_url.strip_prefix("sqlite:"))
                .unwrap_or(db_url);

            if !db_path.is_empty() && !db_path.contains(":memory:") {
                if let Some(dir) = std::path::Path::new(db_path).parent() {
                    if !dir.exists() {
                        std::fs::create_dir_all(dir).map_err(|e| {
                            error!("Failed to create directory for SQLite database: {}", e);
                            StoreError::Pool(format!("Failed to create directory: {}", e))
                        })?;
                    }
                }
                if !std::path::Path::new(db_path).exists() {
                    std::fs::File::create(db_path).map_err(|e| {
                        error!("Failed to create SQLite database file: {}", e);
                        StoreError::Pool(format!("Failed to create database file: {}", e))
                    })?;
                }
            }
        }

        let pool = pool_options.connect(db_url).await.map_err(|e| {
            error!("Failed to connect to database: {}", e);
            StoreError::Pool(e.to_string())
        })?;

        Ok(pool)
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows.
    pub async fn execute(&self, query: &str) -> Result<(), StoreError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }
}
