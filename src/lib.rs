pub mod config;
pub mod db;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpResponse;

pub use config::Settings;
pub use db::{DbOperations, Post, User};
pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db: DbOperations,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        let db = DbOperations::new_with_options(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(5),
        )
        .await?;

        Ok(Self {
            config: Arc::new(config),
            db,
        })
    }

    pub async fn shutdown(&self) -> Result<()> {
        // Close database connections
        self.db.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn test_app_state_clone() {
        let config = Settings::new_for_test().expect("Failed to load test config");

        // A lazy pool never dials the server, so no database is needed here
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .expect("Failed to create lazy pool");

        let state = AppState {
            config: Arc::new(config),
            db: DbOperations::new(Arc::new(pool)),
        };

        let cloned = state.clone();

        // Verify Arc references are shared
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }
}
