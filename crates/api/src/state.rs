use std::sync::Arc;

use protrack_report::{RetryPolicy, TextGenerator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: protrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Text generator for status reports. `None` when no API key is configured,
    /// in which case the report endpoint responds 503.
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// Retry and pacing policy applied around generator calls.
    pub retry: RetryPolicy,
}
