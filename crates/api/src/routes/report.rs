//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /status -> status_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(report::status_report))
}
