pub mod event;
pub mod health;
pub mod project;
pub mod report;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                        list, create
/// /projects/stats                  monthly started-project counts
/// /projects/{project_id}           get, update, delete
/// /projects/{project_id}/status    checklist field update (PUT)
///
/// /events                          list, create
/// /events/next                     next upcoming event
/// /events/{id}                     get, update, delete
///
/// /reports/status                  generated status report (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/events", event::router())
        .nest("/reports", report::router())
}
