//! Route definitions for the `/projects` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`. `{project_id}` is the external project
/// number, not the surrogate row id.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /stats                   -> stats
/// GET    /{project_id}            -> get_by_id
/// PUT    /{project_id}            -> update
/// DELETE /{project_id}            -> delete
/// PUT    /{project_id}/status     -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/stats", get(project::stats))
        .route(
            "/{project_id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{project_id}/status", put(project::update_status))
}
