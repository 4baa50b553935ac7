//! Handler for the generated status report.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use protrack_db::models::project::Project;
use protrack_db::repositories::ProjectRepo;
use protrack_report::{render_report, ProjectBrief};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Status report response payload.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// One HTML section per in-progress project.
    pub html: String,
}

/// GET /api/v1/reports/status
///
/// Builds an AI-written status section for every in-progress project. A
/// project whose generation fails gets a fallback paragraph instead of
/// failing the whole document.
pub async fn status_report(State(state): State<AppState>) -> AppResult<Json<ReportResponse>> {
    let generator = state.generator.as_ref().ok_or_else(|| {
        AppError::Unavailable("Report generation is not configured".to_string())
    })?;

    let projects = ProjectRepo::list_in_progress(&state.pool).await?;
    let briefs: Vec<ProjectBrief> = projects.into_iter().map(to_brief).collect();

    let html = render_report(generator.as_ref(), &briefs, &state.retry).await;
    Ok(Json(ReportResponse { html }))
}

fn to_brief(project: Project) -> ProjectBrief {
    ProjectBrief {
        project_id: project.project_id,
        reference: project.reference,
        name: project.name,
        percent_complete: project.percent_complete.unwrap_or(0.0),
        status: project.status,
        lead: project.lead,
        start_date: project.start_date,
        finish_date: project.finish_date,
        compute: project.compute,
    }
}
