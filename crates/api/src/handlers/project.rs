//! Handlers for the `/projects` resource.
//!
//! Projects are addressed by their external project number in every route;
//! the surrogate row id never appears on the wire.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use protrack_core::checklist::ChecklistField;
use protrack_core::error::CoreError;
use protrack_core::phase::Phase;
use protrack_core::types::DbId;
use protrack_db::models::phase::PhaseRecord;
use protrack_db::models::project::{parse_date, CreateProject, Project, UpdateProject};
use protrack_db::reconcile::reconcile_phase;
use protrack_db::repositories::{PhaseRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::views::ProjectView;
use crate::state::AppState;

fn latest_of(record: &PhaseRecord) -> Option<(Phase, NaiveDate)> {
    record.parsed_phase().map(|phase| (phase, record.date))
}

async fn view_of(state: &AppState, project: Project) -> AppResult<ProjectView> {
    let latest = PhaseRepo::latest_for_project(&state.pool, project.id).await?;
    Ok(ProjectView::from_row(
        project,
        latest.as_ref().and_then(latest_of),
    ))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectView>>> {
    let projects = ProjectRepo::list(&state.pool).await?;

    // One query for the latest phase record of every project.
    let latest: HashMap<DbId, PhaseRecord> = PhaseRepo::latest_per_project(&state.pool)
        .await?
        .into_iter()
        .map(|record| (record.project_id, record))
        .collect();

    let views = projects
        .into_iter()
        .map(|project| {
            let phase = latest.get(&project.id).and_then(latest_of);
            ProjectView::from_row(project, phase)
        })
        .collect();

    Ok(Json(views))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectView>)> {
    input.validate().map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Percent Complete must be between 0 and 100".to_string(),
        ))
    })?;

    let project = ProjectRepo::create(&state.pool, &input).await?;

    // Every project starts its history with a deployment record dated today.
    // A failure here must not undo the creation itself.
    let today = Utc::now().date_naive();
    if let Err(err) = PhaseRepo::insert(&state.pool, project.id, Phase::Deployment, today).await {
        tracing::warn!(
            project_id = project.project_id,
            error = %err,
            "Failed to record initial deployment phase"
        );
    }

    let view = view_of(&state, project).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ProjectView>> {
    let project = ProjectRepo::find_by_project_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    Ok(Json(view_of(&state, project).await?))
}

/// PUT /api/v1/projects/{project_id}
pub async fn update(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectView>> {
    input.validate().map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Percent Complete must be between 0 and 100".to_string(),
        ))
    })?;

    let mut project = ProjectRepo::find_by_project_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let new_phase = input.new_phase.clone();
    let phase_date = input.phase_date.clone();

    input.apply(&mut project);
    let saved = ProjectRepo::save(&state.pool, &project)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    // The phase transition rides along with the field update but never
    // fails it. Both keys must be present and parseable to take effect.
    if let (Some(token), Some(date_str)) = (new_phase.as_deref(), phase_date.as_deref()) {
        match (Phase::parse(token), parse_date(date_str)) {
            (Some(phase), Some(date)) => {
                match reconcile_phase(&state.pool, saved.id, phase, date).await {
                    Ok(outcome) => {
                        tracing::debug!(project_id, ?phase, %date, ?outcome, "Phase history reconciled");
                    }
                    Err(err) => {
                        tracing::warn!(
                            project_id,
                            error = %err,
                            "Phase history update failed; project fields were saved"
                        );
                    }
                }
            }
            _ => {
                tracing::debug!(project_id, "Ignoring unparseable phase transition payload");
            }
        }
    }

    Ok(Json(view_of(&state, saved).await?))
}

/// DELETE /api/v1/projects/{project_id}
pub async fn delete(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete_by_project_id(&state.pool, project_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
    }
}

/// Checklist status update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub field_name: Option<String>,
    pub new_status: Option<String>,
}

/// Checklist status update response.
#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub success: bool,
    pub message: &'static str,
}

/// PUT /api/v1/projects/{project_id}/status
///
/// Updates a single readiness checklist field, addressed by its display
/// label. The label is resolved through the checklist mapping table.
pub async fn update_status(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(body): Json<UpdateStatusBody>,
) -> AppResult<Json<StatusUpdated>> {
    let (field_name, new_status) = match (body.field_name, body.new_status) {
        (Some(field_name), Some(new_status)) => (field_name, new_status),
        _ => {
            return Err(AppError::BadRequest(
                "Both field_name and new_status are required".to_string(),
            ))
        }
    };

    let field = ChecklistField::from_label(&field_name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown checklist field: {field_name}")))?;

    let updated =
        ProjectRepo::set_checklist_value(&state.pool, project_id, field.column(), &new_status)
            .await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }

    Ok(Json(StatusUpdated {
        success: true,
        message: "Project status updated",
    }))
}

/// Query parameters for the stats endpoint. The year arrives as a string so
/// junk input degrades to "all years" instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub year: Option<String>,
}

/// Monthly started-project counts for the dashboard chart.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub labels: [&'static str; 12],
    pub full_labels: [&'static str; 12],
    pub data: [i64; 12],
}

/// GET /api/v1/projects/stats?year=YYYY
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<StatsResponse>> {
    let year: Option<i32> = query.year.as_deref().and_then(|y| y.trim().parse().ok());

    let counts = ProjectRepo::monthly_counts(&state.pool, year).await?;

    let mut data = [0i64; 12];
    for entry in counts {
        if (1..=12).contains(&entry.month) {
            data[(entry.month - 1) as usize] = entry.count;
        }
    }

    Ok(Json(StatsResponse {
        labels: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        full_labels: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ],
        data,
    }))
}
