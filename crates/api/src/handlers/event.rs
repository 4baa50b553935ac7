//! Handlers for the `/events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use protrack_core::error::CoreError;
use protrack_core::types::DbId;
use protrack_db::models::event::{CreateEvent, UpdateEvent};
use protrack_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::views::EventView;
use crate::state::AppState;

/// GET /api/v1/events
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<EventView>>> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(events.into_iter().map(EventView::from).collect()))
}

/// POST /api/v1/events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<EventView>)> {
    let event = EventRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// GET /api/v1/events/next
///
/// The earliest event starting strictly after now.
pub async fn next_upcoming(State(state): State<AppState>) -> AppResult<Json<EventView>> {
    let event = EventRepo::next_after(&state.pool, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("No upcoming events".to_string()))?;
    Ok(Json(event.into()))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EventView>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(event.into()))
}

/// PUT /api/v1/events/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<EventView>> {
    let mut event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    input.apply(&mut event);

    let saved = EventRepo::save(&state.pool, &event)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(saved.into()))
}

/// DELETE /api/v1/events/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EventRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Event", id }))
    }
}
