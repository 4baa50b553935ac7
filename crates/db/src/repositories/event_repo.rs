//! Repository for the `events` table.

use sqlx::PgPool;

use protrack_core::types::{DbId, Timestamp};

use crate::models::event::{CreateEvent, Event};

const COLUMNS: &str =
    "id, title, description, starts_at, ends_at, location, responsible, created_at, updated_at";

/// Provides CRUD operations for calendar events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, starts_at, ends_at, location, responsible)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.starts_at())
            .bind(input.ends_at())
            .bind(&input.location)
            .bind(&input.responsible)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events, earliest start first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY starts_at ASC NULLS LAST");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// The earliest event starting strictly after `now`, if any.
    pub async fn next_after(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE starts_at > $1 ORDER BY starts_at ASC LIMIT 1"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Persist a patched row, bumping `updated_at`. Returns the stored row,
    /// or `None` if the event no longer exists.
    pub async fn save(pool: &PgPool, event: &Event) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = $2, description = $3, starts_at = $4, ends_at = $5,
                location = $6, responsible = $7, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(event.id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.starts_at)
            .bind(event.ends_at)
            .bind(&event.location)
            .bind(&event.responsible)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
