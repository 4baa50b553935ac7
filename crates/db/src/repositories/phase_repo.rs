//! Repository for the `project_phases` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use protrack_core::phase::Phase;
use protrack_core::types::DbId;

use crate::models::phase::PhaseRecord;

const COLUMNS: &str = "id, project_id, phase, date, created_at";

/// Read/insert/amend access to phase history rows. All mutation goes through
/// the reconciler in [`crate::reconcile`]; nothing here deletes rows.
pub struct PhaseRepo;

impl PhaseRepo {
    /// Insert a history row, ignoring the insert when the (project, phase,
    /// date) triple already exists. Returns `true` if a row was created.
    pub async fn insert(
        pool: &PgPool,
        project_pk: DbId,
        phase: Phase,
        date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO project_phases (project_id, phase, date)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_project_phases_project_phase_date DO NOTHING",
        )
        .bind(project_pk)
        .bind(phase.as_str())
        .bind(date)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The most recent record for one (project, phase), ordered by date then
    /// creation time so ties resolve toward the most recently created row.
    pub async fn latest_for_phase(
        pool: &PgPool,
        project_pk: DbId,
        phase: Phase,
    ) -> Result<Option<PhaseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_phases
             WHERE project_id = $1 AND phase = $2
             ORDER BY date DESC, created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, PhaseRecord>(&query)
            .bind(project_pk)
            .bind(phase.as_str())
            .fetch_optional(pool)
            .await
    }

    /// The most recent record across all phases for one project. This is the
    /// record the `Phase` display string is derived from.
    pub async fn latest_for_project(
        pool: &PgPool,
        project_pk: DbId,
    ) -> Result<Option<PhaseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_phases
             WHERE project_id = $1
             ORDER BY date DESC, created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, PhaseRecord>(&query)
            .bind(project_pk)
            .fetch_optional(pool)
            .await
    }

    /// The most recent record per project, for rendering a project list in
    /// one round trip instead of one lookup per row.
    pub async fn latest_per_project(pool: &PgPool) -> Result<Vec<PhaseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (project_id) {COLUMNS} FROM project_phases
             ORDER BY project_id, date DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PhaseRecord>(&query).fetch_all(pool).await
    }

    /// Amend an existing record's date in place. A unique violation surfaces
    /// as `Err`; the reconciler turns that into a fallback insert.
    pub async fn update_date(
        pool: &PgPool,
        record_id: DbId,
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE project_phases SET date = $2 WHERE id = $1")
            .bind(record_id)
            .bind(date)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// All history rows for a project, oldest date first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_pk: DbId,
    ) -> Result<Vec<PhaseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_phases
             WHERE project_id = $1
             ORDER BY date ASC, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PhaseRecord>(&query)
            .bind(project_pk)
            .fetch_all(pool)
            .await
    }
}
