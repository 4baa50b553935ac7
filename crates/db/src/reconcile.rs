//! Phase-history reconciliation.
//!
//! On each project update that carries a (phase, date) pair, the history must
//! end up reflecting "the project entered this phase on this date" without
//! ever holding two rows for the same (project, phase, date) triple. The
//! store's unique constraint is the sole concurrency safety net: a losing
//! racer sees a constraint violation and recovers through the insert-or-ignore
//! fallback instead of failing the enclosing update.

use chrono::NaiveDate;
use sqlx::PgPool;

use protrack_core::phase::Phase;
use protrack_core::types::DbId;

use crate::is_unique_violation;
use crate::repositories::PhaseRepo;

/// What reconciliation did, so callers and tests can tell the paths apart
/// instead of relying on log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No record existed for the phase; a new row was inserted.
    Inserted,
    /// The latest record for the phase had its date amended in place.
    Amended,
    /// The latest record already carried the submitted date; nothing changed.
    Unchanged,
    /// The in-place amendment collided with an existing (project, phase,
    /// date) row and was recovered via the insert-or-ignore fallback.
    Recovered,
}

/// Ensure the history reflects "project entered `phase` on `date`".
///
/// The latest record for (project, phase) is found by date descending, then
/// creation time descending, so equal dates resolve to the most recently
/// created row. At most one row is created or mutated per call.
///
/// Callers must not let an `Err` abort the surrounding project update; phase
/// tracking is secondary to the field update it rides along with.
pub async fn reconcile_phase(
    pool: &PgPool,
    project_pk: DbId,
    phase: Phase,
    date: NaiveDate,
) -> Result<ReconcileOutcome, sqlx::Error> {
    let existing = PhaseRepo::latest_for_phase(pool, project_pk, phase).await?;

    let record = match existing {
        None => {
            // First time this phase is recorded. The insert-or-ignore guards
            // against a concurrent writer landing the same triple first.
            let inserted = PhaseRepo::insert(pool, project_pk, phase, date).await?;
            return Ok(if inserted {
                ReconcileOutcome::Inserted
            } else {
                ReconcileOutcome::Unchanged
            });
        }
        Some(record) => record,
    };

    if record.date == date {
        // Idempotent resubmission of the same (phase, date).
        return Ok(ReconcileOutcome::Unchanged);
    }

    match PhaseRepo::update_date(pool, record.id, date).await {
        Ok(()) => Ok(ReconcileOutcome::Amended),
        Err(err) if is_unique_violation(&err) => {
            // Another row for (project, phase, date) already exists, so the
            // amendment cannot land. Keep the existing rows and make sure the
            // target triple is present.
            tracing::debug!(
                project_pk,
                phase = phase.as_str(),
                %date,
                "phase date amendment collided with existing row, falling back to insert"
            );
            PhaseRepo::insert(pool, project_pk, phase, date).await?;
            Ok(ReconcileOutcome::Recovered)
        }
        Err(err) => Err(err),
    }
}
