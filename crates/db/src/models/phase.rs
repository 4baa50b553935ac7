//! Phase-history entity model.

use chrono::NaiveDate;
use sqlx::FromRow;

use protrack_core::phase::Phase;
use protrack_core::types::{DbId, Timestamp};

/// A row from the `project_phases` table. Rows are only ever created or have
/// their date amended by the reconciler; they are deleted solely via the
/// cascade when the owning project is deleted.
#[derive(Debug, Clone, FromRow)]
pub struct PhaseRecord {
    pub id: DbId,
    /// FK to `projects.id` (the surrogate key, not the external number).
    pub project_id: DbId,
    /// Stored phase token; see [`Phase::parse`].
    pub phase: String,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}

impl PhaseRecord {
    /// The parsed phase, or `None` for a token outside the enumeration.
    pub fn parsed_phase(&self) -> Option<Phase> {
        Phase::parse(&self.phase)
    }
}
