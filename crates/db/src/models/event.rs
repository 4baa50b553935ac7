//! Calendar event entity model and DTOs.

use serde::Deserialize;
use sqlx::FromRow;

use protrack_core::patch::Patch;
use protrack_core::types::{DbId, Timestamp};

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub location: Option<String>,
    pub responsible: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event. All keys are optional; malformed timestamps
/// are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvent {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Start")]
    pub starts_at: Option<String>,
    #[serde(rename = "End")]
    pub ends_at: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Responsible")]
    pub responsible: Option<String>,
}

impl CreateEvent {
    pub fn starts_at(&self) -> Option<Timestamp> {
        self.starts_at.as_deref().and_then(parse_timestamp)
    }

    pub fn ends_at(&self) -> Option<Timestamp> {
        self.ends_at.as_deref().and_then(parse_timestamp)
    }
}

/// DTO for partially updating an event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    #[serde(rename = "Title", default)]
    pub title: Patch<String>,
    #[serde(rename = "Description", default)]
    pub description: Patch<String>,
    #[serde(rename = "Start", default)]
    pub starts_at: Patch<String>,
    #[serde(rename = "End", default)]
    pub ends_at: Patch<String>,
    #[serde(rename = "Location", default)]
    pub location: Patch<String>,
    #[serde(rename = "Responsible", default)]
    pub responsible: Patch<String>,
}

impl UpdateEvent {
    /// Apply the patch to a loaded row. Timestamps that fail to parse leave
    /// the stored value unchanged.
    pub fn apply(self, event: &mut Event) {
        self.title.apply_to(&mut event.title);
        self.description.apply_to(&mut event.description);
        self.location.apply_to(&mut event.location);
        self.responsible.apply_to(&mut event.responsible);
        self.starts_at
            .and_then_or_keep(|value| parse_timestamp(&value))
            .apply_to(&mut event.starts_at);
        self.ends_at
            .and_then_or_keep(|value| parse_timestamp(&value))
            .apply_to(&mut event.ends_at);
    }
}

/// Parse an RFC 3339 timestamp, tolerating a trailing `Z`.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    chrono::DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Utc))
}
