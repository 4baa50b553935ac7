//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (tri-state [`Patch`] fields) for partial
//!   updates
//!
//! Wire keys are the display labels the browser front end uses, mapped once
//! here via `#[serde(rename = "...")]`.
//!
//! [`Patch`]: protrack_core::patch::Patch

pub mod event;
pub mod phase;
pub mod project;
