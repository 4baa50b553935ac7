//! Domain types shared across the project-tracking workspace.

pub mod checklist;
pub mod error;
pub mod patch;
pub mod phase;
pub mod status;
pub mod types;
