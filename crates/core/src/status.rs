//! Well-known sentinel values for project fields.
//!
//! These must match the values stored in the `projects.status` and checklist
//! columns and the strings the browser front end sends and renders.

/// Status of a project that is still being worked on. Projects with this
/// status are included in the AI status report and show the unrecorded
/// deployment phase when they have no phase history yet.
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// Default value for checklist fields that have not been actioned yet.
/// Blank or missing checklist values normalize to this on create and update.
pub const CHECKLIST_PENDING: &str = "Pending";
