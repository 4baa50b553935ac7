//! Project lifecycle phases and the current-phase display rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::STATUS_IN_PROGRESS;

/// A lifecycle stage a project can enter. Stored as its wire token
/// (`DEPLOYMENT` / `DELIVERED` / `OPERATIONS`) in the `project_phases.phase`
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "DEPLOYMENT")]
    Deployment,
    #[serde(rename = "DELIVERED")]
    Delivered,
    #[serde(rename = "OPERATIONS")]
    Operations,
}

impl Phase {
    /// The token stored in the database and accepted on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Deployment => "DEPLOYMENT",
            Phase::Delivered => "DELIVERED",
            Phase::Operations => "OPERATIONS",
        }
    }

    /// The human-readable label used in the `Phase` display string.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Deployment => "Deployment",
            Phase::Delivered => "Delivered to User",
            Phase::Operations => "Operations",
        }
    }

    /// Parse a stored or submitted phase token. Returns `None` for anything
    /// outside the fixed enumeration; callers treat that as "no phase given".
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "DEPLOYMENT" => Some(Phase::Deployment),
            "DELIVERED" => Some(Phase::Delivered),
            "OPERATIONS" => Some(Phase::Operations),
            _ => None,
        }
    }
}

/// Render the current-phase string for a project.
///
/// `latest` is the single most recent phase record across all phases for the
/// project (ordered by date, then creation time). A project with no history
/// that is still in progress shows the unrecorded-deployment sentinel, since
/// every project starts deploying before anything is logged.
pub fn display_phase(latest: Option<(Phase, NaiveDate)>, status: &str) -> String {
    match latest {
        Some((phase, date)) => format!("{} ({})", phase.label(), date.format("%Y-%m-%d")),
        None if status == STATUS_IN_PROGRESS => "Deployment (unrecorded)".to_string(),
        None => "No phase".to_string(),
    }
}
