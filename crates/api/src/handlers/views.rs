//! Response payloads with display-label keys.
//!
//! The browser front end addresses fields by their display labels, so views
//! serialize with the same keys the create/update DTOs deserialize from.

use chrono::NaiveDate;
use serde::Serialize;

use protrack_core::phase::{display_phase, Phase};
use protrack_core::status::STATUS_IN_PROGRESS;
use protrack_core::types::DbId;
use protrack_db::models::event::Event;
use protrack_db::models::project::Project;

/// A project as returned to the front end, including the computed current
/// phase string.
#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(rename = "Project Id")]
    pub project_id: DbId,
    #[serde(rename = "Reference")]
    pub reference: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Lead")]
    pub lead: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    /// Stored 0..=100 value, rendered as-is.
    #[serde(rename = "Percent Complete")]
    pub percent_complete: f64,
    #[serde(rename = "Start")]
    pub start: Option<String>,
    #[serde(rename = "Finish")]
    pub finish: Option<String>,
    #[serde(rename = "Compute")]
    pub compute: Option<String>,
    #[serde(rename = "Phase")]
    pub phase: String,

    #[serde(rename = "NTP")]
    pub ntp: Option<String>,
    #[serde(rename = "SCAN")]
    pub scan: Option<String>,
    #[serde(rename = "Resolves By Name")]
    pub resolves_by_name: Option<String>,
    #[serde(rename = "Antivirus")]
    pub antivirus: Option<String>,
    #[serde(rename = "Backup Config")]
    pub backup_config: Option<String>,
    #[serde(rename = "Nagios Monitoring")]
    pub nagios_monitoring: Option<String>,
    #[serde(rename = "Elastic Monitoring")]
    pub elastic_monitoring: Option<String>,
    #[serde(rename = "UCMDB")]
    pub ucmdb: Option<String>,
    #[serde(rename = "AWX Connectivity")]
    pub awx_connectivity: Option<String>,
    #[serde(rename = "Handover Change (OLA)")]
    pub handover_change: Option<String>,

    #[serde(rename = "Database")]
    pub database_engine: Option<String>,
    #[serde(rename = "Load Balancing")]
    pub load_balancing: Option<String>,
    #[serde(rename = "Backup")]
    pub backup: Option<String>,
    #[serde(rename = "AV Check")]
    pub av_check: Option<String>,
    #[serde(rename = "Contact")]
    pub contact: Option<String>,
    #[serde(rename = "Machine Count")]
    pub machine_count: Option<String>,
    #[serde(rename = "Hostnames")]
    pub hostnames: Option<String>,
    #[serde(rename = "Platform")]
    pub platform: Option<String>,
    #[serde(rename = "OS")]
    pub operating_system: Option<String>,
    #[serde(rename = "Windows License")]
    pub windows_license: Option<String>,
    #[serde(rename = "Domain")]
    pub domain: Option<String>,
    #[serde(rename = "Backup Platform")]
    pub backup_platform: Option<String>,
    #[serde(rename = "Vendor")]
    pub vendor: Option<String>,
    #[serde(rename = "SNMP Community")]
    pub snmp_community: Option<String>,
    #[serde(rename = "FGN")]
    pub fgn: Option<String>,
    #[serde(rename = "RT")]
    pub rt: Option<String>,
    #[serde(rename = "Service")]
    pub service: Option<String>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
}

impl ProjectView {
    /// Build a view from a loaded row and its latest phase record, if any.
    pub fn from_row(project: Project, latest: Option<(Phase, NaiveDate)>) -> Self {
        let status = project.status.as_deref().unwrap_or(STATUS_IN_PROGRESS);
        let phase = display_phase(latest, status);

        Self {
            project_id: project.project_id,
            reference: project.reference,
            name: project.name,
            lead: project.lead,
            percent_complete: project.percent_complete.unwrap_or(0.0),
            start: project.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            finish: project.finish_date.map(|d| d.format("%Y-%m-%d").to_string()),
            compute: project.compute,
            phase,
            ntp: project.ntp,
            scan: project.scan,
            resolves_by_name: project.resolves_by_name,
            antivirus: project.antivirus,
            backup_config: project.backup_config,
            nagios_monitoring: project.nagios_monitoring,
            elastic_monitoring: project.elastic_monitoring,
            ucmdb: project.ucmdb,
            awx_connectivity: project.awx_connectivity,
            handover_change: project.handover_change,
            database_engine: project.database_engine,
            load_balancing: project.load_balancing,
            backup: project.backup,
            av_check: project.av_check,
            contact: project.contact,
            machine_count: project.machine_count,
            hostnames: project.hostnames,
            platform: project.platform,
            operating_system: project.operating_system,
            windows_license: project.windows_license,
            domain: project.domain,
            backup_platform: project.backup_platform,
            vendor: project.vendor,
            snmp_community: project.snmp_community,
            fgn: project.fgn,
            rt: project.rt,
            service: project.service,
            notes: project.notes,
            status: project.status,
        }
    }
}

/// A calendar event as returned to the front end.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub id: DbId,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Start")]
    pub start: Option<String>,
    #[serde(rename = "End")]
    pub end: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Responsible")]
    pub responsible: Option<String>,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start: event.starts_at.map(|ts| ts.to_rfc3339()),
            end: event.ends_at.map(|ts| ts.to_rfc3339()),
            location: event.location,
            responsible: event.responsible,
        }
    }
}
