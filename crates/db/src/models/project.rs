//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use protrack_core::patch::Patch;
use protrack_core::status::CHECKLIST_PENDING;
use protrack_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: DbId,
    /// Externally assigned project number (unique, client-facing).
    pub project_id: DbId,
    pub reference: Option<String>,
    pub name: Option<String>,
    pub lead: Option<String>,
    pub status: Option<String>,
    pub percent_complete: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub compute: Option<String>,

    // Readiness checklist, 'Pending' until actioned.
    pub ntp: Option<String>,
    pub scan: Option<String>,
    pub resolves_by_name: Option<String>,
    pub antivirus: Option<String>,
    pub backup_config: Option<String>,
    pub nagios_monitoring: Option<String>,
    pub elastic_monitoring: Option<String>,
    pub ucmdb: Option<String>,
    pub awx_connectivity: Option<String>,
    pub handover_change: Option<String>,

    // Free-form descriptive fields.
    pub database_engine: Option<String>,
    pub load_balancing: Option<String>,
    pub backup: Option<String>,
    pub av_check: Option<String>,
    pub contact: Option<String>,
    pub machine_count: Option<String>,
    pub hostnames: Option<String>,
    pub platform: Option<String>,
    pub operating_system: Option<String>,
    pub windows_license: Option<String>,
    pub domain: Option<String>,
    pub backup_platform: Option<String>,
    pub vendor: Option<String>,
    pub snmp_community: Option<String>,
    pub fgn: Option<String>,
    pub rt: Option<String>,
    pub service: Option<String>,
    pub notes: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Parse a `YYYY-MM-DD` date string. Malformed input yields `None`; callers
/// treat that as "leave the field alone" rather than failing the request.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// DTO for creating a new project. `Project Id` is the only required key.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
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
    #[serde(
        rename = "Percent Complete",
        default,
        deserialize_with = "lenient_percent"
    )]
    #[validate(range(min = 0.0, max = 100.0))]
    pub percent_complete: Option<f64>,
    #[serde(rename = "Start")]
    pub start_date: Option<String>,
    #[serde(rename = "Finish")]
    pub finish_date: Option<String>,
    #[serde(rename = "Compute")]
    pub compute: Option<String>,

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

impl CreateProject {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }

    pub fn finish_date(&self) -> Option<NaiveDate> {
        self.finish_date.as_deref().and_then(parse_date)
    }
}

/// DTO for partially updating a project. Only keys present in the payload
/// are applied; see [`Patch`] for the absent/null/value distinction.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[serde(rename = "Reference", default)]
    pub reference: Patch<String>,
    #[serde(rename = "Name", default)]
    pub name: Patch<String>,
    #[serde(rename = "Lead", default)]
    pub lead: Patch<String>,
    #[serde(rename = "Status", default)]
    pub status: Patch<String>,
    #[serde(
        rename = "Percent Complete",
        default,
        deserialize_with = "lenient_percent_patch"
    )]
    #[validate(custom(function = validate_percent_patch))]
    pub percent_complete: Patch<f64>,
    #[serde(rename = "Start", default)]
    pub start_date: Patch<String>,
    #[serde(rename = "Finish", default)]
    pub finish_date: Patch<String>,
    #[serde(rename = "Compute", default)]
    pub compute: Patch<String>,

    #[serde(rename = "NTP", default)]
    pub ntp: Patch<String>,
    #[serde(rename = "SCAN", default)]
    pub scan: Patch<String>,
    #[serde(rename = "Resolves By Name", default)]
    pub resolves_by_name: Patch<String>,
    #[serde(rename = "Antivirus", default)]
    pub antivirus: Patch<String>,
    #[serde(rename = "Backup Config", default)]
    pub backup_config: Patch<String>,
    #[serde(rename = "Nagios Monitoring", default)]
    pub nagios_monitoring: Patch<String>,
    #[serde(rename = "Elastic Monitoring", default)]
    pub elastic_monitoring: Patch<String>,
    #[serde(rename = "UCMDB", default)]
    pub ucmdb: Patch<String>,
    #[serde(rename = "AWX Connectivity", default)]
    pub awx_connectivity: Patch<String>,
    #[serde(rename = "Handover Change (OLA)", default)]
    pub handover_change: Patch<String>,

    #[serde(rename = "Database", default)]
    pub database_engine: Patch<String>,
    #[serde(rename = "Load Balancing", default)]
    pub load_balancing: Patch<String>,
    #[serde(rename = "Backup", default)]
    pub backup: Patch<String>,
    #[serde(rename = "AV Check", default)]
    pub av_check: Patch<String>,
    #[serde(rename = "Contact", default)]
    pub contact: Patch<String>,
    #[serde(rename = "Machine Count", default)]
    pub machine_count: Patch<String>,
    #[serde(rename = "Hostnames", default)]
    pub hostnames: Patch<String>,
    #[serde(rename = "Platform", default)]
    pub platform: Patch<String>,
    #[serde(rename = "OS", default)]
    pub operating_system: Patch<String>,
    #[serde(rename = "Windows License", default)]
    pub windows_license: Patch<String>,
    #[serde(rename = "Domain", default)]
    pub domain: Patch<String>,
    #[serde(rename = "Backup Platform", default)]
    pub backup_platform: Patch<String>,
    #[serde(rename = "Vendor", default)]
    pub vendor: Patch<String>,
    #[serde(rename = "SNMP Community", default)]
    pub snmp_community: Patch<String>,
    #[serde(rename = "FGN", default)]
    pub fgn: Patch<String>,
    #[serde(rename = "RT", default)]
    pub rt: Patch<String>,
    #[serde(rename = "Service", default)]
    pub service: Patch<String>,
    #[serde(rename = "Notes", default)]
    pub notes: Patch<String>,

    /// Phase transition, applied by the reconciler after the field update.
    /// Both keys must be present for the transition to take effect.
    #[serde(rename = "New Phase", default)]
    pub new_phase: Option<String>,
    #[serde(rename = "Phase Date", default)]
    pub phase_date: Option<String>,
}

impl UpdateProject {
    /// Apply the patch to a loaded row. Lenient conversions happen here:
    /// malformed dates leave the stored value unchanged, blank checklist
    /// values normalize to `Pending`, and blank descriptive fields clear.
    pub fn apply(self, project: &mut Project) {
        self.reference.apply_to(&mut project.reference);
        self.name.apply_to(&mut project.name);
        self.lead.apply_to(&mut project.lead);
        self.status.apply_to(&mut project.status);
        self.compute.apply_to(&mut project.compute);

        if let Patch::Set(value) = self.percent_complete {
            project.percent_complete = Some(value);
        }

        date_patch(self.start_date).apply_to(&mut project.start_date);
        date_patch(self.finish_date).apply_to(&mut project.finish_date);

        checklist_patch(self.ntp).apply_to(&mut project.ntp);
        checklist_patch(self.scan).apply_to(&mut project.scan);
        checklist_patch(self.resolves_by_name).apply_to(&mut project.resolves_by_name);
        checklist_patch(self.antivirus).apply_to(&mut project.antivirus);
        checklist_patch(self.backup_config).apply_to(&mut project.backup_config);
        checklist_patch(self.nagios_monitoring).apply_to(&mut project.nagios_monitoring);
        checklist_patch(self.elastic_monitoring).apply_to(&mut project.elastic_monitoring);
        checklist_patch(self.ucmdb).apply_to(&mut project.ucmdb);
        checklist_patch(self.awx_connectivity).apply_to(&mut project.awx_connectivity);
        checklist_patch(self.handover_change).apply_to(&mut project.handover_change);

        text_patch(self.database_engine).apply_to(&mut project.database_engine);
        text_patch(self.load_balancing).apply_to(&mut project.load_balancing);
        text_patch(self.backup).apply_to(&mut project.backup);
        text_patch(self.av_check).apply_to(&mut project.av_check);
        text_patch(self.contact).apply_to(&mut project.contact);
        text_patch(self.machine_count).apply_to(&mut project.machine_count);
        text_patch(self.hostnames).apply_to(&mut project.hostnames);
        text_patch(self.platform).apply_to(&mut project.platform);
        text_patch(self.operating_system).apply_to(&mut project.operating_system);
        text_patch(self.windows_license).apply_to(&mut project.windows_license);
        text_patch(self.domain).apply_to(&mut project.domain);
        text_patch(self.backup_platform).apply_to(&mut project.backup_platform);
        text_patch(self.vendor).apply_to(&mut project.vendor);
        text_patch(self.snmp_community).apply_to(&mut project.snmp_community);
        text_patch(self.fgn).apply_to(&mut project.fgn);
        text_patch(self.rt).apply_to(&mut project.rt);
        text_patch(self.service).apply_to(&mut project.service);
        text_patch(self.notes).apply_to(&mut project.notes);
    }
}

/// Date fields: explicit blank clears, a valid `YYYY-MM-DD` sets, anything
/// unparseable is ignored.
fn date_patch(patch: Patch<String>) -> Patch<NaiveDate> {
    match patch {
        Patch::Set(value) if value.trim().is_empty() => Patch::Clear,
        other => other.and_then_or_keep(|value| parse_date(&value)),
    }
}

/// Checklist fields: blank or null input falls back to the pending sentinel.
fn checklist_patch(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Keep => Patch::Keep,
        Patch::Clear => Patch::Set(CHECKLIST_PENDING.to_string()),
        Patch::Set(value) if value.trim().is_empty() => {
            Patch::Set(CHECKLIST_PENDING.to_string())
        }
        set => set,
    }
}

/// Descriptive fields: blank input clears instead of storing empty strings.
fn text_patch(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Set(value) if value.trim().is_empty() => Patch::Clear,
        other => other,
    }
}

/// Accept a number or a numeric string; anything else (including `null`)
/// deserializes to `None` and the field keeps its default.
fn lenient_percent<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(coerce_number(value))
}

/// Same coercion for updates: unparseable input leaves the stored value
/// unchanged rather than clearing it.
fn lenient_percent_patch<'de, D>(deserializer: D) -> Result<Patch<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match coerce_number(value) {
        Some(number) => Patch::Set(number),
        None => Patch::Keep,
    })
}

fn coerce_number(value: Option<serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn validate_percent_patch(patch: &Patch<f64>) -> Result<(), ValidationError> {
    if let Patch::Set(value) = patch {
        if !(0.0..=100.0).contains(value) {
            return Err(ValidationError::new("range"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_project() -> Project {
        Project {
            id: 1,
            project_id: 42,
            reference: None,
            name: None,
            lead: None,
            status: Some("In Progress".to_string()),
            percent_complete: Some(0.0),
            start_date: None,
            finish_date: None,
            compute: None,
            ntp: Some(CHECKLIST_PENDING.to_string()),
            scan: Some(CHECKLIST_PENDING.to_string()),
            resolves_by_name: Some(CHECKLIST_PENDING.to_string()),
            antivirus: Some(CHECKLIST_PENDING.to_string()),
            backup_config: Some(CHECKLIST_PENDING.to_string()),
            nagios_monitoring: Some(CHECKLIST_PENDING.to_string()),
            elastic_monitoring: Some(CHECKLIST_PENDING.to_string()),
            ucmdb: Some(CHECKLIST_PENDING.to_string()),
            awx_connectivity: Some(CHECKLIST_PENDING.to_string()),
            handover_change: Some(CHECKLIST_PENDING.to_string()),
            database_engine: None,
            load_balancing: None,
            backup: None,
            av_check: None,
            contact: None,
            machine_count: None,
            hostnames: None,
            platform: None,
            operating_system: None,
            windows_license: None,
            domain: None,
            backup_platform: None,
            vendor: None,
            snmp_community: None,
            fgn: None,
            rt: None,
            service: None,
            notes: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn update_applies_only_present_keys() {
        let input: UpdateProject =
            serde_json::from_str(r#"{"Name": "DNS refresh", "Percent Complete": 55.5}"#).unwrap();
        let mut project = blank_project();
        project.lead = Some("ops".to_string());
        input.apply(&mut project);

        assert_eq!(project.name.as_deref(), Some("DNS refresh"));
        assert_eq!(project.percent_complete, Some(55.5));
        // Absent keys stay untouched.
        assert_eq!(project.lead.as_deref(), Some("ops"));
    }

    #[test]
    fn malformed_date_leaves_field_unchanged() {
        let input: UpdateProject =
            serde_json::from_str(r#"{"Start": "not-a-date"}"#).unwrap();
        let mut project = blank_project();
        project.start_date = NaiveDate::from_ymd_opt(2026, 1, 10);
        input.apply(&mut project);
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2026, 1, 10));
    }

    #[test]
    fn blank_date_clears_field() {
        let input: UpdateProject = serde_json::from_str(r#"{"Finish": ""}"#).unwrap();
        let mut project = blank_project();
        project.finish_date = NaiveDate::from_ymd_opt(2026, 1, 10);
        input.apply(&mut project);
        assert_eq!(project.finish_date, None);
    }

    #[test]
    fn blank_checklist_value_normalizes_to_pending() {
        let input: UpdateProject =
            serde_json::from_str(r#"{"Antivirus": "  ", "UCMDB": null}"#).unwrap();
        let mut project = blank_project();
        project.antivirus = Some("Done".to_string());
        project.ucmdb = Some("Done".to_string());
        input.apply(&mut project);
        assert_eq!(project.antivirus.as_deref(), Some(CHECKLIST_PENDING));
        assert_eq!(project.ucmdb.as_deref(), Some(CHECKLIST_PENDING));
    }

    #[test]
    fn blank_descriptive_value_clears() {
        let input: UpdateProject = serde_json::from_str(r#"{"Vendor": ""}"#).unwrap();
        let mut project = blank_project();
        project.vendor = Some("Acme".to_string());
        input.apply(&mut project);
        assert_eq!(project.vendor, None);
    }

    #[test]
    fn percent_accepts_numeric_strings_and_ignores_junk() {
        let input: UpdateProject =
            serde_json::from_str(r#"{"Percent Complete": "72.5"}"#).unwrap();
        assert_eq!(input.percent_complete, Patch::Set(72.5));

        let input: UpdateProject =
            serde_json::from_str(r#"{"Percent Complete": "lots"}"#).unwrap();
        assert_eq!(input.percent_complete, Patch::Keep);
    }

    #[test]
    fn out_of_range_percent_fails_validation() {
        let input: UpdateProject =
            serde_json::from_str(r#"{"Percent Complete": 150}"#).unwrap();
        assert!(input.validate().is_err());

        let input: UpdateProject =
            serde_json::from_str(r#"{"Percent Complete": 100}"#).unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_requires_project_id() {
        let result: Result<CreateProject, _> = serde_json::from_str(r#"{"Name": "x"}"#);
        assert!(result.is_err());
    }
}
