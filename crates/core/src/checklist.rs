//! The checklist field mapping table.
//!
//! The front end addresses readiness checklist fields by their display label
//! (`"Backup Config"`, `"UCMDB"`, ...). This is the single place those labels
//! are translated to database columns; handlers resolve labels through
//! [`ChecklistField::from_label`] instead of carrying their own tables.

/// A readiness checklist field on a project. Each defaults to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistField {
    Ntp,
    Scan,
    ResolvesByName,
    Antivirus,
    BackupConfig,
    NagiosMonitoring,
    ElasticMonitoring,
    Ucmdb,
    AwxConnectivity,
    HandoverChange,
}

/// All checklist fields, in the order they appear in project payloads.
pub const CHECKLIST_FIELDS: [ChecklistField; 10] = [
    ChecklistField::Ntp,
    ChecklistField::Scan,
    ChecklistField::ResolvesByName,
    ChecklistField::Antivirus,
    ChecklistField::BackupConfig,
    ChecklistField::NagiosMonitoring,
    ChecklistField::ElasticMonitoring,
    ChecklistField::Ucmdb,
    ChecklistField::AwxConnectivity,
    ChecklistField::HandoverChange,
];

impl ChecklistField {
    /// The display label used as JSON key by the front end.
    pub fn label(self) -> &'static str {
        match self {
            ChecklistField::Ntp => "NTP",
            ChecklistField::Scan => "SCAN",
            ChecklistField::ResolvesByName => "Resolves By Name",
            ChecklistField::Antivirus => "Antivirus",
            ChecklistField::BackupConfig => "Backup Config",
            ChecklistField::NagiosMonitoring => "Nagios Monitoring",
            ChecklistField::ElasticMonitoring => "Elastic Monitoring",
            ChecklistField::Ucmdb => "UCMDB",
            ChecklistField::AwxConnectivity => "AWX Connectivity",
            ChecklistField::HandoverChange => "Handover Change (OLA)",
        }
    }

    /// The `projects` column the field is stored in.
    pub fn column(self) -> &'static str {
        match self {
            ChecklistField::Ntp => "ntp",
            ChecklistField::Scan => "scan",
            ChecklistField::ResolvesByName => "resolves_by_name",
            ChecklistField::Antivirus => "antivirus",
            ChecklistField::BackupConfig => "backup_config",
            ChecklistField::NagiosMonitoring => "nagios_monitoring",
            ChecklistField::ElasticMonitoring => "elastic_monitoring",
            ChecklistField::Ucmdb => "ucmdb",
            ChecklistField::AwxConnectivity => "awx_connectivity",
            ChecklistField::HandoverChange => "handover_change",
        }
    }

    /// Resolve a display label case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        CHECKLIST_FIELDS
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }
}
