//! Repository for the `projects` table.

use sqlx::PgPool;

use protrack_core::status::{CHECKLIST_PENDING, STATUS_IN_PROGRESS};
use protrack_core::types::DbId;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, reference, name, lead, status, percent_complete, \
     start_date, finish_date, compute, \
     ntp, scan, resolves_by_name, antivirus, backup_config, nagios_monitoring, \
     elastic_monitoring, ucmdb, awx_connectivity, handover_change, \
     database_engine, load_balancing, backup, av_check, contact, machine_count, \
     hostnames, platform, operating_system, windows_license, domain, backup_platform, \
     vendor, snmp_community, fgn, rt, service, notes, \
     created_at, updated_at";

/// A (month, count) bucket for the stats endpoint. Months are 1-based.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct MonthlyCount {
    pub month: i32,
    pub count: i64,
}

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Creation defaults: blank checklist fields become `Pending`, a missing
    /// status becomes `In Progress`, a missing percentage becomes 0.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (project_id, reference, name, lead, status, percent_complete,
                start_date, finish_date, compute,
                ntp, scan, resolves_by_name, antivirus, backup_config, nagios_monitoring,
                elastic_monitoring, ucmdb, awx_connectivity, handover_change,
                database_engine, load_balancing, backup, av_check, contact, machine_count,
                hostnames, platform, operating_system, windows_license, domain, backup_platform,
                vendor, snmp_community, fgn, rt, service, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                $10, $11, $12, $13, $14, $15, $16, $17, $18, $19,
                $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30,
                $31, $32, $33, $34, $35, $36, $37)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.project_id)
            .bind(clean(&input.reference))
            .bind(clean(&input.name))
            .bind(clean(&input.lead))
            .bind(clean(&input.status).unwrap_or(STATUS_IN_PROGRESS))
            .bind(input.percent_complete.unwrap_or(0.0))
            .bind(input.start_date())
            .bind(input.finish_date())
            .bind(clean(&input.compute))
            .bind(checklist(&input.ntp))
            .bind(checklist(&input.scan))
            .bind(checklist(&input.resolves_by_name))
            .bind(checklist(&input.antivirus))
            .bind(checklist(&input.backup_config))
            .bind(checklist(&input.nagios_monitoring))
            .bind(checklist(&input.elastic_monitoring))
            .bind(checklist(&input.ucmdb))
            .bind(checklist(&input.awx_connectivity))
            .bind(checklist(&input.handover_change))
            .bind(clean(&input.database_engine))
            .bind(clean(&input.load_balancing))
            .bind(clean(&input.backup))
            .bind(clean(&input.av_check))
            .bind(clean(&input.contact))
            .bind(clean(&input.machine_count))
            .bind(clean(&input.hostnames))
            .bind(clean(&input.platform))
            .bind(clean(&input.operating_system))
            .bind(clean(&input.windows_license))
            .bind(clean(&input.domain))
            .bind(clean(&input.backup_platform))
            .bind(clean(&input.vendor))
            .bind(clean(&input.snmp_community))
            .bind(clean(&input.fgn))
            .bind(clean(&input.rt))
            .bind(clean(&input.service))
            .bind(clean(&input.notes))
            .fetch_one(pool)
            .await
    }

    /// Find a project by its external project number.
    pub async fn find_by_project_id(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE project_id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently started first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects ORDER BY start_date DESC NULLS LAST, name");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List projects whose status equals the in-progress sentinel, in the
    /// same order as [`ProjectRepo::list`]. This is the report input set.
    pub async fn list_in_progress(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE status = $1
             ORDER BY start_date DESC NULLS LAST, name"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(STATUS_IN_PROGRESS)
            .fetch_all(pool)
            .await
    }

    /// Persist a fully patched row, bumping `updated_at`. Returns the stored
    /// row, or `None` if the project no longer exists.
    pub async fn save(pool: &PgPool, project: &Project) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                reference = $2, name = $3, lead = $4, status = $5, percent_complete = $6,
                start_date = $7, finish_date = $8, compute = $9,
                ntp = $10, scan = $11, resolves_by_name = $12, antivirus = $13,
                backup_config = $14, nagios_monitoring = $15, elastic_monitoring = $16,
                ucmdb = $17, awx_connectivity = $18, handover_change = $19,
                database_engine = $20, load_balancing = $21, backup = $22, av_check = $23,
                contact = $24, machine_count = $25, hostnames = $26, platform = $27,
                operating_system = $28, windows_license = $29, domain = $30,
                backup_platform = $31, vendor = $32, snmp_community = $33,
                fgn = $34, rt = $35, service = $36, notes = $37,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(&project.reference)
            .bind(&project.name)
            .bind(&project.lead)
            .bind(&project.status)
            .bind(project.percent_complete)
            .bind(project.start_date)
            .bind(project.finish_date)
            .bind(&project.compute)
            .bind(&project.ntp)
            .bind(&project.scan)
            .bind(&project.resolves_by_name)
            .bind(&project.antivirus)
            .bind(&project.backup_config)
            .bind(&project.nagios_monitoring)
            .bind(&project.elastic_monitoring)
            .bind(&project.ucmdb)
            .bind(&project.awx_connectivity)
            .bind(&project.handover_change)
            .bind(&project.database_engine)
            .bind(&project.load_balancing)
            .bind(&project.backup)
            .bind(&project.av_check)
            .bind(&project.contact)
            .bind(&project.machine_count)
            .bind(&project.hostnames)
            .bind(&project.platform)
            .bind(&project.operating_system)
            .bind(&project.windows_license)
            .bind(&project.domain)
            .bind(&project.backup_platform)
            .bind(&project.vendor)
            .bind(&project.snmp_community)
            .bind(&project.fgn)
            .bind(&project.rt)
            .bind(&project.service)
            .bind(&project.notes)
            .fetch_optional(pool)
            .await
    }

    /// Update a single checklist column addressed by its resolved name.
    ///
    /// `column` must come from the checklist mapping table; it is interpolated
    /// into the statement, never taken from raw request input.
    pub async fn set_checklist_value(
        pool: &PgPool,
        project_id: DbId,
        column: &'static str,
        value: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET {column} = $2, updated_at = NOW() WHERE project_id = $1"
        );
        let result = sqlx::query(&query)
            .bind(project_id)
            .bind(value)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Monthly counts of projects by start date, optionally limited to one
    /// year. Months without projects are absent from the result.
    pub async fn monthly_counts(
        pool: &PgPool,
        year: Option<i32>,
    ) -> Result<Vec<MonthlyCount>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyCount>(
            "SELECT EXTRACT(MONTH FROM start_date)::int AS month, COUNT(*) AS count
             FROM projects
             WHERE start_date IS NOT NULL
               AND ($1::int IS NULL OR EXTRACT(YEAR FROM start_date)::int = $1)
             GROUP BY month
             ORDER BY month",
        )
        .bind(year)
        .fetch_all(pool)
        .await
    }

    /// Delete a project by its external number, cascading its phase history.
    /// Returns `true` if a row was removed.
    pub async fn delete_by_project_id(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Treat blank strings as absent.
fn clean(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Checklist insert value: blank or missing falls back to the pending sentinel.
fn checklist(value: &Option<String>) -> &str {
    clean(value).unwrap_or(CHECKLIST_PENDING)
}
