//! Prompt construction for the per-project status analysis.

use chrono::NaiveDate;

/// The project fields the prompt is built from. Callers map their storage
/// rows into this; the report pipeline never touches the database itself.
#[derive(Debug, Clone)]
pub struct ProjectBrief {
    pub project_id: i64,
    pub reference: Option<String>,
    pub name: Option<String>,
    /// Stored on a 0-100 scale and rendered as-is.
    pub percent_complete: f64,
    pub status: Option<String>,
    pub lead: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    /// Multi-line free text; non-empty lines are joined with `; ` in the
    /// prompt.
    pub compute: Option<String>,
}

impl ProjectBrief {
    /// Section heading for the report fragment.
    pub fn title(&self) -> String {
        match self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => name.to_string(),
            None => format!("Project {}", self.project_id),
        }
    }
}

/// Render the fixed analysis prompt for one project.
pub fn build_prompt(brief: &ProjectBrief) -> String {
    let compute: Vec<&str> = brief
        .compute
        .as_deref()
        .unwrap_or("")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    format!(
        "You are an expert project management assistant. \
         Based on the following project data, write a brief, professional, \
         actionable status analysis (2-3 sentences). \
         Interpret the key figures (progress, dates) and describe the project's \
         current situation, suggesting a next step or point of attention. \
         Do not include a title, only the analysis paragraph.\n\n\
         Project data:\n\
         - Project ID: {id}\n\
         - Reference: {reference}\n\
         - Name: {name}\n\
         - Progress: {progress:.2}%\n\
         - Status: {status}\n\
         - Lead: {lead}\n\
         - Actual dates (start/finish): {start} / {finish}\n\
         - Compute details: {compute}\n\n\
         Status analysis:",
        id = brief.project_id,
        reference = text_or_na(brief.reference.as_deref()),
        name = text_or_na(brief.name.as_deref()),
        progress = brief.percent_complete,
        status = text_or_na(brief.status.as_deref()),
        lead = text_or_na(brief.lead.as_deref()),
        start = date_or_na(brief.start_date),
        finish = date_or_na(brief.finish_date),
        compute = compute.join("; "),
    )
}

fn text_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}

fn date_or_na(value: Option<NaiveDate>) -> String {
    match value {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "N/A".to_string(),
    }
}
