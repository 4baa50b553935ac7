//! Report document composition.

use crate::client::TextGenerator;
use crate::prompt::{build_prompt, ProjectBrief};
use crate::retry::{generate_with_retry, is_retryable, RetryPolicy};

/// Fallback paragraph when a project's generation call fails fatally.
pub const FALLBACK_GENERIC: &str = "Could not generate the analysis due to an error.";

/// Fallback paragraph when retries were exhausted against rate limiting.
pub const FALLBACK_RATE_LIMIT: &str =
    "Could not generate the analysis: resource limit reached. Try again later.";

/// Placeholder document when there are no in-progress projects to report on.
pub const EMPTY_DOCUMENT: &str = "<p>No report content.</p>";

/// Build the status-report document for a batch of in-progress projects.
///
/// One HTML section per project, in the given order. A failed generation
/// degrades to a fallback paragraph for that section only; this function
/// never fails past its own boundary.
pub async fn render_report(
    generator: &dyn TextGenerator,
    briefs: &[ProjectBrief],
    policy: &RetryPolicy,
) -> String {
    if briefs.is_empty() {
        return EMPTY_DOCUMENT.to_string();
    }

    let mut sections = Vec::with_capacity(briefs.len());
    for brief in briefs {
        let prompt = build_prompt(brief);
        let analysis = match generate_with_retry(generator, &prompt, policy).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    project_id = brief.project_id,
                    error = %err,
                    "analysis generation failed, degrading to fallback text"
                );
                if is_retryable(&err.message) {
                    FALLBACK_RATE_LIMIT.to_string()
                } else {
                    FALLBACK_GENERIC.to_string()
                }
            }
        };
        sections.push(format!(
            "<section class='mb-3'><h3>{}</h3><p>{}</p></section>",
            brief.title(),
            analysis
        ));
    }

    sections.join("\n")
}
