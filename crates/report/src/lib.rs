//! AI status-report generation.
//!
//! Builds one short status analysis per in-progress project by prompting an
//! external text-generation service, with pacing, bounded retries, and
//! per-project degradation so one failing call never sinks the whole report.

pub mod client;
pub mod document;
pub mod prompt;
pub mod retry;

pub use client::{GeminiClient, GenerateError, TextGenerator};
pub use document::render_report;
pub use prompt::ProjectBrief;
pub use retry::RetryPolicy;
