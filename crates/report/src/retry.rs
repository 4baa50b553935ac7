//! Retry policy for generation calls.
//!
//! The service rate-limits aggressively, so every call is paced by a fixed
//! delay, and rate-limit-flavoured failures are retried with exponential
//! backoff up to a small attempt cap. Any other failure is fatal for the
//! current project only.

use std::time::Duration;

use crate::client::{GenerateError, TextGenerator};

/// Markers that identify a retryable (rate-limit / quota) failure in the
/// error's textual representation. Matched case-insensitively.
pub const RETRYABLE_MARKERS: [&str; 4] = ["resource exhausted", "429", "rate limit", "quota"];

/// Whether a failure message looks like transient rate limiting.
pub fn is_retryable(message: &str) -> bool {
    let lower = message.to_lowercase();
    RETRYABLE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Tunable parameters for the generation retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per prompt, including the first.
    pub max_attempts: u32,
    /// Backoff after the n-th failed attempt is `base_backoff * 2^(n-1)`.
    pub base_backoff: Duration,
    /// Unconditional delay before every call, including the first. Keeps the
    /// batch under the service's request-per-second limit.
    pub pacing_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
            pacing_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff to wait after the given 1-based failed attempt.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Drive one prompt through the generator under the policy.
///
/// On success the generated text is returned with literal asterisks stripped
/// (the model tends to emit markdown emphasis the report format does not
/// want) and surrounding whitespace trimmed. A fatal failure, or a retryable
/// failure on the final attempt, is returned as `Err`; there is no backoff
/// sleep after the final attempt.
pub async fn generate_with_retry(
    generator: &dyn TextGenerator,
    prompt: &str,
    policy: &RetryPolicy,
) -> Result<String, GenerateError> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        tokio::time::sleep(policy.pacing_delay).await;

        match generator.generate(prompt).await {
            Ok(text) => return Ok(text.replace('*', "").trim().to_string()),
            Err(err) if is_retryable(&err.message) && attempt < policy.max_attempts => {
                let delay = policy.backoff_delay(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "generation rate limited, backing off"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;

    /// Generator that always fails with a fixed message, counting calls.
    struct FailingGenerator {
        message: &'static str,
        calls: AtomicU32,
    }

    impl FailingGenerator {
        fn new(message: &'static str) -> Self {
            Self {
                message,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(GenerateError::new(self.message))
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_backoff: Duration::from_millis(0),
            pacing_delay: Duration::from_millis(0),
        }
    }

    #[test]
    fn classification_matches_markers_case_insensitively() {
        assert!(is_retryable("Resource exhausted, please slow down"));
        assert!(is_retryable("HTTP 429 Too Many Requests"));
        assert!(is_retryable("You hit a RATE LIMIT"));
        assert!(is_retryable("Quota exceeded for this minute"));
        assert!(!is_retryable("invalid API key"));
        assert!(!is_retryable("model not found"));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy {
            base_backoff: Duration::from_secs(1),
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn rate_limited_failure_is_retried_exactly_to_the_cap() {
        let generator = FailingGenerator::new("429 rate limit hit");
        let result = generate_with_retry(&generator, "prompt", &fast_policy()).await;

        assert_matches!(result, Err(_));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fatal_failure_short_circuits_after_one_attempt() {
        let generator = FailingGenerator::new("invalid API key");
        let result = generate_with_retry(&generator, "prompt", &fast_policy()).await;

        assert_matches!(result, Err(_));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_strips_asterisks_and_trims() {
        struct EmphaticGenerator;

        #[async_trait]
        impl TextGenerator for EmphaticGenerator {
            async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
                Ok("  **On track** for the *May* handover.  ".to_string())
            }
        }

        let text = generate_with_retry(&EmphaticGenerator, "prompt", &fast_policy())
            .await
            .unwrap();
        assert_eq!(text, "On track for the May handover.");
    }

    #[tokio::test]
    async fn retryable_failure_then_success_recovers() {
        struct FlakyGenerator {
            calls: AtomicU32,
        }

        #[async_trait]
        impl TextGenerator for FlakyGenerator {
            async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(GenerateError::new("quota exhausted"))
                } else {
                    Ok("Recovered analysis.".to_string())
                }
            }
        }

        let generator = FlakyGenerator {
            calls: AtomicU32::new(0),
        };
        let text = generate_with_retry(&generator, "prompt", &fast_policy())
            .await
            .unwrap();
        assert_eq!(text, "Recovered analysis.");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }
}
