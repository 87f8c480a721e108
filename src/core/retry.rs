//! # Retry
//!
//! Bounded, strictly sequential retry around one `ChatClient::chat` call.
//!
//! ```text
//! attempt 1 ──fail──▶ sleep(delay) ──▶ attempt 2 ──fail──▶ ... ──▶ attempt N
//!     │                                    │                          │
//!   ok ▼                                 ok ▼                    fail ▼
//!  Ok(reply)                            Ok(reply)          Err(RetryExhausted)
//! ```
//!
//! N = `max_retries + 1`. The same text is sent on every attempt.

use std::fmt;
use std::time::Duration;

use log::{info, warn};

use crate::api::{ChatClient, ChatError};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Fixed pause before each retry.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Reported to the caller after each failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptFailure {
    /// 1-based attempt number.
    pub attempt: u32,
    pub max_attempts: u32,
    pub will_retry: bool,
    pub error: ChatError,
}

/// Every attempt failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryExhausted {
    pub attempts: u32,
    pub last_error: ChatError,
}

impl fmt::Display for RetryExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gave up after {} attempts: {}", self.attempts, self.last_error)
    }
}

impl std::error::Error for RetryExhausted {}

/// Sends `text` until it succeeds or the policy runs out.
///
/// `on_failure` runs after every failed attempt, before the delay.
pub async fn send_with_retry<F>(
    client: &dyn ChatClient,
    text: &str,
    policy: &RetryPolicy,
    mut on_failure: F,
) -> Result<String, RetryExhausted>
where
    F: FnMut(&AttemptFailure),
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        match client.chat(text).await {
            Ok(reply) => {
                if attempt > 1 {
                    info!("{} succeeded on attempt {}/{}", client.name(), attempt, max_attempts);
                }
                return Ok(reply);
            }
            Err(error) => {
                let will_retry = attempt < max_attempts;
                warn!(
                    "{} attempt {}/{} failed: {}",
                    client.name(),
                    attempt,
                    max_attempts,
                    error
                );
                let failure = AttemptFailure {
                    attempt,
                    max_attempts,
                    will_retry,
                    error,
                };
                on_failure(&failure);

                if !will_retry {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: failure.error,
                    });
                }
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedClient;

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.delay, Duration::from_secs(1));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let client = ScriptedClient::replying("hello");
        let mut failures = Vec::new();

        let result = send_with_retry(&client, "hi", &instant_policy(), |f| {
            failures.push(f.clone())
        })
        .await;

        assert_eq!(result, Ok("hello".to_string()));
        assert_eq!(client.calls(), 1);
        assert!(failures.is_empty());
    }

    #[tokio::test]
    async fn test_recovers_on_last_attempt() {
        let client = ScriptedClient::failing_then_replying(3, "ok");
        let mut failures = Vec::new();

        let result = send_with_retry(&client, "ping", &instant_policy(), |f| {
            failures.push(f.clone())
        })
        .await;

        assert_eq!(result, Ok("ok".to_string()));
        assert_eq!(client.calls(), 4);
        assert_eq!(failures.len(), 3);
        assert!(failures.iter().all(|f| f.will_retry));
        assert_eq!(
            failures.iter().map(|f| f.attempt).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_error() {
        let client = ScriptedClient::always_failing();
        let mut failures = Vec::new();

        let result = send_with_retry(&client, "ping", &instant_policy(), |f| {
            failures.push(f.clone())
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 4);
        assert!(matches!(err.last_error, ChatError::Network(_)));
        assert_eq!(client.calls(), 4);
        assert_eq!(failures.last().map(|f| f.will_retry), Some(false));
    }

    #[tokio::test]
    async fn test_every_attempt_sends_same_text() {
        let client = ScriptedClient::failing_then_replying(2, "ok");
        send_with_retry(&client, "original", &instant_policy(), |_| {})
            .await
            .unwrap();
        assert_eq!(client.received(), vec!["original"; 3]);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_single_attempt() {
        let client = ScriptedClient::always_failing();
        let policy = RetryPolicy {
            max_retries: 0,
            delay: Duration::from_secs(1),
        };
        let err = send_with_retry(&client, "ping", &policy, |_| {}).await.unwrap_err();
        assert_eq!(err.attempts, 1);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_precedes_each_retry() {
        let client = ScriptedClient::always_failing();
        let start = tokio::time::Instant::now();

        let _ = send_with_retry(&client, "ping", &RetryPolicy::default(), |_| {}).await;

        // Three retries, one second before each; none after the final failure.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(4), "elapsed {elapsed:?}");
    }

    #[test]
    fn test_exhausted_display() {
        let err = RetryExhausted {
            attempts: 4,
            last_error: ChatError::Parse("missing field `response`".into()),
        };
        assert_eq!(
            err.to_string(),
            "gave up after 4 attempts: parse error: missing field `response`"
        );
    }
}
