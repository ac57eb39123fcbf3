//! Retry policy for transient timeout failures.
//!
//! Deliberately narrow: one immediate re-attempt when a call classifies as a
//! request timeout, nothing else. No backoff, no jitter, no retry on 5xx or
//! connection failures. The adapter re-runs the whole operation from scratch
//! (query filtering included), which is safe because these operations are
//! read-only.

use crate::Error;

/// Default maximum number of re-attempts after the initial call.
pub const DEFAULT_MAX_RETRIES: usize = 1;

/// Decides whether a failed attempt is re-run.
///
/// # Examples
///
/// ```
/// use esp_adapter::{Error, RetryPolicy};
/// use http::StatusCode;
///
/// let policy = RetryPolicy::default();
///
/// let timeout = Error::RequestTimeout { status: None, message: None };
/// assert!(policy.should_retry(&timeout, 0));
/// // The single retry is spent after one re-attempt.
/// assert!(!policy.should_retry(&timeout, 1));
///
/// let not_found = Error::NotFound { status: StatusCode::NOT_FOUND, message: None };
/// assert!(!policy.should_retry(&not_found, 0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: usize,
}

impl RetryPolicy {
    /// Creates a policy allowing up to `max_retries` re-attempts.
    ///
    /// `RetryPolicy::new(0)` disables retrying entirely.
    pub fn new(max_retries: usize) -> Self {
        Self { max_retries }
    }

    /// The maximum number of re-attempts after the initial call.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Returns `true` if the attempt should be re-run.
    ///
    /// `attempt` counts completed re-attempts so far, starting at 0 for the
    /// initial call. Only timeout-classified failures are ever retried.
    pub fn should_retry(&self, error: &Error, attempt: usize) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn timeout() -> Error {
        Error::RequestTimeout {
            status: Some(StatusCode::REQUEST_TIMEOUT),
            message: None,
        }
    }

    #[test]
    fn retries_timeout_until_budget_spent() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), DEFAULT_MAX_RETRIES);
        assert!(policy.should_retry(&timeout(), 0));
        assert!(!policy.should_retry(&timeout(), 1));
        assert!(!policy.should_retry(&timeout(), 2));
    }

    #[test]
    fn never_retries_other_classifications() {
        let policy = RetryPolicy::default();

        let errors = [
            Error::BadRequest {
                status: StatusCode::BAD_REQUEST,
                message: None,
            },
            Error::Unauthorized {
                status: StatusCode::UNAUTHORIZED,
                message: None,
            },
            Error::Server {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: None,
            },
            Error::Connection {
                message: "connection refused".to_string(),
            },
        ];

        for error in &errors {
            assert!(!policy.should_retry(error, 0), "retried {error:?}");
        }
    }

    #[test]
    fn zero_budget_disables_retrying() {
        let policy = RetryPolicy::new(0);
        assert!(!policy.should_retry(&timeout(), 0));
    }

    #[test]
    fn transport_level_timeout_is_also_retried() {
        let policy = RetryPolicy::default();
        let transport_timeout = Error::RequestTimeout {
            status: None,
            message: Some("transport deadline expired".to_string()),
        };
        assert!(policy.should_retry(&transport_timeout, 0));
    }
}
