//! Classified error types for provider API calls.
//!
//! Every failure surfaced by this crate is one of a small closed set of
//! variants, each carrying the HTTP status (when one was received) and a
//! human-readable message (when the provider supplied one). Callers match on
//! the variant to discriminate failures and use [`Error::status`] /
//! [`Error::message`] for reporting.

use http::StatusCode;

/// The main error type for provider API calls.
///
/// Specific 4xx statuses get dedicated variants so callers can discriminate
/// them directly; everything else falls into the generic [`Error::Client`] and
/// [`Error::Server`] buckets. Failures that happen before any HTTP response
/// exists ([`Error::Connection`], transport-level [`Error::RequestTimeout`])
/// carry no status.
///
/// # Examples
///
/// ```no_run
/// use esp_adapter::{Error, Mailchimp, QueryOptions};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Mailchimp::new("TEST-us21")?;
///
/// match client.lists(&QueryOptions::new()).await {
///     Ok(result) => println!("lists: {:?}", result),
///     Err(Error::Unauthorized { message, .. }) => {
///         eprintln!("bad credentials: {}", message.as_deref().unwrap_or("no detail"));
///     }
///     Err(e) => eprintln!("call failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The provider rejected the request as malformed (HTTP 400).
    #[error("bad request (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    BadRequest {
        /// The HTTP status code (always 400).
        status: StatusCode,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// Authentication failed (HTTP 401), or the credential resolved to an
    /// unreachable datacenter host.
    ///
    /// A malformed API key produces a bogus region, and a bogus region fails
    /// at name resolution. That connection failure is the real symptom of a
    /// bad credential, so it is reported here rather than as
    /// [`Error::Connection`].
    #[error("unauthorized (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Unauthorized {
        /// The HTTP status code (always 401).
        status: StatusCode,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// Access to the resource is forbidden (HTTP 403).
    #[error("forbidden (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Forbidden {
        /// The HTTP status code (always 403).
        status: StatusCode,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    NotFound {
        /// The HTTP status code (always 404).
        status: StatusCode,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// The request timed out, either as an HTTP 408 response or as a
    /// transport-level deadline expiry (no status in that case).
    ///
    /// This is the only retryable variant; see [`crate::RetryPolicy`].
    #[error("request timeout{}: {}", .status.map(|s| format!(" (status {s})")).unwrap_or_default(), .message.as_deref().unwrap_or("no detail"))]
    RequestTimeout {
        /// `Some(408)` when the provider answered, `None` when the transport
        /// deadline expired before a response arrived.
        status: Option<StatusCode>,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// The provider understood the request but could not process it (HTTP 422).
    #[error("unprocessable entity (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    UnprocessableEntity {
        /// The HTTP status code (always 422).
        status: StatusCode,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// Any other 4xx client error not covered by a dedicated variant.
    #[error("client error (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Client {
        /// The HTTP status code.
        status: StatusCode,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// Any 5xx server error. Also raised (with status 500 and a generic
    /// message) when a response body fails to parse, so parser internals are
    /// never leaked to the caller.
    #[error("server error (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Server {
        /// The HTTP status code.
        status: StatusCode,
        /// Message extracted from the error body's `detail` field, if any.
        message: Option<String>,
    },

    /// A transport-level failure other than a timeout or a name-resolution
    /// failure (connection refused, TLS failure, and so on).
    #[error("connection failure: {message}")]
    Connection {
        /// The rendered source chain of the underlying transport error.
        message: String,
    },

    /// A payload failed structured parsing.
    ///
    /// Raised by [`crate::PayloadCodec::parse`]; the adapter masks it as
    /// [`Error::Server`] before it reaches callers.
    #[error("decode failure: {message}")]
    Decode {
        /// The parser's error rendering.
        message: String,
    },

    /// Invalid adapter configuration.
    ///
    /// Raised only at construction time (bad override URL, HTTP client build
    /// failure), never by a call in flight.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns `true` if this error should be retried.
    ///
    /// Only [`Error::RequestTimeout`] qualifies; every other classification
    /// propagates to the caller immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use esp_adapter::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::RequestTimeout {
    ///     status: Some(StatusCode::REQUEST_TIMEOUT),
    ///     message: None,
    /// };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::NotFound {
    ///     status: StatusCode::NOT_FOUND,
    ///     message: None,
    /// };
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RequestTimeout { .. })
    }

    /// Returns the HTTP status code if this error carries one.
    ///
    /// `None` for transport-level failures that never saw a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::BadRequest { status, .. }
            | Error::Unauthorized { status, .. }
            | Error::Forbidden { status, .. }
            | Error::NotFound { status, .. }
            | Error::UnprocessableEntity { status, .. }
            | Error::Client { status, .. }
            | Error::Server { status, .. } => Some(*status),
            Error::RequestTimeout { status, .. } => *status,
            Error::Connection { .. } | Error::Decode { .. } | Error::Configuration(_) => None,
        }
    }

    /// Returns the human-readable message if this error carries one.
    ///
    /// For status-classified errors this is the upstream body's `detail`
    /// field when it was present.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::BadRequest { message, .. }
            | Error::Unauthorized { message, .. }
            | Error::Forbidden { message, .. }
            | Error::NotFound { message, .. }
            | Error::RequestTimeout { message, .. }
            | Error::UnprocessableEntity { message, .. }
            | Error::Client { message, .. }
            | Error::Server { message, .. } => message.as_deref(),
            Error::Connection { message } | Error::Decode { message } => Some(message),
            Error::Configuration(message) => Some(message),
        }
    }
}

/// A specialized `Result` type for provider API calls.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
