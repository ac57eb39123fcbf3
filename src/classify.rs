//! Response classification: HTTP status and transport failures to typed errors.
//!
//! Classification runs inline as part of every completed exchange. Status
//! codes are evaluated against an ordered rule set, first match wins; anything
//! in 2xx passes through untouched. Transport-level failures (timeouts, name
//! resolution, connection refused) are classified separately by
//! [`transport_error`] since no status exists for them.

use http::StatusCode;

use crate::error::{Error, Result};

/// Message attached when a connection failure looks like a name-resolution
/// failure. A malformed API key resolves to a bogus datacenter host, and that
/// host failing DNS is the actual symptom of the bad key.
pub(crate) const WRONG_DATACENTER_MESSAGE: &str =
    "Your API key may be invalid, or you've attempted to access the wrong datacenter";

/// Checks a completed exchange and raises the classified error for any
/// non-2xx status.
///
/// `fallback` is used as the error message when the body carries no `detail`
/// field.
///
/// Rule table, evaluated top to bottom:
///
/// | status        | error                        |
/// |---------------|------------------------------|
/// | 400           | [`Error::BadRequest`]          |
/// | 401           | [`Error::Unauthorized`]        |
/// | 403           | [`Error::Forbidden`]           |
/// | 404           | [`Error::NotFound`]            |
/// | 408           | [`Error::RequestTimeout`]      |
/// | 422           | [`Error::UnprocessableEntity`] |
/// | other 4xx     | [`Error::Client`]              |
/// | 5xx           | [`Error::Server`]              |
/// | anything else | pass through                 |
pub(crate) fn check_status(status: StatusCode, body: &str, fallback: Option<&str>) -> Result<()> {
    let message = || detail_message(body, fallback);

    match status {
        StatusCode::BAD_REQUEST => Err(Error::BadRequest {
            status,
            message: message(),
        }),
        StatusCode::UNAUTHORIZED => Err(Error::Unauthorized {
            status,
            message: message(),
        }),
        StatusCode::FORBIDDEN => Err(Error::Forbidden {
            status,
            message: message(),
        }),
        StatusCode::NOT_FOUND => Err(Error::NotFound {
            status,
            message: message(),
        }),
        StatusCode::REQUEST_TIMEOUT => Err(Error::RequestTimeout {
            status: Some(status),
            message: message(),
        }),
        StatusCode::UNPROCESSABLE_ENTITY => Err(Error::UnprocessableEntity {
            status,
            message: message(),
        }),
        s if s.is_client_error() => Err(Error::Client {
            status,
            message: message(),
        }),
        s if s.is_server_error() => Err(Error::Server {
            status,
            message: message(),
        }),
        _ => Ok(()),
    }
}

/// Classifies a transport-level failure from `reqwest`.
///
/// - A timed-out attempt becomes [`Error::RequestTimeout`] with no status, so
///   the retry policy covers per-attempt deadline expiry the same way it
///   covers an HTTP 408.
/// - A connect-phase failure whose source chain indicates name resolution
///   becomes [`Error::Unauthorized`], carrying
///   [`WRONG_DATACENTER_MESSAGE`].
/// - Everything else becomes [`Error::Connection`] with the rendered source
///   chain.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        return Error::RequestTimeout {
            status: None,
            message: Some("transport deadline expired before a response arrived".to_string()),
        };
    }

    let chain = error_chain_text(&err);
    if err.is_connect() && looks_like_name_resolution_failure(&chain) {
        return Error::Unauthorized {
            status: StatusCode::UNAUTHORIZED,
            message: Some(WRONG_DATACENTER_MESSAGE.to_string()),
        };
    }

    Error::Connection { message: chain }
}

/// Extracts the error message for a non-2xx response.
///
/// The provider reports failures in a `detail` field of the JSON error body.
/// A body that is not valid JSON, or valid JSON without a `detail` string,
/// yields the fallback instead; message extraction must never raise a
/// secondary decode error.
fn detail_message(body: &str, fallback: Option<&str>) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_owned)
        })
        .or_else(|| fallback.map(str::to_owned))
}

/// Renders an error and its full source chain into one line.
fn error_chain_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Heuristic over the transport error text for DNS failures.
///
/// Resolver errors differ by platform ("failed to lookup address",
/// "nodename nor servname provided", "dns error"), so this matches on the
/// common fragments.
fn looks_like_name_resolution_failure(chain: &str) -> bool {
    let chain = chain.to_ascii_lowercase();
    chain.contains("dns")
        || chain.contains("resolve")
        || chain.contains("lookup")
        || chain.contains("nodename nor servname")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[test]
    fn tabulated_statuses_map_to_specific_variants() {
        let body = r#"{"detail": "went sideways"}"#;

        match check_status(status(400), body, None) {
            Err(Error::BadRequest { status, message }) => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message.as_deref(), Some("went sideways"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
        assert!(matches!(
            check_status(status(401), body, None),
            Err(Error::Unauthorized { .. })
        ));
        assert!(matches!(
            check_status(status(403), body, None),
            Err(Error::Forbidden { .. })
        ));
        assert!(matches!(
            check_status(status(404), body, None),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            check_status(status(422), body, None),
            Err(Error::UnprocessableEntity { .. })
        ));
    }

    #[test]
    fn http_408_is_a_request_timeout_with_status() {
        match check_status(status(408), "{}", None) {
            Err(Error::RequestTimeout { status, .. }) => {
                assert_eq!(status.map(|s| s.as_u16()), Some(408));
            }
            other => panic!("expected RequestTimeout, got {other:?}"),
        }
    }

    #[test]
    fn unmapped_4xx_falls_back_to_client_error() {
        for code in [402, 410, 418, 429, 451] {
            match check_status(status(code), "{}", None) {
                Err(Error::Client { status, .. }) => assert_eq!(status.as_u16(), code),
                other => panic!("expected Client for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn any_5xx_falls_back_to_server_error() {
        for code in [500, 502, 503, 599] {
            match check_status(status(code), "{}", None) {
                Err(Error::Server { status, .. }) => assert_eq!(status.as_u16(), code),
                other => panic!("expected Server for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn success_statuses_pass_through() {
        for code in [200, 201, 204, 299] {
            assert!(check_status(status(code), "", None).is_ok());
        }
    }

    #[test]
    fn detail_extracted_from_error_body() {
        let body = r#"{"detail": "Resource Not Found", "instance": "abc"}"#;
        assert_eq!(
            detail_message(body, None).as_deref(),
            Some("Resource Not Found")
        );
    }

    #[test]
    fn malformed_error_body_does_not_crash_extraction() {
        assert_eq!(detail_message("not json at all", None), None);
        assert_eq!(detail_message("", None), None);
        // Valid JSON, but detail is not a string.
        assert_eq!(detail_message(r#"{"detail": 42}"#, None), None);
    }

    #[test]
    fn fallback_used_when_detail_absent() {
        assert_eq!(
            detail_message(r#"{"title": "oops"}"#, Some("fallback message")).as_deref(),
            Some("fallback message")
        );
        assert_eq!(
            detail_message("garbage", Some("fallback message")).as_deref(),
            Some("fallback message")
        );
        // Body detail wins over the fallback.
        assert_eq!(
            detail_message(r#"{"detail": "from body"}"#, Some("fallback")).as_deref(),
            Some("from body")
        );
    }

    #[test]
    fn name_resolution_text_detection() {
        assert!(looks_like_name_resolution_failure(
            "error sending request: dns error: failed to lookup address information"
        ));
        assert!(looks_like_name_resolution_failure(
            "nodename nor servname provided, or not known"
        ));
        assert!(!looks_like_name_resolution_failure(
            "connection refused (os error 111)"
        ));
    }
}
