//! Payload decoding behind an injectable codec seam.
//!
//! The adapter never calls the JSON parser directly; it goes through the
//! [`PayloadCodec`] trait so tests can substitute a codec. Decoding follows
//! two deliberate rules: an empty body is an absent result, not an error, and
//! a malformed body is reported as a generic server error so parser internals
//! never leak to callers.

use serde_json::Value;

use crate::error::{Error, Result};
use http::StatusCode;

/// Message callers see when a response body fails structured parsing.
pub(crate) const DECODE_MASK_MESSAGE: &str = "Something went wrong!";

/// A pluggable parser for response payloads.
///
/// One capability: turn body text into a JSON-like value or fail with
/// [`Error::Decode`].
pub trait PayloadCodec: Send + Sync {
    /// Parses a response body into a structured value.
    fn parse(&self, body: &str) -> Result<Value>;
}

/// The default codec, backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PayloadCodec for JsonCodec {
    fn parse(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: e.to_string(),
        })
    }
}

/// Decodes a successful response body.
///
/// Empty or whitespace-only bodies decode to `None`. A body the codec cannot
/// parse becomes [`Error::Server`] with status 500 and
/// [`DECODE_MASK_MESSAGE`]; anything else is returned verbatim.
pub(crate) fn decode_body(codec: &dyn PayloadCodec, body: &str) -> Result<Option<Value>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    match codec.parse(body) {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(Error::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some(DECODE_MASK_MESSAGE.to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_is_absent_not_an_error() {
        assert_eq!(decode_body(&JsonCodec, "").unwrap(), None);
        assert_eq!(decode_body(&JsonCodec, "  \n").unwrap(), None);
    }

    #[test]
    fn valid_body_is_returned_verbatim() {
        let body = r#"{"lists": [{"id": "a1"}], "total_items": 1}"#;
        let decoded = decode_body(&JsonCodec, body).unwrap();
        assert_eq!(
            decoded,
            Some(json!({"lists": [{"id": "a1"}], "total_items": 1}))
        );
    }

    #[test]
    fn malformed_body_is_masked_as_server_error() {
        match decode_body(&JsonCodec, "{not json") {
            Err(Error::Server { status, message }) => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message.as_deref(), Some(DECODE_MASK_MESSAGE));
            }
            other => panic!("expected masked Server error, got {other:?}"),
        }
    }

    #[test]
    fn raw_codec_reports_decode_errors() {
        match JsonCodec.parse("][") {
            Err(Error::Decode { .. }) => {}
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn injected_codec_is_honored() {
        struct RejectEverything;
        impl PayloadCodec for RejectEverything {
            fn parse(&self, _body: &str) -> Result<Value> {
                Err(Error::Decode {
                    message: "nope".to_string(),
                })
            }
        }

        match decode_body(&RejectEverything, r#"{"fine": true}"#) {
            Err(Error::Server { status, .. }) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected masked Server error, got {other:?}"),
        }
    }
}
