//! Credential handling: datacenter resolution and Basic-auth encoding.
//!
//! A Mailchimp API key has the shape `<prefix>-<region>`, where the region
//! names the datacenter shard the account lives on. The request endpoint is
//! derived from that region; a key of any other shape resolves to a sentinel
//! region whose host can never be reached, so every call against it fails
//! through normal transport-failure classification rather than an early
//! validation error.

use base64::{engine::general_purpose, Engine as _};

/// Sentinel region for credentials that do not encode a datacenter.
pub(crate) const INVALID_REGION: &str = "invalid-server";

/// Provider API host, prefixed by the datacenter region.
const API_HOST: &str = "api.mailchimp.com";

/// Provider API version segment.
const API_VERSION: &str = "3.0";

/// Fixed user segment of the Basic-auth pair. Mailchimp ignores the user
/// portion; only the key matters.
const BASIC_AUTH_USER: &str = "user";

/// Extracts the datacenter region from an API key.
///
/// Splitting on `-` must yield exactly two segments; the region is the second.
/// Every other shape (no dash, multiple dashes, trailing dash, empty string)
/// yields [`INVALID_REGION`].
pub(crate) fn region(api_key: &str) -> &str {
    let mut segments = api_key.split('-');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(region), None) if !region.is_empty() => region,
        _ => INVALID_REGION,
    }
}

/// Builds the datacenter-specific base URL for an API key.
///
/// Recomputed per request; deriving it is a pair of string splits, not worth
/// caching.
pub(crate) fn endpoint(api_key: &str) -> String {
    format!("https://{}.{}/{}", region(api_key), API_HOST, API_VERSION)
}

/// Encodes the Basic-auth header value for an API key.
///
/// URL-safe base64 of `user:<api_key>`, padding kept.
pub(crate) fn basic_token(api_key: &str) -> String {
    general_purpose::URL_SAFE.encode(format!("{BASIC_AUTH_USER}:{api_key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_from_well_formed_key() {
        assert_eq!(region("TEST-us21"), "us21");
        assert_eq!(region("abc123-eu1"), "eu1");
    }

    #[test]
    fn region_sentinel_for_malformed_keys() {
        // No dash at all.
        assert_eq!(region("invalid_key"), INVALID_REGION);
        // Too many segments.
        assert_eq!(region("a-b-c"), INVALID_REGION);
        // Empty string.
        assert_eq!(region(""), INVALID_REGION);
        // Trailing dash leaves no region to resolve.
        assert_eq!(region("TEST-"), INVALID_REGION);
    }

    #[test]
    fn endpoint_embeds_region() {
        assert_eq!(endpoint("TEST-us21"), "https://us21.api.mailchimp.com/3.0");
    }

    #[test]
    fn endpoint_for_malformed_key_uses_sentinel_host() {
        assert_eq!(
            endpoint("garbage"),
            "https://invalid-server.api.mailchimp.com/3.0"
        );
    }

    #[test]
    fn basic_token_is_deterministic() {
        assert_eq!(basic_token("TEST-us21"), "dXNlcjpURVNULXVzMjE=");
    }
}
