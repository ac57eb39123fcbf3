//! The Mailchimp adapter: transport plumbing plus the public operations.
//!
//! [`Mailchimp`] is the main entry point. Use [`Mailchimp::new`] for the
//! defaults or [`Mailchimp::builder`] to adjust timeouts, the retry policy,
//! or the payload codec. The adapter is cheap to clone and safe to share
//! across tasks: the credential and configuration are read-only after
//! construction and every per-request value is call-local.

use http::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::codec::{decode_body, JsonCodec, PayloadCodec};
use crate::error::{Error, Result};
use crate::options::{QueryOptions, LISTS_ALLOWED, LIST_METRICS_ALLOWED};
use crate::retry::RetryPolicy;
use crate::{classify, credential};

/// Default total-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default connection-establish deadline.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport timeouts for the adapter.
///
/// `timeout` bounds the whole request, `write_timeout` bounds connection
/// establishment. Both default to 60 seconds and are immutable once the
/// adapter is built.
///
/// # Examples
///
/// ```
/// use esp_adapter::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     timeout: Duration::from_secs(10),
///     ..ClientConfig::default()
/// };
/// assert_eq!(config.write_timeout, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClientConfig {
    /// Deadline for the complete request, connect included.
    pub timeout: Duration,
    /// Deadline for establishing the connection.
    pub write_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

/// Client adapter for the Mailchimp marketing API.
///
/// # Examples
///
/// ```no_run
/// use esp_adapter::{Mailchimp, QueryOptions};
///
/// # async fn example() -> Result<(), esp_adapter::Error> {
/// let client = Mailchimp::new("TEST-us21")?;
///
/// let lists = client.lists(&QueryOptions::new().set("count", 10)).await?;
/// if let Some(lists) = lists {
///     println!("{}", lists["total_items"]);
/// }
///
/// let metrics = client
///     .list_metrics("a354d4c865", &QueryOptions::new())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Mailchimp {
    inner: Arc<MailchimpInner>,
}

struct MailchimpInner {
    api_key: String,
    http: reqwest::Client,
    codec: Box<dyn PayloadCodec>,
    retry: RetryPolicy,
    /// Overrides credential-derived endpoint resolution; used to point the
    /// adapter at a stub server in tests.
    base_url: Option<String>,
}

impl Mailchimp {
    /// Creates an adapter with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the underlying HTTP client cannot
    /// be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Creates an adapter with explicit timeouts.
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Self::builder(api_key).config(config).build()
    }

    /// Creates a [`MailchimpBuilder`] for further configuration.
    pub fn builder(api_key: impl Into<String>) -> MailchimpBuilder {
        MailchimpBuilder::new(api_key)
    }

    /// Fetches the account's lists.
    ///
    /// Issues `GET /lists`. Recognized options: `fields`, `exclude_fields`,
    /// `count`, `offset`, `before_date_created`, `since_date_created`,
    /// `before_campaign_last_sent`, `since_campaign_last_sent`, `email`,
    /// `sort_field`, `sort_dir`, `has_ecommerce_store`,
    /// `include_total_contacts`. Anything else in `options` is dropped.
    ///
    /// Returns the parsed response body verbatim, or `None` if the provider
    /// sent an empty body.
    pub async fn lists(&self, options: &QueryOptions) -> Result<Option<Value>> {
        self.call("lists", options, LISTS_ALLOWED).await
    }

    /// Fetches metrics for a single list.
    ///
    /// Issues `GET /lists/{list_id}`. Recognized options: `fields`,
    /// `exclude_fields`, `include_total_contacts`.
    pub async fn list_metrics(
        &self,
        list_id: &str,
        options: &QueryOptions,
    ) -> Result<Option<Value>> {
        self.call(&format!("lists/{list_id}"), options, LIST_METRICS_ALLOWED)
            .await
    }

    /// Runs one logical call under the retry policy.
    ///
    /// The whole operation re-runs from scratch on a retried attempt, query
    /// filtering included; these operations are read-only so re-execution is
    /// safe. The attempt counter is call-local.
    async fn call(
        &self,
        path: &str,
        options: &QueryOptions,
        allowed: &[&str],
    ) -> Result<Option<Value>> {
        let mut attempt = 0;
        loop {
            let pairs = options.query_pairs(allowed);
            match self.execute(path, &pairs).await {
                Ok(result) => return Ok(result),
                Err(error) if self.inner.retry.should_retry(&error, attempt) => {
                    attempt += 1;
                    tracing::warn!(
                        error = %error,
                        attempt,
                        path,
                        "timeout-classified failure, re-running call"
                    );
                }
                Err(error) => {
                    tracing::warn!(error = %error, path, "provider call failed");
                    return Err(error);
                }
            }
        }
    }

    /// One request attempt: resolve endpoint, send, classify, decode.
    async fn execute(&self, path: &str, pairs: &[(String, String)]) -> Result<Option<Value>> {
        let url = self.request_url(path, pairs)?;

        tracing::debug!(%url, "dispatching GET to provider");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(classify::transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(classify::transport_error)?;

        classify::check_status(status, &body, None)?;
        decode_body(self.inner.codec.as_ref(), &body)
    }

    /// Builds the full request URL for one attempt.
    ///
    /// The endpoint is recomputed from the credential on every request; a
    /// malformed credential yields the sentinel region and therefore a host
    /// that fails at the network layer, not here.
    fn request_url(&self, path: &str, pairs: &[(String, String)]) -> Result<Url> {
        let base = match &self.inner.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => credential::endpoint(&self.inner.api_key),
        };

        let mut url = Url::parse(&format!("{base}/{path}")).map_err(|e| Error::Connection {
            message: format!("endpoint is not a valid URL: {e}"),
        })?;

        for (name, value) in pairs {
            url.query_pairs_mut().append_pair(name, value);
        }

        Ok(url)
    }
}

/// Builder for configuring and creating a [`Mailchimp`] adapter.
///
/// # Examples
///
/// ```no_run
/// use esp_adapter::{Mailchimp, RetryPolicy};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), esp_adapter::Error> {
/// let client = Mailchimp::builder("TEST-us21")
///     .timeout(Duration::from_secs(30))
///     .retry_policy(RetryPolicy::new(0))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct MailchimpBuilder {
    api_key: String,
    config: ClientConfig,
    retry: RetryPolicy,
    codec: Option<Box<dyn PayloadCodec>>,
    base_url: Option<String>,
}

impl MailchimpBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            config: ClientConfig::default(),
            retry: RetryPolicy::default(),
            codec: None,
            base_url: None,
        }
    }

    /// Sets both timeouts at once.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the total-request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the connection-establish deadline.
    pub fn write_timeout(mut self, write_timeout: Duration) -> Self {
        self.config.write_timeout = write_timeout;
        self
    }

    /// Sets the retry policy. Defaults to one retry on timeout.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Injects a payload codec. Defaults to [`JsonCodec`].
    pub fn codec(mut self, codec: Box<dyn PayloadCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Overrides the credential-derived endpoint with a fixed base URL.
    ///
    /// Intended for pointing the adapter at a stub server in tests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the URL does not parse.
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        Url::parse(base_url.as_ref())
            .map_err(|e| Error::Configuration(format!("invalid base URL: {e}")))?;
        self.base_url = Some(base_url.as_ref().to_string());
        Ok(self)
    }

    /// Builds the configured [`Mailchimp`] adapter.
    pub fn build(self) -> Result<Mailchimp> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let token = credential::basic_token(&self.api_key);
        let auth = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|e| Error::Configuration(format!("invalid authorization header: {e}")))?;
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout)
            .connect_timeout(self.config.write_timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Mailchimp {
            inner: Arc::new(MailchimpInner {
                api_key: self.api_key,
                http,
                codec: self.codec.unwrap_or_else(|| Box::new(JsonCodec)),
                retry: self.retry,
                base_url: self.base_url,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_derives_endpoint_from_credential() {
        let client = Mailchimp::new("TEST-us21").unwrap();
        let url = client.request_url("lists", &[]).unwrap();
        assert_eq!(url.as_str(), "https://us21.api.mailchimp.com/3.0/lists");
    }

    #[test]
    fn request_url_appends_query_pairs() {
        let client = Mailchimp::new("TEST-us21").unwrap();
        let pairs = vec![
            ("count".to_string(), "10".to_string()),
            ("email".to_string(), "user@example.com".to_string()),
        ];
        let url = client.request_url("lists", &pairs).unwrap();
        assert_eq!(
            url.as_str(),
            "https://us21.api.mailchimp.com/3.0/lists?count=10&email=user%40example.com"
        );
    }

    #[test]
    fn request_url_with_malformed_credential_targets_sentinel_host() {
        let client = Mailchimp::new("no_dashes_here").unwrap();
        let url = client.request_url("lists", &[]).unwrap();
        assert_eq!(
            url.host_str(),
            Some("invalid-server.api.mailchimp.com")
        );
    }

    #[test]
    fn base_url_override_replaces_endpoint_resolution() {
        let client = Mailchimp::builder("TEST-us21")
            .base_url("http://127.0.0.1:9999/")
            .unwrap()
            .build()
            .unwrap();
        let url = client.request_url("lists", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9999/lists");
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let result = Mailchimp::builder("TEST-us21").base_url("not a url");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn config_defaults_are_sixty_seconds() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.write_timeout, Duration::from_secs(60));
    }
}
