//! Caller-supplied query options and per-operation allow-lists.
//!
//! Each public operation forwards only the option names on its allow-list;
//! anything else is silently dropped. Keys absent from the map are simply
//! omitted from the outgoing request, never sent as null or empty.

use serde_json::Value;
use std::collections::HashMap;

/// Option names forwarded by [`crate::Mailchimp::lists`].
pub(crate) const LISTS_ALLOWED: &[&str] = &[
    "fields",
    "exclude_fields",
    "count",
    "offset",
    "before_date_created",
    "since_date_created",
    "before_campaign_last_sent",
    "since_campaign_last_sent",
    "email",
    "sort_field",
    "sort_dir",
    "has_ecommerce_store",
    "include_total_contacts",
];

/// Option names forwarded by [`crate::Mailchimp::list_metrics`].
pub(crate) const LIST_METRICS_ALLOWED: &[&str] =
    &["fields", "exclude_fields", "include_total_contacts"];

/// A map of query options for a single call.
///
/// Values are JSON-like: strings go on the wire verbatim, numbers and
/// booleans via their JSON rendering. Order is irrelevant.
///
/// # Examples
///
/// ```
/// use esp_adapter::QueryOptions;
///
/// let opts = QueryOptions::new()
///     .set("count", 10)
///     .set("email", "user@example.com")
///     .set("has_ecommerce_store", true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    values: HashMap<String, Value>,
}

impl QueryOptions {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, replacing any previous value for the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the options recognized by `allowed` as query pairs.
    ///
    /// Unrecognized names and explicit nulls are dropped.
    pub(crate) fn query_pairs(&self, allowed: &[&str]) -> Vec<(String, String)> {
        allowed
            .iter()
            .filter_map(|&name| {
                let value = self.values.get(name)?;
                let rendered = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((name.to_string(), rendered))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
