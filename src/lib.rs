//! # esp-adapter - a typed Mailchimp client adapter
//!
//! A small client adapter for the Mailchimp marketing API, built on top of
//! `reqwest`. It provides a uniform calling convention over the raw HTTP
//! surface: endpoint resolution from the API key, Basic-auth encoding, a
//! closed taxonomy of classified errors, lenient payload decoding, and a
//! single bounded retry on transient timeouts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use esp_adapter::{Mailchimp, QueryOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), esp_adapter::Error> {
//!     let client = Mailchimp::new("YOUR_KEY-us21")?;
//!
//!     // List the account's audiences.
//!     let lists = client
//!         .lists(&QueryOptions::new().set("count", 10))
//!         .await?;
//!     if let Some(lists) = lists {
//!         println!("lists: {}", lists["total_items"]);
//!     }
//!
//!     // Metrics for one audience.
//!     let metrics = client
//!         .list_metrics("a354d4c865", &QueryOptions::new().set("fields", "stats"))
//!         .await?;
//!     println!("metrics: {metrics:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is one of the [`Error`] variants, carrying the HTTP status
//! (when one was received) and a message drawn from the provider's `detail`
//! field:
//!
//! ```no_run
//! use esp_adapter::{Error, Mailchimp, QueryOptions};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Mailchimp::new("YOUR_KEY-us21")?;
//! match client.list_metrics("a354d4c865", &QueryOptions::new()).await {
//!     Ok(metrics) => println!("{metrics:?}"),
//!     Err(Error::NotFound { message, .. }) => {
//!         eprintln!("no such list: {}", message.as_deref().unwrap_or("no detail"));
//!     }
//!     Err(Error::Unauthorized { message, .. }) => {
//!         eprintln!("check your API key: {}", message.as_deref().unwrap_or("no detail"));
//!     }
//!     Err(e) => eprintln!("call failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A malformed API key does not fail fast: it resolves to a sentinel
//! datacenter whose host cannot be reached, and the resulting name-resolution
//! failure is reported as [`Error::Unauthorized`] — connection failure is the
//! actual symptom of a bad credential.
//!
//! ## Retry Behavior
//!
//! Exactly one immediate re-attempt when a call classifies as a request
//! timeout (an HTTP 408 or a transport deadline expiry); every other failure
//! propagates at once. Adjust with [`RetryPolicy`]:
//!
//! ```no_run
//! use esp_adapter::{Mailchimp, RetryPolicy};
//!
//! # fn example() -> Result<(), esp_adapter::Error> {
//! let client = Mailchimp::builder("YOUR_KEY-us21")
//!     .retry_policy(RetryPolicy::new(0)) // disable the retry
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod classify;
mod client;
mod codec;
mod credential;
mod error;
mod options;
pub mod retry;

pub use client::{ClientConfig, Mailchimp, MailchimpBuilder, DEFAULT_TIMEOUT, DEFAULT_WRITE_TIMEOUT};
pub use codec::{JsonCodec, PayloadCodec};
pub use error::{Error, Result};
pub use options::QueryOptions;
pub use retry::RetryPolicy;
