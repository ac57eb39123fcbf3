//! Fetch metrics for one list and demonstrate error discrimination.
//!
//! Run with:
//! `MAILCHIMP_API_KEY=yourkey-us21 cargo run --example collection_metrics -- <list_id>`

use esp_adapter::{Error, Mailchimp, QueryOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("esp_adapter=info")
        .init();

    let api_key = std::env::var("MAILCHIMP_API_KEY")?;
    let list_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "a354d4c865".to_string());

    let client = Mailchimp::new(api_key)?;
    let options = QueryOptions::new().set("include_total_contacts", true);

    match client.list_metrics(&list_id, &options).await {
        Ok(Some(metrics)) => {
            println!("list {}:", metrics["id"]);
            println!("  members: {}", metrics["stats"]["member_count"]);
        }
        Ok(None) => println!("provider returned an empty body"),
        Err(Error::NotFound { message, .. }) => {
            eprintln!(
                "list {list_id} not found: {}",
                message.as_deref().unwrap_or("no detail")
            );
        }
        Err(Error::Unauthorized { message, .. }) => {
            eprintln!(
                "credentials rejected: {}",
                message.as_deref().unwrap_or("no detail")
            );
        }
        Err(e) => eprintln!("call failed: {e}"),
    }

    Ok(())
}
