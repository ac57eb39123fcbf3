//! Fetch the account's lists with a few query options.
//!
//! Run with: `MAILCHIMP_API_KEY=yourkey-us21 cargo run --example list_collections`

use esp_adapter::{Mailchimp, QueryOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("esp_adapter=debug,list_collections=info")
        .init();

    let api_key = std::env::var("MAILCHIMP_API_KEY")?;
    let client = Mailchimp::new(api_key)?;

    let options = QueryOptions::new()
        .set("count", 10)
        .set("sort_field", "date_created")
        .set("sort_dir", "DESC");

    match client.lists(&options).await? {
        Some(lists) => {
            println!("total lists: {}", lists["total_items"]);
            for list in lists["lists"].as_array().into_iter().flatten() {
                println!("  {} ({})", list["name"], list["id"]);
            }
        }
        None => println!("provider returned an empty body"),
    }

    Ok(())
}
