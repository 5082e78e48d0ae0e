use chrono::Utc;
use log::{error, info};

use crate::models::listing::Listing;

/// Fetches the bulk JSON data source. The `t` parameter defeats intermediate
/// caches so a curation session always sees the latest published data.
///
/// A missing, malformed, or non-array payload degrades to an empty
/// collection; there is no partial recovery.
pub async fn fetch_listings(data_url: &str) -> Vec<Listing> {
    let listings: Result<Vec<Listing>, reqwest::Error> = fetch(data_url).await;

    match listings {
        Ok(listings) => {
            info!("Fetched {} listings from {}", listings.len(), data_url);
            listings
        }
        Err(e) => {
            error!("Error while fetching listings from {}: {}", data_url, e);
            Vec::new()
        }
    }
}

async fn fetch(data_url: &str) -> Result<Vec<Listing>, reqwest::Error> {
    let client: reqwest::Client = reqwest::Client::new();

    let stamp = Utc::now().timestamp_millis().to_string();
    let params: Vec<(&str, &str)> = vec![("t", &stamp)];

    let response = client.get(data_url).query(&params).send().await?;
    let listings: Vec<Listing> = response.error_for_status()?.json().await?;

    Ok(listings)
}
