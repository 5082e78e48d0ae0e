use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};

use appartmap::clients::geocoder_client::GeocoderClient;
use appartmap::config;
use appartmap::logger::setup_logger;
use appartmap::models::criteria::FilterCriteria;
use appartmap::persistence::{csv, json};
use appartmap::render::{LogSink, RenderSink};
use appartmap::services::enrich::{enrich_missing, GeocodeCache};
use appartmap::services::filter::split_listings;
use appartmap::store::ListingStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let config = config::read_config();

    let csv_path = Path::new(&config.csv_path);
    let raw = std::fs::read_to_string(csv_path)
        .with_context(|| format!("reading {}", csv_path.display()))?;

    let mut store = ListingStore::new();
    store.load_all(csv::parse_csv(&raw));

    let geocoder = GeocoderClient::new(&config);
    let mut cache = GeocodeCache::load(Path::new(&config.cache_path));

    let summary = enrich_missing(&mut store, &geocoder, &mut cache, &config).await;

    if let Err(err) = cache.save() {
        error!("Failed to save the geocode cache: {:?}", err);
    }

    json::write_json_file(Path::new(&config.json_path), store.all())?;
    std::fs::write(csv_path, csv::to_csv(store.all()))
        .with_context(|| format!("writing {}", csv_path.display()))?;

    let outcome = split_listings(store.all(), &FilterCriteria::none());
    let mut sink = LogSink;
    sink.render_markers(&outcome.visible);
    sink.render_unlocated(&outcome.unlocated);

    info!(
        "Wrote {} listings to {} ({} still without coordinates)",
        store.len(),
        config.json_path,
        summary.still_missing
    );

    Ok(())
}
