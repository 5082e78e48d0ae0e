use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::clients::geocoder_client::{Coordinates, GeocoderClient};
use crate::config::Config;
use crate::store::ListingStore;

/// Disk-backed memo of geocoding answers, keyed by the full query context.
/// Misses are cached alongside hits; a re-run never re-asks a known-dead
/// query.
#[derive(Debug)]
pub struct GeocodeCache {
    path: PathBuf,
    entries: HashMap<String, Option<Coordinates>>,
}

impl GeocodeCache {
    pub fn load(path: &Path) -> GeocodeCache {
        let entries = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();

        GeocodeCache {
            path: path.to_path_buf(),
            entries,
        }
    }

    pub fn key(query: &str, viewbox: &str, country_codes: &str) -> String {
        format!("{}|{}|{}", query, viewbox, country_codes)
            .trim()
            .to_lowercase()
    }

    pub fn get(&self, key: &str) -> Option<&Option<Coordinates>> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: String, value: Option<Coordinates>) {
        self.entries.insert(key, value);
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EnrichSummary {
    pub resolved: usize,
    pub from_cache: usize,
    pub still_missing: usize,
    pub remote_calls: usize,
}

/// Fills in missing coordinates across the whole store, in order.
///
/// Listings that are already located or have nothing to ask with are left
/// untouched. Remote calls are spaced by the configured delay; that spacing
/// is the lookup service's usage contract, not a retry mechanism. A failed
/// lookup is simply recorded as missing.
pub async fn enrich_missing(
    store: &mut ListingStore,
    geocoder: &GeocoderClient,
    cache: &mut GeocodeCache,
    config: &Config,
) -> EnrichSummary {
    let mut summary = EnrichSummary::default();
    let delay = Duration::from_secs(config.geocode_delay_seconds);

    for listing in store.listings_mut() {
        if listing.is_located() {
            continue;
        }

        let query = match listing.geocode_query(&config.city_hint) {
            Some(query) => query,
            None => {
                summary.still_missing += 1;
                continue;
            }
        };
        let key = GeocodeCache::key(&query, &config.viewbox, &config.country_codes);

        let coordinates: Option<Coordinates> = match cache.get(&key) {
            Some(cached) => {
                summary.from_cache += 1;
                *cached
            }
            None => {
                if summary.remote_calls > 0 {
                    tokio::time::sleep(delay).await;
                }
                summary.remote_calls += 1;
                let mut found = geocoder.geocode(&query).await;

                // Second attempt on the quartier label when the address
                // itself resolves nowhere.
                if found.is_none() && !query.to_lowercase().contains("quartier") {
                    if let Some(retry_query) = listing.label_query(&config.city_hint) {
                        tokio::time::sleep(delay).await;
                        summary.remote_calls += 1;
                        found = geocoder.geocode(&retry_query).await;
                    }
                }

                cache.put(key, found);
                found
            }
        };

        match coordinates {
            Some(c) => {
                listing.latitude = Some(c.lat);
                listing.longitude = Some(c.lon);
                summary.resolved += 1;
            }
            None => {
                warn!("No geocoding result for '{}'", query);
                summary.still_missing += 1;
            }
        }
    }

    info!(
        "Enrichment done: {} resolved ({} from cache), {} still missing, {} remote calls",
        summary.resolved, summary.from_cache, summary.still_missing, summary.remote_calls
    );

    summary
}
