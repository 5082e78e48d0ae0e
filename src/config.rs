use dotenvy::dotenv;
use log::error;
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    pub csv_path: String,
    pub json_path: String,
    pub cache_path: String,
    pub data_url: Option<String>,
    pub geocoder_url: String,
    pub city_hint: String,
    // "left,top,right,bottom" in degrees; bounds every geocoding query
    pub viewbox: String,
    pub country_codes: String,
    pub language: String,
    pub max_distance_km: f64,
    pub geocode_delay_seconds: u64,
    pub submit_interval_ms: u64,
    pub issue_repo_url: Option<String>,
}

pub fn create_test_config() -> Config {
    Config {
        csv_path: "data/apartments.csv".to_string(),
        json_path: "data/apartments.json".to_string(),
        cache_path: "data/.geocode_cache.json".to_string(),
        data_url: None,
        geocoder_url: "https://nominatim.openstreetmap.org/search".to_string(),
        city_hint: "Montpellier, France".to_string(),
        viewbox: "3.75,43.72,4.05,43.53".to_string(),
        country_codes: "fr".to_string(),
        language: "fr".to_string(),
        max_distance_km: 30.0,
        geocode_delay_seconds: 1,
        submit_interval_ms: 1200,
        issue_repo_url: None,
    }
}

pub fn read_config() -> Config {
    dotenv().ok();
    env::var(CONFIG_PATH_ENV)
        .map_err(|_| format!("{CONFIG_PATH_ENV} .env not set"))
        .and_then(|config_path| std::fs::read(config_path).map_err(|e| e.to_string()))
        .and_then(|bytes| toml::from_slice(&bytes).map_err(|e| e.to_string()))
        .unwrap_or_else(|err| {
            error!("failed to read config: {err}");
            std::process::exit(1);
        })
}
