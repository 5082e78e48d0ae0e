use log::{error, warn};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::config::Config;

const USER_AGENT: &str = "appartmap/0.1 (+https://github.com/appartmap)";

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Search rectangle, `left,top,right,bottom` in degrees
/// (lon_min, lat_max, lon_max, lat_min).
#[derive(Debug, Clone, Copy)]
pub struct Viewbox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Viewbox {
    pub fn parse(raw: &str) -> Option<Viewbox> {
        let parts: Vec<f64> = raw
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .ok()?;
        match parts.as_slice() {
            [left, top, right, bottom] => Some(Viewbox {
                left: *left,
                top: *top,
                right: *right,
                bottom: *bottom,
            }),
            _ => None,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.top + self.bottom) / 2.0, (self.left + self.right) / 2.0)
    }

    pub fn as_param(&self) -> String {
        format!("{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

/// One result row of the lookup service; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
}

/// Address-lookup adapter. Every query is restricted to a fixed country and
/// bounding box so free-text input cannot match outside the target region.
///
/// Zero results, a non-success response, and any network or decode failure
/// all collapse to `None`; callers cannot and must not distinguish them.
#[derive(Debug)]
pub struct GeocoderClient {
    client: reqwest::Client,
    endpoint: String,
    language: String,
    country_codes: String,
    viewbox: Option<Viewbox>,
    max_distance_km: f64,
}

impl GeocoderClient {
    pub fn new(config: &Config) -> GeocoderClient {
        let viewbox = Viewbox::parse(&config.viewbox);
        if viewbox.is_none() {
            warn!(
                "Invalid viewbox '{}', geocoding will run unbounded",
                config.viewbox
            );
        }
        GeocoderClient {
            client: reqwest::Client::new(),
            endpoint: config.geocoder_url.clone(),
            language: config.language.clone(),
            country_codes: config.country_codes.clone(),
            viewbox,
            max_distance_km: config.max_distance_km,
        }
    }

    /// Resolves a free-text query to the highest-ranked match, if any.
    pub async fn geocode(&self, query: &str) -> Option<Coordinates> {
        let response: Result<Vec<Place>, reqwest::Error> = self.fetch_places(query).await;

        let places = match response {
            Ok(p) => p,
            Err(e) => {
                error!("Error while querying the geocoding service: {}", e);
                return None;
            }
        };

        let coordinates = first_coordinates(&places)?;

        if let Some(viewbox) = &self.viewbox {
            if self.max_distance_km > 0.0 {
                let (center_lat, center_lon) = viewbox.center();
                let distance =
                    haversine_km(center_lat, center_lon, coordinates.lat, coordinates.lon);
                if distance > self.max_distance_km {
                    warn!(
                        "'{}' resolved {:.1} km from the search area, rejected",
                        query, distance
                    );
                    return None;
                }
            }
        }

        Some(coordinates)
    }

    async fn fetch_places(&self, query: &str) -> Result<Vec<Place>, reqwest::Error> {
        let viewbox_param = self.viewbox.as_ref().map(|v| v.as_param());

        let mut params: Vec<(&str, &str)> = vec![
            ("format", "jsonv2"),
            ("accept-language", &self.language),
            ("countrycodes", &self.country_codes),
            ("limit", "1"),
            ("q", query),
        ];
        if let Some(viewbox) = viewbox_param.as_deref() {
            params.push(("viewbox", viewbox));
            params.push(("bounded", "1"));
        }

        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .headers(headers)
            .send()
            .await?;

        let places: Vec<Place> = response.error_for_status()?.json().await?;

        Ok(places)
    }
}

/// First result only; unparseable or non-finite coordinates count as no
/// result.
pub fn first_coordinates(places: &[Place]) -> Option<Coordinates> {
    let place = places.first()?;
    let lat = place.lat.trim().parse::<f64>().ok()?;
    let lon = place.lon.trim().parse::<f64>().ok()?;
    if lat.is_finite() && lon.is_finite() {
        Some(Coordinates { lat, lon })
    } else {
        None
    }
}

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
