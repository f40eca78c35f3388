use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Coordinates, Suggestion};

/// Errors that can occur when querying the geocoding service
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// One address-search hit; Nominatim sends coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.lat.parse().ok()?;
        let lon = self.lon.parse().ok()?;
        Some(Coordinates::new(lat, lon))
    }
}

/// Client for the Nominatim-style address search endpoint
///
/// Issues unauthenticated lookups restricted to a single country and maps
/// each hit to a Suggestion carrying coordinates. The service requires a
/// descriptive User-Agent on every request.
pub struct GeocodeClient {
    base_url: String,
    user_agent: String,
    country_codes: String,
    limit: u8,
    client: Client,
}

impl GeocodeClient {
    /// Create a new geocoding client
    pub fn new(
        base_url: String,
        user_agent: String,
        country_codes: String,
        limit: u8,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            user_agent,
            country_codes,
            limit,
            client,
        }
    }

    /// Search addresses matching the free-text query
    ///
    /// Only `display_name`, `lat`, and `lon` are consumed from the
    /// response. A hit whose coordinates fail to parse is dropped on its
    /// own; the rest of the batch is still returned.
    pub async fn search(&self, text: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        let url = format!(
            "{}/search?format=json&q={}&addressdetails=1&limit={}&countrycodes={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(text),
            self.limit,
            self.country_codes
        );

        tracing::debug!("Address lookup: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Address search failed: {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await?;

        let suggestions = places
            .into_iter()
            .filter_map(|place| match place.coordinates() {
                Some(coordinates) => Some(Suggestion {
                    label: place.display_name.clone(),
                    value: place.display_name,
                    sublabel: None,
                    coordinates: Some(coordinates),
                }),
                None => {
                    tracing::warn!(
                        "Dropping address hit with unparseable coordinates: {}",
                        place.display_name
                    );
                    None
                }
            })
            .collect();

        Ok(suggestions)
    }
}
