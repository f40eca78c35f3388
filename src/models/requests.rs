use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::criteria::SearchMode;
use crate::models::domain::{Coordinates, FilterState};

/// Request to run a provider search
///
/// Carries the raw widget state for the selected mode; the handler feeds
/// it through the criteria resolver, so no field here is trusted as
/// already normalized.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    pub mode: SearchMode,
    #[validate(length(max = 512))]
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub origin: Option<Coordinates>,
    #[serde(alias = "max_distance_km", rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub community: Option<String>,
    #[serde(default)]
    pub filters: FilterState,
}

/// Query parameters for the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestParams {
    pub mode: SearchMode,
    #[validate(length(max = 512))]
    #[serde(default)]
    pub text: String,
}
