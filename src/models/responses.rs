use serde::{Deserialize, Serialize};

use crate::models::domain::{Address, Agency, AvailabilitySlot, Provider, Suggestion};

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub providers: Vec<Provider>,
    pub total_results: usize,
    pub total_candidates: usize,
}

/// Response for the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Provider detail joined with its related records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDetailResponse {
    pub provider: Provider,
    pub address: Option<Address>,
    pub agency: Option<Agency>,
    pub slots: Vec<AvailabilitySlot>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
