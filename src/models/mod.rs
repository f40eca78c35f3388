// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Address, Agency, AvailabilitySlot, BoundingBox, Coordinates, FilterState, MealOption,
    Provider, ProviderType, SearchQuery, Suggestion,
};
pub use requests::{SearchRequest, SuggestParams};
pub use responses::{
    ErrorResponse, HealthResponse, ProviderDetailResponse, SearchResponse, SuggestResponse,
};
