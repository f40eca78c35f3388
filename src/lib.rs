//! PAC Search - Provider search service for the PAC childcare directory
//!
//! This library powers the search page of the childcare provider directory.
//! It implements a staged filtering pipeline over the provider catalog and
//! the location suggestion subsystem backing the search box.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod suggest;

// Re-export commonly used types
pub use crate::core::{evaluate, SearchCriteria, SearchMode, SearchOutcome, distance::{distance_km, calculate_bounding_box}};
pub use crate::models::{Provider, Address, Agency, Coordinates, SearchQuery, FilterState, Suggestion, SearchRequest, SearchResponse};
pub use crate::suggest::{SuggestPhase, SuggestSession, SuggestionSource};
