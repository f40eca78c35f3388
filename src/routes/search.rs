use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::criteria::{SearchCriteria, SearchMode};
use crate::core::evaluator::evaluate;
use crate::models::{
    ErrorResponse, HealthResponse, ProviderDetailResponse, SearchRequest, SearchResponse,
    SuggestParams, SuggestResponse, Suggestion,
};
use crate::services::catalog::ProviderCatalog;
use crate::services::geocoder::GeocodeClient;
use crate::suggest::source::{GeocodeSource, LocalSource, SuggestionSource};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ProviderCatalog>,
    pub provider_names: Arc<LocalSource>,
    pub agency_names: Arc<LocalSource>,
    pub area_labels: Arc<LocalSource>,
    pub geocoder: Arc<GeocodeSource>,
}

impl AppState {
    /// Build the shared state, deriving the local suggestion lists from
    /// the catalog once at startup
    pub fn new(catalog: Arc<dyn ProviderCatalog>, geocoder: Arc<GeocodeClient>) -> Self {
        let provider_names = Arc::new(LocalSource::provider_names(catalog.as_ref()));
        let agency_names = Arc::new(LocalSource::agency_names(catalog.as_ref()));
        let area_labels = Arc::new(LocalSource::area_labels(catalog.as_ref()));

        Self {
            catalog,
            provider_names,
            agency_names,
            area_labels,
            geocoder: Arc::new(GeocodeSource::new(geocoder)),
        }
    }
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search))
        .route("/suggest", web::get().to(suggest))
        .route("/providers/{id}", web::get().to(provider_detail));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Provider search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "mode": "nearby",
///   "text": "Downtown, Calgary, Alberta",
///   "origin": { "lat": 51.0447, "lon": -114.0719 },
///   "maxDistanceKm": 10,
///   "filters": { "types": ["Preschool"], "spotsOnly": true }
/// }
/// ```
async fn search(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let mut criteria = SearchCriteria::new(req.mode);
    match req.mode {
        SearchMode::Nearby => {
            criteria.set_text(&req.text);
            criteria.set_max_distance_km(req.max_distance_km);
            if let Some(origin) = req.origin {
                // Origin is only sent when a geocoded suggestion was
                // selected for the current text
                criteria.choose_suggestion(&Suggestion {
                    label: req.text.clone(),
                    value: req.text.clone(),
                    sublabel: None,
                    coordinates: Some(origin),
                });
            }
        }
        SearchMode::ProvinceCity => {
            criteria.set_province(req.province.as_deref());
            criteria.set_city(req.city.as_deref());
            criteria.set_community(req.community.as_deref());
        }
        SearchMode::Agency | SearchMode::Name => {
            criteria.set_text(&req.text);
        }
    }

    let query = criteria.resolve();
    let outcome = evaluate(&query, &req.filters, state.catalog.as_ref());

    tracing::info!(
        "Search returned {} of {} providers",
        outcome.providers.len(),
        outcome.total_candidates
    );

    HttpResponse::Ok().json(SearchResponse {
        total_results: outcome.providers.len(),
        total_candidates: outcome.total_candidates,
        providers: outcome.providers,
    })
}

/// Suggestion endpoint
///
/// GET /api/v1/suggest?mode=nearby&text=downtown
///
/// Source failures resolve to an empty list; they show up in logs, never
/// in the response.
async fn suggest(state: web::Data<AppState>, params: web::Query<SuggestParams>) -> impl Responder {
    if let Err(errors) = params.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if params.text.trim().is_empty() {
        return HttpResponse::Ok().json(SuggestResponse {
            suggestions: Vec::new(),
        });
    }

    let source: &dyn SuggestionSource = match params.mode {
        SearchMode::Nearby => state.geocoder.as_ref(),
        SearchMode::ProvinceCity => state.area_labels.as_ref(),
        SearchMode::Agency => state.agency_names.as_ref(),
        SearchMode::Name => state.provider_names.as_ref(),
    };

    let suggestions = match source.suggest(&params.text).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            tracing::warn!("Suggestion source '{}' failed: {}", source.name(), err);
            Vec::new()
        }
    };

    HttpResponse::Ok().json(SuggestResponse { suggestions })
}

/// Provider detail endpoint
///
/// GET /api/v1/providers/{id}
///
/// Joins the provider with its address, agency, and availability slots.
async fn provider_detail(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let provider_id = path.into_inner();

    let provider = state
        .catalog
        .providers()
        .iter()
        .find(|provider| provider.id == provider_id);

    match provider {
        Some(provider) => {
            let address = state.catalog.address_of(provider_id).cloned();
            let agency = provider
                .agency_id
                .and_then(|id| state.catalog.agency_of(id))
                .cloned();
            let slots = state.catalog.slots_of(provider_id).to_vec();

            HttpResponse::Ok().json(ProviderDetailResponse {
                provider: provider.clone(),
                address,
                agency,
                slots,
            })
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Provider not found".to_string(),
            message: format!("No provider with id {}", provider_id),
            status_code: 404,
        }),
    }
}
