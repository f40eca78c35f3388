use crate::core::distance::{calculate_bounding_box, is_within_bounding_box};
use crate::core::filters::{
    matches_age_groups, matches_availability_flags, matches_location, matches_meal_options,
    matches_schedule_options, matches_type,
};
use crate::models::{FilterState, Provider, SearchQuery};
use crate::services::catalog::ProviderCatalog;

/// Result of evaluating one search
#[derive(Debug)]
pub struct SearchOutcome {
    pub providers: Vec<Provider>,
    pub total_candidates: usize,
}

/// Evaluate a search query and facet filters over the catalog
///
/// Inclusion is the AND of the location predicate and the five facet
/// predicates; there is no scoring or re-ordering, so the result keeps
/// catalog iteration order.
///
/// # Pipeline Stages
/// 1. Geospatial bounding box pre-filter (geographic Nearby queries only)
/// 2. Location predicate for the query's mode
/// 3. Facet predicates from the filter state
pub fn evaluate(
    query: &SearchQuery,
    filters: &FilterState,
    catalog: &dyn ProviderCatalog,
) -> SearchOutcome {
    let candidates = catalog.providers();
    let total_candidates = candidates.len();

    // The box strictly contains the radius circle, so the pre-filter can
    // only discard providers the exact check would also discard
    let bounding_box = match query {
        SearchQuery::Nearby {
            origin: Some(origin),
            max_distance_km: Some(threshold),
            ..
        } => Some(calculate_bounding_box(*origin, *threshold)),
        _ => None,
    };

    let providers: Vec<Provider> = candidates
        .iter()
        // Stage 1: cheap bounding-box pre-filter before any haversine math
        .filter(|provider| match &bounding_box {
            Some(bbox) => catalog
                .address_of(provider.id)
                .map(|address| is_within_bounding_box(address.coordinates, bbox))
                .unwrap_or(false),
            None => true,
        })
        // Stage 2: location predicate
        .filter(|provider| {
            let address = catalog.address_of(provider.id);
            let agency = provider.agency_id.and_then(|id| catalog.agency_of(id));
            matches_location(provider, address, agency, query)
        })
        // Stage 3: independent facet predicates
        .filter(|provider| matches_type(provider, &filters.types))
        .filter(|provider| matches_age_groups(provider, &filters.age_groups))
        .filter(|provider| matches_meal_options(provider, &filters.meal_options))
        .filter(|provider| matches_schedule_options(provider, &filters.schedule_options))
        .filter(|provider| {
            matches_availability_flags(provider, filters.spots_only, filters.registered_only)
        })
        .cloned()
        .collect();

    SearchOutcome {
        providers,
        total_candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Coordinates, MealOption, ProviderType};
    use crate::services::catalog::{CatalogData, InMemoryCatalog};

    fn create_provider(id: u32, name: &str, provider_type: ProviderType) -> Provider {
        Provider {
            id,
            name: name.to_string(),
            provider_type,
            location: "Toronto".to_string(),
            description: None,
            image: None,
            capacity: 30,
            spots_available: 3,
            registered_with_city: true,
            meals_provided: false,
            snack_provided: false,
            tags: vec![],
            agency_id: None,
        }
    }

    fn create_address(provider_id: u32, lat: f64, lon: f64) -> Address {
        Address {
            provider_id,
            full_address: format!("{} Main St, Toronto, ON", provider_id),
            province: "Ontario".to_string(),
            city: "Toronto".to_string(),
            community: None,
            coordinates: Coordinates::new(lat, lon),
        }
    }

    fn create_catalog() -> InMemoryCatalog {
        // Provider 1 is ~8 km north of the test origin, provider 2 ~12 km,
        // provider 3 has no address on file
        InMemoryCatalog::new(CatalogData {
            providers: vec![
                create_provider(1, "Harbourfront Daycare", ProviderType::DaycareCenter),
                create_provider(2, "Lakeside Preschool", ProviderType::Preschool),
                create_provider(3, "Mobile Montessori", ProviderType::Montessori),
            ],
            addresses: vec![
                create_address(1, 43.7219, -79.38),
                create_address(2, 43.7579, -79.38),
            ],
            agencies: vec![],
            availability_slots: vec![],
        })
    }

    #[test]
    fn test_empty_name_query_returns_whole_catalog() {
        let catalog = create_catalog();
        let query = SearchQuery::Name {
            name: String::new(),
        };

        let outcome = evaluate(&query, &FilterState::default(), &catalog);

        assert_eq!(outcome.total_candidates, 3);
        let ids: Vec<u32> = outcome.providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3], "catalog order must be preserved");
    }

    #[test]
    fn test_nearby_threshold_includes_only_close_providers() {
        let catalog = create_catalog();
        let query = SearchQuery::Nearby {
            origin: Some(Coordinates::new(43.65, -79.38)),
            origin_text: "Toronto".to_string(),
            max_distance_km: Some(10.0),
        };

        let outcome = evaluate(&query, &FilterState::default(), &catalog);

        let ids: Vec<u32> = outcome.providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1], "8 km in, 12 km out, no-address out");
    }

    #[test]
    fn test_unconfigured_province_city_matches_nothing() {
        let catalog = create_catalog();
        let query = SearchQuery::ProvinceCity {
            province: None,
            city: None,
            community: None,
        };

        let outcome = evaluate(&query, &FilterState::default(), &catalog);

        assert!(outcome.providers.is_empty());
        assert_eq!(outcome.total_candidates, 3);
    }

    #[test]
    fn test_facets_are_anded_with_location() {
        let catalog = create_catalog();
        let query = SearchQuery::Name {
            name: String::new(),
        };
        let filters = FilterState {
            types: vec![ProviderType::Preschool],
            ..FilterState::default()
        };

        let outcome = evaluate(&query, &filters, &catalog);

        let ids: Vec<u32> = outcome.providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_meal_facet_filters_catalog() {
        let mut data = CatalogData {
            providers: vec![
                create_provider(1, "Meals Only", ProviderType::DaycareCenter),
                create_provider(2, "No Meals", ProviderType::DaycareCenter),
            ],
            addresses: vec![],
            agencies: vec![],
            availability_slots: vec![],
        };
        data.providers[0].meals_provided = true;
        let catalog = InMemoryCatalog::new(data);

        let query = SearchQuery::Name {
            name: String::new(),
        };
        let filters = FilterState {
            meal_options: vec![MealOption::Meals],
            ..FilterState::default()
        };

        let outcome = evaluate(&query, &filters, &catalog);
        let ids: Vec<u32> = outcome.providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);

        let filters = FilterState {
            meal_options: vec![MealOption::Meals, MealOption::Snack],
            ..FilterState::default()
        };
        let outcome = evaluate(&query, &filters, &catalog);
        assert!(outcome.providers.is_empty());
    }
}
