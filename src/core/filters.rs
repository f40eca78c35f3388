use crate::core::distance;
use crate::models::{Address, Agency, MealOption, Provider, ProviderType, SearchQuery};

/// Check if a provider satisfies the location predicate for a query
///
/// This is Stage 2 of the filtering pipeline, after the bounding-box
/// pre-filter. `address` and `agency` are the provider's own records from
/// the catalog. Providers without an address can never satisfy a
/// geography-based query; they fail here rather than erroring.
#[inline]
pub fn matches_location(
    provider: &Provider,
    address: Option<&Address>,
    agency: Option<&Agency>,
    query: &SearchQuery,
) -> bool {
    match query {
        SearchQuery::Nearby {
            origin,
            origin_text,
            max_distance_km,
        } => {
            if let (Some(origin), Some(threshold)) = (origin, max_distance_km) {
                match address {
                    Some(addr) => distance::distance_km(*origin, addr.coordinates) <= *threshold,
                    None => false,
                }
            } else {
                // No usable origin: fall back to a text match against the
                // location label, name, or full address
                contains_ignore_case(&provider.location, origin_text)
                    || contains_ignore_case(&provider.name, origin_text)
                    || address
                        .map(|addr| contains_ignore_case(&addr.full_address, origin_text))
                        .unwrap_or(false)
            }
        }
        SearchQuery::ProvinceCity {
            province,
            city,
            community,
        } => {
            // An unconfigured province/city query matches nothing
            if province.is_none() && city.is_none() && community.is_none() {
                return false;
            }

            let addr = match address {
                Some(addr) => addr,
                None => return false,
            };

            if let Some(province) = province {
                if addr.province != *province {
                    return false;
                }
            }
            if let Some(city) = city {
                if addr.city != *city {
                    return false;
                }
            }
            if let Some(community) = community {
                if addr.community.as_deref() != Some(community.as_str()) {
                    return false;
                }
            }

            true
        }
        SearchQuery::Agency { name } => {
            if name.is_empty() {
                return true;
            }

            match agency {
                Some(agency) => contains_ignore_case(&agency.name, name),
                None => false,
            }
        }
        SearchQuery::Name { name } => contains_ignore_case(&provider.name, name),
    }
}

/// Check if a provider's type is one of the selected types
#[inline]
pub fn matches_type(provider: &Provider, selected: &[ProviderType]) -> bool {
    selected.is_empty() || selected.contains(&provider.provider_type)
}

/// Check if a provider serves any of the selected age groups
///
/// Matches the first word of each selected label against the provider's
/// tags by case-insensitive containment. This loose token match is the
/// platform's established behavior, not exact label equality.
#[inline]
pub fn matches_age_groups(provider: &Provider, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }

    selected.iter().any(|label| {
        let token = label.split_whitespace().next().unwrap_or("");
        provider
            .tags
            .iter()
            .any(|tag| contains_ignore_case(tag, token))
    })
}

/// Check if a provider offers every selected meal option
#[inline]
pub fn matches_meal_options(provider: &Provider, selected: &[MealOption]) -> bool {
    selected.iter().all(|option| match option {
        MealOption::Meals => provider.meals_provided,
        MealOption::Snack => provider.snack_provided,
    })
}

/// Check if a provider's tags cover every selected schedule option
#[inline]
pub fn matches_schedule_options(provider: &Provider, selected: &[String]) -> bool {
    selected.iter().all(|option| {
        provider
            .tags
            .iter()
            .any(|tag| contains_ignore_case(tag, option))
    })
}

/// Check the spots-available and city-registration toggles
#[inline]
pub fn matches_availability_flags(
    provider: &Provider,
    spots_only: bool,
    registered_only: bool,
) -> bool {
    if spots_only && !provider.has_open_spots() {
        return false;
    }
    if registered_only && !provider.registered_with_city {
        return false;
    }
    true
}

/// Case-insensitive substring check, true for an empty needle
#[inline]
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn create_test_provider(name: &str, provider_type: ProviderType, tags: &[&str]) -> Provider {
        Provider {
            id: 1,
            name: name.to_string(),
            provider_type,
            location: "Downtown Calgary".to_string(),
            description: None,
            image: None,
            capacity: 40,
            spots_available: 5,
            registered_with_city: true,
            meals_provided: true,
            snack_provided: false,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            agency_id: None,
        }
    }

    fn create_test_address(provider_id: u32, community: Option<&str>) -> Address {
        Address {
            provider_id,
            full_address: "123 8 Ave SW, Calgary, AB".to_string(),
            province: "Alberta".to_string(),
            city: "Calgary".to_string(),
            community: community.map(|c| c.to_string()),
            coordinates: Coordinates::new(51.0447, -114.0719),
        }
    }

    #[test]
    fn test_name_query_is_case_insensitive() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);
        let query = SearchQuery::Name {
            name: "sunrise".to_string(),
        };

        assert!(matches_location(&provider, None, None, &query));
    }

    #[test]
    fn test_empty_name_query_matches_all() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);
        let query = SearchQuery::Name {
            name: String::new(),
        };

        assert!(matches_location(&provider, None, None, &query));
    }

    #[test]
    fn test_province_city_unconfigured_matches_nothing() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);
        let address = create_test_address(1, Some("Beltline"));
        let query = SearchQuery::ProvinceCity {
            province: None,
            city: None,
            community: None,
        };

        assert!(!matches_location(&provider, Some(&address), None, &query));
    }

    #[test]
    fn test_province_city_matches_exactly() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);
        let address = create_test_address(1, Some("Beltline"));

        let query = SearchQuery::ProvinceCity {
            province: Some("Alberta".to_string()),
            city: Some("Calgary".to_string()),
            community: None,
        };
        assert!(matches_location(&provider, Some(&address), None, &query));

        // Equality is case-sensitive
        let query = SearchQuery::ProvinceCity {
            province: Some("alberta".to_string()),
            city: None,
            community: None,
        };
        assert!(!matches_location(&provider, Some(&address), None, &query));
    }

    #[test]
    fn test_geographic_query_requires_address() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);
        let query = SearchQuery::ProvinceCity {
            province: Some("Alberta".to_string()),
            city: None,
            community: None,
        };

        assert!(!matches_location(&provider, None, None, &query));
    }

    #[test]
    fn test_nearby_radius() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);
        let address = create_test_address(1, None);
        let query = SearchQuery::Nearby {
            origin: Some(Coordinates::new(51.05, -114.07)),
            origin_text: "Calgary".to_string(),
            max_distance_km: Some(5.0),
        };

        assert!(matches_location(&provider, Some(&address), None, &query));

        let query = SearchQuery::Nearby {
            origin: Some(Coordinates::new(53.5461, -113.4938)),
            origin_text: "Edmonton".to_string(),
            max_distance_km: Some(5.0),
        };
        assert!(!matches_location(&provider, Some(&address), None, &query));
    }

    #[test]
    fn test_nearby_without_origin_falls_back_to_text() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);
        let address = create_test_address(1, None);
        let query = SearchQuery::Nearby {
            origin: None,
            origin_text: "8 ave".to_string(),
            max_distance_km: None,
        };

        // Matches via the full address
        assert!(matches_location(&provider, Some(&address), None, &query));

        let query = SearchQuery::Nearby {
            origin: None,
            origin_text: "Vancouver".to_string(),
            max_distance_km: None,
        };
        assert!(!matches_location(&provider, Some(&address), None, &query));
    }

    #[test]
    fn test_agency_query() {
        let mut provider = create_test_provider("Little Steps", ProviderType::LicensedHomeBased, &[]);
        provider.agency_id = Some(7);
        let agency = Agency {
            id: 7,
            name: "Bright Futures Agency".to_string(),
            phone: "403-555-0199".to_string(),
            email: "info@brightfutures.ca".to_string(),
        };

        let query = SearchQuery::Agency {
            name: "bright".to_string(),
        };
        assert!(matches_location(&provider, None, Some(&agency), &query));

        // Empty substring matches every provider, agency-backed or not
        let query = SearchQuery::Agency {
            name: String::new(),
        };
        let independent = create_test_provider("Solo Daycare", ProviderType::DaycareCenter, &[]);
        assert!(matches_location(&independent, None, None, &query));

        // Non-empty substring with no agency match passes nothing
        let query = SearchQuery::Agency {
            name: "sunrise".to_string(),
        };
        assert!(!matches_location(&provider, None, Some(&agency), &query));
        assert!(!matches_location(&independent, None, None, &query));
    }

    #[test]
    fn test_type_facet() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);

        assert!(matches_type(&provider, &[]));
        assert!(matches_type(&provider, &[ProviderType::DaycareCenter]));
        assert!(!matches_type(
            &provider,
            &[ProviderType::Preschool, ProviderType::Montessori]
        ));
    }

    #[test]
    fn test_age_facet_uses_first_word_of_label() {
        let provider = create_test_provider(
            "Sunrise Daycare",
            ProviderType::DaycareCenter,
            &["Infant care", "Toddler program"],
        );

        // "Infant (0-12 months)" matches the "Infant care" tag via its first word
        assert!(matches_age_groups(
            &provider,
            &["Infant (0-12 months)".to_string()]
        ));
        assert!(!matches_age_groups(
            &provider,
            &["Kindergarten (5 years)".to_string()]
        ));
    }

    #[test]
    fn test_meal_facet_requires_every_selection() {
        let provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);

        assert!(matches_meal_options(&provider, &[MealOption::Meals]));
        assert!(!matches_meal_options(
            &provider,
            &[MealOption::Meals, MealOption::Snack]
        ));
        assert!(matches_meal_options(&provider, &[]));
    }

    #[test]
    fn test_schedule_facet_requires_every_selection() {
        let provider = create_test_provider(
            "Sunrise Daycare",
            ProviderType::DaycareCenter,
            &["Full-time", "Weekend care"],
        );

        assert!(matches_schedule_options(
            &provider,
            &["full-time".to_string()]
        ));
        assert!(matches_schedule_options(
            &provider,
            &["Full-time".to_string(), "Weekend".to_string()]
        ));
        assert!(!matches_schedule_options(
            &provider,
            &["Full-time".to_string(), "Overnight".to_string()]
        ));
    }

    #[test]
    fn test_availability_flags() {
        let mut provider = create_test_provider("Sunrise Daycare", ProviderType::DaycareCenter, &[]);

        assert!(matches_availability_flags(&provider, true, true));

        provider.spots_available = 0;
        assert!(!matches_availability_flags(&provider, true, false));
        assert!(matches_availability_flags(&provider, false, true));

        provider.registered_with_city = false;
        assert!(!matches_availability_flags(&provider, false, true));
        assert!(matches_availability_flags(&provider, false, false));
    }
}
