use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, SearchQuery, Suggestion};

/// Search mode selector, one per location-predicate strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    Nearby,
    ProvinceCity,
    Agency,
    Name,
}

/// Search input under construction, normalized into a `SearchQuery`
///
/// Setters only normalize; there is no error path. Switching modes resets
/// every mode-specific field so stale input cannot leak across modes.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    mode: SearchMode,
    text: String,
    origin: Option<Coordinates>,
    max_distance_km: Option<f64>,
    province: Option<String>,
    city: Option<String>,
    community: Option<String>,
}

impl SearchCriteria {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            text: String::new(),
            origin: None,
            max_distance_km: None,
            province: None,
            city: None,
            community: None,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Switch modes, discarding the previous mode's fields
    pub fn set_mode(&mut self, mode: SearchMode) {
        if self.mode != mode {
            *self = Self::new(mode);
        }
    }

    /// Update the free-text field for the Nearby, Agency, and Name modes
    ///
    /// Editing the text in Nearby mode detaches any coordinates picked from
    /// an earlier suggestion, since the label no longer describes them.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        if self.mode == SearchMode::Nearby {
            self.origin = None;
        }
    }

    /// Apply a selected suggestion, replacing the current text
    ///
    /// In Nearby mode the suggestion's coordinates, when present, become
    /// the query origin.
    pub fn choose_suggestion(&mut self, suggestion: &Suggestion) {
        self.text = suggestion.value.clone();
        if self.mode == SearchMode::Nearby {
            self.origin = suggestion.coordinates;
        }
    }

    /// Set the Nearby distance threshold in kilometers
    ///
    /// Negative or non-finite values are normalized to "no threshold",
    /// which skips the geographic branch entirely.
    pub fn set_max_distance_km(&mut self, km: Option<f64>) {
        self.max_distance_km = km.filter(|km| km.is_finite() && *km >= 0.0);
    }

    pub fn set_province(&mut self, province: Option<&str>) {
        self.province = normalize_selection(province);
    }

    /// Select a city, clearing any community chosen under a previous city
    pub fn set_city(&mut self, city: Option<&str>) {
        self.city = normalize_selection(city);
        self.community = None;
    }

    pub fn set_community(&mut self, community: Option<&str>) {
        self.community = normalize_selection(community);
    }

    /// Produce the canonical query for the current input
    pub fn resolve(&self) -> SearchQuery {
        match self.mode {
            SearchMode::Nearby => SearchQuery::Nearby {
                origin: self.origin,
                origin_text: self.text.clone(),
                max_distance_km: self.max_distance_km,
            },
            SearchMode::ProvinceCity => SearchQuery::ProvinceCity {
                province: self.province.clone(),
                city: self.city.clone(),
                community: self.community.clone(),
            },
            SearchMode::Agency => SearchQuery::Agency {
                name: self.text.trim().to_string(),
            },
            SearchMode::Name => SearchQuery::Name {
                name: self.text.trim().to_string(),
            },
        }
    }
}

/// Treat empty or whitespace-only dropdown values as "nothing selected"
fn normalize_selection(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
