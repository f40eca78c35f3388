use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Fixed set of provider categories offered by the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderType {
    #[serde(rename = "Daycare Center")]
    DaycareCenter,
    #[serde(rename = "Licensed Home-based")]
    LicensedHomeBased,
    #[serde(rename = "Preschool")]
    Preschool,
    #[serde(rename = "Nursery")]
    Nursery,
    #[serde(rename = "After-School")]
    AfterSchool,
    #[serde(rename = "Montessori")]
    Montessori,
}

/// Childcare provider record, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(rename = "spotsAvailable", default)]
    pub spots_available: u32,
    #[serde(rename = "registeredWithCity", default)]
    pub registered_with_city: bool,
    #[serde(rename = "mealsProvided", default)]
    pub meals_provided: bool,
    #[serde(rename = "snackProvided", default)]
    pub snack_provided: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "agencyId", default)]
    pub agency_id: Option<u32>,
}

impl Provider {
    /// Helper for the spots facet, true when at least one spot is open
    pub fn has_open_spots(&self) -> bool {
        self.spots_available > 0
    }
}

/// Street address for a provider, at most one per provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "providerId")]
    pub provider_id: u32,
    #[serde(rename = "fullAddress")]
    pub full_address: String,
    pub province: String,
    pub city: String,
    #[serde(default)]
    pub community: Option<String>,
    pub coordinates: Coordinates,
}

/// Agency operating licensed home-based providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agency {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Open-spot counts for one age group at a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    #[serde(rename = "providerId")]
    pub provider_id: u32,
    #[serde(rename = "ageGroup")]
    pub age_group: String,
    #[serde(rename = "partTime", default)]
    pub part_time: u32,
    #[serde(rename = "fullTime", default)]
    pub full_time: u32,
    #[serde(rename = "startDate")]
    pub start_date: chrono::NaiveDate,
}

/// Canonical search query, one variant per search mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SearchQuery {
    Nearby {
        #[serde(default)]
        origin: Option<Coordinates>,
        #[serde(rename = "originText", default)]
        origin_text: String,
        #[serde(rename = "maxDistanceKm", default)]
        max_distance_km: Option<f64>,
    },
    ProvinceCity {
        #[serde(default)]
        province: Option<String>,
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        community: Option<String>,
    },
    Agency {
        #[serde(default)]
        name: String,
    },
    Name {
        #[serde(default)]
        name: String,
    },
}

/// Meal-related facet options exposed by the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealOption {
    #[serde(rename = "Meals Provided")]
    Meals,
    #[serde(rename = "Snack Provided")]
    Snack,
}

/// Facet selections applied on top of the search query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub types: Vec<ProviderType>,
    #[serde(rename = "ageGroups", default)]
    pub age_groups: Vec<String>,
    #[serde(rename = "mealOptions", default)]
    pub meal_options: Vec<MealOption>,
    #[serde(rename = "scheduleOptions", default)]
    pub schedule_options: Vec<String>,
    #[serde(rename = "spotsOnly", default)]
    pub spots_only: bool,
    #[serde(rename = "registeredOnly", default)]
    pub registered_only: bool,
}

/// Candidate completion for a free-text search input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub sublabel: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Suggestion {
    /// Plain text suggestion without coordinates
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
            sublabel: None,
            coordinates: None,
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
