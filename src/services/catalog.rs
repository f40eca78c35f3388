use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Address, Agency, AvailabilitySlot, Provider};

/// Errors that can occur when loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view of the provider directory
///
/// The search core never mutates the catalog; implementations only need
/// to answer lookups by identifier and hand out the provider list in a
/// stable iteration order.
pub trait ProviderCatalog: Send + Sync {
    /// All providers in catalog order
    fn providers(&self) -> &[Provider];

    /// A provider's address, if one is on file
    fn address_of(&self, provider_id: u32) -> Option<&Address>;

    /// An agency by identifier
    fn agency_of(&self, agency_id: u32) -> Option<&Agency>;

    /// Availability slots for a provider, possibly empty
    fn slots_of(&self, provider_id: u32) -> &[AvailabilitySlot];

    /// True when no providers are loaded
    fn is_empty(&self) -> bool {
        self.providers().is_empty()
    }
}

/// Catalog document as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub providers: Vec<Provider>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub agencies: Vec<Agency>,
    #[serde(rename = "availabilitySlots", default)]
    pub availability_slots: Vec<AvailabilitySlot>,
}

/// Catalog held fully in memory, indexed by identifier
pub struct InMemoryCatalog {
    providers: Vec<Provider>,
    addresses: HashMap<u32, Address>,
    agencies: HashMap<u32, Agency>,
    slots: HashMap<u32, Vec<AvailabilitySlot>>,
}

impl InMemoryCatalog {
    pub fn new(data: CatalogData) -> Self {
        let addresses = data
            .addresses
            .into_iter()
            .map(|address| (address.provider_id, address))
            .collect();

        let agencies = data
            .agencies
            .into_iter()
            .map(|agency| (agency.id, agency))
            .collect();

        let mut slots: HashMap<u32, Vec<AvailabilitySlot>> = HashMap::new();
        for slot in data.availability_slots {
            slots.entry(slot.provider_id).or_default().push(slot);
        }

        Self {
            providers: data.providers,
            addresses,
            agencies,
            slots,
        }
    }

    /// Load the catalog from a JSON document on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let data: CatalogData = serde_json::from_str(&raw)?;

        let catalog = Self::new(data);
        tracing::info!(
            "Loaded catalog from {}: {} providers, {} addresses, {} agencies",
            path.display(),
            catalog.providers.len(),
            catalog.addresses.len(),
            catalog.agencies.len()
        );

        Ok(catalog)
    }
}

impl ProviderCatalog for InMemoryCatalog {
    fn providers(&self) -> &[Provider] {
        &self.providers
    }

    fn address_of(&self, provider_id: u32) -> Option<&Address> {
        self.addresses.get(&provider_id)
    }

    fn agency_of(&self, agency_id: u32) -> Option<&Agency> {
        self.agencies.get(&agency_id)
    }

    fn slots_of(&self, provider_id: u32) -> &[AvailabilitySlot] {
        self.slots
            .get(&provider_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, ProviderType};

    fn sample_data() -> CatalogData {
        CatalogData {
            providers: vec![Provider {
                id: 1,
                name: "Sunrise Daycare".to_string(),
                provider_type: ProviderType::DaycareCenter,
                location: "Downtown Calgary".to_string(),
                description: None,
                image: None,
                capacity: 40,
                spots_available: 5,
                registered_with_city: true,
                meals_provided: true,
                snack_provided: true,
                tags: vec!["Infant care".to_string()],
                agency_id: None,
            }],
            addresses: vec![Address {
                provider_id: 1,
                full_address: "123 8 Ave SW, Calgary, AB".to_string(),
                province: "Alberta".to_string(),
                city: "Calgary".to_string(),
                community: Some("Downtown".to_string()),
                coordinates: Coordinates::new(51.0447, -114.0719),
            }],
            agencies: vec![Agency {
                id: 7,
                name: "Bright Futures Agency".to_string(),
                phone: "403-555-0199".to_string(),
                email: "info@brightfutures.ca".to_string(),
            }],
            availability_slots: vec![AvailabilitySlot {
                provider_id: 1,
                age_group: "Infant".to_string(),
                part_time: 2,
                full_time: 3,
                start_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            }],
        }
    }

    #[test]
    fn test_lookups_by_identifier() {
        let catalog = InMemoryCatalog::new(sample_data());

        assert_eq!(catalog.providers().len(), 1);
        assert_eq!(catalog.address_of(1).map(|a| a.city.as_str()), Some("Calgary"));
        assert_eq!(
            catalog.agency_of(7).map(|a| a.name.as_str()),
            Some("Bright Futures Agency")
        );
        assert_eq!(catalog.slots_of(1).len(), 1);
    }

    #[test]
    fn test_unknown_ids_resolve_to_nothing() {
        let catalog = InMemoryCatalog::new(sample_data());

        assert!(catalog.address_of(99).is_none());
        assert!(catalog.agency_of(99).is_none());
        assert!(catalog.slots_of(99).is_empty());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = serde_json::from_str::<CatalogData>("{not json").unwrap_err();
        let err = CatalogError::Parse(err);
        assert!(err.to_string().contains("parse"));
    }
}
