use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::filters::contains_ignore_case;
use crate::models::Suggestion;
use crate::services::catalog::ProviderCatalog;
use crate::services::geocoder::{GeocodeClient, GeocodeError};

/// Errors surfaced by a suggestion source
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("Geocoding lookup failed: {0}")]
    Geocode(#[from] GeocodeError),
}

/// One strategy for completing a partially typed search input
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Short name for log lines
    fn name(&self) -> &str;

    /// Candidate completions for the text
    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, SuggestError>;
}

/// Source backed by a fixed candidate list
///
/// Matching is a case-insensitive substring check against each
/// candidate's label; every match is returned, uncapped.
pub struct LocalSource {
    name: String,
    candidates: Vec<Suggestion>,
}

impl LocalSource {
    pub fn new(name: impl Into<String>, candidates: Vec<Suggestion>) -> Self {
        Self {
            name: name.into(),
            candidates,
        }
    }

    /// Provider display names, with the location label as sublabel
    pub fn provider_names(catalog: &dyn ProviderCatalog) -> Self {
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for provider in catalog.providers() {
            names
                .entry(provider.name.clone())
                .or_insert_with(|| provider.location.clone());
        }

        let candidates = names
            .into_iter()
            .map(|(name, location)| Suggestion {
                label: name.clone(),
                value: name,
                sublabel: Some(location),
                coordinates: None,
            })
            .collect();

        Self::new("providers", candidates)
    }

    /// Names of every agency referenced by at least one provider
    pub fn agency_names(catalog: &dyn ProviderCatalog) -> Self {
        let mut names: BTreeSet<String> = BTreeSet::new();
        for provider in catalog.providers() {
            if let Some(agency) = provider.agency_id.and_then(|id| catalog.agency_of(id)) {
                names.insert(agency.name.clone());
            }
        }

        let candidates = names.into_iter().map(Suggestion::plain).collect();

        Self::new("agencies", candidates)
    }

    /// City and community labels derived from provider addresses
    pub fn area_labels(catalog: &dyn ProviderCatalog) -> Self {
        let mut labels: BTreeMap<String, String> = BTreeMap::new();
        for provider in catalog.providers() {
            if let Some(address) = catalog.address_of(provider.id) {
                labels
                    .entry(address.city.clone())
                    .or_insert_with(|| address.province.clone());
                if let Some(community) = &address.community {
                    labels
                        .entry(community.clone())
                        .or_insert_with(|| format!("{}, {}", address.city, address.province));
                }
            }
        }

        let candidates = labels
            .into_iter()
            .map(|(label, sublabel)| Suggestion {
                label: label.clone(),
                value: label,
                sublabel: Some(sublabel),
                coordinates: None,
            })
            .collect();

        Self::new("areas", candidates)
    }

    /// Synchronous matching core shared by the trait impl
    pub fn matches(&self, text: &str) -> Vec<Suggestion> {
        self.candidates
            .iter()
            .filter(|candidate| contains_ignore_case(&candidate.label, text))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SuggestionSource for LocalSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, SuggestError> {
        Ok(self.matches(text))
    }
}

/// Source delegating to the remote address-search client
pub struct GeocodeSource {
    client: Arc<GeocodeClient>,
}

impl GeocodeSource {
    pub fn new(client: Arc<GeocodeClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SuggestionSource for GeocodeSource {
    fn name(&self) -> &str {
        "geocode"
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, SuggestError> {
        Ok(self.client.search(text).await?)
    }
}
