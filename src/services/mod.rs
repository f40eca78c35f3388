// Service exports
pub mod catalog;
pub mod geocoder;

pub use catalog::{CatalogData, CatalogError, InMemoryCatalog, ProviderCatalog};
pub use geocoder::{GeocodeClient, GeocodeError};
