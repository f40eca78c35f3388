use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
///
/// Every field has a default so the service can boot with no config file
/// at all; the shipped `config/default.toml` just makes the values
/// visible.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String { "data/catalog.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_base_url")]
    pub base_url: String,
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocoder_country_codes")]
    pub country_codes: String,
    #[serde(default = "default_geocoder_limit")]
    pub limit: u8,
    #[serde(default = "default_geocoder_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_base_url(),
            user_agent: default_geocoder_user_agent(),
            country_codes: default_geocoder_country_codes(),
            limit: default_geocoder_limit(),
            timeout_secs: default_geocoder_timeout_secs(),
        }
    }
}

fn default_geocoder_base_url() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_geocoder_user_agent() -> String {
    format!("pac-search/{}", env!("CARGO_PKG_VERSION"))
}
fn default_geocoder_country_codes() -> String { "ca".to_string() }
fn default_geocoder_limit() -> u8 { 5 }
fn default_geocoder_timeout_secs() -> u64 { 10 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PAC__)
    ///    e.g., PAC__SERVER__PORT -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("PAC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PAC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_settings() {
        let server = ServerSettings::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
        assert_eq!(server.workers, None);
    }

    #[test]
    fn test_default_geocoder_settings() {
        let geocoder = GeocoderSettings::default();
        assert_eq!(geocoder.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(geocoder.country_codes, "ca");
        assert_eq!(geocoder.limit, 5);
        assert_eq!(geocoder.timeout_secs, 10);
    }

    #[test]
    fn test_default_catalog_path() {
        let catalog = CatalogSettings::default();
        assert_eq!(catalog.path, "data/catalog.json");
    }

    #[test]
    fn test_load_from_shipped_default_file() {
        let settings = Settings::load_from("config/default.toml").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.geocoder.country_codes, "ca");
        assert_eq!(settings.catalog.path, "data/catalog.json");
    }
}
