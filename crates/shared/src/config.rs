//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Items table configuration.
    pub table: TableConfig,
    /// Attachment bucket configuration.
    pub storage: StorageSettings,
    /// Token verification configuration.
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Key-value table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Name of the items table.
    pub name: String,
    /// Endpoint override, e.g. DynamoDB Local.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Object storage configuration for attachments.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Bucket holding attachments, keyed by item ID.
    pub bucket: String,
    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override for S3-compatible services.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Static access key; the standard AWS credential chain is used when absent.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Static secret key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Lifetime of presigned upload URLs in seconds.
    #[serde(default = "default_url_expiration")]
    pub url_expiration_secs: u64,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_url_expiration() -> u64 {
    300 // 5 minutes
}

/// Token verification configuration.
///
/// The trust anchor is given inline or as a path; inline wins when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// PEM-encoded certificate or public key.
    #[serde(default)]
    pub certificate: Option<String>,
    /// Path to a PEM-encoded certificate or public key.
    #[serde(default)]
    pub certificate_path: Option<PathBuf>,
}

impl AuthConfig {
    /// Resolves the trust anchor PEM text.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source is configured or the file cannot be read.
    pub fn certificate_pem(&self) -> Result<String, config::ConfigError> {
        if let Some(pem) = self.certificate.as_deref().filter(|p| !p.trim().is_empty()) {
            return Ok(pem.to_string());
        }

        match &self.certificate_path {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                config::ConfigError::Message(format!(
                    "failed to read auth certificate {}: {e}",
                    path.display()
                ))
            }),
            None => Err(config::ConfigError::NotFound(
                "auth.certificate or auth.certificate_path".to_string(),
            )),
        }
    }
}

fn layered() -> Result<config::Config, config::ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(config::Environment::with_prefix("TODO").separator("__"))
        .build()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        layered()?.try_deserialize()
    }
}

/// Loads one section (`"table"`, `"auth"`, ...) from the same sources as [`AppConfig::load`].
///
/// For binaries that need only part of the configuration.
///
/// # Errors
///
/// Returns an error if the section is absent or malformed.
pub fn load_section<T: DeserializeOwned>(key: &str) -> Result<T, config::ConfigError> {
    layered()?.get(key)
}
