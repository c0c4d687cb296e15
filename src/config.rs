use crate::error::EngineError;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Connection settings for the remote pricing service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Values used to pre-fill a comparison request when the user omits a flag
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_hours")]
    pub hours: f64,
    #[serde(default)]
    pub storage_gb: u32,
    #[serde(default = "default_aws_region")]
    pub aws_region: String,
    #[serde(default = "default_gcp_region")]
    pub gcp_region: String,
    #[serde(default = "default_azure_region")]
    pub azure_region: String,
}

impl DefaultsConfig {
    pub fn region_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Aws => &self.aws_region,
            Provider::Gcp => &self.gcp_region,
            Provider::Azure => &self.azure_region,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            hours: default_hours(),
            storage_gb: 0,
            aws_region: default_aws_region(),
            gcp_region: default_gcp_region(),
            azure_region: default_azure_region(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_hours() -> f64 {
    24.0
}

fn default_aws_region() -> String {
    Provider::Aws.default_region().to_string()
}

fn default_gcp_region() -> String {
    Provider::Gcp.default_region().to_string()
}

fn default_azure_region() -> String {
    Provider::Azure.default_region().to_string()
}

/// Load configuration from an optional `config.toml` layered under
/// `CLOUD_COMPARE__`-prefixed environment variables, with built-in defaults
/// for anything left unset.
///
/// When `path` is given the file must exist; otherwise a `config` file in
/// the working directory is picked up if present.
pub fn load_config(path: Option<&Path>) -> Result<Config, EngineError> {
    let file_source = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name("config").required(false),
    };

    let settings = config::Config::builder()
        .add_source(file_source)
        .add_source(config::Environment::with_prefix("CLOUD_COMPARE").separator("__"))
        .build()
        .map_err(|e| EngineError::Config(e.to_string()))?;

    let cfg: Config = settings
        .try_deserialize()
        .map_err(|e| EngineError::Config(e.to_string()))?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<(), EngineError> {
    if !cfg.service.base_url.starts_with("http://") && !cfg.service.base_url.starts_with("https://")
    {
        return Err(EngineError::Config(format!(
            "service.base_url must be an http(s) URL, got '{}'",
            cfg.service.base_url
        )));
    }

    if cfg.service.timeout_seconds == 0 {
        return Err(EngineError::Config(
            "service.timeout_seconds must be at least 1".to_string(),
        ));
    }

    if cfg.defaults.hours < 1.0 {
        return Err(EngineError::Config(format!(
            "defaults.hours must be at least 1, got {}",
            cfg.defaults.hours
        )));
    }

    for provider in [Provider::Aws, Provider::Gcp, Provider::Azure] {
        let region = cfg.defaults.region_for(provider);
        if !provider.is_valid_region(region) {
            return Err(EngineError::Config(format!(
                "defaults.{}_region '{}' is not a known {} region",
                provider, region, provider
            )));
        }
    }

    Ok(())
}
