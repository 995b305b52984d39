use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_DATABASE: &str = "catalogdb";
pub const DEFAULT_CONTAINER: &str = "products";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub common: core_config::Config,
    pub store: StoreConfig,
}

/// Document store connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string of the store account.
    pub endpoint: String,
    /// Account key, applied as the connection password when present.
    pub key: Option<Secret<String>>,
    pub database: String,
    pub container: String,
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_var(&lookup, key, default, is_prod);

        // Local MongoDB needs no key; a managed account in prod always does.
        let key = lookup("COSMOS_KEY").filter(|k| !k.is_empty());
        if key.is_none() && is_prod {
            return Err(missing("COSMOS_KEY", is_prod));
        }

        Ok(CatalogConfig {
            common,
            store: StoreConfig {
                endpoint: get("COSMOS_ENDPOINT", None)?,
                key: key.map(Secret::new),
                database: get("COSMOS_DB", Some(DEFAULT_DATABASE))?,
                container: get("COSMOS_CONTAINER", Some(DEFAULT_CONTAINER))?,
            },
        })
    }
}

fn get_var<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => match default {
            Some(def) if !is_prod => Ok(def.to_string()),
            _ => Err(missing(key, is_prod)),
        },
    }
}

fn missing(key: &str, is_prod: bool) -> AppError {
    if is_prod {
        AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))
    } else {
        AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
    }
}
