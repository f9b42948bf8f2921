use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::Path;

use super::ManifestConfig;

// Embed the default config at compile time
pub const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Prefix for environment overrides, e.g. `DIRMANIFEST_OUTPUT_FILE`
pub const ENV_PREFIX: &str = "DIRMANIFEST_";

impl ManifestConfig {
    /// Load defaults, repository config files and environment overrides
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    /// Load configuration, using only `custom_config` instead of the
    /// repository files when given
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        if let Some(custom_path) = custom_config {
            if !custom_path.is_file() {
                bail!("Configuration file not found: {}", custom_path.display());
            }
            figment = match custom_path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            figment = figment
                .merge(Toml::file("dirmanifest.toml"))
                .merge(Json::file("dirmanifest.json"))
                .merge(Yaml::file("dirmanifest.yaml"))
                .merge(Yaml::file("dirmanifest.yml"));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(figment)
    }

    /// Embedded defaults only, without files or environment
    pub fn embedded() -> Result<Self> {
        Self::from_figment(Figment::new().merge(Toml::string(DEFAULT_CONFIG)))
    }

    /// Extract and validate a configuration from any provider stack
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: ManifestConfig = figment
            .extract()
            .context("Failed to parse configuration")?;
        config.validate()?;
        tracing::debug!(
            "Loaded configuration with {} backends ({} enabled)",
            config.backends.len(),
            config.enabled_backends().count()
        );
        Ok(config)
    }
}
