use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::schema::{
    ConfigKey,
    PaidMediaConfig,
};

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidOverride { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn discover_config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PAIDMEDIA_CONFIG_PATH") {
            tracing::debug!("Using config path from PAIDMEDIA_CONFIG_PATH: {}", path);
            return PathBuf::from(path);
        }

        let path = dirs::config_dir()
            .map(|dir| dir.join("paidmedia").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("paidmedia.toml"));
        tracing::debug!("Using config path: {}", path.display());
        path
    }

    /// Loads the discovered file, falling back to defaults when it does not exist
    pub fn load_or_default() -> ConfigLoadResult<PaidMediaConfig> {
        let path = Self::discover_config_path();
        match Self::load(&path) {
            Err(ConfigLoadError::FileNotFound(_)) => {
                tracing::info!(
                    "No config at {}, using defaults",
                    path.display()
                );
                let mut config = PaidMediaConfig::default();
                Self::apply_env_overrides(&mut config)?;
                Ok(config)
            }
            other => other,
        }
    }

    pub fn load(path: &Path) -> ConfigLoadResult<PaidMediaConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigLoadError::InvalidConfig)?;
        Ok(config)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<PaidMediaConfig> {
        let config: PaidMediaConfig = toml::from_str(content)?;
        config.validate().map_err(ConfigLoadError::InvalidConfig)?;
        Ok(config)
    }

    pub fn apply_env_overrides(config: &mut PaidMediaConfig) -> ConfigLoadResult<()> {
        for key in ConfigKey::ALL {
            if let Ok(value) = std::env::var(key.env_var_name()) {
                Self::apply_override(config, key, &value)?;
            }
        }
        Ok(())
    }

    pub fn apply_override(
        config: &mut PaidMediaConfig, key: ConfigKey, value: &str,
    ) -> ConfigLoadResult<()> {
        let invalid = || ConfigLoadError::InvalidOverride {
            key: key.env_var_name(),
            value: value.to_string(),
        };

        match key {
            ConfigKey::ProviderTimeoutSecs => {
                config.aggregation.provider_timeout_secs =
                    value.trim().parse().map_err(|_| invalid())?;
            }
            ConfigKey::MaxConcurrentProviders => {
                config.aggregation.max_concurrent_providers =
                    value.trim().parse().map_err(|_| invalid())?;
            }
            ConfigKey::MinHealthyConfidence => {
                config.aggregation.min_healthy_confidence =
                    value.trim().parse().map_err(|_| invalid())?;
            }
            ConfigKey::LogLevel => {
                let level = value.trim().to_string();
                if level.is_empty() {
                    return Err(invalid());
                }
                config.logging.level = level;
            }
        }

        tracing::debug!(key = key.env_var_name(), "Applied config override");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ConfigLoader::parse(
            r#"
            [aggregation]
            provider_timeout_secs = 5
            max_concurrent_providers = 3

            [providers.meta]
            type = "fixture"
            config = { path = "/data/meta.json", latency_ms = "20" }

            [providers.google]
            type = "fixture"
            "#,
        )
        .unwrap();

        assert_eq!(config.aggregation.provider_timeout_secs, 5);
        assert_eq!(config.aggregation.max_concurrent_providers, 3);
        assert_eq!(config.aggregation.min_healthy_confidence, 0.8);

        let names: Vec<_> = config.providers.keys().cloned().collect();
        assert_eq!(names, vec!["meta".to_string(), "google".to_string()]);
        assert_eq!(config.providers["meta"].config["latency_ms"], "20");
        assert!(config.providers["google"].config.is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let result = ConfigLoader::parse(
            r#"
            [aggregation]
            max_concurrent_providers = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigLoadError::InvalidConfig(_))));

        let result = ConfigLoader::parse("[aggregation\n");
        assert!(matches!(result, Err(ConfigLoadError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigLoader::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[aggregation]\nmin_healthy_confidence = 0.5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.aggregation.min_healthy_confidence, 0.5);
    }

    #[test]
    fn test_apply_override() {
        let mut config = PaidMediaConfig::default();
        ConfigLoader::apply_override(&mut config, ConfigKey::ProviderTimeoutSecs, " 12 ").unwrap();
        assert_eq!(config.aggregation.provider_timeout_secs, 12);

        let err =
            ConfigLoader::apply_override(&mut config, ConfigKey::MinHealthyConfidence, "high");
        assert!(matches!(
            err,
            Err(ConfigLoadError::InvalidOverride {
                key: "PAIDMEDIA_MIN_HEALTHY_CONFIDENCE",
                ..
            })
        ));
    }
}
