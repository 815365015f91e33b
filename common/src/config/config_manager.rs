use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.as_ref()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    /// Loads the config once and caches it. A missing source yields `TConfig::default()`.
    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.config.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config.validate().map_err(ConfigError::Validation)?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Validation)?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self.config.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        name: String,
        delay_ms: u64,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                delay_ms: 500,
            }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            if self.name.is_empty() {
                return Err("name must not be empty".to_string());
            }
            Ok(())
        }
    }

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_tictactoe_config_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_returns_default_config() {
        let manager: ConfigManager<_, SampleConfig, _> =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        let config = manager.get_config().unwrap();
        assert_eq!(config, SampleConfig::default());
    }

    #[test]
    fn test_config_survives_file_round_trip() {
        let file_path = get_temp_file_path();
        let config = SampleConfig {
            name: "saved".to_string(),
            delay_ms: 0,
        };

        let manager: ConfigManager<_, SampleConfig, _> = ConfigManager::from_yaml_file(&file_path);
        assert!(manager.set_config(&config).is_ok());

        let fresh: ConfigManager<_, SampleConfig, _> = ConfigManager::from_yaml_file(&file_path);
        assert_eq!(fresh.get_config().unwrap(), config);

        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_invalid_config_is_rejected_on_read() {
        let provider = MemoryContentProvider::with_content("name: \"\"\ndelay_ms: 5\n");
        let manager: ConfigManager<_, SampleConfig, _> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(matches!(manager.get_config(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected_on_write() {
        let manager: ConfigManager<_, SampleConfig, _> =
            ConfigManager::new(MemoryContentProvider::new(), YamlConfigSerializer::new());
        let config = SampleConfig {
            name: String::new(),
            delay_ms: 1,
        };
        assert!(manager.set_config(&config).is_err());
        assert_eq!(manager.get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_malformed_yaml_is_a_deserialize_error() {
        let provider = MemoryContentProvider::with_content("delay_ms: [not a number");
        let manager: ConfigManager<_, SampleConfig, _> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(matches!(manager.get_config(), Err(ConfigError::Deserialize(_))));
    }
}
