use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

use super::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config document once and caches it; missing content yields `TConfig::default()`.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
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
            config: Mutex::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);

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

        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InMemoryConfigProvider {
        content: Mutex<Option<String>>,
    }

    impl InMemoryConfigProvider {
        fn new(content: Option<String>) -> Self {
            Self { content: Mutex::new(content) }
        }
    }

    impl ConfigContentProvider for InMemoryConfigProvider {
        fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
            let content = self.content.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(content.clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
            let mut current = self.content.lock().unwrap_or_else(PoisonError::into_inner);
            *current = Some(content.to_string());
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        depth: u32,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self { depth: 9 }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            if self.depth == 0 {
                return Err("depth must be greater than 0".to_string());
            }
            Ok(())
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<InMemoryConfigProvider, SampleConfig> {
        ConfigManager::new(
            InMemoryConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_content_returns_default() {
        assert_eq!(manager(None).get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_stored_content_is_parsed() {
        assert_eq!(manager(Some("depth: 4")).get_config().unwrap(), SampleConfig { depth: 4 });
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let result = manager(Some("depth: 0")).get_config();
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let result = manager(Some("depth: [")).get_config();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_set_config_refuses_invalid_values() {
        let manager = manager(None);
        let result = manager.set_config(&SampleConfig { depth: 0 });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert_eq!(manager.get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let manager = manager(None);
        manager.set_config(&SampleConfig { depth: 3 }).unwrap();
        assert_eq!(manager.get_config().unwrap(), SampleConfig { depth: 3 });
    }
}
