//! Configuration validation.

use crate::config::{Config, ModelConfig};
use crate::error::{Error, Result};

/// Minimum sensible model input size.
const MIN_INPUT_SIZE: u32 = 16;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate default model exists if specified
    if let Some(ref model_name) = config.defaults.model
        && !config.models.contains_key(model_name)
    {
        return Err(Error::ModelNotFound {
            name: model_name.clone(),
        });
    }

    for model in config.models.values() {
        if model.input_size < MIN_INPUT_SIZE {
            return Err(Error::ConfigValidation {
                message: format!(
                    "input_size must be at least {MIN_INPUT_SIZE}, got {}",
                    model.input_size
                ),
            });
        }
    }

    Ok(())
}

/// Validate a model configuration and check files exist.
pub fn validate_model_config(model: &ModelConfig) -> Result<()> {
    if !model.path.exists() {
        return Err(Error::ModelFileNotFound {
            path: model.path.clone(),
        });
    }
    if !model.labels.exists() {
        return Err(Error::LabelsFileNotFound {
            path: model.labels.clone(),
        });
    }
    Ok(())
}

/// Look up a model by name in the configuration.
pub fn get_model<'a>(config: &'a Config, name: &str) -> Result<&'a ModelConfig> {
    config.models.get(name).ok_or_else(|| Error::ModelNotFound {
        name: name.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_with_model(name: &str) -> Config {
        let mut config = Config::default();
        config.models.insert(
            name.to_string(),
            ModelConfig {
                path: PathBuf::from("/models/flora.onnx"),
                labels: PathBuf::from("/models/labels.txt"),
                input_size: 224,
            },
        );
        config
    }

    #[test]
    fn test_validate_default_model_must_exist() {
        let mut config = config_with_model("alpine-flora");
        config.defaults.model = Some("missing".to_string());
        assert!(validate_config(&config).is_err());

        config.defaults.model = Some("alpine-flora".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_input_size() {
        let mut config = config_with_model("alpine-flora");
        config.models.get_mut("alpine-flora").unwrap().input_size = 8;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_get_model() {
        let config = config_with_model("alpine-flora");
        assert!(get_model(&config, "alpine-flora").is_ok());
        assert!(matches!(
            get_model(&config, "other"),
            Err(Error::ModelNotFound { .. })
        ));
    }
}
