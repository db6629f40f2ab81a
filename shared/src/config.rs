use serde::{Deserialize, Serialize};

use crate::api::GenerationSettings;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every endpoint. Empty means same origin.
    pub api_base: String,
    pub chat: ChatConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub max_length: usize,
    pub warn_length: usize,
    pub danger_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub prompt_min: usize,
    pub prompt_max: usize,
    pub default_prompt: String,
    pub defaults: GenerationSettings,
    pub bounds: SettingsBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsBounds {
    pub steps: (u32, u32),
    pub guidance: (f64, f64),
    pub size: (u32, u32),
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { max_length: 500, warn_length: 400, danger_length: 450 }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prompt_min: 3,
            prompt_max: 1000,
            default_prompt: "A serene watercolor landscape of misty mountains at sunrise, \
                             ultra-detailed, 4k, masterpiece"
                .to_string(),
            defaults: GenerationSettings::default(),
            bounds: SettingsBounds::default(),
        }
    }
}

impl Default for SettingsBounds {
    fn default() -> Self {
        Self { steps: (1, 100), guidance: (1.0, 20.0), size: (256, 1024) }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;
        if generator.prompt_min > generator.prompt_max {
            return Err(ConfigError::Invalid(format!(
                "generator.prompt_min ({}) exceeds generator.prompt_max ({})",
                generator.prompt_min, generator.prompt_max
            )));
        }
        let bounds = &generator.bounds;
        if !bounds.guidance.0.is_finite() || !bounds.guidance.1.is_finite() {
            return Err(ConfigError::Invalid("generator.bounds.guidance must be finite".into()));
        }
        if bounds.steps.0 > bounds.steps.1
            || bounds.guidance.0 > bounds.guidance.1
            || bounds.size.0 > bounds.size.1
        {
            return Err(ConfigError::Invalid("generator.bounds has min above max".into()));
        }
        if self.chat.max_length == 0 {
            return Err(ConfigError::Invalid("chat.max_length must be positive".into()));
        }
        Ok(())
    }
}
