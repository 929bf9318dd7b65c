//! CLI configuration, loadable from TOML.

use serde::Deserialize;

use jv_pipeline::{PipelineConfig, RecognitionConfig, SecurityConfig};

/// Top-level configuration for the `jarvis` binary.
///
/// Every section is optional; a missing file section falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Confirmation and deletion policy.
    #[serde(default)]
    pub security: SecurityConfig,
    /// Confidence scoring.
    #[serde(default)]
    pub recognition: RecognitionConfig,
    /// Assistant persona.
    #[serde(default)]
    pub personality: PersonalityConfig,
    /// Log output format on stderr.
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalityConfig {
    /// How the assistant addresses the user.
    #[serde(default = "default_address_as")]
    pub address_as: String,
}

fn default_address_as() -> String {
    "sir".to_string()
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            address_as: default_address_as(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl CliConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// The subset handed to the pipeline.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            security: self.security.clone(),
            recognition: self.recognition.clone(),
        }
    }
}
