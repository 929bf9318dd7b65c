//! Pipeline configuration: security policy and recognition tuning.
//!
//! Built once (usually deserialized from the `[security]` and
//! `[recognition]` tables of the CLI's TOML file) and handed to the
//! validator and recognizer at construction. Nothing reads it globally.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};

/// `require_confirmation` key gating app closes (default off).
pub const APP_CLOSE: &str = "app_close";
/// `require_confirmation` key gating shutdown and restart (default on).
pub const SYSTEM_SHUTDOWN: &str = "system_shutdown";
/// `allowed_operations` key enabling file deletion (default on).
pub const FILE_DELETION: &str = "file_deletion";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

impl PipelineConfig {
    /// Reject settings that would break the confidence contract.
    pub fn validate(&self) -> PipelineResult<()> {
        self.recognition.validate()
    }
}

/// Read-only security policy consulted by the validator.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Operation -> whether it must be confirmed before running.
    #[serde(default)]
    pub require_confirmation: HashMap<String, bool>,
    /// Operation -> whether it may run at all.
    #[serde(default)]
    pub allowed_operations: HashMap<String, bool>,
    /// Directories that must never be deleted from (matched case-insensitively).
    #[serde(default = "default_protected_paths")]
    pub protected_paths: Vec<String>,
}

impl SecurityConfig {
    pub fn confirmation_required(&self, op: &str, default: bool) -> bool {
        self.require_confirmation.get(op).copied().unwrap_or(default)
    }

    pub fn operation_allowed(&self, op: &str, default: bool) -> bool {
        self.allowed_operations.get(op).copied().unwrap_or(default)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            require_confirmation: HashMap::new(),
            allowed_operations: HashMap::new(),
            protected_paths: default_protected_paths(),
        }
    }
}

/// OS and program-files roots, plus the Windows locations named by the
/// environment when present.
pub fn default_protected_paths() -> Vec<String> {
    let mut paths: Vec<String> = [
        r"C:\Windows",
        r"C:\Program Files",
        r"C:\Program Files (x86)",
        "/bin",
        "/boot",
        "/etc",
        "/sbin",
        "/usr/bin",
        "/usr/sbin",
        "/usr/lib",
        "/System",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect();

    for var in ["SYSTEMROOT", "PROGRAMFILES", "PROGRAMFILES(X86)"] {
        if let Ok(value) = std::env::var(var)
            && !value.trim().is_empty()
            && !paths.iter().any(|p| p.eq_ignore_ascii_case(&value))
        {
            paths.push(value);
        }
    }
    paths
}

/// Confidence scoring and gating.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    /// Recognitions scoring below this are treated as not understood.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    /// Multiplier applied when a match starts at the first character.
    #[serde(default = "default_start_bonus")]
    pub start_bonus: f64,
}

fn default_min_confidence() -> f64 {
    0.3
}

fn default_start_bonus() -> f64 {
    1.2
}

impl RecognitionConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(PipelineError::Config(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        // A bonus below 1 would make anchored matches score lower.
        if !self.start_bonus.is_finite() || self.start_bonus < 1.0 {
            return Err(PipelineError::Config(format!(
                "start_bonus must be >= 1.0, got {}",
                self.start_bonus
            )));
        }
        Ok(())
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            start_bonus: default_start_bonus(),
        }
    }
}
