use serde::{Deserialize, Serialize};

/// Correctness and safety verdict for a recognized, parameterized intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Non-blocking notice shown before execution (e.g. pending deletion).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ValidationOutcome {
    pub fn allow() -> Self {
        Self {
            is_valid: true,
            error: None,
            warning: None,
        }
    }

    pub fn reject(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
            warning: None,
        }
    }

    pub fn warn(warning: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            error: None,
            warning: Some(warning.into()),
        }
    }
}
