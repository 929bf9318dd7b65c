use serde::{Deserialize, Serialize};

/// Intent name reported when nothing in the catalog matched.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Parameters extracted from a command by the winning pattern rule.
///
/// Each field corresponds to one semantic role a rule can bind to a capture
/// group. Absent roles stay `None` and are skipped on serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Application, file or folder the command acts on (cleaned).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Numeric setting such as a volume level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Relative adjustment, lower-cased ("up" / "down").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Free-text search query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Name for a resource to create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Parameters {
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
            && self.value.is_none()
            && self.direction.is_none()
            && self.query.is_none()
            && self.name.is_none()
    }

    /// Target as a string slice, treating a blank target as missing.
    pub fn target(&self) -> Option<&str> {
        non_blank(self.target.as_deref())
    }

    pub fn query(&self) -> Option<&str> {
        non_blank(self.query.as_deref())
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Outcome of matching one command against the intent catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Winning intent name, or `"unknown"`.
    pub intent: String,
    /// Match quality in `[0, 1]`.
    pub confidence: f64,
    /// Parameters pulled from the winning rule's capture groups.
    #[serde(default)]
    pub parameters: Parameters,
    /// The trimmed command that was recognized.
    pub raw_command: String,
}

impl RecognitionResult {
    /// A miss: no rule fired (or the command was empty).
    pub fn unknown(raw_command: impl Into<String>) -> Self {
        Self {
            intent: UNKNOWN_INTENT.to_string(),
            confidence: 0.0,
            parameters: Parameters::default(),
            raw_command: raw_command.into(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == UNKNOWN_INTENT
    }
}
