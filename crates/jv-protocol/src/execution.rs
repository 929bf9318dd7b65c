use serde::{Deserialize, Serialize};

use crate::intent::{Parameters, UNKNOWN_INTENT};

/// Uniform result of processing one command.
///
/// Every path through the dispatcher (success, validation failure, unknown
/// intent, pending confirmation, handler failure) fills `success`, `response`
/// and `intent`; the remaining fields are set only where they apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    /// Natural-language reply for the user.
    pub response: String,
    pub intent: String,
    /// Structured payload from the collaborator (app list, file list, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Path of a file produced by the action (screenshots).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    /// Set when execution was deferred pending user assent.
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_confirmation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Echoed parameters, so a confirmed re-submission can be shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ExecutionResult {
    fn base(success: bool, intent: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            success,
            response: response.into(),
            intent: intent.into(),
            data: None,
            filepath: None,
            requires_confirmation: false,
            warning: None,
            parameters: None,
        }
    }

    pub fn succeeded(intent: impl Into<String>, response: impl Into<String>) -> Self {
        Self::base(true, intent, response)
    }

    pub fn failed(intent: impl Into<String>, response: impl Into<String>) -> Self {
        Self::base(false, intent, response)
    }

    pub fn with_status(
        success: bool,
        intent: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self::base(success, intent, response)
    }

    /// The command did not match anything with enough confidence.
    pub fn unrecognized(response: impl Into<String>) -> Self {
        Self::base(false, UNKNOWN_INTENT, response)
    }

    /// Execution deferred until the user confirms.
    pub fn confirmation_required(
        intent: impl Into<String>,
        parameters: Parameters,
        warning: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            requires_confirmation: true,
            warning: Some(warning.into()),
            parameters: Some(parameters),
            ..Self::base(false, intent, response)
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_filepath(mut self, filepath: Option<String>) -> Self {
        self.filepath = filepath;
        self
    }
}
