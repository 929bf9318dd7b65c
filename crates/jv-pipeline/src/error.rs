//! Pipeline construction error types.
//!
//! Processing a command never fails (every outcome is an `ExecutionResult`);
//! these errors only arise while building the catalog or loading settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pattern for intent '{intent}': {source}")]
    Pattern {
        intent: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate intent: {0}")]
    DuplicateIntent(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for pipeline construction results.
pub type PipelineResult<T> = Result<T, PipelineError>;
