//! Jarvis command interpretation pipeline.
//!
//! Turns free-form text ("open chrome", "set volume to 40") into a validated
//! action and a natural-language reply, in three synchronous stages:
//! - **Recognize** (`recognizer`): regex catalog search with coverage-based
//!   confidence and parameter extraction.
//! - **Validate** (`validator`): per-intent correctness and safety rules plus
//!   the confirmation policy.
//! - **Dispatch** (`dispatcher`): confirmation gate, handler lookup, and
//!   conversion of every failure into an `ExecutionResult`.
//!
//! All side effects live behind the `jv-ports` traits.

pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod recognizer;
pub mod validator;

pub use catalog::{IntentCatalog, IntentDefinition, IntentSpec, ParamMap, PatternRule, RuleSpec};
pub use config::{PipelineConfig, RecognitionConfig, SecurityConfig};
pub use dispatcher::CommandDispatcher;
pub use error::{PipelineError, PipelineResult};
pub use handlers::{Collaborators, Handler, HandlerTable};
pub use recognizer::IntentRecognizer;
pub use validator::Validator;
