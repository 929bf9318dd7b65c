//! Jarvis command-line surface: configuration and the interactive session.

pub mod config;
pub mod session;

pub use config::{CliConfig, LogFormat, PersonalityConfig};
pub use session::{Session, Step};
