//! Capability ports consumed by the Jarvis command pipeline.
//!
//! The pipeline never touches the OS itself. Every side effect goes through
//! one of these traits:
//! - `ApplicationControl`: launch/close/switch/list desktop applications
//! - `ScreenshotCapture`: full-screen and active-window captures
//! - `SystemControl`: volume, power, lock and system information
//! - `FileOps`: open/find/create/delete on the filesystem
//! - `WindowControl`: maximize/minimize the active window
//! - `ResponseRenderer`: turns a result category into user-facing text
//!
//! `MockDesktop` implements all capability ports with call recording for tests.

pub mod error;
pub mod mock;
pub mod outcome;
pub mod ports;
pub mod renderer;
pub mod similarity;

pub use error::{PortError, PortResult};
pub use mock::{MockDesktop, PortCall};
pub use outcome::ActionOutcome;
pub use ports::{ApplicationControl, FileOps, ScreenshotCapture, SystemControl, WindowControl};
pub use renderer::{RenderRequest, ResponseCategory, ResponseRenderer, TemplateRenderer};
pub use similarity::{CharOverlapMatcher, NameMatcher, normalize_app_name};
