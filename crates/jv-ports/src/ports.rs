//! Capability port traits.
//!
//! Implementations own all side effects (processes, audio, power state,
//! files). Each operation returns `Ok(ActionOutcome)` when it ran, whether or
//! not it succeeded, and `Err(PortError)` when the collaborator itself failed.

use crate::error::PortResult;
use crate::outcome::ActionOutcome;

/// Desktop application lifecycle.
pub trait ApplicationControl: Send + Sync {
    fn launch(&self, name: &str) -> PortResult<ActionOutcome>;

    fn close(&self, name: &str) -> PortResult<ActionOutcome>;

    /// Close every running application of a category (e.g. "browsers").
    fn close_all(&self, category: &str) -> PortResult<ActionOutcome>;

    fn switch_to(&self, name: &str) -> PortResult<ActionOutcome>;

    /// Running applications. `data` is `{"apps": [{"name", "memory_mb"}], "count"}`.
    fn list_running(&self) -> PortResult<ActionOutcome>;
}

/// Screen capture. Successful outcomes carry `filepath`.
pub trait ScreenshotCapture: Send + Sync {
    fn capture_full_screen(&self) -> PortResult<ActionOutcome>;

    fn capture_window(&self) -> PortResult<ActionOutcome>;
}

/// Audio, power and host information.
pub trait SystemControl: Send + Sync {
    /// Set the master volume to an absolute level in `0..=100`.
    fn set_volume(&self, level: u8) -> PortResult<ActionOutcome>;

    /// Step the volume `"up"` or `"down"`.
    fn adjust_volume(&self, direction: &str) -> PortResult<ActionOutcome>;

    fn mute(&self) -> PortResult<ActionOutcome>;

    /// Host snapshot. `data` is
    /// `{"cpu": {"percent"}, "memory": {"percent"}, "disk": {"free"}, "battery": {"percent"} | null}`.
    fn get_system_info(&self) -> PortResult<ActionOutcome>;

    fn lock_screen(&self) -> PortResult<ActionOutcome>;

    fn shutdown(&self) -> PortResult<ActionOutcome>;

    fn restart(&self) -> PortResult<ActionOutcome>;

    fn sleep(&self) -> PortResult<ActionOutcome>;
}

/// Filesystem operations.
pub trait FileOps: Send + Sync {
    fn open_file(&self, path: &str) -> PortResult<ActionOutcome>;

    /// Search by name. `data` is `{"files": [{"name", "size", "path"}], "count", "truncated"}`.
    fn find_files(&self, query: &str) -> PortResult<ActionOutcome>;

    fn create_folder(&self, name: &str) -> PortResult<ActionOutcome>;

    fn delete_file(&self, path: &str) -> PortResult<ActionOutcome>;
}

/// Active-window management.
pub trait WindowControl: Send + Sync {
    fn maximize(&self) -> PortResult<ActionOutcome>;

    fn minimize(&self) -> PortResult<ActionOutcome>;
}
