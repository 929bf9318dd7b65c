//! Mock desktop for testing — implements every capability port.
//!
//! Records each call (operation + argument) and serves a small simulated
//! desktop: a list of running applications and a set of files. Individual
//! operations can be scripted to report failure, raise a `PortError`, or
//! panic, so the dispatcher's error paths can be exercised without an OS.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::json;

use crate::error::{PortError, PortResult};
use crate::outcome::ActionOutcome;
use crate::ports::{ApplicationControl, FileOps, ScreenshotCapture, SystemControl, WindowControl};
use crate::similarity::{CharOverlapMatcher, NameMatcher, normalize_app_name};

/// Minimum similarity for `close` to treat a running app as the target.
const CLOSE_MATCH_THRESHOLD: f64 = 0.7;
/// Minimum similarity for `switch_to` to pick a window.
const SWITCH_MATCH_THRESHOLD: f64 = 0.6;
/// `find_files` reports at most this many results.
const MAX_FIND_RESULTS: usize = 20;

/// One recorded port invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortCall {
    pub op: &'static str,
    pub arg: Option<String>,
}

#[derive(Debug, Clone)]
enum Script {
    Fail(String),
    Raise(String),
    Panic(String),
}

#[derive(Debug, Clone)]
struct MockApp {
    name: String,
    memory_mb: u64,
}

#[derive(Debug, Clone)]
struct MockFile {
    name: String,
    size: String,
    path: String,
}

/// Simulated desktop with call recording and per-operation scripting.
pub struct MockDesktop {
    calls: Mutex<Vec<PortCall>>,
    scripts: Mutex<HashMap<&'static str, Script>>,
    apps: Vec<MockApp>,
    files: Vec<MockFile>,
    matcher: Box<dyn NameMatcher>,
}

impl MockDesktop {
    /// Create an empty desktop: nothing running, no files.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            scripts: Mutex::new(HashMap::new()),
            apps: Vec::new(),
            files: Vec::new(),
            matcher: Box::new(CharOverlapMatcher),
        }
    }

    /// Create a desktop with a few running applications and sample files.
    pub fn with_sample_desktop() -> Self {
        let mut m = Self::new();
        m.add_app("Google Chrome", 512);
        m.add_app("Firefox", 380);
        m.add_app("Visual Studio Code", 640);
        m.add_app("Spotify", 210);
        m.add_file("report.pdf", "1.2 MB", "/home/user/Documents/report.pdf");
        m.add_file("notes.txt", "4 KB", "/home/user/Documents/notes.txt");
        m.add_file("budget.xlsx", "88 KB", "/home/user/Downloads/budget.xlsx");
        m.add_file("report-draft.docx", "310 KB", "/home/user/Downloads/report-draft.docx");
        m
    }

    pub fn add_app(&mut self, name: impl Into<String>, memory_mb: u64) {
        self.apps.push(MockApp {
            name: name.into(),
            memory_mb,
        });
    }

    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        size: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.files.push(MockFile {
            name: name.into(),
            size: size.into(),
            path: path.into(),
        });
    }

    /// Swap the fuzzy name scorer used by `close` and `switch_to`.
    pub fn set_matcher(&mut self, matcher: Box<dyn NameMatcher>) {
        self.matcher = matcher;
    }

    /// Make `op` return `success = false` with `message`.
    pub fn fail_on(&self, op: &'static str, message: impl Into<String>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(op, Script::Fail(message.into()));
    }

    /// Make `op` return `Err(PortError::Other(message))`.
    pub fn raise_on(&self, op: &'static str, message: impl Into<String>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(op, Script::Raise(message.into()));
    }

    /// Make `op` panic with `message`.
    pub fn panic_on(&self, op: &'static str, message: impl Into<String>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(op, Script::Panic(message.into()));
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<PortCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls to one operation.
    pub fn calls_to(&self, op: &str) -> Vec<PortCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.op == op)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.calls_to(op).len()
    }

    /// Record the call and apply any script for `op`.
    ///
    /// Returns `Ok(Some(_))` when a script replaces the simulated behaviour.
    fn enter(&self, op: &'static str, arg: Option<&str>) -> PortResult<Option<ActionOutcome>> {
        self.calls.lock().unwrap().push(PortCall {
            op,
            arg: arg.map(String::from),
        });

        // Clone out so the lock is released before a scripted panic.
        let script = self.scripts.lock().unwrap().get(op).cloned();
        match script {
            None => Ok(None),
            Some(Script::Fail(message)) => Ok(Some(ActionOutcome::failed(message))),
            Some(Script::Raise(message)) => Err(PortError::Other(message)),
            Some(Script::Panic(message)) => panic!("{message}"),
        }
    }

    fn best_app(&self, name: &str, threshold: f64) -> Option<&MockApp> {
        let target = normalize_app_name(name);
        if target.is_empty() {
            return None;
        }
        self.apps
            .iter()
            .map(|app| {
                let score = self.matcher.score(&target, &normalize_app_name(&app.name));
                (app, score)
            })
            .filter(|(_, score)| *score > threshold)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(app, _)| app)
    }
}

impl Default for MockDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationControl for MockDesktop {
    fn launch(&self, name: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("launch", Some(name))? {
            return Ok(scripted);
        }
        tracing::debug!(app = %name, "mock launch");
        Ok(ActionOutcome::ok(format!("Launched {name}")))
    }

    fn close(&self, name: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("close", Some(name))? {
            return Ok(scripted);
        }
        match self.best_app(name, CLOSE_MATCH_THRESHOLD) {
            Some(app) => Ok(ActionOutcome::ok(format!("Closed {}", app.name))),
            None => Ok(ActionOutcome::failed(format!("{name} is not running"))),
        }
    }

    fn close_all(&self, category: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("close_all", Some(category))? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok(format!("Closed all {category}")))
    }

    fn switch_to(&self, name: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("switch_to", Some(name))? {
            return Ok(scripted);
        }
        match self.best_app(name, SWITCH_MATCH_THRESHOLD) {
            Some(app) => Ok(ActionOutcome::ok(format!("Switched to {}", app.name))),
            None => Ok(ActionOutcome::failed(format!("No window found for {name}"))),
        }
    }

    fn list_running(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("list_running", None)? {
            return Ok(scripted);
        }
        let apps: Vec<_> = self
            .apps
            .iter()
            .map(|a| json!({ "name": a.name, "memory_mb": a.memory_mb }))
            .collect();
        let count = apps.len();
        Ok(ActionOutcome::ok(format!("{count} applications running"))
            .with_data(json!({ "apps": apps, "count": count })))
    }
}

impl ScreenshotCapture for MockDesktop {
    fn capture_full_screen(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("capture_full_screen", None)? {
            return Ok(scripted);
        }
        let path = "screenshots/screenshot_full.png";
        Ok(ActionOutcome::ok(format!("Saved to {path}")).with_filepath(path))
    }

    fn capture_window(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("capture_window", None)? {
            return Ok(scripted);
        }
        let path = "screenshots/screenshot_window.png";
        Ok(ActionOutcome::ok(format!("Saved to {path}")).with_filepath(path))
    }
}

impl SystemControl for MockDesktop {
    fn set_volume(&self, level: u8) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("set_volume", Some(&level.to_string()))? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok(format!("Volume set to {level}%")))
    }

    fn adjust_volume(&self, direction: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("adjust_volume", Some(direction))? {
            return Ok(scripted);
        }
        match direction {
            "up" | "down" => Ok(ActionOutcome::ok(format!("Volume turned {direction}"))),
            other => Ok(ActionOutcome::failed(format!(
                "Unknown volume direction: {other}"
            ))),
        }
    }

    fn mute(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("mute", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("Audio muted"))
    }

    fn get_system_info(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("get_system_info", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("System information collected").with_data(json!({
            "cpu": { "percent": 12.0, "count": 8 },
            "memory": { "percent": 41.0 },
            "disk": { "free": "120.5 GB" },
            "battery": { "percent": 87.0 },
        })))
    }

    fn lock_screen(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("lock_screen", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("Workstation locked"))
    }

    fn shutdown(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("shutdown", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("Shutdown scheduled"))
    }

    fn restart(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("restart", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("Restart scheduled"))
    }

    fn sleep(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("sleep", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("Entering sleep"))
    }
}

impl FileOps for MockDesktop {
    fn open_file(&self, path: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("open_file", Some(path))? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok(format!("Opened {path}")))
    }

    fn find_files(&self, query: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("find_files", Some(query))? {
            return Ok(scripted);
        }
        let needle = query.to_lowercase();
        let matches: Vec<_> = self
            .files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&needle))
            .collect();
        let truncated = matches.len() > MAX_FIND_RESULTS;
        let files: Vec<_> = matches
            .iter()
            .take(MAX_FIND_RESULTS)
            .map(|f| json!({ "name": f.name, "size": f.size, "path": f.path }))
            .collect();
        let count = files.len();
        Ok(ActionOutcome::ok(format!("Found {count} file(s)")).with_data(json!({
            "files": files,
            "count": count,
            "truncated": truncated,
        })))
    }

    fn create_folder(&self, name: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("create_folder", Some(name))? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok(format!("Created folder {name}")))
    }

    fn delete_file(&self, path: &str) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("delete_file", Some(path))? {
            return Ok(scripted);
        }
        match self.files.iter().find(|f| f.name == path || f.path == path) {
            Some(f) => Ok(ActionOutcome::ok(format!("Deleted {}", f.path))),
            None => Err(PortError::NotFound(path.to_string())),
        }
    }
}

impl WindowControl for MockDesktop {
    fn maximize(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("maximize", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("Window maximized"))
    }

    fn minimize(&self) -> PortResult<ActionOutcome> {
        if let Some(scripted) = self.enter("minimize", None)? {
            return Ok(scripted);
        }
        Ok(ActionOutcome::ok("Window minimized"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mock = MockDesktop::new();
        mock.launch("chrome").unwrap();
        mock.mute().unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].op, "launch");
        assert_eq!(calls[0].arg.as_deref(), Some("chrome"));
        assert_eq!(calls[1].op, "mute");
        assert!(calls[1].arg.is_none());
    }

    #[test]
    fn close_uses_fuzzy_match() {
        let mock = MockDesktop::with_sample_desktop();
        let outcome = mock.close("chrome").unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Closed Google Chrome"));
    }

    #[test]
    fn close_not_running_fails() {
        let mock = MockDesktop::with_sample_desktop();
        let outcome = mock.close("blender").unwrap();
        assert!(!outcome.success);
    }

    #[test]
    fn name_normalizing_to_nothing_matches_no_app() {
        let mock = MockDesktop::with_sample_desktop();
        for name in ["2048", "3.12", "!!"] {
            assert!(!mock.close(name).unwrap().success, "{name}");
            assert!(!mock.switch_to(name).unwrap().success, "{name}");
        }
    }

    #[test]
    fn switch_to_vscode() {
        let mock = MockDesktop::with_sample_desktop();
        let outcome = mock.switch_to("studio code").unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Switched to Visual Studio Code"));
    }

    #[test]
    fn list_running_reports_apps() {
        let mock = MockDesktop::with_sample_desktop();
        let outcome = mock.list_running().unwrap();
        let data = outcome.data.unwrap();
        assert_eq!(data["count"], 4);
        assert_eq!(data["apps"][0]["name"], "Google Chrome");
    }

    #[test]
    fn find_files_filters_by_name() {
        let mock = MockDesktop::with_sample_desktop();
        let data = mock.find_files("report").unwrap().data.unwrap();
        assert_eq!(data["count"], 2);
        assert_eq!(data["truncated"], false);
    }

    #[test]
    fn delete_missing_file_raises() {
        let mock = MockDesktop::with_sample_desktop();
        assert!(matches!(
            mock.delete_file("ghost.txt"),
            Err(PortError::NotFound(_))
        ));
    }

    #[test]
    fn scripted_failure() {
        let mock = MockDesktop::new();
        mock.fail_on("launch", "not installed");
        let outcome = mock.launch("photoshop").unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("not installed"));
        assert_eq!(mock.call_count("launch"), 1);
    }

    #[test]
    fn scripted_raise() {
        let mock = MockDesktop::new();
        mock.raise_on("mute", "audio device gone");
        let err = mock.mute().unwrap_err();
        assert_eq!(err.to_string(), "audio device gone");
    }

    #[test]
    #[should_panic(expected = "driver crashed")]
    fn scripted_panic() {
        let mock = MockDesktop::new();
        mock.panic_on("maximize", "driver crashed");
        let _ = mock.maximize();
    }

    #[test]
    fn capture_reports_filepath() {
        let mock = MockDesktop::new();
        let outcome = mock.capture_window().unwrap();
        assert_eq!(
            outcome.filepath.as_deref(),
            Some("screenshots/screenshot_window.png")
        );
    }
}
