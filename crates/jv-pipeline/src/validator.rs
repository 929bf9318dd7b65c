//! Per-intent correctness and safety rules plus the confirmation policy.

use jv_protocol::{Parameters, ValidationOutcome};

use crate::config::{APP_CLOSE, FILE_DELETION, SYSTEM_SHUTDOWN, SecurityConfig};

/// Characters that may not appear in a new folder name.
const INVALID_FOLDER_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Read-only intents that never need a confirmation prompt.
const SAFE_OPERATIONS: &[&str] = &[
    "greeting",
    "status",
    "help",
    "thank",
    "time",
    "date",
    "weather",
    "system_info",
    "list_apps",
    "screenshot",
    "screenshot_window",
];

/// Validates recognized commands against the security configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    security: SecurityConfig,
}

impl Validator {
    pub fn new(security: SecurityConfig) -> Self {
        Self { security }
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Check `params` for `intent`. Intents without a rule are allowed.
    pub fn validate(&self, intent: &str, params: &Parameters) -> ValidationOutcome {
        match intent {
            "launch_app" => require_target(params, "No application specified"),
            "close_app" => self.validate_close(params),
            "open_file" => require_target(params, "No file or folder specified"),
            "volume" => validate_percentage(params, "Volume"),
            "brightness" => validate_percentage(params, "Brightness"),
            "delete_file" => self.validate_delete(params),
            "shutdown" => self.validate_power("shutdown"),
            "restart" => self.validate_power("restart"),
            "create_folder" => validate_folder_name(params),
            _ => ValidationOutcome::allow(),
        }
    }

    /// Whether a warned command must wait for the user to confirm.
    pub fn requires_confirmation(&self, intent: &str) -> bool {
        match intent {
            "shutdown" | "restart" | "delete_file" => true,
            "close_app" => self.security.confirmation_required(APP_CLOSE, false),
            _ => false,
        }
    }

    /// Coarse allowlist of benign intents.
    pub fn is_safe_operation(&self, intent: &str) -> bool {
        SAFE_OPERATIONS.contains(&intent)
    }

    fn validate_close(&self, params: &Parameters) -> ValidationOutcome {
        if params.target().is_none() {
            return ValidationOutcome::reject("No application specified");
        }
        if self.security.confirmation_required(APP_CLOSE, false) {
            return ValidationOutcome::warn(
                "This will close the application. Unsaved work may be lost.",
            );
        }
        ValidationOutcome::allow()
    }

    fn validate_delete(&self, params: &Parameters) -> ValidationOutcome {
        if !self.security.operation_allowed(FILE_DELETION, true) {
            return ValidationOutcome::reject("File deletion is disabled in security settings");
        }
        let Some(target) = params.target() else {
            return ValidationOutcome::reject("No file or folder specified");
        };
        if self.is_protected_path(target) {
            tracing::warn!(path = %target, "refusing to delete under a protected path");
            return ValidationOutcome::reject("Cannot delete system files or directories");
        }
        ValidationOutcome::warn(format!("This will permanently delete: {target}"))
    }

    fn validate_power(&self, action: &str) -> ValidationOutcome {
        if self.security.confirmation_required(SYSTEM_SHUTDOWN, true) {
            return ValidationOutcome::warn(format!(
                "This will {action} the system. All applications will be closed."
            ));
        }
        ValidationOutcome::allow()
    }

    /// True when `target`, as typed or resolved against the working
    /// directory, lies at or under a protected root. Both sides are
    /// compared in lexically normalized form.
    fn is_protected_path(&self, target: &str) -> bool {
        let mut candidates = vec![normalize_path(target)];
        if let Ok(absolute) = std::path::absolute(target) {
            candidates.push(normalize_path(&absolute.to_string_lossy()));
        }

        self.security
            .protected_paths
            .iter()
            .filter(|root| !root.trim().is_empty())
            .map(|root| normalize_path(root))
            .any(|root| candidates.iter().any(|path| is_under(path, &root)))
    }
}

/// Lower-case, `/`-separated form of `path` with `.` dropped and `..`
/// resolved. Never climbs above the root or drive.
fn normalize_path(path: &str) -> String {
    let path = path.trim().to_lowercase().replace('\\', "/");
    let mut components = path.split('/').peekable();
    let root = match components.peek().copied() {
        Some("") if path.starts_with('/') => "/".to_string(),
        Some(drive) if is_drive(drive) => {
            components.next();
            format!("{drive}/")
        }
        _ => String::new(),
    };

    let mut resolved: Vec<&str> = Vec::new();
    for component in components {
        match component {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            name => resolved.push(name),
        }
    }
    format!("{root}{}", resolved.join("/"))
}

fn is_drive(component: &str) -> bool {
    let bytes = component.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// `path` and `root` are both normalized.
fn is_under(path: &str, root: &str) -> bool {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() {
        // Filesystem root itself.
        return path.starts_with(root);
    }
    path == trimmed
        || path
            .strip_prefix(trimmed)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn require_target(params: &Parameters, error: &str) -> ValidationOutcome {
    match params.target() {
        Some(_) => ValidationOutcome::allow(),
        None => ValidationOutcome::reject(error),
    }
}

fn validate_percentage(params: &Parameters, setting: &str) -> ValidationOutcome {
    match params.value {
        Some(v) if !(0..=100).contains(&v) => {
            ValidationOutcome::reject(format!("{setting} must be between 0 and 100"))
        }
        _ => ValidationOutcome::allow(),
    }
}

fn validate_folder_name(params: &Parameters) -> ValidationOutcome {
    let Some(name) = params.name() else {
        return ValidationOutcome::reject("No folder name specified");
    };
    if name.contains(INVALID_FOLDER_CHARS) {
        return ValidationOutcome::reject(format!(
            "Folder name contains invalid characters: {}",
            INVALID_FOLDER_CHARS.iter().collect::<String>()
        ));
    }
    ValidationOutcome::allow()
}
