//! Response rendering: result category + intent -> user-facing text.
//!
//! The dispatcher decides *what* happened; the renderer decides how to say
//! it. `TemplateRenderer` is the built-in implementation with a fixed butler
//! persona and a configurable form of address.

use std::sync::LazyLock;

use chrono::{Local, Timelike};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(details|raw|error|sir)\}").expect("static regex"));

/// Kind of reply the dispatcher is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Success,
    Error,
    Confirmation,
    Unknown,
    Greeting,
    Status,
    Help,
    Thank,
}

impl ResponseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Confirmation => "confirmation",
            Self::Unknown => "unknown",
            Self::Greeting => "greeting",
            Self::Status => "status",
            Self::Help => "help",
            Self::Thank => "thank",
        }
    }
}

impl std::fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a renderer may use to phrase a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest<'a> {
    pub category: ResponseCategory,
    /// Intent whose templates to use (may differ from the reported intent,
    /// e.g. window screenshots reuse the screenshot phrasing).
    pub intent: &'a str,
    pub details: Option<&'a str>,
    pub error: Option<&'a str>,
}

impl<'a> RenderRequest<'a> {
    pub fn new(category: ResponseCategory, intent: &'a str) -> Self {
        Self {
            category,
            intent,
            details: None,
            error: None,
        }
    }

    pub fn success(intent: &'a str, details: Option<&'a str>) -> Self {
        Self {
            details,
            ..Self::new(ResponseCategory::Success, intent)
        }
    }

    pub fn error(intent: &'a str, error: &'a str) -> Self {
        Self {
            error: Some(error),
            ..Self::new(ResponseCategory::Error, intent)
        }
    }

    pub fn confirmation(intent: &'a str, details: &'a str) -> Self {
        Self {
            details: Some(details),
            ..Self::new(ResponseCategory::Confirmation, intent)
        }
    }
}

/// Turns a render request into the final natural-language string.
pub trait ResponseRenderer: Send + Sync {
    fn render(&self, request: &RenderRequest<'_>) -> String;
}

/// Template-based renderer.
///
/// Placeholders: `{sir}` is the form of address, `{details}` expands to
/// `": <details>"` (or nothing), `{raw}` to the details verbatim and
/// `{error}` to the error text.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    address_as: String,
}

impl TemplateRenderer {
    pub fn new(address_as: impl Into<String>) -> Self {
        Self {
            address_as: address_as.into(),
        }
    }

    pub fn address_as(&self) -> &str {
        &self.address_as
    }

    fn fill(&self, template: &str, request: &RenderRequest<'_>) -> String {
        let details = match request.details {
            Some(d) if !d.is_empty() && d.starts_with(':') => d.to_string(),
            Some(d) if !d.is_empty() => format!(": {d}"),
            _ => String::new(),
        };
        // Single pass: substituted text is never scanned for placeholders.
        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
                "details" => details.as_str(),
                "raw" => request.details.unwrap_or_default(),
                "error" => request.error.unwrap_or_default(),
                _ => self.address_as.as_str(),
            })
            .into_owned()
    }

    fn greeting(&self) -> String {
        let part_of_day = match Local::now().hour() {
            5..=11 => "Good morning",
            12..=16 => "Good afternoon",
            _ => "Good evening",
        };
        format!("{part_of_day}, {}. Jarvis online and ready.", self.address_as)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new("sir")
    }
}

fn success_template(intent: &str) -> &'static str {
    match intent {
        "launch_app" => "Application launched successfully{details}.",
        "close_app" => "Application closed{details}.",
        "switch_app" => "Switched{details}.",
        "screenshot" => "Screenshot captured{details}.",
        "volume" => "Volume adjusted{details}.",
        "mute" => "System muted, {sir}.",
        "system_info" | "find_files" | "list_apps" => "{raw}",
        "create_folder" => "Folder created{details}.",
        "delete_file" => "Deleted{details}.",
        "lock_screen" => "Workstation locked. Have a good break, {sir}.",
        "shutdown" => "Shutting down now, {sir}.",
        "restart" => "Restarting now, {sir}.",
        "sleep" => "Putting system to sleep, {sir}.",
        "time" => "It's {raw}, {sir}.",
        "date" => "Today is {raw}, {sir}.",
        _ => "Task completed{details}.",
    }
}

fn error_template(intent: &str) -> &'static str {
    match intent {
        "launch_app" => "I couldn't locate that application, {sir}. {error}",
        "close_app" => "I couldn't close that application, {sir}. {error}",
        "screenshot" => "Screenshot failed, {sir}. {error}",
        "find_files" => "I couldn't find any files matching that criteria, {sir}. {error}",
        "delete_file" => "I couldn't delete that file, {sir}. {error}",
        _ => "I encountered an issue, {sir}. {error}",
    }
}

fn confirmation_template(intent: &str) -> &'static str {
    match intent {
        "shutdown" => "Are you sure you want to shutdown? {raw}",
        "restart" => "Are you sure you want to restart? {raw}",
        "delete_file" => "Are you sure you want to delete? {raw}",
        "close_app" => "Close the application? {raw}",
        _ => "Proceed? {raw}",
    }
}

const HELP_TEXT: &str = "I can assist you with various tasks, {sir}:

Application control:
- \"Open Chrome\" / \"Close Firefox\" / \"Switch to VSCode\"

Screenshots:
- \"Take a screenshot\" / \"Screenshot this window\"

System control:
- \"Volume to 50%\" / \"Mute\" / \"Lock screen\"
- \"How's the system doing?\"

File operations:
- \"Open Documents folder\" / \"Find PDFs in Downloads\"
- \"Create folder Projects\"

Window management:
- \"Maximize\" / \"Minimize\"

Just speak naturally, and I'll understand what you need.";

impl ResponseRenderer for TemplateRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> String {
        match request.category {
            ResponseCategory::Success => self.fill(success_template(request.intent), request),
            ResponseCategory::Error => self.fill(error_template(request.intent), request),
            ResponseCategory::Confirmation => {
                self.fill(confirmation_template(request.intent), request)
            }
            ResponseCategory::Unknown => self.fill(
                "I'm not sure I understand, {sir}. Could you rephrase that?",
                request,
            ),
            ResponseCategory::Greeting => self.greeting(),
            ResponseCategory::Status => {
                self.fill("All systems nominal, {sir}. Ready to assist.", request)
            }
            ResponseCategory::Help => self.fill(HELP_TEXT, request),
            ResponseCategory::Thank => self.fill("You're welcome, {sir}.", request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(request: RenderRequest<'_>) -> String {
        TemplateRenderer::default().render(&request)
    }

    #[test]
    fn success_with_details() {
        assert_eq!(
            render(RenderRequest::success("launch_app", Some("chrome"))),
            "Application launched successfully: chrome."
        );
    }

    #[test]
    fn success_without_details() {
        assert_eq!(
            render(RenderRequest::success("create_folder", None)),
            "Folder created."
        );
    }

    #[test]
    fn details_with_leading_colon_kept() {
        assert_eq!(
            render(RenderRequest::success("volume", Some(": 50%"))),
            "Volume adjusted: 50%."
        );
    }

    #[test]
    fn raw_details_verbatim() {
        assert_eq!(
            render(RenderRequest::success("time", Some("09:30 AM"))),
            "It's 09:30 AM, sir."
        );
        assert_eq!(
            render(RenderRequest::success("find_files", Some("I found 2 file(s)"))),
            "I found 2 file(s)"
        );
    }

    #[test]
    fn user_text_is_not_expanded() {
        let renderer = TemplateRenderer::new("ma'am");
        assert_eq!(
            renderer.render(&RenderRequest::success("launch_app", Some("{sir}"))),
            "Application launched successfully: {sir}."
        );
        assert_eq!(
            renderer.render(&RenderRequest::error("launch_app", "bad name {details}")),
            "I couldn't locate that application, ma'am. bad name {details}"
        );
    }

    #[test]
    fn unknown_intent_success_falls_back() {
        assert_eq!(
            render(RenderRequest::success("weather", Some("sunny"))),
            "Task completed: sunny."
        );
    }

    #[test]
    fn error_embeds_message() {
        assert_eq!(
            render(RenderRequest::error("volume", "Volume must be between 0 and 100")),
            "I encountered an issue, sir. Volume must be between 0 and 100"
        );
        assert!(
            render(RenderRequest::error("launch_app", "not installed"))
                .starts_with("I couldn't locate that application")
        );
    }

    #[test]
    fn confirmation_includes_warning() {
        let text = render(RenderRequest::confirmation(
            "delete_file",
            "This will permanently delete: temp.txt",
        ));
        assert!(text.starts_with("Are you sure"));
        assert!(text.contains("temp.txt"));
    }

    #[test]
    fn custom_form_of_address() {
        let renderer = TemplateRenderer::new("ma'am");
        let text = renderer.render(&RenderRequest::new(ResponseCategory::Thank, "thank"));
        assert_eq!(text, "You're welcome, ma'am.");
    }

    #[test]
    fn greeting_mentions_address() {
        let text = render(RenderRequest::new(ResponseCategory::Greeting, "greeting"));
        assert!(text.starts_with("Good "));
        assert!(text.contains("sir"));
    }

    #[test]
    fn category_serialization() {
        assert_eq!(
            serde_json::to_string(&ResponseCategory::Confirmation).unwrap(),
            r#""confirmation""#
        );
        assert_eq!(ResponseCategory::Help.to_string(), "help");
    }
}
