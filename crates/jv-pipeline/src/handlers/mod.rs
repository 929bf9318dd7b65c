//! Intent handlers and the name -> handler table.
//!
//! A handler makes exactly one collaborator call and maps its
//! `ActionOutcome` into an `ExecutionResult`, asking the renderer for
//! success- or error-flavoured text. Handlers return `Err` only when the
//! collaborator itself raised; the dispatcher turns that into a failed
//! result.

mod apps;
mod conversation;
mod desktop;
mod files;
mod system;

use std::collections::HashMap;

use jv_ports::{
    ActionOutcome, ApplicationControl, FileOps, PortResult, RenderRequest, ResponseRenderer,
    ScreenshotCapture, SystemControl, WindowControl,
};
use jv_protocol::{ExecutionResult, Parameters};

/// External collaborators a handler may call.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub apps: &'a dyn ApplicationControl,
    pub screenshots: &'a dyn ScreenshotCapture,
    pub system: &'a dyn SystemControl,
    pub files: &'a dyn FileOps,
    pub windows: &'a dyn WindowControl,
    pub renderer: &'a dyn ResponseRenderer,
}

impl<'a> Collaborators<'a> {
    /// Use one object for every capability port.
    pub fn uniform<D>(desktop: &'a D, renderer: &'a dyn ResponseRenderer) -> Self
    where
        D: ApplicationControl + ScreenshotCapture + SystemControl + FileOps + WindowControl,
    {
        Self {
            apps: desktop,
            screenshots: desktop,
            system: desktop,
            files: desktop,
            windows: desktop,
            renderer,
        }
    }

    pub(crate) fn render(&self, request: RenderRequest<'_>) -> String {
        self.renderer.render(&request)
    }
}

/// Acts on one recognized, validated intent.
pub type Handler = fn(&Collaborators<'_>, &Parameters) -> PortResult<ExecutionResult>;

/// Explicit intent name -> handler mapping, built once at start-up.
#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    index: HashMap<&'static str, Handler>,
}

impl HandlerTable {
    /// Empty table; every intent is reported as not implemented.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers for every built-in intent that has a collaborator.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register("launch_app", apps::launch_app);
        table.register("close_app", apps::close_app);
        table.register("switch_app", apps::switch_app);
        table.register("list_apps", apps::list_apps);
        table.register("screenshot", desktop::screenshot);
        table.register("screenshot_window", desktop::screenshot_window);
        table.register("maximize", desktop::maximize);
        table.register("minimize", desktop::minimize);
        table.register("volume", system::volume);
        table.register("mute", system::mute);
        table.register("system_info", system::system_info);
        table.register("lock_screen", system::lock_screen);
        table.register("shutdown", system::shutdown);
        table.register("restart", system::restart);
        table.register("sleep", system::sleep);
        table.register("open_file", files::open_file);
        table.register("find_files", files::find_files);
        table.register("create_folder", files::create_folder);
        table.register("delete_file", files::delete_file);
        table.register("time", conversation::time);
        table.register("date", conversation::date);
        table.register("greeting", conversation::greeting);
        table.register("status", conversation::status);
        table.register("help", conversation::help);
        table.register("thank", conversation::thank);
        table
    }

    /// Bind `intent` to `handler`, returning any handler it replaces.
    pub fn register(&mut self, intent: &'static str, handler: Handler) -> Option<Handler> {
        self.index.insert(intent, handler)
    }

    pub fn lookup(&self, intent: &str) -> Option<Handler> {
        self.index.get(intent).copied()
    }

    pub fn contains(&self, intent: &str) -> bool {
        self.index.contains_key(intent)
    }

    /// Registered intent names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.index.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Map a collaborator outcome to a result for `intent`, rendered with the
/// templates of `render_as`.
///
/// `details` only feeds the success text; on failure the collaborator's
/// message (or `fallback`) is embedded instead. Data and file path are
/// carried over as-is.
pub(crate) fn outcome_result(
    ctx: &Collaborators<'_>,
    intent: &str,
    render_as: &str,
    outcome: ActionOutcome,
    details: Option<&str>,
    fallback: &str,
) -> ExecutionResult {
    let response = if outcome.success {
        ctx.render(RenderRequest::success(render_as, details))
    } else {
        ctx.render(RenderRequest::error(render_as, outcome.message_or(fallback)))
    };

    let mut result = ExecutionResult::with_status(outcome.success, intent, response)
        .with_filepath(outcome.filepath);
    if let Some(data) = outcome.data {
        result = result.with_data(data);
    }
    result
}

#[cfg(test)]
mod tests {
    use jv_ports::{MockDesktop, TemplateRenderer};

    use super::*;

    #[test]
    fn defaults_cover_implemented_intents() {
        let table = HandlerTable::with_defaults();
        assert_eq!(table.len(), 25);
        for intent in ["launch_app", "delete_file", "time", "thank"] {
            assert!(table.contains(intent), "{intent}");
        }
        for intent in ["screenshot_region", "split_screen", "weather", "brightness"] {
            assert!(table.lookup(intent).is_none(), "{intent}");
        }
    }

    #[test]
    fn register_replaces_existing() {
        fn custom(
            _: &Collaborators<'_>,
            _: &Parameters,
        ) -> PortResult<ExecutionResult> {
            Ok(ExecutionResult::succeeded("weather", "Sunny"))
        }

        let mut table = HandlerTable::with_defaults();
        assert!(table.register("weather", custom).is_none());
        assert!(table.register("weather", custom).is_some());
        assert!(table.contains("weather"));
    }

    #[test]
    fn names_sorted() {
        let names = HandlerTable::with_defaults().names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn outcome_result_failure_embeds_message() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let result = outcome_result(
            &ctx,
            "mute",
            "mute",
            ActionOutcome::failed("no audio device"),
            None,
            "Failed to mute",
        );
        assert!(!result.success);
        assert_eq!(result.intent, "mute");
        assert_eq!(
            result.response,
            "I encountered an issue, sir. no audio device"
        );
    }
}
