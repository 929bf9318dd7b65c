//! Command dispatcher — the single inbound entry point of the pipeline.
//!
//! `process` runs recognize -> validate -> confirmation gate -> handler and
//! always returns an `ExecutionResult`. Handler errors and panics are caught
//! here; nothing a collaborator does can escape a `process` call.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use jv_ports::{RenderRequest, ResponseCategory};
use jv_protocol::{ExecutionResult, Parameters, RecognitionResult};

use crate::catalog::IntentCatalog;
use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::handlers::{Collaborators, HandlerTable};
use crate::recognizer::IntentRecognizer;
use crate::validator::Validator;

/// Runs commands through the pipeline against a fixed set of collaborators.
pub struct CommandDispatcher<'a> {
    recognizer: IntentRecognizer,
    validator: Validator,
    handlers: HandlerTable,
    collaborators: Collaborators<'a>,
    min_confidence: f64,
}

impl<'a> CommandDispatcher<'a> {
    /// Built-in catalog and handlers, configured by `config`.
    pub fn new(config: &PipelineConfig, collaborators: Collaborators<'a>) -> PipelineResult<Self> {
        config.validate()?;
        let recognizer = IntentRecognizer::new(IntentCatalog::builtin()?, &config.recognition);
        Ok(Self::from_parts(
            recognizer,
            Validator::new(config.security.clone()),
            HandlerTable::with_defaults(),
            collaborators,
            config.recognition.min_confidence,
        ))
    }

    /// Assemble from pre-built stages, e.g. an extended catalog or a custom
    /// handler table.
    pub fn from_parts(
        recognizer: IntentRecognizer,
        validator: Validator,
        handlers: HandlerTable,
        collaborators: Collaborators<'a>,
        min_confidence: f64,
    ) -> Self {
        Self {
            recognizer,
            validator,
            handlers,
            collaborators,
            min_confidence,
        }
    }

    pub fn recognizer(&self) -> &IntentRecognizer {
        &self.recognizer
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    /// Process one command.
    ///
    /// Commands that validate with a warning and need confirmation are not
    /// executed; the result carries `requires_confirmation` instead.
    pub fn process(&self, command: &str) -> ExecutionResult {
        self.run(command, false)
    }

    /// Re-submit a command the user has confirmed.
    ///
    /// Recognition and validation run again, so invalid input is still
    /// rejected; only the confirmation gate is skipped.
    pub fn process_confirmed(&self, command: &str) -> ExecutionResult {
        self.run(command, true)
    }

    fn run(&self, command: &str, confirmed: bool) -> ExecutionResult {
        let recognition = self.recognizer.recognize(command);

        if recognition.is_unknown() || recognition.confidence < self.min_confidence {
            tracing::info!(
                command = %recognition.raw_command,
                intent = %recognition.intent,
                confidence = recognition.confidence,
                "command not understood"
            );
            return ExecutionResult::unrecognized(self.render(RenderRequest::new(
                ResponseCategory::Unknown,
                &recognition.intent,
            )));
        }

        let RecognitionResult {
            intent,
            confidence,
            parameters,
            ..
        } = recognition;
        tracing::info!(intent = %intent, confidence, confirmed, "command recognized");

        let validation = self.validator.validate(&intent, &parameters);
        if !validation.is_valid {
            let error = validation.error.as_deref().unwrap_or("Invalid command");
            tracing::warn!(intent = %intent, error, "validation failed");
            let response = self.render(RenderRequest::error(&intent, error));
            return ExecutionResult::failed(intent, response);
        }

        if !confirmed
            && let Some(warning) = validation.warning
            && self.validator.requires_confirmation(&intent)
        {
            tracing::info!(intent = %intent, warning = %warning, "awaiting confirmation");
            let response = self.render(RenderRequest::confirmation(&intent, &warning));
            return ExecutionResult::confirmation_required(intent, parameters, warning, response);
        }

        self.execute(&intent, &parameters)
    }

    fn execute(&self, intent: &str, parameters: &Parameters) -> ExecutionResult {
        let Some(handler) = self.handlers.lookup(intent) else {
            tracing::warn!(intent, "no handler registered");
            let message = format!(
                "I understand you want to {}, but that isn't implemented yet",
                intent.replace('_', " ")
            );
            let response = self.render(RenderRequest::error(intent, &message));
            return ExecutionResult::failed(intent, response);
        };

        let ctx = &self.collaborators;
        match catch_unwind(AssertUnwindSafe(|| handler(ctx, parameters))) {
            Ok(Ok(result)) => {
                if result.success {
                    tracing::info!(intent, "command executed");
                } else {
                    tracing::warn!(intent, response = %result.response, "command failed");
                }
                result
            }
            Ok(Err(err)) => {
                tracing::error!(intent, error = %err, "collaborator raised");
                let response = self.render(RenderRequest::error(intent, &err.to_string()));
                ExecutionResult::failed(intent, response)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(intent, error = %message, "handler panicked");
                let response = self.render(RenderRequest::error(intent, &message));
                ExecutionResult::failed(intent, response)
            }
        }
    }

    fn render(&self, request: RenderRequest<'_>) -> String {
        self.collaborators.render(request)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use jv_ports::{MockDesktop, PortResult, TemplateRenderer};

    use super::*;
    use crate::catalog::ParamMap;
    use crate::config::RecognitionConfig;

    fn dispatcher<'a>(
        desktop: &'a MockDesktop,
        renderer: &'a TemplateRenderer,
    ) -> CommandDispatcher<'a> {
        CommandDispatcher::new(
            &PipelineConfig::default(),
            Collaborators::uniform(desktop, renderer),
        )
        .unwrap()
    }

    #[test]
    fn open_chrome_launches_once() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process("open chrome");
        assert!(result.success);
        assert_eq!(result.intent, "launch_app");
        let calls = desktop.calls_to("launch");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].arg.as_deref(), Some("chrome"));
    }

    #[test]
    fn unknown_command() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process("bake a pizza");
        assert!(!result.success);
        assert_eq!(result.intent, "unknown");
        assert_eq!(
            result.response,
            "I'm not sure I understand, sir. Could you rephrase that?"
        );
        assert!(desktop.calls().is_empty());
    }

    #[test]
    fn low_confidence_is_unrecognized() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        // "mute" covers 4 of 36 characters, unanchored.
        let result = d.process("could you perhaps, if possible, mute");
        assert_eq!(result.intent, "unknown");
        assert_eq!(desktop.call_count("mute"), 0);
    }

    #[test]
    fn invalid_keeps_intent() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process("set volume to 150");
        assert!(!result.success);
        assert_eq!(result.intent, "volume");
        assert!(result.response.contains("Volume must be between 0 and 100"));
        assert_eq!(desktop.call_count("set_volume"), 0);
    }

    #[test]
    fn delete_requires_confirmation() {
        let desktop = MockDesktop::with_sample_desktop();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process("delete temp.txt");
        assert!(!result.success);
        assert!(result.requires_confirmation);
        assert_eq!(result.intent, "delete_file");
        assert_eq!(
            result.warning.as_deref(),
            Some("This will permanently delete: temp.txt")
        );
        assert_eq!(
            result.parameters.unwrap().target.as_deref(),
            Some("temp.txt")
        );
        assert_eq!(desktop.call_count("delete_file"), 0);
    }

    #[test]
    fn confirmed_resubmission_executes() {
        let desktop = MockDesktop::with_sample_desktop();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process_confirmed("delete notes.txt");
        assert!(result.success);
        assert!(!result.requires_confirmation);
        assert_eq!(desktop.call_count("delete_file"), 1);
    }

    #[test]
    fn confirmed_resubmission_still_validates() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process_confirmed("delete /etc/passwd");
        assert!(!result.success);
        assert!(result.response.contains("Cannot delete system files"));
        assert_eq!(desktop.call_count("delete_file"), 0);
    }

    #[test]
    fn unimplemented_intent() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process("split screen");
        assert!(!result.success);
        assert_eq!(result.intent, "split_screen");
        assert!(result.response.contains("split screen"));
        assert!(result.response.contains("isn't implemented"));
    }

    #[test]
    fn collaborator_error_is_contained() {
        let desktop = MockDesktop::new();
        desktop.raise_on("mute", "audio device gone");
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process("mute");
        assert!(!result.success);
        assert_eq!(result.intent, "mute");
        assert_eq!(result.response, "I encountered an issue, sir. audio device gone");
    }

    #[test]
    fn handler_panic_is_contained() {
        let desktop = MockDesktop::new();
        desktop.panic_on("maximize", "window manager crashed");
        let renderer = TemplateRenderer::default();
        let d = dispatcher(&desktop, &renderer);

        let result = d.process("maximize");
        assert!(!result.success);
        assert_eq!(result.intent, "maximize");
        assert!(result.response.contains("window manager crashed"));
    }

    #[test]
    fn custom_handler_and_intent() {
        fn play(ctx: &Collaborators<'_>, params: &Parameters) -> PortResult<ExecutionResult> {
            let outcome = ctx.apps.launch(params.target().unwrap_or_default())?;
            Ok(ExecutionResult::with_status(
                outcome.success,
                "play_music",
                "Playing",
            ))
        }

        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let catalog = IntentCatalog::builtin()
            .unwrap()
            .with_intent("play_music", &[(r"^play\s+(.+)", ParamMap::target(1))])
            .unwrap();
        let mut handlers = HandlerTable::with_defaults();
        handlers.register("play_music", play);

        let d = CommandDispatcher::from_parts(
            IntentRecognizer::new(catalog, &RecognitionConfig::default()),
            Validator::default(),
            handlers,
            Collaborators::uniform(&desktop, &renderer),
            0.3,
        );

        let result = d.process("play jazz");
        assert!(result.success);
        assert_eq!(result.intent, "play_music");
        assert_eq!(desktop.calls_to("launch")[0].arg.as_deref(), Some("jazz"));
    }

    #[test]
    fn invalid_config_rejected() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let mut config = PipelineConfig::default();
        config.recognition.min_confidence = 2.0;

        assert!(
            CommandDispatcher::new(&config, Collaborators::uniform(&desktop, &renderer)).is_err()
        );
    }

    #[test]
    fn panic_payloads() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&42_u32), "unexpected internal error");
    }
}
