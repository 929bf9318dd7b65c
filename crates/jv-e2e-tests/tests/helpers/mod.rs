//! Shared test harness for E2E integration tests.
//!
//! Owns a recording `MockDesktop`, the template renderer and a pipeline
//! configuration, and builds real dispatchers over them so tests exercise
//! every stage across crate boundaries.

#![allow(dead_code)]

use jv_pipeline::{Collaborators, CommandDispatcher, PipelineConfig};
use jv_ports::{MockDesktop, PortCall, TemplateRenderer};
use jv_protocol::ExecutionResult;

pub struct TestHarness {
    /// Simulated desktop; inspect with `calls()` / `call_count()`.
    pub desktop: MockDesktop,
    pub renderer: TemplateRenderer,
    pub config: PipelineConfig,
}

impl TestHarness {
    /// Sample desktop (Chrome, Firefox, VS Code, Spotify; a few documents)
    /// with default configuration.
    pub fn with_sample_desktop() -> Self {
        Self {
            desktop: MockDesktop::with_sample_desktop(),
            renderer: TemplateRenderer::default(),
            config: PipelineConfig::default(),
        }
    }

    /// Nothing running, no files.
    pub fn empty() -> Self {
        Self {
            desktop: MockDesktop::new(),
            renderer: TemplateRenderer::default(),
            config: PipelineConfig::default(),
        }
    }

    /// Sample desktop with configuration parsed from a TOML fragment.
    pub fn with_config_toml(toml: &str) -> Self {
        Self {
            config: toml::from_str(toml).expect("valid pipeline config"),
            ..Self::with_sample_desktop()
        }
    }

    pub fn dispatcher(&self) -> CommandDispatcher<'_> {
        CommandDispatcher::new(
            &self.config,
            Collaborators::uniform(&self.desktop, &self.renderer),
        )
        .expect("dispatcher builds")
    }

    pub fn process(&self, command: &str) -> ExecutionResult {
        self.dispatcher().process(command)
    }

    pub fn process_confirmed(&self, command: &str) -> ExecutionResult {
        self.dispatcher().process_confirmed(command)
    }

    pub fn calls(&self) -> Vec<PortCall> {
        self.desktop.calls()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.desktop.call_count(op)
    }

    /// Argument of the only call to `op`; panics unless called exactly once.
    pub fn single_arg(&self, op: &str) -> Option<String> {
        let calls = self.desktop.calls_to(op);
        assert_eq!(calls.len(), 1, "expected exactly one call to {op}: {calls:?}");
        calls[0].arg.clone()
    }
}
