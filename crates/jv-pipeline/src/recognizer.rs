//! Intent recognizer: catalog search, confidence scoring, parameter extraction.
//!
//! Every rule of every intent is searched against the command. A match scores
//! `matched_chars / command_chars`, multiplied by the start bonus when the
//! match begins at the first character, clamped to `[0, 1]`. The highest
//! score wins; on a tie the earlier rule in catalog order is kept.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use jv_protocol::{Parameters, RecognitionResult};

use crate::catalog::{IntentCatalog, ParamMap};
use crate::config::RecognitionConfig;
use crate::error::PipelineResult;

static ARTICLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(a|an|the)\b").expect("static regex"));
static TRAILING_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(application|program|app)$").expect("static regex"));

/// Maps raw command text to the best-matching intent.
#[derive(Debug, Clone)]
pub struct IntentRecognizer {
    catalog: IntentCatalog,
    start_bonus: f64,
}

impl IntentRecognizer {
    pub fn new(catalog: IntentCatalog, config: &RecognitionConfig) -> Self {
        Self {
            catalog,
            start_bonus: config.start_bonus,
        }
    }

    /// Built-in catalog with default scoring.
    pub fn with_defaults() -> PipelineResult<Self> {
        Ok(Self::new(
            IntentCatalog::builtin()?,
            &RecognitionConfig::default(),
        ))
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// Recognize a single command. Pure: the same input always yields the
    /// same result.
    pub fn recognize(&self, command: &str) -> RecognitionResult {
        let command = command.trim();
        if command.is_empty() {
            return RecognitionResult::unknown(command);
        }

        let total_chars = command.chars().count();
        let mut best: Option<(f64, &str, ParamMap, Captures<'_>)> = None;
        let mut best_confidence = 0.0;

        for intent in self.catalog.intents() {
            for rule in &intent.rules {
                let Some(caps) = rule.regex.captures(command) else {
                    continue;
                };
                let Some(m) = caps.get(0) else {
                    continue;
                };
                let confidence = match_confidence(
                    m.start() == 0,
                    m.as_str().chars().count(),
                    total_chars,
                    self.start_bonus,
                );
                if confidence > best_confidence {
                    best_confidence = confidence;
                    best = Some((confidence, intent.name.as_str(), rule.params, caps));
                }
            }
        }

        let Some((confidence, intent, params, caps)) = best else {
            tracing::debug!(command, "no intent matched");
            return RecognitionResult::unknown(command);
        };

        let parameters = extract_parameters(&caps, &params);
        tracing::debug!(command, intent, confidence, "intent recognized");

        RecognitionResult {
            intent: intent.to_string(),
            confidence,
            parameters,
            raw_command: command.to_string(),
        }
    }

    /// Names of every intent the recognizer can produce, in catalog order.
    pub fn possible_intents(&self) -> Vec<&str> {
        self.catalog.names()
    }
}

/// Coverage-based confidence for one match, clamped to `[0, 1]`.
pub fn match_confidence(
    anchored: bool,
    matched_chars: usize,
    total_chars: usize,
    start_bonus: f64,
) -> f64 {
    if total_chars == 0 {
        return 0.0;
    }
    let mut confidence = matched_chars as f64 / total_chars as f64;
    if anchored {
        confidence *= start_bonus;
    }
    confidence.clamp(0.0, 1.0)
}

fn extract_parameters(caps: &Captures<'_>, map: &ParamMap) -> Parameters {
    let group = |idx: Option<usize>| idx.and_then(|i| caps.get(i)).map(|m| m.as_str().trim());

    Parameters {
        target: group(map.target).map(clean_target),
        value: group(map.value).and_then(|v| v.parse().ok()),
        direction: group(map.direction).map(str::to_lowercase),
        query: group(map.query).map(String::from),
        name: group(map.name).map(String::from),
    }
}

/// Strip articles and a trailing "application"/"program"/"app", then
/// collapse whitespace.
pub fn clean_target(target: &str) -> String {
    let without_articles = ARTICLES.replace_all(target, "");
    let without_qualifier = TRAILING_QUALIFIER.replace(without_articles.trim_end(), "");
    without_qualifier
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
