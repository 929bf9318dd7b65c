//! Application control handlers.

use serde_json::Value;

use jv_ports::{PortResult, RenderRequest};
use jv_protocol::{ExecutionResult, Parameters};

use super::{Collaborators, outcome_result};

/// `list_apps` shows at most this many entries.
const MAX_LISTED_APPS: usize = 10;

pub(super) fn launch_app(
    ctx: &Collaborators<'_>,
    params: &Parameters,
) -> PortResult<ExecutionResult> {
    let target = params.target().unwrap_or_default();
    let outcome = ctx.apps.launch(target)?;
    Ok(outcome_result(
        ctx,
        "launch_app",
        "launch_app",
        outcome,
        Some(target),
        "Failed to launch application",
    ))
}

/// "close all browsers" closes a whole category; anything else closes one app.
pub(super) fn close_app(
    ctx: &Collaborators<'_>,
    params: &Parameters,
) -> PortResult<ExecutionResult> {
    let target = params.target().unwrap_or_default();

    if target.split_whitespace().any(|w| w.eq_ignore_ascii_case("all")) {
        let category = target
            .split_whitespace()
            .filter(|w| !w.eq_ignore_ascii_case("all"))
            .collect::<Vec<_>>()
            .join(" ");
        if category.is_empty() {
            let response = ctx.render(RenderRequest::error(
                "close_app",
                "Please specify what to close",
            ));
            return Ok(ExecutionResult::failed("close_app", response));
        }
        let outcome = ctx.apps.close_all(&category)?;
        return Ok(outcome_result(
            ctx,
            "close_app",
            "close_app",
            outcome,
            Some(category.as_str()),
            "Failed to close applications",
        ));
    }

    let outcome = ctx.apps.close(target)?;
    Ok(outcome_result(
        ctx,
        "close_app",
        "close_app",
        outcome,
        Some(target),
        "Failed to close application",
    ))
}

pub(super) fn switch_app(
    ctx: &Collaborators<'_>,
    params: &Parameters,
) -> PortResult<ExecutionResult> {
    let target = params.target().unwrap_or_default();
    let outcome = ctx.apps.switch_to(target)?;
    Ok(outcome_result(
        ctx,
        "switch_app",
        "switch_app",
        outcome,
        Some(target),
        "Failed to switch application",
    ))
}

pub(super) fn list_apps(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let mut outcome = ctx.apps.list_running()?;
    if !outcome.success {
        return Ok(outcome_result(
            ctx,
            "list_apps",
            "list_apps",
            outcome,
            None,
            "Failed to list applications",
        ));
    }

    let apps = outcome
        .data
        .take()
        .and_then(|mut d| d.get_mut("apps").map(Value::take))
        .unwrap_or_else(|| Value::Array(Vec::new()));
    let summary = summarize_apps(&apps);

    let mut result = outcome_result(
        ctx,
        "list_apps",
        "list_apps",
        outcome,
        Some(summary.as_str()),
        "",
    );
    result.data = Some(apps);
    Ok(result)
}

fn summarize_apps(apps: &Value) -> String {
    let entries = apps.as_array().map(Vec::as_slice).unwrap_or_default();
    let mut summary = format!("Running {} applications:", entries.len());
    for app in entries.iter().take(MAX_LISTED_APPS) {
        let name = app["name"].as_str().unwrap_or("unknown");
        match app["memory_mb"].as_f64() {
            Some(mb) => summary.push_str(&format!("\n- {name} ({mb:.0} MB)")),
            None => summary.push_str(&format!("\n- {name}")),
        }
    }
    summary
}
