//! Screenshot and window management handlers.

use jv_ports::PortResult;
use jv_protocol::{ExecutionResult, Parameters};

use super::{Collaborators, outcome_result};

pub(super) fn screenshot(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.screenshots.capture_full_screen()?;
    let details = outcome.filepath.clone();
    Ok(outcome_result(
        ctx,
        "screenshot",
        "screenshot",
        outcome,
        details.as_deref(),
        "Failed to capture screenshot",
    ))
}

// Window captures reuse the screenshot phrasing.
pub(super) fn screenshot_window(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.screenshots.capture_window()?;
    let details = outcome.filepath.clone();
    Ok(outcome_result(
        ctx,
        "screenshot_window",
        "screenshot",
        outcome,
        details.as_deref(),
        "Failed to capture window",
    ))
}

pub(super) fn maximize(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.windows.maximize()?;
    Ok(outcome_result(
        ctx,
        "maximize",
        "maximize",
        outcome,
        None,
        "Failed to maximize window",
    ))
}

pub(super) fn minimize(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.windows.minimize()?;
    Ok(outcome_result(
        ctx,
        "minimize",
        "minimize",
        outcome,
        None,
        "Failed to minimize window",
    ))
}
