//! System control handlers: audio, power, lock, system information.

use serde_json::Value;

use jv_ports::{PortResult, RenderRequest};
use jv_protocol::{ExecutionResult, Parameters};

use super::{Collaborators, outcome_result};

pub(super) fn volume(ctx: &Collaborators<'_>, params: &Parameters) -> PortResult<ExecutionResult> {
    if let Some(value) = params.value {
        let Some(level) = u8::try_from(value).ok().filter(|l| *l <= 100) else {
            let response = ctx.render(RenderRequest::error(
                "volume",
                "Volume must be between 0 and 100",
            ));
            return Ok(ExecutionResult::failed("volume", response));
        };
        let outcome = ctx.system.set_volume(level)?;
        let details = format!("{level}%");
        return Ok(outcome_result(
            ctx,
            "volume",
            "volume",
            outcome,
            Some(details.as_str()),
            "Failed to set volume",
        ));
    }

    if let Some(direction) = params.direction.as_deref() {
        let outcome = ctx.system.adjust_volume(direction)?;
        return Ok(outcome_result(
            ctx,
            "volume",
            "volume",
            outcome,
            Some(direction),
            "Failed to adjust volume",
        ));
    }

    let response = ctx.render(RenderRequest::error(
        "volume",
        "No volume value or direction specified",
    ));
    Ok(ExecutionResult::failed("volume", response))
}

pub(super) fn mute(ctx: &Collaborators<'_>, _params: &Parameters) -> PortResult<ExecutionResult> {
    let outcome = ctx.system.mute()?;
    Ok(outcome_result(ctx, "mute", "mute", outcome, None, "Failed to mute"))
}

pub(super) fn system_info(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.system.get_system_info()?;
    if !outcome.success {
        return Ok(outcome_result(
            ctx,
            "system_info",
            "system_info",
            outcome,
            None,
            "Failed to read system information",
        ));
    }
    let summary = outcome
        .data
        .as_ref()
        .map(summarize_system)
        .unwrap_or_else(|| outcome.message_or("System information unavailable").to_string());
    Ok(outcome_result(
        ctx,
        "system_info",
        "system_info",
        outcome,
        Some(summary.as_str()),
        "",
    ))
}

/// One-line summary: CPU, RAM, then battery and free disk when reported.
fn summarize_system(info: &Value) -> String {
    let percent = |section: &str| info[section]["percent"].as_f64().unwrap_or(0.0);

    let mut summary = format!(
        "All systems operational. CPU at {:.0}%, RAM at {:.0}%",
        percent("cpu"),
        percent("memory")
    );
    if let Some(battery) = info["battery"]["percent"].as_f64() {
        summary.push_str(&format!(", battery at {battery:.0}%"));
    }
    if let Some(free) = info["disk"]["free"].as_str() {
        summary.push_str(&format!(", {free} free on disk"));
    }
    summary.push('.');
    summary
}

pub(super) fn lock_screen(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.system.lock_screen()?;
    Ok(outcome_result(
        ctx,
        "lock_screen",
        "lock_screen",
        outcome,
        None,
        "Failed to lock the workstation",
    ))
}

pub(super) fn shutdown(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.system.shutdown()?;
    Ok(outcome_result(
        ctx,
        "shutdown",
        "shutdown",
        outcome,
        None,
        "Failed to shut down",
    ))
}

pub(super) fn restart(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    let outcome = ctx.system.restart()?;
    Ok(outcome_result(
        ctx,
        "restart",
        "restart",
        outcome,
        None,
        "Failed to restart",
    ))
}

pub(super) fn sleep(ctx: &Collaborators<'_>, _params: &Parameters) -> PortResult<ExecutionResult> {
    let outcome = ctx.system.sleep()?;
    Ok(outcome_result(
        ctx,
        "sleep",
        "sleep",
        outcome,
        None,
        "Failed to enter sleep",
    ))
}

#[cfg(test)]
mod tests {
    use jv_ports::{MockDesktop, PortError, TemplateRenderer};
    use serde_json::json;

    use super::*;

    fn value(v: i64) -> Parameters {
        Parameters {
            value: Some(v),
            ..Default::default()
        }
    }

    #[test]
    fn set_volume_level() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let result = volume(&ctx, &value(40)).unwrap();
        assert!(result.success);
        assert_eq!(result.response, "Volume adjusted: 40%.");
        let calls = desktop.calls_to("set_volume");
        assert_eq!(calls[0].arg.as_deref(), Some("40"));
    }

    #[test]
    fn out_of_range_never_reaches_port() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        for v in [-1, 101, 300] {
            let result = volume(&ctx, &value(v)).unwrap();
            assert!(!result.success);
        }
        assert_eq!(desktop.call_count("set_volume"), 0);
    }

    #[test]
    fn adjust_by_direction() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let params = Parameters {
            direction: Some("down".into()),
            ..Default::default()
        };
        let result = volume(&ctx, &params).unwrap();
        assert!(result.success);
        assert_eq!(desktop.call_count("adjust_volume"), 1);
    }

    #[test]
    fn volume_without_value_or_direction() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let result = volume(&ctx, &Parameters::default()).unwrap();
        assert!(!result.success);
        assert!(
            result
                .response
                .ends_with("No volume value or direction specified")
        );
        assert!(desktop.calls().is_empty());
    }

    #[test]
    fn system_info_summary_and_data() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let result = system_info(&ctx, &Parameters::default()).unwrap();
        assert!(result.success);
        assert_eq!(
            result.response,
            "All systems operational. CPU at 12%, RAM at 41%, battery at 87%, 120.5 GB free on disk."
        );
        assert_eq!(result.data.unwrap()["cpu"]["count"], 8);
    }

    #[test]
    fn summary_skips_missing_battery() {
        let info = json!({ "cpu": { "percent": 3.4 }, "memory": { "percent": 70.6 } });
        assert_eq!(
            summarize_system(&info),
            "All systems operational. CPU at 3%, RAM at 71%."
        );
    }

    #[test]
    fn port_error_propagates() {
        let desktop = MockDesktop::new();
        desktop.raise_on("mute", "audio device gone");
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let err = mute(&ctx, &Parameters::default()).unwrap_err();
        assert!(matches!(err, PortError::Other(ref m) if m == "audio device gone"));
    }

    #[test]
    fn power_operations_render_persona() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::new("ma'am");
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let result = shutdown(&ctx, &Parameters::default()).unwrap();
        assert_eq!(result.response, "Shutting down now, ma'am.");
        let result = sleep(&ctx, &Parameters::default()).unwrap();
        assert_eq!(result.response, "Putting system to sleep, ma'am.");
        assert_eq!(desktop.call_count("shutdown"), 1);
        assert_eq!(desktop.call_count("sleep"), 1);
    }
}
