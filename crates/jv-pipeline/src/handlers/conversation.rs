//! Conversational replies and clock queries. No capability port involved.

use chrono::Local;

use jv_ports::{PortResult, RenderRequest, ResponseCategory};
use jv_protocol::{ExecutionResult, Parameters};

use super::Collaborators;

pub(super) fn time(ctx: &Collaborators<'_>, _params: &Parameters) -> PortResult<ExecutionResult> {
    let now = Local::now().format("%I:%M %p").to_string();
    let response = ctx.render(RenderRequest::success("time", Some(now.as_str())));
    Ok(ExecutionResult::succeeded("time", response))
}

pub(super) fn date(ctx: &Collaborators<'_>, _params: &Parameters) -> PortResult<ExecutionResult> {
    let today = Local::now().format("%A, %B %d, %Y").to_string();
    let response = ctx.render(RenderRequest::success("date", Some(today.as_str())));
    Ok(ExecutionResult::succeeded("date", response))
}

fn reply(ctx: &Collaborators<'_>, category: ResponseCategory, intent: &str) -> ExecutionResult {
    let response = ctx.render(RenderRequest::new(category, intent));
    ExecutionResult::succeeded(intent, response)
}

pub(super) fn greeting(
    ctx: &Collaborators<'_>,
    _params: &Parameters,
) -> PortResult<ExecutionResult> {
    Ok(reply(ctx, ResponseCategory::Greeting, "greeting"))
}

pub(super) fn status(ctx: &Collaborators<'_>, _params: &Parameters) -> PortResult<ExecutionResult> {
    Ok(reply(ctx, ResponseCategory::Status, "status"))
}

pub(super) fn help(ctx: &Collaborators<'_>, _params: &Parameters) -> PortResult<ExecutionResult> {
    Ok(reply(ctx, ResponseCategory::Help, "help"))
}

pub(super) fn thank(ctx: &Collaborators<'_>, _params: &Parameters) -> PortResult<ExecutionResult> {
    Ok(reply(ctx, ResponseCategory::Thank, "thank"))
}

#[cfg(test)]
mod tests {
    use jv_ports::{MockDesktop, TemplateRenderer};

    use super::*;

    #[test]
    fn time_and_date_render_clock() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        let t = time(&ctx, &Parameters::default()).unwrap();
        assert!(t.success);
        assert!(t.response.starts_with("It's "));
        assert!(t.response.ends_with("M, sir."));

        let d = date(&ctx, &Parameters::default()).unwrap();
        assert!(d.response.starts_with("Today is "));
        assert!(desktop.calls().is_empty());
    }

    #[test]
    fn conversational_replies() {
        let desktop = MockDesktop::new();
        let renderer = TemplateRenderer::default();
        let ctx = Collaborators::uniform(&desktop, &renderer);

        assert_eq!(
            thank(&ctx, &Parameters::default()).unwrap().response,
            "You're welcome, sir."
        );
        assert_eq!(
            status(&ctx, &Parameters::default()).unwrap().response,
            "All systems nominal, sir. Ready to assist."
        );
        assert!(
            help(&ctx, &Parameters::default())
                .unwrap()
                .response
                .contains("Application control")
        );
        assert!(
            greeting(&ctx, &Parameters::default())
                .unwrap()
                .response
                .contains("Jarvis online")
        );
    }
}
