//! Jarvis — interactive desktop assistant shell.
//!
//! Reads commands from stdin one line at a time, runs them through the
//! command pipeline against a simulated desktop and prints the replies.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use jv_cli::{CliConfig, LogFormat, Session, Step};
use jv_pipeline::{Collaborators, CommandDispatcher};
use jv_ports::{MockDesktop, TemplateRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => CliConfig::from_file(&path)?,
        None => CliConfig::default(),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jarvis starting");

    // ── Pipeline ────────────────────────────────────────────────
    // No OS backends yet; every capability runs against the simulated desktop.
    let desktop = MockDesktop::with_sample_desktop();
    let renderer = TemplateRenderer::new(config.personality.address_as.clone());
    let dispatcher = CommandDispatcher::new(
        &config.pipeline(),
        Collaborators::uniform(&desktop, &renderer),
    )?;
    tracing::info!(
        intents = dispatcher.recognizer().possible_intents().len(),
        handlers = dispatcher.handlers().len(),
        "pipeline ready"
    );

    let mut session = Session::new(&dispatcher);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Jarvis online. Type a command, or 'exit' to leave.");
    loop {
        prompt(session.pending().is_some())?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received");
                break;
            }
        };
        // EOF
        let Some(line) = line else {
            break;
        };

        match session.handle_line(&line) {
            Step::Idle => {}
            Step::Reply(result) | Step::Confirm(result) => {
                tracing::debug!(result = %serde_json::to_string(&result)?, "execution result");
                println!("{}", result.response);
            }
            Step::Cancelled => println!("Cancelled."),
            Step::Quit => break,
        }
    }

    println!("Goodbye, {}.", config.personality.address_as);
    tracing::info!("jarvis stopped");
    Ok(())
}

fn prompt(awaiting_confirmation: bool) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    if awaiting_confirmation {
        write!(stdout, "(yes/no) > ")?;
    } else {
        write!(stdout, "> ")?;
    }
    stdout.flush()
}
