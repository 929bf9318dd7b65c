//! Line-oriented conversation state: one input line in, one step out.
//!
//! Holds the command awaiting a yes/no answer, if any. A "yes" re-submits it
//! through `process_confirmed` and a "no" (or a blank line) drops it. Any
//! other line drops it too and is handled as a new command.

use jv_pipeline::CommandDispatcher;
use jv_protocol::ExecutionResult;

/// What the surface should do after a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Nothing to print (blank line).
    Idle,
    /// Print the reply.
    Reply(ExecutionResult),
    /// Print the reply and wait for yes/no.
    Confirm(ExecutionResult),
    /// Pending command dropped.
    Cancelled,
    /// Leave the loop.
    Quit,
}

pub struct Session<'d, 'a> {
    dispatcher: &'d CommandDispatcher<'a>,
    pending: Option<String>,
}

impl<'d, 'a> Session<'d, 'a> {
    pub fn new(dispatcher: &'d CommandDispatcher<'a>) -> Self {
        Self {
            dispatcher,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn handle_line(&mut self, line: &str) -> Step {
        let line = line.trim();

        if let Some(command) = self.pending.take() {
            if is_affirmative(line) {
                tracing::info!(command = %command, "confirmed by user");
                return Step::Reply(self.dispatcher.process_confirmed(&command));
            }
            if line.is_empty() || is_negative(line) {
                tracing::info!(command = %command, "confirmation declined");
                return Step::Cancelled;
            }
            tracing::info!(command = %command, next = %line, "confirmation superseded");
        }

        if line.is_empty() {
            return Step::Idle;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            return Step::Quit;
        }

        let result = self.dispatcher.process(line);
        if result.requires_confirmation {
            self.pending = Some(line.to_string());
            Step::Confirm(result)
        } else {
            Step::Reply(result)
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.to_ascii_lowercase().as_str(),
        "y" | "yes" | "confirm" | "do it"
    )
}

fn is_negative(answer: &str) -> bool {
    matches!(
        answer.to_ascii_lowercase().as_str(),
        "n" | "no" | "cancel" | "abort" | "stop" | "never mind" | "nevermind"
    )
}
