//! File operation handlers.

use serde_json::Value;

use jv_ports::PortResult;
use jv_protocol::{ExecutionResult, Parameters};

use super::{Collaborators, outcome_result};

/// `find_files` lists at most this many matches in the reply.
const MAX_LISTED_FILES: usize = 5;

pub(super) fn open_file(
    ctx: &Collaborators<'_>,
    params: &Parameters,
) -> PortResult<ExecutionResult> {
    let target = params.target().unwrap_or_default();
    let outcome = ctx.files.open_file(target)?;
    Ok(outcome_result(
        ctx,
        "open_file",
        "open_file",
        outcome,
        Some(target),
        "Failed to open",
    ))
}

pub(super) fn find_files(
    ctx: &Collaborators<'_>,
    params: &Parameters,
) -> PortResult<ExecutionResult> {
    let query = params.query().unwrap_or_default();
    let mut outcome = ctx.files.find_files(query)?;
    if !outcome.success {
        return Ok(outcome_result(
            ctx,
            "find_files",
            "find_files",
            outcome,
            None,
            "Search failed",
        ));
    }

    let files = outcome
        .data
        .take()
        .and_then(|mut d| d.get_mut("files").map(Value::take))
        .unwrap_or_else(|| Value::Array(Vec::new()));
    let summary = summarize_files(query, &files);

    let mut result = outcome_result(
        ctx,
        "find_files",
        "find_files",
        outcome,
        Some(summary.as_str()),
        "",
    );
    result.data = Some(files);
    Ok(result)
}

fn summarize_files(query: &str, files: &Value) -> String {
    let entries = files.as_array().map(Vec::as_slice).unwrap_or_default();
    if entries.is_empty() {
        return format!("I couldn't find any files matching '{query}'");
    }

    let mut summary = format!("I found {} file(s):", entries.len());
    for file in entries.iter().take(MAX_LISTED_FILES) {
        let name = file["name"].as_str().unwrap_or("unknown");
        match file["size"].as_str() {
            Some(size) => summary.push_str(&format!("\n- {name} ({size})")),
            None => summary.push_str(&format!("\n- {name}")),
        }
    }
    if entries.len() > MAX_LISTED_FILES {
        summary.push_str(&format!("\n(Showing first {MAX_LISTED_FILES} results)"));
    }
    summary
}

pub(super) fn create_folder(
    ctx: &Collaborators<'_>,
    params: &Parameters,
) -> PortResult<ExecutionResult> {
    let name = params.name().unwrap_or_default();
    let outcome = ctx.files.create_folder(name)?;
    Ok(outcome_result(
        ctx,
        "create_folder",
        "create_folder",
        outcome,
        Some(name),
        "Failed to create folder",
    ))
}

pub(super) fn delete_file(
    ctx: &Collaborators<'_>,
    params: &Parameters,
) -> PortResult<ExecutionResult> {
    let target = params.target().unwrap_or_default();
    let outcome = ctx.files.delete_file(target)?;
    Ok(outcome_result(
        ctx,
        "delete_file",
        "delete_file",
        outcome,
        Some(target),
        "Failed to delete",
    ))
}
