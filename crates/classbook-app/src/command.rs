//! The `expand`, `check` and `list` commands.

use classbook_core::config::Settings;
use classbook_service::aggregate::OccurrenceAggregator;
use classbook_service::catalog::conflict_candidates;
use classbook_service::conflict::ConflictChecker;
use classbook_service::error::{ErrorStatus, ServiceError};
use classbook_service::expand::expand;
use serde_json::{Value, json};

use crate::cli::Command;
use crate::error::AppResult;
use crate::request::{CheckRequest, ExpandRequest, ListRequest, validate_all};

/// Exit code for a check that found a conflict.
pub const EXIT_CONFLICT: u8 = 2;

/// A JSON response and the process exit code that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub body: Value,
    pub exit_code: u8,
}

impl CommandOutput {
    fn success(body: Value) -> Self {
        Self { body, exit_code: 0 }
    }
}

/// ## Summary
/// Parses `input` as the request document for `command` and runs it.
///
/// ## Errors
/// Returns an error if the request is malformed or fails validation. A
/// conflict found by `check` is a response, not an error.
pub fn run(command: &Command, input: &str, settings: &Settings) -> AppResult<CommandOutput> {
    tracing::debug!(command = command.name(), bytes = input.len(), "Running command");

    match command {
        Command::Expand(_) => run_expand(&serde_json::from_str(input)?),
        Command::Check(_) => run_check(&serde_json::from_str(input)?, settings),
        Command::List(_) => run_list(&serde_json::from_str(input)?, settings),
    }
}

fn run_expand(request: &ExpandRequest) -> AppResult<CommandOutput> {
    request.class.validate()?;

    let occurrences = expand(&request.class, &request.window);
    tracing::info!(
        class_id = %request.class.id,
        count = occurrences.len(),
        "Expanded class"
    );

    Ok(CommandOutput::success(json!({ "occurrences": occurrences })))
}

fn run_check(request: &CheckRequest, settings: &Settings) -> AppResult<CommandOutput> {
    validate_all(std::iter::once(&request.candidate).chain(&request.classes))?;

    let checker = ConflictChecker::from_config(&settings.schedule);
    let candidates = conflict_candidates(&request.candidate, &request.classes);

    match checker.check(&request.candidate, candidates) {
        Ok(()) => {
            tracing::info!(class_id = %request.candidate.id, "No conflicts");
            Ok(CommandOutput::success(json!({ "status": "ok" })))
        }
        Err(ServiceError::Conflict(conflict)) => {
            tracing::info!(
                class_id = %request.candidate.id,
                field = %conflict.field,
                "Conflict found"
            );
            Ok(CommandOutput {
                body: json!({ "status": ErrorStatus::Conflict, "error": conflict }),
                exit_code: EXIT_CONFLICT,
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn run_list(request: &ListRequest, settings: &Settings) -> AppResult<CommandOutput> {
    validate_all(&request.classes)?;

    let aggregator = OccurrenceAggregator::from_config(&settings.schedule);
    let page = aggregator.aggregate(
        request.filter.apply(&request.classes),
        &request.window,
        request.page,
        request.limit,
    );
    tracing::info!(total = page.total, page = page.page, "Listed occurrences");

    Ok(CommandOutput::success(serde_json::to_value(page)?))
}
