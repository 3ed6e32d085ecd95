use crate::infra::{build_desk, ConsoleDesk};
use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use visitor_desk::config::AppConfig;
use visitor_desk::error::AppError;
use visitor_desk::workflows::visitors::{
    Decision, DeskError, FilterCriteria, PendingRequestView, RegistrationInput, RegistryError,
    VisitorId, VisitorLogEntryView,
};

#[derive(Args, Debug, Default)]
pub(crate) struct SessionArgs {
    /// JSON-lines command script (defaults to stdin)
    #[arg(long)]
    pub(crate) script: Option<PathBuf>,
    /// Start from the two reference visitors instead of an empty desk
    #[arg(long)]
    pub(crate) seed: bool,
}

/// One line of a desk session.
#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub(crate) enum DeskCommand {
    Register(RegistrationInput),
    Decide { id: VisitorId, outcome: Decision },
    SetFilter(FilterCriteria),
    Stats,
    Pending,
    Log,
    Records,
    Dashboard,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionSummary {
    pub(crate) executed: usize,
    pub(crate) rejected: usize,
}

pub(crate) fn run_session_command(config: &AppConfig, args: SessionArgs) -> Result<(), AppError> {
    let (mut desk, _sink) = build_desk(&config.desk, args.seed)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match args.script {
        Some(path) => run_session(&mut desk, BufReader::new(File::open(path)?), &mut out)?,
        None => run_session(&mut desk, io::stdin().lock(), &mut out)?,
    };

    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        "desk session finished"
    );
    Ok(())
}

/// Execute every command in `reader`, writing one JSON response line per command.
///
/// Blank lines and lines starting with `#` are skipped. Rejected commands answer with an
/// `error` object and the session carries on; malformed JSON stops the session.
pub(crate) fn run_session<R: BufRead, W: Write>(
    desk: &mut ConsoleDesk,
    reader: R,
    writer: &mut W,
) -> Result<SessionSummary, AppError> {
    let mut summary = SessionSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command: DeskCommand =
            serde_json::from_str(trimmed).map_err(|source| AppError::Command {
                line: index + 1,
                source,
            })?;

        let response = match execute(desk, command) {
            Ok(value) => value,
            Err(err) => {
                summary.rejected += 1;
                error_response(&err)
            }
        };
        summary.executed += 1;

        serde_json::to_writer(&mut *writer, &response)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(summary)
}

/// Apply a single command to the desk and describe the outcome as JSON.
pub(crate) fn execute(desk: &mut ConsoleDesk, command: DeskCommand) -> Result<Value, DeskError> {
    let value = match command {
        DeskCommand::Register(input) => {
            let registration = desk.register(input)?;
            json!({
                "registered": registration.record,
                "notification": registration.notification,
            })
        }
        DeskCommand::Decide { id, outcome } => {
            let record = desk.decide(&id, outcome)?;
            json!({ "decided": record })
        }
        DeskCommand::SetFilter(criteria) => {
            desk.set_filter_criteria(criteria);
            json!({
                "criteria": desk.filter_criteria(),
                "matches": desk.filtered_log().len(),
            })
        }
        DeskCommand::Stats => json!({ "stats": desk.stats() }),
        DeskCommand::Pending => {
            let pending: Vec<PendingRequestView> = desk
                .pending_queue()
                .into_iter()
                .map(PendingRequestView::from_record)
                .collect();
            json!({ "pending": pending })
        }
        DeskCommand::Log => json!({ "log": desk.log_entries() }),
        DeskCommand::Records => {
            let records: Vec<VisitorLogEntryView> = desk
                .records()
                .iter()
                .map(VisitorLogEntryView::from_record)
                .collect();
            json!({ "records": records })
        }
        DeskCommand::Dashboard => json!({ "dashboard": desk.dashboard() }),
    };
    Ok(value)
}

fn error_response(err: &DeskError) -> Value {
    let kind = match err {
        DeskError::Registry(RegistryError::Validation(_)) => "validation",
        DeskError::Registry(RegistryError::NotFound(_)) => "not_found",
        DeskError::Registry(RegistryError::AlreadyDecided { .. }) => "already_decided",
        DeskError::Registry(RegistryError::IdSpaceExhausted { .. }) => "id_space_exhausted",
        DeskError::Notification { .. } => "notification",
    };
    warn!(kind, error = %err, "desk command rejected");
    json!({ "error": err.to_string(), "kind": kind })
}
