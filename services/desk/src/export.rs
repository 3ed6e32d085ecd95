use crate::infra::build_desk;
use crate::session::run_session;
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use visitor_desk::config::AppConfig;
use visitor_desk::error::AppError;
use visitor_desk::workflows::visitors::views::write_log_csv;

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// JSON-lines command script replayed before exporting
    #[arg(long)]
    pub(crate) script: Option<PathBuf>,
    /// Start from the two reference visitors instead of an empty desk
    #[arg(long)]
    pub(crate) seed: bool,
    /// Destination CSV file (defaults to stdout)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn run_export(config: &AppConfig, args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs { script, seed, out } = args;
    let (mut desk, _sink) = build_desk(&config.desk, seed)?;

    if let Some(path) = script {
        let reader = BufReader::new(File::open(path)?);
        run_session(&mut desk, reader, &mut io::sink())?;
    }

    let entries = desk.log_entries();
    match out {
        Some(path) => {
            write_log_csv(&entries, File::create(&path)?)?;
            info!(rows = entries.len(), path = %path.display(), "visitor log exported");
        }
        None => write_log_csv(&entries, io::stdout().lock())?,
    }

    Ok(())
}
