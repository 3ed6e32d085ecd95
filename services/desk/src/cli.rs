use crate::demo::{run_demo, DemoArgs};
use crate::export::{run_export, ExportArgs};
use crate::session::{run_session_command, SessionArgs};
use clap::{Args, Parser, Subcommand};
use visitor_desk::config::{AppConfig, DeskConfig};
use visitor_desk::error::AppError;
use visitor_desk::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Visitor Desk",
    about = "Register visitors, record approvals, and review the visitor log from the terminal",
    version
)]
struct Cli {
    #[command(flatten)]
    overrides: DeskOverrides,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted front desk scenario and print the resulting dashboard (default command)
    Demo(DemoArgs),
    /// Read JSON-line commands from a script or stdin and answer each one on stdout
    Session(SessionArgs),
    /// Replay a script and write the filtered visitor log as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct DeskOverrides {
    /// Override the configured decision-maker identity
    #[arg(long, global = true)]
    pub(crate) decision_maker: Option<String>,
    /// Override the display timezone as minutes east of UTC
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub(crate) utc_offset_minutes: Option<i32>,
}

impl DeskOverrides {
    pub(crate) fn apply(self, desk: &mut DeskConfig) -> Result<(), AppError> {
        if let Some(decision_maker) = self.decision_maker {
            desk.decision_maker = decision_maker;
        }
        if let Some(offset) = self.utc_offset_minutes {
            desk.utc_offset_minutes = offset;
            desk.display_offset()?;
        }
        Ok(())
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    cli.overrides.apply(&mut config.desk)?;

    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(&config, args),
        Command::Session(args) => run_session_command(&config, args),
        Command::Export(args) => run_export(&config, args),
    }
}
