pub mod now;
pub mod ops_roster;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod sprint;
pub mod user;

use crate::{
    api::PagerDuty,
    libs::{
        aggregate::ShiftFailure,
        config::{self, Config},
        error::ParseError,
        messages::Message,
        schedule::DateWindow,
        time::parse_date,
        view::TableStyle,
    },
    msg_warning,
};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

/// Default length of a report window when `--end` is omitted.
const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Show the schedule of one shift")]
    Schedule(schedule::ScheduleArgs),
    #[command(about = "Count on-call, weekend and holiday days per engineer of one shift")]
    Report(report::ReportArgs),
    #[command(about = "Show who is on call right now in every shift")]
    Now(now::NowArgs),
    #[command(about = "Show all shifts side by side")]
    Roster(roster::RosterArgs),
    #[command(about = "Show the schedule of one engineer across all shifts")]
    User(user::UserArgs),
    #[command(about = "Estimate tactical load and story points for a sprint")]
    Sprint(sprint::SprintArgs),
    #[command(name = "ops-roster", about = "Show OPS and BAU load per engineer")]
    OpsRoster(ops_roster::OpsRosterArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Schedule(args) => schedule::cmd(args).await,
            Commands::Report(args) => report::cmd(args).await,
            Commands::Now(args) => now::cmd(args).await,
            Commands::Roster(args) => roster::cmd(args).await,
            Commands::User(args) => user::cmd(args).await,
            Commands::Sprint(args) => sprint::cmd(args).await,
            Commands::OpsRoster(args) => ops_roster::cmd(args).await,
        }
    }
}

/// `--start` / `--end` of a report window.
#[derive(Debug, Args)]
pub struct RangeArgs {
    #[arg(long, help = "Start date (YYYY-MM-DD), defaults to today")]
    pub start: Option<String>,
    #[arg(long, help = "End date (YYYY-MM-DD), defaults to today + 7 days")]
    pub end: Option<String>,
}

impl RangeArgs {
    /// Resolves both dates relative to `today`.
    pub fn dates(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ParseError> {
        let start = match &self.start {
            Some(start) => parse_date(start)?,
            None => today,
        };
        let end = match &self.end {
            Some(end) => parse_date(end)?,
            None => today + Duration::days(DEFAULT_WINDOW_DAYS),
        };
        Ok((start, end))
    }

    pub fn window(&self) -> Result<DateWindow, ParseError> {
        let (start, end) = self.dates(Local::now().date_naive())?;
        Ok(DateWindow::between(start, end))
    }
}

#[derive(Debug, Args)]
pub struct StyleArgs {
    #[arg(long = "table-style", value_enum, default_value_t = TableStyle::Rounded, help = "Table style")]
    pub table_style: TableStyle,
}

/// Reads the configuration and builds the API client from the token.
pub(crate) fn connect() -> Result<(Config, Arc<PagerDuty>)> {
    let config = Config::read()?;
    let token = config::token()?;
    let client = PagerDuty::new(config.api_url(), &token)?;
    Ok((config, Arc::new(client)))
}

/// Prints a warning per skipped shift, after the tables.
pub(crate) fn warn_failures(failures: &[ShiftFailure]) {
    if failures.is_empty() {
        return;
    }
    for failure in failures {
        msg_warning!(Message::ShiftSkipped {
            shift: failure.shift.clone(),
            reason: failure.reason.clone(),
        });
    }
    msg_warning!(Message::PartialReport {
        skipped: failures.len()
    });
}
