use super::{connect, RangeArgs, StyleArgs};
use crate::{
    libs::{aggregate::user_report, messages::Message, view::View},
    msg_info,
};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long, help = "Shift name from the configuration")]
    pub shift: String,
    #[command(flatten)]
    pub range: RangeArgs,
    #[command(flatten)]
    pub style: StyleArgs,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let window = args.range.window()?;
    let (config, client) = connect()?;
    let shift = config.shift(&args.shift)?;

    let schedule = client
        .get_schedule(&shift.id, &window)
        .await
        .with_context(|| format!("Failed to get schedule for {}", shift.name))?;

    let tallies = user_report(&schedule, &config.holidays());
    if tallies.is_empty() {
        msg_info!(Message::NoScheduleEntries(shift.name));
        return Ok(());
    }
    View::print(&View::user_report(&shift.name, &tallies, args.style.table_style));

    Ok(())
}
