use super::{connect, RangeArgs, StyleArgs};
use crate::{
    libs::{aggregate::schedule_listing, messages::Message, view::View},
    msg_info,
};
use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[arg(long, help = "Shift name from the configuration")]
    pub shift: String,
    #[command(flatten)]
    pub range: RangeArgs,
    #[command(flatten)]
    pub style: StyleArgs,
}

pub async fn cmd(args: ScheduleArgs) -> Result<()> {
    let window = args.range.window()?;
    let (config, client) = connect()?;
    let shift = config.shift(&args.shift)?;

    debug!("Fetching schedule of {} ({})", shift.name, shift.id);
    let schedule = client
        .get_schedule(&shift.id, &window)
        .await
        .with_context(|| format!("Failed to get schedule for {}", shift.name))?;

    let rows = schedule_listing(&shift, &schedule, &config.holidays());
    if rows.is_empty() {
        msg_info!(Message::NoScheduleEntries(shift.name));
        return Ok(());
    }
    View::print(&View::schedule(&rows, args.style.table_style));

    Ok(())
}
