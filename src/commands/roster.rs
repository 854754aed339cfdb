use super::{connect, warn_failures, RangeArgs, StyleArgs};
use crate::libs::{
    aggregate::{fan_out, roster},
    view::View,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RosterArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    #[command(flatten)]
    pub style: StyleArgs,
}

pub async fn cmd(args: RosterArgs) -> Result<()> {
    let window = args.range.window()?;
    let (config, client) = connect()?;
    let shifts = config.shifts()?;

    let roster = roster(fan_out(client, &shifts, window).await);
    View::print(&View::roster(&roster, args.style.table_style));
    warn_failures(&roster.failures);

    Ok(())
}
