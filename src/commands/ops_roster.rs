use super::{connect, warn_failures, RangeArgs, StyleArgs};
use crate::{
    libs::{
        aggregate::{fetch_sequential, ops_roster},
        messages::Message,
        view::View,
    },
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct OpsRosterArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    #[command(flatten)]
    pub style: StyleArgs,
}

pub async fn cmd(args: OpsRosterArgs) -> Result<()> {
    let window = args.range.window()?;
    let (config, client) = connect()?;
    let shifts = config.ops_shifts()?;
    let team = config.team()?;

    let roster = ops_roster(fetch_sequential(client.as_ref(), &shifts, window).await, &team);
    View::print(&View::ops_matrix(&roster, args.style.table_style));
    msg_print!(Message::OpsLoadHeader, true);
    View::print(&View::ops_summary(&roster, args.style.table_style));
    warn_failures(&roster.failures);

    Ok(())
}
