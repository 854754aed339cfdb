use super::{connect, warn_failures, StyleArgs};
use crate::libs::{
    aggregate::{fan_out, now_report},
    schedule::DateWindow,
    view::View,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct NowArgs {
    #[command(flatten)]
    pub style: StyleArgs,
}

pub async fn cmd(args: NowArgs) -> Result<()> {
    let (config, client) = connect()?;
    let shifts = config.shifts()?;

    let report = now_report(fan_out(client, &shifts, DateWindow::open()).await);
    View::print(&View::now(&report, args.style.table_style));
    warn_failures(&report.failures);

    Ok(())
}
