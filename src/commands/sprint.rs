use super::{connect, warn_failures, RangeArgs, StyleArgs};
use crate::{
    libs::{
        aggregate::{fetch_sequential, sprint_points},
        messages::Message,
        schedule::DateWindow,
        time::business_days_between,
        view::View,
    },
    msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct SprintArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    #[command(flatten)]
    pub style: StyleArgs,
}

pub async fn cmd(args: SprintArgs) -> Result<()> {
    let (start, end) = args.range.dates(Local::now().date_naive())?;
    let (config, client) = connect()?;
    let shifts = config.shifts()?;
    let team = config.team()?;

    let holidays = config.holidays();
    let business_days = business_days_between(start, end, holidays.calendar(config.business_day_calendar))?;

    let outcomes = fetch_sequential(client.as_ref(), &shifts, DateWindow::between(start, end)).await;
    let report = sprint_points(outcomes, &team, business_days);

    msg_print!(Message::BusinessDays(report.business_days), true);
    View::print(&View::sprint(&report, args.style.table_style));
    warn_failures(&report.failures);

    Ok(())
}
