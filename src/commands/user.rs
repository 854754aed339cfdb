use super::{connect, warn_failures, RangeArgs, StyleArgs};
use crate::{
    libs::{
        aggregate::{fan_out, user_lookup},
        error::ConfigError,
        messages::Message,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[arg(long, default_value = "", help = "Firstname Lastname, Firstname or Lastname")]
    pub name: String,
    #[command(flatten)]
    pub range: RangeArgs,
    #[command(flatten)]
    pub style: StyleArgs,
}

/// The search fragment exactly as given; blank names are rejected.
pub fn name_fragment(name: &str) -> Result<&str, ConfigError> {
    match name.trim().is_empty() {
        true => Err(ConfigError::MissingUserName),
        false => Ok(name),
    }
}

pub async fn cmd(args: UserArgs) -> Result<()> {
    let window = args.range.window()?;
    let fragment = name_fragment(&args.name)?;
    let (config, client) = connect()?;
    let shifts = config.shifts()?;

    let schedule = user_lookup(fan_out(client, &shifts, window).await, fragment);
    match &schedule.name {
        Some(name) => {
            msg_print!(Message::ScheduleFor(name.clone()), true);
            View::print(&View::user_schedule(&schedule, args.style.table_style));
        }
        None => msg_info!(Message::UserNotFound(fragment.to_string())),
    }
    warn_failures(&schedule.failures);

    Ok(())
}
