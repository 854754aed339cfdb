//! Schedule sources.
//!
//! The aggregator only needs "give me the schedule of this shift over this
//! window". [`ScheduleSource`] captures that, so reports run the same way
//! against the PagerDuty client and against in-memory sources.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use oncall::api::{PagerDuty, ScheduleSource};
//! use oncall::libs::schedule::DateWindow;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = PagerDuty::new("https://api.pagerduty.com/", "token")?;
//! let schedule = client.schedule("PABC123", &DateWindow::open()).await?;
//! println!("{} entries", schedule.entries.len());
//! # Ok(())
//! # }
//! ```

use crate::libs::error::FetchError;
use crate::libs::schedule::{DateWindow, Schedule};
use std::future::Future;

pub mod pagerduty;

pub use pagerduty::PagerDuty;

/// Anything that can produce the schedule of one shift.
///
/// Implementations must be shareable across tasks: one request is issued per
/// shift, concurrently.
pub trait ScheduleSource: Send + Sync + 'static {
    /// Fetches the schedule of `shift_id` over `window`. Performs exactly
    /// one request and never retries.
    fn schedule(&self, shift_id: &str, window: &DateWindow) -> impl Future<Output = Result<Schedule, FetchError>> + Send;
}
