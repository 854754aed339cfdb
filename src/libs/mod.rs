//! Core library modules of the oncall application.
//!
//! - **Calendar**: timestamp helpers, holiday calendars, business days
//! - **Schedules**: the schedule model and the fan-out/merge aggregator
//! - **Presentation**: report tables and user-facing messages
//! - **Infrastructure**: configuration, data directory, errors, logging
//!
//! ## Usage
//!
//! ```rust
//! use oncall::libs::holidays::HolidayCalendar;
//! use oncall::libs::time::{count_business_days, estimate_story_points};
//!
//! let days = count_business_days("2024-12-23", "2024-12-27", &HolidayCalendar::uk())?;
//! assert_eq!(days, 3);
//! assert_eq!(estimate_story_points(days), 4);
//! # Ok::<(), oncall::libs::error::ParseError>(())
//! ```

pub mod aggregate;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod holidays;
pub mod logging;
pub mod messages;
pub mod schedule;
pub mod time;
pub mod view;
