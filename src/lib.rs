//! # oncall
//!
//! A command-line utility for PagerDuty on-call schedules.
//!
//! ## Features
//!
//! - **Schedules**: a shift's entries with weekday and holiday annotations
//! - **Reports**: on-call, weekend and holiday counts per engineer
//! - **Now**: who is on call right now, across all shifts
//! - **Rosters**: all shifts side by side, day by day
//! - **User lookup**: one engineer's slots across every shift
//! - **Sprint planning**: tactical load and suggested story points
//! - **Ops roster**: OPS vs BAU load per team member
//!
//! ## Usage
//!
//! ```rust,no_run
//! use oncall::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
