//! Text of every [`Message`].
//!
//! Keeping all wording in one match makes it easy to review what the tool
//! prints and guarantees each new variant gets explicit text.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SCHEDULE MESSAGES ===
            Message::NoScheduleEntries(shift) => format!("No schedule entries for {} in this period", shift),

            // === USER MESSAGES ===
            Message::ScheduleFor(name) => format!("Schedule for {}", name),
            Message::UserNotFound(fragment) => format!("No user matching '{}' found in any shift", fragment),

            // === SPRINT MESSAGES ===
            Message::BusinessDays(days) => format!(" # of business days: {}", days),

            // === OPS ROSTER MESSAGES ===
            Message::OpsLoadHeader => "Tactical load per engineer".to_string(),

            // === FETCH MESSAGES ===
            Message::ShiftSkipped { shift, reason } => format!("Failed to get schedule for {}: {}", shift, reason),
            Message::PartialReport { skipped } => format!("Report is incomplete, {} shift(s) skipped", skipped),

            // === ERROR MESSAGES ===
            Message::CommandFailed(error) => error.to_string(),
        };
        write!(f, "{}", text)
    }
}
