/// User-facing messages of the oncall application.
///
/// Grouped by the report that emits them. The text lives in `display.rs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === SCHEDULE MESSAGES ===
    NoScheduleEntries(String), // shift

    // === USER MESSAGES ===
    ScheduleFor(String),  // display name
    UserNotFound(String), // name fragment

    // === SPRINT MESSAGES ===
    BusinessDays(u32),

    // === OPS ROSTER MESSAGES ===
    OpsLoadHeader,

    // === FETCH MESSAGES ===
    ShiftSkipped { shift: String, reason: String },
    PartialReport { skipped: usize },

    // === ERROR MESSAGES ===
    CommandFailed(String),
}
