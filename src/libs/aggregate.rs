//! Fan-out/fan-in over shifts and the per-report merge passes.
//!
//! Every multi-shift report runs in two phases:
//!
//! 1. **Fetch**: [`fan_out`] spawns one task per shift and waits for all of
//!    them ([`fetch_sequential`] does the same one shift at a time). Each
//!    shift yields a [`ShiftOutcome`]; workers share no mutable state.
//! 2. **Merge**: a pure, single-threaded function folds the outcomes into a
//!    report, records failed shifts as [`ShiftFailure`]s and sorts the rows.
//!
//! Because the merge only sees the joined outcomes, in shift order, the
//! result does not depend on which worker finished first.
//!
//! ```text
//! ┌─────────┐   spawn    ┌──────────┐  join   ┌────────────┐  sort  ┌────────┐
//! │ shifts  │──────────▶│ workers  │───────▶│ outcomes   │──────▶│ report │
//! └─────────┘  1/shift   └──────────┘         └────────────┘        └────────┘
//! ```

use super::holidays::{Holidays, Region};
use super::schedule::{DateWindow, Schedule, Shift};
use super::time::{EntryTime, DATE_LAYOUT};
use crate::api::ScheduleSource;
use crate::libs::error::FetchError;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Shift name counted as operational load; every other shift is BAU.
pub const OPS_SHIFT: &str = "OPS";

/// Result of fetching one shift.
#[derive(Debug)]
pub struct ShiftOutcome {
    pub shift: Shift,
    pub result: Result<Schedule, FetchError>,
}

/// A shift left out of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftFailure {
    pub shift: String,
    pub reason: String,
}

/// Fetches every shift concurrently, one task per shift.
///
/// Returns one outcome per shift, in the order of `shifts`. A task that
/// panics or is cancelled is reported as [`FetchError::Aborted`].
pub async fn fan_out<S: ScheduleSource>(source: Arc<S>, shifts: &[Shift], window: DateWindow) -> Vec<ShiftOutcome> {
    let mut set = JoinSet::new();
    for (index, shift) in shifts.iter().enumerate() {
        let source = Arc::clone(&source);
        let shift_id = shift.id.clone();
        set.spawn(async move {
            let result = source.schedule(&shift_id, &window).await;
            (index, result)
        });
    }

    let mut results: Vec<Option<Result<Schedule, FetchError>>> = shifts.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(e) => error!("Schedule worker failed: {}", e),
        }
    }

    shifts
        .iter()
        .cloned()
        .zip(results)
        .map(|(shift, result)| {
            let result = result.unwrap_or_else(|| Err(FetchError::Aborted(shift.name.clone())));
            ShiftOutcome { shift, result }
        })
        .collect()
}

/// Fetches shifts one after another, in the order of `shifts`.
pub async fn fetch_sequential<S: ScheduleSource>(source: &S, shifts: &[Shift], window: DateWindow) -> Vec<ShiftOutcome> {
    let mut outcomes = Vec::with_capacity(shifts.len());
    for shift in shifts {
        let result = source.schedule(&shift.id, &window).await;
        outcomes.push(ShiftOutcome {
            shift: shift.clone(),
            result,
        });
    }
    outcomes
}

/// Splits outcomes into fetched schedules and failures, logging each failure.
fn split(outcomes: Vec<ShiftOutcome>) -> (Vec<(Shift, Schedule)>, Vec<ShiftFailure>) {
    let mut schedules = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(schedule) => {
                debug!("Merging {} entries from {}", schedule.entries.len(), outcome.shift.name);
                schedules.push((outcome.shift, schedule));
            }
            Err(e) => {
                debug!("Failed to get schedule for {}: {}", outcome.shift.name, e);
                failures.push(ShiftFailure {
                    shift: outcome.shift.name,
                    reason: e.to_string(),
                });
            }
        }
    }

    (schedules, failures)
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

// ---------------------------------------------------------------------------
// Schedule listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub start: String,
    pub day: String,
    pub engineer: String,
    pub shift: String,
    pub holidays: Vec<Region>,
}

/// One row per entry, in API order.
pub fn schedule_listing(shift: &Shift, schedule: &Schedule, holidays: &Holidays) -> Vec<ScheduleRow> {
    schedule
        .entries
        .iter()
        .map(|entry| {
            let start = EntryTime::new(&entry.start);
            ScheduleRow {
                start: start.display(""),
                day: start.weekday_name().to_string(),
                engineer: entry.user.name.clone(),
                shift: shift.name.clone(),
                holidays: start.holidays(holidays),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-user report
// ---------------------------------------------------------------------------

/// On-call counters of one engineer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTally {
    pub engineer: String,
    pub oncall: u32,
    pub weekends: u32,
    pub holidays: u32,
}

/// Counts entries, weekend entries and holiday entries per engineer.
///
/// Sorted by on-call count descending, then by name.
pub fn user_report(schedule: &Schedule, holidays: &Holidays) -> Vec<UserTally> {
    let mut tallies: HashMap<&str, UserTally> = HashMap::new();

    for entry in &schedule.entries {
        let start = EntryTime::new(&entry.start);
        let tally = tallies.entry(entry.user.name.as_str()).or_insert_with(|| UserTally {
            engineer: entry.user.name.clone(),
            ..Default::default()
        });

        tally.oncall += 1;
        if start.is_weekend() {
            tally.weekends += 1;
        }
        if !start.holidays(holidays).is_empty() {
            tally.holidays += 1;
        }
    }

    let mut rows: Vec<UserTally> = tallies.into_values().collect();
    rows.sort_by(|a, b| b.oncall.cmp(&a.oncall).then_with(|| a.engineer.cmp(&b.engineer)));
    rows
}

// ---------------------------------------------------------------------------
// Currently on call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowRow {
    pub shift: String,
    /// Empty when nobody is on call.
    pub engineer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowReport {
    pub rows: Vec<NowRow>,
    pub failures: Vec<ShiftFailure>,
}

/// Who is on call for each fetched shift, sorted by shift name.
pub fn now_report(outcomes: Vec<ShiftOutcome>) -> NowReport {
    let (schedules, failures) = split(outcomes);

    let mut rows: Vec<NowRow> = schedules
        .into_iter()
        .map(|(shift, schedule)| NowRow {
            shift: shift.name,
            engineer: schedule.current_on_call.map(|user| user.name).unwrap_or_default(),
        })
        .collect();
    rows.sort_by(|a, b| a.shift.cmp(&b.shift));

    NowReport { rows, failures }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRow {
    pub start: String,
    pub day: String,
    /// Shift name to engineer name.
    pub assignees: BTreeMap<String, String>,
}

impl RosterRow {
    pub fn assignee(&self, shift: &str) -> &str {
        self.assignees.get(shift).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Column order, sorted by name.
    pub shifts: Vec<String>,
    /// Sorted by start.
    pub rows: Vec<RosterRow>,
    pub failures: Vec<ShiftFailure>,
}

/// Merges all shifts into one row per start time with a column per shift.
pub fn roster(outcomes: Vec<ShiftOutcome>) -> Roster {
    let (schedules, failures) = split(outcomes);
    let mut rows: BTreeMap<String, RosterRow> = BTreeMap::new();

    for (shift, schedule) in &schedules {
        for entry in &schedule.entries {
            let start = EntryTime::new(&entry.start);
            let key = start.display("");
            let row = rows.entry(key.clone()).or_insert_with(|| RosterRow {
                start: key,
                ..Default::default()
            });
            row.day = start.weekday_name().to_string();
            row.assignees.insert(shift.name.clone(), entry.user.name.clone());
        }
    }

    let mut shifts: Vec<String> = schedules.into_iter().map(|(shift, _)| shift.name).collect();
    shifts.sort();

    Roster {
        shifts,
        rows: rows.into_values().collect(),
        failures,
    }
}

// ---------------------------------------------------------------------------
// User lookup across shifts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserShiftRow {
    pub start: String,
    pub day: String,
    pub shift: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSchedule {
    /// Display name of the first match, in shift order.
    pub name: Option<String>,
    /// Sorted by start, then shift.
    pub rows: Vec<UserShiftRow>,
    pub failures: Vec<ShiftFailure>,
}

/// Finds the engineer matching `fragment` in each shift and lists their
/// entries across all shifts.
///
/// Matching is a case-insensitive substring search over each shift's user
/// list; the first match of a shift wins. Shifts without a match contribute
/// nothing.
pub fn user_lookup(outcomes: Vec<ShiftOutcome>, fragment: &str) -> UserSchedule {
    let (schedules, failures) = split(outcomes);
    let mut name = None;
    let mut rows = Vec::new();

    for (shift, schedule) in &schedules {
        let Some(user) = schedule.find_user(fragment) else {
            debug!("No user matching '{}' in {}", fragment, shift.name);
            continue;
        };
        name.get_or_insert_with(|| user.name.clone());

        for entry in schedule.entries_for(&user.id) {
            let start = EntryTime::new(&entry.start);
            rows.push(UserShiftRow {
                start: start.display(""),
                day: start.weekday_name().to_string(),
                shift: shift.name.clone(),
            });
        }
    }

    rows.sort_by(|a: &UserShiftRow, b: &UserShiftRow| a.start.cmp(&b.start).then_with(|| a.shift.cmp(&b.shift)));

    UserSchedule { name, rows, failures }
}

// ---------------------------------------------------------------------------
// Sprint points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SprintRow {
    pub engineer: String,
    pub oncall_days: u32,
    pub off_shift_days: u32,
    pub tactical_pct: f64,
    pub story_points: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SprintReport {
    pub business_days: u32,
    /// Sorted by engineer.
    pub rows: Vec<SprintRow>,
    pub failures: Vec<ShiftFailure>,
}

/// Tactical load and suggested story points per team member.
///
/// Only entries of users listed in `team` are counted.
pub fn sprint_points(outcomes: Vec<ShiftOutcome>, team: &HashSet<String>, business_days: u32) -> SprintReport {
    let (schedules, failures) = split(outcomes);
    let mut oncall: BTreeMap<String, u32> = BTreeMap::new();

    for (_, schedule) in &schedules {
        for entry in schedule.entries.iter().filter(|e| team.contains(&e.user.id)) {
            *oncall.entry(entry.user.name.clone()).or_default() += 1;
        }
    }

    let rows = oncall
        .into_iter()
        .map(|(engineer, oncall_days)| {
            let off_shift_days = business_days.saturating_sub(oncall_days);
            SprintRow {
                engineer,
                oncall_days,
                off_shift_days,
                tactical_pct: percent(oncall_days, business_days),
                story_points: super::time::estimate_story_points(off_shift_days),
            }
        })
        .collect();

    SprintReport {
        business_days,
        rows,
        failures,
    }
}

// ---------------------------------------------------------------------------
// Ops roster
// ---------------------------------------------------------------------------

/// Load bucket of a shift in the ops roster summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftCategory {
    Ops,
    Bau,
}

impl ShiftCategory {
    pub fn of(shift_name: &str) -> Self {
        match shift_name == OPS_SHIFT {
            true => ShiftCategory::Ops,
            false => ShiftCategory::Bau,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpsRow {
    pub date: String,
    pub day: String,
    /// Engineer to comma-joined shift names.
    pub labels: BTreeMap<String, String>,
}

impl OpsRow {
    pub fn label(&self, engineer: &str) -> &str {
        self.labels.get(engineer).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpsSummaryRow {
    pub engineer: String,
    pub ops: u32,
    pub ops_pct: f64,
    pub bau: u32,
    pub bau_pct: f64,
    pub tactical: u32,
    pub tactical_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpsRoster {
    /// Column order, sorted by name.
    pub engineers: Vec<String>,
    /// Sorted by date.
    pub rows: Vec<OpsRow>,
    pub summary: Vec<OpsSummaryRow>,
    pub failures: Vec<ShiftFailure>,
}

/// Date × engineer matrix of shift labels plus an OPS/BAU breakdown.
///
/// Only entries of users listed in `team` are counted. Percentages are the
/// engineer's share of all OPS, all BAU and all counted entries.
pub fn ops_roster(outcomes: Vec<ShiftOutcome>, team: &HashSet<String>) -> OpsRoster {
    let (schedules, failures) = split(outcomes);
    let mut rows: BTreeMap<String, OpsRow> = BTreeMap::new();
    let mut counts: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    let (mut total_ops, mut total_bau) = (0u32, 0u32);

    for (shift, schedule) in &schedules {
        let category = ShiftCategory::of(&shift.name);

        for entry in schedule.entries.iter().filter(|e| team.contains(&e.user.id)) {
            let engineer = &entry.user.name;
            let (ops, bau) = counts.entry(engineer.clone()).or_default();
            match category {
                ShiftCategory::Ops => {
                    *ops += 1;
                    total_ops += 1;
                }
                ShiftCategory::Bau => {
                    *bau += 1;
                    total_bau += 1;
                }
            }

            let start = EntryTime::new(&entry.start);
            let date = start.display(DATE_LAYOUT);
            let row = rows.entry(date.clone()).or_insert_with(|| OpsRow {
                date,
                ..Default::default()
            });
            row.day = start.weekday_name().to_string();
            row.labels
                .entry(engineer.clone())
                .and_modify(|label| {
                    label.push_str(", ");
                    label.push_str(&shift.name);
                })
                .or_insert_with(|| shift.name.clone());
        }
    }

    let total = total_ops + total_bau;
    let summary = counts
        .iter()
        .map(|(engineer, &(ops, bau))| OpsSummaryRow {
            engineer: engineer.clone(),
            ops,
            ops_pct: percent(ops, total_ops),
            bau,
            bau_pct: percent(bau, total_bau),
            tactical: ops + bau,
            tactical_pct: percent(ops + bau, total),
        })
        .collect();

    OpsRoster {
        engineers: counts.into_keys().collect(),
        rows: rows.into_values().collect(),
        summary,
        failures,
    }
}
