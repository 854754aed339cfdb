//! Terminal tables for every report.
//!
//! Each builder returns a [`Table`] so the layout can be checked without a
//! terminal; [`View::print`] writes it to stdout.

use super::aggregate::{NowReport, OpsRoster, Roster, ScheduleRow, SprintReport, UserSchedule, UserTally};
use clap::ValueEnum;
use prettytable::format::{self, FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{color, Attr, Cell, Row, Table};

/// Border style selected with `--table-style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TableStyle {
    /// Unicode borders with rounded corners
    #[default]
    Rounded,
    /// Plain ASCII borders
    Box,
    /// Unicode borders with a highlighted header
    Colored,
}

impl TableStyle {
    fn format(&self) -> TableFormat {
        match self {
            TableStyle::Rounded => FormatBuilder::new()
                .column_separator('│')
                .borders('│')
                .separator(LinePosition::Top, LineSeparator::new('─', '┬', '╭', '╮'))
                .separator(LinePosition::Title, LineSeparator::new('─', '┼', '├', '┤'))
                .separator(LinePosition::Bottom, LineSeparator::new('─', '┴', '╰', '╯'))
                .padding(1, 1)
                .build(),
            TableStyle::Box => *format::consts::FORMAT_DEFAULT,
            TableStyle::Colored => *format::consts::FORMAT_BOX_CHARS,
        }
    }

    fn title_cell(&self, title: &str) -> Cell {
        match self {
            TableStyle::Colored => Cell::new(title)
                .with_style(Attr::Bold)
                .with_style(Attr::ForegroundColor(color::BRIGHT_CYAN)),
            _ => Cell::new(title),
        }
    }
}

fn table<I>(style: TableStyle, titles: &[&str], rows: I) -> Table
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut table = Table::new();
    table.set_format(style.format());
    table.set_titles(Row::new(titles.iter().map(|title| style.title_cell(title)).collect()));
    for row in rows {
        table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
    }
    table
}

pub struct View {}

impl View {
    pub fn print(table: &Table) {
        table.printstd();
    }

    pub fn schedule(rows: &[ScheduleRow], style: TableStyle) -> Table {
        table(
            style,
            &["START", "DAY", "ENGINEER", "SHIFT", "HOLIDAY"],
            rows.iter().map(|row| {
                let holidays: Vec<&str> = row.holidays.iter().map(|region| region.code()).collect();
                vec![
                    row.start.clone(),
                    row.day.clone(),
                    row.engineer.clone(),
                    row.shift.clone(),
                    holidays.join(", "),
                ]
            }),
        )
    }

    pub fn user_report(shift: &str, rows: &[UserTally], style: TableStyle) -> Table {
        table(
            style,
            &["ENGINEER", "SHIFT", "WEEKEND", "HOLIDAY", "TOTAL"],
            rows.iter().map(|row| {
                vec![
                    row.engineer.clone(),
                    shift.to_string(),
                    row.weekends.to_string(),
                    row.holidays.to_string(),
                    row.oncall.to_string(),
                ]
            }),
        )
    }

    pub fn now(report: &NowReport, style: TableStyle) -> Table {
        table(
            style,
            &["SHIFT", "ENGINEER"],
            report.rows.iter().map(|row| vec![row.shift.clone(), row.engineer.clone()]),
        )
    }

    pub fn roster(roster: &Roster, style: TableStyle) -> Table {
        let mut titles = vec!["START", "DAY"];
        titles.extend(roster.shifts.iter().map(String::as_str));

        table(
            style,
            &titles,
            roster.rows.iter().map(|row| {
                let mut cells = vec![row.start.clone(), row.day.clone()];
                cells.extend(roster.shifts.iter().map(|shift| row.assignee(shift).to_string()));
                cells
            }),
        )
    }

    pub fn user_schedule(schedule: &UserSchedule, style: TableStyle) -> Table {
        table(
            style,
            &["START", "DAY", "SHIFT"],
            schedule
                .rows
                .iter()
                .map(|row| vec![row.start.clone(), row.day.clone(), row.shift.clone()]),
        )
    }

    pub fn sprint(report: &SprintReport, style: TableStyle) -> Table {
        table(
            style,
            &["ENGINEER", "ONCALL DAYS", "OFF SHIFT DAYS", "TACTICAL %", "SUGGESTED SP"],
            report.rows.iter().map(|row| {
                vec![
                    row.engineer.clone(),
                    row.oncall_days.to_string(),
                    row.off_shift_days.to_string(),
                    format!("{:.1}", row.tactical_pct),
                    row.story_points.to_string(),
                ]
            }),
        )
    }

    /// Date × engineer matrix of shift labels.
    pub fn ops_matrix(roster: &OpsRoster, style: TableStyle) -> Table {
        let mut titles = vec!["DATE", "DAY"];
        titles.extend(roster.engineers.iter().map(String::as_str));

        table(
            style,
            &titles,
            roster.rows.iter().map(|row| {
                let mut cells = vec![row.date.clone(), row.day.clone()];
                cells.extend(roster.engineers.iter().map(|engineer| row.label(engineer).to_string()));
                cells
            }),
        )
    }

    /// Per-engineer OPS / BAU / tactical counts and shares.
    pub fn ops_summary(roster: &OpsRoster, style: TableStyle) -> Table {
        table(
            style,
            &["ENGINEER", "# OPS", "% OPS", "# BAU", "% BAU", "# TACTICAL", "% TACTICAL"],
            roster.summary.iter().map(|row| {
                vec![
                    row.engineer.clone(),
                    row.ops.to_string(),
                    format!("{:.1}", row.ops_pct),
                    row.bau.to_string(),
                    format!("{:.1}", row.bau_pct),
                    row.tactical.to_string(),
                    format!("{:.1}", row.tactical_pct),
                ]
            }),
        )
    }
}
