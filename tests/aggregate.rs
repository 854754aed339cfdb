#[cfg(test)]
mod tests {
    use oncall::api::ScheduleSource;
    use oncall::libs::aggregate::{
        fan_out, fetch_sequential, now_report, ops_roster, roster, sprint_points, user_lookup, user_report,
        ShiftCategory,
    };
    use oncall::libs::error::FetchError;
    use oncall::libs::holidays::Holidays;
    use oncall::libs::schedule::{DateWindow, Schedule, ScheduleEntry, Shift, UserRef};
    use rand::Rng;
    use std::collections::{HashMap, HashSet};
    use std::future::Future;
    use std::sync::Arc;
    use std::time::Duration;

    /// In-memory source that answers after a random delay, so workers finish
    /// in a different order on every run.
    struct FakeSource {
        schedules: HashMap<String, Schedule>,
        failing: HashSet<String>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                schedules: HashMap::new(),
                failing: HashSet::new(),
            }
        }

        fn with(mut self, shift_id: &str, schedule: Schedule) -> Self {
            self.schedules.insert(shift_id.to_string(), schedule);
            self
        }

        fn failing(mut self, shift_id: &str) -> Self {
            self.failing.insert(shift_id.to_string());
            self
        }
    }

    impl ScheduleSource for FakeSource {
        fn schedule(&self, shift_id: &str, _window: &DateWindow) -> impl Future<Output = Result<Schedule, FetchError>> + Send {
            let result = match self.failing.contains(shift_id) {
                true => Err(FetchError::Status("500 Internal Server Error".to_string())),
                false => Ok(self.schedules.get(shift_id).cloned().unwrap_or_default()),
            };
            let delay: u64 = rand::rng().random_range(0..15);
            async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                result
            }
        }
    }

    fn alice() -> UserRef {
        UserRef::new("P1", "Alice Smith")
    }

    fn bob() -> UserRef {
        UserRef::new("P2", "Bob Jones")
    }

    fn carol() -> UserRef {
        UserRef::new("P3", "Carol White")
    }

    fn entry(start: &str, user: &UserRef) -> ScheduleEntry {
        ScheduleEntry {
            start: start.to_string(),
            end: start.to_string(),
            user: user.clone(),
        }
    }

    fn schedule(entries: Vec<ScheduleEntry>, current: Option<UserRef>) -> Schedule {
        let mut users: Vec<UserRef> = Vec::new();
        for e in &entries {
            if !users.contains(&e.user) {
                users.push(e.user.clone());
            }
        }
        Schedule {
            entries,
            current_on_call: current,
            users,
        }
    }

    fn team(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fan_out_keeps_shift_order() {
        let source = Arc::new(
            FakeSource::new()
                .with("PA", schedule(vec![], Some(alice())))
                .with("PB", schedule(vec![], Some(bob())))
                .failing("PC"),
        );
        let shifts = vec![Shift::new("SRE", "PA"), Shift::new("DBA", "PB"), Shift::new("OPS", "PC")];

        let outcomes = fan_out(source, &shifts, DateWindow::open()).await;

        let names: Vec<&str> = outcomes.iter().map(|o| o.shift.name.as_str()).collect();
        assert_eq!(names, vec!["SRE", "DBA", "OPS"]);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(outcomes[2].result, Err(FetchError::Status(_))));
    }

    #[tokio::test]
    async fn test_now_skips_failed_shift() {
        let source = Arc::new(
            FakeSource::new()
                .with("PA", schedule(vec![], Some(alice())))
                .with("PB", schedule(vec![], None))
                .with("PC", schedule(vec![], Some(carol())))
                .failing("PD"),
        );
        let shifts = vec![
            Shift::new("SRE", "PA"),
            Shift::new("DBA", "PB"),
            Shift::new("NET", "PD"),
            Shift::new("APP", "PC"),
        ];

        let report = now_report(fan_out(source, &shifts, DateWindow::open()).await);

        let rows: Vec<(&str, &str)> = report
            .rows
            .iter()
            .map(|row| (row.shift.as_str(), row.engineer.as_str()))
            .collect();
        assert_eq!(rows, vec![("APP", "Carol White"), ("DBA", ""), ("SRE", "Alice Smith")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].shift, "NET");
        assert!(report.failures[0].reason.contains("500"));
    }

    #[tokio::test]
    async fn test_roster_is_complete_regardless_of_completion_order() {
        let shifts: Vec<Shift> = (0..8).map(|i| Shift::new(&format!("S{}", i), &format!("P{}", i))).collect();
        let mut source = FakeSource::new();
        for i in 0..8 {
            source = source.with(
                &format!("P{}", i),
                schedule(
                    vec![
                        entry("2024-12-23T09:00:00+00:00", &alice()),
                        entry(&format!("2024-12-2{}T09:00:00+00:00", 4 + (i % 3)), &bob()),
                    ],
                    None,
                ),
            );
        }
        let source = Arc::new(source);

        let first = roster(fan_out(Arc::clone(&source), &shifts, DateWindow::open()).await);
        for _ in 0..5 {
            let again = roster(fan_out(Arc::clone(&source), &shifts, DateWindow::open()).await);
            assert_eq!(again, first);
        }

        assert_eq!(first.shifts.len(), 8);
        let starts: Vec<&str> = first.rows.iter().map(|row| row.start.as_str()).collect();
        assert_eq!(
            starts,
            vec!["2024-12-23 09:00", "2024-12-24 09:00", "2024-12-25 09:00", "2024-12-26 09:00"]
        );
        assert_eq!(first.rows[0].day, "Monday");
        for shift in &first.shifts {
            assert_eq!(first.rows[0].assignee(shift), "Alice Smith");
        }
        assert_eq!(first.rows[1].assignee("S0"), "Bob Jones");
        assert_eq!(first.rows[1].assignee("S1"), "");
        assert!(first.failures.is_empty());
    }

    #[test]
    fn test_user_report_counts() {
        let schedule = schedule(
            vec![
                entry("2024-12-23T09:00:00+00:00", &alice()),
                entry("2024-12-24T09:00:00+00:00", &bob()),
                entry("2024-12-25T09:00:00+00:00", &alice()),
                entry("2024-12-28T09:00:00+00:00", &alice()),
                entry("2024-12-29T09:00:00+00:00", &carol()),
            ],
            None,
        );

        let tallies = user_report(&schedule, &Holidays::default());

        let rows: Vec<(&str, u32, u32, u32)> = tallies
            .iter()
            .map(|t| (t.engineer.as_str(), t.oncall, t.weekends, t.holidays))
            .collect();
        assert_eq!(
            rows,
            vec![("Alice Smith", 3, 1, 1), ("Bob Jones", 1, 0, 0), ("Carol White", 1, 1, 0)]
        );
    }

    #[test]
    fn test_user_report_ignores_bad_timestamps() {
        let schedule = schedule(vec![entry("yesterday", &alice())], None);

        let tallies = user_report(&schedule, &Holidays::default());

        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].oncall, 1);
        assert_eq!(tallies[0].weekends, 0);
        assert_eq!(tallies[0].holidays, 0);
    }

    #[tokio::test]
    async fn test_user_lookup_across_shifts() {
        let alicia = UserRef::new("P9", "Alicia Keys");
        let source = Arc::new(
            FakeSource::new()
                .with(
                    "PA",
                    schedule(
                        vec![
                            entry("2024-12-24T09:00:00+00:00", &alice()),
                            entry("2024-12-23T09:00:00+00:00", &bob()),
                        ],
                        None,
                    ),
                )
                .with(
                    "PB",
                    schedule(
                        vec![
                            entry("2024-12-24T09:00:00+00:00", &alicia),
                            entry("2024-12-23T09:00:00+00:00", &alicia),
                        ],
                        None,
                    ),
                )
                .failing("PC"),
        );
        let shifts = vec![Shift::new("OPS", "PA"), Shift::new("SRE", "PB"), Shift::new("NET", "PC")];

        let found = user_lookup(fan_out(source, &shifts, DateWindow::open()).await, "ALI");

        assert_eq!(found.name.as_deref(), Some("Alice Smith"));
        let rows: Vec<(&str, &str, &str)> = found
            .rows
            .iter()
            .map(|row| (row.start.as_str(), row.day.as_str(), row.shift.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("2024-12-23 09:00", "Monday", "SRE"),
                ("2024-12-24 09:00", "Tuesday", "OPS"),
                ("2024-12-24 09:00", "Tuesday", "SRE"),
            ]
        );
        assert_eq!(found.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_user_lookup_no_match() {
        let source = FakeSource::new().with("PA", schedule(vec![entry("2024-12-24T09:00:00+00:00", &bob())], None));
        let shifts = vec![Shift::new("OPS", "PA")];

        let found = user_lookup(fetch_sequential(&source, &shifts, DateWindow::open()).await, "zed");

        assert_eq!(found.name, None);
        assert!(found.rows.is_empty());
    }

    #[tokio::test]
    async fn test_user_lookup_keeps_surrounding_spaces() {
        let source = FakeSource::new().with(
            "PA",
            schedule(
                vec![
                    entry("2024-12-24T09:00:00+00:00", &alice()),
                    entry("2024-12-23T09:00:00+00:00", &bob()),
                ],
                None,
            ),
        );
        let shifts = vec![Shift::new("OPS", "PA")];

        let found = user_lookup(fetch_sequential(&source, &shifts, DateWindow::open()).await, "alice ");
        assert_eq!(found.name.as_deref(), Some("Alice Smith"));

        let found = user_lookup(fetch_sequential(&source, &shifts, DateWindow::open()).await, "smith ");
        assert_eq!(found.name, None);
    }

    #[tokio::test]
    async fn test_sprint_points() {
        let mut entries: Vec<ScheduleEntry> = (0..3).map(|_| entry("2024-12-23T09:00:00+00:00", &alice())).collect();
        entries.extend((0..12).map(|_| entry("2024-12-24T09:00:00+00:00", &bob())));
        entries.push(entry("2024-12-24T09:00:00+00:00", &carol()));
        let source = FakeSource::new().with("PA", schedule(entries, None)).failing("PB");
        let shifts = vec![Shift::new("OPS", "PA"), Shift::new("SRE", "PB")];

        let outcomes = fetch_sequential(&source, &shifts, DateWindow::open()).await;
        let report = sprint_points(outcomes, &team(&["P1", "P2"]), 10);

        assert_eq!(report.business_days, 10);
        assert_eq!(report.rows.len(), 2);

        let alice = &report.rows[0];
        assert_eq!(alice.engineer, "Alice Smith");
        assert_eq!(alice.oncall_days, 3);
        assert_eq!(alice.off_shift_days, 7);
        assert!((alice.tactical_pct - 30.0).abs() < 1e-9);
        assert_eq!(alice.story_points, 9);

        let bob = &report.rows[1];
        assert_eq!(bob.oncall_days, 12);
        assert_eq!(bob.off_shift_days, 0);
        assert_eq!(bob.story_points, 0);
        assert_eq!(report.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_sprint_points_without_business_days() {
        let source = FakeSource::new().with("PA", schedule(vec![entry("2024-12-28T09:00:00+00:00", &alice())], None));
        let shifts = vec![Shift::new("OPS", "PA")];

        let report = sprint_points(
            fetch_sequential(&source, &shifts, DateWindow::open()).await,
            &team(&["P1"]),
            0,
        );

        assert_eq!(report.rows[0].tactical_pct, 0.0);
        assert_eq!(report.rows[0].off_shift_days, 0);
    }

    #[tokio::test]
    async fn test_ops_roster() {
        let source = FakeSource::new()
            .with(
                "PO",
                schedule(
                    vec![
                        entry("2024-12-23T09:00:00+00:00", &alice()),
                        entry("2024-12-24T09:00:00+00:00", &bob()),
                        entry("2024-12-24T09:00:00+00:00", &carol()),
                    ],
                    None,
                ),
            )
            .with(
                "PS",
                schedule(
                    vec![
                        entry("2024-12-23T21:00:00+00:00", &alice()),
                        entry("2024-12-24T09:00:00+00:00", &alice()),
                    ],
                    None,
                ),
            );
        let shifts = vec![Shift::new("OPS", "PO"), Shift::new("SRE", "PS")];

        let roster = ops_roster(
            fetch_sequential(&source, &shifts, DateWindow::open()).await,
            &team(&["P1", "P2"]),
        );

        assert_eq!(roster.engineers, vec!["Alice Smith", "Bob Jones"]);
        assert_eq!(roster.rows.len(), 2);
        assert_eq!(roster.rows[0].date, "2024-12-23");
        assert_eq!(roster.rows[0].day, "Monday");
        assert_eq!(roster.rows[0].label("Alice Smith"), "OPS, SRE");
        assert_eq!(roster.rows[0].label("Bob Jones"), "");
        assert_eq!(roster.rows[1].label("Alice Smith"), "SRE");
        assert_eq!(roster.rows[1].label("Bob Jones"), "OPS");

        let alice = &roster.summary[0];
        assert_eq!((alice.ops, alice.bau, alice.tactical), (1, 2, 3));
        assert!((alice.ops_pct - 50.0).abs() < 1e-9);
        assert!((alice.bau_pct - 100.0).abs() < 1e-9);
        assert!((alice.tactical_pct - 75.0).abs() < 1e-9);

        let bob = &roster.summary[1];
        assert_eq!((bob.ops, bob.bau, bob.tactical), (1, 0, 1));
        assert_eq!(bob.bau_pct, 0.0);
        assert!((bob.tactical_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_shift_category() {
        assert_eq!(ShiftCategory::of("OPS"), ShiftCategory::Ops);
        assert_eq!(ShiftCategory::of("ops"), ShiftCategory::Bau);
        assert_eq!(ShiftCategory::of("SRE"), ShiftCategory::Bau);
    }
}
