#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::Parser;
    use oncall::commands::{user::name_fragment, Cli, Commands};
    use oncall::libs::error::{ConfigError, ParseError};
    use oncall::libs::view::TableStyle;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args.iter().copied()).unwrap().command
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_requires_shift() {
        assert!(Cli::try_parse_from(["oncall", "schedule"]).is_err());
        assert!(Cli::try_parse_from(["oncall", "report", "--start", "2024-12-01"]).is_err());

        match parse(&["oncall", "schedule", "--shift", "SRE", "--table-style", "colored"]) {
            Commands::Schedule(args) => {
                assert_eq!(args.shift, "SRE");
                assert_eq!(args.style.table_style, TableStyle::Colored);
                assert!(args.range.start.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_table_style_values() {
        match parse(&["oncall", "now"]) {
            Commands::Now(args) => assert_eq!(args.style.table_style, TableStyle::Rounded),
            other => panic!("unexpected command: {other:?}"),
        }
        match parse(&["oncall", "now", "--table-style", "box"]) {
            Commands::Now(args) => assert_eq!(args.style.table_style, TableStyle::Box),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["oncall", "now", "--table-style", "fancy"]).is_err());
    }

    #[test]
    fn test_range_defaults() {
        let today = date(2024, 12, 23);
        match parse(&["oncall", "roster"]) {
            Commands::Roster(args) => {
                assert_eq!(args.range.dates(today).unwrap(), (today, date(2024, 12, 30)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        match parse(&["oncall", "sprint", "--start", "2024-12-02", "--end", "2024-12-13"]) {
            Commands::Sprint(args) => {
                assert_eq!(args.range.dates(today).unwrap(), (date(2024, 12, 2), date(2024, 12, 13)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_range_rejects_malformed_dates() {
        match parse(&["oncall", "roster", "--start", "12/02/2024"]) {
            Commands::Roster(args) => {
                assert!(matches!(args.range.window(), Err(ParseError::Date { .. })));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_user_and_ops_roster() {
        match parse(&["oncall", "user"]) {
            Commands::User(args) => assert_eq!(args.name, ""),
            other => panic!("unexpected command: {other:?}"),
        }
        match parse(&["oncall", "user", "--name", "Jane Doe"]) {
            Commands::User(args) => assert_eq!(args.name, "Jane Doe"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(matches!(parse(&["oncall", "ops-roster"]), Commands::OpsRoster(_)));
    }

    #[test]
    fn test_name_fragment_is_kept_as_given() {
        assert_eq!(name_fragment("John ").unwrap(), "John ");
        assert_eq!(name_fragment("doe").unwrap(), "doe");
        assert!(matches!(name_fragment(""), Err(ConfigError::MissingUserName)));
        assert!(matches!(name_fragment("   "), Err(ConfigError::MissingUserName)));
    }
}
