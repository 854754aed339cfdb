use super::time::DATE_LAYOUT;
use chrono::NaiveDate;

/// An engineer as referenced by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

impl UserRef {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// One on-call slot. `start` and `end` are the raw wire timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub start: String,
    pub end: String,
    pub user: UserRef,
}

/// Schedule of one shift over one window, entries in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub entries: Vec<ScheduleEntry>,
    pub current_on_call: Option<UserRef>,
    pub users: Vec<UserRef>,
}

impl Schedule {
    /// First user whose name contains `fragment`, ignoring case.
    pub fn find_user(&self, fragment: &str) -> Option<&UserRef> {
        let fragment = fragment.to_lowercase();
        self.users.iter().find(|user| user.name.to_lowercase().contains(&fragment))
    }

    pub fn entries_for<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.user.id == user_id)
    }
}

/// A configured on-call rotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shift {
    pub name: String,
    pub id: String,
}

impl Shift {
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
        }
    }
}

/// The `[since, until)` window of a schedule request. Unbounded ends are
/// left to the API's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateWindow {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn between(since: NaiveDate, until: NaiveDate) -> Self {
        Self {
            since: Some(since),
            until: Some(until),
        }
    }

    /// `since`/`until` query pairs for the bounded ends.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(since) = self.since {
            query.push(("since", since.format(DATE_LAYOUT).to_string()));
        }
        if let Some(until) = self.until {
            query.push(("until", until.format(DATE_LAYOUT).to_string()));
        }
        query
    }
}
