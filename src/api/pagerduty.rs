//! PagerDuty REST API client for schedule data.
//!
//! Issues `GET /schedules/{id}?include_oncall=true[&since=..][&until=..]`
//! and decodes the rendered final schedule, the current on-call user and
//! the schedule's user list.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use oncall::api::pagerduty::PagerDuty;
//! use oncall::libs::schedule::DateWindow;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = PagerDuty::new("https://api.pagerduty.com/", "u+abcdef")?;
//! let schedule = client.get_schedule("PABC123", &DateWindow::open()).await?;
//! if let Some(user) = schedule.current_on_call {
//!     println!("On call: {}", user.name);
//! }
//! # Ok(())
//! # }
//! ```

use super::ScheduleSource;
use crate::libs::error::FetchError;
use crate::libs::schedule::{DateWindow, Schedule, ScheduleEntry, UserRef};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client, StatusCode,
};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Public PagerDuty API host.
pub const DEFAULT_API_URL: &str = "https://api.pagerduty.com/";

const SCHEDULES_URL: &str = "schedules";
const ACCEPT_VERSION: &str = "application/vnd.pagerduty+json;version=2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    schedule: Option<WireSchedule>,
}

#[derive(Debug, Deserialize)]
struct WireSchedule {
    final_schedule: Option<FinalSchedule>,
    oncall: Option<OnCall>,
    #[serde(default)]
    users: Vec<WireUser>,
}

#[derive(Debug, Deserialize)]
struct FinalSchedule {
    #[serde(default)]
    rendered_schedule_entries: Vec<WireEntry>,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    start: String,
    end: String,
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct OnCall {
    user: Option<WireUser>,
}

/// User reference; PagerDuty puts the display name in `summary`.
#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    summary: String,
}

impl From<WireUser> for UserRef {
    fn from(user: WireUser) -> Self {
        Self {
            id: user.id,
            name: user.summary,
        }
    }
}

impl From<ScheduleResponse> for Schedule {
    fn from(response: ScheduleResponse) -> Self {
        let Some(schedule) = response.schedule else {
            return Schedule::default();
        };

        let entries = schedule
            .final_schedule
            .map(|f| f.rendered_schedule_entries)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| ScheduleEntry {
                start: entry.start,
                end: entry.end,
                user: entry.user.into(),
            })
            .collect();

        Schedule {
            entries,
            current_on_call: schedule.oncall.and_then(|o| o.user).map(UserRef::from),
            users: schedule.users.into_iter().map(UserRef::from).collect(),
        }
    }
}

/// PagerDuty schedules client.
///
/// Holds a pooled HTTP client with a fixed 10 second timeout and no other
/// state, so one instance can serve concurrent requests for different shifts.
#[derive(Debug, Clone)]
pub struct PagerDuty {
    client: Client,
    api_url: String,
    token: String,
}

impl PagerDuty {
    /// Creates a client for `api_url` authenticating with `token`.
    ///
    /// A missing trailing slash on `api_url` is added.
    pub fn new(api_url: &str, token: &str) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let api_url = match api_url.ends_with('/') {
            true => api_url.to_string(),
            false => format!("{}/", api_url),
        };

        Ok(Self {
            client,
            api_url,
            token: token.to_string(),
        })
    }

    /// Fetches one shift's schedule over `window`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Request`] on connection failures and timeouts
    /// - [`FetchError::Status`] for any status other than `200 OK`
    /// - [`FetchError::Decode`] when the body is not a schedule payload
    pub async fn get_schedule(&self, shift_id: &str, window: &DateWindow) -> Result<Schedule, FetchError> {
        let url = format!("{}{}/{}", self.api_url, SCHEDULES_URL, shift_id);
        let mut query = vec![("include_oncall", "true".to_string())];
        query.extend(window.query());

        debug!("Requesting schedule {} {:?}", shift_id, query);
        let res = self
            .client
            .get(&url)
            .query(&query)
            .header(ACCEPT, ACCEPT_VERSION)
            .header(AUTHORIZATION, format!("Token token={}", self.token))
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            return Err(FetchError::Status(res.status().to_string()));
        }

        let body = res.text().await?;
        let response: ScheduleResponse = serde_json::from_str(&body)?;
        let schedule = Schedule::from(response);
        debug!("Schedule {} returned {} entries", shift_id, schedule.entries.len());

        Ok(schedule)
    }
}

impl ScheduleSource for PagerDuty {
    fn schedule(&self, shift_id: &str, window: &DateWindow) -> impl Future<Output = Result<Schedule, FetchError>> + Send {
        self.get_schedule(shift_id, window)
    }
}
