use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged kick. `date` is always the UTC calendar day of `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kick {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub date: String,
}

impl Kick {
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date: day_label(timestamp),
            timestamp,
        }
    }

    /// Re-derives `date` from `timestamp`. Returns true when the label changed.
    pub fn repair_date(&mut self) -> bool {
        let expected = day_label(self.timestamp);
        if self.date == expected {
            return false;
        }
        self.date = expected;
        true
    }
}

pub fn day_label(timestamp: DateTime<Utc>) -> String {
    date_key(timestamp.date_naive())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Persisted document. `version` counts changes over the life of the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KickData {
    #[serde(default)]
    pub version: u64,
    pub kicks: Vec<Kick>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: String,
    pub label: String,
    pub kick_count: usize,
    pub time_to_10_kicks: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInfo {
    pub days_to_go: i64,
    pub weeks: i64,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    pub due_date: String,
    pub due_date_label: String,
    pub fetal_age: String,
    #[serde(flatten)]
    pub info: TimeInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub date: String,
    pub kick_count: usize,
    pub time_to_10_kicks: Option<String>,
    pub countdown: Option<Countdown>,
    pub history: Vec<DailySummary>,
    pub loading: bool,
    pub version: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub message: String,
    pub undo_available: bool,
    pub kick_id: Option<String>,
    pub dashboard: Dashboard,
}

#[derive(Debug, Deserialize)]
pub struct ChangesQuery {
    #[serde(default)]
    pub since: u64,
}
