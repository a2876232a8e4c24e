//! Other known events on the calendar

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An event from the host's calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CalendarEvent {
    /// Event identifier (matches `EventPlan::id` for the plan itself)
    pub id: String,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Calendar date
    pub date: NaiveDate,
}

impl CalendarEvent {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            date,
        }
    }
}
