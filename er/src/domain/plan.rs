//! EventPlan domain type
//!
//! The engine only ever reads a snapshot of the plan; the hosting
//! application owns and mutates it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kind of event being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    TeamBuilding,
    Seminar,
    #[default]
    Workshop,
    Offsite,
    Networking,
    CompanyDinner,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TeamBuilding => "team-building",
            Self::Seminar => "seminar",
            Self::Workshop => "workshop",
            Self::Offsite => "offsite",
            Self::Networking => "networking",
            Self::CompanyDinner => "company-dinner",
        };
        write!(f, "{}", s)
    }
}

/// Preferred part of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    Morning,
    Afternoon,
    #[default]
    FullDay,
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Afternoon => write!(f, "afternoon"),
            Self::FullDay => write!(f, "full-day"),
        }
    }
}

/// Indoor/outdoor venue preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VenuePreference {
    Indoor,
    Outdoor,
    #[default]
    Either,
}

impl VenuePreference {
    /// True unless the preference is `either`
    pub fn is_specific(&self) -> bool {
        !matches!(self, Self::Either)
    }
}

impl std::fmt::Display for VenuePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Indoor => write!(f, "indoor"),
            Self::Outdoor => write!(f, "outdoor"),
            Self::Either => write!(f, "either"),
        }
    }
}

/// Requirement flags captured during planning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Requirements {
    /// Lunch must be served
    pub include_lunch: bool,

    /// Venue must be accessible
    pub accessibility_needed: bool,

    /// How flexible the schedule is (0-100)
    pub timeline_flexibility: u8,

    /// Preferred part of the day
    pub preferred_timeframe: Timeframe,

    /// Indoor/outdoor preference
    pub venue_preference: VenuePreference,
}

/// Snapshot of an event plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EventPlan {
    /// Plan identifier
    pub id: String,

    /// Event name
    pub name: String,

    /// Kind of event
    pub event_type: EventType,

    /// Calendar date of the event, if chosen
    pub date: Option<NaiveDate>,

    /// Expected number of participants
    pub participants: u32,

    /// Available budget (currency-neutral)
    pub budget: f64,

    /// Free-form location text
    pub location: String,

    /// Requirement flags
    pub requirements: Requirements,

    /// Estimated cost; derived from selections and possibly stale
    pub estimated_cost: f64,
}

impl EventPlan {
    /// Create a plan with an id and budget, everything else defaulted
    pub fn new(id: impl Into<String>, budget: f64) -> Self {
        let id = id.into();
        debug!(%id, %budget, "EventPlan::new: called");
        Self {
            id,
            budget,
            ..Default::default()
        }
    }

    /// Budget usable for arithmetic: negative or non-finite values count as 0
    pub fn budget(&self) -> f64 {
        non_negative(self.budget)
    }

    /// Estimated cost usable for arithmetic: negative or non-finite values count as 0
    pub fn estimated_cost(&self) -> f64 {
        non_negative(self.estimated_cost)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
