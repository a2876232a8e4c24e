//! Schedule collisions with other known events

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::CalendarEvent;

/// Count other events (different id) on the same calendar date
///
/// A plan without a date cannot collide with anything.
pub fn count_schedule_conflicts(plan_id: &str, date: Option<NaiveDate>, events: &[CalendarEvent]) -> usize {
    debug!(%plan_id, ?date, events = %events.len(), "count_schedule_conflicts: called");
    let Some(date) = date else {
        debug!("count_schedule_conflicts: no date branch");
        return 0;
    };
    events.iter().filter(|e| e.date == date && e.id != plan_id).count()
}
