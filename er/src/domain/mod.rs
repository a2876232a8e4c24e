//! Domain types read by the decision engine
//!
//! - `EventPlan`: the event being analyzed
//! - `Vendor`: a catalog entry that can be selected for the event
//! - `Task`: a planning task, only its completion matters here
//! - `CalendarEvent`: another known event, used for schedule collisions

mod event;
mod plan;
mod task;
mod vendor;

pub use event::CalendarEvent;
pub use plan::{EventPlan, EventType, Requirements, Timeframe, VenuePreference};
pub use task::{Task, TaskStatus};
pub use vendor::{Vendor, VendorCategory};
