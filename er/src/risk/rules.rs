//! The nine risk rules
//!
//! Each rule is a pure function of the [`RuleContext`] and returns exactly one
//! item. Rules never look at each other's output.

use tracing::debug;

use super::{RiskItem, RiskType, Severity};
use crate::config::Thresholds;
use crate::domain::{EventPlan, Task, Vendor, VendorCategory};
use crate::geo::{GeoPoint, format_distance};
use crate::money::{format_amount, format_percent, percent_tenths};
use crate::weather::{WeatherHazard, WeatherSignal};

/// Inputs shared by all rules, with selected vendor ids already resolved
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub plan: &'a EventPlan,
    /// Selected vendors found in the catalog, in catalog order
    pub selected: Vec<&'a Vendor>,
    pub tasks: &'a [Task],
    pub weather: Option<&'a WeatherSignal>,
    pub schedule_conflicts: usize,
    pub thresholds: &'a Thresholds,
    pub reference_point: &'a GeoPoint,
    pub currency: &'a str,
}

impl RuleContext<'_> {
    fn has_selected(&self, category: VendorCategory) -> bool {
        self.selected.iter().any(|v| v.category == category)
    }

    fn selected_venue(&self) -> Option<&Vendor> {
        self.selected.iter().copied().find(|v| v.category == VendorCategory::Venue)
    }
}

/// Lunch: high when lunch is required and no caterer is selected
pub fn lunch(ctx: &RuleContext) -> RiskItem {
    debug!("lunch: called");
    if !ctx.plan.requirements.include_lunch {
        debug!("lunch: not required branch");
        return RiskItem::new(
            RiskType::Lunch,
            Severity::Low,
            "Lunch Requirement",
            "Lunch is not required for this event",
        );
    }

    if ctx.has_selected(VendorCategory::Catering) {
        debug!("lunch: catering selected branch");
        RiskItem::new(
            RiskType::Lunch,
            Severity::Low,
            "Lunch Requirement",
            "Catering service has been selected",
        )
    } else {
        debug!("lunch: no catering branch");
        RiskItem::new(
            RiskType::Lunch,
            Severity::High,
            "Lunch Requirement",
            "Lunch is required but no catering service has been selected",
        )
        .with_mitigation("Select a catering vendor to fulfill the lunch requirement")
    }
}

/// Accessibility: a selected venue cannot be verified from catalog data, so it stays medium
pub fn accessibility(ctx: &RuleContext) -> RiskItem {
    debug!("accessibility: called");
    if !ctx.plan.requirements.accessibility_needed {
        debug!("accessibility: not required branch");
        return RiskItem::new(
            RiskType::Accessibility,
            Severity::Low,
            "Accessibility",
            "Accessibility not required for this event",
        );
    }

    if ctx.has_selected(VendorCategory::Venue) {
        debug!("accessibility: venue selected branch");
        RiskItem::new(
            RiskType::Accessibility,
            Severity::Medium,
            "Accessibility Requirement",
            "Venue selected - please verify accessibility features",
        )
        .with_mitigation("Contact venue to confirm accessibility features meet requirements")
    } else {
        debug!("accessibility: no venue branch");
        RiskItem::new(
            RiskType::Accessibility,
            Severity::High,
            "Accessibility Requirement",
            "Accessibility is required but no venue has been selected",
        )
        .with_mitigation("Select an accessible venue")
    }
}

/// Timeframe: medium until any vendor at all is selected
///
/// Known simplification: vendor availability is not checked against the
/// preferred timeframe. This only signals whether planning has started.
pub fn timeframe(ctx: &RuleContext) -> RiskItem {
    debug!(selected = %ctx.selected.len(), "timeframe: called");
    if ctx.selected.is_empty() {
        debug!("timeframe: nothing selected branch");
        RiskItem::new(
            RiskType::Timeframe,
            Severity::Medium,
            "Vendor Availability",
            "No vendors selected yet",
        )
        .with_mitigation("Select vendors and confirm availability for the event timeframe")
    } else {
        debug!("timeframe: vendors selected branch");
        RiskItem::new(
            RiskType::Timeframe,
            Severity::Low,
            "Vendor Availability",
            format!(
                "Vendors are available for {} timeframe",
                ctx.plan.requirements.preferred_timeframe
            ),
        )
    }
}

/// Venue: indoor/outdoor match has to be confirmed by hand; distance is informational
pub fn venue(ctx: &RuleContext) -> RiskItem {
    let preference = ctx.plan.requirements.venue_preference;
    debug!(%preference, "venue: called");

    match ctx.selected_venue() {
        Some(selected) if preference.is_specific() => {
            debug!("venue: specific preference with venue branch");
            RiskItem::new(
                RiskType::Venue,
                Severity::Medium,
                "Venue Preference",
                format!(
                    "Selected venue should be {} - please verify.{}",
                    preference,
                    distance_note(ctx.reference_point, selected)
                ),
            )
            .with_mitigation(format!("Confirm the selected venue is {} as required", preference))
        }
        Some(selected) => {
            debug!("venue: flexible preference with venue branch");
            RiskItem::new(
                RiskType::Venue,
                Severity::Low,
                "Venue Location",
                format!("Venue preference is flexible.{}", distance_note(ctx.reference_point, selected)),
            )
        }
        None if preference.is_specific() => {
            debug!("venue: specific preference without venue branch");
            RiskItem::new(
                RiskType::Venue,
                Severity::Medium,
                "Venue Preference",
                format!("No {} venue selected", preference),
            )
            .with_mitigation(format!("Select a {} venue", preference))
        }
        None => {
            debug!("venue: flexible preference without venue branch");
            RiskItem::new(RiskType::Venue, Severity::Low, "Venue Preference", "No venue selected yet")
        }
    }
}

fn distance_note(origin: &GeoPoint, venue: &Vendor) -> String {
    match origin.distance_to(venue) {
        Some(km) => format!(" Distance from {}: {}.", origin.label, format_distance(km)),
        None => String::new(),
    }
}

/// Weather: adverse conditions are high, shelter recommendations medium, no signal medium
pub fn weather(ctx: &RuleContext) -> RiskItem {
    debug!("weather: called");
    let Some(signal) = ctx.weather else {
        debug!("weather: no signal branch");
        return RiskItem::new(
            RiskType::Weather,
            Severity::Medium,
            "Weather Forecast",
            "Weather forecast unavailable for the event date",
        )
        .with_mitigation("Check the forecast closer to the event date and keep an indoor option in mind");
    };

    let reading = format!(
        "{} weather expected ({}°C, {}% precipitation)",
        signal.condition, signal.temperature, signal.precipitation
    );

    if signal.is_bad_weather {
        let mitigation = match signal.hazard() {
            WeatherHazard::Precipitation => {
                debug!("weather: bad weather precipitation branch");
                "Ensure venue has indoor backup or select an indoor venue"
            }
            WeatherHazard::Visibility => {
                debug!("weather: bad weather visibility branch");
                "Arrange clear signage and extra lighting for arriving guests"
            }
            WeatherHazard::Other => {
                debug!("weather: bad weather other branch");
                "Monitor the forecast and prepare a weather contingency plan"
            }
        };
        RiskItem::new(
            RiskType::Weather,
            Severity::High,
            "Weather Risk",
            format!("{} - indoor venue recommended", reading),
        )
        .with_mitigation(mitigation)
    } else if signal.needs_indoor {
        debug!("weather: indoor recommended branch");
        RiskItem::new(
            RiskType::Weather,
            Severity::Medium,
            "Weather Advisory",
            format!("{}, {} km/h wind - indoor shelter recommended", reading, signal.wind_speed_kmh),
        )
        .with_mitigation("Plan indoor space or shelter for outdoor parts of the program")
    } else {
        debug!("weather: fair weather branch");
        RiskItem::new(RiskType::Weather, Severity::Low, "Weather Forecast", reading)
    }
}

/// Budget: projected cost includes the safety margin; zero budget means 0% utilization
///
/// Utilization is judged at the precision it is displayed with, tenths of a percent.
pub fn budget(ctx: &RuleContext) -> RiskItem {
    let budget = ctx.plan.budget();
    let projected = ctx.plan.estimated_cost() * crate::SAFETY_MARGIN;
    debug!(%budget, %projected, "budget: called");

    if projected > budget {
        debug!("budget: over budget branch");
        return RiskItem::new(
            RiskType::Budget,
            Severity::High,
            "Budget Risk",
            format!(
                "Projected cost with safety margin is {}, exceeding available budget of {}",
                format_amount(projected, ctx.currency),
                format_amount(budget, ctx.currency)
            ),
        )
        .with_mitigation("Review vendor selections and reduce costs, or increase budget allocation");
    }

    let utilization = if budget > 0.0 { projected / budget } else { 0.0 };
    let description = format!(
        "Budget is within limits ({} used with safety margin)",
        format_percent(utilization)
    );

    if percent_tenths(utilization) > percent_tenths(ctx.thresholds.utilization_warn) {
        debug!(%utilization, "budget: high utilization branch");
        RiskItem::new(RiskType::Budget, Severity::Medium, "Budget Status", description)
            .with_mitigation("Monitor spending closely")
    } else {
        debug!(%utilization, "budget: comfortable branch");
        RiskItem::new(RiskType::Budget, Severity::Low, "Budget Status", description)
    }
}

/// Schedule: conflict count is computed by the caller
pub fn schedule(ctx: &RuleContext) -> RiskItem {
    debug!(conflicts = %ctx.schedule_conflicts, "schedule: called");
    match ctx.schedule_conflicts {
        0 => RiskItem::new(
            RiskType::Schedule,
            Severity::Low,
            "Schedule Conflicts",
            "No other events scheduled on the same date",
        ),
        1 => RiskItem::new(
            RiskType::Schedule,
            Severity::Medium,
            "Schedule Conflicts",
            "1 other event is scheduled on the same date",
        )
        .with_mitigation("Check that shared staff and attendees are not double-booked"),
        n => RiskItem::new(
            RiskType::Schedule,
            Severity::High,
            "Schedule Conflicts",
            format!("{} other events are scheduled on the same date", n),
        )
        .with_mitigation("Consider moving the event to a less crowded date"),
    }
}

/// Tasks: remaining (non-completed) tasks against the backlog threshold
pub fn tasks(ctx: &RuleContext) -> RiskItem {
    let total = ctx.tasks.len();
    let remaining = ctx.tasks.iter().filter(|t| !t.is_completed()).count();
    debug!(%total, %remaining, "tasks: called");

    if remaining > ctx.thresholds.task_backlog_high {
        debug!("tasks: large backlog branch");
        RiskItem::new(
            RiskType::Tasks,
            Severity::High,
            "Task Delays",
            format!("{} of {} tasks remaining - high risk of delays", remaining, total),
        )
        .with_mitigation("Prioritize remaining tasks and assign additional resources if needed")
    } else if remaining > 0 {
        debug!("tasks: some remaining branch");
        RiskItem::new(
            RiskType::Tasks,
            Severity::Medium,
            "Task Progress",
            format!("{} of {} tasks remaining", remaining, total),
        )
        .with_mitigation("Continue working through remaining tasks")
    } else {
        debug!("tasks: all done branch");
        RiskItem::new(RiskType::Tasks, Severity::Low, "Task Progress", "All tasks completed")
    }
}

/// External: fixed placeholder, no live source is consulted
pub fn external(_ctx: &RuleContext) -> RiskItem {
    RiskItem::new(
        RiskType::External,
        Severity::Low,
        "External Events",
        "No major external events detected that would impact your event",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskStatus, VenuePreference};

    struct Fixture {
        plan: EventPlan,
        vendors: Vec<Vendor>,
        tasks: Vec<Task>,
        weather: Option<WeatherSignal>,
        conflicts: usize,
        thresholds: Thresholds,
        origin: GeoPoint,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                plan: EventPlan::new("evt", 10_000.0),
                vendors: vec![],
                tasks: vec![],
                weather: None,
                conflicts: 0,
                thresholds: Thresholds::default(),
                origin: GeoPoint::default(),
            }
        }

        fn ctx(&self) -> RuleContext<'_> {
            RuleContext {
                plan: &self.plan,
                selected: self.vendors.iter().collect(),
                tasks: &self.tasks,
                weather: self.weather.as_ref(),
                schedule_conflicts: self.conflicts,
                thresholds: &self.thresholds,
                reference_point: &self.origin,
                currency: "DKK",
            }
        }
    }

    #[test]
    fn test_lunch_without_catering_is_high() {
        let mut f = Fixture::new();
        f.plan.requirements.include_lunch = true;
        let item = lunch(&f.ctx());
        assert_eq!(item.severity, Severity::High);
        assert!(item.mitigation.is_some());

        f.vendors.push(Vendor::new("food", VendorCategory::Catering, 2000.0));
        let item = lunch(&f.ctx());
        assert_eq!(item.severity, Severity::Low);
        assert!(item.mitigation.is_none());
    }

    #[test]
    fn test_lunch_not_required_is_low() {
        let f = Fixture::new();
        let item = lunch(&f.ctx());
        assert_eq!(item.risk_type, RiskType::Lunch);
        assert_eq!(item.severity, Severity::Low);
    }

    #[test]
    fn test_accessibility_branches() {
        let mut f = Fixture::new();
        assert_eq!(accessibility(&f.ctx()).severity, Severity::Low);

        f.plan.requirements.accessibility_needed = true;
        assert_eq!(accessibility(&f.ctx()).severity, Severity::High);

        f.vendors.push(Vendor::new("hall", VendorCategory::Venue, 5000.0));
        let item = accessibility(&f.ctx());
        assert_eq!(item.severity, Severity::Medium);
        assert!(item.mitigation.unwrap().contains("confirm"));
    }

    #[test]
    fn test_timeframe_ignores_categories() {
        let mut f = Fixture::new();
        assert_eq!(timeframe(&f.ctx()).severity, Severity::Medium);

        f.vendors.push(Vendor::new("gift", VendorCategory::Gifts, 100.0));
        let item = timeframe(&f.ctx());
        assert_eq!(item.severity, Severity::Low);
        assert_eq!(item.description, "Vendors are available for full-day timeframe");
    }

    #[test]
    fn test_venue_branches() {
        let mut f = Fixture::new();
        assert_eq!(venue(&f.ctx()).severity, Severity::Low);

        f.plan.requirements.venue_preference = VenuePreference::Outdoor;
        let item = venue(&f.ctx());
        assert_eq!(item.severity, Severity::Medium);
        assert_eq!(item.description, "No outdoor venue selected");

        let mut hall = Vendor::new("hall", VendorCategory::Venue, 5000.0);
        hall.distance_km = Some(2.5);
        f.vendors.push(hall);
        let item = venue(&f.ctx());
        assert_eq!(item.severity, Severity::Medium);
        assert_eq!(
            item.description,
            "Selected venue should be outdoor - please verify. Distance from CPH Central Station: 2.5 km."
        );

        f.plan.requirements.venue_preference = VenuePreference::Either;
        let item = venue(&f.ctx());
        assert_eq!(item.severity, Severity::Low);
        assert!(item.description.starts_with("Venue preference is flexible."));
    }

    #[test]
    fn test_weather_branches() {
        let mut f = Fixture::new();
        let item = weather(&f.ctx());
        assert_eq!(item.severity, Severity::Medium);
        assert!(item.mitigation.is_some());

        f.weather = Some(WeatherSignal::from_reading("Rain", 14.0, 80.0, 10.0));
        let item = weather(&f.ctx());
        assert_eq!(item.severity, Severity::High);
        assert!(item.mitigation.unwrap().contains("indoor backup"));

        f.weather = Some(WeatherSignal::from_reading("Fog", 8.0, 10.0, 5.0));
        assert!(weather(&f.ctx()).mitigation.unwrap().contains("signage"));

        f.weather = Some(WeatherSignal::from_reading("Clear", 2.0, 0.0, 5.0));
        assert_eq!(weather(&f.ctx()).severity, Severity::Medium);

        f.weather = Some(WeatherSignal::from_reading("Clear", 20.0, 0.0, 5.0));
        let item = weather(&f.ctx());
        assert_eq!(item.severity, Severity::Low);
        assert!(item.mitigation.is_none());
    }

    #[test]
    fn test_weather_other_hazard_uses_generic_mitigation() {
        let mut f = Fixture::new();
        let mut signal = WeatherSignal::from_reading("Tornado", 20.0, 0.0, 5.0);
        signal.is_bad_weather = true;
        f.weather = Some(signal);
        let item = weather(&f.ctx());
        assert_eq!(item.severity, Severity::High);
        assert!(item.mitigation.unwrap().contains("contingency"));
    }

    #[test]
    fn test_budget_high_utilization_is_medium() {
        let mut f = Fixture::new();
        f.plan.estimated_cost = 9_000.0;
        let item = budget(&f.ctx());
        assert_eq!(item.severity, Severity::Medium);
        assert_eq!(item.description, "Budget is within limits (99% used with safety margin)");
    }

    #[test]
    fn test_budget_text_agrees_with_severity_near_threshold() {
        let mut f = Fixture::new();
        f.plan.budget = 11_000.0;

        f.plan.estimated_cost = 8_520.0;
        let item = budget(&f.ctx());
        assert_eq!(item.severity, Severity::Medium);
        assert_eq!(item.description, "Budget is within limits (85.2% used with safety margin)");

        f.plan.estimated_cost = 8_504.0;
        let item = budget(&f.ctx());
        assert_eq!(item.severity, Severity::Low);
        assert_eq!(item.description, "Budget is within limits (85% used with safety margin)");
    }

    #[test]
    fn test_budget_over_is_high() {
        let mut f = Fixture::new();
        f.plan.estimated_cost = 9_200.0;
        let item = budget(&f.ctx());
        assert_eq!(item.severity, Severity::High);
        assert!(item.description.contains("10.120 DKK"));
        assert!(item.description.contains("10.000 DKK"));
    }

    #[test]
    fn test_budget_low_and_zero_budget() {
        let mut f = Fixture::new();
        f.plan.estimated_cost = 5_000.0;
        assert_eq!(budget(&f.ctx()).severity, Severity::Low);

        f.plan.budget = 0.0;
        f.plan.estimated_cost = 0.0;
        let item = budget(&f.ctx());
        assert_eq!(item.severity, Severity::Low);
        assert!(item.mitigation.is_none());
        assert!(item.description.contains("0%"));
    }

    #[test]
    fn test_schedule_thresholds() {
        let mut f = Fixture::new();
        assert_eq!(schedule(&f.ctx()).severity, Severity::Low);
        f.conflicts = 1;
        assert_eq!(schedule(&f.ctx()).severity, Severity::Medium);
        f.conflicts = 2;
        assert_eq!(schedule(&f.ctx()).severity, Severity::High);
    }

    #[test]
    fn test_tasks_boundaries() {
        let mut f = Fixture::new();
        assert_eq!(tasks(&f.ctx()).severity, Severity::Low);

        f.tasks = vec![
            Task::new("1", TaskStatus::Completed),
            Task::new("2", TaskStatus::Completed),
            Task::new("3", TaskStatus::Pending),
            Task::new("4", TaskStatus::InProgress),
            Task::new("5", TaskStatus::Overdue),
        ];
        let item = tasks(&f.ctx());
        assert_eq!(item.severity, Severity::Medium);
        assert_eq!(item.description, "3 of 5 tasks remaining");

        f.tasks.push(Task::new("6", TaskStatus::Pending));
        assert_eq!(tasks(&f.ctx()).severity, Severity::High);
    }

    #[test]
    fn test_external_is_constant() {
        let f = Fixture::new();
        let item = external(&f.ctx());
        assert_eq!(item.severity, Severity::Low);
        assert!(item.mitigation.is_none());
    }
}
