//! RiskAnalyzer - ordered evaluation of every risk rule

use tracing::{debug, info, warn};

use super::rules::{self, RuleContext};
use super::{RiskItem, RiskReport, RiskType};
use crate::config::{Config, Thresholds};
use crate::domain::{EventPlan, Task, Vendor};
use crate::geo::GeoPoint;
use crate::weather::WeatherSignal;

type Rule = fn(&RuleContext) -> RiskItem;

/// Rules in canonical evaluation order, aligned with `RiskType::ALL`
const RULES: [(RiskType, Rule); 9] = [
    (RiskType::Lunch, rules::lunch),
    (RiskType::Accessibility, rules::accessibility),
    (RiskType::Timeframe, rules::timeframe),
    (RiskType::Venue, rules::venue),
    (RiskType::Weather, rules::weather),
    (RiskType::Budget, rules::budget),
    (RiskType::Schedule, rules::schedule),
    (RiskType::Tasks, rules::tasks),
    (RiskType::External, rules::external),
];

/// Snapshot handed to the analyzer
///
/// Collections default to empty and the weather signal to absent, so a
/// sparse snapshot still yields a complete report.
#[derive(Debug, Clone, Copy)]
pub struct RiskInput<'a> {
    pub plan: &'a EventPlan,
    pub selected_vendor_ids: &'a [String],
    pub vendors: &'a [Vendor],
    pub tasks: &'a [Task],
    pub weather: Option<&'a WeatherSignal>,
    pub schedule_conflicts: usize,
}

impl<'a> RiskInput<'a> {
    pub fn new(plan: &'a EventPlan, selected_vendor_ids: &'a [String], vendors: &'a [Vendor]) -> Self {
        Self {
            plan,
            selected_vendor_ids,
            vendors,
            tasks: &[],
            weather: None,
            schedule_conflicts: 0,
        }
    }

    pub fn tasks(mut self, tasks: &'a [Task]) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn weather(mut self, weather: Option<&'a WeatherSignal>) -> Self {
        self.weather = weather;
        self
    }

    pub fn schedule_conflicts(mut self, count: usize) -> Self {
        self.schedule_conflicts = count;
        self
    }
}

/// Deterministic rule evaluator; holds only configuration
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    thresholds: Thresholds,
    reference_point: GeoPoint,
    currency: String,
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            reference_point: GeoPoint::default(),
            currency: crate::DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl RiskAnalyzer {
    pub fn new(thresholds: Thresholds, reference_point: GeoPoint, currency: impl Into<String>) -> Self {
        Self {
            thresholds,
            reference_point,
            currency: currency.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        debug!("RiskAnalyzer::from_config: called");
        Self::new(
            config.thresholds.clone(),
            config.reference_point.clone(),
            config.currency.clone(),
        )
    }

    /// Produce one item per risk type, in evaluation order
    pub fn analyze(&self, input: &RiskInput) -> RiskReport {
        debug!(
            plan_id = %input.plan.id,
            selected = %input.selected_vendor_ids.len(),
            vendors = %input.vendors.len(),
            tasks = %input.tasks.len(),
            "RiskAnalyzer::analyze: called"
        );
        if input.weather.is_none() {
            warn!(plan_id = %input.plan.id, "No weather signal supplied, weather risk degrades to medium");
        }

        let ctx = RuleContext {
            plan: input.plan,
            selected: resolve_selected(input.selected_vendor_ids, input.vendors),
            tasks: input.tasks,
            weather: input.weather,
            schedule_conflicts: input.schedule_conflicts,
            thresholds: &self.thresholds,
            reference_point: &self.reference_point,
            currency: &self.currency,
        };

        let items: Vec<RiskItem> = RULES
            .iter()
            .map(|(risk_type, rule)| {
                let item = rule(&ctx);
                debug_assert_eq!(item.risk_type, *risk_type);
                debug!(%risk_type, severity = %item.severity, "RiskAnalyzer::analyze: rule evaluated");
                item
            })
            .collect();

        let report = RiskReport::from_items(items);
        info!(
            plan_id = %input.plan.id,
            high = %report.count(super::Severity::High),
            medium = %report.count(super::Severity::Medium),
            "Risk analysis complete"
        );
        report
    }
}

/// Catalog vendors whose id is selected; unknown ids are ignored
fn resolve_selected<'a>(selected_ids: &[String], vendors: &'a [Vendor]) -> Vec<&'a Vendor> {
    let resolved: Vec<&Vendor> = vendors.iter().filter(|v| selected_ids.contains(&v.id)).collect();
    debug!(requested = %selected_ids.len(), resolved = %resolved.len(), "resolve_selected: called");
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskStatus, VendorCategory};
    use crate::risk::Severity;

    #[test]
    fn test_rules_cover_every_type_in_order() {
        let order: Vec<RiskType> = RULES.iter().map(|(t, _)| *t).collect();
        assert_eq!(order, RiskType::ALL.to_vec());
    }

    #[test]
    fn test_sparse_input_yields_complete_report() {
        let plan = EventPlan::default();
        let report = RiskAnalyzer::default().analyze(&RiskInput::new(&plan, &[], &[]));

        assert_eq!(report.len(), 9);
        let types: Vec<RiskType> = report.iter().map(|i| i.risk_type).collect();
        assert_eq!(types, RiskType::ALL.to_vec());
        assert_eq!(report.get(RiskType::Weather).unwrap().severity, Severity::Medium);
        assert_eq!(report.get(RiskType::Timeframe).unwrap().severity, Severity::Medium);
    }

    #[test]
    fn test_unknown_selected_ids_are_ignored() {
        let mut plan = EventPlan::new("evt", 10_000.0);
        plan.requirements.include_lunch = true;
        let vendors = vec![Vendor::new("food", VendorCategory::Catering, 2000.0)];
        let selected = vec!["ghost".to_string()];

        let report = RiskAnalyzer::default().analyze(&RiskInput::new(&plan, &selected, &vendors));
        assert_eq!(report.get(RiskType::Lunch).unwrap().severity, Severity::High);
        assert_eq!(report.get(RiskType::Timeframe).unwrap().severity, Severity::Medium);
    }

    #[test]
    fn test_full_input() {
        let mut plan = EventPlan::new("evt", 10_000.0);
        plan.estimated_cost = 4_000.0;
        plan.requirements.include_lunch = true;
        let vendors = vec![
            Vendor::new("hall", VendorCategory::Venue, 3000.0),
            Vendor::new("food", VendorCategory::Catering, 1000.0),
        ];
        let selected = vec!["hall".to_string(), "food".to_string()];
        let tasks = vec![Task::new("t1", TaskStatus::Completed)];
        let weather = WeatherSignal::from_reading("Clear", 21.0, 0.0, 8.0);

        let report = RiskAnalyzer::default().analyze(
            &RiskInput::new(&plan, &selected, &vendors)
                .tasks(&tasks)
                .weather(Some(&weather))
                .schedule_conflicts(0),
        );

        assert_eq!(report.highest_severity(), Some(Severity::Low));
        assert!(report.iter().all(|i| !i.needs_action()));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds {
            task_backlog_high: 1,
            ..Default::default()
        };
        let analyzer = RiskAnalyzer::new(thresholds, GeoPoint::default(), "EUR");
        let plan = EventPlan::new("evt", 100.0);
        let tasks = vec![Task::new("a", TaskStatus::Pending), Task::new("b", TaskStatus::Pending)];

        let report = analyzer.analyze(&RiskInput::new(&plan, &[], &[]).tasks(&tasks));
        assert_eq!(report.get(RiskType::Tasks).unwrap().severity, Severity::High);
    }
}
