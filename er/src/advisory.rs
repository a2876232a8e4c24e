//! Advisory synthesizer
//!
//! Turns a [`RiskReport`] into a short list of prioritized action bundles for
//! the host to display. Works only from the report; nothing is recomputed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::risk::{RiskItem, RiskReport, RiskType, Severity};

/// A prioritized bundle of actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Advisory {
    pub priority: Severity,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
}

impl Advisory {
    fn new(priority: Severity, title: &str, description: impl Into<String>, action_items: Vec<String>) -> Self {
        Self {
            priority,
            title: title.to_string(),
            description: description.into(),
            action_items,
        }
    }
}

/// Maps risk reports to advisories
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisorySynthesizer;

impl AdvisorySynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Build advisories: severity bundle, health status, then targeted bundles
    pub fn synthesize(&self, report: &RiskReport) -> Vec<Advisory> {
        let high: Vec<&RiskItem> = report.iter().filter(|r| r.severity == Severity::High).collect();
        let medium: Vec<&RiskItem> = report.iter().filter(|r| r.severity == Severity::Medium).collect();
        debug!(high = %high.len(), medium = %medium.len(), "AdvisorySynthesizer::synthesize: called");

        let mut advisories = Vec::new();

        if !high.is_empty() {
            debug!("AdvisorySynthesizer::synthesize: high risks branch");
            let mut actions = Vec::new();
            for risk in &high {
                if let Some(m) = &risk.mitigation {
                    actions.push(m.clone());
                }
                actions.extend(follow_up_actions(risk.risk_type).iter().map(|a| a.to_string()));
            }
            advisories.push(Advisory::new(
                Severity::High,
                "Critical Issues Requiring Immediate Attention",
                format!(
                    "You have {} high-priority risk(s): {}. These need to be addressed before your event.",
                    high.len(),
                    join_titles(&high)
                ),
                dedup(actions),
            ));
        } else if !medium.is_empty() {
            debug!("AdvisorySynthesizer::synthesize: medium risks branch");
            let actions = medium.iter().filter_map(|r| r.mitigation.clone()).collect();
            advisories.push(Advisory::new(
                Severity::Medium,
                "Moderate Risks to Monitor",
                format!(
                    "You have {} moderate risk(s): {}. Keep an eye on these and address them soon.",
                    medium.len(),
                    join_titles(&medium)
                ),
                dedup(actions),
            ));
        }

        if high.is_empty() && medium.is_empty() {
            advisories.push(Advisory::new(
                Severity::Low,
                "Event Health Status: Excellent",
                "All risk indicators are green. Continue monitoring as the event date approaches.",
                strings(&[
                    "Continue regular check-ins with vendors",
                    "Keep tasks updated and on schedule",
                    "Monitor weather forecasts as event date approaches",
                ]),
            ));
        } else if high.is_empty() {
            advisories.push(Advisory::new(
                Severity::Low,
                "Event Health Status: Good",
                "No critical risks detected. Address the moderate risks to ensure smooth event execution.",
                strings(&["Review and address moderate risks", "Continue monitoring event progress"]),
            ));
        }

        if is_high(report, RiskType::Budget) {
            debug!("AdvisorySynthesizer::synthesize: budget bundle branch");
            advisories.push(Advisory::new(
                Severity::High,
                "Budget Optimization Needed",
                "Your budget is at risk. Consider these cost-saving strategies.",
                strings(&[
                    "Review vendor selections and compare prices",
                    "Consider reducing non-essential services",
                    "Negotiate better rates with selected vendors",
                    "Run the budget optimizer to find the cheapest selection that fits",
                ]),
            ));
        }

        if is_high(report, RiskType::Tasks) {
            debug!("AdvisorySynthesizer::synthesize: tasks bundle branch");
            advisories.push(Advisory::new(
                Severity::High,
                "Task Management Action Required",
                "Multiple tasks are still pending. Take action to stay on schedule.",
                strings(&[
                    "Review the task timeline",
                    "Assign team members to pending tasks",
                    "Set deadlines for critical tasks",
                    "Consider delegating tasks to ensure completion",
                ]),
            ));
        }

        if is_high(report, RiskType::Lunch) || is_high(report, RiskType::Venue) || is_high(report, RiskType::Accessibility) {
            debug!("AdvisorySynthesizer::synthesize: vendor selection bundle branch");
            advisories.push(Advisory::new(
                Severity::High,
                "Complete Vendor Selection",
                "Essential vendors are missing. Complete your vendor selections to meet event requirements.",
                strings(&[
                    "Select the required services from the vendor catalog",
                    "Compare vendor options and prices",
                    "Confirm vendor availability for your event date",
                    "Book vendors as soon as possible to secure dates",
                ]),
            ));
        }

        advisories
    }
}

/// Extra steps for a high risk of the given type
fn follow_up_actions(risk_type: RiskType) -> &'static [&'static str] {
    match risk_type {
        RiskType::Lunch => &["Select a catering service from the vendor catalog"],
        RiskType::Accessibility => &["Verify venue accessibility features or select an accessible venue"],
        RiskType::Budget => &[
            "Review budget allocations per category",
            "Consider selecting lower-cost vendor alternatives",
        ],
        RiskType::Weather => &[
            "Confirm indoor backup venue is available",
            "Contact venue to discuss weather contingency plan",
        ],
        RiskType::Schedule => &[
            "Review other events scheduled on the same date",
            "Consider rescheduling if conflicts are significant",
        ],
        RiskType::Tasks => &[
            "Prioritize remaining tasks",
            "Assign additional team members to complete tasks",
        ],
        RiskType::Timeframe | RiskType::Venue | RiskType::External => &[],
    }
}

fn is_high(report: &RiskReport, risk_type: RiskType) -> bool {
    report.get(risk_type).is_some_and(|r| r.severity == Severity::High)
}

fn join_titles(items: &[&RiskItem]) -> String {
    items.iter().map(|r| r.title.as_str()).collect::<Vec<_>>().join(", ")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Remove duplicates, keeping first occurrences in order
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|i| seen.insert(i.clone())).collect()
}
