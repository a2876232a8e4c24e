//! Risk items and reports

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordinal urgency of a risk; `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Closed set of risk kinds, declared in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskType {
    Lunch,
    Accessibility,
    Timeframe,
    Venue,
    Weather,
    Budget,
    Schedule,
    Tasks,
    External,
}

impl RiskType {
    /// Every risk type in canonical evaluation order
    pub const ALL: [RiskType; 9] = [
        Self::Lunch,
        Self::Accessibility,
        Self::Timeframe,
        Self::Venue,
        Self::Weather,
        Self::Budget,
        Self::Schedule,
        Self::Tasks,
        Self::External,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Accessibility => "accessibility",
            Self::Timeframe => "timeframe",
            Self::Venue => "venue",
            Self::Weather => "weather",
            Self::Budget => "budget",
            Self::Schedule => "schedule",
            Self::Tasks => "tasks",
            Self::External => "external",
        }
    }
}

impl std::fmt::Display for RiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single risk finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    /// Which rule produced this item
    #[serde(rename = "type")]
    pub risk_type: RiskType,

    pub title: String,

    pub description: String,

    pub severity: Severity,

    /// Suggested action; absent when nothing needs doing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

impl RiskItem {
    /// Create an item without mitigation
    pub fn new(risk_type: RiskType, severity: Severity, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            risk_type,
            title: title.into(),
            description: description.into(),
            severity,
            mitigation: None,
        }
    }

    /// Attach a mitigation
    pub fn with_mitigation(mut self, mitigation: impl Into<String>) -> Self {
        self.mitigation = Some(mitigation.into());
        self
    }

    /// Whether the hosting application should act on this item
    pub fn needs_action(&self) -> bool {
        self.mitigation.is_some()
    }
}

/// Ordered findings of one analysis run, in canonical evaluation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskReport {
    items: Vec<RiskItem>,
}

impl RiskReport {
    pub(crate) fn from_items(items: Vec<RiskItem>) -> Self {
        debug!(item_count = %items.len(), "RiskReport::from_items: called");
        Self { items }
    }

    pub fn items(&self) -> &[RiskItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item for a risk type
    pub fn get(&self, risk_type: RiskType) -> Option<&RiskItem> {
        self.items.iter().find(|i| i.risk_type == risk_type)
    }

    /// Number of items with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|i| i.severity == severity).count()
    }

    /// Most severe finding, `None` for an empty report
    pub fn highest_severity(&self) -> Option<Severity> {
        self.items.iter().map(|i| i.severity).max()
    }

    /// Items re-sorted high first; ties keep evaluation order
    pub fn by_severity(&self) -> Vec<&RiskItem> {
        let mut sorted: Vec<&RiskItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.severity.cmp(&a.severity));
        sorted
    }
}

impl<'a> IntoIterator for &'a RiskReport {
    type Item = &'a RiskItem;
    type IntoIter = std::slice::Iter<'a, RiskItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
