//! Plan snapshots and document loading
//!
//! A snapshot bundles everything the host gathered for one analysis: the
//! plan, the user's selection, the catalog, tasks, an optional weather
//! reading and the calendar. Documents are YAML or JSON by extension.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::catalog::VendorCatalog;
use crate::domain::{CalendarEvent, EventPlan, Task, Vendor};
use crate::error::EngineError;
use crate::risk::RiskInput;
use crate::schedule::count_schedule_conflicts;
use crate::weather::WeatherSignal;

/// Everything needed for one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlanSnapshot {
    pub plan: EventPlan,
    pub selected_vendors: Vec<String>,
    pub vendors: Vec<Vendor>,
    pub tasks: Vec<Task>,
    pub weather: Option<WeatherSignal>,
    pub events: Vec<CalendarEvent>,
}

impl PlanSnapshot {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        read_document(path)
    }

    /// Schedule collisions of the plan against the snapshot's calendar
    pub fn schedule_conflicts(&self) -> usize {
        count_schedule_conflicts(&self.plan.id, self.plan.date, &self.events)
    }

    /// Analyzer input borrowing from this snapshot
    pub fn risk_input(&self) -> RiskInput<'_> {
        RiskInput::new(&self.plan, &self.selected_vendors, &self.vendors)
            .tasks(&self.tasks)
            .weather(self.weather.as_ref())
            .schedule_conflicts(self.schedule_conflicts())
    }
}

impl VendorCatalog for PlanSnapshot {
    fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }
}

/// Read a YAML (`.yml`/`.yaml`) or JSON (`.json`) document
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    debug!(?path, "read_document: called");
    let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let parse_error = |message: String| EngineError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_str() {
        "yml" | "yaml" => {
            debug!("read_document: yaml branch");
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
        }
        "json" => {
            debug!("read_document: json branch");
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
        }
        other => {
            debug!(%other, "read_document: unsupported extension branch");
            Err(EngineError::UnsupportedFormat(path.display().to_string()))
        }
    }
}
