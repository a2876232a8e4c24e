//! EventRisk - risk and budget decision engine for event planning
//!
//! Takes a snapshot of an event plan together with live signals (vendor
//! selections, task progress, weather, calendar collisions) and produces a
//! severity-ranked risk report and a budget-constrained vendor selection.
//!
//! # Core Concepts
//!
//! - **Pure engine**: [`RiskAnalyzer`], [`BudgetOptimizer`] and
//!   [`AdvisorySynthesizer`] take inputs by reference, hold no state between
//!   calls and never fail
//! - **Complete reports**: every analysis yields exactly one [`RiskItem`] per
//!   [`RiskType`], in a fixed evaluation order
//! - **Protected venue**: budget shedding never removes the venue
//! - **Degrade, don't fail**: missing signals fall back to documented defaults
//!
//! # Modules
//!
//! - [`domain`] - plan, vendor, task and calendar types
//! - [`risk`] - risk rules, items and the analyzer
//! - [`budget`] - greedy selection with priority shedding
//! - [`advisory`] - action bundles derived from a risk report
//! - [`weather`] - weather signal, classification and providers
//! - [`catalog`] - vendor catalog accessors
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//!
//! # Example
//!
//! ```ignore
//! use eventrisk::{BudgetOptimizer, RiskAnalyzer, RiskInput};
//!
//! let report = RiskAnalyzer::default().analyze(&RiskInput::new(&plan, &selected, &vendors));
//! let selection = BudgetOptimizer::default().optimize(&vendors, plan.budget());
//! ```

pub mod advisory;
pub mod budget;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod geo;
pub mod money;
pub mod risk;
pub mod schedule;
pub mod snapshot;
pub mod weather;

pub use advisory::{Advisory, AdvisorySynthesizer};
pub use budget::{BudgetOptimizer, RemovalPriority, SelectionResult};
pub use catalog::{InMemoryCatalog, VendorCatalog};
pub use config::{BudgetConfig, Config, Thresholds, WeatherConfig};
pub use domain::{
    CalendarEvent, EventPlan, EventType, Requirements, Task, TaskStatus, Timeframe, Vendor, VendorCategory,
    VenuePreference,
};
pub use error::EngineError;
pub use geo::GeoPoint;
pub use risk::{RiskAnalyzer, RiskInput, RiskItem, RiskReport, RiskType, Severity};
pub use schedule::count_schedule_conflicts;
pub use snapshot::{PlanSnapshot, read_document};
pub use weather::{OpenWeatherProvider, WeatherProvider, WeatherSignal, fetch_signal_or_fallback};

/// Safety margin applied to the estimated cost before comparing with the budget (10%)
pub const SAFETY_MARGIN: f64 = 1.10;

/// Budget utilization above which the budget risk becomes medium (85%)
pub const DEFAULT_UTILIZATION_WARN: f64 = 0.85;

/// Remaining tasks above which the task risk becomes high
pub const DEFAULT_TASK_BACKLOG_HIGH: usize = 3;

/// Currency code rendered in budget descriptions
pub const DEFAULT_CURRENCY: &str = "DKK";
