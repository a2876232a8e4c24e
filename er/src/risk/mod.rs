//! Risk analysis
//!
//! Nine independent rules, each producing exactly one [`RiskItem`]. The
//! [`RiskAnalyzer`] concatenates them in a fixed evaluation order:
//!
//! ```text
//! lunch → accessibility → timeframe → venue → weather → budget → schedule → tasks → external
//! ```

mod analyzer;
mod report;
pub mod rules;

pub use analyzer::{RiskAnalyzer, RiskInput};
pub use report::{RiskItem, RiskReport, RiskType, Severity};
