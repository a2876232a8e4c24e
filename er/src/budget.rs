//! Budget optimizer
//!
//! Two-phase greedy selection:
//!
//! 1. For every category, pick the cheapest *available* vendor. Ties go to the
//!    vendor encountered first in catalog order.
//! 2. While the total exceeds the budget, shed the selected vendor of each
//!    category in removal-priority order. The venue is never in that order and
//!    is therefore never removed.
//!
//! An infeasible budget is reported through `within_budget = false`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{Vendor, VendorCategory};
use crate::error::EngineError;

/// Order in which categories are shed under budget pressure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPriority(Vec<VendorCategory>);

impl Default for RemovalPriority {
    fn default() -> Self {
        Self(vec![
            VendorCategory::Miscellaneous,
            VendorCategory::Gifts,
            VendorCategory::Activities,
            VendorCategory::Transport,
            VendorCategory::AvEquipment,
            VendorCategory::Catering,
        ])
    }
}

impl RemovalPriority {
    /// Build a custom order; rejects the venue and repeated categories
    pub fn new(categories: Vec<VendorCategory>) -> Result<Self, EngineError> {
        debug!(?categories, "RemovalPriority::new: called");
        if categories.contains(&VendorCategory::Venue) {
            debug!("RemovalPriority::new: venue present branch");
            return Err(EngineError::InvalidPriority(
                "venue can never be removed".to_string(),
            ));
        }
        for (i, category) in categories.iter().enumerate() {
            if categories[..i].contains(category) {
                debug!(%category, "RemovalPriority::new: duplicate branch");
                return Err(EngineError::InvalidPriority(format!("{} listed more than once", category)));
            }
        }
        Ok(Self(categories))
    }

    pub fn categories(&self) -> &[VendorCategory] {
        &self.0
    }
}

/// One chosen vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Selection {
    pub category: VendorCategory,
    pub vendor_id: String,
    pub price: f64,
}

/// Output of the optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SelectionResult {
    /// Chosen vendors, at most one per category, in category order
    pub selections: Vec<Selection>,

    /// Sum of the chosen vendors' prices
    pub total_cost: f64,

    /// Whether `total_cost` fits the budget
    pub within_budget: bool,

    /// Categories shed during phase 2, in removal order
    pub removed: Vec<VendorCategory>,
}

impl SelectionResult {
    /// Chosen vendor ids
    pub fn vendor_ids(&self) -> Vec<String> {
        self.selections.iter().map(|s| s.vendor_id.clone()).collect()
    }

    /// Selection for a category, if any
    pub fn get(&self, category: VendorCategory) -> Option<&Selection> {
        self.selections.iter().find(|s| s.category == category)
    }
}

/// Greedy vendor selector with priority shedding
#[derive(Debug, Clone, Default)]
pub struct BudgetOptimizer {
    priority: RemovalPriority,
}

impl BudgetOptimizer {
    pub fn new(priority: RemovalPriority) -> Self {
        Self { priority }
    }

    /// Select at most one vendor per category within `total_budget`
    pub fn optimize(&self, vendors: &[Vendor], total_budget: f64) -> SelectionResult {
        let budget = if total_budget.is_finite() && total_budget > 0.0 { total_budget } else { 0.0 };
        debug!(vendor_count = %vendors.len(), %budget, "BudgetOptimizer::optimize: called");

        let mut selections = cheapest_per_category(vendors);
        let mut total_cost: f64 = selections.iter().map(|s| s.price).sum();
        debug!(%total_cost, selected = %selections.len(), "BudgetOptimizer::optimize: phase 1 complete");

        let mut removed = Vec::new();
        for category in self.priority.categories() {
            if total_cost <= budget {
                debug!("BudgetOptimizer::optimize: within budget, stop shedding");
                break;
            }
            if let Some(pos) = selections.iter().position(|s| s.category == *category) {
                let shed = selections.remove(pos);
                debug!(%category, vendor_id = %shed.vendor_id, price = %shed.price, "BudgetOptimizer::optimize: shed branch");
                total_cost = selections.iter().map(|s| s.price).sum();
                removed.push(*category);
            } else {
                debug!(%category, "BudgetOptimizer::optimize: nothing selected in category");
            }
        }

        let within_budget = total_cost <= budget;
        if within_budget {
            info!(%total_cost, %budget, removed = %removed.len(), "Budget selection fits");
        } else {
            warn!(%total_cost, %budget, "Budget selection still over budget after shedding");
        }

        SelectionResult {
            selections,
            total_cost,
            within_budget,
            removed,
        }
    }
}

/// Phase 1: cheapest available vendor per category, first encountered wins ties
fn cheapest_per_category(vendors: &[Vendor]) -> Vec<Selection> {
    debug!("cheapest_per_category: called");
    VendorCategory::ALL
        .iter()
        .filter_map(|category| {
            let mut best: Option<&Vendor> = None;
            for vendor in vendors.iter().filter(|v| v.category == *category && v.availability) {
                match best {
                    Some(current) if vendor.price() >= current.price() => {}
                    _ => best = Some(vendor),
                }
            }
            if best.is_none() {
                debug!(%category, "cheapest_per_category: no available vendor, skipping");
            }
            best.map(|v| Selection {
                category: *category,
                vendor_id: v.id.clone(),
                price: v.price(),
            })
        })
        .collect()
}
