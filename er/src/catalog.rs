//! Vendor catalog accessors
//!
//! The catalog is owned by an external collaborator and refreshed between
//! engine calls. The engine only needs read access to a flat vendor list.

use std::path::Path;
use tracing::{debug, info};

use crate::domain::{Vendor, VendorCategory};
use crate::error::EngineError;
use crate::snapshot::read_document;

/// Read-only view of the vendor catalog
pub trait VendorCatalog {
    /// Every vendor, in catalog order
    fn vendors(&self) -> &[Vendor];

    /// Vendor by id
    fn get(&self, id: &str) -> Option<&Vendor> {
        self.vendors().iter().find(|v| v.id == id)
    }

    /// Available vendors of one category, in catalog order
    fn available(&self, category: VendorCategory) -> Vec<&Vendor> {
        self.vendors()
            .iter()
            .filter(|v| v.category == category && v.availability)
            .collect()
    }

    /// Sum of prices of the selected vendors; unknown ids contribute nothing
    ///
    /// Hosts use this to refresh `EventPlan::estimated_cost` after applying a
    /// selection.
    fn selection_cost(&self, selected_ids: &[String]) -> f64 {
        let cost = self
            .vendors()
            .iter()
            .filter(|v| selected_ids.contains(&v.id))
            .map(|v| v.price())
            .sum();
        debug!(selected = %selected_ids.len(), %cost, "VendorCatalog::selection_cost: called");
        cost
    }
}

/// Catalog held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryCatalog {
    vendors: Vec<Vendor>,
}

impl InMemoryCatalog {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        Self { vendors }
    }

    /// Load a catalog document: a YAML or JSON list of vendors
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        debug!(?path, "InMemoryCatalog::load: called");
        let vendors: Vec<Vendor> = read_document(path)?;
        info!("Loaded {} vendors from {}", vendors.len(), path.display());
        Ok(Self { vendors })
    }
}

impl VendorCatalog for InMemoryCatalog {
    fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }
}
