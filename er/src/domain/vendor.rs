//! Vendor catalog entries

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Functional class of a vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VendorCategory {
    Venue,
    Catering,
    Transport,
    Activities,
    AvEquipment,
    Gifts,
    Miscellaneous,
}

impl VendorCategory {
    /// All categories in catalog order
    pub const ALL: [VendorCategory; 7] = [
        Self::Venue,
        Self::Catering,
        Self::Transport,
        Self::Activities,
        Self::AvEquipment,
        Self::Gifts,
        Self::Miscellaneous,
    ];

    /// Kebab-case name as used in configuration and snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Catering => "catering",
            Self::Transport => "transport",
            Self::Activities => "activities",
            Self::AvEquipment => "av-equipment",
            Self::Gifts => "gifts",
            Self::Miscellaneous => "miscellaneous",
        }
    }
}

impl std::fmt::Display for VendorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VendorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "VendorCategory::from_str: called");
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("unknown vendor category '{}'", s))
    }
}

/// A vendor as supplied by the catalog
///
/// Prices are currency-neutral. Vendors are immutable for the duration of a
/// single engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Vendor {
    /// Catalog identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Vendor category
    #[serde(alias = "type")]
    pub category: VendorCategory,

    /// Price estimate for the event
    #[serde(default)]
    pub price_estimate: f64,

    /// Whether the vendor can currently be booked
    #[serde(default = "default_availability")]
    pub availability: bool,

    /// Rating (0-5)
    #[serde(default)]
    pub rating: f64,

    /// Maximum number of guests, if known
    #[serde(default)]
    pub capacity: Option<u32>,

    /// Free-form location text
    #[serde(default)]
    pub location: Option<String>,

    /// Latitude, if geocoded
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude, if geocoded
    #[serde(default)]
    pub lng: Option<f64>,

    /// Precomputed distance from the reference point in kilometers
    #[serde(default)]
    pub distance_km: Option<f64>,
}

fn default_availability() -> bool {
    true
}

impl Vendor {
    /// Create an available vendor with the given category and price
    pub fn new(id: impl Into<String>, category: VendorCategory, price_estimate: f64) -> Self {
        let id = id.into();
        debug!(%id, %category, %price_estimate, "Vendor::new: called");
        Self {
            name: id.clone(),
            id,
            category,
            price_estimate,
            availability: true,
            rating: 0.0,
            capacity: None,
            location: None,
            lat: None,
            lng: None,
            distance_km: None,
        }
    }

    /// Mark the vendor unavailable
    pub fn unavailable(mut self) -> Self {
        self.availability = false;
        self
    }

    /// Attach coordinates
    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Price usable for arithmetic: negative or non-finite estimates count as 0
    pub fn price(&self) -> f64 {
        if self.price_estimate.is_finite() && self.price_estimate > 0.0 {
            self.price_estimate
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in VendorCategory::ALL {
            assert_eq!(category.as_str().parse::<VendorCategory>(), Ok(category));
        }
        assert_eq!(" AV-Equipment ".parse::<VendorCategory>(), Ok(VendorCategory::AvEquipment));
        assert!("florist".parse::<VendorCategory>().is_err());
    }

    #[test]
    fn test_vendor_deserializes_with_type_alias_and_defaults() {
        let yaml = "id: v1\ntype: av-equipment\nprice-estimate: 1200\n";
        let vendor: Vendor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(vendor.category, VendorCategory::AvEquipment);
        assert!(vendor.availability);
        assert_eq!(vendor.price(), 1200.0);
        assert_eq!(vendor.capacity, None);
    }

    #[test]
    fn test_price_sanitizes_bad_values() {
        let mut vendor = Vendor::new("v", VendorCategory::Gifts, -5.0);
        assert_eq!(vendor.price(), 0.0);
        vendor.price_estimate = f64::NAN;
        assert_eq!(vendor.price(), 0.0);
    }
}
