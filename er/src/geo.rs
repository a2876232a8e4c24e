//! Distance from a reference point
//!
//! Venue descriptions mention how far the venue is from a well-known
//! reference point. Distance never affects severity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Vendor;

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A named coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeoPoint {
    /// Human-readable name, e.g. "CPH Central Station"
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self {
            label: "CPH Central Station".to_string(),
            lat: 55.6726,
            lng: 12.5640,
        }
    }
}

impl GeoPoint {
    /// Distance to a vendor, preferring a precomputed value over coordinates
    pub fn distance_to(&self, vendor: &Vendor) -> Option<f64> {
        debug!(vendor_id = %vendor.id, "GeoPoint::distance_to: called");
        if let Some(km) = vendor.distance_km.filter(|d| d.is_finite() && *d > 0.0) {
            debug!(%km, "GeoPoint::distance_to: precomputed distance branch");
            return Some(km);
        }
        match (vendor.lat, vendor.lng) {
            (Some(lat), Some(lng)) => {
                debug!("GeoPoint::distance_to: coordinates branch");
                Some(haversine_km(self.lat, self.lng, lat, lng))
            }
            _ => {
                debug!("GeoPoint::distance_to: no location branch");
                None
            }
        }
    }
}

/// Great-circle distance between two coordinates, rounded to one decimal
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_KM * c * 10.0).round() / 10.0
}

/// Render a distance as meters below 1 km, kilometers otherwise
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{} km", km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VendorCategory;

    #[test]
    fn test_haversine_zero_distance() {
        assert_eq!(haversine_km(55.6726, 12.5640, 55.6726, 12.5640), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Copenhagen Central Station to Malmö Central Station is roughly 28 km
        let km = haversine_km(55.6726, 12.5640, 55.6094, 13.0007);
        assert!((27.0..29.0).contains(&km), "got {}", km);
    }

    #[test]
    fn test_distance_prefers_precomputed_value() {
        let origin = GeoPoint::default();
        let mut venue = Vendor::new("v", VendorCategory::Venue, 1000.0).at(55.6094, 13.0007);
        venue.distance_km = Some(3.4);
        assert_eq!(origin.distance_to(&venue), Some(3.4));

        venue.distance_km = None;
        assert!(origin.distance_to(&venue).unwrap() > 20.0);

        let nowhere = Vendor::new("w", VendorCategory::Venue, 1000.0);
        assert_eq!(origin.distance_to(&nowhere), None);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.45), "450 m");
        assert_eq!(format_distance(2.3), "2.3 km");
        assert_eq!(format_distance(12.0), "12 km");
    }
}
