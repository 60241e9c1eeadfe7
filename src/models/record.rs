//! Catalog record model.
//!
//! One record describes one piece of equipment in one configuration.
//! The pair (brand, model_name), compared case-insensitively, acts as the
//! catalog's de-facto primary key.

use serde::{Deserialize, Serialize};

/// Product-grade classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Entry,
    Mid,
    Premium,
    Superheavy,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "ENTRY",
            Self::Mid => "MID",
            Self::Premium => "PREMIUM",
            Self::Superheavy => "SUPERHEAVY",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ENTRY" => Some(Self::Entry),
            "MID" => Some(Self::Mid),
            "PREMIUM" => Some(Self::Premium),
            "SUPERHEAVY" => Some(Self::Superheavy),
            _ => None,
        }
    }
}

/// Creation defaults, applied when a field is missing or unparseable on the
/// creation path. The update path never uses these; it preserves prior state.
pub mod defaults {
    use super::Tier;

    pub const TIER: Tier = Tier::Mid;
    pub const LOAD_CAPACITY_KG: i64 = 2500;
    pub const LIFT_HEIGHT_CM: i64 = 300;
    pub const POWER_TYPE: &str = "LPG/Diesel";
    pub const OPERATING_WEIGHT_KG: i64 = 3500;
    pub const TURN_RADIUS_CM: f64 = 200.0;
    pub const TRAVEL_SPEED_KMH: &str = "18";
    pub const PRICE_RANGE_MIN: i64 = 20000;
    pub const PRICE_RANGE_MAX: i64 = 30000;
    pub const WARRANTY_MONTHS: i64 = 12;
    pub const AVAILABILITY: &str = "In stock";
    pub const OVERALL_SCORE: &str = "7.0";
}

/// One equipment entry in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Assigned by the repository counter on creation. Immutable.
    pub id: i64,
    pub brand: String,
    pub model_name: String,
    pub tier: Tier,
    pub load_capacity_kg: i64,
    pub lift_height_cm: i64,
    /// Open vocabulary: "LPG", "Diesel", "Electric", "Hybrid", or
    /// slash-joined combinations.
    pub power_type: String,
    pub operating_weight_kg: i64,
    pub turn_radius_cm: f64,
    /// Decimal string, e.g. "18.5".
    pub travel_speed_kmh: String,
    pub price_range_min: i64,
    pub price_range_max: i64,
    pub warranty_months: i64,
    /// Free-text status, e.g. "In stock" or "8-10 weeks".
    pub availability: String,
    /// Decimal string, 0-10.
    pub overall_score: String,
    /// Derived bucket label, see `normalize::bucket_capacity`.
    pub capacity_range_label: String,
    /// Storage ref of an associated brochure, if any.
    pub document_url: Option<String>,
}

impl CatalogRecord {
    /// Case-insensitive equality on the (brand, model_name) pair.
    pub fn same_pair(&self, brand: &str, model_name: &str) -> bool {
        self.brand.eq_ignore_ascii_case(brand)
            && self.model_name.eq_ignore_ascii_case(model_name)
    }
}
