//! Built-in starter catalog.
//!
//! Seed rows go through the ordinary merge policy rather than being
//! inserted directly, so they are normalized exactly like any other
//! submission.

use serde_json::json;

use crate::error::CatalogError;
use crate::merge;
use crate::models::RawFields;
use crate::repository::CatalogRepository;

/// Seed the catalog with the starter records. Returns how many records
/// were created. Existing entries are merged into, not duplicated.
pub async fn seed_catalog(catalog: &CatalogRepository) -> Result<usize, CatalogError> {
    let mut created = 0;
    for row in seed_rows() {
        let fields = RawFields::from_value(&row);
        if merge::upsert(catalog, &fields).await?.created {
            created += 1;
        }
    }
    Ok(created)
}

fn seed_rows() -> Vec<serde_json::Value> {
    vec![
        json!({
            "brand": "Toyota", "model_name": "8FG25", "tier": "MID",
            "load_capacity_kg": 2500, "lift_height_cm": 300, "power_type": "LPG",
            "operating_weight_kg": 3800, "turn_radius_cm": 223, "travel_speed_kmh": "18.5",
            "price_range_min": 28000, "price_range_max": 34000, "warranty_months": 24,
            "availability": "In stock", "overall_score": "8.4",
        }),
        json!({
            "brand": "Toyota", "model_name": "8FG30", "tier": "MID",
            "load_capacity_kg": 3000, "lift_height_cm": 300, "power_type": "LPG",
            "operating_weight_kg": 4250, "turn_radius_cm": 236, "travel_speed_kmh": "18.5",
            "price_range_min": 31000, "price_range_max": 38000, "warranty_months": 24,
            "availability": "In stock", "overall_score": "8.2",
        }),
        json!({
            "brand": "Hyster", "model_name": "H2.5XT", "tier": "ENTRY",
            "load_capacity_kg": 2500, "lift_height_cm": 330, "power_type": "LPG/Diesel",
            "operating_weight_kg": 3900, "turn_radius_cm": 229, "travel_speed_kmh": "17.7",
            "price_range_min": 24000, "price_range_max": 29000, "warranty_months": 12,
            "availability": "In stock", "overall_score": "7.6",
        }),
        json!({
            "brand": "Linde", "model_name": "H25", "tier": "PREMIUM",
            "load_capacity_kg": 2500, "lift_height_cm": 320, "power_type": "Diesel",
            "operating_weight_kg": 4270, "turn_radius_cm": 238, "travel_speed_kmh": "21",
            "price_range_min": 36000, "price_range_max": 44000, "warranty_months": 36,
            "availability": "6-8 weeks", "overall_score": "8.9",
        }),
        json!({
            "brand": "Crown", "model_name": "FC 5200", "tier": "MID",
            "load_capacity_kg": 2000, "lift_height_cm": 280, "power_type": "Electric",
            "operating_weight_kg": 3400, "turn_radius_cm": 196, "travel_speed_kmh": "16",
            "price_range_min": 30000, "price_range_max": 36000, "warranty_months": 24,
            "availability": "In stock", "overall_score": "8.1",
        }),
        json!({
            "brand": "Kalmar", "model_name": "DCG160", "tier": "SUPERHEAVY",
            "load_capacity_kg": 16000, "lift_height_cm": 400, "power_type": "Diesel",
            "operating_weight_kg": 23000, "turn_radius_cm": 455, "travel_speed_kmh": "25",
            "price_range_min": 180000, "price_range_max": 230000, "warranty_months": 12,
            "availability": "Build to order", "overall_score": "8.0",
        }),
    ]
}
