//! Loose input bag for incoming specification data.
//!
//! Form submissions, bulk import rows, and the extraction service all
//! produce partially-reliable field maps: any subset of keys may be
//! present, values arrive as strings or numbers, and strings often carry
//! unit suffixes ("2500kg", "12 months"). Nothing here is trusted; every
//! field is normalized explicitly before it reaches the catalog.

use serde_json::Value;

/// A single raw field value as received from the outside world.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// The full set of fields an incoming submission may carry.
///
/// All fields are optional; the merge policy decides per field whether to
/// use the value, fall back to a creation default, or preserve existing
/// state.
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    pub brand: Option<String>,
    pub model_name: Option<String>,
    pub tier: Option<RawValue>,
    pub load_capacity_kg: Option<RawValue>,
    pub lift_height_cm: Option<RawValue>,
    pub power_type: Option<RawValue>,
    pub operating_weight_kg: Option<RawValue>,
    pub turn_radius_cm: Option<RawValue>,
    pub travel_speed_kmh: Option<RawValue>,
    pub price_range_min: Option<RawValue>,
    pub price_range_max: Option<RawValue>,
    pub warranty_months: Option<RawValue>,
    pub availability: Option<RawValue>,
    pub overall_score: Option<RawValue>,
    pub capacity_range_label: Option<RawValue>,
    pub document_url: Option<String>,
}

impl RawFields {
    /// Build a field bag from an arbitrary JSON value.
    ///
    /// Total: non-object input yields an empty bag, and values that are
    /// neither strings nor numbers are dropped field-by-field. Both
    /// snake_case and camelCase key spellings are accepted.
    pub fn from_value(value: &Value) -> Self {
        let map = match value.as_object() {
            Some(m) => m,
            None => return Self::default(),
        };

        let raw = |keys: &[&str]| -> Option<RawValue> {
            keys.iter().find_map(|k| coerce(map.get(*k)?))
        };
        let text = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .find_map(|k| map.get(*k)?.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
        };

        Self {
            brand: text(&["brand"]),
            model_name: text(&["model_name", "modelName", "model"]),
            tier: raw(&["tier"]),
            load_capacity_kg: raw(&["load_capacity_kg", "loadCapacityKg", "load_capacity", "loadCapacity"]),
            lift_height_cm: raw(&["lift_height_cm", "liftHeightCm", "lift_height", "liftHeight"]),
            power_type: raw(&["power_type", "powerType"]),
            operating_weight_kg: raw(&["operating_weight_kg", "operatingWeightKg", "operating_weight", "operatingWeight"]),
            turn_radius_cm: raw(&["turn_radius_cm", "turnRadiusCm", "turn_radius", "turnRadius"]),
            travel_speed_kmh: raw(&["travel_speed_kmh", "travelSpeedKmh", "travel_speed", "travelSpeed"]),
            price_range_min: raw(&["price_range_min", "priceRangeMin"]),
            price_range_max: raw(&["price_range_max", "priceRangeMax"]),
            warranty_months: raw(&["warranty_months", "warrantyMonths", "warranty"]),
            availability: raw(&["availability"]),
            overall_score: raw(&["overall_score", "overallScore"]),
            capacity_range_label: raw(&["capacity_range_label", "capacityRangeLabel", "capacity_range", "capacityRange"]),
            document_url: text(&["document_url", "documentUrl"]),
        }
    }
}

fn coerce(value: &Value) -> Option<RawValue> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(RawValue::Text(s.to_string()))
            }
        }
        Value::Number(n) => n.as_f64().map(RawValue::Number),
        _ => None,
    }
}
