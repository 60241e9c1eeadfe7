//! Merge policy: find-or-create with field-level precedence.
//!
//! Two entry points with deliberately different duplicate behavior:
//!
//! - `upsert` (brochure ingestion, bulk import): resolves loosely and
//!   silently updates a match. Never rejects duplicates.
//! - `create_guarded` (manual creation): rejects an exact
//!   (brand, model_name) duplicate before handing off to the same merge
//!   policy. Manual entry must not silently duplicate; ingestion may
//!   silently update.
//!
//! The critical asymmetry between the two merge arms: creation fills
//! missing fields with fixed constants; update passes the existing record
//! value as each normalizer's default, so missing or unparseable incoming
//! fields preserve prior state.

use tracing::debug;

use crate::error::CatalogError;
use crate::models::{defaults, CatalogRecord, RawFields};
use crate::normalize::{
    bucket_capacity, extract_warranty_months, normalize_power_type, normalize_tier,
    parse_decimal_field, parse_decimal_string_field, parse_integer_field, parse_text_field,
};
use crate::repository::{CatalogRepository, CatalogTable};
use crate::resolve::resolve;

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub record: CatalogRecord,
    /// True when no existing record matched and a new one was created.
    pub created: bool,
}

/// Find-or-create a catalog record from an incoming field bag.
///
/// Resolution and write happen inside one critical section, so concurrent
/// upserts against the same pair serialize instead of racing.
pub async fn upsert(
    catalog: &CatalogRepository,
    fields: &RawFields,
) -> Result<UpsertOutcome, CatalogError> {
    let (brand, model_name) = require_pair(fields)?;
    Ok(catalog
        .update_atomically(|table| upsert_in(table, &brand, &model_name, fields))
        .await)
}

/// Manual creation: reject an exact case-insensitive duplicate pair, then
/// run the ordinary merge policy.
pub async fn create_guarded(
    catalog: &CatalogRepository,
    fields: &RawFields,
) -> Result<UpsertOutcome, CatalogError> {
    let (brand, model_name) = require_pair(fields)?;
    catalog
        .update_atomically(|table| {
            if table
                .all()
                .iter()
                .any(|r| r.same_pair(&brand, &model_name))
            {
                return Err(CatalogError::validation(format!(
                    "{} {} already exists",
                    brand, model_name
                )));
            }
            Ok(upsert_in(table, &brand, &model_name, fields))
        })
        .await
}

/// Partial update of a specific record by id.
///
/// Field precedence is identical to the upsert update arm; brand and
/// model name are rewritten only when supplied.
pub async fn apply_update(
    catalog: &CatalogRepository,
    id: i64,
    fields: &RawFields,
) -> Result<CatalogRecord, CatalogError> {
    catalog
        .update_atomically(|table| {
            let existing = table
                .get(id)
                .cloned()
                .ok_or_else(|| CatalogError::record_not_found(id))?;
            let updated = merge_into(&existing, fields);
            table.put(updated.clone());
            Ok(updated)
        })
        .await
}

fn require_pair(fields: &RawFields) -> Result<(String, String), CatalogError> {
    let brand = fields
        .brand
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CatalogError::validation("brand is required"))?;
    let model_name = fields
        .model_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CatalogError::validation("model name is required"))?;
    Ok((brand.to_string(), model_name.to_string()))
}

fn upsert_in(
    table: &mut CatalogTable,
    brand: &str,
    model_name: &str,
    fields: &RawFields,
) -> UpsertOutcome {
    let records = table.all();
    match resolve(brand, model_name, &records) {
        Some(existing) => {
            debug!(
                id = existing.id,
                brand, model_name, "merge resolved to existing record"
            );
            let updated = merge_into(existing, fields);
            table.put(updated.clone());
            UpsertOutcome {
                record: updated,
                created: false,
            }
        }
        None => {
            let id = table.allocate_id();
            debug!(id, brand, model_name, "merge created new record");
            let record = build_record(id, brand, model_name, fields);
            table.put(record.clone());
            UpsertOutcome {
                record,
                created: true,
            }
        }
    }
}

/// Creation arm: every missing or unparseable field takes its fixed
/// creation default.
fn build_record(id: i64, brand: &str, model_name: &str, fields: &RawFields) -> CatalogRecord {
    let load_capacity_kg =
        parse_integer_field(fields.load_capacity_kg.as_ref(), defaults::LOAD_CAPACITY_KG);
    // An explicitly supplied label wins over the derived bucket.
    let capacity_range_label = parse_text_field(
        fields.capacity_range_label.as_ref(),
        bucket_capacity(load_capacity_kg),
    );

    CatalogRecord {
        id,
        brand: brand.to_string(),
        model_name: model_name.to_string(),
        tier: normalize_tier(fields.tier.as_ref(), defaults::TIER),
        load_capacity_kg,
        lift_height_cm: parse_integer_field(
            fields.lift_height_cm.as_ref(),
            defaults::LIFT_HEIGHT_CM,
        ),
        power_type: normalize_power_type(fields.power_type.as_ref(), defaults::POWER_TYPE),
        operating_weight_kg: parse_integer_field(
            fields.operating_weight_kg.as_ref(),
            defaults::OPERATING_WEIGHT_KG,
        ),
        turn_radius_cm: parse_decimal_field(
            fields.turn_radius_cm.as_ref(),
            defaults::TURN_RADIUS_CM,
        ),
        travel_speed_kmh: parse_decimal_string_field(
            fields.travel_speed_kmh.as_ref(),
            defaults::TRAVEL_SPEED_KMH,
        ),
        price_range_min: parse_integer_field(
            fields.price_range_min.as_ref(),
            defaults::PRICE_RANGE_MIN,
        ),
        price_range_max: parse_integer_field(
            fields.price_range_max.as_ref(),
            defaults::PRICE_RANGE_MAX,
        ),
        warranty_months: extract_warranty_months(fields.warranty_months.as_ref()),
        availability: parse_text_field(fields.availability.as_ref(), defaults::AVAILABILITY),
        overall_score: parse_decimal_string_field(
            fields.overall_score.as_ref(),
            defaults::OVERALL_SCORE,
        ),
        capacity_range_label,
        document_url: fields.document_url.clone(),
    }
}

/// Update arm: the existing value doubles as every normalizer's default,
/// so only usable incoming values overwrite.
fn merge_into(existing: &CatalogRecord, fields: &RawFields) -> CatalogRecord {
    // The label is a field like any other on the update arm: it changes
    // only when supplied. A capacity change alone leaves the stored label
    // stale rather than recomputing it, keeping omitted fields untouched.
    let capacity_range_label = parse_text_field(
        fields.capacity_range_label.as_ref(),
        &existing.capacity_range_label,
    );

    CatalogRecord {
        id: existing.id,
        brand: fields
            .brand
            .clone()
            .unwrap_or_else(|| existing.brand.clone()),
        model_name: fields
            .model_name
            .clone()
            .unwrap_or_else(|| existing.model_name.clone()),
        tier: normalize_tier(fields.tier.as_ref(), existing.tier),
        load_capacity_kg: parse_integer_field(
            fields.load_capacity_kg.as_ref(),
            existing.load_capacity_kg,
        ),
        lift_height_cm: parse_integer_field(
            fields.lift_height_cm.as_ref(),
            existing.lift_height_cm,
        ),
        power_type: normalize_power_type(fields.power_type.as_ref(), &existing.power_type),
        operating_weight_kg: parse_integer_field(
            fields.operating_weight_kg.as_ref(),
            existing.operating_weight_kg,
        ),
        turn_radius_cm: parse_decimal_field(
            fields.turn_radius_cm.as_ref(),
            existing.turn_radius_cm,
        ),
        travel_speed_kmh: parse_decimal_string_field(
            fields.travel_speed_kmh.as_ref(),
            &existing.travel_speed_kmh,
        ),
        price_range_min: parse_integer_field(
            fields.price_range_min.as_ref(),
            existing.price_range_min,
        ),
        price_range_max: parse_integer_field(
            fields.price_range_max.as_ref(),
            existing.price_range_max,
        ),
        warranty_months: parse_integer_field(
            fields.warranty_months.as_ref(),
            existing.warranty_months,
        ),
        availability: parse_text_field(fields.availability.as_ref(), &existing.availability),
        overall_score: parse_decimal_string_field(
            fields.overall_score.as_ref(),
            &existing.overall_score,
        ),
        capacity_range_label,
        document_url: fields
            .document_url
            .clone()
            .or_else(|| existing.document_url.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawValue, Tier};
    use serde_json::json;

    fn bag(value: serde_json::Value) -> RawFields {
        RawFields::from_value(&value)
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let catalog = CatalogRepository::new();
        let outcome = upsert(&catalog, &bag(json!({"brand": "Acme", "model_name": "Z1"})))
            .await
            .unwrap();
        assert!(outcome.created);
        let record = outcome.record;
        assert_eq!(record.tier, Tier::Mid);
        assert_eq!(record.load_capacity_kg, 2500);
        assert_eq!(record.capacity_range_label, "2000-2500 kg");
        assert_eq!(record.power_type, "LPG/Diesel");
        assert_eq!(record.warranty_months, 12);
    }

    #[tokio::test]
    async fn test_create_explicit_label_wins() {
        let catalog = CatalogRepository::new();
        let outcome = upsert(
            &catalog,
            &bag(json!({
                "brand": "Acme",
                "model_name": "Z1",
                "load_capacity_kg": 3200,
                "capacity_range_label": "3-3.5 tonne class",
            })),
        )
        .await
        .unwrap();
        assert_eq!(outcome.record.capacity_range_label, "3-3.5 tonne class");
    }

    #[tokio::test]
    async fn test_update_preserves_missing_fields() {
        let catalog = CatalogRepository::new();
        upsert(
            &catalog,
            &bag(json!({
                "brand": "Toyota",
                "model_name": "8 Series",
                "load_capacity_kg": 2500,
                "warranty_months": 36,
                "availability": "8-10 weeks",
            })),
        )
        .await
        .unwrap();

        let outcome = upsert(
            &catalog,
            &bag(json!({
                "brand": "Toyota",
                "model_name": "8 Series",
                "load_capacity_kg": 3000,
            })),
        )
        .await
        .unwrap();

        assert!(!outcome.created);
        assert_eq!(catalog.len().await, 1);
        let record = outcome.record;
        assert_eq!(record.load_capacity_kg, 3000);
        // The label is only rewritten when supplied; a capacity change
        // alone leaves it stale.
        assert_eq!(record.capacity_range_label, "2000-2500 kg");
        assert_eq!(record.warranty_months, 36);
        assert_eq!(record.availability, "8-10 weeks");
    }

    #[tokio::test]
    async fn test_update_unparseable_numeric_preserves_existing() {
        let catalog = CatalogRepository::new();
        upsert(
            &catalog,
            &bag(json!({
                "brand": "Toyota",
                "model_name": "8FG25",
                "load_capacity_kg": 2500,
            })),
        )
        .await
        .unwrap();

        let mut fields = bag(json!({"brand": "Toyota", "model_name": "8FG25"}));
        fields.load_capacity_kg = Some(RawValue::Text("call for specs".to_string()));
        let outcome = upsert(&catalog, &fields).await.unwrap();
        assert_eq!(outcome.record.load_capacity_kg, 2500);
        assert_eq!(outcome.record.capacity_range_label, "2000-2500 kg");
    }

    #[tokio::test]
    async fn test_guarded_create_rejects_case_varied_duplicate() {
        let catalog = CatalogRepository::new();
        create_guarded(&catalog, &bag(json!({"brand": "Acme", "model_name": "Z1"})))
            .await
            .unwrap();
        let err = create_guarded(&catalog, &bag(json!({"brand": "acme", "model_name": "z1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_upsert_requires_brand_and_model() {
        let catalog = CatalogRepository::new();
        let err = upsert(&catalog, &bag(json!({"model_name": "Z1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        let err = upsert(&catalog, &bag(json!({"brand": "Acme"})))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(catalog.len().await, 0);
    }

    #[tokio::test]
    async fn test_apply_update_missing_id() {
        let catalog = CatalogRepository::new();
        let err = apply_update(&catalog, 5, &bag(json!({"availability": "Sold out"})))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { id: 5, .. }));
    }

    #[tokio::test]
    async fn test_apply_update_partial_fields() {
        let catalog = CatalogRepository::new();
        let created = upsert(
            &catalog,
            &bag(json!({"brand": "Crown", "model_name": "FC 5200", "tier": "premium"})),
        )
        .await
        .unwrap();

        let updated = apply_update(
            &catalog,
            created.record.id,
            &bag(json!({"availability": "Sold out"})),
        )
        .await
        .unwrap();
        assert_eq!(updated.availability, "Sold out");
        assert_eq!(updated.tier, Tier::Premium);
        assert_eq!(updated.brand, "Crown");
    }

    #[tokio::test]
    async fn test_upsert_idempotent() {
        let catalog = CatalogRepository::new();
        let fields = bag(json!({
            "brand": "Linde",
            "model_name": "H25",
            "tier": "premium",
            "load_capacity_kg": 2500,
            "lift_height_cm": 450,
            "power_type": "Diesel",
            "operating_weight_kg": 4200,
            "turn_radius_cm": 230,
            "travel_speed_kmh": "21",
            "price_range_min": 32000,
            "price_range_max": 41000,
            "warranty_months": 24,
            "availability": "In stock",
            "overall_score": "8.8",
        }));
        let first = upsert(&catalog, &fields).await.unwrap();
        let second = upsert(&catalog, &fields).await.unwrap();
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(catalog.len().await, 1);
        let a = serde_json::to_value(&first.record).unwrap();
        let b = serde_json::to_value(&second.record).unwrap();
        assert_eq!(a, b);
    }
}
