//! Entity resolution for catalog records.
//!
//! Matching is deliberately loose and lives here, in one named place,
//! rather than as ad hoc string checks at call sites. Brand must match
//! exactly (case-insensitive); model names match by substring containment
//! in either direction, so "8FG Series" matches both "8FG" and
//! "8FG Series 25". Coarse series-level grouping (trailing digits
//! stripped) is a separate check used only when associating documents
//! with records, never by direct resolution.

use crate::models::CatalogRecord;

/// Find the existing catalog record a (brand, model) pair refers to.
///
/// Brand equality is mandatory; cross-brand matches never happen. Among
/// same-brand records the first (in table order) whose model name
/// contains, or is contained by, the candidate wins. Two distinct models
/// sharing a short common substring can therefore collide; callers that
/// need exact identity must compare pairs themselves.
pub fn resolve<'a>(
    brand: &str,
    model_name: &str,
    records: &'a [CatalogRecord],
) -> Option<&'a CatalogRecord> {
    records.iter().find(|record| {
        record.brand.eq_ignore_ascii_case(brand)
            && models_overlap(&record.model_name, model_name)
    })
}

/// Substring containment in either direction, case-insensitive.
pub fn models_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// The series prefix of a model name: everything before the first ASCII
/// digit, trimmed. "NXP25" -> "NXP", "8FG25" -> "".
pub fn series_prefix(model_name: &str) -> &str {
    let end = model_name
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(model_name.len());
    model_name[..end].trim()
}

/// Whether two model names belong to the same series.
///
/// Both prefixes must be at least 2 characters; short or empty prefixes
/// never group ("8FG25" has an empty prefix and joins no series).
pub fn same_series(a: &str, b: &str) -> bool {
    let pa = series_prefix(a);
    let pb = series_prefix(b);
    pa.len() >= 2 && pb.len() >= 2 && pa.eq_ignore_ascii_case(pb)
}

/// The fuzzy document-to-record relation: substring containment either
/// direction, or a shared series prefix. Recomputed on demand, never
/// stored, so edits to either side can silently change it.
pub fn is_associated(record_model: &str, document_model: &str) -> bool {
    models_overlap(record_model, document_model) || same_series(record_model, document_model)
}
