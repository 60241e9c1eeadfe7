//! Field normalizers for incoming specification data.
//!
//! Every normalizer is total: it accepts a value of unknown shape (text,
//! number, or absent) and returns a canonical value, never an error.
//! Unparseable input degrades to the supplied default. The creation path
//! passes fixed constants as defaults; the update path passes the existing
//! record value, which is what makes missing fields preserve prior state.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{RawValue, Tier};

/// First run of ASCII digits in a string.
static INT_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// First decimal-or-integer numeric token in a string.
static DECIMAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Classify a tier value.
///
/// Uppercases the input and tests substrings in a fixed order: ENTRY/ENT,
/// then MID, then PREMIUM/PREM, then SUPER/HEAVY. First match wins, so a
/// string containing several tier keywords resolves deterministically but
/// not necessarily intuitively ("MID-PREMIUM transition" classifies as
/// MID). Unmatched text classifies as MID; `absent` applies only when no
/// value was supplied at all.
pub fn normalize_tier(raw: Option<&RawValue>, absent: Tier) -> Tier {
    let text = match raw {
        None => return absent,
        Some(RawValue::Text(s)) => s.to_uppercase(),
        Some(RawValue::Number(n)) => format_number(*n).to_uppercase(),
    };

    if text.contains("ENTRY") || text.contains("ENT") {
        Tier::Entry
    } else if text.contains("MID") {
        Tier::Mid
    } else if text.contains("PREMIUM") || text.contains("PREM") {
        Tier::Premium
    } else if text.contains("SUPER") || text.contains("HEAVY") {
        Tier::Superheavy
    } else {
        Tier::Mid
    }
}

/// Canonicalize a power-type value.
///
/// Whitespace is removed and commas become "/", so "LPG, Diesel" and
/// "LPG/Diesel" read the same. The vocabulary stays open.
pub fn normalize_power_type(raw: Option<&RawValue>, absent: &str) -> String {
    let text = match raw {
        None => return absent.to_string(),
        Some(RawValue::Text(s)) => s.clone(),
        Some(RawValue::Number(n)) => format_number(*n),
    };

    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '/' } else { c })
        .collect();
    if cleaned.is_empty() {
        absent.to_string()
    } else {
        cleaned
    }
}

/// Extract an integer from a loose value, if one is present.
///
/// Numbers pass through truncated toward zero; text yields its first run
/// of digits. Returns None when the value is absent or carries no digits.
pub fn try_integer(raw: Option<&RawValue>) -> Option<i64> {
    match raw? {
        RawValue::Number(n) => Some(*n as i64),
        RawValue::Text(s) => INT_TOKEN.find(s).and_then(|m| m.as_str().parse().ok()),
    }
}

/// Integer field with a default for absent or digit-free input.
///
/// "2500kg" parses to 2500; "about 3,000 kg" parses to 3 (the first digit
/// run wins — unit-aware parsing is deliberately out of scope).
pub fn parse_integer_field(raw: Option<&RawValue>, default: i64) -> i64 {
    try_integer(raw).unwrap_or(default)
}

/// Extract a decimal from a loose value, if one is present.
pub fn try_decimal(raw: Option<&RawValue>) -> Option<f64> {
    match raw? {
        RawValue::Number(n) => Some(*n),
        RawValue::Text(s) => DECIMAL_TOKEN.find(s).and_then(|m| m.as_str().parse().ok()),
    }
}

/// Decimal field with a default for absent or token-free input.
pub fn parse_decimal_field(raw: Option<&RawValue>, default: f64) -> f64 {
    try_decimal(raw).unwrap_or(default)
}

/// Decimal-string field: the canonical form is the textual token itself.
///
/// "18.5 km/h" yields "18.5"; numeric input is formatted minimally (no
/// trailing ".0").
pub fn parse_decimal_string_field(raw: Option<&RawValue>, default: &str) -> String {
    match raw {
        None => default.to_string(),
        Some(RawValue::Number(n)) => format_number(*n),
        Some(RawValue::Text(s)) => DECIMAL_TOKEN
            .find(s)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| default.to_string()),
    }
}

/// Warranty duration in months: first integer token, default 12.
pub fn extract_warranty_months(raw: Option<&RawValue>) -> i64 {
    parse_integer_field(raw, 12)
}

/// Free-text field with a default for absent or blank input.
pub fn parse_text_field(raw: Option<&RawValue>, default: &str) -> String {
    match raw {
        None => default.to_string(),
        Some(RawValue::Number(n)) => format_number(*n),
        Some(RawValue::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                default.to_string()
            } else {
                s.to_string()
            }
        }
    }
}

/// Derive the human-readable capacity-range label from a capacity in kg.
///
/// Fixed step function; each bucket is inclusive on its upper bound.
pub fn bucket_capacity(capacity_kg: i64) -> &'static str {
    if capacity_kg <= 2000 {
        "1500-2000 kg"
    } else if capacity_kg <= 2500 {
        "2000-2500 kg"
    } else if capacity_kg <= 3000 {
        "2500-3000 kg"
    } else if capacity_kg <= 3500 {
        "3000-3500 kg"
    } else {
        "3500+ kg"
    }
}

/// Minimal decimal formatting: integral values print without a fraction.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<RawValue> {
        Some(RawValue::Text(s.to_string()))
    }

    fn num(n: f64) -> Option<RawValue> {
        Some(RawValue::Number(n))
    }

    #[test]
    fn test_tier_keywords() {
        assert_eq!(normalize_tier(text("entry").as_ref(), Tier::Mid), Tier::Entry);
        assert_eq!(normalize_tier(text("ENT-100").as_ref(), Tier::Mid), Tier::Entry);
        assert_eq!(normalize_tier(text("mid-range").as_ref(), Tier::Mid), Tier::Mid);
        assert_eq!(
            normalize_tier(text("Premium").as_ref(), Tier::Mid),
            Tier::Premium
        );
        assert_eq!(normalize_tier(text("prem").as_ref(), Tier::Mid), Tier::Premium);
        assert_eq!(
            normalize_tier(text("super heavy duty").as_ref(), Tier::Mid),
            Tier::Superheavy
        );
        assert_eq!(
            normalize_tier(text("HEAVY").as_ref(), Tier::Mid),
            Tier::Superheavy
        );
    }

    #[test]
    fn test_tier_first_match_wins() {
        // Check order is ENTRY -> MID -> PREMIUM -> SUPERHEAVY; strings
        // carrying several keywords resolve by the earliest check.
        assert_eq!(
            normalize_tier(text("MID-PREMIUM transition model").as_ref(), Tier::Mid),
            Tier::Mid
        );
        assert_eq!(
            normalize_tier(text("premium heavy").as_ref(), Tier::Mid),
            Tier::Premium
        );
    }

    #[test]
    fn test_tier_total_over_arbitrary_input() {
        for s in ["", "xyz", "\u{0}\u{1}garbage", "123", "🙂"] {
            let tier = normalize_tier(text(s).as_ref(), Tier::Premium);
            assert!(matches!(
                tier,
                Tier::Entry | Tier::Mid | Tier::Premium | Tier::Superheavy
            ));
        }
        // Absent input takes the caller's absence default.
        assert_eq!(normalize_tier(None, Tier::Premium), Tier::Premium);
        // Unmatched text falls back to MID, not the absence default.
        assert_eq!(normalize_tier(text("xyz").as_ref(), Tier::Premium), Tier::Mid);
    }

    #[test]
    fn test_power_type() {
        assert_eq!(normalize_power_type(None, "LPG/Diesel"), "LPG/Diesel");
        assert_eq!(
            normalize_power_type(text("LPG, Diesel").as_ref(), "LPG/Diesel"),
            "LPG/Diesel"
        );
        assert_eq!(
            normalize_power_type(text(" Electric ").as_ref(), "LPG/Diesel"),
            "Electric"
        );
        assert_eq!(
            normalize_power_type(text("Diesel , Electric").as_ref(), "x"),
            "Diesel/Electric"
        );
    }

    #[test]
    fn test_parse_integer_field() {
        assert_eq!(parse_integer_field(num(2500.0).as_ref(), 0), 2500);
        assert_eq!(parse_integer_field(num(2500.9).as_ref(), 0), 2500);
        assert_eq!(parse_integer_field(text("2500kg").as_ref(), 0), 2500);
        assert_eq!(parse_integer_field(text("approx 3200 kg").as_ref(), 0), 3200);
        assert_eq!(parse_integer_field(text("no digits").as_ref(), 42), 42);
        assert_eq!(parse_integer_field(None, 42), 42);
    }

    #[test]
    fn test_parse_decimal_field() {
        assert_eq!(parse_decimal_field(text("223.5cm").as_ref(), 0.0), 223.5);
        assert_eq!(parse_decimal_field(text("190mm").as_ref(), 0.0), 190.0);
        assert_eq!(parse_decimal_field(None, 7.5), 7.5);
    }

    #[test]
    fn test_parse_decimal_string_field() {
        assert_eq!(
            parse_decimal_string_field(text("18.5 km/h").as_ref(), "0"),
            "18.5"
        );
        assert_eq!(parse_decimal_string_field(num(18.0).as_ref(), "0"), "18");
        assert_eq!(parse_decimal_string_field(num(8.4).as_ref(), "0"), "8.4");
        assert_eq!(parse_decimal_string_field(text("tbd").as_ref(), "18"), "18");
        assert_eq!(parse_decimal_string_field(None, "18"), "18");
    }

    #[test]
    fn test_extract_warranty_months() {
        assert_eq!(extract_warranty_months(text("12 months").as_ref()), 12);
        assert_eq!(extract_warranty_months(text("36-month").as_ref()), 36);
        assert_eq!(extract_warranty_months(None), 12);
        assert_eq!(extract_warranty_months(text("full coverage").as_ref()), 12);
    }

    #[test]
    fn test_parse_text_field() {
        assert_eq!(parse_text_field(text("  Low stock ").as_ref(), "x"), "Low stock");
        assert_eq!(parse_text_field(text("   ").as_ref(), "In stock"), "In stock");
        assert_eq!(parse_text_field(None, "In stock"), "In stock");
    }

    #[test]
    fn test_bucket_capacity_boundaries() {
        assert_eq!(bucket_capacity(1500), "1500-2000 kg");
        assert_eq!(bucket_capacity(2000), "1500-2000 kg");
        assert_eq!(bucket_capacity(2001), "2000-2500 kg");
        assert_eq!(bucket_capacity(2500), "2000-2500 kg");
        assert_eq!(bucket_capacity(3000), "2500-3000 kg");
        assert_eq!(bucket_capacity(3500), "3000-3500 kg");
        assert_eq!(bucket_capacity(3501), "3500+ kg");
        assert_eq!(bucket_capacity(99999), "3500+ kg");
    }

    #[test]
    fn test_bucket_capacity_covers_range() {
        let labels = [
            "1500-2000 kg",
            "2000-2500 kg",
            "2500-3000 kg",
            "3000-3500 kg",
            "3500+ kg",
        ];
        for capacity in (0..=1_000_000).step_by(97) {
            let label = bucket_capacity(capacity);
            assert_eq!(labels.iter().filter(|l| **l == label).count(), 1);
        }
    }
}
