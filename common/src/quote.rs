//! Quote recalculation
//!
//! Volumes are free text with a unit suffix (`1.53m³`). Parsing is tolerant:
//! anything without a leading number contributes zero. The hour estimate
//! absorbs f64 noise below [`HOUR_TOLERANCE`], so 0.1 + 0.7 + 0.8 is two hours.
//!
//! estimated_hours = max(2, ceil(total_volume / 0.8))
//! total_price     = estimated_hours * hourly_rate

use crate::model::{DetectedItem, Quote};
use regex::Regex;

/// Lower bound on billed hours
pub const MIN_HOURS: u32 = 2;

/// Cubic metres moved per hour
pub const M3_PER_HOUR: f64 = 0.8;

/// Fraction of an hour treated as float rounding error
pub const HOUR_TOLERANCE: f64 = 1e-9;

/// Pricing inputs fixed for the lifetime of a draft
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteParams {
    pub hourly_rate: u32,
    pub insurance_note: String,
}

impl Default for QuoteParams {
    fn default() -> Self {
        Self {
            hourly_rate: 45,
            insurance_note: "Basic coverage included".into(),
        }
    }
}

lazy_static::lazy_static! {
    // Leading number, like parseFloat
    static ref LEADING_NUMBER_RE: Regex = Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+))").unwrap();
    // 200x90x85cm / 2 x 0.9 x 0.85 m
    static ref DIMENSIONS_RE: Regex = Regex::new(
        r"^\s*(\d+\.?\d*)\s*[x×]\s*(\d+\.?\d*)\s*[x×]\s*(\d+\.?\d*)\s*(mm|cm|m)?\s*$"
    ).unwrap();
}

/// Parse a free-text volume in cubic metres. Non-numeric or negative text yields 0.
pub fn parse_volume(text: &str) -> f64 {
    LEADING_NUMBER_RE
        .captures(text)
        .and_then(|cap| cap[1].parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

/// Sum of all item volumes in cubic metres
pub fn total_volume(items: &[DetectedItem]) -> f64 {
    items.iter().map(|item| parse_volume(&item.volume)).fold(0.0, |acc, v| acc + v)
}

/// Hours needed for a total volume in cubic metres
pub fn estimate_hours(total_volume: f64) -> u32 {
    if total_volume.is_nan() || total_volume <= 0.0 {
        return MIN_HOURS;
    }
    let hours = (total_volume / M3_PER_HOUR - HOUR_TOLERANCE).ceil();
    // float-to-int casts saturate, infinity included
    (hours as u32).max(MIN_HOURS)
}

/// Build a fresh quote from the current item list
pub fn recalculate_quote(items: &[DetectedItem], params: &QuoteParams) -> Quote {
    let volume = total_volume(items);
    let estimated_hours = estimate_hours(volume);

    Quote {
        total_volume: volume,
        estimated_hours,
        hourly_rate: params.hourly_rate,
        total_price: estimated_hours.saturating_mul(params.hourly_rate),
        insurance_note: params.insurance_note.clone(),
    }
}

/// Derive a volume label from a `WxDxH<unit>` dimensions string.
///
/// `200x90x85cm` → `1.53m³`. Returns None when the text is not three numbers.
/// A missing unit is read as centimetres.
pub fn volume_from_dimensions(dimensions: &str) -> Option<String> {
    let cap = DIMENSIONS_RE.captures(dimensions)?;
    let mut sides = [0.0f64; 3];
    for (i, side) in sides.iter_mut().enumerate() {
        *side = cap[i + 1].parse().ok()?;
    }

    let to_metres = match cap.get(4).map(|m| m.as_str()) {
        Some("mm") => 0.001,
        Some("m") => 1.0,
        _ => 0.01,
    };

    let cubic: f64 = sides.iter().map(|s| s * to_metres).product();
    Some(format!("{:.2}m³", cubic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, volume: &str) -> DetectedItem {
        DetectedItem {
            id,
            name: format!("item{}", id),
            volume: volume.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_volume_with_suffix() {
        assert_eq!(parse_volume("1.53m³"), 1.53);
        assert_eq!(parse_volume(" 0.32 m3"), 0.32);
        assert_eq!(parse_volume(".5"), 0.5);
        assert_eq!(parse_volume("2"), 2.0);
    }

    #[test]
    fn test_parse_volume_tolerant() {
        assert_eq!(parse_volume(""), 0.0);
        assert_eq!(parse_volume("big"), 0.0);
        assert_eq!(parse_volume("m³ 1.2"), 0.0);
        assert_eq!(parse_volume("-1.0m³"), 0.0);
    }

    #[test]
    fn test_reference_quote() {
        let items = vec![item(1, "1.53m³"), item(2, "0.32m³"), item(3, "0.43m³")];
        let quote = recalculate_quote(&items, &QuoteParams::default());

        assert!((quote.total_volume - 2.28).abs() < 1e-9);
        assert_eq!(quote.estimated_hours, 3);
        assert_eq!(quote.hourly_rate, 45);
        assert_eq!(quote.total_price, 135);
        assert_eq!(quote.insurance_note, "Basic coverage included");
    }

    #[test]
    fn test_empty_items_bill_minimum() {
        let quote = recalculate_quote(&[], &QuoteParams::default());
        assert_eq!(quote.total_volume, 0.0);
        assert_eq!(quote.volume_label(), "0.00m³");
        assert_eq!(quote.estimated_hours, 2);
        assert_eq!(quote.total_price, 90);
    }

    #[test]
    fn test_non_numeric_items_count_zero() {
        let items = vec![item(1, "unknown"), item(2, "3.3m³")];
        let quote = recalculate_quote(&items, &QuoteParams::default());
        assert_eq!(quote.total_volume, 3.3);
        // 3.3 / 0.8 = 4.125
        assert_eq!(quote.estimated_hours, 5);
    }

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        // 0.1 + 0.7 + 0.8 is 1.6000000000000003 in f64
        let items = vec![item(1, "0.1"), item(2, "0.7"), item(3, "0.8")];
        assert_eq!(recalculate_quote(&items, &QuoteParams::default()).estimated_hours, 2);

        let items = vec![item(1, "2.4m³")];
        assert_eq!(recalculate_quote(&items, &QuoteParams::default()).estimated_hours, 3);
    }

    /// Precision finer than a litre still rounds up
    #[test]
    fn test_fine_volume_rounds_up() {
        let items = vec![item(1, "1.6004m³")];
        assert_eq!(recalculate_quote(&items, &QuoteParams::default()).estimated_hours, 3);

        let items = vec![item(1, "0.8001m³"), item(2, "0.8m³")];
        assert_eq!(recalculate_quote(&items, &QuoteParams::default()).estimated_hours, 3);
    }

    /// Absurd volumes cap the quote instead of overflowing
    #[test]
    fn test_huge_volumes_saturate() {
        let items = vec![
            item(1, "99999999999999999999999m³"),
            item(2, "99999999999999999999999m³"),
        ];
        let quote = recalculate_quote(&items, &QuoteParams::default());
        assert_eq!(quote.estimated_hours, u32::MAX);
        assert_eq!(quote.total_price, u32::MAX);

        let digits = "9".repeat(308);
        let items = vec![item(1, &digits), item(2, &digits)];
        assert_eq!(recalculate_quote(&items, &QuoteParams::default()).estimated_hours, u32::MAX);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let items = vec![item(1, "1.22m³"), item(2, "1.44m³"), item(3, "1.53m³")];
        let params = QuoteParams {
            hourly_rate: 65,
            insurance_note: "Includes basic insurance coverage".into(),
        };
        let first = recalculate_quote(&items, &params);
        let second = recalculate_quote(&items, &params);
        assert_eq!(first, second);
        assert_eq!(first.estimated_hours, 6);
        assert_eq!(first.total_price, 390);
    }

    #[test]
    fn test_estimate_hours_lower_bound() {
        for volume in [0.0, 0.01, 0.8, 1.6, -3.0, f64::NAN] {
            assert!(estimate_hours(volume) >= MIN_HOURS, "volume {}", volume);
        }
        assert_eq!(estimate_hours(1.61), 3);
        assert_eq!(estimate_hours(f64::INFINITY), u32::MAX);
    }

    #[test]
    fn test_volume_from_dimensions() {
        assert_eq!(volume_from_dimensions("200x90x85cm").as_deref(), Some("1.53m³"));
        assert_eq!(volume_from_dimensions("120x60x45cm").as_deref(), Some("0.32m³"));
        assert_eq!(volume_from_dimensions("80 x 30 x 180").as_deref(), Some("0.43m³"));
        assert_eq!(volume_from_dimensions("2x1x0.5m").as_deref(), Some("1.00m³"));
        assert_eq!(volume_from_dimensions("600x400x300mm").as_deref(), Some("0.07m³"));
        assert_eq!(volume_from_dimensions("large"), None);
        assert_eq!(volume_from_dimensions("200x90"), None);
    }
}
