//! Dimension Extractor
//!
//! Recovers physical width/length from free-text product identifiers
//! (reference codes or names) when not explicitly stored. Best-effort
//! heuristic over uncontrolled text: false negatives are fine (the caller
//! falls back to stored values), false positives on the compact form are
//! mitigated by a whitelist of standard roll lengths.

use regex::Regex;
use std::sync::LazyLock;

/// Explicit separator form: "1,22x50", "152X50"
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*[xX]\s*(\d+)").unwrap());

/// Combined 5-digit form: a 3-digit width run immediately followed by a
/// 2-digit standard length, not embedded in a longer digit run. The length
/// whitelist keeps unrelated 5-digit codes ("03529") from parsing as
/// dimensions.
static COMBINED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])(\d{3})(50|25|10|05|30)(?:[^0-9]|$)").unwrap());

/// Extracted roll dimensions, in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width_m: f64,
    pub length_m: f64,
}

/// Try to extract width/length from an arbitrary identifier string.
///
/// Attempts, in order, first match wins:
/// 1. Explicit separator form: `<number>x<int>`. A width value >= 10 is
///    centimeters ("152" -> 1.52 m); below 10 it is already meters
///    ("1.22" -> 1.22 m). The length is taken as-is, in meters.
/// 2. Combined 5-digit form: 3-digit width / 100, whitelisted 2-digit
///    length.
pub fn extract_dimensions(text: &str) -> Option<Dimensions> {
    if let Some(caps) = SEPARATOR_RE.captures(text) {
        let raw_width: f64 = caps[1].replace(',', ".").parse().ok()?;
        let length_m: f64 = caps[2].parse().ok()?;
        let width_m = if raw_width >= 10.0 {
            raw_width / 100.0
        } else {
            raw_width
        };
        return Some(Dimensions { width_m, length_m });
    }

    if let Some(caps) = COMBINED_RE.captures(text) {
        let width_m: f64 = caps[1].parse::<f64>().ok()? / 100.0;
        let length_m: f64 = caps[2].parse().ok()?;
        return Some(Dimensions { width_m, length_m });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_form_comma_decimal() {
        let dims = extract_dimensions("1,22x50").unwrap();
        assert_eq!(dims.width_m, 1.22);
        assert_eq!(dims.length_m, 50.0);
    }

    #[test]
    fn test_separator_form_centimeters() {
        let dims = extract_dimensions("152X50").unwrap();
        assert_eq!(dims.width_m, 1.52);
        assert_eq!(dims.length_m, 50.0);
    }

    #[test]
    fn test_separator_form_dot_decimal() {
        let dims = extract_dimensions("Vinilo brillo 1.37x25m").unwrap();
        assert_eq!(dims.width_m, 1.37);
        assert_eq!(dims.length_m, 25.0);
    }

    #[test]
    fn test_combined_form() {
        let dims = extract_dimensions("12250").unwrap();
        assert_eq!(dims.width_m, 1.22);
        assert_eq!(dims.length_m, 50.0);
    }

    #[test]
    fn test_combined_form_inside_reference() {
        let dims = extract_dimensions("VIN-15205-G").unwrap();
        assert_eq!(dims.width_m, 1.52);
        assert_eq!(dims.length_m, 5.0);
    }

    #[test]
    fn test_combined_form_after_letters() {
        // only a longer digit run disqualifies, letters do not
        let dims = extract_dimensions("REF12250").unwrap();
        assert_eq!(dims.width_m, 1.22);
        assert_eq!(dims.length_m, 50.0);
    }

    #[test]
    fn test_combined_form_rejects_non_whitelisted_length() {
        // "29" is not a standard roll length
        assert_eq!(extract_dimensions("03529"), None);
    }

    #[test]
    fn test_combined_form_rejects_longer_digit_runs() {
        // embedded in a 6-digit run, not a bounded token
        assert_eq!(extract_dimensions("122505"), None);
    }

    #[test]
    fn test_separator_tried_before_combined() {
        // "106x30" must parse as 1.06 x 30, not fall through to the
        // compact form
        let dims = extract_dimensions("106x30").unwrap();
        assert_eq!(dims.width_m, 1.06);
        assert_eq!(dims.length_m, 30.0);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_dimensions("Tinta ecosolvente cian"), None);
        assert_eq!(extract_dimensions(""), None);
    }
}
