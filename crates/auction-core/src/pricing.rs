//! Parsing of currency-formatted price and estimate strings.
//!
//! Accepted shapes are `"$1,234"`, `"1234"`, and for estimates a pair joined
//! by a hyphen such as `"$800 - $1,200"`. Currency symbols, thousands
//! separators and whitespace are stripped before the digits are parsed.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// An estimate range after parsing. `low == high` for single-value estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub low: u64,
    pub high: u64,
}

impl Estimate {
    /// Arithmetic mean of the bounds.
    pub fn average(&self) -> f64 {
        (self.low as f64 + self.high as f64) / 2.0
    }

    /// `true` when the source supplied a range rather than a single value.
    pub fn is_range(&self) -> bool {
        self.low != self.high
    }
}

/// Characters removed before parsing: `$`, `,` and any whitespace.
fn formatting_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$,\s]").expect("regex is valid"))
}

fn strip_formatting(raw: &str) -> String {
    formatting_chars().replace_all(raw, "").into_owned()
}

/// Parse an already-stripped token into an integer.
fn parse_digits(token: &str, original: &str) -> Result<u64> {
    if token.is_empty() {
        return Err(DashboardError::price(original, "no digits"));
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DashboardError::price(original, "not purely numeric"));
    }
    token
        .parse::<u64>()
        .map_err(|e| DashboardError::price(original, e.to_string()))
}

/// Parse a single sold-price string such as `"$1,234"` into `1234`.
///
/// ```
/// use auction_core::pricing::parse_price;
///
/// assert_eq!(parse_price("$1,234").unwrap(), 1234);
/// assert!(parse_price("$12 - $15").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<u64> {
    parse_digits(&strip_formatting(raw), raw)
}

/// Parse an estimate string: either a single value or two values joined by
/// a hyphen. The split happens once, on the first hyphen; a second hyphen
/// leaves a non-numeric token and fails.
///
/// Reversed ranges are normalized so that `low <= high`.
pub fn parse_estimate(raw: &str) -> Result<Estimate> {
    let stripped = strip_formatting(raw);

    match stripped.split_once('-') {
        Some((left, right)) => {
            let a = parse_digits(left, raw)?;
            let b = parse_digits(right, raw)?;
            if a > b {
                tracing::debug!(raw, "estimate bounds reversed; swapping");
            }
            Ok(Estimate {
                low: a.min(b),
                high: a.max(b),
            })
        }
        None => {
            let value = parse_digits(&stripped, raw)?;
            Ok(Estimate {
                low: value,
                high: value,
            })
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_price ──────────────────────────────────────────────────────────

    #[test]
    fn test_price_with_symbol_and_separator() {
        assert_eq!(parse_price("$1,234").unwrap(), 1234);
        assert_eq!(parse_price("$1,234,567").unwrap(), 1_234_567);
    }

    #[test]
    fn test_price_plain_digits() {
        assert_eq!(parse_price("50").unwrap(), 50);
        assert_eq!(parse_price("0").unwrap(), 0);
    }

    #[test]
    fn test_price_surrounding_whitespace() {
        assert_eq!(parse_price("  $2,500 ").unwrap(), 2500);
    }

    #[test]
    fn test_price_rejects_letters() {
        let err = parse_price("$12k").unwrap_err();
        assert!(matches!(err, DashboardError::PriceParse { .. }));
        assert!(err.to_string().contains("$12k"));
    }

    #[test]
    fn test_price_rejects_empty() {
        assert!(parse_price("").is_err());
        assert!(parse_price("$").is_err());
    }

    #[test]
    fn test_price_rejects_range() {
        assert!(parse_price("$100 - $200").is_err());
    }

    #[test]
    fn test_price_rejects_decimal_point() {
        assert!(parse_price("$12.50").is_err());
    }

    #[test]
    fn test_price_rejects_overflow() {
        assert!(parse_price("99999999999999999999999").is_err());
    }

    // ── parse_estimate ───────────────────────────────────────────────────────

    #[test]
    fn test_estimate_range() {
        let est = parse_estimate("$800 - $1,200").unwrap();
        assert_eq!(est, Estimate { low: 800, high: 1200 });
        assert!((est.average() - 1000.0).abs() < f64::EPSILON);
        assert!(est.is_range());
    }

    #[test]
    fn test_estimate_range_without_spaces() {
        let est = parse_estimate("$2,000-$3,000").unwrap();
        assert_eq!(est, Estimate { low: 2000, high: 3000 });
    }

    #[test]
    fn test_estimate_single_value() {
        let est = parse_estimate("$50").unwrap();
        assert_eq!(est, Estimate { low: 50, high: 50 });
        assert!((est.average() - 50.0).abs() < f64::EPSILON);
        assert!(!est.is_range());
    }

    #[test]
    fn test_estimate_odd_average_is_fractional() {
        let est = parse_estimate("$1 - $2").unwrap();
        assert!((est.average() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_reversed_bounds_are_swapped() {
        let est = parse_estimate("$900 - $500").unwrap();
        assert_eq!(est, Estimate { low: 500, high: 900 });
    }

    #[test]
    fn test_estimate_three_tokens_fail() {
        assert!(parse_estimate("$1 - $2 - $3").is_err());
    }

    #[test]
    fn test_estimate_missing_side_fails() {
        assert!(parse_estimate("$500 -").is_err());
        assert!(parse_estimate("- $500").is_err());
    }

    #[test]
    fn test_estimate_non_numeric_fails() {
        assert!(parse_estimate("Refer to department").is_err());
        assert!(parse_estimate("$abc - $def").is_err());
    }
}
