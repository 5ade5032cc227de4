//! Display helpers for prices and percentages.

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use auction_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let rendered = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::with_capacity(rendered.len() + rendered.len() / 3 + 1);
    // "-0" and "-0.00" print without a sign.
    if value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole-dollar price with thousands separators: `1234` → `"$1,234"`.
pub fn format_price(price: u64) -> String {
    format!("${}", group_thousands(&price.to_string()))
}

/// Whole-dollar rendering of a fractional amount (averages, sums of means).
///
/// ```
/// use auction_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "$1,235");
/// assert_eq!(format_currency(0.0), "$0");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${}", format_number(-amount, 0))
    } else {
        format!("${}", format_number(amount, 0))
    }
}

/// Percentage with an explicit sign and one decimal: `12.34` → `"+12.3%"`.
pub fn format_signed_percent(value: f64) -> String {
    if value < 0.0 {
        format!("-{:.1}%", -value)
    } else {
        format!("+{:.1}%", value)
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero.
///
/// ```
/// use auction_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(1.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimal_places as i32);
    ((part / whole) * 100.0 * factor).round() / factor
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
