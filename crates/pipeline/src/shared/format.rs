use contracts::shared::indicators::ValueFormat;

/// Formats an integer with thousands separators (dots)
///
/// # Examples
/// ```
/// use pipeline::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Short axis label in the local convention: `1,5tr`, `250k`, `2tỷ`.
/// Decimal separator is a comma, at most one decimal is kept.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let (scaled, suffix) = if abs >= 1e9 {
        (abs / 1e9, "tỷ")
    } else if abs >= 1e6 {
        (abs / 1e6, "tr")
    } else if abs >= 1e3 {
        (abs / 1e3, "k")
    } else {
        (abs, "")
    };

    let rounded = (scaled * 10.0).round() / 10.0;
    let mut digits = format!("{:.1}", rounded);
    if digits.ends_with(".0") {
        digits.truncate(digits.len() - 2);
    }
    format!("{}{}{}", sign, digits.replace('.', ","), suffix)
}

fn format_signed_integer(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let sign = if value < -0.5 { "-" } else { "" };
    format!("{}{}", sign, format_number(value.abs().round() as u64))
}

/// Money with thousands separators and the currency suffix, e.g. `1.250.000 ₫`
pub fn format_money(value: f64, currency: &str) -> String {
    format!("{} {}", format_signed_integer(value), currency)
}

/// Percentage with the given number of decimals, decimal comma
pub fn format_percent(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.*}%", decimals, value).replace('.', ",")
}

/// Card text for a value in its catalogue format
pub fn format_value(value: f64, format: &ValueFormat) -> String {
    match format {
        ValueFormat::Money { currency } => format_money(value, currency),
        ValueFormat::Percent { decimals } => format_percent(value, *decimals as usize),
        ValueFormat::Integer => format_signed_integer(value),
        ValueFormat::Number { decimals } => {
            let value = if value.is_finite() { value } else { 0.0 };
            format!("{:.*}", *decimals as usize, value).replace('.', ",")
        }
    }
}
