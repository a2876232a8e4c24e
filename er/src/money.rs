//! Currency-neutral amount formatting

/// Format an amount rounded to whole units with `.` thousands separators
///
/// `format_amount(9900.4, "DKK")` renders as `9.900 DKK`.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let rounded = if amount.is_finite() { amount.round() as i64 } else { 0 };
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    if currency.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{} {}", sign, grouped, currency)
    }
}

/// Ratio as tenths of a percent, rounded (`0.8524` is `852`)
pub fn percent_tenths(ratio: f64) -> i64 {
    if ratio.is_finite() { (ratio * 1000.0).round() as i64 } else { 0 }
}

/// Render a ratio as a percentage with at most one decimal
///
/// Whole percentages drop the decimal: `0.99` is `99%`, `0.852` is `85.2%`.
pub fn format_percent(ratio: f64) -> String {
    let tenths = percent_tenths(ratio);
    if tenths % 10 == 0 {
        format!("{}%", tenths / 10)
    } else {
        format!("{}.{}%", tenths / 10, (tenths % 10).abs())
    }
}
