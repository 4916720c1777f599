// Small shared helpers.

/// Rounds to the nearest whole number and groups digits in threes,
/// e.g. 200000000.0 -> "200,000,000".
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    // The cast saturates huge negatives to i64::MIN, which has no i64 absolute value.
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
