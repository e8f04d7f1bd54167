//! Text formatting utilities

/// Groups the integer digits of `value` with commas, e.g. `12500` -> `"12,500"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a whole-dollar amount, e.g. `5000.0` -> `"$5,000"`.
pub fn format_currency(amount: f64) -> String {
    let whole = if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    };
    format!("${}", group_thousands(whole))
}
