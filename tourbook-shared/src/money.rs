//! Amount formatting shared by the booking modal and the order summaries.

/// Fixed two-decimal rendering used by the booking modal total, e.g. `€17.50`.
pub fn format_fixed(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Locale-style rendering: thousands grouping, at most three fraction
/// digits, trailing zeros dropped. `1234.5` becomes `1,234.5`.
pub fn format_grouped(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let scaled = (amount.abs() * 1000.0).round() as u64;
    let whole = scaled / 1000;
    let fraction = scaled % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction > 0 {
        let fraction = format!("{:03}", fraction);
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }

    if amount < 0.0 && scaled > 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Summary amount, e.g. `$1,234`. Negative totals keep the sign after the
/// symbol (`$-11`).
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{}{}", symbol, format_grouped(amount))
}

/// Discount line amount, e.g. `-$200`.
pub fn format_discount(symbol: &str, amount: f64) -> String {
    format!("-{}{}", symbol, format_grouped(amount))
}
