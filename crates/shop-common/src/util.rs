//! Formatting helpers

/// Format a fiat amount with its currency symbol, e.g. `$25.00`
///
/// Currencies without a known symbol are rendered as `25.00 XYZ`.
pub fn format_fiat_amount(amount: f64, currency: &str) -> String {
    let currency = currency.to_uppercase();
    let symbol = match currency.as_str() {
        "USD" | "CAD" | "AUD" | "NZD" | "MXN" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    };

    match symbol {
        Some(symbol) => format!("{}{:.2}", symbol, amount),
        None => format!("{:.2} {}", amount, currency),
    }
}
