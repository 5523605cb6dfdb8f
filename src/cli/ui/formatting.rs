use rust_decimal::{Decimal, RoundingStrategy};

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Two-decimal amount with the currency symbol, sign in front: `-$80.00`.
pub fn format_money(value: Decimal, currency: &str) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let amount = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{amount:.2}"),
        None => format!("{sign}{amount:.2} {}", currency.to_ascii_uppercase()),
    }
}

/// Like [`format_money`] but renders an unknown cost as `?`.
pub fn format_cost(value: Option<Decimal>, currency: &str) -> String {
    value
        .map(|value| format_money(value, currency))
        .unwrap_or_else(|| "?".to_string())
}
