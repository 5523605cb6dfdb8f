//! The single row type tracked by the ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schema::{format_flag, GiftField};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One planned or purchased gift.
///
/// `cost` is `None` when the value is unknown, which only happens when an
/// imported cell could not be read as a number.
pub struct GiftRecord {
    pub recipient: String,
    pub gift: String,
    pub budget: Decimal,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl GiftRecord {
    /// Creates an unpurchased record with a zero cost and no link.
    pub fn new(recipient: impl Into<String>, gift: impl Into<String>, budget: Decimal) -> Self {
        Self {
            recipient: recipient.into(),
            gift: gift.into(),
            budget,
            cost: Some(Decimal::ZERO),
            purchased: false,
            link: None,
        }
    }

    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_unknown_cost(mut self) -> Self {
        self.cost = None;
        self
    }

    pub fn with_purchased(mut self, purchased: bool) -> Self {
        self.purchased = purchased;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        let link = link.into();
        self.link = if link.trim().is_empty() {
            None
        } else {
            Some(link)
        };
        self
    }

    /// Cost with the unknown sentinel read as zero.
    pub fn cost_or_zero(&self) -> Decimal {
        self.cost.unwrap_or(Decimal::ZERO)
    }

    /// Amount this record contributes to spent-to-date totals.
    pub fn spent(&self) -> Decimal {
        if self.purchased {
            self.cost_or_zero()
        } else {
            Decimal::ZERO
        }
    }

    pub fn has_known_cost(&self) -> bool {
        self.cost.is_some()
    }

    /// Renders one field the way it appears in exported tables.
    pub fn field_text(&self, field: GiftField) -> String {
        match field {
            GiftField::Recipient => self.recipient.clone(),
            GiftField::Gift => self.gift.clone(),
            GiftField::Budget => self.budget.to_string(),
            GiftField::Cost => self.cost.map(|cost| cost.to_string()).unwrap_or_default(),
            GiftField::Purchased => format_flag(self.purchased).to_string(),
            GiftField::Link => self.link.clone().unwrap_or_default(),
        }
    }
}

/// Largest budget, cost or fixed budget the ledger accepts, in whole currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// Upper bound for any stored amount.
pub fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT_UNITS)
}

/// Whether `value` is a storable amount: not negative and not above [`max_amount`].
pub fn amount_in_range(value: Decimal) -> bool {
    !(value.is_sign_negative() && !value.is_zero()) && value <= max_amount()
}

/// `a + b`, pinned to the representable range instead of overflowing.
pub fn add_amounts(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// `a - b`, pinned to the representable range instead of overflowing.
pub fn sub_amounts(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

pub fn sum_amounts<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, add_amounts)
}

/// Best-effort check that `value` has the shape of an `http(s)://host/...` URL.
pub fn looks_like_url(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => rest
            .split(['/', '?', '#'])
            .next()
            .is_some_and(|host| !host.is_empty()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_defaults_to_unpurchased_zero_cost() {
        let record = GiftRecord::new("Alice", "Book", Decimal::from(50));
        assert!(!record.purchased);
        assert_eq!(record.cost, Some(Decimal::ZERO));
        assert!(record.link.is_none());
        assert_eq!(record.spent(), Decimal::ZERO);
    }

    #[test]
    fn spent_only_counts_purchased_known_costs() {
        let bought = GiftRecord::new("Bob", "Toy", Decimal::from(30))
            .with_cost(Decimal::from(25))
            .with_purchased(true);
        let unknown = bought.clone().with_unknown_cost();
        assert_eq!(bought.spent(), Decimal::from(25));
        assert_eq!(unknown.spent(), Decimal::ZERO);
    }

    #[test]
    fn blank_link_is_dropped() {
        let record = GiftRecord::new("Alice", "Book", Decimal::ONE).with_link("   ");
        assert!(record.link.is_none());
    }

    #[test]
    fn url_shape_check_is_lenient_but_requires_scheme_and_host() {
        assert!(looks_like_url("https://example.com/gift"));
        assert!(looks_like_url("http://localhost:8080"));
        assert!(!looks_like_url("example.com/gift"));
        assert!(!looks_like_url("https:///path"));
        assert!(!looks_like_url("https://exa mple.com"));
    }

    #[test]
    fn field_text_matches_export_format() {
        let record = GiftRecord::new("Alice", "Book", Decimal::new(5000, 2))
            .with_unknown_cost()
            .with_purchased(true);
        assert_eq!(record.field_text(GiftField::Budget), "50.00");
        assert_eq!(record.field_text(GiftField::Cost), "");
        assert_eq!(record.field_text(GiftField::Purchased), "Yes");
        assert_eq!(record.field_text(GiftField::Link), "");
    }

    #[test]
    fn amounts_above_the_ceiling_are_out_of_range() {
        assert!(amount_in_range(Decimal::ZERO));
        assert!(amount_in_range(max_amount()));
        assert!(!amount_in_range(max_amount() + Decimal::ONE));
        assert!(!amount_in_range(Decimal::MAX));
        assert!(!amount_in_range(Decimal::from(-1)));
    }

    #[test]
    fn amount_arithmetic_pins_instead_of_overflowing() {
        assert_eq!(add_amounts(Decimal::MAX, Decimal::ONE), Decimal::MAX);
        assert_eq!(sub_amounts(Decimal::MIN, Decimal::ONE), Decimal::MIN);
        assert_eq!(sub_amounts(Decimal::MAX, Decimal::from(-1)), Decimal::MAX);
        assert_eq!(sum_amounts([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(
            sum_amounts([Decimal::from(40), Decimal::from(25)]),
            Decimal::from(65)
        );
    }

    #[test]
    fn serde_round_trip_keeps_decimal_precision() {
        let record = GiftRecord::new("Alice", "Scarf", Decimal::new(1999, 2))
            .with_cost(Decimal::new(1250, 2));
        let json = serde_json::to_string(&record).unwrap();
        let back: GiftRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
