use serde::{Deserialize, Serialize};

/// Which summary a code is entered into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoScope {
    Cart,
    Checkout,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PromoEffect {
    /// Fixed amount off
    Flat(f64),
    /// Share of the subtotal, rounded to a whole amount
    PercentOfSubtotal(f64),
    /// Removes any discount
    Clear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoRule {
    /// Upper-case codes that trigger the rule
    pub codes: Vec<String>,
    pub effect: PromoEffect,
    pub scopes: Vec<PromoScope>,
}

/// Promo code lookup table. Unknown codes reset the discount to 0.
#[derive(Debug, Clone)]
pub struct PromoBook {
    rules: Vec<PromoRule>,
}

impl PromoBook {
    pub fn new(rules: Vec<PromoRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            PromoRule {
                codes: vec!["EARLYBIRD".to_string(), "EB200".to_string()],
                effect: PromoEffect::Flat(200.0),
                scopes: vec![PromoScope::Cart, PromoScope::Checkout],
            },
            PromoRule {
                codes: vec!["SAVE10".to_string()],
                effect: PromoEffect::PercentOfSubtotal(0.10),
                scopes: vec![PromoScope::Checkout],
            },
            PromoRule {
                codes: vec!["NONE".to_string(), String::new()],
                effect: PromoEffect::Clear,
                scopes: vec![PromoScope::Cart, PromoScope::Checkout],
            },
        ])
    }

    /// Discount for `code` (trimmed, case-insensitive) in `scope`
    pub fn resolve(&self, code: &str, scope: PromoScope, subtotal: f64) -> f64 {
        let normalized = code.trim().to_uppercase();

        let rule = self.rules.iter().find(|r| {
            r.scopes.contains(&scope) && r.codes.iter().any(|c| *c == normalized)
        });

        let discount = match rule.map(|r| &r.effect) {
            Some(PromoEffect::Flat(amount)) => *amount,
            Some(PromoEffect::PercentOfSubtotal(rate)) => (subtotal * rate).round(),
            Some(PromoEffect::Clear) => 0.0,
            None => {
                tracing::debug!("Unrecognized promo code {:?} in {:?}, clearing discount", normalized, scope);
                0.0
            }
        };

        discount.max(0.0)
    }
}

impl Default for PromoBook {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_bird_codes() {
        let book = PromoBook::standard();
        assert_eq!(book.resolve("EARLYBIRD", PromoScope::Cart, 0.0), 200.0);
        assert_eq!(book.resolve("eb200", PromoScope::Cart, 0.0), 200.0);
        assert_eq!(book.resolve("  EarlyBird ", PromoScope::Checkout, 0.0), 200.0);
    }

    #[test]
    fn test_clearing_and_unknown_codes() {
        let book = PromoBook::standard();
        assert_eq!(book.resolve("", PromoScope::Cart, 500.0), 0.0);
        assert_eq!(book.resolve("NONE", PromoScope::Checkout, 500.0), 0.0);
        assert_eq!(book.resolve("FREESTUFF", PromoScope::Cart, 500.0), 0.0);
    }

    #[test]
    fn test_save10_only_at_checkout() {
        let book = PromoBook::standard();
        assert_eq!(book.resolve("save10", PromoScope::Checkout, 1234.0), 123.0);
        assert_eq!(book.resolve("SAVE10", PromoScope::Checkout, 1235.0), 124.0);
        assert_eq!(book.resolve("SAVE10", PromoScope::Cart, 1234.0), 0.0);
    }
}
