use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The text lines rendered on a cart card.
///
/// `None` means the card has no such line. Saving an edit only rewrites
/// lines that exist, except the add-ons line which is created or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDetails {
    pub date: Option<String>,
    pub time: Option<String>,
    pub language: Option<String>,
    pub participants_line: Option<String>,
    pub option_title: Option<String>,
    pub addons_line: Option<String>,
}

/// One purchased tour in the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub id: Uuid,
    pub title: String,
    pub unit_price: f64,
    pub travelers: u32,
    pub details: CardDetails,
}

impl CartLineItem {
    pub fn new(title: impl Into<String>, unit_price: f64, travelers: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            unit_price,
            travelers: travelers.max(1),
            details: CardDetails::default(),
        }
    }

    pub fn with_details(mut self, details: CardDetails) -> Self {
        self.details = details;
        self
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.travelers as f64
    }

    /// Summary label, e.g. `Island Tour (2 travelers)`
    pub fn summary_label(&self) -> String {
        let plural = if self.travelers > 1 { "s" } else { "" };
        format!("{} ({} traveler{})", self.title, self.travelers, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_and_label() {
        let item = CartLineItem::new("Orange Bay Island", 600.0, 2);
        assert_eq!(item.line_total(), 1200.0);
        assert_eq!(item.summary_label(), "Orange Bay Island (2 travelers)");

        let solo = CartLineItem::new("Desert Safari", 45.0, 1);
        assert_eq!(solo.summary_label(), "Desert Safari (1 traveler)");
    }

    #[test]
    fn test_travelers_at_least_one() {
        let item = CartLineItem::new("Snorkeling", 30.0, 0);
        assert_eq!(item.travelers, 1);
    }
}
