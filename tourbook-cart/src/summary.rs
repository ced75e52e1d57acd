use crate::models::CartLineItem;
use tourbook_shared::{SummaryLine, SummaryView};

/// How a summary total treats a discount larger than the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalPolicy {
    /// Cart: `subtotal + fee - discount`, may go negative
    Unclamped,
    /// Checkout: never below zero
    ClampAtZero,
}

/// Builds the itemized order summary shown next to the cart and checkout
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    service_fee: f64,
    policy: TotalPolicy,
    discount_label: String,
}

impl SummaryBuilder {
    pub fn cart(service_fee: f64) -> Self {
        Self {
            service_fee,
            policy: TotalPolicy::Unclamped,
            discount_label: "Early Bird Discount".to_string(),
        }
    }

    pub fn checkout(service_fee: f64) -> Self {
        Self {
            service_fee,
            policy: TotalPolicy::ClampAtZero,
            discount_label: "Promo Discount".to_string(),
        }
    }

    pub fn service_fee(&self) -> f64 {
        self.service_fee
    }

    pub fn policy(&self) -> TotalPolicy {
        self.policy
    }

    pub fn total(&self, subtotal: f64, discount: f64) -> f64 {
        let total = subtotal + self.service_fee - discount;
        match self.policy {
            TotalPolicy::Unclamped => total,
            TotalPolicy::ClampAtZero => total.max(0.0),
        }
    }

    /// One line per cart card
    pub fn for_items(&self, items: &[CartLineItem], discount: f64) -> SummaryView {
        let lines = items
            .iter()
            .map(|item| SummaryLine::item(item.summary_label(), item.line_total()))
            .collect();
        let subtotal = items.iter().map(CartLineItem::line_total).sum();
        self.finish(lines, subtotal, discount)
    }

    /// A single `Trip Subtotal` line for an externally supplied subtotal
    pub fn for_subtotal(&self, subtotal: f64, discount: f64) -> SummaryView {
        self.finish(vec![SummaryLine::item("Trip Subtotal", subtotal)], subtotal, discount)
    }

    fn finish(&self, mut lines: Vec<SummaryLine>, subtotal: f64, discount: f64) -> SummaryView {
        lines.push(SummaryLine::fee("Service Fee", self.service_fee));
        if discount > 0.0 {
            lines.push(SummaryLine::discount(self.discount_label.clone(), discount));
        }

        SummaryView {
            lines,
            subtotal,
            discount,
            total: self.total(subtotal, discount),
        }
    }
}
