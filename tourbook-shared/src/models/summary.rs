use serde::{Deserialize, Serialize};

use crate::money::{format_currency, format_discount};

/// What a summary line represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineKind {
    Item,
    Fee,
    Discount,
}

/// One itemized entry of an order summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryLine {
    pub label: String,
    pub amount: f64,
    pub kind: LineKind,
}

impl SummaryLine {
    pub fn item(label: impl Into<String>, amount: f64) -> Self {
        Self { label: label.into(), amount, kind: LineKind::Item }
    }

    pub fn fee(label: impl Into<String>, amount: f64) -> Self {
        Self { label: label.into(), amount, kind: LineKind::Fee }
    }

    pub fn discount(label: impl Into<String>, amount: f64) -> Self {
        Self { label: label.into(), amount, kind: LineKind::Discount }
    }
}

/// Derived order summary, rebuilt from scratch on every mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SummaryView {
    pub lines: Vec<SummaryLine>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

impl SummaryView {
    pub fn render(&self, symbol: &str) -> RenderedSummary {
        let lines = self
            .lines
            .iter()
            .map(|line| RenderedLine {
                label: line.label.clone(),
                amount: match line.kind {
                    LineKind::Discount => format_discount(symbol, line.amount),
                    _ => format_currency(symbol, line.amount),
                },
                is_discount: line.kind == LineKind::Discount,
            })
            .collect();

        RenderedSummary {
            lines,
            total: format_currency(symbol, self.total),
        }
    }

    pub fn has_discount_line(&self) -> bool {
        self.lines.iter().any(|l| l.kind == LineKind::Discount)
    }
}

/// Text-only form of a summary, ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderedLine {
    pub label: String,
    pub amount: String,
    pub is_discount: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderedSummary {
    pub lines: Vec<RenderedLine>,
    pub total: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_discount_negative() {
        let view = SummaryView {
            lines: vec![
                SummaryLine::item("Island Tour (2 travelers)", 1200.0),
                SummaryLine::fee("Service Fee", 89.0),
                SummaryLine::discount("Early Bird Discount", 200.0),
            ],
            subtotal: 1200.0,
            discount: 200.0,
            total: 1089.0,
        };

        let rendered = view.render("$");
        assert_eq!(rendered.lines[0].amount, "$1,200");
        assert_eq!(rendered.lines[1].amount, "$89");
        assert_eq!(rendered.lines[2].amount, "-$200");
        assert!(rendered.lines[2].is_discount);
        assert_eq!(rendered.total, "$1,089");
        assert!(view.has_discount_line());
    }
}
