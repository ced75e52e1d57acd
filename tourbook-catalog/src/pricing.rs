use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::selection::BookingSelection;
use tourbook_shared::money::format_fixed;

/// Static per-head and per-option prices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceTable {
    pub adult: f64,
    pub child: f64,

    /// Kept for display only; infants are never charged
    #[serde(default)]
    pub infant: f64,

    /// Option code to flat fee
    #[serde(default)]
    pub options: HashMap<String, f64>,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            adult: 17.5,
            child: 10.0,
            infant: 0.0,
            options: {
                let mut m = HashMap::new();
                m.insert("basic".to_string(), 0.0);
                m.insert("entrance".to_string(), 4.5);
                m.insert("parasailing".to_string(), 18.5);
                m
            },
        }
    }
}

/// Price breakdown for the current selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    pub base: f64,
    pub option_fee: f64,
    pub addons_fee: f64,
    pub total: f64,
}

impl PriceQuote {
    pub fn total_text(&self, symbol: &str) -> String {
        format_fixed(symbol, self.total)
    }
}

/// Booking modal pricing: always a full recompute from the selection
#[derive(Debug, Clone)]
pub struct PricingEngine {
    prices: PriceTable,
}

impl PricingEngine {
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Flat fee for an option code, 0 when the code is unknown
    pub fn option_fee(&self, option: &str) -> f64 {
        self.prices.options.get(option).copied().unwrap_or(0.0)
    }

    pub fn quote(&self, selection: &BookingSelection) -> PriceQuote {
        let participants = &selection.participants;
        let base = participants.adults() as f64 * self.prices.adult
            + participants.children() as f64 * self.prices.child;

        let option_fee = self.option_fee(&selection.option);

        let addons_fee = selection
            .addons()
            .iter()
            .map(|a| a.price * a.qty as f64)
            .sum::<f64>();

        PriceQuote {
            base,
            option_fee,
            addons_fee,
            total: base + option_fee + addons_fee,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PriceTable::default())
    }
}
