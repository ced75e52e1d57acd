use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::slot::TimeSlot;

/// Participant counter type, as tagged on the counter rows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Adult,
    Child,
    Infant,
}

impl ParticipantKind {
    /// Lowest value the counter may take
    pub fn minimum(&self) -> u32 {
        match self {
            ParticipantKind::Adult => 1,
            ParticipantKind::Child | ParticipantKind::Infant => 0,
        }
    }
}

/// Head counts for a booking. At least one adult is always present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participants {
    adults: u32,
    children: u32,
    infants: u32,
}

impl Default for Participants {
    fn default() -> Self {
        Self { adults: 1, children: 0, infants: 0 }
    }
}

impl Participants {
    pub fn new(adults: u32, children: u32, infants: u32) -> Self {
        Self { adults: adults.max(1), children, infants }
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn infants(&self) -> u32 {
        self.infants
    }

    pub fn count(&self, kind: ParticipantKind) -> u32 {
        match kind {
            ParticipantKind::Adult => self.adults,
            ParticipantKind::Child => self.children,
            ParticipantKind::Infant => self.infants,
        }
    }

    /// Sets a counter, clamping to the kind's minimum. Returns the stored value.
    pub fn set(&mut self, kind: ParticipantKind, value: u32) -> u32 {
        let value = value.max(kind.minimum());
        match kind {
            ParticipantKind::Adult => self.adults = value,
            ParticipantKind::Child => self.children = value,
            ParticipantKind::Infant => self.infants = value,
        }
        value
    }

    pub fn increment(&mut self, kind: ParticipantKind) -> u32 {
        let next = self.count(kind).saturating_add(1);
        self.set(kind, next)
    }

    pub fn decrement(&mut self, kind: ParticipantKind) -> u32 {
        let next = self.count(kind).saturating_sub(1);
        self.set(kind, next)
    }

    pub fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }

    /// Step summary, e.g. `Adults 2 · Children 1 · Infants 0`
    pub fn summary(&self) -> String {
        format!(
            "Adults {} · Children {} · Infants {}",
            self.adults, self.children, self.infants
        )
    }
}

/// One add-on entry; names are unique within a selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Addon {
    pub name: String,
    pub qty: u32,
    pub price: f64,
}

/// Everything chosen so far in the booking modal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSelection {
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub language: String,
    pub option: String,
    pub participants: Participants,
    addons: Vec<Addon>,
}

impl Default for BookingSelection {
    fn default() -> Self {
        Self {
            date: None,
            time: None,
            language: "English".to_string(),
            option: "basic".to_string(),
            participants: Participants::default(),
            addons: Vec::new(),
        }
    }
}

impl BookingSelection {
    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    pub fn addon_qty(&self, name: &str) -> u32 {
        self.addons
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.qty)
            .unwrap_or(0)
    }

    /// Upsert: an existing entry is overwritten in place, a new one appended
    pub fn set_addon_qty(&mut self, name: &str, qty: u32, price: f64) {
        match self.addons.iter_mut().find(|a| a.name == name) {
            Some(existing) => {
                existing.qty = qty;
                existing.price = price;
            }
            None => self.addons.push(Addon {
                name: name.to_string(),
                qty,
                price,
            }),
        }
    }

    pub fn chosen_addons(&self) -> impl Iterator<Item = &Addon> {
        self.addons.iter().filter(|a| a.qty > 0)
    }

    /// Step summary: `Lunch Box x2, Hotel Pickup x1` or `No add-ons`
    pub fn addons_summary(&self) -> String {
        let chosen: Vec<String> = self
            .chosen_addons()
            .map(|a| format!("{} x{}", a.name, a.qty))
            .collect();

        if chosen.is_empty() {
            "No add-ons".to_string()
        } else {
            chosen.join(", ")
        }
    }

    pub fn date_summary(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn time_summary(&self) -> String {
        self.time.map(|t| t.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adults_never_below_one() {
        let mut p = Participants::default();
        assert_eq!(p.decrement(ParticipantKind::Adult), 1);
        assert_eq!(p.set(ParticipantKind::Adult, 0), 1);
        assert_eq!(Participants::new(0, 2, 1).adults(), 1);
    }

    #[test]
    fn test_children_and_infants_never_negative() {
        let mut p = Participants::default();
        assert_eq!(p.decrement(ParticipantKind::Child), 0);
        assert_eq!(p.decrement(ParticipantKind::Infant), 0);

        p.increment(ParticipantKind::Child);
        p.increment(ParticipantKind::Child);
        assert_eq!(p.decrement(ParticipantKind::Child), 1);
    }

    #[test]
    fn test_participants_summary() {
        let p = Participants::new(2, 1, 0);
        assert_eq!(p.summary(), "Adults 2 · Children 1 · Infants 0");
        assert_eq!(p.total(), 3);
    }

    #[test]
    fn test_addon_upsert_never_duplicates() {
        let mut selection = BookingSelection::default();
        selection.set_addon_qty("Lunch Box", 1, 8.5);
        selection.set_addon_qty("Hotel Pickup", 2, 5.0);
        selection.set_addon_qty("Lunch Box", 3, 8.5);

        assert_eq!(selection.addons().len(), 2);
        assert_eq!(selection.addons()[0].name, "Lunch Box");
        assert_eq!(selection.addon_qty("Lunch Box"), 3);
    }

    #[test]
    fn test_addons_summary() {
        let mut selection = BookingSelection::default();
        assert_eq!(selection.addons_summary(), "No add-ons");

        selection.set_addon_qty("Lunch Box", 2, 8.5);
        selection.set_addon_qty("Hotel Pickup", 0, 5.0);
        selection.set_addon_qty("Photo Package", 1, 12.0);
        assert_eq!(selection.addons_summary(), "Lunch Box x2, Photo Package x1");

        selection.set_addon_qty("Lunch Box", 0, 8.5);
        selection.set_addon_qty("Photo Package", 0, 12.0);
        assert_eq!(selection.addons_summary(), "No add-ons");
    }

    #[test]
    fn test_defaults() {
        let selection = BookingSelection::default();
        assert_eq!(selection.language, "English");
        assert_eq!(selection.option, "basic");
        assert_eq!(selection.participants, Participants::new(1, 0, 0));
        assert!(selection.date.is_none());
        assert_eq!(selection.date_summary(), "");
    }
}
