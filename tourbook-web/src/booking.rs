//! Booking options modal.
//!
//! Owns the current `BookingSelection` and re-prices it after every change.
//! Each handler returns the step summary it touched, the panel state that
//! keeps that step open, and the new total.

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, warn};

use tourbook_cart::{ModalSnapshot, PrefillPlan};
use tourbook_catalog::{
    BookingSelection, BookingWindow, CatalogError, CatalogResult, ParticipantKind, PricingEngine,
    Step, StepPanels, TimeSlot, TourProduct,
};

use crate::view::ViewUpdate;

pub struct BookingOptionsController {
    product: TourProduct,
    pricing: PricingEngine,
    window: BookingWindow,
    currency: String,
    selection: BookingSelection,
    /// Language button marked active; unset until the guest (or a prefill)
    /// picks one
    active_language: Option<String>,
    panels: StepPanels,
    expanded: HashSet<String>,
}

impl BookingOptionsController {
    pub fn new(
        product: TourProduct,
        pricing: PricingEngine,
        window: BookingWindow,
        currency: impl Into<String>,
    ) -> Self {
        let mut selection = BookingSelection::default();
        selection.option = product.initial_option().to_string();

        Self {
            product,
            pricing,
            window,
            currency: currency.into(),
            selection,
            active_language: None,
            panels: StepPanels::default(),
            expanded: HashSet::new(),
        }
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn product(&self) -> &TourProduct {
        &self.product
    }

    pub fn window(&self) -> BookingWindow {
        self.window
    }

    pub fn active_language(&self) -> Option<&str> {
        self.active_language.as_deref()
    }

    pub fn is_expanded(&self, option: &str) -> bool {
        self.expanded.contains(option)
    }

    /// First render: the preselected option, the participant summary and
    /// the starting total
    pub fn init(&mut self) -> Vec<ViewUpdate> {
        let mut updates = vec![ViewUpdate::OptionSelected {
            value: self.selection.option.clone(),
        }];
        updates.extend(self.summary(Step::Options, self.option_summary()));
        updates.extend(self.summary(Step::Participants, self.selection.participants.summary()));
        updates.push(self.total());
        updates
    }

    pub fn set_date(&mut self, date: NaiveDate) -> Vec<ViewUpdate> {
        match self.window.check(date) {
            Ok(date) => self.apply_date(date),
            Err(e) => self.reject(e),
        }
    }

    pub fn select_time(&mut self, time: &str) -> Vec<ViewUpdate> {
        match self.known_time(time) {
            Ok(slot) => self.apply_time(slot),
            Err(e) => self.reject(e),
        }
    }

    pub fn select_language(&mut self, language: &str) -> Vec<ViewUpdate> {
        match self.product.find_language(language).map(str::to_string) {
            Some(name) => self.apply_language(name),
            None => self.reject(CatalogError::UnknownLanguage(language.to_string())),
        }
    }

    /// Single-select: the chosen card replaces the previous one
    pub fn select_option(&mut self, value: &str) -> Vec<ViewUpdate> {
        if self.product.option(value).is_none() {
            return self.reject(CatalogError::UnknownOption(value.to_string()));
        }

        self.selection.option = value.to_string();
        debug!("Option selected: {}", value);

        let mut updates = vec![ViewUpdate::OptionSelected {
            value: value.to_string(),
        }];
        updates.extend(self.summary(Step::Options, self.option_summary()));
        updates.push(self.total());
        updates
    }

    /// Expands or collapses an option card's details without selecting it
    pub fn toggle_details(&mut self, value: &str) -> Vec<ViewUpdate> {
        if self.product.option(value).is_none() {
            return self.reject(CatalogError::UnknownOption(value.to_string()));
        }

        let expanded = if self.expanded.remove(value) {
            false
        } else {
            self.expanded.insert(value.to_string());
            true
        };
        let label = if expanded { "Hide Details" } else { "Show Details" };

        vec![ViewUpdate::DetailsToggled {
            value: value.to_string(),
            expanded,
            label: label.to_string(),
        }]
    }

    /// Step header click
    pub fn toggle_step(&mut self, step: Step) -> Vec<ViewUpdate> {
        self.panels
            .toggle_header(step)
            .into_iter()
            .map(|(step, panel)| ViewUpdate::StepPanel { step, panel })
            .collect()
    }

    pub fn increment(&mut self, kind: ParticipantKind) -> Vec<ViewUpdate> {
        let value = self.selection.participants.increment(kind);
        self.participants_changed(kind, value)
    }

    pub fn decrement(&mut self, kind: ParticipantKind) -> Vec<ViewUpdate> {
        let value = self.selection.participants.decrement(kind);
        self.participants_changed(kind, value)
    }

    pub fn set_participants(&mut self, kind: ParticipantKind, value: u32) -> Vec<ViewUpdate> {
        let value = self.selection.participants.set(kind, value);
        self.participants_changed(kind, value)
    }

    pub fn set_addon_qty(&mut self, name: &str, qty: u32) -> Vec<ViewUpdate> {
        let price = match self.product.addon(name) {
            Some(addon) => addon.price,
            None => return self.reject(CatalogError::UnknownAddon(name.to_string())),
        };

        self.selection.set_addon_qty(name, qty, price);
        debug!("Add-on {} quantity set to {}", name, qty);

        let mut updates = vec![ViewUpdate::AddonQty {
            name: name.to_string(),
            qty,
        }];
        updates.extend(self.summary(Step::Addons, self.selection.addons_summary()));
        updates.push(self.total());
        updates
    }

    pub fn increment_addon(&mut self, name: &str) -> Vec<ViewUpdate> {
        let qty = self.selection.addon_qty(name).saturating_add(1);
        self.set_addon_qty(name, qty)
    }

    pub fn decrement_addon(&mut self, name: &str) -> Vec<ViewUpdate> {
        let qty = self.selection.addon_qty(name).saturating_sub(1);
        self.set_addon_qty(name, qty)
    }

    pub fn close_modal(&mut self) -> Vec<ViewUpdate> {
        vec![ViewUpdate::ModalClosed]
    }

    /// Loads choices recovered from a cart card. Unknown values leave the
    /// modal as it is; participant counts always restart from the defaults.
    pub fn apply_prefill(&mut self, plan: &PrefillPlan) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();

        // Set directly like the page's input value, without the window check
        if let Some(date) = plan.date {
            updates.extend(self.apply_date(date));
        }
        if let Some(language) = plan.language.clone() {
            updates.extend(self.apply_language(language));
        }
        if let Some(slot) = plan.time {
            updates.extend(self.apply_time(slot));
        }

        let participants = plan.participants();
        for kind in [ParticipantKind::Adult, ParticipantKind::Child, ParticipantKind::Infant] {
            let value = self.selection.participants.set(kind, participants.count(kind));
            updates.push(ViewUpdate::Counter { kind, value });
        }
        updates.extend(self.summary(Step::Participants, self.selection.participants.summary()));
        updates.push(self.total());

        updates
    }

    /// What a cart edit save reads back from the modal
    pub fn snapshot(&self) -> ModalSnapshot {
        let addons = self
            .product
            .addons
            .iter()
            .map(|a| (a.name.clone(), self.selection.addon_qty(&a.name)))
            .filter(|(_, qty)| *qty > 0)
            .collect();

        ModalSnapshot {
            date: self.selection.date,
            time: self.selection.time,
            language: self.active_language.clone(),
            participants: self.selection.participants,
            option_title: self
                .product
                .option(&self.selection.option)
                .map(|o| o.title.trim().to_string()),
            addons,
        }
    }

    pub fn total_text(&self) -> String {
        self.pricing
            .quote(&self.selection)
            .total_text(&self.currency)
    }

    fn known_time(&self, time: &str) -> CatalogResult<TimeSlot> {
        let slot: TimeSlot = time.parse()?;
        if self.product.has_time_slot(&slot) {
            Ok(slot)
        } else {
            Err(CatalogError::UnknownTimeSlot(time.to_string()))
        }
    }

    fn apply_date(&mut self, date: NaiveDate) -> Vec<ViewUpdate> {
        self.selection.date = Some(date);
        debug!("Date set to {}", date);

        let mut updates = vec![ViewUpdate::DateSet { date }];
        updates.extend(self.summary(Step::Date, self.selection.date_summary()));
        updates.push(self.total());
        updates
    }

    fn apply_time(&mut self, slot: TimeSlot) -> Vec<ViewUpdate> {
        self.selection.time = Some(slot);
        debug!("Time set to {}", slot);

        let mut updates = vec![ViewUpdate::TimeSelected { time: slot }];
        updates.extend(self.summary(Step::Time, self.selection.time_summary()));
        updates.push(self.total());
        updates
    }

    fn apply_language(&mut self, language: String) -> Vec<ViewUpdate> {
        self.selection.language = language.clone();
        self.active_language = Some(language.clone());
        debug!("Language set to {}", language);

        let mut updates = vec![ViewUpdate::LanguageSelected {
            language: language.clone(),
        }];
        updates.extend(self.summary(Step::Language, language));
        updates.push(self.total());
        updates
    }

    fn participants_changed(&mut self, kind: ParticipantKind, value: u32) -> Vec<ViewUpdate> {
        debug!("{:?} count now {}", kind, value);
        let mut updates = vec![ViewUpdate::Counter { kind, value }];
        updates.extend(self.summary(Step::Participants, self.selection.participants.summary()));
        updates.push(self.total());
        updates
    }

    fn option_summary(&self) -> String {
        self.product.option_title(&self.selection.option)
    }

    fn summary(&mut self, step: Step, text: String) -> [ViewUpdate; 2] {
        let panel = self.panels.keep_open(step);
        [
            ViewUpdate::StepSummary { step, text },
            ViewUpdate::StepPanel { step, panel },
        ]
    }

    fn total(&self) -> ViewUpdate {
        ViewUpdate::Total {
            text: self.total_text(),
        }
    }

    fn reject(&self, error: CatalogError) -> Vec<ViewUpdate> {
        warn!("Booking modal ignored input: {}", error);
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourbook_catalog::{PriceTable, StepPanel};

    fn controller() -> BookingOptionsController {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        BookingOptionsController::new(
            TourProduct::default(),
            PricingEngine::new(PriceTable::default()),
            BookingWindow::starting(today),
            "€",
        )
    }

    fn last_total(updates: &[ViewUpdate]) -> Option<&str> {
        updates.iter().rev().find_map(|u| match u {
            ViewUpdate::Total { text } => Some(text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_init_renders_preselected_option() {
        let mut booking = controller();
        let updates = booking.init();

        assert_eq!(updates[0], ViewUpdate::OptionSelected { value: "basic".to_string() });
        assert!(updates.contains(&ViewUpdate::StepSummary {
            step: Step::Options,
            text: "Boat Trip Only".to_string(),
        }));
        assert!(updates.contains(&ViewUpdate::StepSummary {
            step: Step::Participants,
            text: "Adults 1 · Children 0 · Infants 0".to_string(),
        }));
        assert_eq!(last_total(&updates), Some("€17.50"));
    }

    #[test]
    fn test_total_follows_every_change() {
        let mut booking = controller();

        booking.increment(ParticipantKind::Adult);
        booking.increment(ParticipantKind::Child);
        booking.increment(ParticipantKind::Infant);
        booking.select_option("entrance");
        let updates = booking.set_addon_qty("Lunch Box", 2);

        // 2 * 17.5 + 10 + 4.5 + 2 * 8.5
        assert_eq!(last_total(&updates), Some("€66.50"));
    }

    #[test]
    fn test_counters_clamp() {
        let mut booking = controller();

        let updates = booking.decrement(ParticipantKind::Adult);
        assert_eq!(updates[0], ViewUpdate::Counter { kind: ParticipantKind::Adult, value: 1 });

        let updates = booking.decrement(ParticipantKind::Child);
        assert_eq!(updates[0], ViewUpdate::Counter { kind: ParticipantKind::Child, value: 0 });

        let updates = booking.decrement_addon("Photo Package");
        assert_eq!(updates[0], ViewUpdate::AddonQty { name: "Photo Package".to_string(), qty: 0 });
    }

    #[test]
    fn test_option_is_single_select() {
        let mut booking = controller();
        booking.select_option("parasailing");
        let updates = booking.select_option("entrance");

        let selected: Vec<_> = updates
            .iter()
            .filter(|u| matches!(u, ViewUpdate::OptionSelected { .. }))
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(booking.selection().option, "entrance");
        assert!(updates.contains(&ViewUpdate::StepSummary {
            step: Step::Options,
            text: "Boat Trip + Island Entrance".to_string(),
        }));
    }

    #[test]
    fn test_unknown_layout_values_are_ignored() {
        let mut booking = controller();

        assert!(booking.select_option("helicopter").is_empty());
        assert!(booking.select_time("18:00").is_empty());
        assert!(booking.select_time("noon").is_empty());
        assert!(booking.select_language("Klingon").is_empty());
        assert!(booking.set_addon_qty("Massage", 1).is_empty());

        assert_eq!(booking.selection().option, "basic");
        assert!(booking.selection().time.is_none());
        assert!(booking.selection().addons().is_empty());
    }

    #[test]
    fn test_date_outside_window_is_rejected() {
        let mut booking = controller();

        let early = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert!(booking.set_date(early).is_empty());
        assert!(booking.selection().date.is_none());

        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let updates = booking.set_date(date);
        assert!(updates.contains(&ViewUpdate::StepSummary {
            step: Step::Date,
            text: "2025-03-05".to_string(),
        }));
        assert!(updates.contains(&ViewUpdate::StepPanel {
            step: Step::Date,
            panel: StepPanel { collapsed: false, active: true },
        }));
    }

    #[test]
    fn test_details_toggle_does_not_select() {
        let mut booking = controller();

        let updates = booking.toggle_details("parasailing");
        assert_eq!(
            updates,
            vec![ViewUpdate::DetailsToggled {
                value: "parasailing".to_string(),
                expanded: true,
                label: "Hide Details".to_string(),
            }]
        );
        assert_eq!(booking.selection().option, "basic");

        let updates = booking.toggle_details("parasailing");
        assert!(matches!(
            &updates[0],
            ViewUpdate::DetailsToggled { expanded: false, label, .. } if label == "Show Details"
        ));
    }

    #[test]
    fn test_step_header_toggle() {
        let mut booking = controller();
        booking.select_time("09:00");

        let updates = booking.toggle_step(Step::Time);
        assert_eq!(updates.len(), Step::ALL.len());
        assert!(updates.contains(&ViewUpdate::StepPanel {
            step: Step::Time,
            panel: StepPanel { collapsed: true, active: false },
        }));
    }

    #[test]
    fn test_language_is_active_only_once_picked() {
        let mut booking = controller();
        assert_eq!(booking.snapshot().language, None);

        booking.select_language("german");
        assert_eq!(booking.selection().language, "German");
        assert_eq!(booking.snapshot().language.as_deref(), Some("German"));
    }

    #[test]
    fn test_snapshot_lists_addons_in_layout_order() {
        let mut booking = controller();
        booking.set_addon_qty("Photo Package", 1);
        booking.set_addon_qty("Hotel Pickup", 2);
        booking.set_addon_qty("Lunch Box", 0);

        let snapshot = booking.snapshot();
        assert_eq!(
            snapshot.addons,
            vec![("Hotel Pickup".to_string(), 2), ("Photo Package".to_string(), 1)]
        );
        assert_eq!(snapshot.option_title.as_deref(), Some("Boat Trip Only"));
    }

    #[test]
    fn test_prefill_resets_missing_counts() {
        let mut booking = controller();
        booking.increment(ParticipantKind::Infant);
        booking.select_time("15:00");

        let plan = PrefillPlan {
            adults: Some(3),
            ..PrefillPlan::default()
        };
        let updates = booking.apply_prefill(&plan);

        let participants = booking.selection().participants;
        assert_eq!(participants.adults(), 3);
        assert_eq!(participants.infants(), 0);
        assert_eq!(booking.selection().time, TimeSlot::new(15, 0));
        assert_eq!(last_total(&updates), Some("€52.50"));
    }
}
