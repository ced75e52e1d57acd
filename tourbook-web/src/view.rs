use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tourbook_cart::{CartLineItem, PromoScope};
use tourbook_catalog::{ParticipantKind, Step, StepPanel, TimeSlot};
use tourbook_core::{FieldId, FieldState};
use tourbook_shared::RenderedSummary;

/// A render instruction returned by a controller handler.
///
/// The host applies these to whatever surface it draws; a controller never
/// reads them back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewUpdate {
    // Booking modal
    StepSummary { step: Step, text: String },
    StepPanel { step: Step, panel: StepPanel },
    Total { text: String },
    DateSet { date: NaiveDate },
    TimeSelected { time: TimeSlot },
    LanguageSelected { language: String },
    OptionSelected { value: String },
    DetailsToggled { value: String, expanded: bool, label: String },
    Counter { kind: ParticipantKind, value: u32 },
    AddonQty { name: String, qty: u32 },
    ModalOpened { card: Uuid },
    ModalClosed,

    // Cart and checkout summaries
    CardUpdated { card: CartLineItem },
    CardRemoved { card: Uuid },
    Summary { scope: PromoScope, summary: RenderedSummary },

    // Guest form
    FieldValue { field: FieldId, value: String },
    FieldState { field: FieldId, state: FieldState },
    Focus { field: FieldId },

    // Payment
    PaymentHighlighted { focus: Option<String> },
    PaymentMethodSelected { method: String },
    Navigate { url: String },
}

impl ViewUpdate {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
