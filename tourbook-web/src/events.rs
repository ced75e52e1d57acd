use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tourbook_catalog::{ParticipantKind, Step};
use tourbook_core::FieldId;

use crate::error::WebResult;

/// One user interaction on the booking, cart or checkout page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
    // Booking modal
    SetDate { date: NaiveDate },
    SelectTime { time: String },
    SelectLanguage { language: String },
    SelectOption { option: String },
    ToggleDetails { option: String },
    ToggleStep { step: Step },
    Increment { kind: ParticipantKind },
    Decrement { kind: ParticipantKind },
    SetParticipants { kind: ParticipantKind, value: u32 },
    SetAddonQty { name: String, qty: u32 },
    IncrementAddon { name: String },
    DecrementAddon { name: String },
    CloseModal,

    // Cart
    EditCard { card: Uuid },
    SaveEdits,
    DeleteCard { card: Uuid },
    CartPromo { code: String },

    // Checkout
    FieldInput { field: FieldId, value: String },
    FieldBlur { field: FieldId },
    SaveInfo { checked: bool },
    SubmitGuest,
    CheckoutPromo { code: String },
    SelectPayment { method: String },
    ConfirmBooking,
}

impl PageEvent {
    /// Parses one JSON line, e.g. `{"event":"select_time","time":"09:00"}`
    pub fn from_line(line: &str) -> WebResult<Self> {
        Ok(serde_json::from_str(line.trim())?)
    }
}
