pub mod availability;
pub mod pricing;
pub mod product;
pub mod selection;
pub mod slot;
pub mod steps;

pub use availability::BookingWindow;
pub use pricing::{PriceQuote, PriceTable, PricingEngine};
pub use product::{AddonItem, OptionCard, TourProduct};
pub use selection::{Addon, BookingSelection, ParticipantKind, Participants};
pub use slot::TimeSlot;
pub use steps::{Step, StepPanel, StepPanels};

/// Errors raised when a choice does not match the tour product
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),

    #[error("Invalid time slot format: {0}")]
    InvalidTimeSlot(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown add-on: {0}")]
    UnknownAddon(String),

    #[error("Date {date} outside booking window {min}..={max}")]
    DateOutOfWindow {
        date: chrono::NaiveDate,
        min: chrono::NaiveDate,
        max: chrono::NaiveDate,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
