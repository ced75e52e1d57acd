pub mod guest;
pub mod payment;
pub mod validation;

pub use guest::GuestRecord;
pub use payment::{ConfirmationRedirect, PaymentGateway, PaymentSelection, RedirectGateway};
pub use validation::{CheckoutForm, FieldId, FieldState, SubmitOutcome};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
    #[error("Saved record is malformed: {0}")]
    MalformedRecord(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
