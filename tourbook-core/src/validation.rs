//! Guest form validation.
//!
//! Every monitored field is `Neutral`, `Valid` or `Invalid`, recomputed from
//! the trimmed value on each input/blur/change. Only the four required
//! fields can block submission; the optional ones resolve to `Neutral`
//! when empty and are advisory otherwise.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::{CoreError, CoreResult};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zأ-يءى\-\s]{2,}$").expect("name pattern"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern"));
static HOTEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9أ-يءى\-\s]{2,}$").expect("hotel pattern"));
static ROOM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-\s]+$").expect("room pattern"));

/// Guest form fields, in form order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Phone,
    Nationality,
    HotelName,
    RoomNumber,
    Notes,
}

impl FieldId {
    pub const FORM_ORDER: [FieldId; 8] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Nationality,
        FieldId::HotelName,
        FieldId::RoomNumber,
        FieldId::Notes,
    ];

    pub const REQUIRED: [FieldId; 4] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::HotelName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Nationality => "nationality",
            FieldId::HotelName => "hotelName",
            FieldId::RoomNumber => "roomNumber",
            FieldId::Notes => "notes",
        }
    }

    /// Free-text fields are not focus targets and are not restored through
    /// the validator
    pub fn is_free_text(&self) -> bool {
        matches!(self, FieldId::Notes)
    }
}

impl FromStr for FieldId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::FORM_ORDER
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl FieldState {
    fn from_check(ok: bool) -> Self {
        if ok {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }
}

pub fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value.trim())
}

pub fn is_valid_hotel(value: &str) -> bool {
    HOTEL_PATTERN.is_match(value.trim())
}

pub fn is_valid_room(value: &str) -> bool {
    ROOM_PATTERN.is_match(value.trim())
}

/// Pure per-field predicate
pub fn validate_field(field: FieldId, value: &str) -> FieldState {
    let trimmed = value.trim();
    match field {
        FieldId::FirstName | FieldId::LastName => FieldState::from_check(is_valid_name(trimmed)),
        FieldId::Email => FieldState::from_check(is_valid_email(trimmed)),
        FieldId::HotelName => FieldState::from_check(is_valid_hotel(trimmed)),
        FieldId::Phone if trimmed.is_empty() => FieldState::Neutral,
        FieldId::Phone => FieldState::from_check(is_valid_phone(trimmed)),
        FieldId::RoomNumber if trimmed.is_empty() => FieldState::Neutral,
        FieldId::RoomNumber => FieldState::from_check(is_valid_room(trimmed)),
        FieldId::Nationality if trimmed.is_empty() => FieldState::Neutral,
        FieldId::Nationality => FieldState::Valid,
        FieldId::Notes => FieldState::Valid,
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ready,
    Blocked { focus: Option<FieldId> },
}

/// Guest form values and their validation states
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    values: HashMap<FieldId, String>,
    states: HashMap<FieldId, FieldState>,
    pub save_info: bool,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn state(&self, field: FieldId) -> FieldState {
        self.states.get(&field).copied().unwrap_or_default()
    }

    /// Input event: store the raw value and re-run the field's predicate
    pub fn input(&mut self, field: FieldId, value: &str) -> FieldState {
        self.values.insert(field, value.to_string());
        self.revalidate(field)
    }

    /// Blur/change event: re-run the predicate on the stored value
    pub fn revalidate(&mut self, field: FieldId) -> FieldState {
        let state = validate_field(field, self.value(field));
        self.states.insert(field, state);
        state
    }

    /// First field in form order currently marked invalid
    pub fn first_invalid(&self) -> Option<FieldId> {
        FieldId::FORM_ORDER
            .iter()
            .filter(|f| !f.is_free_text())
            .find(|f| self.state(**f) == FieldState::Invalid)
            .copied()
    }

    /// Validates every monitored field; only the required ones decide
    /// the outcome
    pub fn submit(&mut self) -> SubmitOutcome {
        for field in FieldId::FORM_ORDER.iter().filter(|f| !f.is_free_text()) {
            self.revalidate(*field);
        }
        self.outcome()
    }

    /// Validates the required fields only
    pub fn check_required(&mut self) -> SubmitOutcome {
        for field in FieldId::REQUIRED {
            self.revalidate(field);
        }
        self.outcome()
    }

    pub fn ensure_required(&mut self) -> CoreResult<()> {
        match self.check_required() {
            SubmitOutcome::Ready => Ok(()),
            SubmitOutcome::Blocked { .. } => {
                let failing: Vec<&str> = FieldId::REQUIRED
                    .iter()
                    .filter(|f| self.state(**f) != FieldState::Valid)
                    .map(|f| f.as_str())
                    .collect();
                Err(CoreError::ValidationError(failing.join(", ")))
            }
        }
    }

    fn outcome(&self) -> SubmitOutcome {
        let required_ok = FieldId::REQUIRED
            .iter()
            .all(|f| self.state(*f) == FieldState::Valid);

        if required_ok {
            SubmitOutcome::Ready
        } else {
            SubmitOutcome::Blocked {
                focus: self.first_invalid(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert_eq!(validate_field(FieldId::Email, "a@b.co"), FieldState::Valid);
        assert_eq!(validate_field(FieldId::Email, "a@b"), FieldState::Invalid);
        assert_eq!(validate_field(FieldId::Email, ""), FieldState::Invalid);
        assert_eq!(validate_field(FieldId::Email, "  guest@hotel.example  "), FieldState::Valid);
        assert_eq!(validate_field(FieldId::Email, "a b@c.de"), FieldState::Invalid);
    }

    #[test]
    fn test_room_number() {
        assert_eq!(validate_field(FieldId::RoomNumber, ""), FieldState::Neutral);
        assert_eq!(validate_field(FieldId::RoomNumber, "   "), FieldState::Neutral);
        assert_eq!(validate_field(FieldId::RoomNumber, "12 A"), FieldState::Valid);
        assert_eq!(validate_field(FieldId::RoomNumber, "B-4"), FieldState::Valid);
        assert_eq!(validate_field(FieldId::RoomNumber, "#12"), FieldState::Invalid);
    }

    #[test]
    fn test_names_accept_latin_and_arabic() {
        assert_eq!(validate_field(FieldId::FirstName, "Anne-Marie"), FieldState::Valid);
        assert_eq!(validate_field(FieldId::LastName, "أحمد"), FieldState::Valid);
        assert_eq!(validate_field(FieldId::FirstName, "J"), FieldState::Invalid);
        assert_eq!(validate_field(FieldId::FirstName, "R2D2"), FieldState::Invalid);
        assert_eq!(validate_field(FieldId::FirstName, ""), FieldState::Invalid);
    }

    #[test]
    fn test_phone_is_optional() {
        assert_eq!(validate_field(FieldId::Phone, ""), FieldState::Neutral);
        assert_eq!(validate_field(FieldId::Phone, "+201001234567"), FieldState::Valid);
        assert_eq!(validate_field(FieldId::Phone, "123456"), FieldState::Invalid);
        assert_eq!(validate_field(FieldId::Phone, "+20 100 123"), FieldState::Invalid);
    }

    #[test]
    fn test_hotel_and_nationality() {
        assert_eq!(validate_field(FieldId::HotelName, "Steigenberger 2"), FieldState::Valid);
        assert_eq!(validate_field(FieldId::HotelName, "X"), FieldState::Invalid);
        assert_eq!(validate_field(FieldId::HotelName, "Hotel & Spa"), FieldState::Invalid);
        assert_eq!(validate_field(FieldId::Nationality, ""), FieldState::Neutral);
        assert_eq!(validate_field(FieldId::Nationality, "EG"), FieldState::Valid);
    }

    fn filled_form() -> CheckoutForm {
        let mut form = CheckoutForm::new();
        form.input(FieldId::FirstName, "Mona");
        form.input(FieldId::LastName, "Saleh");
        form.input(FieldId::Email, "mona@example.com");
        form.input(FieldId::HotelName, "Sunrise Resort");
        form
    }

    #[test]
    fn test_submit_ready_with_required_fields() {
        let mut form = filled_form();
        assert_eq!(form.submit(), SubmitOutcome::Ready);
        assert_eq!(form.state(FieldId::Phone), FieldState::Neutral);
    }

    #[test]
    fn test_optional_invalid_fields_do_not_block() {
        let mut form = filled_form();
        form.input(FieldId::Phone, "call me");
        form.input(FieldId::RoomNumber, "#7");

        assert_eq!(form.submit(), SubmitOutcome::Ready);
        assert_eq!(form.state(FieldId::Phone), FieldState::Invalid);
        assert_eq!(form.state(FieldId::RoomNumber), FieldState::Invalid);
    }

    #[test]
    fn test_blocked_focuses_first_invalid_in_form_order() {
        let mut form = filled_form();
        form.input(FieldId::Phone, "abc");
        form.input(FieldId::Email, "nope");

        assert_eq!(
            form.submit(),
            SubmitOutcome::Blocked { focus: Some(FieldId::Email) }
        );

        let mut empty = CheckoutForm::new();
        assert_eq!(
            empty.submit(),
            SubmitOutcome::Blocked { focus: Some(FieldId::FirstName) }
        );
    }

    #[test]
    fn test_ensure_required_lists_failures() {
        let mut form = filled_form();
        form.input(FieldId::HotelName, "");
        match form.ensure_required() {
            Err(CoreError::ValidationError(msg)) => assert_eq!(msg, "hotelName"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_field_ids_parse() {
        assert_eq!("roomNumber".parse::<FieldId>().unwrap(), FieldId::RoomNumber);
        assert!("saveInfo".parse::<FieldId>().is_err());
    }
}
