use serde::{Deserialize, Serialize};
use tourbook_shared::Masked;

use crate::validation::{CheckoutForm, FieldId};
use crate::{CoreError, CoreResult};

/// Guest details saved when "save my info" is ticked on submit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub nationality: String,
    pub hotel_name: String,
    pub room_number: String,
    pub notes: String,
}

impl GuestRecord {
    /// Snapshot of the form with every value trimmed
    pub fn from_form(form: &CheckoutForm) -> Self {
        let get = |field| form.value(field).trim().to_string();
        Self {
            first_name: get(FieldId::FirstName),
            last_name: get(FieldId::LastName),
            email: Masked(get(FieldId::Email)),
            phone: Masked(get(FieldId::Phone)),
            nationality: get(FieldId::Nationality),
            hotel_name: get(FieldId::HotelName),
            room_number: get(FieldId::RoomNumber),
            notes: get(FieldId::Notes),
        }
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads a saved record leniently: every key that holds a string is
    /// returned in form order, anything else is skipped.
    pub fn saved_fields(raw: &str) -> CoreResult<Vec<(FieldId, String)>> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let object = value
            .as_object()
            .ok_or_else(|| CoreError::MalformedRecord("expected a JSON object".to_string()))?;

        Ok(FieldId::FORM_ORDER
            .iter()
            .filter_map(|field| {
                object
                    .get(field.as_str())
                    .and_then(|v| v.as_str())
                    .map(|s| (*field, s.to_string()))
            })
            .collect())
    }
}
