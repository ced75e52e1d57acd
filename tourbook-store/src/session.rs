//! Typed access to the persisted session keys.
//!
//! Storage failures never reach the caller: reads degrade to "nothing saved"
//! and writes are dropped, both with a debug log line.

use regex::Regex;
use std::rc::Rc;
use std::sync::LazyLock;
use tracing::debug;

use crate::kv::KeyValueStore;
use tourbook_core::{FieldId, GuestRecord};

pub const GUEST_RECORD_KEY: &str = "checkoutSaved";
pub const PAYMENT_METHOD_KEY: &str = "paymentMethod";
pub const CART_SUBTOTAL_KEY: &str = "cartSubtotal";

/// Leading decimal number, so `"12abc"` reads as 12
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("number pattern")
});

#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(inner: Rc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.inner.get(key) {
            Ok(value) => value,
            Err(e) => {
                debug!("Session read of {} failed: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> bool {
        match self.inner.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                debug!("Session write of {} failed: {}", key, e);
                false
            }
        }
    }

    /// Saved guest fields that hold strings, in form order
    pub fn saved_guest_fields(&self) -> Vec<(FieldId, String)> {
        let Some(raw) = self.read(GUEST_RECORD_KEY) else {
            return Vec::new();
        };
        GuestRecord::saved_fields(&raw).unwrap_or_else(|e| {
            debug!("Ignoring saved guest record: {}", e);
            Vec::new()
        })
    }

    pub fn save_guest(&self, record: &GuestRecord) -> bool {
        match record.to_json() {
            Ok(json) => self.write(GUEST_RECORD_KEY, &json),
            Err(e) => {
                debug!("Guest record not serialized: {}", e);
                false
            }
        }
    }

    pub fn save_payment_method(&self, method: &str) -> bool {
        self.write(PAYMENT_METHOD_KEY, method)
    }

    /// `None` when nothing usable is stored. Otherwise the leading number
    /// of the stored text; text without one reads as 0.
    pub fn cart_subtotal(&self) -> Option<f64> {
        let raw = self.read(CART_SUBTOTAL_KEY)?;
        if raw.is_empty() {
            return None;
        }
        Some(
            LEADING_NUMBER
                .find(&raw)
                .and_then(|m| m.as_str().trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
        )
    }

    pub fn save_cart_subtotal(&self, subtotal: f64) -> bool {
        self.write(CART_SUBTOTAL_KEY, &subtotal.to_string())
    }
}
