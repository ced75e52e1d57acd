use serde::Deserialize;
use std::env;

use tourbook_catalog::{PriceTable, TourProduct};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PriceTable,
    #[serde(default)]
    pub fees: FeeConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub product: TourProduct,
    #[serde(default)]
    pub cart: CartConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeeConfig {
    #[serde(default = "default_service_fee")]
    pub service_fee: f64,
    #[serde(default = "default_cart_discount")]
    pub cart_initial_discount: f64,
    #[serde(default = "default_booking_currency")]
    pub booking_currency: String,
    #[serde(default = "default_summary_currency")]
    pub summary_currency: String,
}

fn default_service_fee() -> f64 { 89.0 }
fn default_cart_discount() -> f64 { 200.0 }
fn default_booking_currency() -> String { "€".to_string() }
fn default_summary_currency() -> String { "$".to_string() }

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            service_fee: default_service_fee(),
            cart_initial_discount: default_cart_discount(),
            booking_currency: default_booking_currency(),
            summary_currency: default_summary_currency(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutConfig {
    #[serde(default = "default_thank_you_url")]
    pub thank_you_url: String,
    #[serde(default = "default_payment_method")]
    pub default_payment_method: String,
    /// Empty accepts any method value the page sends
    #[serde(default)]
    pub payment_methods: Vec<String>,
}

fn default_thank_you_url() -> String { "../est.html".to_string() }
fn default_payment_method() -> String { "link".to_string() }

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            thank_you_url: default_thank_you_url(),
            default_payment_method: default_payment_method(),
            payment_methods: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub redis_url: Option<String>,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String { "tourbook".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            redis_url: None,
            namespace: default_namespace(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CartConfig {
    #[serde(default)]
    pub items: Vec<CartSeed>,
}

/// A cart card as rendered on page load
#[derive(Debug, Deserialize, Clone)]
pub struct CartSeed {
    pub title: String,
    pub price: f64,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    pub date: Option<String>,
    pub time: Option<String>,
    pub language: Option<String>,
    pub participants: Option<String>,
    pub option: Option<String>,
    pub addons: Option<String>,
}

fn default_travelers() -> u32 { 1 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local file, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `TOURBOOK_FEES__SERVICE_FEE=99`
            .add_source(config::Environment::with_prefix("TOURBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.fees.service_fee, 89.0);
        assert_eq!(config.fees.cart_initial_discount, 200.0);
        assert_eq!(config.checkout.thank_you_url, "../est.html");
        assert_eq!(config.checkout.default_payment_method, "link");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.pricing.adult, 17.5);
        assert_eq!(config.product.time_slots.len(), 3);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::from_toml(
            r#"
            [fees]
            service_fee = 99.0

            [storage]
            backend = "redis"
            redis_url = "redis://127.0.0.1/"

            [[cart.items]]
            title = "Orange Bay Island"
            price = 600.0
            travelers = 2
            participants = "2 Adults"
            "#,
        )
        .unwrap();

        assert_eq!(config.fees.service_fee, 99.0);
        assert_eq!(config.fees.summary_currency, "$");
        assert_eq!(config.storage.backend, StorageBackend::Redis);
        assert_eq!(config.cart.items.len(), 1);
        assert_eq!(config.cart.items[0].travelers, 2);
        assert!(config.cart.items[0].date.is_none());
    }
}
