use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Single-select payment method group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSelection {
    options: Vec<String>,
    selected: String,
}

impl PaymentSelection {
    /// An empty option list accepts any method value
    pub fn new(options: Vec<String>, default_method: impl Into<String>) -> Self {
        Self {
            options,
            selected: default_method.into(),
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn select(&mut self, method: &str) -> CoreResult<&str> {
        if !self.options.is_empty() && !self.options.iter().any(|o| o == method) {
            return Err(CoreError::UnknownPaymentMethod(method.to_string()));
        }
        self.selected = method.to_string();
        Ok(&self.selected)
    }

    pub fn is_active(&self, method: &str) -> bool {
        self.selected == method
    }
}

/// Where the browser goes once the booking is confirmed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationRedirect {
    pub url: String,
    pub method: String,
}

/// Confirms a booking for a payment method
pub trait PaymentGateway {
    fn confirm(&self, method: &str) -> CoreResult<ConfirmationRedirect>;
}

/// No processor is contacted: confirmation is a redirect to the thank-you page
pub struct RedirectGateway {
    thank_you_url: String,
}

impl RedirectGateway {
    pub fn new(thank_you_url: impl Into<String>) -> Self {
        Self {
            thank_you_url: thank_you_url.into(),
        }
    }
}

impl PaymentGateway for RedirectGateway {
    fn confirm(&self, method: &str) -> CoreResult<ConfirmationRedirect> {
        tracing::info!("Confirming booking with payment method: {}", method);
        Ok(ConfirmationRedirect {
            url: self.thank_you_url.clone(),
            method: method.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_select() {
        let mut payment = PaymentSelection::new(
            vec!["link".to_string(), "card".to_string(), "cash".to_string()],
            "link",
        );
        assert!(payment.is_active("link"));

        payment.select("card").unwrap();
        assert!(payment.is_active("card"));
        assert!(!payment.is_active("link"));

        assert!(payment.select("bitcoin").is_err());
        assert_eq!(payment.selected(), "card");
    }

    #[test]
    fn test_open_option_list_accepts_anything() {
        let mut payment = PaymentSelection::new(Vec::new(), "link");
        assert_eq!(payment.select("paypal").unwrap(), "paypal");
    }

    #[test]
    fn test_redirect_gateway() {
        let gateway = RedirectGateway::new("../est.html");
        let redirect = gateway.confirm("card").unwrap();
        assert_eq!(redirect.url, "../est.html");
        assert_eq!(redirect.method, "card");
    }
}
