//! Checkout page: guest form, promo summary and payment method.
//!
//! The summary starts from the subtotal the cart left in the session store
//! and re-reads it on every rebuild.

use tracing::{debug, info, warn};

use tourbook_cart::{PromoBook, PromoScope, SummaryBuilder};
use tourbook_core::{
    CheckoutForm, FieldId, GuestRecord, PaymentGateway, PaymentSelection, SubmitOutcome,
};
use tourbook_shared::SummaryView;
use tourbook_store::SessionStore;

use crate::view::ViewUpdate;

pub struct CheckoutController {
    form: CheckoutForm,
    builder: SummaryBuilder,
    promos: PromoBook,
    subtotal: f64,
    discount: f64,
    currency: String,
    payment: PaymentSelection,
    gateway: Box<dyn PaymentGateway>,
    session: SessionStore,
}

impl CheckoutController {
    pub fn new(
        builder: SummaryBuilder,
        promos: PromoBook,
        currency: impl Into<String>,
        payment: PaymentSelection,
        gateway: Box<dyn PaymentGateway>,
        session: SessionStore,
    ) -> Self {
        Self {
            form: CheckoutForm::new(),
            builder,
            promos,
            subtotal: 0.0,
            discount: 0.0,
            currency: currency.into(),
            payment,
            gateway,
            session,
        }
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn payment_method(&self) -> &str {
        self.payment.selected()
    }

    pub fn summary_view(&self) -> SummaryView {
        self.builder.for_subtotal(self.subtotal, self.discount)
    }

    /// Restores saved guest details, then renders the summary
    pub fn init(&mut self) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();

        for (field, value) in self.session.saved_guest_fields() {
            let state = self.form.input(field, &value);
            updates.push(ViewUpdate::FieldValue { field, value });
            if !field.is_free_text() {
                updates.push(ViewUpdate::FieldState { field, state });
            }
        }
        if !updates.is_empty() {
            debug!("Restored saved guest details");
        }

        updates.push(self.rebuild_summary());
        updates
    }

    pub fn input(&mut self, field: FieldId, value: &str) -> Vec<ViewUpdate> {
        let state = self.form.input(field, value);
        vec![ViewUpdate::FieldState { field, state }]
    }

    /// Blur or select change
    pub fn blur(&mut self, field: FieldId) -> Vec<ViewUpdate> {
        let state = self.form.revalidate(field);
        vec![ViewUpdate::FieldState { field, state }]
    }

    pub fn set_save_info(&mut self, save: bool) -> Vec<ViewUpdate> {
        self.form.save_info = save;
        Vec::new()
    }

    pub fn submit(&mut self) -> Vec<ViewUpdate> {
        let outcome = self.form.submit();
        let mut updates = self.field_states(FieldId::FORM_ORDER.iter().filter(|f| !f.is_free_text()));

        match outcome {
            SubmitOutcome::Ready => {
                if self.form.save_info {
                    let saved = self.session.save_guest(&GuestRecord::from_form(&self.form));
                    debug!("Guest details saved: {}", saved);
                }
                updates.push(ViewUpdate::PaymentHighlighted {
                    focus: self.payment.options().first().cloned(),
                });
            }
            SubmitOutcome::Blocked { focus } => {
                debug!("Guest form blocked, focus {:?}", focus);
                updates.extend(focus.map(|field| ViewUpdate::Focus { field }));
            }
        }
        updates
    }

    pub fn apply_promo(&mut self, code: &str) -> Vec<ViewUpdate> {
        self.discount = self
            .promos
            .resolve(code, PromoScope::Checkout, self.subtotal);
        debug!("Checkout discount now {}", self.discount);
        vec![self.rebuild_summary()]
    }

    pub fn select_payment_method(&mut self, method: &str) -> Vec<ViewUpdate> {
        let selected = match self.payment.select(method) {
            Ok(selected) => selected.to_string(),
            Err(e) => {
                warn!("Payment method ignored: {}", e);
                return Vec::new();
            }
        };

        self.session.save_payment_method(&selected);
        vec![ViewUpdate::PaymentMethodSelected { method: selected }]
    }

    /// Re-checks the required fields and redirects to the thank-you page
    pub fn confirm(&mut self) -> Vec<ViewUpdate> {
        if let Err(e) = self.form.ensure_required() {
            info!("Booking not confirmed: {}", e);
            let mut updates = self.field_states(FieldId::REQUIRED.iter());
            updates.extend(self.form.first_invalid().map(|field| ViewUpdate::Focus { field }));
            return updates;
        }

        match self.gateway.confirm(self.payment.selected()) {
            Ok(redirect) => vec![ViewUpdate::Navigate { url: redirect.url }],
            Err(e) => {
                warn!("Confirmation failed: {}", e);
                Vec::new()
            }
        }
    }

    pub fn rebuild_summary(&mut self) -> ViewUpdate {
        if let Some(subtotal) = self.session.cart_subtotal() {
            self.subtotal = subtotal;
        }

        ViewUpdate::Summary {
            scope: PromoScope::Checkout,
            summary: self.summary_view().render(&self.currency),
        }
    }

    fn field_states<'a>(&self, fields: impl Iterator<Item = &'a FieldId>) -> Vec<ViewUpdate> {
        fields
            .map(|field| ViewUpdate::FieldState {
                field: *field,
                state: self.form.state(*field),
            })
            .collect()
    }
}
