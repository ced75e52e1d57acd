use std::rc::Rc;
use tracing::info;

use tourbook_cart::{CardDetails, Cart, CartLineItem, PromoBook, SummaryBuilder};
use tourbook_catalog::{BookingWindow, PricingEngine};
use tourbook_core::{PaymentSelection, RedirectGateway};
use tourbook_store::app_config::{CartSeed, Config, StorageBackend, StorageConfig};
use tourbook_store::{KeyValueStore, MemoryStore, RedisStore, SessionStore};

use crate::booking::BookingOptionsController;
use crate::cart::CartController;
use crate::checkout::CheckoutController;
use crate::error::{WebError, WebResult};
use crate::events::PageEvent;
use crate::view::ViewUpdate;

/// The three page controllers, sharing one session store
pub struct AppState {
    pub booking: BookingOptionsController,
    pub cart: CartController,
    pub checkout: CheckoutController,
}

impl AppState {
    pub fn from_config(config: &Config, store: Rc<dyn KeyValueStore>) -> Self {
        Self::with_window(config, store, BookingWindow::from_today())
    }

    pub fn with_window(config: &Config, store: Rc<dyn KeyValueStore>, window: BookingWindow) -> Self {
        let session = SessionStore::new(store);
        let fees = &config.fees;

        let booking = BookingOptionsController::new(
            config.product.clone(),
            PricingEngine::new(config.pricing.clone()),
            window,
            fees.booking_currency.clone(),
        );

        let cart = CartController::new(
            Cart::new(config.cart.items.iter().map(seed_item).collect()),
            SummaryBuilder::cart(fees.service_fee),
            PromoBook::standard(),
            fees.cart_initial_discount,
            fees.summary_currency.clone(),
            session.clone(),
        );

        let checkout = CheckoutController::new(
            SummaryBuilder::checkout(fees.service_fee),
            PromoBook::standard(),
            fees.summary_currency.clone(),
            PaymentSelection::new(
                config.checkout.payment_methods.clone(),
                config.checkout.default_payment_method.clone(),
            ),
            Box::new(RedirectGateway::new(config.checkout.thank_you_url.clone())),
            session,
        );

        Self { booking, cart, checkout }
    }

    /// Page load for all three controllers. The cart renders first so
    /// checkout sees its subtotal.
    pub fn init(&mut self) -> Vec<ViewUpdate> {
        let mut updates = self.booking.init();
        updates.extend(self.cart.init());
        updates.extend(self.checkout.init());
        updates
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Vec<ViewUpdate> {
        match event {
            PageEvent::SetDate { date } => self.booking.set_date(date),
            PageEvent::SelectTime { time } => self.booking.select_time(&time),
            PageEvent::SelectLanguage { language } => self.booking.select_language(&language),
            PageEvent::SelectOption { option } => self.booking.select_option(&option),
            PageEvent::ToggleDetails { option } => self.booking.toggle_details(&option),
            PageEvent::ToggleStep { step } => self.booking.toggle_step(step),
            PageEvent::Increment { kind } => self.booking.increment(kind),
            PageEvent::Decrement { kind } => self.booking.decrement(kind),
            PageEvent::SetParticipants { kind, value } => self.booking.set_participants(kind, value),
            PageEvent::SetAddonQty { name, qty } => self.booking.set_addon_qty(&name, qty),
            PageEvent::IncrementAddon { name } => self.booking.increment_addon(&name),
            PageEvent::DecrementAddon { name } => self.booking.decrement_addon(&name),
            PageEvent::CloseModal => {
                if self.cart.editing().is_some() {
                    self.cart.close_edit()
                } else {
                    self.booking.close_modal()
                }
            }
            PageEvent::EditCard { card } => self.cart.open_edit(card, &mut self.booking),
            PageEvent::SaveEdits => self.cart.save_edits(&self.booking),
            PageEvent::DeleteCard { card } => self.cart.delete(card),
            PageEvent::CartPromo { code } => self.cart.apply_promo(&code),
            PageEvent::FieldInput { field, value } => self.checkout.input(field, &value),
            PageEvent::FieldBlur { field } => self.checkout.blur(field),
            PageEvent::SaveInfo { checked } => self.checkout.set_save_info(checked),
            PageEvent::SubmitGuest => self.checkout.submit(),
            PageEvent::CheckoutPromo { code } => self.checkout.apply_promo(&code),
            PageEvent::SelectPayment { method } => self.checkout.select_payment_method(&method),
            PageEvent::ConfirmBooking => self.checkout.confirm(),
        }
    }
}

/// Opens the configured session backend
pub fn open_store(config: &StorageConfig) -> WebResult<Rc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory session store");
            Ok(Rc::new(MemoryStore::new()))
        }
        StorageBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or(WebError::MissingRedisUrl)?;
            info!("Using Redis session store at {}", url);
            let store = RedisStore::new(url, &config.namespace)
                .map_err(tourbook_store::StoreError::from)?;
            Ok(Rc::new(store))
        }
    }
}

/// A cart card as configured for page load
pub fn seed_item(seed: &CartSeed) -> CartLineItem {
    CartLineItem::new(seed.title.clone(), seed.price, seed.travelers).with_details(CardDetails {
        date: seed.date.clone(),
        time: seed.time.clone(),
        language: seed.language.clone(),
        participants_line: seed.participants.clone(),
        option_title: seed.option.clone(),
        addons_line: seed.addons.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_item_keeps_card_lines() {
        let seed = CartSeed {
            title: "Orange Bay Island".to_string(),
            price: 600.0,
            travelers: 0,
            date: Some("Tue, Mar 4, 2025".to_string()),
            time: None,
            language: None,
            participants: Some("1 Adult".to_string()),
            option: None,
            addons: None,
        };

        let item = seed_item(&seed);
        assert_eq!(item.travelers, 1);
        assert_eq!(item.details.date.as_deref(), Some("Tue, Mar 4, 2025"));
        assert!(item.details.time.is_none());
    }

    #[test]
    fn test_redis_backend_needs_url() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            redis_url: None,
            namespace: "tourbook".to_string(),
        };
        assert!(matches!(open_store(&config), Err(WebError::MissingRedisUrl)));
    }

    #[test]
    fn test_close_modal_clears_cart_edit() {
        let mut config = Config::default();
        config.cart.items.push(CartSeed {
            title: "Desert Safari".to_string(),
            price: 135.0,
            travelers: 1,
            date: None,
            time: None,
            language: None,
            participants: None,
            option: None,
            addons: None,
        });
        let mut state = AppState::from_config(&config, Rc::new(MemoryStore::new()));
        let card = state.cart.items()[0].id;

        state.dispatch(PageEvent::EditCard { card });
        assert_eq!(state.cart.editing(), Some(card));

        let updates = state.dispatch(PageEvent::CloseModal);
        assert_eq!(updates, vec![ViewUpdate::ModalClosed]);
        assert_eq!(state.cart.editing(), None);
    }
}
