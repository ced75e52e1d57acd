use tracing::{debug, warn};
use uuid::Uuid;

use tourbook_cart::edit::apply_snapshot;
use tourbook_cart::{Cart, CardParser, CartError, CartLineItem, PromoBook, PromoScope, SummaryBuilder};
use tourbook_shared::SummaryView;
use tourbook_store::SessionStore;

use crate::booking::BookingOptionsController;
use crate::view::ViewUpdate;

/// Cart page: the cards, their order summary and the edit bridge into the
/// booking modal
pub struct CartController {
    cart: Cart,
    builder: SummaryBuilder,
    promos: PromoBook,
    discount: f64,
    currency: String,
    session: SessionStore,
    editing: Option<Uuid>,
}

impl CartController {
    pub fn new(
        cart: Cart,
        builder: SummaryBuilder,
        promos: PromoBook,
        initial_discount: f64,
        currency: impl Into<String>,
        session: SessionStore,
    ) -> Self {
        Self {
            cart,
            builder,
            promos,
            discount: initial_discount,
            currency: currency.into(),
            session,
            editing: None,
        }
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn summary_view(&self) -> SummaryView {
        self.builder.for_items(self.cart.items(), self.discount)
    }

    pub fn init(&mut self) -> Vec<ViewUpdate> {
        vec![self.rebuild_summary()]
    }

    /// Opens the booking modal for a card and pre-fills it from the card text
    pub fn open_edit(&mut self, card: Uuid, booking: &mut BookingOptionsController) -> Vec<ViewUpdate> {
        let plan = match self.cart.get(&card) {
            Ok(item) => CardParser::new(booking.product()).parse(&item.details),
            Err(e) => return self.ignore(e),
        };

        self.editing = Some(card);
        debug!("Editing card {}: {:?}", card, plan);

        let mut updates = vec![ViewUpdate::ModalOpened { card }];
        updates.extend(booking.apply_prefill(&plan));
        updates
    }

    /// Writes the modal's choices into the card being edited
    pub fn save_edits(&mut self, booking: &BookingOptionsController) -> Vec<ViewUpdate> {
        let Some(card) = self.editing else {
            debug!("Save pressed with no card being edited");
            return Vec::new();
        };

        let snapshot = booking.snapshot();
        let updated = match self.cart.get_mut(&card) {
            Ok(item) => {
                apply_snapshot(item, &snapshot);
                item.clone()
            }
            Err(e) => {
                self.editing = None;
                let mut updates = self.ignore(e);
                updates.push(ViewUpdate::ModalClosed);
                return updates;
            }
        };
        debug!("Card {} now has {} travelers", card, updated.travelers);

        let mut updates = vec![ViewUpdate::CardUpdated { card: updated }];
        updates.push(self.rebuild_summary());
        updates.extend(self.close_edit());
        updates
    }

    pub fn close_edit(&mut self) -> Vec<ViewUpdate> {
        self.editing = None;
        vec![ViewUpdate::ModalClosed]
    }

    pub fn delete(&mut self, card: Uuid) -> Vec<ViewUpdate> {
        if let Err(e) = self.cart.remove(&card) {
            return self.ignore(e);
        }
        if self.editing == Some(card) {
            self.editing = None;
        }

        vec![ViewUpdate::CardRemoved { card }, self.rebuild_summary()]
    }

    pub fn apply_promo(&mut self, code: &str) -> Vec<ViewUpdate> {
        self.discount = self
            .promos
            .resolve(code, PromoScope::Cart, self.cart.subtotal());
        debug!("Cart discount now {}", self.discount);
        vec![self.rebuild_summary()]
    }

    /// Renders the summary and hands the subtotal to checkout
    pub fn rebuild_summary(&mut self) -> ViewUpdate {
        let view = self.summary_view();
        self.session.save_cart_subtotal(view.subtotal);

        ViewUpdate::Summary {
            scope: PromoScope::Cart,
            summary: view.render(&self.currency),
        }
    }

    fn ignore(&self, error: CartError) -> Vec<ViewUpdate> {
        warn!("Cart action ignored: {}", error);
        Vec::new()
    }
}
