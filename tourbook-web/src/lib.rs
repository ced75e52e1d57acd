pub mod booking;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod events;
pub mod state;
pub mod view;

pub use booking::BookingOptionsController;
pub use cart::CartController;
pub use checkout::CheckoutController;
pub use error::{WebError, WebResult};
pub use events::PageEvent;
pub use state::AppState;
pub use view::ViewUpdate;
