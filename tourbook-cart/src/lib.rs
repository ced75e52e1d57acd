pub mod edit;
pub mod manager;
pub mod models;
pub mod promo;
pub mod summary;

pub use edit::{CardParser, ModalSnapshot, PrefillPlan};
pub use manager::{Cart, CartError, CartResult};
pub use models::{CardDetails, CartLineItem};
pub use promo::{PromoBook, PromoEffect, PromoRule, PromoScope};
pub use summary::{SummaryBuilder, TotalPolicy};
