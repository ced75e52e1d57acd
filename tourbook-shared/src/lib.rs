pub mod models;
pub mod money;
pub mod pii;

pub use models::summary::{LineKind, RenderedLine, RenderedSummary, SummaryLine, SummaryView};
pub use pii::Masked;
