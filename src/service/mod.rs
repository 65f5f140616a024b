pub mod calculator;
pub mod summary;

pub use calculator::{calculate, invoice_number};
pub use summary::{calculate_batch, summarize, BatchOutcome};
