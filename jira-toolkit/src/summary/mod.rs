//! Batch summary types and helpers.

mod batch_summary;
mod result;

pub use batch_summary::BatchSummary;
pub use result::{Marker, TicketOutcome, TicketResult};
