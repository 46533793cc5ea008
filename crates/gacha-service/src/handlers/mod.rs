//! HTTP request handlers.

pub mod cards;
pub mod collections;
pub mod health;
pub mod rolls;
pub mod stats;
pub mod transactions;
pub mod users;

use serde::Serialize;

/// Envelope for list responses.
///
/// List endpoints wrap their rows so the JSON shape stays extensible
/// without breaking clients.
#[derive(Debug, Serialize)]
pub struct ResultsEnvelope<T> {
    /// The matching rows, in storage order.
    pub results: Vec<T>,
}

impl<T> ResultsEnvelope<T> {
    /// Wrap a row set.
    #[must_use]
    pub fn new(results: Vec<T>) -> Self {
        Self { results }
    }
}
