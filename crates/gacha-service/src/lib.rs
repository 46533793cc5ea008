//! Gacha card collector HTTP API service.
//!
//! This crate wires the roll engine and stats aggregator to an HTTP
//! surface:
//!
//! - User lookup and explicit provisioning
//! - Rollable catalog reads
//! - Roll execution and roll-transaction recording
//! - Collection and transaction history queries
//! - Per-user stats snapshots

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Axum handlers all return Result and are documented at the route table.
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
