//! Roll engine and stats aggregator for the gacha card collector.
//!
//! This crate is the workflow core sitting between the façades (HTTP, chat
//! bot) and the storage layer:
//!
//! - [`RollEngine`] draws a random card, records the roll's effect set
//!   through the store's atomic commit, and reports the outcome.
//! - [`StatsAggregator`] composes the read-side queries into one snapshot.
//!
//! Both operate on an already-resolved user: provisioning is the façade's
//! explicit `ensure_user` step, never a side effect of rolling or reading
//! stats.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod draw;
pub mod roll;
pub mod stats;

pub use draw::{DrawSource, ScriptedDraw, ThreadRngDraw};
pub use roll::{RollConfig, RollEngine, RollOutcome};
pub use stats::{StatsAggregator, StatsSnapshot, RECENT_ROLL_LIMIT};
