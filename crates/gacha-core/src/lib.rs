//! Core types for the gacha card collector.
//!
//! This crate provides the foundational types used throughout the platform:
//!
//! - **Identifiers**: `UserId`, `CardId`, `CollectionId`, `TransactionId`
//! - **Catalog**: `Card`
//! - **Players**: `User`
//! - **Roll log**: `RollTransaction`, `CollectionItem`
//! - **Currency**: `CoinTransaction`
//!
//! # Coins
//!
//! Coins are an integer counter credited when a roll lands a card the
//! collection already holds. The balance on a `User` always equals the sum
//! of `CoinTransaction` amounts paid to that user.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod card;
pub mod coins;
pub mod error;
pub mod ids;
pub mod roll;
pub mod user;

pub use card::Card;
pub use coins::{CoinTransaction, DEFAULT_DUPLICATE_REWARD, REWARD_PAYOR};
pub use error::{GachaError, Result};
pub use ids::{CardId, CollectionId, IdError, TransactionId, UserId};
pub use roll::{CollectionItem, RollTransaction};
pub use user::User;
