//! Discount Engine for shopping carts
//!
//! This crate provides percentage-off, bulk, seasonal, category, flash sale
//! and loyalty discount rules that reprice carts in place and record an
//! audit trail of every decision.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
