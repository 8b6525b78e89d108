//! Core data models for the Discount Engine.
//!
//! This module contains the cart abstraction, line items and the audit
//! records produced by discount rules.

mod audit;
mod cart;
mod line_item;

pub use audit::{AuditStep, AuditTrace};
pub use cart::{Cart, ShoppingCart, UserType};
pub use line_item::{ItemId, LineItem};
