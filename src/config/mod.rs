//! Configuration loading and management for the Discount Engine.
//!
//! This module provides functionality to load the default discount rate,
//! minimum purchase amount, member adjustments and an ordered rule list
//! from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use discount_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/discounts.yaml").unwrap();
//! println!("Configured rules: {}", loader.rules().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Adjustments, DiscountConfig, DiscountRule};
