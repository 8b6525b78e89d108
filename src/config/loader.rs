//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading discount
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::calculation::DiscountEngine;
use crate::error::{EngineError, EngineResult};

use super::types::{DiscountConfig, DiscountRule};

/// Loads and provides access to discount configuration.
///
/// # File Format
///
/// ```text
/// discount_rate: "0.1"
/// min_purchase_amount: "50"
/// adjustments:            # optional
///   premium_electronics: "325"
///   prime: "15"
/// rules:                  # optional, applied in order
///   - rule: seasonal
///     season: holiday
///     rate: "0.2"
/// ```
///
/// # Example
///
/// ```no_run
/// use discount_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/discounts.yaml")?;
/// let engine = loader.engine()?;
/// println!("Default rate: {}", engine.discount_rate());
/// # Ok::<(), discount_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: DiscountConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// Returns an error if the file is missing, holds invalid YAML, or
    /// fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// `source` names the text's origin in error messages.
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: DiscountConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        if let Err(error) = config.validate() {
            warn!(source, %error, "Discount configuration rejected");
            return Err(error);
        }

        debug!(source, rules = config.rules.len(), "Discount configuration loaded");
        Ok(Self { config })
    }

    /// Returns the underlying discount configuration.
    pub fn config(&self) -> &DiscountConfig {
        &self.config
    }

    /// Returns the configured rule sequence.
    pub fn rules(&self) -> &[DiscountRule] {
        &self.config.rules
    }

    /// Builds an engine from the configuration.
    pub fn engine(&self) -> EngineResult<DiscountEngine> {
        DiscountEngine::from_config(&self.config)
    }
}
