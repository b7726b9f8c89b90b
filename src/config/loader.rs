//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading party program
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    PartyConfig, ProductCatalog, ProgramMetadata, ShippingConfig, VoucherTable,
    VoucherTiersConfig,
};

/// Loads and provides access to party program configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides access to the program metadata, voucher tier table,
/// shipping parameters, and product catalog.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/party/
/// ├── program.yaml        # Program metadata
/// ├── voucher_tiers.yaml  # Host voucher tier table
/// ├── shipping.yaml       # Free threshold and flat fee
/// └── products.yaml       # Product catalog attributes
/// ```
///
/// # Example
///
/// ```no_run
/// use party_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/party").unwrap();
/// println!("Program: {}", loader.program().name);
/// println!("Free shipping from: {}", loader.config().shipping().free_threshold);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PartyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/party")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The voucher tier table or shipping parameters fail validation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use party_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/party")?;
    /// # Ok::<(), party_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load program.yaml
        let program_path = path.join("program.yaml");
        let metadata = Self::load_yaml::<ProgramMetadata>(&program_path)?;

        // Load voucher_tiers.yaml and validate the table
        let tiers_path = path.join("voucher_tiers.yaml");
        let tiers_config = Self::load_yaml::<VoucherTiersConfig>(&tiers_path)?;
        let voucher_table = VoucherTable::new(tiers_config.tiers)?;

        // Load shipping.yaml and validate thresholds
        let shipping_path = path.join("shipping.yaml");
        let shipping = Self::load_yaml::<ShippingConfig>(&shipping_path)?;
        shipping.validate()?;

        // Load products.yaml
        let products_path = path.join("products.yaml");
        let catalog = Self::load_yaml::<ProductCatalog>(&products_path)?;

        let config = PartyConfig::new(metadata, voucher_table, shipping, catalog);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying party configuration.
    pub fn config(&self) -> &PartyConfig {
        &self.config
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        self.config.program()
    }
}
