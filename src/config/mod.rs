//! Configuration loading and management for the Party Orchestration Engine.
//!
//! This module provides functionality to load party program configurations
//! from YAML files, including program metadata, the voucher tier table,
//! shipping parameters, and the product catalog.
//!
//! # Example
//!
//! ```no_run
//! use party_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/party").unwrap();
//! println!("Loaded program: {}", config.program().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    PartyConfig, ProductCatalog, ProductInfo, ProgramMetadata, ShippingConfig, VoucherTable,
    VoucherTier, VoucherTiersConfig,
};
