//! Configuration types for party orchestration.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, including the validated
//! voucher tier table and shipping parameters.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Metadata about the party sales program.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramMetadata {
    /// The internal program code (e.g., "FW-PARTY").
    pub code: String,
    /// The human-readable name of the program.
    pub name: String,
    /// The version or effective date of the program rules.
    pub version: String,
    /// The currency all monetary values are denominated in.
    pub currency: String,
}

/// One row of the voucher tier table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VoucherTier {
    /// The minimum presentation revenue to qualify for this tier (inclusive).
    pub minimum_revenue: Decimal,
    /// The voucher amount awarded at this tier.
    pub voucher_amount: Decimal,
}

/// Voucher tiers configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct VoucherTiersConfig {
    /// The tier rows, expected in ascending revenue order.
    pub tiers: Vec<VoucherTier>,
}

/// The validated voucher tier table.
///
/// Construction rejects empty, negative, or non-monotonic tables so the
/// step-function lookup in the calculation layer can never misbehave.
#[derive(Debug, Clone)]
pub struct VoucherTable {
    tiers: Vec<VoucherTier>,
}

impl VoucherTable {
    /// Creates a validated voucher table from tier rows.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTierTable`] if the table is empty,
    /// contains a negative value, or is not non-decreasing in both columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use party_engine::config::{VoucherTable, VoucherTier};
    /// use rust_decimal::Decimal;
    ///
    /// let table = VoucherTable::new(vec![
    ///     VoucherTier { minimum_revenue: Decimal::ZERO, voucher_amount: Decimal::ZERO },
    ///     VoucherTier { minimum_revenue: Decimal::from(350), voucher_amount: Decimal::from(30) },
    /// ]).unwrap();
    /// assert_eq!(table.tiers().len(), 2);
    /// ```
    pub fn new(tiers: Vec<VoucherTier>) -> EngineResult<Self> {
        if tiers.is_empty() {
            return Err(EngineError::InvalidTierTable {
                message: "tier table must not be empty".to_string(),
            });
        }

        for tier in &tiers {
            if tier.minimum_revenue < Decimal::ZERO || tier.voucher_amount < Decimal::ZERO {
                return Err(EngineError::InvalidTierTable {
                    message: format!(
                        "tier ({}, {}) contains a negative value",
                        tier.minimum_revenue, tier.voucher_amount
                    ),
                });
            }
        }

        for pair in tiers.windows(2) {
            if pair[1].minimum_revenue < pair[0].minimum_revenue {
                return Err(EngineError::InvalidTierTable {
                    message: format!(
                        "minimum revenues must be non-decreasing, found {} after {}",
                        pair[1].minimum_revenue, pair[0].minimum_revenue
                    ),
                });
            }
            if pair[1].voucher_amount < pair[0].voucher_amount {
                return Err(EngineError::InvalidTierTable {
                    message: format!(
                        "voucher amounts must be non-decreasing, found {} after {}",
                        pair[1].voucher_amount, pair[0].voucher_amount
                    ),
                });
            }
        }

        Ok(Self { tiers })
    }

    /// Returns the fixed business tier table used when no configuration
    /// overrides it: (0, 0), (350, 30), (600, 60), (850, 95), (1100, 130).
    pub fn standard() -> Self {
        let tiers = [(0, 0), (350, 30), (600, 60), (850, 95), (1100, 130)]
            .into_iter()
            .map(|(minimum, amount)| VoucherTier {
                minimum_revenue: Decimal::from(minimum),
                voucher_amount: Decimal::from(amount),
            })
            .collect();
        // The fixed table is monotonic by construction.
        Self { tiers }
    }

    /// Returns the tier rows in ascending order.
    pub fn tiers(&self) -> &[VoucherTier] {
        &self.tiers
    }
}

/// Shipping allocation parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingConfig {
    /// A shipping group with at least this total ships free (inclusive).
    pub free_threshold: Decimal,
    /// The flat fee split across a paying group's orders.
    pub flat_fee: Decimal,
}

impl ShippingConfig {
    /// Validates that threshold and fee are non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShippingConfig`] on negative values.
    pub fn validate(&self) -> EngineResult<()> {
        if self.free_threshold < Decimal::ZERO {
            return Err(EngineError::InvalidShippingConfig {
                message: format!("free_threshold must not be negative, got {}", self.free_threshold),
            });
        }
        if self.flat_fee < Decimal::ZERO {
            return Err(EngineError::InvalidShippingConfig {
                message: format!("flat_fee must not be negative, got {}", self.flat_fee),
            });
        }
        Ok(())
    }
}

/// Catalog attributes of one product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInfo {
    /// The human-readable product name.
    pub name: String,
    /// Whether the product counts toward the host's action discount.
    #[serde(default)]
    pub action_eligible: bool,
    /// Loyalty points a sales partner earns per unit sold.
    #[serde(default)]
    pub points: u32,
}

/// Product catalog configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCatalog {
    /// Map of product code to catalog attributes.
    pub products: HashMap<String, ProductInfo>,
}

impl ProductCatalog {
    /// Gets a product by its code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProductNotFound`] if the code is unknown.
    pub fn require(&self, code: &str) -> EngineResult<&ProductInfo> {
        self.products
            .get(code)
            .ok_or_else(|| EngineError::ProductNotFound {
                code: code.to_string(),
            })
    }

    /// Returns true if the product exists and is flagged action-eligible.
    ///
    /// Unknown products are treated as not eligible rather than an error,
    /// matching how the selection tables tolerate stale product codes.
    pub fn is_action_eligible(&self, code: &str) -> bool {
        self.products
            .get(code)
            .is_some_and(|product| product.action_eligible)
    }

    /// Returns the loyalty points per unit for a product, 0 if unknown.
    pub fn points_for(&self, code: &str) -> u32 {
        self.products.get(code).map_or(0, |product| product.points)
    }

    /// Returns the display name for a product, falling back to the code.
    pub fn name_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.products
            .get(code)
            .map_or(code, |product| product.name.as_str())
    }
}

/// The complete party program configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a program configuration directory.
#[derive(Debug, Clone)]
pub struct PartyConfig {
    /// Program metadata.
    metadata: ProgramMetadata,
    /// The validated voucher tier table.
    voucher_table: VoucherTable,
    /// Shipping allocation parameters.
    shipping: ShippingConfig,
    /// The product catalog.
    catalog: ProductCatalog,
}

impl PartyConfig {
    /// Creates a new PartyConfig from its component parts.
    pub fn new(
        metadata: ProgramMetadata,
        voucher_table: VoucherTable,
        shipping: ShippingConfig,
        catalog: ProductCatalog,
    ) -> Self {
        Self {
            metadata,
            voucher_table,
            shipping,
            catalog,
        }
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        &self.metadata
    }

    /// Returns the validated voucher tier table.
    pub fn voucher_table(&self) -> &VoucherTable {
        &self.voucher_table
    }

    /// Returns the shipping parameters.
    pub fn shipping(&self) -> &ShippingConfig {
        &self.shipping
    }

    /// Returns the product catalog.
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }
}
