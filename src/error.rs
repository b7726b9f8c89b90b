//! Error types for the Party Orchestration Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during party order orchestration.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Party Orchestration Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use party_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The voucher tier table was empty, negative, or not monotonic.
    #[error("Invalid voucher tier table: {message}")]
    InvalidTierTable {
        /// A description of what made the table invalid.
        message: String,
    },

    /// The shipping configuration contained a negative threshold or fee.
    #[error("Invalid shipping configuration: {message}")]
    InvalidShippingConfig {
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// A product code was not found in the catalog.
    #[error("Product not found: {code}")]
    ProductNotFound {
        /// The product code that was not found.
        code: String,
    },

    /// A party document was invalid or contained inconsistent data.
    #[error("Invalid party field '{field}': {message}")]
    InvalidParty {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Orchestration was requested for a party that is already completed.
    #[error("Party '{party_id}' is already completed and has orders")]
    PartyAlreadyCompleted {
        /// The ID of the completed party.
        party_id: String,
    },

    /// The host voucher could not be fully consumed and policy is to block.
    #[error("Host voucher of {voucher_amount} exceeds eligible product value of {eligible_value}")]
    VoucherUnderused {
        /// The voucher amount the host is entitled to.
        voucher_amount: Decimal,
        /// The total value of action-eligible products selected by the host.
        eligible_value: Decimal,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
