//! Error types for order commitments and typed-data encoding.

use alloy_primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid struct definition: {message}")]
    InvalidStructDefinition { message: String },

    #[error("Duplicate taker asset: {address}")]
    DuplicateAsset { address: Address },

    #[error("Taker asset not found in commitment: {address}")]
    AssetNotFound { address: Address },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Taker asset set is empty")]
    EmptyAssetSet,

    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
