//! Limit order models and their fill payloads.

pub mod fill;
pub mod order;

pub use fill::*;
pub use order::*;
