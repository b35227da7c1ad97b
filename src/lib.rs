//! Limit Order Kit
//!
//! This is the root crate that provides benchmark and integration test access
//! to the workspace. For actual functionality, use the individual crates
//! directly:
//!
//! - `order-core`: Type hashes, taker-asset commitments, Merkle proofs,
//!   order models and EIP-712 digests
//! - `order-tool`: Diagnostic CLI over `order-core`

// Re-export for benchmarks
pub use order_core as core;
