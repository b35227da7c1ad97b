//! Limit Order Core Library
//!
//! Off-chain commitments for limit orders: EIP-712 type hashes and digests,
//! Merkle commitments over multi-asset taker sets, and the inclusion proofs
//! used to fill those orders.

pub mod commitment;
pub mod config;
pub mod error;
pub mod signing;
pub mod types;

pub use commitment::{
    proof::{get_proof, verify, verify_hashes, MerkleProof, Position, ProofStep},
    taker_asset_mix_hash, AssetCommitment, TakerAsset,
};
pub use error::{Error, Result};
pub use signing::{
    digest, encode, type_hash, Eip712Domain, Eip712Struct, OrderStruct, SignableTypedData,
    SplitSignature, StructTypeDef,
};
pub use types::{
    MultiAssetFillRequest, MultiAssetOrder, MultiAssetOrderParams, NormalFillRequest,
    NormalOrder, NormalOrderParams,
};
