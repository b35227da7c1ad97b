//! EIP-712 signing inputs for limit orders.
//!
//! This module derives struct type hashes, domain separators and the final
//! typed-data digest. Signatures are produced and checked elsewhere; the
//! digest computed here is what both sides must agree on.
//!
//! # Architecture
//!
//! ```text
//! OrderStruct ── type_hash ──┐
//!                            ▼
//! NormalOrder / MultiAssetOrder ── encode ──► SignableTypedData ── digest ──► B256
//!                            ▲                                                 │
//! Eip712Domain ── separator ─┘                                                 ▼
//!                                                             external signer / settlement
//! ```
//!
//! # Example
//!
//! ```ignore
//! use order_core::signing::{encode, Eip712Domain};
//!
//! let domain = Eip712Domain::limit_order_protocol(1, verifying_contract);
//! let typed_data = encode(&order, &domain);
//! let digest = typed_data.digest();
//! ```

pub mod domain;
pub mod signature;
pub mod type_hash;
pub mod typed_data;

pub use domain::{
    Eip712Domain, DEFAULT_CHAIN_ID, DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION, DOMAIN_TYPE_HASH,
};
pub use signature::SplitSignature;
pub use type_hash::{
    type_hash, FieldDef, OrderStruct, StructTypeDef, MULTI_ASSET_ORDER_TYPE_HASH,
    NORMAL_ORDER_TYPE_HASH,
};
pub use typed_data::{digest, encode, typed_data_hash, Eip712Struct, SignableTypedData, TypedValue};
