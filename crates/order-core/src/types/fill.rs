//! Fill request payloads submitted to the settlement contract.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use super::order::{MultiAssetOrderData, NormalOrder};
use crate::commitment::{proof::verify_hashes, TakerAsset};
use crate::signing::SplitSignature;

/// Arguments of a normal order fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalFillRequest {
    pub order: NormalOrder,
    pub signature: SplitSignature,
    pub fill_amount: U256,
}

/// Arguments of a multi-asset order fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiAssetFillRequest {
    pub order: MultiAssetOrderData,
    pub signature: SplitSignature,
    /// Taker asset chosen for this fill.
    pub fill_token: Address,
    pub fill_amount: U256,
    /// Amount of `fill_token` committed in the order.
    pub fill_token_order_amount: U256,
    /// Sibling hashes from the fill token's leaf to the root.
    pub proof: Vec<B256>,
}

impl MultiAssetFillRequest {
    /// Re-run the contract's inclusion check against the signed root.
    pub fn proof_is_valid(&self) -> bool {
        let leaf = TakerAsset::new(self.fill_token, self.fill_token_order_amount).leaf_hash();
        verify_hashes(self.order.taker_asset_mix_hash, leaf, &self.proof)
    }
}
