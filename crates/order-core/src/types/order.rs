//! Normal and multi-asset limit orders.
//!
//! Orders are immutable once created. A multi-asset order keeps its taker
//! asset list and Merkle tree next to the signed struct so proofs can be
//! served at fill time without rebuilding anything; only the tree root is
//! part of the signed data.

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fill::{MultiAssetFillRequest, NormalFillRequest};
use crate::commitment::{proof::MerkleProof, AssetCommitment, TakerAsset};
use crate::signing::{Eip712Struct, OrderStruct, SplitSignature, TypedValue};
use crate::{Error, Result};

/// Taker value meaning "anyone may fill".
pub const ANY_TAKER: Address = Address::ZERO;

/// Seconds added to the creation time when no expiry is given.
pub const DEFAULT_EXPIRY_WINDOW_SECS: u64 = 500;

fn default_expiry(now: DateTime<Utc>) -> U256 {
    let now_secs = u64::try_from(now.timestamp()).unwrap_or_default();
    U256::from(now_secs + DEFAULT_EXPIRY_WINDOW_SECS)
}

fn ensure_fillable(fill_amount: U256, available: U256) -> Result<()> {
    if fill_amount.is_zero() {
        return Err(Error::InvalidAmount {
            message: "fill amount must be positive".to_string(),
        });
    }
    if fill_amount > available {
        return Err(Error::InvalidAmount {
            message: format!(
                "fill amount {} exceeds order amount {}",
                fill_amount, available
            ),
        });
    }
    Ok(())
}

/// Inputs for a [`NormalOrder`].
#[derive(Debug, Clone, Default)]
pub struct NormalOrderParams {
    pub maker: Address,
    /// Restrict the order to one taker; `None` allows any taker.
    pub taker: Option<Address>,
    pub maker_token: Address,
    pub taker_token: Address,
    pub maker_amount: U256,
    pub taker_amount: U256,
    /// Unix timestamp; `None` defaults to creation time plus the grace window.
    pub expiry: Option<U256>,
}

/// A single maker asset offered for a single taker asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalOrder {
    maker: Address,
    taker: Address,
    maker_token: Address,
    taker_token: Address,
    maker_amount: U256,
    taker_amount: U256,
    expiry: U256,
}

impl NormalOrder {
    /// Create an order, filling defaults relative to the current time.
    pub fn create(params: NormalOrderParams) -> Self {
        Self::create_at(params, Utc::now())
    }

    /// Create an order, filling defaults relative to `now`.
    pub fn create_at(params: NormalOrderParams, now: DateTime<Utc>) -> Self {
        Self {
            maker: params.maker,
            taker: params.taker.unwrap_or(ANY_TAKER),
            maker_token: params.maker_token,
            taker_token: params.taker_token,
            maker_amount: params.maker_amount,
            taker_amount: params.taker_amount,
            expiry: params.expiry.unwrap_or_else(|| default_expiry(now)),
        }
    }

    pub fn maker(&self) -> Address {
        self.maker
    }

    pub fn taker(&self) -> Address {
        self.taker
    }

    pub fn maker_token(&self) -> Address {
        self.maker_token
    }

    pub fn taker_token(&self) -> Address {
        self.taker_token
    }

    pub fn maker_amount(&self) -> U256 {
        self.maker_amount
    }

    pub fn taker_amount(&self) -> U256 {
        self.taker_amount
    }

    pub fn expiry(&self) -> U256 {
        self.expiry
    }

    /// Build the payload for filling `fill_amount` of the taker token.
    pub fn fill_request(
        &self,
        signature: SplitSignature,
        fill_amount: U256,
    ) -> Result<NormalFillRequest> {
        ensure_fillable(fill_amount, self.taker_amount)?;
        Ok(NormalFillRequest {
            order: *self,
            signature,
            fill_amount,
        })
    }
}

impl Eip712Struct for NormalOrder {
    const STRUCT: OrderStruct = OrderStruct::Normal;

    fn field_values(&self) -> Vec<TypedValue> {
        vec![
            TypedValue::Address(self.maker),
            TypedValue::Address(self.taker),
            TypedValue::Address(self.maker_token),
            TypedValue::Address(self.taker_token),
            TypedValue::Uint(self.maker_amount),
            TypedValue::Uint(self.taker_amount),
            TypedValue::Uint(self.expiry),
        ]
    }
}

/// Inputs for a [`MultiAssetOrder`], apart from the taker assets.
#[derive(Debug, Clone, Default)]
pub struct MultiAssetOrderParams {
    pub maker: Address,
    /// Restrict the order to one taker; `None` allows any taker.
    pub taker: Option<Address>,
    pub maker_token: Address,
    pub maker_amount: U256,
    /// Unix timestamp; `None` defaults to creation time plus the grace window.
    pub expiry: Option<U256>,
}

/// The signed part of a multi-asset order.
///
/// This is also the shape the settlement contract receives in a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiAssetOrderData {
    pub maker: Address,
    pub taker: Address,
    pub maker_token: Address,
    pub maker_amount: U256,
    pub taker_asset_mix_hash: B256,
    pub expiry: U256,
}

impl Eip712Struct for MultiAssetOrderData {
    const STRUCT: OrderStruct = OrderStruct::MultiAsset;

    fn field_values(&self) -> Vec<TypedValue> {
        vec![
            TypedValue::Address(self.maker),
            TypedValue::Address(self.taker),
            TypedValue::Address(self.maker_token),
            TypedValue::Uint(self.maker_amount),
            TypedValue::Bytes32(self.taker_asset_mix_hash),
            TypedValue::Uint(self.expiry),
        ]
    }
}

/// A single maker asset offered for any one of several taker assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiAssetOrder {
    data: MultiAssetOrderData,
    commitment: AssetCommitment,
}

impl MultiAssetOrder {
    /// Create an order over `assets`, filling defaults relative to the current time.
    pub fn create(
        params: MultiAssetOrderParams,
        assets: impl IntoIterator<Item = TakerAsset>,
    ) -> Result<Self> {
        Self::create_at(params, assets, Utc::now())
    }

    /// Create an order over `assets`, filling defaults relative to `now`.
    ///
    /// Fails if the asset set is empty or names a token twice.
    pub fn create_at(
        params: MultiAssetOrderParams,
        assets: impl IntoIterator<Item = TakerAsset>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let commitment = AssetCommitment::build(assets)?;

        let data = MultiAssetOrderData {
            maker: params.maker,
            taker: params.taker.unwrap_or(ANY_TAKER),
            maker_token: params.maker_token,
            maker_amount: params.maker_amount,
            taker_asset_mix_hash: commitment.root(),
            expiry: params.expiry.unwrap_or_else(|| default_expiry(now)),
        };

        debug!(
            maker = %data.maker,
            taker_assets = commitment.len(),
            mix_hash = %data.taker_asset_mix_hash,
            "Created multi-asset order"
        );

        Ok(Self { data, commitment })
    }

    /// The signed struct.
    pub fn data(&self) -> &MultiAssetOrderData {
        &self.data
    }

    pub fn maker(&self) -> Address {
        self.data.maker
    }

    pub fn taker(&self) -> Address {
        self.data.taker
    }

    pub fn maker_token(&self) -> Address {
        self.data.maker_token
    }

    pub fn maker_amount(&self) -> U256 {
        self.data.maker_amount
    }

    pub fn expiry(&self) -> U256 {
        self.data.expiry
    }

    /// Commitment root over the taker assets.
    pub fn taker_asset_mix_hash(&self) -> B256 {
        self.data.taker_asset_mix_hash
    }

    /// Taker assets in commitment order.
    pub fn taker_assets(&self) -> &[TakerAsset] {
        self.commitment.assets()
    }

    pub fn commitment(&self) -> &AssetCommitment {
        &self.commitment
    }

    /// Inclusion proof for the taker asset at `address`.
    pub fn get_taker_asset_proof(&self, address: Address) -> Result<MerkleProof> {
        self.commitment.proof(address)
    }

    /// Build the payload for filling `fill_amount` of `fill_token`.
    ///
    /// The committed amount and the proof are taken from this order's
    /// commitment.
    pub fn fill_request(
        &self,
        signature: SplitSignature,
        fill_token: Address,
        fill_amount: U256,
    ) -> Result<MultiAssetFillRequest> {
        let committed = self
            .commitment
            .asset(fill_token)
            .ok_or(Error::AssetNotFound {
                address: fill_token,
            })?;
        ensure_fillable(fill_amount, committed.amount)?;

        let proof = self.get_taker_asset_proof(fill_token)?;

        Ok(MultiAssetFillRequest {
            order: self.data,
            signature,
            fill_token,
            fill_amount,
            fill_token_order_amount: committed.amount,
            proof: proof.hashes(),
        })
    }
}

impl Eip712Struct for MultiAssetOrder {
    const STRUCT: OrderStruct = OrderStruct::MultiAsset;

    fn field_values(&self) -> Vec<TypedValue> {
        self.data.field_values()
    }
}
