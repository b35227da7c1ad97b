//! Merkle commitments over the taker assets of a multi-asset order.
//!
//! A maker signs only the root of the tree built here. At fill time the taker
//! picks one committed `(token, amount)` pair and submits its inclusion proof.
//!
//! Leaves are `keccak256(token ∥ amount)` with the token packed as 20 bytes
//! and the amount as a 32-byte big-endian word. Leaves are ordered by token
//! address before the tree is built, so the root does not depend on the order
//! the caller listed the assets in.

pub mod proof;
pub mod tree;

use std::str::FromStr;

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};
use proof::MerkleProof;
use tree::{MerkleTree, PairRule, COMMITMENT_PAIR_RULE};

/// One acceptable taker asset and the amount the taker must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TakerAsset {
    pub address: Address,
    pub amount: U256,
}

impl TakerAsset {
    pub fn new(address: Address, amount: U256) -> Self {
        Self { address, amount }
    }

    /// Parse a taker asset from textual address and amount.
    pub fn parse(address: &str, amount: &str) -> Result<Self> {
        Ok(Self::new(parse_address(address)?, parse_amount(amount)?))
    }

    /// `keccak256(abi.encodePacked(address, uint256))`.
    pub fn leaf_hash(&self) -> B256 {
        keccak256((self.address, self.amount).abi_encode_packed())
    }
}

impl FromStr for TakerAsset {
    type Err = Error;

    /// Parses `ADDRESS:AMOUNT`.
    fn from_str(s: &str) -> Result<Self> {
        let (address, amount) = s.split_once(':').ok_or_else(|| Error::InvalidAmount {
            message: format!("expected ADDRESS:AMOUNT, got {:?}", s),
        })?;
        Self::parse(address, amount)
    }
}

/// Parse an address, ignoring letter case.
///
/// Mixed-case input is not checksum-validated; two spellings that differ only
/// in case name the same account.
pub fn parse_address(input: &str) -> Result<Address> {
    input
        .trim()
        .to_ascii_lowercase()
        .parse::<Address>()
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", input, e)))
}

/// Parse an unsigned 256-bit amount from decimal or `0x` hex text.
pub fn parse_amount(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidAmount {
            message: "amount is empty".to_string(),
        });
    }
    if trimmed.starts_with('-') {
        return Err(Error::InvalidAmount {
            message: format!("amount must not be negative: {}", trimmed),
        });
    }
    U256::from_str(trimmed).map_err(|e| Error::InvalidAmount {
        message: format!("{:?} is not a uint256: {}", trimmed, e),
    })
}

/// A built commitment: sorted assets, their tree and its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCommitment {
    assets: Vec<TakerAsset>,
    tree: MerkleTree,
}

impl AssetCommitment {
    /// Build a commitment with the project-wide pair rule.
    pub fn build(assets: impl IntoIterator<Item = TakerAsset>) -> Result<Self> {
        Self::build_with_rule(assets, COMMITMENT_PAIR_RULE)
    }

    /// Build a commitment with an explicit pair rule.
    ///
    /// Fails with [`Error::DuplicateAsset`] if two assets share an address and
    /// with [`Error::EmptyAssetSet`] if no assets are given.
    pub fn build_with_rule(
        assets: impl IntoIterator<Item = TakerAsset>,
        rule: PairRule,
    ) -> Result<Self> {
        let mut assets: Vec<TakerAsset> = assets.into_iter().collect();
        if assets.is_empty() {
            return Err(Error::EmptyAssetSet);
        }

        assets.sort_by_key(|asset| asset.address);
        if let Some(pair) = assets.windows(2).find(|pair| pair[0].address == pair[1].address) {
            warn!(address = %pair[0].address, "Rejecting duplicate taker asset");
            return Err(Error::DuplicateAsset {
                address: pair[0].address,
            });
        }

        let leaves = assets.iter().map(TakerAsset::leaf_hash).collect();
        let tree = MerkleTree::new(leaves, rule);

        debug!(
            assets = assets.len(),
            depth = tree.depth(),
            %rule,
            root = %tree.root(),
            "Built taker asset commitment"
        );

        Ok(Self { assets, tree })
    }

    /// The commitment root, signed as `takerAssetMixHash`.
    pub fn root(&self) -> B256 {
        self.tree.root()
    }

    /// Committed assets in leaf order.
    pub fn assets(&self) -> &[TakerAsset] {
        &self.assets
    }

    pub fn leaves(&self) -> &[B256] {
        self.tree.leaves()
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn rule(&self) -> PairRule {
        self.tree.rule()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up the committed entry for `address`.
    pub fn asset(&self, address: Address) -> Option<&TakerAsset> {
        self.position(address).ok().map(|index| &self.assets[index])
    }

    /// Inclusion proof for `address`.
    pub fn proof(&self, address: Address) -> Result<MerkleProof> {
        proof::get_proof(self, address)
    }

    fn position(&self, address: Address) -> Result<usize> {
        self.assets
            .binary_search_by_key(&address, |asset| asset.address)
            .map_err(|_| Error::AssetNotFound { address })
    }
}

/// Root of the commitment over `assets`, without keeping the tree.
pub fn taker_asset_mix_hash(assets: impl IntoIterator<Item = TakerAsset>) -> Result<B256> {
    AssetCommitment::build(assets).map(|commitment| commitment.root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    const TOKEN_A: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const TOKEN_B: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
    const TOKEN_C: Address = address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");

    fn asset(address: Address, amount: u64) -> TakerAsset {
        TakerAsset::new(address, U256::from(amount))
    }

    #[test]
    fn test_leaf_hash_vector() {
        assert_eq!(
            asset(TOKEN_A, 2).leaf_hash(),
            b256!("a73e6c9caa8a50eb60056e26cb2fad84dc3ea426e436301931eff2e10035d076")
        );
        assert_eq!(
            asset(TOKEN_B, 720).leaf_hash(),
            b256!("a73e8dd27bd35d3704ec7cdaba4182d2d201399b8bcfa4f201a9d39734df53b6")
        );
    }

    #[test]
    fn test_leaf_is_packed_not_padded() {
        let leaf = asset(TOKEN_A, 2);
        let mut packed = TOKEN_A.to_vec();
        packed.extend_from_slice(&U256::from(2u64).to_be_bytes::<32>());
        assert_eq!(packed.len(), 52);
        assert_eq!(leaf.leaf_hash(), keccak256(&packed));
    }

    #[test]
    fn test_root_is_order_independent() {
        let unsorted = AssetCommitment::build(vec![asset(TOKEN_B, 720), asset(TOKEN_A, 2)]).unwrap();
        let sorted = AssetCommitment::build(vec![asset(TOKEN_A, 2), asset(TOKEN_B, 720)]).unwrap();
        assert_eq!(unsorted.root(), sorted.root());
        assert_eq!(
            sorted.root(),
            b256!("5f86b83100bc0a6103f9877bbf70486d6fbc1044a1db4b16221a753896486a6b")
        );
    }

    #[test]
    fn test_root_is_order_independent_for_shuffles() {
        let mut assets: Vec<TakerAsset> = (1u64..=13)
            .map(|i| asset(Address::left_padding_from(&(i * 7919).to_be_bytes()), i))
            .collect();
        let expected = AssetCommitment::build(assets.clone()).unwrap().root();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assets.shuffle(&mut rng);
            assert_eq!(AssetCommitment::build(assets.clone()).unwrap().root(), expected);
        }
    }

    #[test]
    fn test_three_asset_root_vectors() {
        let assets = vec![asset(TOKEN_B, 720), asset(TOKEN_C, 5), asset(TOKEN_A, 2)];
        let sorted = AssetCommitment::build_with_rule(assets.clone(), PairRule::Sorted).unwrap();
        let positional = AssetCommitment::build_with_rule(assets, PairRule::Positional).unwrap();

        assert_eq!(
            sorted.root(),
            b256!("f51fcb7edbfa165b14ca5399622e7ea42f6523768841118c403610f36c42f2f8")
        );
        assert_eq!(
            positional.root(),
            b256!("0929fb9079370198c2fa80c28c085eb72732179f51af2c14dc83669540a05513")
        );
    }

    #[test]
    fn test_assets_are_sorted_by_address() {
        let commitment =
            AssetCommitment::build(vec![asset(TOKEN_B, 720), asset(TOKEN_C, 5), asset(TOKEN_A, 2)])
                .unwrap();
        let order: Vec<Address> = commitment.assets().iter().map(|a| a.address).collect();
        assert_eq!(order, vec![TOKEN_A, TOKEN_C, TOKEN_B]);
        assert_eq!(commitment.leaves()[0], asset(TOKEN_A, 2).leaf_hash());
    }

    #[test]
    fn test_duplicate_asset_rejected() {
        let err = AssetCommitment::build(vec![asset(TOKEN_A, 2), asset(TOKEN_A, 2)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateAsset { address } if address == TOKEN_A));

        let err = AssetCommitment::build(vec![asset(TOKEN_A, 1), asset(TOKEN_A, 2)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateAsset { .. }));
    }

    #[test]
    fn test_duplicate_detection_ignores_case() {
        let upper = TakerAsset::parse("0x5FBDB2315678AFECB367F032D93F642F64180AA3", "1").unwrap();
        let lower = TakerAsset::parse("0x5fbdb2315678afecb367f032d93f642f64180aa3", "2").unwrap();
        assert_eq!(upper.address, lower.address);
        assert!(matches!(
            AssetCommitment::build(vec![upper, lower]),
            Err(Error::DuplicateAsset { .. })
        ));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(
            AssetCommitment::build(Vec::new()),
            Err(Error::EmptyAssetSet)
        ));
    }

    #[test]
    fn test_lookup() {
        let commitment = AssetCommitment::build(vec![asset(TOKEN_A, 2), asset(TOKEN_B, 720)]).unwrap();
        assert_eq!(commitment.asset(TOKEN_B).map(|a| a.amount), Some(U256::from(720u64)));
        assert!(commitment.asset(TOKEN_C).is_none());
        assert_eq!(commitment.len(), 2);
        assert_eq!(commitment.rule(), COMMITMENT_PAIR_RULE);
    }

    #[test]
    fn test_mix_hash_matches_commitment_root() {
        let assets = vec![asset(TOKEN_A, 2), asset(TOKEN_B, 720)];
        assert_eq!(
            taker_asset_mix_hash(assets.clone()).unwrap(),
            AssetCommitment::build(assets).unwrap().root()
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("720").unwrap(), U256::from(720u64));
        assert_eq!(parse_amount(" 0x2d0 ").unwrap(), U256::from(720u64));
        assert!(matches!(parse_amount("-1"), Err(Error::InvalidAmount { .. })));
        assert!(matches!(parse_amount("12abc"), Err(Error::InvalidAmount { .. })));
        assert!(matches!(parse_amount(""), Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap(),
            TOKEN_A
        );
        assert!(matches!(parse_address("0x1234"), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_taker_asset_from_str() {
        let parsed: TakerAsset = "0x5FbDB2315678afecb367f032d93F642f64180aa3:2".parse().unwrap();
        assert_eq!(parsed, asset(TOKEN_A, 2));
        assert!("0x5FbDB2315678afecb367f032d93F642f64180aa3".parse::<TakerAsset>().is_err());
    }
}
