//! Inclusion proofs for taker assets.
//!
//! A proof lists sibling hashes from the leaf up to the root. Folding it with
//! the commitment's [`PairRule`] must reproduce the signed root; this is the
//! same computation the settlement contract performs before honoring a fill.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tree::{PairRule, COMMITMENT_PAIR_RULE};
use super::{AssetCommitment, TakerAsset};
use crate::Result;

/// Side on which a sibling sits relative to the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

/// One level of a Merkle proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: B256,
    pub position: Position,
}

/// Ordered sibling path from a leaf to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    steps: Vec<ProofStep>,
}

impl MerkleProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Sibling hashes only, as submitted in a fill request.
    pub fn hashes(&self) -> Vec<B256> {
        self.steps.iter().map(|step| step.sibling).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fold the path over `leaf` and return the candidate root.
    pub fn compute_root(&self, leaf: B256, rule: PairRule) -> B256 {
        self.steps.iter().fold(leaf, |node, step| match step.position {
            Position::Left => rule.combine(step.sibling, node),
            Position::Right => rule.combine(node, step.sibling),
        })
    }
}

/// Produce the inclusion proof for the asset at `address`.
///
/// Fails with [`crate::Error::AssetNotFound`] when the address was not committed.
pub fn get_proof(commitment: &AssetCommitment, address: Address) -> Result<MerkleProof> {
    let index = commitment.position(address)?;
    Ok(MerkleProof::new(commitment.tree().path(index)))
}

/// Check that `(address, amount)` is committed under `root` using the
/// project-wide pair rule.
pub fn verify(root: B256, address: Address, amount: U256, proof: &MerkleProof) -> bool {
    verify_with_rule(root, address, amount, proof, COMMITMENT_PAIR_RULE)
}

/// Check inclusion under an explicit pair rule.
pub fn verify_with_rule(
    root: B256,
    address: Address,
    amount: U256,
    proof: &MerkleProof,
    rule: PairRule,
) -> bool {
    let leaf = TakerAsset::new(address, amount).leaf_hash();
    let computed = proof.compute_root(leaf, rule);
    if computed != root {
        debug!(%address, %amount, %root, %computed, "Taker asset proof does not match root");
        return false;
    }
    true
}

/// Verify a bare `bytes32[]` proof with the sorted-pair rule.
///
/// Positions are irrelevant when pairs are sorted, which is why the fill
/// payload carries hashes only.
pub fn verify_hashes(root: B256, leaf: B256, proof: &[B256]) -> bool {
    let computed = proof
        .iter()
        .fold(leaf, |node, sibling| PairRule::Sorted.combine(node, *sibling));
    computed == root
}
