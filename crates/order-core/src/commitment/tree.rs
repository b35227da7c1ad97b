//! Binary keccak256 Merkle tree over taker-asset leaves.
//!
//! The combiner rule is part of the wire contract with the settlement
//! contract: both sides must hash sibling pairs the same way and treat an
//! unpaired node the same way. The rule is pinned in [`COMMITMENT_PAIR_RULE`].
//!
//! Levels are built bottom-up. At every level nodes are paired left to
//! right; a trailing node without a partner is promoted unchanged to the next
//! level. A tree with a single leaf has that leaf as its root.

use alloy_primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};

use super::proof::{Position, ProofStep};

/// How two sibling nodes are combined into their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairRule {
    /// `keccak256(min(a, b) ∥ max(a, b))`; proofs need no positions.
    Sorted,
    /// `keccak256(left ∥ right)`; proofs must carry sibling positions.
    Positional,
}

/// The combiner rule used for every taker-asset commitment.
pub const COMMITMENT_PAIR_RULE: PairRule = PairRule::Sorted;

impl PairRule {
    /// Hash a left and right child into their parent.
    pub fn combine(self, left: B256, right: B256) -> B256 {
        let (first, second) = match self {
            PairRule::Sorted if right < left => (right, left),
            _ => (left, right),
        };

        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(first.as_slice());
        preimage[32..].copy_from_slice(second.as_slice());
        keccak256(preimage)
    }
}

impl Default for PairRule {
    fn default() -> Self {
        COMMITMENT_PAIR_RULE
    }
}

impl std::fmt::Display for PairRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairRule::Sorted => write!(f, "sorted"),
            PairRule::Positional => write!(f, "positional"),
        }
    }
}

/// An immutable Merkle tree, stored level by level from leaves to root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<B256>>,
    rule: PairRule,
}

impl MerkleTree {
    /// Build a tree over `leaves` in the given order.
    pub fn new(leaves: Vec<B256>, rule: PairRule) -> Self {
        let mut levels = vec![leaves];

        while levels.last().is_some_and(|level| level.len() > 1) {
            let current = &levels[levels.len() - 1];
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => rule.combine(*left, *right),
                    [odd] => *odd,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(next);
        }

        Self { levels, rule }
    }

    /// Root hash. An empty tree has the zero root.
    pub fn root(&self) -> B256 {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_default()
    }

    pub fn leaves(&self) -> &[B256] {
        &self.levels[0]
    }

    pub fn rule(&self) -> PairRule {
        self.rule
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Sibling path from the leaf at `index` up to the root.
    ///
    /// Levels where the node is promoted without a partner contribute no step.
    pub fn path(&self, mut index: usize) -> Vec<ProofStep> {
        let mut steps = Vec::with_capacity(self.depth());

        for level in &self.levels[..self.depth()] {
            let is_right = index % 2 == 1;
            let sibling_index = if is_right { index - 1 } else { index + 1 };

            if let Some(sibling) = level.get(sibling_index) {
                steps.push(ProofStep {
                    sibling: *sibling,
                    position: if is_right {
                        Position::Left
                    } else {
                        Position::Right
                    },
                });
            }
            index /= 2;
        }

        steps
    }
}
