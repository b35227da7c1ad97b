//! EIP-712 domain separator for the limit order protocol.
//!
//! The domain binds a signed order to one protocol deployment (name,
//! version, chain and verifying contract). Callers always pass the domain
//! explicitly; nothing here reads deployment files or the environment.

use alloy_primitives::{b256, keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

/// Domain name used by the limit order protocol contract.
pub const DEFAULT_DOMAIN_NAME: &str = "LimitOrderProtocol";

/// Domain version used by the limit order protocol contract.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Chain ID used when none is configured (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// `keccak256("EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")`
pub const DOMAIN_TYPE_HASH: B256 =
    b256!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f");

/// EIP-712 domain parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain ID.
    pub chain_id: u64,
    /// Verifying contract address.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Domain of the limit order protocol deployed at `verifying_contract`.
    pub fn limit_order_protocol(chain_id: u64, verifying_contract: Address) -> Self {
        Self::custom(
            DEFAULT_DOMAIN_NAME,
            DEFAULT_DOMAIN_VERSION,
            chain_id,
            verifying_contract,
        )
    }

    /// Create domain with custom parameters.
    pub fn custom(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());

        // encodeData: every member is a full 32-byte word.
        let contract_padded = B256::left_padding_from(self.verifying_contract.as_slice());

        let encoded = (
            DOMAIN_TYPE_HASH,
            name_hash,
            version_hash,
            U256::from(self.chain_id),
            contract_padded,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}
