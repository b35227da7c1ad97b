//! Split `{v, r, s}` signatures as accepted by the settlement contract.

use std::str::FromStr;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Length of a compact `r ∥ s ∥ v` signature.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// An ECDSA signature split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSignature {
    /// Recovery id, normalized to 27 or 28.
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl SplitSignature {
    /// Split a 65-byte `r ∥ s ∥ v` signature.
    ///
    /// A recovery id of 0 or 1 is shifted to 27 or 28.
    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(Error::InvalidSignature {
                message: format!(
                    "expected {} bytes, got {}",
                    COMPACT_SIGNATURE_LEN,
                    bytes.len()
                ),
            });
        }

        let v = match bytes[64] {
            v @ (0 | 1) => v + 27,
            v @ (27 | 28) => v,
            other => {
                return Err(Error::InvalidSignature {
                    message: format!("unsupported recovery id {}", other),
                })
            }
        };

        Ok(Self {
            v,
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
        })
    }

    /// Join back into the 65-byte compact form.
    pub fn to_compact(&self) -> [u8; COMPACT_SIGNATURE_LEN] {
        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }

    /// Hex encoding of the compact form, `0x` prefixed.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_compact()))
    }
}

impl FromStr for SplitSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s.trim().trim_start_matches("0x")).map_err(|e| Error::InvalidSignature {
                message: e.to_string(),
            })?;
        Self::from_compact(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(v: u8) -> Vec<u8> {
        let mut bytes = vec![0x11; 32];
        bytes.extend_from_slice(&[0x22; 32]);
        bytes.push(v);
        bytes
    }

    #[test]
    fn test_split_compact_signature() {
        let sig = SplitSignature::from_compact(&compact(28)).unwrap();
        assert_eq!(sig.v, 28);
        assert_eq!(sig.r, B256::repeat_byte(0x11));
        assert_eq!(sig.s, B256::repeat_byte(0x22));
        assert_eq!(sig.to_compact().to_vec(), compact(28));
    }

    #[test]
    fn test_recovery_id_is_normalized() {
        assert_eq!(SplitSignature::from_compact(&compact(0)).unwrap().v, 27);
        assert_eq!(SplitSignature::from_compact(&compact(1)).unwrap().v, 28);
    }

    #[test]
    fn test_rejects_bad_signatures() {
        assert!(matches!(
            SplitSignature::from_compact(&[0u8; 64]),
            Err(Error::InvalidSignature { .. })
        ));
        assert!(SplitSignature::from_compact(&compact(5)).is_err());
        assert!("0xzz".parse::<SplitSignature>().is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        let sig = SplitSignature::from_compact(&compact(27)).unwrap();
        let parsed: SplitSignature = sig.to_hex().parse().unwrap();
        assert_eq!(parsed, sig);
        assert!(sig.to_hex().starts_with("0x"));
        assert_eq!(sig.to_hex().len(), 132);
    }
}
