//! EIP-712 typed data assembly and digest computation.
//!
//! `digest = keccak256(0x19 0x01 ∥ domainSeparator ∥ hashStruct(message))`.
//! The encoder only produces the digest; signing and signature recovery
//! happen outside this crate.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::domain::Eip712Domain;
use super::type_hash::{FieldDef, OrderStruct};
use crate::Result;

/// EIP-191 prefix for structured data.
const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// A single encoded message member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Address(Address),
    Uint(U256),
    Bytes32(B256),
    String(String),
    Bytes(Bytes),
}

impl TypedValue {
    /// Solidity type name this value encodes as.
    pub fn sol_type(&self) -> &'static str {
        match self {
            TypedValue::Address(_) => "address",
            TypedValue::Uint(_) => "uint256",
            TypedValue::Bytes32(_) => "bytes32",
            TypedValue::String(_) => "string",
            TypedValue::Bytes(_) => "bytes",
        }
    }

    /// The 32-byte `encodeData` word for this value.
    ///
    /// Dynamic types are replaced by their keccak256 hash.
    pub fn encode_word(&self) -> B256 {
        match self {
            TypedValue::Address(address) => B256::left_padding_from(address.as_slice()),
            TypedValue::Uint(value) => B256::from(value.to_be_bytes::<32>()),
            TypedValue::Bytes32(word) => *word,
            TypedValue::String(text) => keccak256(text.as_bytes()),
            TypedValue::Bytes(bytes) => keccak256(bytes),
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TypedValue::Address(address) => serializer.serialize_str(&address.to_checksum(None)),
            // Decimal strings keep full uint256 precision in JSON.
            TypedValue::Uint(value) => serializer.serialize_str(&value.to_string()),
            TypedValue::Bytes32(word) => {
                serializer.serialize_str(&format!("0x{}", hex::encode(word)))
            }
            TypedValue::String(text) => serializer.serialize_str(text),
            TypedValue::Bytes(bytes) => {
                serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
            }
        }
    }
}

/// A struct that can be signed under an [`Eip712Domain`].
pub trait Eip712Struct {
    /// Which fixed schema the values belong to.
    const STRUCT: OrderStruct;

    /// Member values in the schema's declaration order.
    fn field_values(&self) -> Vec<TypedValue>;

    /// `hashStruct(s) = keccak256(typeHash ∥ encodeData(s))`.
    fn struct_hash(&self) -> B256 {
        hash_struct(Self::STRUCT, &self.field_values())
    }

    /// Final digest under `domain`.
    fn signing_hash(&self, domain: &Eip712Domain) -> B256 {
        typed_data_hash(domain.separator(), self.struct_hash())
    }
}

fn hash_struct(kind: OrderStruct, values: &[TypedValue]) -> B256 {
    debug_assert_eq!(kind.definition().fields().len(), values.len());

    let mut encoded = Vec::with_capacity(32 * (values.len() + 1));
    encoded.extend_from_slice(kind.type_hash().as_slice());
    for value in values {
        encoded.extend_from_slice(value.encode_word().as_slice());
    }
    keccak256(&encoded)
}

/// Compute the EIP-712 typed data hash.
pub fn typed_data_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut preimage = [0u8; 66];
    preimage[..2].copy_from_slice(&TYPED_DATA_PREFIX);
    preimage[2..34].copy_from_slice(domain_separator.as_slice());
    preimage[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(preimage)
}

/// Typed data for one signing request: domain, schema and message.
///
/// Serializes to the `{domain, types, message}` object wallets accept for
/// `eth_signTypedData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableTypedData {
    domain: Eip712Domain,
    primary_type: OrderStruct,
    message: Vec<TypedValue>,
}

impl SignableTypedData {
    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    pub fn primary_type(&self) -> OrderStruct {
        self.primary_type
    }

    pub fn types(&self) -> &'static [FieldDef] {
        self.primary_type.definition().fields()
    }

    /// Message members paired with their declared names.
    pub fn message(&self) -> impl Iterator<Item = (&'static str, &TypedValue)> + '_ {
        self.types()
            .iter()
            .map(|field| field.name.as_str())
            .zip(self.message.iter())
    }

    pub fn struct_hash(&self) -> B256 {
        hash_struct(self.primary_type, &self.message)
    }

    pub fn digest(&self) -> B256 {
        typed_data_hash(self.domain.separator(), self.struct_hash())
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

struct TypesMap(OrderStruct);

impl Serialize for TypesMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0.name(), self.0.definition().fields())?;
        map.end()
    }
}

struct MessageMap<'a>(&'a SignableTypedData);

impl Serialize for MessageMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.message.len()))?;
        for (name, value) in self.0.message() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for SignableTypedData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("domain", &self.domain)?;
        map.serialize_entry("primaryType", self.primary_type.name())?;
        map.serialize_entry("types", &TypesMap(self.primary_type))?;
        map.serialize_entry("message", &MessageMap(self))?;
        map.end()
    }
}

/// Assemble typed data for `order` under `domain`.
pub fn encode<T: Eip712Struct>(order: &T, domain: &Eip712Domain) -> SignableTypedData {
    SignableTypedData {
        domain: domain.clone(),
        primary_type: T::STRUCT,
        message: order.field_values(),
    }
}

/// Digest an external signer signs and the settlement contract recomputes.
pub fn digest(typed_data: &SignableTypedData) -> B256 {
    typed_data.digest()
}
