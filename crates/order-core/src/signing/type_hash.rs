//! EIP-712 struct type definitions and their type hashes.
//!
//! A type hash is `keccak256("Name(type1 name1,type2 name2,...)")`. The
//! settlement contract compiles the same strings into constants, so the field
//! order declared here is load-bearing and must match the on-chain structs.

use std::sync::LazyLock;

use alloy_primitives::{b256, keccak256, B256};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Published type hash of the `NormalOrder` struct.
pub const NORMAL_ORDER_TYPE_HASH: B256 =
    b256!("1ea07b2f68e14e3d68d672e1c263fbc02572251f3ca40130bbf20e13d09ce4f8");

/// Published type hash of the `MultiAssetOrder` struct.
pub const MULTI_ASSET_ORDER_TYPE_HASH: B256 =
    b256!("aeb37aa68c8eec0ee8f4ff20da64a6179a410d509b6b20028979268b24f64647");

/// A single `(type, name)` member of a struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

impl FieldDef {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// An ordered struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructTypeDef {
    name: String,
    fields: Vec<FieldDef>,
}

impl StructTypeDef {
    /// Create a definition from `(type, name)` pairs in declaration order.
    pub fn new<T, N>(name: impl Into<String>, fields: impl IntoIterator<Item = (T, N)>) -> Self
    where
        T: Into<String>,
        N: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(ty, name)| FieldDef::new(ty, name))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Render the canonical signature, e.g. `Mail(address from,string contents)`.
    pub fn encode_type(&self) -> Result<String> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidStructDefinition {
                message: "struct name is empty".to_string(),
            });
        }
        if self.fields.is_empty() {
            return Err(Error::InvalidStructDefinition {
                message: format!("struct {} has no fields", self.name),
            });
        }

        let mut members = Vec::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            if field.ty.trim().is_empty() || field.name.trim().is_empty() {
                return Err(Error::InvalidStructDefinition {
                    message: format!(
                        "field {} of struct {} needs both a type and a name",
                        index, self.name
                    ),
                });
            }
            members.push(format!("{} {}", field.ty, field.name));
        }

        Ok(format!("{}({})", self.name, members.join(",")))
    }

    /// Compute the type hash of this definition.
    pub fn type_hash(&self) -> Result<B256> {
        self.encode_type().map(|signature| keccak256(signature.as_bytes()))
    }
}

/// Compute the type hash for an arbitrary struct definition.
pub fn type_hash(def: &StructTypeDef) -> Result<B256> {
    def.type_hash()
}

/// The struct kinds signed by makers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStruct {
    Normal,
    MultiAsset,
}

static NORMAL_ORDER_DEF: LazyLock<StructTypeDef> = LazyLock::new(|| {
    StructTypeDef::new(
        "NormalOrder",
        [
            ("address", "maker"),
            ("address", "taker"),
            ("address", "makerToken"),
            ("address", "takerToken"),
            ("uint256", "makerAmount"),
            ("uint256", "takerAmount"),
            ("uint256", "expiry"),
        ],
    )
});

static MULTI_ASSET_ORDER_DEF: LazyLock<StructTypeDef> = LazyLock::new(|| {
    StructTypeDef::new(
        "MultiAssetOrder",
        [
            ("address", "maker"),
            ("address", "taker"),
            ("address", "makerToken"),
            ("uint256", "makerAmount"),
            ("bytes32", "takerAssetMixHash"),
            ("uint256", "expiry"),
        ],
    )
});

static NORMAL_ORDER_HASH: LazyLock<B256> = LazyLock::new(|| {
    NORMAL_ORDER_DEF
        .type_hash()
        .expect("NormalOrder definition is well-formed")
});

static MULTI_ASSET_ORDER_HASH: LazyLock<B256> = LazyLock::new(|| {
    MULTI_ASSET_ORDER_DEF
        .type_hash()
        .expect("MultiAssetOrder definition is well-formed")
});

impl OrderStruct {
    pub const ALL: [OrderStruct; 2] = [OrderStruct::Normal, OrderStruct::MultiAsset];

    /// Struct name as declared on-chain.
    pub fn name(&self) -> &'static str {
        match self {
            OrderStruct::Normal => "NormalOrder",
            OrderStruct::MultiAsset => "MultiAssetOrder",
        }
    }

    pub fn definition(&self) -> &'static StructTypeDef {
        match self {
            OrderStruct::Normal => &NORMAL_ORDER_DEF,
            OrderStruct::MultiAsset => &MULTI_ASSET_ORDER_DEF,
        }
    }

    /// Type hash computed from the definition, cached for the process lifetime.
    pub fn type_hash(&self) -> B256 {
        match self {
            OrderStruct::Normal => *NORMAL_ORDER_HASH,
            OrderStruct::MultiAsset => *MULTI_ASSET_ORDER_HASH,
        }
    }

    /// The constant the settlement contract was compiled with.
    pub fn published_type_hash(&self) -> B256 {
        match self {
            OrderStruct::Normal => NORMAL_ORDER_TYPE_HASH,
            OrderStruct::MultiAsset => MULTI_ASSET_ORDER_TYPE_HASH,
        }
    }
}

impl std::fmt::Display for OrderStruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
