//! Signing domain configuration.
//!
//! Values are layered: built-in defaults, then an optional config file, then
//! `LOP_*` environment variables (a `.env` file is read first if present).

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::commitment::parse_address;
use crate::signing::{Eip712Domain, DEFAULT_CHAIN_ID, DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION};
use crate::{Error, Result};

/// Prefix for environment overrides, e.g. `LOP_CHAIN_ID`.
pub const ENV_PREFIX: &str = "LOP";

/// Domain parameters for a deployment of the settlement contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    /// Hex address of the settlement contract. Required to build a domain.
    pub verifying_contract: Option<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOMAIN_NAME.to_string(),
            version: DEFAULT_DOMAIN_VERSION.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            verifying_contract: None,
        }
    }
}

impl DomainConfig {
    /// Load from defaults and the environment.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load from defaults, an optional file at `path`, and the environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let cfg = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("name", DEFAULT_DOMAIN_NAME)?
            .set_default("version", DEFAULT_DOMAIN_VERSION)?
            .set_default("chain_id", DEFAULT_CHAIN_ID)?)
    }

    /// Parsed verifying contract address.
    pub fn verifying_contract(&self) -> Result<Address> {
        let raw = self.verifying_contract.as_deref().ok_or_else(|| Error::Config {
            message: format!("{}_VERIFYING_CONTRACT is not set", ENV_PREFIX),
        })?;
        parse_address(raw)
    }

    /// Build the signing domain.
    pub fn to_domain(&self) -> Result<Eip712Domain> {
        Ok(Eip712Domain::custom(
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.verifying_contract()?,
        ))
    }

    /// Load configuration for testing (with defaults).
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            chain_id: 31337,
            verifying_contract: Some("0x5FC8d32690cc91D4c39d9d3abcBD16989F875707".to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use config::FileFormat;

    fn from_toml(toml: &str) -> DomainConfig {
        DomainConfig::defaults()
            .unwrap()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = from_toml("");
        assert_eq!(cfg, DomainConfig::default());
        assert_eq!(cfg.name, "LimitOrderProtocol");
        assert_eq!(cfg.version, "1");
        assert_eq!(cfg.chain_id, 1);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = from_toml(
            r#"
            chain_id = 31337
            verifying_contract = "0x5FC8d32690cc91D4c39d9d3abcBD16989F875707"
            "#,
        );
        assert_eq!(cfg.chain_id, 31337);
        assert_eq!(cfg.name, DEFAULT_DOMAIN_NAME);
        assert_eq!(
            cfg.verifying_contract().unwrap(),
            address!("5FC8d32690cc91D4c39d9d3abcBD16989F875707")
        );
    }

    #[test]
    fn test_missing_contract_is_config_error() {
        let err = DomainConfig::default().to_domain().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_bad_contract_is_address_error() {
        let cfg = DomainConfig {
            verifying_contract: Some("0x1234".to_string()),
            ..DomainConfig::default()
        };
        assert!(matches!(cfg.to_domain(), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_to_domain_separator() {
        let domain = DomainConfig::test_config().to_domain().unwrap();
        assert_eq!(
            domain.separator(),
            b256!("01f6d6984bc00c779deba97a2cbf308f95566d576ec3035dbabd954933b7e54b")
        );
    }
}
