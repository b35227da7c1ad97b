//! Command line arguments.

use alloy_primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use order_core::commitment::{parse_address, parse_amount};
use order_core::config::DomainConfig;
use order_core::{Eip712Domain, MultiAssetOrderParams, NormalOrderParams, TakerAsset};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print canonical struct signatures and their type hashes
    TypeHashes,
    /// Print the separator of the configured signing domain
    DomainSeparator(DomainArgs),
    /// Commit to a set of taker assets and print the root
    MixHash(AssetArgs),
    /// Print the inclusion proof for one taker asset
    Proof {
        #[command(flatten)]
        assets: AssetArgs,
        /// Taker asset to prove
        #[arg(long, value_parser = parse_address)]
        token: Address,
    },
    /// Print signable typed data and the digest for an order
    TypedData {
        #[command(subcommand)]
        order: OrderCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Single taker asset order
    Normal {
        #[command(flatten)]
        order: OrderArgs,
        #[arg(long, value_parser = parse_address)]
        taker_token: Address,
        #[arg(long, value_parser = parse_amount)]
        taker_amount: U256,
    },
    /// Order accepting any one of several taker assets
    Multi {
        #[command(flatten)]
        order: OrderArgs,
        #[command(flatten)]
        assets: AssetArgs,
    },
}

#[derive(Args, Debug)]
pub struct AssetArgs {
    /// Taker asset as ADDRESS:AMOUNT, repeated once per asset
    #[arg(long = "asset", required = true)]
    pub assets: Vec<TakerAsset>,
}

#[derive(Args, Debug)]
pub struct OrderArgs {
    #[arg(long, value_parser = parse_address)]
    pub maker: Address,
    /// Only this address may fill; omitted means anyone
    #[arg(long, value_parser = parse_address)]
    pub taker: Option<Address>,
    #[arg(long, value_parser = parse_address)]
    pub maker_token: Address,
    #[arg(long, value_parser = parse_amount)]
    pub maker_amount: U256,
    /// Unix timestamp; defaults to a short window from now
    #[arg(long, value_parser = parse_amount)]
    pub expiry: Option<U256>,
    #[command(flatten)]
    pub domain: DomainArgs,
}

impl OrderArgs {
    pub fn normal_params(&self, taker_token: Address, taker_amount: U256) -> NormalOrderParams {
        NormalOrderParams {
            maker: self.maker,
            taker: self.taker,
            maker_token: self.maker_token,
            taker_token,
            maker_amount: self.maker_amount,
            taker_amount,
            expiry: self.expiry,
        }
    }

    pub fn multi_asset_params(&self) -> MultiAssetOrderParams {
        MultiAssetOrderParams {
            maker: self.maker,
            taker: self.taker,
            maker_token: self.maker_token,
            maker_amount: self.maker_amount,
            expiry: self.expiry,
        }
    }
}

#[derive(Args, Debug)]
pub struct DomainArgs {
    /// Domain configuration file
    #[arg(long)]
    pub config: Option<String>,
    /// Overrides the configured chain ID
    #[arg(long)]
    pub chain_id: Option<u64>,
    /// Overrides the configured settlement contract
    #[arg(long, value_parser = parse_address)]
    pub verifying_contract: Option<Address>,
}

impl DomainArgs {
    /// Load the domain config and apply command line overrides.
    pub fn resolve(&self) -> order_core::Result<Eip712Domain> {
        let mut cfg = DomainConfig::load(self.config.as_deref())?;
        if let Some(chain_id) = self.chain_id {
            cfg.chain_id = chain_id;
        }
        if let Some(contract) = self.verifying_contract {
            cfg.verifying_contract = Some(contract.to_string());
        }
        cfg.to_domain()
    }
}
