//! Order Tool
//!
//! Inspects limit order type hashes, taker-asset commitments, proofs and
//! EIP-712 digests. Results are written to stdout as JSON; logs go to stderr.

mod args;

use alloy_primitives::Address;
use anyhow::{bail, Context, Result};
use clap::Parser;
use order_core::{
    digest, encode, verify, AssetCommitment, MultiAssetOrder, NormalOrder, OrderStruct,
    SignableTypedData, TakerAsset,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{AssetArgs, Cli, Command, DomainArgs, OrderCommand};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_tool=info,order_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::TypeHashes => type_hashes()?,
        Command::DomainSeparator(domain) => domain_separator(&domain)?,
        Command::MixHash(assets) => mix_hash(assets)?,
        Command::Proof { assets, token } => proof(assets, token)?,
        Command::TypedData { order } => typed_data(order)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn type_hashes() -> Result<Value> {
    let mut entries = Vec::with_capacity(OrderStruct::ALL.len());

    for kind in OrderStruct::ALL {
        let computed = kind.type_hash();
        let published = kind.published_type_hash();
        if computed != published {
            warn!(%kind, %computed, %published, "Type hash differs from published constant");
        }

        entries.push(json!({
            "name": kind.name(),
            "encodeType": kind.definition().encode_type()?,
            "typeHash": computed,
            "published": published,
            "matches": computed == published,
        }));
    }

    Ok(Value::Array(entries))
}

fn domain_separator(args: &DomainArgs) -> Result<Value> {
    let domain = args.resolve().context("Failed to resolve signing domain")?;
    let separator = domain.separator();
    info!(chain_id = domain.chain_id, %separator, "Computed domain separator");

    Ok(json!({
        "domain": domain,
        "separator": separator,
    }))
}

fn build_commitment(args: AssetArgs) -> Result<AssetCommitment> {
    AssetCommitment::build(args.assets).context("Failed to build taker asset commitment")
}

fn asset_json(asset: &TakerAsset) -> Value {
    json!({
        "address": asset.address,
        "amount": asset.amount.to_string(),
        "leaf": asset.leaf_hash(),
    })
}

fn mix_hash(args: AssetArgs) -> Result<Value> {
    let commitment = build_commitment(args)?;

    Ok(json!({
        "rule": commitment.rule(),
        "assets": commitment.assets().iter().map(asset_json).collect::<Vec<_>>(),
        "root": commitment.root(),
    }))
}

fn proof(args: AssetArgs, token: Address) -> Result<Value> {
    let commitment = build_commitment(args)?;
    let asset = commitment
        .asset(token)
        .with_context(|| format!("{} is not a committed taker asset", token))?;
    let proof = commitment.proof(token)?;

    let verified = verify(commitment.root(), asset.address, asset.amount, &proof);
    if !verified {
        bail!("Proof for {} does not reproduce the root", token);
    }
    info!(%token, steps = proof.len(), "Proof verified against root");

    Ok(json!({
        "asset": asset_json(asset),
        "root": commitment.root(),
        "proof": proof.hashes(),
        "steps": proof.steps(),
        "verified": verified,
    }))
}

fn typed_data_json(typed: &SignableTypedData) -> Result<Value> {
    let digest = digest(typed);
    info!(primary_type = %typed.primary_type(), %digest, "Encoded order typed data");

    Ok(json!({
        "typedData": typed.to_json()?,
        "structHash": typed.struct_hash(),
        "digest": digest,
    }))
}

fn typed_data(command: OrderCommand) -> Result<Value> {
    match command {
        OrderCommand::Normal {
            order,
            taker_token,
            taker_amount,
        } => {
            let domain = order.domain.resolve().context("Failed to resolve signing domain")?;
            let normal = NormalOrder::create(order.normal_params(taker_token, taker_amount));
            typed_data_json(&encode(&normal, &domain))
        }
        OrderCommand::Multi { order, assets } => {
            let domain = order.domain.resolve().context("Failed to resolve signing domain")?;
            let multi = MultiAssetOrder::create(order.multi_asset_params(), assets.assets)
                .context("Failed to create multi-asset order")?;

            let mut output = typed_data_json(&encode(&multi, &domain))?;
            output["takerAssets"] = multi.taker_assets().iter().map(asset_json).collect();
            Ok(output)
        }
    }
}
