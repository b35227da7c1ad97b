//! Latency benchmarks for order signing and proof operations.
//!
//! Run with: `cargo bench --bench latency`

use alloy_primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use limit_order_kit::core::{
    encode, get_proof, verify, AssetCommitment, Eip712Domain, Eip712Struct, MultiAssetOrder,
    MultiAssetOrderParams, NormalOrder, NormalOrderParams, OrderStruct, TakerAsset,
};

/// Generate `count` taker assets with distinct addresses.
fn generate_assets(count: usize) -> Vec<TakerAsset> {
    (1..=count as u64)
        .map(|i| {
            TakerAsset::new(
                Address::left_padding_from(&i.to_be_bytes()),
                U256::from(i * 1_000),
            )
        })
        .collect()
}

fn domain() -> Eip712Domain {
    Eip712Domain::limit_order_protocol(31337, Address::repeat_byte(0x5f))
}

/// Benchmark commitment construction over growing asset sets.
fn bench_commitment_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("commitment_build");

    for count in [2, 8, 32, 128].iter() {
        let assets = generate_assets(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("build", count), &assets, |b, assets| {
            b.iter(|| black_box(AssetCommitment::build(black_box(assets.clone()))))
        });
    }

    group.finish();
}

/// Benchmark proof generation and verification.
fn bench_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("proof");

    for count in [2, 8, 32, 128].iter() {
        let commitment = AssetCommitment::build(generate_assets(*count)).unwrap();
        let target = commitment.assets()[count / 2];
        let proof = get_proof(&commitment, target.address).unwrap();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("get_proof", count),
            &commitment,
            |b, commitment| b.iter(|| black_box(get_proof(commitment, black_box(target.address)))),
        );

        group.bench_with_input(BenchmarkId::new("verify", count), &proof, |b, proof| {
            b.iter(|| {
                black_box(verify(
                    commitment.root(),
                    target.address,
                    target.amount,
                    black_box(proof),
                ))
            })
        });
    }

    group.finish();
}

/// Benchmark type hash lookup and order digests.
fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");
    let domain = domain();

    let normal = NormalOrder::create(NormalOrderParams {
        maker: Address::repeat_byte(0x01),
        maker_token: Address::repeat_byte(0x02),
        taker_token: Address::repeat_byte(0x03),
        maker_amount: U256::from(3_600u64),
        taker_amount: U256::from(2u64),
        ..Default::default()
    });

    let multi = MultiAssetOrder::create(
        MultiAssetOrderParams {
            maker: Address::repeat_byte(0x01),
            maker_token: Address::repeat_byte(0x02),
            maker_amount: U256::from(3_600u64),
            ..Default::default()
        },
        generate_assets(8),
    )
    .unwrap();

    group.throughput(Throughput::Elements(1));
    group.bench_function("type_hash", |b| {
        b.iter(|| black_box(OrderStruct::MultiAsset.type_hash()))
    });
    group.bench_function("domain_separator", |b| {
        b.iter(|| black_box(domain.separator()))
    });
    group.bench_function("normal_order", |b| {
        b.iter(|| black_box(normal.signing_hash(black_box(&domain))))
    });
    group.bench_function("multi_asset_order", |b| {
        b.iter(|| black_box(multi.signing_hash(black_box(&domain))))
    });

    group.finish();
}

/// Benchmark typed-data JSON rendering.
fn bench_typed_data_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_data_serialization");

    let multi = MultiAssetOrder::create(
        MultiAssetOrderParams {
            maker: Address::repeat_byte(0x01),
            maker_token: Address::repeat_byte(0x02),
            maker_amount: U256::from(3_600u64),
            ..Default::default()
        },
        generate_assets(8),
    )
    .unwrap();
    let typed = encode(&multi, &domain());

    group.throughput(Throughput::Elements(1));
    group.bench_function("multi_asset_to_json", |b| {
        b.iter(|| black_box(serde_json::to_string(black_box(&typed))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_commitment_build,
    bench_proof,
    bench_digest,
    bench_typed_data_serialization,
);

criterion_main!(benches);
