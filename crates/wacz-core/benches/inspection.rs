//! Inspection benchmarks for wacz-core.
//!
//! Measures the per-archive cost of each operation on in-memory archives:
//! - Structural validation
//! - Checksum verification (streaming digests)
//! - Metadata and page extraction
//! - Page listing parsing at scale

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use serde_json::json;
use std::hint::black_box;
use std::io::Cursor;
use wacz_core::InspectionConfig;
use wacz_core::ZipContainer;
use wacz_core::checksum::HashAlgorithm;
use wacz_core::checksum::digest_reader;
use wacz_core::pages::parse_listing;
use wacz_core::test_utils::valid_example;

fn container(data: &[u8]) -> ZipContainer<Cursor<&[u8]>> {
    ZipContainer::from_reader(Cursor::new(data)).unwrap()
}

/// Whole-archive operations on the example archive.
fn benchmark_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("operations");
    let data = valid_example();
    let config = InspectionConfig::default();

    group.bench_function("validate", |b| {
        b.iter(|| wacz_core::validate(&mut container(black_box(&data)), &config).unwrap());
    });

    group.bench_function("verify_checksums", |b| {
        b.iter(|| wacz_core::verify_checksums(&mut container(black_box(&data)), &config).unwrap());
    });

    group.bench_function("get_metadata", |b| {
        b.iter(|| wacz_core::get_metadata(&mut container(black_box(&data)), &config).unwrap());
    });

    group.bench_function("get_pages", |b| {
        b.iter(|| wacz_core::get_pages(&mut container(black_box(&data)), &config).unwrap());
    });

    group.finish();
}

/// Digest throughput per algorithm.
fn benchmark_digests(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");
    let data = vec![0xA5u8; 1024 * 1024];
    group.throughput(Throughput::Bytes(data.len() as u64));

    for algorithm in [HashAlgorithm::Md5, HashAlgorithm::Sha1, HashAlgorithm::Sha256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm),
            &data,
            |b, data| {
                b.iter(|| digest_reader(&mut black_box(data.as_slice()), algorithm).unwrap());
            },
        );
    }

    group.finish();
}

/// Page listing parsing for growing listings.
fn benchmark_page_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_listing");

    for count in [10usize, 1_000, 10_000] {
        let mut listing = json!({"format": "json-pages-1.0", "id": "pages"}).to_string();
        for i in 0..count {
            listing.push('\n');
            listing.push_str(
                &json!({
                    "id": format!("page-{i}"),
                    "url": format!("https://example.org/{i}"),
                    "ts": "2023-07-04T12:25:55.274Z",
                    "title": "Example Domain",
                })
                .to_string(),
            );
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &listing, |b, listing| {
            b.iter(|| parse_listing(black_box(listing)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_operations,
    benchmark_digests,
    benchmark_page_listing
);
criterion_main!(benches);
