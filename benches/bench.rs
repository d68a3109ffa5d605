//! Criterion benchmarks for snowcascade.
//!
//! Covers the hot paths a host engine hits on every indexed document and
//! query:
//! - the stemmer cascade on its own
//! - the full snowball pipeline in document and query mode
//! - blob compression of stored text

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowcascade::analysis::registry::{TokenizerRegistry, register_snowball};
use snowcascade::analysis::stemmer::StemmerCascade;
use snowcascade::analysis::stop_words::MemoryStopWordStore;
use snowcascade::analysis::token::{Flow, TokenEvent, TokenizeMode};
use snowcascade::compress::{compress, uncompress};
use snowcascade::config::StemmerSettings;
use snowcascade::error::Result;
use std::hint::black_box;
use std::sync::Arc;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "searching",
        "engines",
        "indexed",
        "documents",
        "running",
        "foxes",
        "the",
        "of",
        "stemming",
        "normalization",
        "Größe",
        "cykeln",
        "hästarna",
        "jumps",
        "relevance",
        "queries",
        "a",
        "tokenization",
        "retrieval",
        "ranking",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let mut doc_words = Vec::with_capacity(doc_length);

        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            doc_words.push(words[word_idx]);
        }

        documents.push(doc_words.join(" "));
    }

    documents
}

/// Benchmark the stemmer cascade.
fn bench_stemmer_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("stemmer_cascade");
    let words = ["running", "foxes", "hästarna", "relevance", "jump"];

    for languages in [&["english"][..], &["swedish", "english"][..]] {
        let cascade = StemmerCascade::from_names(languages).unwrap();
        group.throughput(Throughput::Elements(words.len() as u64));
        group.bench_function(languages.join("+"), |b| {
            b.iter(|| {
                for word in &words {
                    black_box(cascade.stem(black_box(word)));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark the full pipeline.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("snowball_pipeline");

    let registry = TokenizerRegistry::new();
    register_snowball(
        &registry,
        StemmerSettings::with_languages(["swedish", "english"]),
        Arc::new(MemoryStopWordStore::english()),
    )
    .unwrap();
    let mut tokenizer = registry.create("snowball", &[]).unwrap();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("index_documents", |b| {
        b.iter(|| {
            let mut count = 0usize;
            for text in &texts {
                tokenizer
                    .tokenize(
                        black_box(text),
                        TokenizeMode::DOCUMENT,
                        &mut |event: TokenEvent<'_>| -> Result<Flow> {
                            count += event.len();
                            Ok(Flow::Continue)
                        },
                    )
                    .unwrap();
            }
            black_box(count)
        })
    });

    let queries = ["running", "the", "foxes jumps", "hästarna"];
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("single_term_queries", |b| {
        b.iter(|| {
            for query in &queries {
                tokenizer
                    .tokenize(
                        black_box(query),
                        TokenizeMode::QUERY,
                        &mut |event: TokenEvent<'_>| -> Result<Flow> {
                            black_box(event);
                            Ok(Flow::Continue)
                        },
                    )
                    .unwrap();
            }
        })
    });

    group.finish();
}

/// Benchmark blob compression.
fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression");
    let text = generate_test_documents(20).join("\n");
    let blob = compress(text.as_bytes()).unwrap();

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("compress", |b| {
        b.iter(|| black_box(compress(black_box(text.as_bytes())).unwrap()))
    });
    group.bench_function("uncompress", |b| {
        b.iter(|| black_box(uncompress(black_box(&blob)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_stemmer_cascade, bench_pipeline, bench_compression);

criterion_main!(benches);
