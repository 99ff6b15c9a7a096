#![allow(clippy::all)]
//! Benchmarks for the bot filter.
//!
//! Tests: crawler detection, per-list address matching at growing list sizes,
//! full classification, and a request through the middleware chain.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use botgate::modules::bot_filter::{
    is_crawler, AddressListConfig, AddressMatcher, BotFilterConfig, BotFilterMiddleware,
    ClassificationSignal, Classifier,
};
use botgate::modules::http_handler::{MiddlewareChain, NoCacheMiddleware, Request, Response};

const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

// ---------------------------------------------------------------------------
// Data generators
// ---------------------------------------------------------------------------

/// `count` distinct /24 blocks inside 10.0.0.0/8.
fn cidr_blocks(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("10.{}.{}.0/24", (i / 256) % 256, i % 256))
        .collect()
}

/// `count` disjoint 16-address ranges inside 172.16.0.0/12.
fn ranges(count: usize) -> Vec<[String; 2]> {
    (0..count)
        .map(|i| {
            let third = (i / 16) % 256;
            let fourth = (i % 16) * 16;
            [
                format!("172.16.{third}.{fourth}"),
                format!("172.16.{third}.{}", fourth + 15),
            ]
        })
        .collect()
}

fn wildcards(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("100.{}.*.?", i % 256)).collect()
}

fn exact(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("66.{}.{}.", (i / 256) % 256, i % 256))
        .collect()
}

fn config(size: usize) -> BotFilterConfig {
    let addresses = AddressListConfig {
        exact: exact(size),
        ranges: ranges(size),
        cidrs: cidr_blocks(size),
        wildcards: wildcards(size),
    };
    BotFilterConfig::new()
        .with_user_agents((0..size).map(|i| format!("scripted-client-{i}")))
        .with_referrers((0..size).map(|i| format!("scanner-{i}.example")))
        .with_addresses(addresses)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_crawler_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("bot_filter/crawlers");

    group.bench_function("browser", |b| {
        b.iter(|| black_box(is_crawler(black_box(CHROME))));
    });
    group.bench_function("googlebot", |b| {
        b.iter(|| black_box(is_crawler(black_box(GOOGLEBOT))));
    });

    group.finish();
}

fn bench_address_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("bot_filter/addresses");

    for size in [10usize, 100, 1000] {
        let matcher = AddressMatcher::from_config(&config(size).addresses).unwrap();

        // Miss walks every strategy.
        group.bench_with_input(BenchmarkId::new("miss", size), &matcher, |b, m| {
            b.iter(|| black_box(m.is_bot_address(black_box("203.0.113.9"))));
        });
        group.bench_with_input(BenchmarkId::new("cidr_hit", size), &matcher, |b, m| {
            b.iter(|| black_box(m.is_bot_address(black_box("10.0.5.77"))));
        });
        group.bench_with_input(BenchmarkId::new("ipv6_miss", size), &matcher, |b, m| {
            b.iter(|| black_box(m.is_bot_address(black_box("2001:db8::1"))));
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("bot_filter/classify");

    for size in [10usize, 1000] {
        let classifier = Classifier::from_config(&config(size)).unwrap();
        let human = ClassificationSignal::new()
            .with_user_agent(CHROME)
            .with_client_ip("203.0.113.9")
            .with_referrer("https://www.example.com/");

        group.bench_with_input(BenchmarkId::new("human", size), &classifier, |b, cl| {
            b.iter(|| black_box(cl.classify(black_box(&human))));
        });
    }

    group.finish();
}

fn bench_middleware(c: &mut Criterion) {
    let mut group = c.benchmark_group("bot_filter/middleware");

    let chain = MiddlewareChain::new()
        .with(Arc::new(NoCacheMiddleware::new()))
        .with(Arc::new(BotFilterMiddleware::from_config(&config(100)).unwrap()));
    let request = Request::builder()
        .header("User-Agent", CHROME)
        .header("X-Forwarded-For", "203.0.113.9, 10.1.1.1")
        .remote_addr("10.1.1.1:40000")
        .build();

    group.bench_function("dispatch_human", |b| {
        b.iter(|| {
            let response = chain
                .dispatch(request.clone(), |_| Response::ok().text("OK").build())
                .unwrap();
            black_box(response);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_crawler_detection,
    bench_address_lists,
    bench_classify,
    bench_middleware,
);
criterion_main!(benches);
