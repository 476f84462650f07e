use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gamersclub_engine::{cache::{CacheStore, SqliteCache}, mock};

async fn setup_cache() -> SqliteCache {
    let cache = SqliteCache::new(":memory:").await.unwrap();

    // Populate with test data
    for i in 0..100 {
        let value = serde_json::to_value(mock::mock_stats(&i.to_string())).unwrap();
        cache.set(&format!("stats:{}", i), &value, 300).await.unwrap();
    }

    cache
}

fn bench_cache_get(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let cache = runtime.block_on(setup_cache());

    c.bench_function("cache_get_hit", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(cache.get("stats:50").await.unwrap())
        });
    });

    c.bench_function("cache_get_miss", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(cache.get("nonexistent").await.unwrap())
        });
    });
}

fn bench_cache_set(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let cache = runtime.block_on(setup_cache());
    let value = serde_json::to_value(mock::mock_matches("1969509", 1)).unwrap();

    c.bench_function("cache_set_matches_page", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(cache.set("matches:1969509:1", &value, 300).await.unwrap())
        });
    });
}

fn bench_record_serialization(c: &mut Criterion) {
    let matches = mock::mock_matches("1969509", 1);

    c.bench_function("matches_to_json", |b| {
        b.iter(|| black_box(serde_json::to_value(&matches).unwrap()));
    });

    let json = serde_json::to_value(&matches).unwrap();
    c.bench_function("matches_from_json", |b| {
        b.iter(|| {
            black_box(serde_json::from_value::<Vec<gamersclub_engine::Match>>(json.clone()).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_cache_get,
    bench_cache_set,
    bench_record_serialization
);
criterion_main!(benches);
