use cacheplex::{
    CacheKey, CacheProviderExt, CacheResult, CacheStore, RequestScopedProvider, ScopeStoreHandle,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

fn fresh_scope() -> ScopeStoreHandle {
    Arc::new(Mutex::new(CacheStore::new()))
}

fn provider_over(scope: ScopeStoreHandle) -> RequestScopedProvider {
    RequestScopedProvider::new(move || Arc::clone(&scope))
}

#[test]
fn test_contract_matches_in_process_surface() {
    let cache = provider_over(fresh_scope());
    let key = CacheKey::new("session", "user-7").unwrap();

    assert_eq!(
        cache.put(&key, String::from("alice")).result,
        CacheResult::ADDED | CacheResult::PUT
    );
    assert_eq!(
        cache.put(&key, String::from("bob")).result,
        CacheResult::UPDATED | CacheResult::PUT
    );

    let got = cache.get::<String>(&key);
    assert!(got.is_hit());
    assert_eq!(got.value.as_deref(), Some("bob"));
    assert_eq!(got.hits, 1);

    assert_eq!(cache.delete(&key).result, CacheResult::DELETED);
    assert_eq!(cache.delete(&key).result, CacheResult::MISS);
}

#[test]
fn test_type_mismatch_behaves_like_in_process() {
    let cache = provider_over(fresh_scope());
    let key = CacheKey::new("session", "k").unwrap();
    cache.put(&key, 42u32);

    let got = cache.get::<String>(&key);
    assert_eq!(got.result, CacheResult::MISS | CacheResult::UNAVAILABLE);
    assert_eq!(cache.stats().stats.serialization_failure_count, 1);
    assert!(cache.get::<u32>(&key).is_hit());
}

#[test]
fn test_stats_travel_with_the_scope_store() {
    // One provider, two successive scopes: swapping the store behind the
    // factory resets both entries and statistics without an explicit clear.
    let current: Arc<Mutex<ScopeStoreHandle>> = Arc::new(Mutex::new(fresh_scope()));
    let resolver = Arc::clone(&current);
    let cache = RequestScopedProvider::new(move || Arc::clone(&resolver.lock()));

    let key = CacheKey::new("session", "user").unwrap();
    cache.put(&key, 1u8);
    cache.get::<u8>(&key);

    let stats = cache.stats().stats;
    assert_eq!(stats.put_count, 1);
    assert_eq!(stats.get_hit_count, 1);
    assert_eq!(stats.key_count, 1);

    *current.lock() = fresh_scope();

    let stats = cache.stats().stats;
    assert_eq!(stats.put_count, 0);
    assert_eq!(stats.get_hit_count, 0);
    assert_eq!(stats.key_count, 0);
    assert!(cache.get::<u8>(&key).is_miss());
}

#[test]
fn test_clear_only_affects_current_scope() {
    let scope_a = fresh_scope();
    let scope_b = fresh_scope();
    let cache_a = provider_over(Arc::clone(&scope_a));
    let cache_b = provider_over(Arc::clone(&scope_b));

    let key = CacheKey::new("r", "k").unwrap();
    cache_a.put(&key, 1u8);
    cache_b.put(&key, 2u8);

    assert!(cache_a.clear().is_cleared());

    assert!(cache_a.get::<u8>(&key).is_miss());
    assert_eq!(cache_b.get::<u8>(&key).value, Some(2));
}

#[test]
fn test_purge_seconds_always_zero() {
    let cache = provider_over(fresh_scope());
    assert_eq!(cache.stats().stats.purge_seconds, 0);
    cache.clear();
    assert_eq!(cache.stats().stats.purge_seconds, 0);
}

#[test]
fn test_shared_scope_across_threads_counts_exactly() {
    let scope = fresh_scope();
    let cache = Arc::new(provider_over(Arc::clone(&scope)));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let key = CacheKey::new("shared", format!("k-{t}-{i}")).unwrap();
                    cache.put(&key, i as u64);
                    assert!(cache.get::<u64>(&key).is_hit());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats().stats;
    assert_eq!(stats.put_count, 800);
    assert_eq!(stats.get_hit_count, 800);
    assert_eq!(stats.key_count, 800);
}
