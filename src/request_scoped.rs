use crate::in_process::DEFAULT_EXPIRATION_SECS;
use crate::provider::{CacheProvider, RawGet};
use crate::store::CacheStore;
use crate::{CacheKey, CacheLocation, CacheResult, CacheStatistics};
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A shared handle to one scope's backing store.
pub type ScopeStoreHandle = Arc<Mutex<CacheStore>>;

/// The same contract surface as the in-process provider, backed by a
/// caller-supplied scope-lifetime store.
///
/// The provider holds a factory, not a store: every operation re-resolves
/// the current scope's [`CacheStore`] through the factory, so one provider
/// instance can serve many successive scopes (e.g. one store per request).
/// The provider never creates or destroys the backing store — its lifetime
/// is entirely the caller's.
///
/// Statistics live inside the scope store, so a fresh store per scope means
/// the counters reset naturally with the scope, without an explicit clear.
/// `purge_seconds` is always 0: there is no background purge; the backing
/// store's lifetime bounds the cache.
///
/// # Examples
///
/// ```
/// use cacheplex::{CacheKey, CacheProviderExt, CacheStore, RequestScopedProvider};
/// use parking_lot::Mutex;
/// use std::sync::Arc;
///
/// // One store per "request"; the provider re-resolves it on every call.
/// let scope = Arc::new(Mutex::new(CacheStore::new()));
/// let handle = Arc::clone(&scope);
/// let cache = RequestScopedProvider::new(move || Arc::clone(&handle));
///
/// let key = CacheKey::new("session", "user-7").unwrap();
/// assert!(cache.put(&key, String::from("alice")).is_added());
/// assert_eq!(cache.get::<String>(&key).value.as_deref(), Some("alice"));
/// assert_eq!(cache.stats().stats.purge_seconds, 0);
/// ```
pub struct RequestScopedProvider {
    resolve: Box<dyn Fn() -> ScopeStoreHandle + Send + Sync>,
}

impl RequestScopedProvider {
    /// A provider resolving its backing store through `factory` on every
    /// call.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> ScopeStoreHandle + Send + Sync + 'static,
    {
        Self {
            resolve: Box::new(factory),
        }
    }

    fn resolve_ttl(key: &CacheKey) -> Duration {
        match key.expiration_seconds() {
            0 => Duration::from_secs(DEFAULT_EXPIRATION_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

impl CacheProvider for RequestScopedProvider {
    fn location(&self) -> CacheLocation {
        CacheLocation::InContext
    }

    // The resolved store is a local, so the lock guard must be bound (or
    // the whole statement kept off the tail position) to drop before it.
    fn get_any(&self, key: &CacheKey, requested: TypeId) -> RawGet {
        let store = (self.resolve)();
        let mut guard = store.lock();
        guard.get(&key.slot(), requested, Instant::now())
    }

    fn put_any(
        &self,
        key: &CacheKey,
        value: Arc<dyn Any + Send + Sync>,
        type_id: TypeId,
    ) -> CacheResult {
        let ttl = Self::resolve_ttl(key);
        let store = (self.resolve)();
        let mut guard = store.lock();
        guard.put(key.slot(), value, type_id, Instant::now(), ttl)
    }

    fn delete_any(&self, key: &CacheKey) -> CacheResult {
        let store = (self.resolve)();
        let mut guard = store.lock();
        guard.delete(&key.slot())
    }

    fn clear_any(&self) -> CacheResult {
        let store = (self.resolve)();
        store.lock().clear();
        CacheResult::CLEARED
    }

    fn stats_any(&self) -> CacheStatistics {
        let store = (self.resolve)();
        let guard = store.lock();
        guard.snapshot(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheProviderExt;

    fn provider_over(handle: ScopeStoreHandle) -> RequestScopedProvider {
        RequestScopedProvider::new(move || Arc::clone(&handle))
    }

    #[test]
    fn test_round_trip_through_scope_store() {
        let scope: ScopeStoreHandle = Arc::new(Mutex::new(CacheStore::new()));
        let cache = provider_over(Arc::clone(&scope));
        let key = CacheKey::new("session", "token").unwrap();

        assert!(cache.put(&key, 99u64).is_added());
        let got = cache.get::<u64>(&key);
        assert!(got.is_hit());
        assert_eq!(got.value, Some(99));
        assert_eq!(got.location, CacheLocation::InContext);
    }

    #[test]
    fn test_purge_seconds_is_zero() {
        let scope: ScopeStoreHandle = Arc::new(Mutex::new(CacheStore::new()));
        let cache = provider_over(scope);
        assert_eq!(cache.stats().stats.purge_seconds, 0);
    }

    #[test]
    fn test_factory_resolves_current_scope_each_call() {
        // The provider outlives the scope it writes into: swapping the
        // store behind the factory swaps both entries and stats.
        let current: Arc<Mutex<ScopeStoreHandle>> =
            Arc::new(Mutex::new(Arc::new(Mutex::new(CacheStore::new()))));
        let resolver = Arc::clone(&current);
        let cache = RequestScopedProvider::new(move || Arc::clone(&resolver.lock()));

        let key = CacheKey::new("session", "user").unwrap();
        cache.put(&key, 1u8);
        assert!(cache.get::<u8>(&key).is_hit());
        assert_eq!(cache.stats().stats.put_count, 1);

        // New "request": fresh store, fresh stats, no explicit clear.
        *current.lock() = Arc::new(Mutex::new(CacheStore::new()));
        assert!(cache.get::<u8>(&key).is_miss());
        assert_eq!(cache.stats().stats.put_count, 0);
    }

    #[test]
    fn test_two_scopes_are_independent() {
        let scope_a: ScopeStoreHandle = Arc::new(Mutex::new(CacheStore::new()));
        let scope_b: ScopeStoreHandle = Arc::new(Mutex::new(CacheStore::new()));
        let cache_a = provider_over(Arc::clone(&scope_a));
        let cache_b = provider_over(Arc::clone(&scope_b));

        let key = CacheKey::new("r", "k").unwrap();
        cache_a.put(&key, 1u8);

        assert!(cache_a.get::<u8>(&key).is_hit());
        assert!(cache_b.get::<u8>(&key).is_miss());
    }
}
