use crate::clock::{Clock, SystemClock};
use crate::provider::{CacheProvider, RawGet};
use crate::store::CacheStore;
use crate::{CacheKey, CacheLocation, CacheResult, CacheStatistics};
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Advertised background-purge interval, in seconds.
///
/// Reported through the statistics only. No sweeper thread is spawned:
/// every read and write re-validates expiry inline, so correctness never
/// depends on a background purge running.
pub const PURGE_SECONDS: u64 = 300;

/// Time-to-live applied when a key carries `expiration_seconds == 0`.
pub const DEFAULT_EXPIRATION_SECS: u64 = 300;

/// The primary engine: a process-lifetime, multi-reader/multi-writer store
/// with per-entry TTL and full statistics.
///
/// Values of any `Send + Sync + 'static` type can be stored; each entry
/// remembers the type it was stored as, and a typed read of the wrong type
/// is the controlled `MISS | UNAVAILABLE` outcome rather than a panic.
///
/// Expiration is lazy: an entry past its TTL is logically absent, and the
/// next get or put that observes it also evicts it. Deletes act on the
/// physical slot and report `DELETED` even for expired entries.
///
/// # Thread safety
///
/// A single `parking_lot::Mutex` guards the entry map and the statistics
/// counters as one unit, so a slot mutation and its counter increments are
/// linearizable together. Two threads racing to put the same absent key
/// serialize through the lock: exactly one observes `ADDED`, the other
/// `UPDATED`, and the counters account for exactly one net insertion. The
/// same property makes [`clear`](crate::CacheProviderExt::clear) an atomic
/// swap of entries and counters — no put can land between the two.
///
/// # Clock injection
///
/// The provider is generic over a [`Clock`] so expiry can be driven
/// deterministically in tests; [`InProcessProvider::with_clock`] is the
/// injectable/testable constructor. Production code uses
/// [`InProcessProvider::new`], which reads `Instant::now()`.
///
/// # Examples
///
/// ```
/// use cacheplex::{CacheKey, CacheProviderExt, InProcessProvider};
///
/// let cache = InProcessProvider::new();
/// let key = CacheKey::with_expiration("region-A", "order-42", 12).unwrap();
///
/// assert!(cache.put(&key, 42u64).is_added());
/// assert_eq!(cache.get::<u64>(&key).hits, 1);
/// assert_eq!(cache.get::<u64>(&key).hits, 2);
/// assert!(cache.delete(&key).is_deleted());
/// assert!(cache.get::<u64>(&key).is_miss());
/// ```
///
/// Deterministic expiry with an injected clock:
///
/// ```
/// use cacheplex::{CacheKey, CacheProviderExt, InProcessProvider, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let cache = InProcessProvider::with_clock(clock.clone());
/// let key = CacheKey::with_expiration("r", "k", 1).unwrap();
///
/// cache.put(&key, 1u8);
/// clock.advance(Duration::from_secs(2));
/// assert!(cache.get::<u8>(&key).is_expired());
/// ```
pub struct InProcessProvider<C: Clock = SystemClock> {
    store: Mutex<CacheStore>,
    clock: C,
}

impl InProcessProvider<SystemClock> {
    /// A provider on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InProcessProvider<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InProcessProvider<C> {
    /// The injectable/testable constructor: same engine, caller-supplied
    /// time source.
    pub fn with_clock(clock: C) -> Self {
        Self {
            store: Mutex::new(CacheStore::new()),
            clock,
        }
    }

    fn resolve_ttl(&self, key: &CacheKey) -> Duration {
        match key.expiration_seconds() {
            0 => Duration::from_secs(DEFAULT_EXPIRATION_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

impl<C: Clock> CacheProvider for InProcessProvider<C> {
    fn location(&self) -> CacheLocation {
        CacheLocation::InProcess
    }

    fn get_any(&self, key: &CacheKey, requested: TypeId) -> RawGet {
        let now = self.clock.now();
        self.store.lock().get(&key.slot(), requested, now)
    }

    fn put_any(
        &self,
        key: &CacheKey,
        value: Arc<dyn Any + Send + Sync>,
        type_id: TypeId,
    ) -> CacheResult {
        let now = self.clock.now();
        let ttl = self.resolve_ttl(key);
        self.store.lock().put(key.slot(), value, type_id, now, ttl)
    }

    fn delete_any(&self, key: &CacheKey) -> CacheResult {
        self.store.lock().delete(&key.slot())
    }

    fn clear_any(&self) -> CacheResult {
        self.store.lock().clear();
        debug!(location = ?self.location(), "cache cleared");
        CacheResult::CLEARED
    }

    fn stats_any(&self) -> CacheStatistics {
        self.store.lock().snapshot(PURGE_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CacheProviderExt, ManualClock};

    #[test]
    fn test_put_new_then_overwrite() {
        let cache = InProcessProvider::new();
        let key = CacheKey::new("r", "k").unwrap();

        assert!(cache.put(&key, 1u32).is_added());
        assert!(cache.put(&key, 2u32).is_updated());
        assert_eq!(cache.get::<u32>(&key).value, Some(2));
    }

    #[test]
    fn test_default_ttl_applies_when_key_has_none() {
        let clock = ManualClock::new();
        let cache = InProcessProvider::with_clock(clock.clone());
        let key = CacheKey::new("r", "k").unwrap();

        cache.put(&key, 1u8);
        clock.advance(Duration::from_secs(DEFAULT_EXPIRATION_SECS - 1));
        assert!(cache.get::<u8>(&key).is_hit());
        clock.advance(Duration::from_secs(2));
        assert!(cache.get::<u8>(&key).is_expired());
    }

    #[test]
    fn test_expired_get_evicts_and_counts() {
        let clock = ManualClock::new();
        let cache = InProcessProvider::with_clock(clock.clone());
        let key = CacheKey::with_expiration("r", "k", 1).unwrap();

        cache.put(&key, 1u8);
        clock.advance(Duration::from_secs(2));

        let got = cache.get::<u8>(&key);
        assert_eq!(got.result, CacheResult::MISS | CacheResult::EXPIRED);

        let stats = cache.stats().stats;
        assert_eq!(stats.key_count, 0);
        assert_eq!(stats.expired_hit_count, 1);
    }

    #[test]
    fn test_put_renews_expiry_and_keeps_entry_hits() {
        let clock = ManualClock::new();
        let cache = InProcessProvider::with_clock(clock.clone());
        let key = CacheKey::with_expiration("r", "k", 10).unwrap();

        cache.put(&key, 1u32);
        assert_eq!(cache.get::<u32>(&key).hits, 1);

        clock.advance(Duration::from_secs(8));
        cache.put(&key, 2u32);
        clock.advance(Duration::from_secs(8));

        // Still live: the overwrite renewed the TTL. Hit counter carried on.
        let got = cache.get::<u32>(&key);
        assert!(got.is_hit());
        assert_eq!(got.value, Some(2));
        assert_eq!(got.hits, 2);
    }

    #[test]
    fn test_clear_resets_counters_but_not_purge_interval() {
        let cache = InProcessProvider::new();
        let key = CacheKey::new("r", "k").unwrap();
        cache.put(&key, 1u8);
        cache.get::<u8>(&key);
        cache.delete(&key);

        assert!(cache.clear().is_cleared());

        let stats = cache.stats().stats;
        assert_eq!(stats.hit_count, 0);
        assert_eq!(stats.put_count, 0);
        assert_eq!(stats.delete_hit_count, 0);
        assert_eq!(stats.key_count, 0);
        assert_eq!(stats.purge_seconds, PURGE_SECONDS);
    }

    #[test]
    fn test_stats_reports_in_process_location() {
        let cache = InProcessProvider::new();
        assert_eq!(cache.stats().location, CacheLocation::InProcess);
        assert_eq!(cache.stats().stats.purge_seconds, 300);
    }
}
