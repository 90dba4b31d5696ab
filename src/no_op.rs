use crate::provider::{CacheProvider, RawGet};
use crate::{CacheKey, CacheLocation, CacheResult, CacheStatistics};
use std::any::{Any, TypeId};
use std::sync::Arc;

/// A provider that never stores anything.
///
/// Exists so callers can disable caching through configuration without
/// branching call-site logic: register it for a location and every get,
/// put, and delete through that location is a miss, while clear still
/// reports `CLEARED` (there is just nothing to clear).
///
/// Nothing is ever considered a hit, so the statistics counters stay zero
/// permanently and `purge_seconds` is 0.
///
/// # Examples
///
/// ```
/// use cacheplex::{CacheKey, CacheProviderExt, NoOpProvider};
///
/// let cache = NoOpProvider::new();
/// let key = CacheKey::new("r", "k").unwrap();
///
/// assert!(!cache.put(&key, 1u8).is_put());
/// assert!(cache.get::<u8>(&key).is_miss());
/// assert_eq!(cache.stats().stats.put_count, 0);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProvider;

impl NoOpProvider {
    /// The no-op provider. All instances are equivalent.
    pub fn new() -> Self {
        Self
    }
}

impl CacheProvider for NoOpProvider {
    fn location(&self) -> CacheLocation {
        CacheLocation::None
    }

    fn get_any(&self, _key: &CacheKey, _requested: TypeId) -> RawGet {
        RawGet::miss(CacheResult::MISS)
    }

    fn put_any(
        &self,
        _key: &CacheKey,
        _value: Arc<dyn Any + Send + Sync>,
        _type_id: TypeId,
    ) -> CacheResult {
        CacheResult::MISS
    }

    fn delete_any(&self, _key: &CacheKey) -> CacheResult {
        CacheResult::MISS
    }

    fn clear_any(&self) -> CacheResult {
        CacheResult::CLEARED
    }

    fn stats_any(&self) -> CacheStatistics {
        CacheStatistics::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheProviderExt;

    #[test]
    fn test_get_always_misses() {
        let cache = NoOpProvider::new();
        let key = CacheKey::new("r", "k").unwrap();
        let got = cache.get::<u32>(&key);
        assert_eq!(got.result, CacheResult::MISS);
        assert!(got.value.is_none());
        assert_eq!(got.hits, 0);
    }

    #[test]
    fn test_put_does_not_persist() {
        let cache = NoOpProvider::new();
        let key = CacheKey::new("r", "k").unwrap();

        let put = cache.put(&key, 42u32);
        assert!(!put.is_put());
        assert!(put.result.is_miss());
        assert!(cache.get::<u32>(&key).is_miss());
    }

    #[test]
    fn test_delete_always_misses() {
        let cache = NoOpProvider::new();
        let key = CacheKey::new("r", "k").unwrap();
        assert!(cache.delete(&key).is_miss());
    }

    #[test]
    fn test_clear_reports_cleared() {
        let cache = NoOpProvider::new();
        assert!(cache.clear().is_cleared());
    }

    #[test]
    fn test_counters_stay_zero() {
        let cache = NoOpProvider::new();
        let key = CacheKey::new("r", "k").unwrap();

        cache.put(&key, 1u8);
        cache.get::<u8>(&key);
        cache.delete(&key);
        cache.clear();

        let stats = cache.stats().stats;
        assert_eq!(stats, CacheStatistics::default());
        assert_eq!(stats.purge_seconds, 0);
    }
}
