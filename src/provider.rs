use crate::{
    CacheKey, CacheLocation, CacheResult, CacheStatistics, ClearResult, DeleteResult, GetResult,
    PutResult, StatsResult,
};
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Type-erased outcome of a raw read, before downcasting.
///
/// Produced by [`CacheProvider::get_any`] and consumed by the typed
/// [`CacheProviderExt::get`] wrapper. `hits` is the entry's lifetime
/// successful-read counter after the call, or 0 on a miss.
#[derive(Clone)]
pub struct RawGet {
    /// Outcome flags.
    pub result: CacheResult,
    /// The stored payload, present exactly on a hit.
    pub value: Option<Arc<dyn Any + Send + Sync>>,
    /// The entry's lifetime hit counter after this read.
    pub hits: u64,
}

impl RawGet {
    pub(crate) fn miss(result: CacheResult) -> Self {
        Self {
            result,
            value: None,
            hits: 0,
        }
    }
}

/// The capability contract every cache location implements.
///
/// This is the object-safe core: values cross it type-erased as
/// `Arc<dyn Any + Send + Sync>` plus a `TypeId` tag, which is what lets the
/// location registry hand out `Arc<dyn CacheProvider>` without knowing
/// value types. The methods here return raw outcomes; call sites use the
/// typed surface of [`CacheProviderExt`] instead, which is
/// blanket-implemented on top of this trait and wraps every outcome in its
/// result struct. Only `location` is meant to be called directly.
///
/// Each variant — [`InProcessProvider`], [`RequestScopedProvider`],
/// [`NoOpProvider`] — independently implements the full contract; there is
/// no shared base with overridable hooks, because their storage-lifetime
/// semantics differ fundamentally (process lifetime vs. scope lifetime vs.
/// nothing at all).
///
/// # Concurrency
///
/// Every method must be safely callable from arbitrary threads against the
/// same instance, with per-slot mutations and their counter increments
/// linearizable as one unit. None of the operations perform I/O or block
/// indefinitely.
///
/// [`InProcessProvider`]: crate::InProcessProvider
/// [`RequestScopedProvider`]: crate::RequestScopedProvider
/// [`NoOpProvider`]: crate::NoOpProvider
pub trait CacheProvider: Send + Sync {
    /// The location this provider serves.
    fn location(&self) -> CacheLocation;

    /// Type-erased read of the slot addressed by `key`, checked against the
    /// requested `TypeId`.
    fn get_any(&self, key: &CacheKey, requested: TypeId) -> RawGet;

    /// Type-erased write of `value` (stored as `type_id`) under `key`.
    fn put_any(
        &self,
        key: &CacheKey,
        value: Arc<dyn Any + Send + Sync>,
        type_id: TypeId,
    ) -> CacheResult;

    /// Removes the slot addressed by `key`, reporting the raw outcome
    /// flags.
    fn delete_any(&self, key: &CacheKey) -> CacheResult;

    /// Removes every entry and zeroes the statistics counters (except the
    /// purge-interval constant).
    fn clear_any(&self) -> CacheResult;

    /// A consistent snapshot of this provider's statistics.
    fn stats_any(&self) -> CacheStatistics;
}

/// The typed call-site surface over [`CacheProvider`].
///
/// Blanket-implemented for every provider, including `dyn CacheProvider`,
/// so the same call-site code works whether the provider is a concrete type
/// or an `Arc<dyn CacheProvider>` pulled from the registry. Importing this
/// one trait brings in the whole operation surface — `get`, `put`,
/// `delete`, `clear`, `stats`, and the get-or-put combinators.
///
/// # Examples
///
/// ```
/// use cacheplex::{CacheKey, CacheProviderExt, InProcessProvider};
///
/// let cache = InProcessProvider::new();
/// let key = CacheKey::with_expiration("orders", "order-42", 12).unwrap();
///
/// assert!(cache.put(&key, 42u64).is_added());
/// let got = cache.get::<u64>(&key);
/// assert!(got.is_hit());
/// assert_eq!(got.value, Some(42));
/// assert_eq!(got.hits, 1);
///
/// // Reading as the wrong type is a controlled miss, never a panic.
/// assert!(cache.get::<String>(&key).is_unavailable());
///
/// assert!(cache.delete(&key).is_deleted());
/// assert_eq!(cache.stats().stats.delete_hit_count, 1);
/// assert!(cache.clear().is_cleared());
/// ```
pub trait CacheProviderExt: CacheProvider {
    /// Typed read. The value is cloned out of the store on a hit.
    fn get<T>(&self, key: &CacheKey) -> GetResult<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let raw = self.get_any(key, TypeId::of::<T>());
        let value = raw
            .value
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| (*v).clone());
        GetResult {
            key: key.clone(),
            location: self.location(),
            result: raw.result,
            value,
            hits: raw.hits,
        }
    }

    /// Typed write.
    fn put<T>(&self, key: &CacheKey, value: T) -> PutResult
    where
        T: Send + Sync + 'static,
    {
        let result = self.put_any(key, Arc::new(value), TypeId::of::<T>());
        PutResult {
            key: key.clone(),
            location: self.location(),
            result,
        }
    }

    /// Removes the slot addressed by `key`.
    ///
    /// Delete acts on the physical slot: a present entry is removed and
    /// reported `DELETED` even when already expired.
    fn delete(&self, key: &CacheKey) -> DeleteResult {
        DeleteResult {
            key: key.clone(),
            location: self.location(),
            result: self.delete_any(key),
        }
    }

    /// Removes every entry and zeroes the statistics counters (except the
    /// purge-interval constant).
    fn clear(&self) -> ClearResult {
        ClearResult {
            location: self.location(),
            result: self.clear_any(),
        }
    }

    /// A consistent snapshot of this provider's statistics.
    fn stats(&self) -> StatsResult {
        StatsResult {
            location: self.location(),
            stats: self.stats_any(),
        }
    }

    /// Ensures a value is present under `key`, then reads it.
    ///
    /// A hit returns unchanged. On any miss — absent, expired, or stored as
    /// another type — the factory runs, its value is put, and the creation
    /// is reported as `HIT | PUT | ADDED` (always a fresh add, even when
    /// the put internally overwrote a mismatched live entry). The reported
    /// `hits` is 0 on the creation path: the new entry has no reads yet.
    ///
    /// Providers whose put does not persist (the no-op provider) report the
    /// put outcome instead, so a disabled cache never fabricates a hit.
    fn get_or_put<T, F>(&self, key: &CacheKey, factory: F) -> GetResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let found = self.get::<T>(key);
        if found.is_hit() {
            return found;
        }

        let value = factory();
        let put_result = self.put_any(key, Arc::new(value.clone()), TypeId::of::<T>());
        let result = if put_result.is_put() {
            CacheResult::HIT | CacheResult::PUT | CacheResult::ADDED
        } else {
            put_result
        };
        GetResult {
            key: key.clone(),
            location: self.location(),
            result,
            value: Some(value),
            hits: 0,
        }
    }

    /// Value-only variant of [`get_or_put`](Self::get_or_put), for callers
    /// that do not need the outcome flags.
    ///
    /// The key factory runs once per call; the value factory only on a
    /// miss.
    fn get_or_put_value<T, KF, VF>(&self, key_factory: KF, value_factory: VF) -> T
    where
        T: Clone + Send + Sync + 'static,
        KF: FnOnce() -> CacheKey,
        VF: FnOnce() -> T,
    {
        let key = key_factory();
        let found = self.get::<T>(&key);
        if let Some(value) = found.value {
            return value;
        }
        let value = value_factory();
        self.put_any(&key, Arc::new(value.clone()), TypeId::of::<T>());
        value
    }
}

impl<P: CacheProvider + ?Sized> CacheProviderExt for P {}
