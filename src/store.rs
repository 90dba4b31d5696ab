use crate::entry::CacheEntry;
use crate::key::SlotId;
use crate::provider::RawGet;
use crate::stats::{CacheStatistics, CounterBlock};
use crate::CacheResult;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

/// The entry map and statistics counters of one cache, mutated together.
///
/// Both the in-process and the request-scoped provider drive the same
/// per-slot state machine (absent → live → expired → evicted); this struct
/// is that state machine. The providers differ only in where the store
/// lives: the in-process provider owns one for the process lifetime, while
/// the request-scoped provider re-resolves a caller-owned store on every
/// call.
///
/// Entries and counters sit in one struct on purpose: a provider guards the
/// whole thing with a single `parking_lot::Mutex`, so an entry mutation and
/// its counter increments are one linearizable unit and clear is an atomic
/// swap of both. Counter totals stay exact under arbitrary contention.
///
/// # Examples
///
/// A per-request scope store for [`RequestScopedProvider`]:
///
/// ```
/// use cacheplex::{CacheStore, RequestScopedProvider};
/// use parking_lot::Mutex;
/// use std::sync::Arc;
///
/// let scope = Arc::new(Mutex::new(CacheStore::new()));
/// let handle = Arc::clone(&scope);
/// let provider = RequestScopedProvider::new(move || Arc::clone(&handle));
/// # let _ = provider;
/// ```
///
/// [`RequestScopedProvider`]: crate::RequestScopedProvider
pub struct CacheStore {
    entries: HashMap<SlotId, CacheEntry>,
    counters: CounterBlock,
}

impl CacheStore {
    /// An empty store with zeroed counters.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            counters: CounterBlock::new(),
        }
    }

    /// Looks up `slot`, enforcing expiry and the stored-type tag.
    ///
    /// Expired entries are evicted as a side effect of being observed.
    /// Type-mismatched entries are left in place; only the read fails.
    pub(crate) fn get(&mut self, slot: &SlotId, requested: TypeId, now: Instant) -> RawGet {
        let expired = match self.entries.get(slot) {
            None => {
                self.counters.record_miss();
                return RawGet::miss(CacheResult::MISS);
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.entries.remove(slot);
            self.counters.record_expired_miss();
            trace!(region = %slot.region, base_key = %slot.base_key, "evicted expired entry on read");
            return RawGet::miss(CacheResult::MISS | CacheResult::EXPIRED);
        }

        // Live entry; borrow mutably for the hit-counter update.
        let entry = match self.entries.get_mut(slot) {
            Some(entry) => entry,
            None => {
                self.counters.record_miss();
                return RawGet::miss(CacheResult::MISS);
            }
        };

        if !entry.holds(requested) {
            self.counters.record_unavailable();
            return RawGet::miss(CacheResult::MISS | CacheResult::UNAVAILABLE);
        }

        let hits = entry.record_read();
        let value = entry.value();
        self.counters.record_get_hit();
        RawGet {
            result: CacheResult::HIT,
            value: Some(value),
            hits,
        }
    }

    /// Creates or overwrites the entry under `slot`.
    ///
    /// A live entry is overwritten in place (`UPDATED | PUT`), keeping its
    /// lifetime hit counter. An absent or expired slot gets a fresh entry
    /// (`ADDED | PUT`) — an expired entry was already logically absent, so
    /// overwriting it is an add, not an update.
    pub(crate) fn put(
        &mut self,
        slot: SlotId,
        value: Arc<dyn Any + Send + Sync>,
        type_id: TypeId,
        now: Instant,
        ttl: Duration,
    ) -> CacheResult {
        let result = match self.entries.get_mut(&slot) {
            Some(entry) if !entry.is_expired(now) => {
                entry.overwrite(value, type_id, now, ttl);
                CacheResult::UPDATED | CacheResult::PUT
            }
            _ => {
                self.entries
                    .insert(slot, CacheEntry::new(value, type_id, now, ttl));
                CacheResult::ADDED | CacheResult::PUT
            }
        };
        self.counters.record_put();
        result
    }

    /// Removes the entry under `slot` if physically present.
    ///
    /// A present entry is removed and reported `DELETED` even when already
    /// expired — delete acts on the physical slot.
    pub(crate) fn delete(&mut self, slot: &SlotId) -> CacheResult {
        if self.entries.remove(slot).is_some() {
            self.counters.record_delete_hit();
            CacheResult::DELETED
        } else {
            self.counters.record_delete_miss();
            CacheResult::MISS
        }
    }

    /// Drops every entry and zeroes every counter in one go.
    ///
    /// Callers hold the store lock across this, so no concurrent put can
    /// land between the entry wipe and the counter reset.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.counters.reset();
    }

    /// Counter snapshot with the live key count filled in.
    pub(crate) fn snapshot(&self, purge_seconds: u64) -> CacheStatistics {
        self.counters
            .snapshot(self.entries.len() as u64, purge_seconds)
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
