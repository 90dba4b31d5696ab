/// A point-in-time snapshot of one provider's statistics.
///
/// Snapshots are plain values: reading one never blocks other operations
/// beyond the single store lock acquisition, and the counters in a snapshot
/// are mutually consistent (they were read inside one critical section).
///
/// Counters are monotonically increasing between clears; a clear is the only
/// operation that resets them (the `purge_seconds` constant survives).
///
/// One accounting quirk is deliberate: puts and delete-hits count toward
/// `hit_count`. In this model `hit_count` tallies every successful cache
/// operation, not just reads.
///
/// # Examples
///
/// ```
/// use cacheplex::{CacheKey, CacheProviderExt, InProcessProvider};
///
/// let cache = InProcessProvider::new();
/// let key = CacheKey::new("orders", "order-1").unwrap();
/// cache.put(&key, 42u64);
/// cache.get::<u64>(&key);
///
/// let stats = cache.stats().stats;
/// assert_eq!(stats.put_count, 1);
/// assert_eq!(stats.get_hit_count, 1);
/// assert_eq!(stats.hit_count, 2); // put counts as a hit too
/// assert_eq!(stats.key_count, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Number of live (non-evicted) entries at snapshot time.
    pub key_count: u64,
    /// Lifetime successful operations: get hits, puts, and delete hits.
    pub hit_count: u64,
    /// Lifetime misses: absent reads, expired reads, and delete misses.
    pub miss_count: u64,
    /// Hits attributable specifically to get calls.
    pub get_hit_count: u64,
    /// Deletes that removed a present entry.
    pub delete_hit_count: u64,
    /// Deletes that found nothing to remove.
    pub delete_miss_count: u64,
    /// Reads that failed because the stored type did not match.
    pub serialization_failure_count: u64,
    /// Lifetime writes.
    pub put_count: u64,
    /// Misses caused specifically by expiry.
    pub expired_hit_count: u64,
    /// The provider's advertised background-purge interval. A constant, not
    /// a counter: 300 for the in-process provider, 0 for providers that do
    /// not background-purge. Never reset by clear.
    pub purge_seconds: u64,
}

impl CacheStatistics {
    /// The counters as a named list, in a stable order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cacheplex::CacheStatistics;
    ///
    /// let stats = CacheStatistics::default();
    /// let names: Vec<&str> = stats.entries().iter().map(|(n, _)| *n).collect();
    /// assert!(names.contains(&"hit_count"));
    /// assert!(names.contains(&"purge_seconds"));
    /// ```
    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("key_count", self.key_count),
            ("hit_count", self.hit_count),
            ("miss_count", self.miss_count),
            ("get_hit_count", self.get_hit_count),
            ("delete_hit_count", self.delete_hit_count),
            ("delete_miss_count", self.delete_miss_count),
            ("serialization_failure_count", self.serialization_failure_count),
            ("put_count", self.put_count),
            ("expired_hit_count", self.expired_hit_count),
            ("purge_seconds", self.purge_seconds),
        ]
    }
}

/// The mutable counters of one provider instance.
///
/// Lives *inside* the provider's store lock, next to the entry map, so every
/// entry mutation and its counter increments form one critical section. That
/// is what makes totals exact under contention: two racing puts on the same
/// absent slot serialize through the lock, so exactly one records the add.
#[derive(Debug, Default)]
pub(crate) struct CounterBlock {
    hit_count: u64,
    miss_count: u64,
    get_hit_count: u64,
    delete_hit_count: u64,
    delete_miss_count: u64,
    serialization_failure_count: u64,
    put_count: u64,
    expired_hit_count: u64,
}

impl CounterBlock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A get found a live, type-correct entry.
    pub(crate) fn record_get_hit(&mut self) {
        self.hit_count += 1;
        self.get_hit_count += 1;
    }

    /// A get found nothing under the slot.
    pub(crate) fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    /// A get found an expired entry (and evicted it).
    pub(crate) fn record_expired_miss(&mut self) {
        self.miss_count += 1;
        self.expired_hit_count += 1;
    }

    /// A get found a live entry of the wrong type. The entry stays put;
    /// only the serialization-failure counter moves.
    pub(crate) fn record_unavailable(&mut self) {
        self.serialization_failure_count += 1;
    }

    /// A value was written. Puts count toward `hit_count` as well.
    pub(crate) fn record_put(&mut self) {
        self.put_count += 1;
        self.hit_count += 1;
    }

    /// A delete removed a present entry.
    pub(crate) fn record_delete_hit(&mut self) {
        self.delete_hit_count += 1;
        self.hit_count += 1;
    }

    /// A delete found nothing to remove.
    pub(crate) fn record_delete_miss(&mut self) {
        self.delete_miss_count += 1;
        self.miss_count += 1;
    }

    /// Zeroes every counter. Only clear calls this.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot with the live key count and purge constant filled in.
    pub(crate) fn snapshot(&self, key_count: u64, purge_seconds: u64) -> CacheStatistics {
        CacheStatistics {
            key_count,
            hit_count: self.hit_count,
            miss_count: self.miss_count,
            get_hit_count: self.get_hit_count,
            delete_hit_count: self.delete_hit_count,
            delete_miss_count: self.delete_miss_count,
            serialization_failure_count: self.serialization_failure_count,
            put_count: self.put_count,
            expired_hit_count: self.expired_hit_count,
            purge_seconds,
        }
    }
}
