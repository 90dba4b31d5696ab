use std::any::{Any, TypeId};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Internal wrapper around one stored value.
///
/// Holds the type-erased payload, the identity of the type it was stored
/// as, the insertion/expiry timestamps, and the entry's lifetime hit
/// counter.
///
/// The stored `TypeId` is what makes a typed read of the wrong type a
/// controlled `MISS | UNAVAILABLE` outcome instead of a failed downcast
/// surfacing as a panic: the store compares tags before it ever touches the
/// payload.
///
/// An entry with `expires_at <= now` is logically absent even while still
/// physically present; the next get or put that observes it also evicts it
/// (lazy expiration). Correctness never depends on any background sweep.
///
/// A TTL too large for the clock to represent (`now + ttl` overflows
/// `Instant`) stores no deadline at all, so the entry simply never expires.
pub(crate) struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    inserted_at: Instant,
    expires_at: Option<Instant>,
    hits: u64,
}

impl CacheEntry {
    /// Creates a fresh entry expiring `ttl` after `now`.
    pub(crate) fn new(
        value: Arc<dyn Any + Send + Sync>,
        type_id: TypeId,
        now: Instant,
        ttl: Duration,
    ) -> Self {
        Self {
            value,
            type_id,
            inserted_at: now,
            expires_at: now.checked_add(ttl),
            hits: 0,
        }
    }

    /// True once the entry's lifetime has elapsed.
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// True if the entry was stored as the requested type.
    pub(crate) fn holds(&self, requested: TypeId) -> bool {
        self.type_id == requested
    }

    /// A handle to the stored payload.
    pub(crate) fn value(&self) -> Arc<dyn Any + Send + Sync> {
        Arc::clone(&self.value)
    }

    /// Records a successful read and returns the lifetime hit counter.
    pub(crate) fn record_read(&mut self) -> u64 {
        self.hits += 1;
        self.hits
    }

    /// Overwrites value, type tag, and timestamps in place.
    ///
    /// The hit counter is a lifetime counter of successful reads and is
    /// deliberately preserved across overwrites of a live entry.
    pub(crate) fn overwrite(
        &mut self,
        value: Arc<dyn Any + Send + Sync>,
        type_id: TypeId,
        now: Instant,
        ttl: Duration,
    ) {
        self.value = value;
        self.type_id = type_id;
        self.inserted_at = now;
        self.expires_at = now.checked_add(ttl);
    }

    #[cfg(test)]
    pub(crate) fn hits(&self) -> u64 {
        self.hits
    }
}
