use crate::{CacheKey, CacheLocation, CacheStatistics};
use bitflags::bitflags;

bitflags! {
    /// Combinable outcome flags describing exactly what one cache operation
    /// did.
    ///
    /// Every operation returns a combination of these flags rather than
    /// raising errors for ordinary cache outcomes: absence, expiry, and
    /// type mismatches are all first-class results.
    ///
    /// # Invariants
    ///
    /// * `HIT` and `MISS` are mutually exclusive on a get.
    /// * `EXPIRED` only ever appears together with `MISS`.
    /// * `UNAVAILABLE` only ever appears together with `MISS` (the stored
    ///   value exists but cannot be produced as the requested type; the
    ///   entry is left in place).
    /// * Put on a new or expired slot yields `ADDED | PUT`; put on a live
    ///   slot yields `UPDATED | PUT`.
    /// * Delete on a present slot (live or expired) yields `DELETED`;
    ///   delete on an absent slot yields `MISS`.
    /// * Get-or-put reports `HIT | PUT | ADDED` when it created the value
    ///   and plain `HIT` when it found one.
    ///
    /// # Examples
    ///
    /// ```
    /// use cacheplex::CacheResult;
    ///
    /// let expired_read = CacheResult::MISS | CacheResult::EXPIRED;
    /// assert!(expired_read.is_miss());
    /// assert!(expired_read.is_expired());
    /// assert!(!expired_read.is_hit());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CacheResult: u16 {
        /// The requested value was found (or, for get-or-put, ensured).
        const HIT = 1 << 0;
        /// The requested value could not be produced.
        const MISS = 1 << 1;
        /// A put created a new entry.
        const ADDED = 1 << 2;
        /// A put overwrote a live entry.
        const UPDATED = 1 << 3;
        /// A delete removed a present entry.
        const DELETED = 1 << 4;
        /// A clear emptied the store.
        const CLEARED = 1 << 5;
        /// A value was written.
        const PUT = 1 << 6;
        /// The miss was caused by entry expiry (always with `MISS`).
        const EXPIRED = 1 << 7;
        /// The miss was caused by a type mismatch (always with `MISS`).
        const UNAVAILABLE = 1 << 8;
    }
}

impl CacheResult {
    /// True if the operation found or ensured a value.
    pub fn is_hit(self) -> bool {
        self.contains(Self::HIT)
    }

    /// True if the operation could not produce a value.
    pub fn is_miss(self) -> bool {
        self.contains(Self::MISS)
    }

    /// True if a value was written.
    pub fn is_put(self) -> bool {
        self.contains(Self::PUT)
    }

    /// True if a put created a new entry.
    pub fn is_added(self) -> bool {
        self.contains(Self::ADDED)
    }

    /// True if a put overwrote a live entry.
    pub fn is_updated(self) -> bool {
        self.contains(Self::UPDATED)
    }

    /// True if a delete removed a present entry.
    pub fn is_deleted(self) -> bool {
        self.contains(Self::DELETED)
    }

    /// True if a clear emptied the store.
    pub fn is_cleared(self) -> bool {
        self.contains(Self::CLEARED)
    }

    /// True if the miss was caused by expiry.
    pub fn is_expired(self) -> bool {
        self.contains(Self::EXPIRED)
    }

    /// True if the miss was caused by a stored-type mismatch.
    pub fn is_unavailable(self) -> bool {
        self.contains(Self::UNAVAILABLE)
    }
}

/// Outcome of a typed read.
///
/// Carries the echoed key, the provider location, the outcome flags, the
/// value (on a hit), and the entry's lifetime hit counter after this read —
/// note that `hits` is per-entry, not the provider-global hit count.
#[derive(Debug, Clone)]
pub struct GetResult<T> {
    /// The key the operation addressed.
    pub key: CacheKey,
    /// The provider location that served the call.
    pub location: CacheLocation,
    /// Outcome flags.
    pub result: CacheResult,
    /// The value, present exactly when `result.is_hit()`.
    pub value: Option<T>,
    /// The entry's cumulative successful-read count after this call.
    pub hits: u64,
}

impl<T> GetResult<T> {
    /// True if a value was found or ensured.
    pub fn is_hit(&self) -> bool {
        self.result.is_hit()
    }

    /// True if no value could be produced.
    pub fn is_miss(&self) -> bool {
        self.result.is_miss()
    }

    /// True if the miss was caused by expiry.
    pub fn is_expired(&self) -> bool {
        self.result.is_expired()
    }

    /// True if the miss was caused by a stored-type mismatch.
    pub fn is_unavailable(&self) -> bool {
        self.result.is_unavailable()
    }
}

/// Outcome of a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutResult {
    /// The key the operation addressed.
    pub key: CacheKey,
    /// The provider location that served the call.
    pub location: CacheLocation,
    /// Outcome flags.
    pub result: CacheResult,
}

impl PutResult {
    /// True if a value was written.
    pub fn is_put(&self) -> bool {
        self.result.is_put()
    }

    /// True if the write created a new entry.
    pub fn is_added(&self) -> bool {
        self.result.is_added()
    }

    /// True if the write overwrote a live entry.
    pub fn is_updated(&self) -> bool {
        self.result.is_updated()
    }
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// The key the operation addressed.
    pub key: CacheKey,
    /// The provider location that served the call.
    pub location: CacheLocation,
    /// Outcome flags.
    pub result: CacheResult,
}

impl DeleteResult {
    /// True if a present entry was removed.
    pub fn is_deleted(&self) -> bool {
        self.result.is_deleted()
    }

    /// True if there was nothing to remove.
    pub fn is_miss(&self) -> bool {
        self.result.is_miss()
    }
}

/// Outcome of a clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearResult {
    /// The provider location that served the call.
    pub location: CacheLocation,
    /// Outcome flags.
    pub result: CacheResult,
}

impl ClearResult {
    /// True — clears always succeed; kept for call-site symmetry.
    pub fn is_cleared(&self) -> bool {
        self.result.is_cleared()
    }
}

/// A statistics snapshot together with the location it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsResult {
    /// The provider location that served the call.
    pub location: CacheLocation,
    /// The counter snapshot.
    pub stats: CacheStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss_are_distinct_bits() {
        assert!(CacheResult::HIT.is_hit());
        assert!(!CacheResult::HIT.is_miss());
        assert!(CacheResult::MISS.is_miss());
        assert!(!CacheResult::MISS.is_hit());
    }

    #[test]
    fn test_added_put_combination() {
        let result = CacheResult::ADDED | CacheResult::PUT;
        assert!(result.is_put());
        assert!(result.is_added());
        assert!(!result.is_updated());
    }

    #[test]
    fn test_expired_miss_combination() {
        let result = CacheResult::MISS | CacheResult::EXPIRED;
        assert!(result.is_miss());
        assert!(result.is_expired());
        assert!(!result.is_unavailable());
    }

    #[test]
    fn test_get_or_put_creation_flags() {
        let result = CacheResult::HIT | CacheResult::PUT | CacheResult::ADDED;
        assert!(result.is_hit());
        assert!(result.is_put());
        assert!(result.is_added());
    }

    #[test]
    fn test_get_result_predicates() {
        let got = GetResult::<i32> {
            key: CacheKey::new("r", "k").unwrap(),
            location: CacheLocation::InProcess,
            result: CacheResult::MISS | CacheResult::UNAVAILABLE,
            value: None,
            hits: 0,
        };
        assert!(got.is_miss());
        assert!(got.is_unavailable());
        assert!(!got.is_hit());
    }
}
