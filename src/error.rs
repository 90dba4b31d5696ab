use crate::CacheLocation;
use thiserror::Error;

/// Errors raised by the cache configuration and key-construction surface.
///
/// Only true programming errors are reported this way: a malformed key or a
/// duplicate provider registration. Steady-state cache outcomes (miss,
/// expired, unavailable, added, updated, deleted, cleared) are never errors —
/// they travel through [`CacheResult`](crate::CacheResult) so the hot path
/// needs no error handling at all.
///
/// # Examples
///
/// ```
/// use cacheplex::{CacheError, CacheKey};
///
/// let err = CacheKey::new("", "order-42").unwrap_err();
/// assert!(matches!(err, CacheError::InvalidKey { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A cache key was constructed with an empty or blank region/base key.
    ///
    /// Raised synchronously, before any provider state is touched.
    #[error("invalid cache key: {reason}")]
    InvalidKey {
        /// Which part of the key was rejected and why.
        reason: &'static str,
    },

    /// A provider was registered for a location that already has one.
    ///
    /// Raised by [`CacheLocationRegistry`](crate::CacheLocationRegistry)
    /// only; providers themselves never produce this.
    #[error("Provider location already exists")]
    LocationOccupied {
        /// The location that was already taken.
        location: CacheLocation,
    },
}
