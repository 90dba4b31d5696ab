use crate::CacheError;

/// Immutable identity for a cached value: a region, a base key, and a
/// time-to-live hint.
///
/// Two keys address the same storage slot if and only if their region and
/// base key are equal (case-sensitive). The expiration only affects how long
/// a freshly written entry lives; it is *not* part of the identity, so the
/// same logical slot can be written with one TTL and later re-written with
/// another.
///
/// Keys are cheap to construct and are built by the caller before every
/// operation. Providers never retain the `CacheKey` itself — they copy the
/// identity fields into their own [`SlotId`] and compute expiry from the
/// resolved TTL at write time.
///
/// # Expiration
///
/// `expiration_seconds == 0` means "use the provider default" (300 seconds
/// for the in-process provider). Any other value is taken literally.
///
/// # Examples
///
/// ```
/// use cacheplex::CacheKey;
///
/// let key = CacheKey::new("orders", "order-42").unwrap();
/// assert_eq!(key.region(), "orders");
/// assert_eq!(key.base_key(), "order-42");
/// assert_eq!(key.expiration_seconds(), 0); // provider default
///
/// let short_lived = CacheKey::with_expiration("orders", "order-42", 12).unwrap();
/// assert_eq!(short_lived.expiration_seconds(), 12);
///
/// // Empty identity parts are rejected before any cache state is touched.
/// assert!(CacheKey::new("", "order-42").is_err());
/// assert!(CacheKey::new("orders", "  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    region: String,
    base_key: String,
    expiration_seconds: u64,
}

impl CacheKey {
    /// Creates a key with the provider-default expiration (0 = default).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKey`] if `region` or `base_key` is empty
    /// or whitespace-only.
    pub fn new(
        region: impl Into<String>,
        base_key: impl Into<String>,
    ) -> Result<Self, CacheError> {
        Self::with_expiration(region, base_key, 0)
    }

    /// Creates a key with an explicit time-to-live in seconds.
    ///
    /// A TTL of 0 defers to the provider default.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKey`] if `region` or `base_key` is empty
    /// or whitespace-only.
    pub fn with_expiration(
        region: impl Into<String>,
        base_key: impl Into<String>,
        expiration_seconds: u64,
    ) -> Result<Self, CacheError> {
        let region = region.into();
        let base_key = base_key.into();
        if region.trim().is_empty() {
            return Err(CacheError::InvalidKey {
                reason: "region must not be empty",
            });
        }
        if base_key.trim().is_empty() {
            return Err(CacheError::InvalidKey {
                reason: "base key must not be empty",
            });
        }
        Ok(Self {
            region,
            base_key,
            expiration_seconds,
        })
    }

    /// The namespacing segment of the key.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The key identity within the region.
    pub fn base_key(&self) -> &str {
        &self.base_key
    }

    /// Requested time-to-live in seconds; 0 means the provider default.
    pub fn expiration_seconds(&self) -> u64 {
        self.expiration_seconds
    }

    /// The storage-slot identity this key addresses.
    pub(crate) fn slot(&self) -> SlotId {
        SlotId {
            region: self.region.clone(),
            base_key: self.base_key.clone(),
        }
    }
}

/// Provider-side copy of the identity fields of a [`CacheKey`].
///
/// Hash/equality cover region and base key only, so expiration never leaks
/// into slot identity. Providers key their entry maps by `SlotId` rather
/// than holding on to caller-built `CacheKey` instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SlotId {
    pub(crate) region: String,
    pub(crate) base_key: String,
}
