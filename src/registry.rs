use crate::{CacheError, CacheProvider};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

/// The backing-store variant a provider is registered under.
///
/// Locations are independent, non-replicated stores selected by the caller;
/// there is no tiering or promotion between them. The enum is
/// non-exhaustive so future locations can be added without breaking
/// downstream matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CacheLocation {
    /// Caching disabled; conventionally served by [`NoOpProvider`].
    ///
    /// [`NoOpProvider`]: crate::NoOpProvider
    None,
    /// Process-lifetime store; conventionally [`InProcessProvider`].
    ///
    /// [`InProcessProvider`]: crate::InProcessProvider
    InProcess,
    /// Request/scope-lifetime store; conventionally
    /// [`RequestScopedProvider`].
    ///
    /// [`RequestScopedProvider`]: crate::RequestScopedProvider
    InContext,
    /// An external store outside this process.
    OutOfProcess,
}

/// Binds each cache location to exactly one provider instance.
///
/// This is the wiring surface, not the hot path: populated at startup,
/// queried per request. At most one provider may occupy a location —
/// registering a second one fails with
/// [`CacheError::LocationOccupied`] regardless of the provider's concrete
/// type — while removing an unregistered location is a silent no-op.
///
/// # Examples
///
/// ```
/// use cacheplex::{
///     CacheLocation, CacheLocationRegistry, InProcessProvider, NoOpProvider,
/// };
/// use std::sync::Arc;
///
/// let registry = CacheLocationRegistry::new();
/// registry
///     .add_provider(CacheLocation::InProcess, Arc::new(InProcessProvider::new()))
///     .unwrap();
///
/// // Occupied location, even with a different provider type.
/// let err = registry
///     .add_provider(CacheLocation::InProcess, Arc::new(NoOpProvider::new()))
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Provider location already exists");
///
/// assert!(registry.get_provider(CacheLocation::InProcess).is_some());
/// assert!(registry.get_provider(CacheLocation::OutOfProcess).is_none());
///
/// registry.remove_provider(CacheLocation::OutOfProcess); // no-op, no error
/// ```
pub struct CacheLocationRegistry {
    providers: DashMap<CacheLocation, Arc<dyn CacheProvider>>,
}

impl CacheLocationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Registers `provider` for `location`.
    ///
    /// # Errors
    ///
    /// [`CacheError::LocationOccupied`] if the location already has a
    /// provider.
    pub fn add_provider(
        &self,
        location: CacheLocation,
        provider: Arc<dyn CacheProvider>,
    ) -> Result<(), CacheError> {
        match self.providers.entry(location) {
            Entry::Occupied(_) => Err(CacheError::LocationOccupied { location }),
            Entry::Vacant(vacant) => {
                vacant.insert(provider);
                debug!(?location, "cache provider registered");
                Ok(())
            }
        }
    }

    /// The provider registered for `location`, or `None` — an unregistered
    /// location is not an error.
    pub fn get_provider(&self, location: CacheLocation) -> Option<Arc<dyn CacheProvider>> {
        self.providers
            .get(&location)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Unregisters `location`. Idempotent: unknown locations are ignored.
    pub fn remove_provider(&self, location: CacheLocation) {
        if self.providers.remove(&location).is_some() {
            debug!(?location, "cache provider removed");
        }
    }
}

impl Default for CacheLocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide default registry.
///
/// Convenience for applications that wire caching once at startup and look
/// providers up from anywhere; libraries embedding this crate can just as
/// well own a [`CacheLocationRegistry`] instance instead.
pub fn global() -> &'static CacheLocationRegistry {
    static GLOBAL: Lazy<CacheLocationRegistry> = Lazy::new(CacheLocationRegistry::new);
    &GLOBAL
}
