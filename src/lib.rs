//! # Cacheplex
//!
//! A pluggable, multi-location object cache: store and retrieve arbitrary
//! typed values under a structured key while the cache tracks hits, misses,
//! expirations, and type-mismatch failures, committing to at most one
//! authoritative value per key at any time.
//!
//! ## Features
//!
//! - **Structured keys**: a region + base key identity with a per-key TTL
//!   hint ([`CacheKey`])
//! - **Outcome algebra**: every operation returns combinable
//!   [`CacheResult`] flags (`HIT`, `MISS | EXPIRED`, `ADDED | PUT`, ...)
//!   instead of raising errors for ordinary cache outcomes
//! - **Lazy expiration**: expired entries are detected and evicted on the
//!   next access; no background sweep is required for correctness
//! - **Type-safe dynamic storage**: values are stored with a type tag, and
//!   reading a slot as the wrong type is a controlled `MISS | UNAVAILABLE`
//! - **Exact statistics**: entry mutations and counter increments share one
//!   critical section, so totals are exact even under heavy contention
//! - **Provider polymorphism**: the same call-site logic runs against a
//!   process-lifetime store ([`InProcessProvider`]), a request-scoped store
//!   ([`RequestScopedProvider`]), or a disabled cache ([`NoOpProvider`]),
//!   selected through the [`CacheLocationRegistry`]
//!
//! ## Quick Start
//!
//! ```
//! use cacheplex::{CacheKey, CacheProviderExt, InProcessProvider};
//!
//! let cache = InProcessProvider::new();
//! let key = CacheKey::with_expiration("region-A", "order-42", 12).unwrap();
//!
//! let put = cache.put(&key, 42u64);
//! assert!(put.is_added());
//!
//! let got = cache.get::<u64>(&key);
//! assert!(got.is_hit());
//! assert_eq!(got.value, Some(42));
//! assert_eq!(got.hits, 1);
//!
//! assert!(cache.delete(&key).is_deleted());
//! assert!(cache.get::<u64>(&key).is_miss());
//! ```
//!
//! ## Selecting a location
//!
//! ```
//! use cacheplex::{
//!     CacheKey, CacheLocation, CacheLocationRegistry, CacheProviderExt,
//!     InProcessProvider, NoOpProvider,
//! };
//! use std::sync::Arc;
//!
//! let registry = CacheLocationRegistry::new();
//! registry
//!     .add_provider(CacheLocation::InProcess, Arc::new(InProcessProvider::new()))
//!     .unwrap();
//! registry
//!     .add_provider(CacheLocation::None, Arc::new(NoOpProvider::new()))
//!     .unwrap();
//!
//! // The call site does not care which variant it got.
//! let cache = registry.get_provider(CacheLocation::InProcess).unwrap();
//! let key = CacheKey::new("users", "user-7").unwrap();
//! cache.put(&key, String::from("alice"));
//! assert!(cache.get::<String>(&key).is_hit());
//! ```
//!
//! ## Module Organization
//!
//! - [`key`](CacheKey) - structured cache-key identity
//! - [`result`](CacheResult) - outcome flags and typed operation results
//! - [`stats`](CacheStatistics) - per-provider statistics snapshots
//! - [`provider`](CacheProvider) - the capability contract and its typed
//!   extension surface
//! - [`registry`](CacheLocationRegistry) - location-to-provider wiring
//!
#![warn(missing_docs)]

mod clock;
mod entry;
mod error;
mod in_process;
mod key;
mod no_op;
mod provider;
mod registry;
mod request_scoped;
mod result;
mod stats;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CacheError;
pub use in_process::{InProcessProvider, DEFAULT_EXPIRATION_SECS, PURGE_SECONDS};
pub use key::CacheKey;
pub use no_op::NoOpProvider;
pub use provider::{CacheProvider, CacheProviderExt, RawGet};
pub use registry::{global, CacheLocation, CacheLocationRegistry};
pub use request_scoped::{RequestScopedProvider, ScopeStoreHandle};
pub use result::{
    CacheResult, ClearResult, DeleteResult, GetResult, PutResult, StatsResult,
};
pub use stats::CacheStatistics;
pub use store::CacheStore;
