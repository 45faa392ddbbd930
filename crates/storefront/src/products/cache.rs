//! Time-bounded cache of the normalized remote catalog.
//!
//! Holds one all-or-nothing snapshot of the remote feed plus the time it was
//! fetched. Within [`CATALOG_CACHE_TTL`] the snapshot is served without
//! touching the remote. Once it expires the next caller refreshes it:
//!
//! - success replaces the snapshot and its timestamp
//! - failure keeps the previous snapshot (or serves an empty list if there
//!   never was one) and leaves the timestamp alone, so the following call
//!   retries straight away
//!
//! Refreshes are single-flight. Callers that arrive while a refresh is in
//! progress wait for it and reuse its outcome instead of issuing their own
//! remote call.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use velour_core::Product;

use crate::remote::RemoteCatalog;

/// How long a successful fetch stays fresh.
pub const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used to drive expiry in tests.
#[derive(Debug)]
pub struct ManualClock {
    now: StdMutex<DateTime<Utc>>,
}

impl ManualClock {
    #[must_use]
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: StdMutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Snapshot {
    products: Arc<[Product]>,
    fetched_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheState {
    snapshot: Option<Snapshot>,
    /// Completed refresh attempts, successful or not.
    attempts: u64,
}

/// Cache of the normalized remote product list.
pub struct CatalogCache {
    remote: Arc<dyn RemoteCatalog>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    state: RwLock<CacheState>,
    refresh_lock: Mutex<()>,
}

impl CatalogCache {
    /// Create an empty cache with the standard one-hour expiry.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteCatalog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            remote,
            clock,
            ttl: TimeDelta::from_std(CATALOG_CACHE_TTL).unwrap_or(TimeDelta::MAX),
            state: RwLock::new(CacheState::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Current remote products: the cached snapshot while fresh, otherwise
    /// the result of a refresh (or stale-or-empty if the refresh fails).
    pub async fn get(&self) -> Arc<[Product]> {
        let seen_attempts = {
            let state = self.state.read().await;
            if let Some(products) = self.fresh(&state) {
                debug!("Catalog cache hit");
                return products;
            }
            state.attempts
        };

        let _refresh = self.refresh_lock.lock().await;

        {
            let state = self.state.read().await;
            if let Some(products) = self.fresh(&state) {
                return products;
            }
            // Someone else's attempt finished while we waited and left no
            // fresh data; share its outcome rather than calling again
            if state.attempts != seen_attempts {
                return stale_or_empty(&state);
            }
        }

        self.refresh().await
    }

    /// Time of the last successful fetch, if any.
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .read()
            .await
            .snapshot
            .as_ref()
            .map(|s| s.fetched_at)
    }

    fn fresh(&self, state: &CacheState) -> Option<Arc<[Product]>> {
        let snapshot = state.snapshot.as_ref()?;
        let age = self.clock.now().signed_duration_since(snapshot.fetched_at);
        (age < self.ttl).then(|| Arc::clone(&snapshot.products))
    }

    /// Fetch from the remote and update the snapshot. Caller holds the
    /// refresh lock.
    #[instrument(skip(self))]
    async fn refresh(&self) -> Arc<[Product]> {
        let started_at = self.clock.now();
        let result = self.remote.fetch_products().await;

        let mut state = self.state.write().await;
        state.attempts = state.attempts.wrapping_add(1);

        match result {
            Ok(products) => {
                info!(count = products.len(), "Refreshed external catalog");
                let products: Arc<[Product]> = products.into();
                state.snapshot = Some(Snapshot {
                    products: Arc::clone(&products),
                    fetched_at: started_at,
                });
                products
            }
            Err(e) => {
                warn!(
                    error = %e,
                    has_stale = state.snapshot.is_some(),
                    "Failed to refresh external catalog"
                );
                stale_or_empty(&state)
            }
        }
    }
}

fn stale_or_empty(state: &CacheState) -> Arc<[Product]> {
    state
        .snapshot
        .as_ref()
        .map_or_else(|| Arc::from(Vec::new()), |s| Arc::clone(&s.products))
}
