//! Cache module for memoizing fetched resources.
//!
//! Every locator is fetched at most once per [`Fetcher`]; later lookups are
//! served from memory for as long as the fetcher lives. Nothing is written
//! to disk.
use std::collections::HashSet;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

use anyhow::{Context, Result, anyhow};
use cached::{Cached, UnboundCache};
use log::{debug, info};

use crate::client::Transport;
use crate::entity::Entity;

/// Fetched entities keyed by locator.
pub type EntityCache = UnboundCache<String, Entity>;

/// Shared state behind the fetcher's lock.
struct CacheState
{
    /// Completed fetches
    entries: EntityCache,
    /// Locators currently being fetched by some thread
    in_flight: HashSet<String>,
}

/// Memoizing front of a [`Transport`].
///
/// Concurrent requests for the same locator are collapsed: the first caller
/// performs the request and the others wait for its result. Failed fetches
/// are not remembered.
pub struct Fetcher<T>
{
    /// Where cache misses go
    transport: T,
    /// Cache and in-flight bookkeeping
    state: Mutex<CacheState>,
    /// Signalled whenever an in-flight fetch finishes
    settled: Condvar,
}

impl<T: Transport> Fetcher<T>
{
    /// Creates a fetcher with an empty cache.
    ///
    /// # Arguments
    ///
    /// * `transport` - Used for every cache miss
    #[must_use]
    pub fn new(transport: T) -> Self
    {
        Self::with_cache(transport, UnboundCache::new())
    }

    /// Creates a fetcher over an existing cache.
    ///
    /// # Arguments
    ///
    /// * `transport` - Used for every cache miss
    /// * `cache` - Initial contents, keyed by locator
    #[must_use]
    pub fn with_cache(transport: T, cache: EntityCache) -> Self
    {
        Self {
            transport,
            state: Mutex::new(CacheState {
                entries: cache,
                in_flight: HashSet::new(),
            }),
            settled: Condvar::new(),
        }
    }

    /// Returns the entity behind `locator`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged apart from added context.
    /// The failure is not cached.
    pub fn fetch(&self, locator: &str) -> Result<Entity>
    {
        let mut state = self.lock()?;

        loop
        {
            if let Some(entity) = state.entries.cache_get(locator)
            {
                debug!("Cache hit for {locator}");
                return Ok(entity.clone());
            }

            if state
                .in_flight
                .insert(locator.to_owned())
            {
                break;
            }

            // Someone else is already fetching it, wait for them
            debug!("Waiting for in-flight fetch of {locator}");
            state = self
                .settled
                .wait(state)
                .map_err(|_| anyhow!("Fetch cache lock poisoned"))?;
        }
        drop(state);

        // Released on every exit, including a panicking transport
        let claim = InFlightClaim {
            fetcher: self,
            locator,
        };

        info!("Fetching {locator}");
        let fetched = self
            .transport
            .get_json(locator)
            .map(Entity::new);

        if let Ok(entity) = &fetched
        {
            self.lock()?
                .entries
                .cache_set(locator.to_owned(), entity.clone());
        }
        drop(claim);

        fetched.context(format!("Could not load {locator}"))
    }

    /// Resolves every locator concurrently.
    ///
    /// # Arguments
    ///
    /// * `locators` - Resources to fetch
    ///
    /// # Returns
    ///
    /// The entities in the same order as `locators`.
    ///
    /// # Errors
    ///
    /// Returns the first error in locator order if any fetch fails; nothing
    /// partial is returned.
    pub fn fetch_all(&self, locators: &[String]) -> Result<Vec<Entity>>
    {
        if locators.is_empty()
        {
            return Ok(Vec::new());
        }

        thread::scope(|scope| {
            let handles: Vec<_> = locators
                .iter()
                .map(|locator| scope.spawn(move || self.fetch(locator)))
                .collect();

            // Join everything before looking at results so no panic is
            // left for the scope to rethrow
            let joined: Vec<_> = handles
                .into_iter()
                .map(thread::ScopedJoinHandle::join)
                .collect();

            joined
                .into_iter()
                .map(|outcome| outcome.map_err(|_| anyhow!("Fetch thread panicked"))?)
                .collect()
        })
    }

    /// Number of locators currently cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache lock is poisoned.
    pub fn cached_len(&self) -> Result<usize>
    {
        Ok(self.lock()?.entries.cache_size())
    }

    /// The transport behind this fetcher.
    #[must_use]
    pub const fn transport(&self) -> &T
    {
        &self.transport
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState>>
    {
        self.state
            .lock()
            .map_err(|_| anyhow!("Fetch cache lock poisoned"))
    }
}

/// A locator one thread has promised to fetch.
///
/// Dropping it clears the promise and wakes everyone waiting on it, whether
/// the fetch succeeded, failed, or panicked.
struct InFlightClaim<'fetch, T>
{
    /// Owner of the in-flight set
    fetcher: &'fetch Fetcher<T>,
    /// Locator being fetched
    locator: &'fetch str,
}

impl<T> Drop for InFlightClaim<'_, T>
{
    fn drop(&mut self)
    {
        // The lock is never held across a transport call, so poisoning here
        // only means another bookkeeping step panicked; clear the entry anyway
        let mut state = self
            .fetcher
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.in_flight.remove(self.locator);
        drop(state);

        self.fetcher.settled.notify_all();
    }
}
