// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot storage, request coalescing and generation bookkeeping.

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use memosync_config::model::CacheConfig;
use memosync_core::MemoError;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::entry::CacheEntry;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, MemoError>>>;

/// Read behavior knobs, usually taken from `[cache]` configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Re-fetch a resolved slot in the background when it is mounted.
    pub revalidate_on_mount: bool,
    /// Slots fetched more recently than this are not re-fetched on mount.
    pub dedupe_interval: Duration,
}

impl From<&CacheConfig> for CacheOptions {
    fn from(config: &CacheConfig) -> Self {
        Self {
            revalidate_on_mount: config.revalidate_on_mount,
            dedupe_interval: config.dedupe_interval(),
        }
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

/// A started fetch and the generation it was started under.
struct Pending<V> {
    generation: u64,
    fetch: SharedFetch<V>,
}

impl<V> Clone for Pending<V> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            fetch: self.fetch.clone(),
        }
    }
}

struct Slot<V> {
    value: Option<Result<V, MemoError>>,
    fetched_at: Option<Instant>,
    invalidated: bool,
    /// Newest generation initiated for this slot (fetch, invalidation or seed).
    generation: u64,
    in_flight: Option<Pending<V>>,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at: None,
            invalidated: false,
            generation: 0,
            in_flight: None,
        }
    }
}

impl<V: Clone> Slot<V> {
    /// A successful value that has not been invalidated.
    fn fresh(&self) -> Option<V> {
        if self.invalidated {
            return None;
        }
        match &self.value {
            Some(Ok(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn entry(&self) -> CacheEntry<V> {
        CacheEntry {
            value: self.value.clone(),
            is_loading: self.in_flight.is_some(),
        }
    }

    fn is_older_than(&self, interval: Duration) -> bool {
        self.fetched_at.is_none_or(|at| at.elapsed() >= interval)
    }

    fn supersede(&mut self, generation: u64) {
        self.invalidated = true;
        self.generation = generation;
        self.in_flight = None;
    }
}

struct Inner<K, V> {
    slots: HashMap<K, Slot<V>>,
    next_generation: u64,
}

impl<K: Eq + Hash + Clone, V> Inner<K, V> {
    fn bump(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn begin(&mut self, key: &K, fetch: BoxFuture<'static, Result<V, MemoError>>) -> Pending<V>
    where
        V: Clone,
    {
        let generation = self.bump();
        let pending = Pending {
            generation,
            fetch: fetch.shared(),
        };
        let slot = self.slots.entry(key.clone()).or_default();
        slot.generation = generation;
        slot.in_flight = Some(pending.clone());
        pending
    }
}

/// Shared, cloneable cache handle.
///
/// Bookkeeping sits behind a `tokio::sync::Mutex` that is never held while
/// a fetch is awaited.
pub struct QueryCache<K, V> {
    inner: Arc<Mutex<Inner<K, V>>>,
    options: CacheOptions,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            options: self.options,
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(options: CacheOptions) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                slots: HashMap::new(),
                next_generation: 0,
            })),
            options,
        }
    }

    pub fn options(&self) -> CacheOptions {
        self.options
    }

    /// Returns the fresh value for `key`, joins the request already in
    /// flight, or starts exactly one new request.
    pub async fn get<F, Fut>(&self, key: &K, fetcher: F) -> Result<V, MemoError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, MemoError>> + Send + 'static,
    {
        let pending = {
            let mut inner = self.inner.lock().await;
            let joined = match inner.slots.get(key) {
                Some(slot) => {
                    if let Some(value) = slot.fresh() {
                        debug!(%key, "cache hit");
                        return Ok(value);
                    }
                    slot.in_flight.clone()
                }
                None => None,
            };
            match joined {
                Some(pending) => {
                    debug!(%key, generation = pending.generation, "joining in-flight request");
                    pending
                }
                None => inner.begin(key, fetcher().boxed()),
            }
        };
        self.settle(key, pending).await
    }

    /// Consumer read.
    ///
    /// `None` is a disabled key: no request is made. A resolved slot is
    /// served as-is and, if it is older than the dedupe interval, re-fetched
    /// in the background. An invalidated or empty slot is awaited.
    pub async fn mount<F, Fut>(&self, key: Option<&K>, fetcher: F) -> CacheEntry<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, MemoError>> + Send + 'static,
    {
        let Some(key) = key else {
            return CacheEntry::disabled();
        };

        let pending = {
            let mut inner = self.inner.lock().await;
            let cached = inner.slots.get(key).and_then(|slot| {
                if slot.invalidated {
                    return None;
                }
                slot.value.as_ref().map(|value| {
                    (
                        value.clone(),
                        slot.in_flight.is_some(),
                        slot.is_older_than(self.options.dedupe_interval),
                    )
                })
            });

            match cached {
                Some((value, loading, stale)) => {
                    let revalidate = self.options.revalidate_on_mount && !loading && stale;
                    if revalidate {
                        debug!(%key, "serving cached value, revalidating in background");
                        let pending = inner.begin(key, fetcher().boxed());
                        self.spawn_settle(key.clone(), pending);
                    }
                    return CacheEntry {
                        value: Some(value),
                        is_loading: loading || revalidate,
                    };
                }
                None => match inner.slots.get(key).and_then(|slot| slot.in_flight.clone()) {
                    Some(pending) => pending,
                    None => inner.begin(key, fetcher().boxed()),
                },
            }
        };

        CacheEntry::resolved(self.settle(key, pending).await)
    }

    /// Current entry for `key` without I/O.
    pub async fn snapshot(&self, key: &K) -> CacheEntry<V> {
        let inner = self.inner.lock().await;
        inner.slots.get(key).map(Slot::entry).unwrap_or_default()
    }

    /// Starts a new generation for `key` now and awaits it.
    pub async fn revalidate<F, Fut>(&self, key: &K, fetcher: F) -> Result<V, MemoError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, MemoError>> + Send + 'static,
    {
        let pending = {
            let mut inner = self.inner.lock().await;
            let pending = inner.begin(key, fetcher().boxed());
            debug!(%key, generation = pending.generation, "revalidating");
            pending
        };
        self.settle(key, pending).await
    }

    /// Stores `value` as the newest generation of `key`.
    pub async fn seed(&self, key: K, value: V) {
        let mut inner = self.inner.lock().await;
        let generation = inner.bump();
        let slot = inner.slots.entry(key).or_default();
        slot.generation = generation;
        slot.value = Some(Ok(value));
        slot.fetched_at = Some(Instant::now());
        slot.invalidated = false;
        slot.in_flight = None;
    }

    /// Marks `key` for re-fetch and supersedes any request in flight.
    ///
    /// The previous value stays visible through [`snapshot`](Self::snapshot)
    /// until a re-fetch replaces it. Returns whether the key was present.
    pub async fn invalidate(&self, key: &K) -> bool {
        let mut inner = self.inner.lock().await;
        if !inner.slots.contains_key(key) {
            return false;
        }
        let generation = inner.bump();
        if let Some(slot) = inner.slots.get_mut(key) {
            slot.supersede(generation);
            debug!(%key, generation, "invalidated");
        }
        true
    }

    /// Invalidates every key matching `predicate`. Returns how many matched.
    pub async fn invalidate_where(&self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let mut inner = self.inner.lock().await;
        let Inner {
            slots,
            next_generation,
        } = &mut *inner;
        let mut count = 0;
        for (key, slot) in slots.iter_mut() {
            if predicate(key) {
                *next_generation += 1;
                slot.supersede(*next_generation);
                debug!(%key, generation = *next_generation, "invalidated");
                count += 1;
            }
        }
        count
    }

    /// Drops every key matching `predicate`. Requests still in flight for a
    /// dropped key complete without writing back.
    pub async fn purge_where(&self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let mut inner = self.inner.lock().await;
        let before = inner.slots.len();
        inner.slots.retain(|key, _| !predicate(key));
        let purged = before - inner.slots.len();
        debug!(purged, "purged cache entries");
        purged
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.slots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn spawn_settle(&self, key: K, pending: Pending<V>) {
        let cache = self.clone();
        tokio::spawn(async move {
            if let Err(error) = cache.settle(&key, pending).await {
                debug!(%key, %error, "background revalidation failed");
            }
        });
    }

    /// Awaits `pending` and applies it if it is still the slot's newest
    /// generation. A superseded waiter follows the newer request instead.
    async fn settle(&self, key: &K, mut pending: Pending<V>) -> Result<V, MemoError> {
        loop {
            let result = pending.fetch.clone().await;

            let mut inner = self.inner.lock().await;
            let Some(slot) = inner.slots.get_mut(key) else {
                debug!(%key, "entry dropped while loading");
                return result;
            };

            if slot.generation == pending.generation {
                let owns_slot = slot
                    .in_flight
                    .as_ref()
                    .is_some_and(|p| p.generation == pending.generation);
                if owns_slot {
                    slot.value = Some(result.clone());
                    slot.fetched_at = Some(Instant::now());
                    slot.invalidated = false;
                    slot.in_flight = None;
                    debug!(%key, generation = pending.generation, ok = result.is_ok(), "applied response");
                }
                return result;
            }

            debug!(
                %key,
                generation = pending.generation,
                newest = slot.generation,
                "discarding superseded response"
            );
            match (&slot.in_flight, &slot.value, slot.invalidated) {
                (Some(newer), _, _) => pending = newer.clone(),
                (None, Some(newest), false) => return newest.clone(),
                _ => return result,
            }
        }
    }
}
