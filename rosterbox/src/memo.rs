//! Session-lifetime memoization with single-flight de-duplication.

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, FutureExt, Shared};
use rosterbox_core::ClientResult;
use smol_str::SmolStr;
use tracing::debug;

use crate::metrics::{MemoOutcome, record_fetch, record_memo_lookup};

type PendingFetch<V> = Shared<BoxFuture<'static, ClientResult<V>>>;

/// Internal state shared across clones.
struct MemoTableInner<K, V> {
    name: SmolStr,
    entries: DashMap<K, V>,
    pending: DashMap<K, PendingFetch<V>>,
    is_hit: fn(&V) -> bool,
}

/// A table of fetched values that lives as long as the client owning it.
///
/// [`MemoTable::get_or_fetch`] answers from the stored entry when one
/// exists. Otherwise it joins the fetch already running for the key, or
/// starts one. Concurrent callers for one key therefore share a single
/// upstream round trip and observe the same value or the same error.
///
/// Values are stored only on success. A failed fetch leaves no entry
/// behind, so the next call goes upstream again.
///
/// Cloning is cheap and the clones share state.
pub struct MemoTable<K, V> {
    inner: Arc<MemoTableInner<K, V>>,
}

impl<K, V> Clone for MemoTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for MemoTable<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoTable")
            .field("name", &self.inner.name)
            .field("entries", &self.inner.entries.len())
            .field("pending", &self.inner.pending.len())
            .finish()
    }
}

impl<K, V> MemoTable<K, V>
where
    K: Eq + Hash + Clone + fmt::Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a table where every stored entry is a hit.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self::with_hit_predicate(name, |_| true)
    }

    /// Creates a table where a stored entry only counts as a hit when
    /// `is_hit` returns `true` for it. Entries failing the predicate are
    /// fetched again and overwritten.
    pub fn with_hit_predicate(name: impl Into<SmolStr>, is_hit: fn(&V) -> bool) -> Self {
        Self {
            inner: Arc::new(MemoTableInner {
                name: name.into(),
                entries: DashMap::new(),
                pending: DashMap::new(),
                is_hit,
            }),
        }
    }

    /// Name used in logs and metric labels.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the stored value for `key` if it counts as a hit.
    pub fn cached(&self, key: &K) -> Option<V> {
        self.inner
            .entries
            .get(key)
            .filter(|entry| (self.inner.is_hit)(entry.value()))
            .map(|entry| entry.value().clone())
    }

    /// Returns `true` when a value is stored for `key`, hit or not.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.entries.contains_key(key)
    }

    /// Returns `true` when a fetch for `key` is in flight.
    pub fn is_pending(&self, key: &K) -> bool {
        self.inner.pending.contains_key(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Number of fetches in flight.
    pub fn pending_len(&self) -> usize {
        self.inner.pending.len()
    }

    /// Drops the stored value for `key`. A fetch in flight is not affected.
    pub fn invalidate(&self, key: &K) -> Option<V> {
        self.inner.entries.remove(key).map(|(_, value)| value)
    }

    /// Drops every stored value. Fetches in flight are not affected.
    pub fn clear(&self) {
        self.inner.entries.clear();
    }

    /// Returns the value for `key`, fetching it with `fetch` at most once
    /// across concurrent callers.
    ///
    /// `fetch` is only called when this caller registers a new fetch. The
    /// returned future is driven by whichever caller polls it, so a fetch
    /// whose callers all went away resumes with the next caller for the key.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> ClientResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<V>> + Send + 'static,
    {
        if let Some(value) = self.cached(&key) {
            debug!(table = %self.inner.name, %key, "memo hit");
            record_memo_lookup(&self.inner.name, MemoOutcome::Hit);
            return Ok(value);
        }

        // Checking for and registering a pending fetch is one atomic step.
        // No await may happen while the entry guard is held.
        let pending = match self.inner.pending.entry(key.clone()) {
            Entry::Occupied(entry) => {
                debug!(table = %self.inner.name, %key, "joining in-flight fetch");
                record_memo_lookup(&self.inner.name, MemoOutcome::Joined);
                entry.get().clone()
            }
            Entry::Vacant(slot) => {
                // A fetch may have finished between the first check and here.
                if let Some(value) = self.cached(&key) {
                    record_memo_lookup(&self.inner.name, MemoOutcome::Hit);
                    return Ok(value);
                }
                debug!(table = %self.inner.name, %key, "memo miss, fetching");
                record_memo_lookup(&self.inner.name, MemoOutcome::Miss);
                let fetch = self.track(key.clone(), fetch());
                slot.insert(fetch.clone());
                fetch
            }
        };

        pending.await
    }

    /// Wraps a fetch so that it stores its value on success and leaves the
    /// pending table on completion, whatever the outcome.
    fn track<Fut>(&self, key: K, fetch: Fut) -> PendingFetch<V>
    where
        Fut: Future<Output = ClientResult<V>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        async move {
            let started = Instant::now();
            let result = fetch.await;
            record_fetch(&inner.name, started.elapsed(), result.is_ok());
            match &result {
                Ok(value) => {
                    inner.entries.insert(key.clone(), value.clone());
                }
                Err(error) => {
                    debug!(table = %inner.name, %key, %error, "fetch failed, nothing stored");
                }
            }
            inner.pending.remove(&key);
            result
        }
        .boxed()
        .shared()
    }
}
