/// Persistent state backed by a key-value store
///
/// [`PersistentState<T>`] is a value mirrored into a [`KeyValueStore`] under
/// one key, as JSON. It is the local-first counterpart of the row store: a
/// whole collection is written back wholesale on every save.
///
/// # Load
///
/// - stored and parseable: the stored value
/// - missing or empty: the default, which is stored right away
/// - unparseable or unreadable: the default, with a warning; the stored
///   value is left alone until the next save
///
/// Loading never fails.
///
/// # Save
///
/// - [`SaveMode::WriteThrough`]: every `set`/`update` saves immediately
/// - [`SaveMode::Deferred`]: `set`/`update` mark the state dirty and
///   [`PersistentState::flush`] saves
///
/// A save is attempted up to [`SavePolicy::max_attempts`] times with a fixed
/// backoff. A final failure is logged and reported as
/// [`SaveOutcome::Failed`]; the in-memory value is kept and stays dirty.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vena_shared::persist::{MemoryKeyValueStore, PersistentState};
///
/// # async fn example() {
/// let store = Arc::new(MemoryKeyValueStore::new());
/// let mut count = PersistentState::load(store, "vena-count", 0u32).await;
/// count.update(|n| *n += 1).await;
/// assert_eq!(*count.get(), 1);
/// # }
/// ```

pub mod file;
pub mod memory;
pub mod redis;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use self::redis::{RedisConfig, RedisKeyValueStore};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Key-value storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Redis command or connection error
    #[error("Redis error: {0}")]
    Redis(String),

    /// Value could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend configuration error
    #[error("Storage configuration error: {0}")]
    Config(String),

    /// Operation did not finish in time
    #[error("Storage operation timed out")]
    Timeout,
}

/// Storage result type alias
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Reads the value stored under `key`
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`; removing a missing key succeeds
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// When writes reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Save on every change
    #[default]
    WriteThrough,

    /// Save on [`PersistentState::flush`]
    Deferred,
}

/// Retry policy for saves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePolicy {
    /// Attempts per save, at least 1
    pub max_attempts: u32,

    /// Wait between attempts
    pub backoff: Duration,
}

impl Default for SavePolicy {
    fn default() -> Self {
        SavePolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

/// Result of a set, update or flush
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the store
    Saved {
        /// Attempts it took
        attempts: u32,
    },

    /// Change recorded, waiting for a flush
    Pending,

    /// Nothing to write
    Unchanged,

    /// Every attempt failed; the value stays dirty
    Failed {
        /// Attempts made
        attempts: u32,
        /// Last error
        error: String,
    },
}

impl SaveOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SaveOutcome::Failed { .. })
    }
}

/// A value mirrored into a key-value store
pub struct PersistentState<T> {
    key: String,
    value: T,
    dirty: bool,
    mode: SaveMode,
    policy: SavePolicy,
    store: Arc<dyn KeyValueStore>,
}

impl<T> std::fmt::Debug for PersistentState<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentState")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("dirty", &self.dirty)
            .field("mode", &self.mode)
            .field("store", &self.store.name())
            .finish()
    }
}

impl<T> PersistentState<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Loads `key` with write-through saves and the default retry policy
    pub async fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        Self::load_with(store, key, default, SaveMode::default(), SavePolicy::default()).await
    }

    /// Loads `key` with an explicit save mode and retry policy
    pub async fn load_with(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        default: T,
        mode: SaveMode,
        policy: SavePolicy,
    ) -> Self {
        let key = key.into();

        let mut state = PersistentState {
            key,
            value: default,
            dirty: false,
            mode,
            policy,
            store,
        };

        match state.store.get(&state.key).await {
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    tracing::debug!(key = %state.key, "Loaded persisted state");
                    state.value = value;
                }
                Err(e) => {
                    tracing::warn!(key = %state.key, error = %e, "Stored state is unreadable, using default");
                }
            },
            Ok(_) => {
                tracing::debug!(key = %state.key, "No stored state, storing default");
                state.dirty = true;
                state.save().await;
            }
            Err(e) => {
                tracing::warn!(key = %state.key, error = %e, "Failed to read stored state, using default");
            }
        }

        state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether the value has changes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the value
    pub async fn set(&mut self, value: T) -> SaveOutcome {
        self.value = value;
        self.changed().await
    }

    /// Mutates the value in place
    pub async fn update<F>(&mut self, f: F) -> SaveOutcome
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.value);
        self.changed().await
    }

    /// Saves pending changes
    pub async fn flush(&mut self) -> SaveOutcome {
        if !self.dirty {
            return SaveOutcome::Unchanged;
        }
        self.save().await
    }

    async fn changed(&mut self) -> SaveOutcome {
        self.dirty = true;
        match self.mode {
            SaveMode::WriteThrough => self.save().await,
            SaveMode::Deferred => SaveOutcome::Pending,
        }
    }

    async fn save(&mut self) -> SaveOutcome {
        let raw = match serde_json::to_string(&self.value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to encode state");
                return SaveOutcome::Failed {
                    attempts: 0,
                    error: e.to_string(),
                };
            }
        };

        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.store.set(&self.key, &raw).await {
                Ok(()) => {
                    self.dirty = false;
                    if attempt > 1 {
                        tracing::info!(key = %self.key, attempt, "State saved after retry");
                    }
                    return SaveOutcome::Saved { attempts: attempt };
                }
                Err(e) => {
                    tracing::debug!(key = %self.key, attempt, error = %e, "State save attempt failed");
                    last_error = e.to_string();
                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.backoff).await;
                    }
                }
            }
        }

        tracing::warn!(
            key = %self.key,
            attempts = max_attempts,
            error = %last_error,
            "Failed to save state, keeping it in memory"
        );

        SaveOutcome::Failed {
            attempts: max_attempts,
            error: last_error,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Store whose writes fail a set number of times before succeeding
    pub(crate) struct FlakyStore {
        pub inner: MemoryKeyValueStore,
        pub failures_left: AtomicU32,
        pub writes: AtomicU32,
    }

    impl FlakyStore {
        pub fn new(failures: u32) -> Self {
            FlakyStore {
                inner: MemoryKeyValueStore::new(),
                failures_left: AtomicU32::new(failures),
                writes: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> StorageResult<()> {
            self.inner.remove(key).await
        }
    }

    fn quick() -> SavePolicy {
        SavePolicy {
            max_attempts: 3,
            backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_missing_key_stores_default() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let state = PersistentState::load(store.clone(), "vena-clients", vec![1, 2]).await;

        assert_eq!(state.get(), &vec![1, 2]);
        assert!(!state.is_dirty());
        assert_eq!(store.get("vena-clients").await.unwrap().as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn test_stored_value_wins_over_default() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set("vena-isAuthenticated", "true").await.unwrap();

        let state = PersistentState::load(store, "vena-isAuthenticated", false).await;
        assert!(*state.get());
    }

    #[tokio::test]
    async fn test_empty_value_counts_as_missing() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set("k", "").await.unwrap();

        let state = PersistentState::load(store.clone(), "k", 7u8).await;
        assert_eq!(*state.get(), 7);
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_corrupt_value_falls_back_without_overwriting() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set("k", "{not json").await.unwrap();

        let state = PersistentState::load(store.clone(), "k", vec!["a".to_string()]).await;
        assert_eq!(state.get(), &vec!["a".to_string()]);
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("{not json"));
    }

    #[tokio::test]
    async fn test_write_through_saves_each_change() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut state = PersistentState::load(store.clone(), "k", 0i32).await;

        assert_eq!(state.set(5).await, SaveOutcome::Saved { attempts: 1 });
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("5"));

        state.update(|n| *n *= 2).await;
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn test_deferred_waits_for_flush() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut state =
            PersistentState::load_with(store.clone(), "k", 0i32, SaveMode::Deferred, quick()).await;

        assert_eq!(state.set(3).await, SaveOutcome::Pending);
        assert!(state.is_dirty());
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("0"));

        assert_eq!(state.flush().await, SaveOutcome::Saved { attempts: 1 });
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("3"));
        assert_eq!(state.flush().await, SaveOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_save_retries_then_succeeds() {
        let store = Arc::new(FlakyStore::new(0));
        let mut state =
            PersistentState::load_with(store.clone(), "k", 0i32, SaveMode::WriteThrough, quick())
                .await;

        store.failures_left.store(2, Ordering::SeqCst);
        assert_eq!(state.set(1).await, SaveOutcome::Saved { attempts: 3 });
        assert!(!state.is_dirty());
    }

    #[tokio::test]
    async fn test_final_failure_keeps_value_dirty() {
        let store = Arc::new(FlakyStore::new(0));
        let mut state =
            PersistentState::load_with(store.clone(), "k", 0i32, SaveMode::WriteThrough, quick())
                .await;

        store.failures_left.store(10, Ordering::SeqCst);
        let outcome = state.set(42).await;
        assert!(outcome.is_failed());
        assert_eq!(*state.get(), 42);
        assert!(state.is_dirty());
        assert_eq!(store.inner.get("k").await.unwrap().as_deref(), Some("0"));

        store.failures_left.store(0, Ordering::SeqCst);
        assert_eq!(state.flush().await, SaveOutcome::Saved { attempts: 1 });
        assert_eq!(store.inner.get("k").await.unwrap().as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_failed_default_store_does_not_fail_load() {
        let store = Arc::new(FlakyStore::new(100));
        let state = PersistentState::load_with(
            store.clone(),
            "k",
            vec![1u8],
            SaveMode::WriteThrough,
            quick(),
        )
        .await;

        assert_eq!(state.get(), &vec![1u8]);
        assert!(state.is_dirty());
        assert_eq!(store.writes.load(Ordering::SeqCst), 3);
    }
}
