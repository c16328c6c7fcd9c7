//! String-keyed store with get-or-create semantics.

/// Error type for cache operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Key is empty or whitespace only
    #[error("Key must be a string of at least one character.")]
    InvalidKey,
}

/// Insertion-ordered map from trimmed, non-blank string keys to values.
///
/// Keys are trimmed on the way in and on every lookup, so `" a "` and `"a"`
/// address the same entry. There is no eviction: entries live until they are
/// removed or the cache is dropped.
///
/// ## Example
///
/// ```rust
/// use gamelib_sprites::KeyedCache;
///
/// let mut cache = KeyedCache::new();
/// let mut calls = 0;
///
/// let first = *cache.add_or_get("hero.png", |_| { calls += 1; 7 }).unwrap();
/// let second = *cache.add_or_get(" hero.png ", |_| 99).unwrap();
///
/// assert_eq!((first, second), (7, 7));
/// assert_eq!(calls, 1);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct KeyedCache<V> {
    keys: Vec<String>,
    values: Vec<V>,
}

impl<V> Default for KeyedCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Check whether `key` is usable as a cache key.
    #[inline]
    pub fn key_valid(key: &str) -> bool {
        !key.trim().is_empty()
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        if !Self::key_valid(key) {
            return None;
        }
        let key = key.trim();
        self.keys.iter().position(|k| k == key)
    }

    /// Insert `value` under `key`, replacing any value already stored there.
    pub fn add(&mut self, key: &str, value: V) -> Result<(), CacheError> {
        if !Self::key_valid(key) {
            return Err(CacheError::InvalidKey);
        }
        match self.index_of(key) {
            Some(idx) => self.values[idx] = value,
            None => {
                self.keys.push(key.trim().to_string());
                self.values.push(value);
            }
        }
        Ok(())
    }

    /// Get the value stored under `key`.
    ///
    /// Blank keys are never present, so they return `None` rather than an error.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.index_of(key).map(|idx| &self.values[idx])
    }

    /// Get a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.index_of(key)?;
        Some(&mut self.values[idx])
    }

    /// Check if `key` is present. The entry in the first slot counts.
    pub fn key_exists(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Remove the entry for `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index_of(key)?;
        self.keys.remove(idx);
        Some(self.values.remove(idx))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the stored keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Return the value stored under `key`, building it with `factory` first
    /// if the key is not present yet.
    ///
    /// `factory` receives the trimmed key and runs at most once per key for
    /// the lifetime of the entry. A blank key fails before `factory` is called.
    pub fn add_or_get<F>(&mut self, key: &str, factory: F) -> Result<&V, CacheError>
    where
        F: FnOnce(&str) -> V,
    {
        if !Self::key_valid(key) {
            return Err(CacheError::InvalidKey);
        }
        let idx = match self.index_of(key) {
            Some(idx) => idx,
            None => {
                let key = key.trim();
                let value = factory(key);
                self.keys.push(key.to_string());
                self.values.push(value);
                self.values.len() - 1
            }
        };
        Ok(&self.values[idx])
    }
}
