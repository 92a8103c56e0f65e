//! Bidirectional map with lock striping.
//!
//! Each direction is split into a fixed number of shards, every shard guarded by
//! its own `RwLock`. A key (or value) always lives in the shard selected by its
//! hash, so the shard lock doubles as the lock stripe for that key.
//!
//! Lock order for writers is forward shard first, then reverse shard. Readers
//! take a single read lock, so no reader can participate in a cycle.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, RandomState};

use parking_lot::RwLock;

pub struct StripedBiMap<K, V> {
    forward: Box<[RwLock<HashMap<K, V>>]>,
    reverse: Box<[RwLock<HashMap<V, K>>]>,
    hasher: RandomState,
}

impl<K, V> StripedBiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Creates an empty map with `stripes` shards per direction (at least one).
    #[must_use]
    pub fn new(stripes: usize) -> Self {
        let stripes = stripes.max(1);
        Self {
            forward: (0..stripes).map(|_| RwLock::new(HashMap::new())).collect(),
            reverse: (0..stripes).map(|_| RwLock::new(HashMap::new())).collect(),
            hasher: RandomState::new(),
        }
    }

    /// Number of shards per direction.
    #[must_use]
    pub fn stripes(&self) -> usize {
        self.forward.len()
    }

    /// Inserts `key -> value` and `value -> key`, overwriting both directions.
    ///
    /// Both stripes are held while the two maps are updated, so a reader that
    /// acquires either stripe afterwards observes both entries.
    pub fn insert(&self, key: K, value: V) {
        let mut forward = self.forward[self.stripe_of(&key)].write();
        let mut reverse = self.reverse[self.stripe_of(&value)].write();
        forward.insert(key.clone(), value.clone());
        reverse.insert(value, key);
    }

    /// Looks up the value registered for `key`.
    #[must_use]
    pub fn get_by_key(&self, key: &K) -> Option<V> {
        self.forward[self.stripe_of(key)].read().get(key).cloned()
    }

    /// Looks up the key most recently registered for `value`.
    #[must_use]
    pub fn get_by_value(&self, value: &V) -> Option<K> {
        self.reverse[self.stripe_of(value)].read().get(value).cloned()
    }

    /// Number of forward entries, including orphaned ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.iter().map(|shard| shard.read().len()).sum()
    }

    /// Removes every entry. All stripes are held until both directions are empty.
    pub fn clear(&self) {
        let mut forward: Vec<_> = self.forward.iter().map(|shard| shard.write()).collect();
        let mut reverse: Vec<_> = self.reverse.iter().map(|shard| shard.write()).collect();
        for shard in &mut forward {
            shard.clear();
        }
        for shard in &mut reverse {
            shard.clear();
        }
    }

    fn stripe_of<T: Hash + ?Sized>(&self, item: &T) -> usize {
        let stripes = self.forward.len() as u64;
        // the remainder is below `stripes`, which came from a usize
        usize::try_from(self.hasher.hash_one(item) % stripes).unwrap_or(0)
    }
}
