use std::collections::BTreeMap;

use parking_lot::{Mutex, MutexGuard};

/// Key types that can be routed to one of N shards. For a signed key the
/// route uses the non-negative remainder, matching the reference
/// `ConcurrentMap`'s `key mod N` partitioning.
pub trait ShardKey: Copy + Ord {
    fn shard_index(&self, shard_count: usize) -> usize;
}

impl ShardKey for crate::core::types::DocId {
    fn shard_index(&self, shard_count: usize) -> usize {
        self.value().rem_euclid(shard_count as i32) as usize
    }
}

struct Shard<K, V> {
    map: Mutex<BTreeMap<K, V>>,
}

/// A key→value store partitioned across `shard_count` independently locked
/// shards. Distinct keys routed to distinct shards proceed without
/// contending for the same mutex; this is the accumulator the parallel
/// ranker (C5) uses instead of a single globally-locked map.
pub struct ShardedMap<K, V> {
    shards: Vec<Shard<K, V>>,
    shard_count: usize,
}

impl<K, V> ShardedMap<K, V>
where
    K: ShardKey,
    V: Default,
{
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard_count must be positive");
        let shards = (0..shard_count)
            .map(|_| Shard {
                map: Mutex::new(BTreeMap::new()),
            })
            .collect();
        ShardedMap {
            shards,
            shard_count,
        }
    }

    fn shard_for(&self, key: &K) -> &Shard<K, V> {
        &self.shards[key.shard_index(self.shard_count)]
    }

    /// Scoped access to `map[key]`, default-constructing the entry if
    /// absent. The returned guard holds the shard's lock and releases it
    /// when dropped, on every exit path including an unwinding panic.
    pub fn access_or_insert_default(&self, key: K) -> ShardGuard<'_, K, V> {
        let shard = self.shard_for(&key);
        let mut guard = shard.map.lock();
        guard.entry(key).or_default();
        ShardGuard { guard, key }
    }

    pub fn erase(&self, key: K) {
        let shard = self.shard_for(&key);
        shard.map.lock().remove(&key);
    }

    /// Acquires each shard's lock in turn (at most one held at a time, so no
    /// deadlock) and merges into a single ordered map. The snapshot is
    /// consistent per-shard but not globally atomic.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut whole = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.map.lock();
            for (k, v) in guard.iter() {
                whole.insert(*k, v.clone());
            }
        }
        whole
    }
}

/// RAII handle returned by `access_or_insert_default`. Derefs to the entry's
/// value; releases the shard lock on drop.
pub struct ShardGuard<'a, K, V> {
    guard: MutexGuard<'a, BTreeMap<K, V>>,
    key: K,
}

impl<'a, K: Ord, V> std::ops::Deref for ShardGuard<'a, K, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.guard.get(&self.key).expect("entry inserted on access")
    }
}

impl<'a, K: Ord, V> std::ops::DerefMut for ShardGuard<'a, K, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.guard
            .get_mut(&self.key)
            .expect("entry inserted on access")
    }
}
