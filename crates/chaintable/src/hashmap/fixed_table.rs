use std::fmt;

use super::{ChainedTable, HashFn, Iter, KeyOps, TableError};
use crate::linked_list::{self, Node};

/// Hash table for keys of one fixed type, stored by value in the chain node.
///
/// Hashing and equality come from `H`, chosen by whoever instantiates the
/// table. Nothing is allocated per entry beyond the node itself.
pub struct FixedTable<K, V, H> {
    inner: ChainedTable<K, V, H>,
}

impl<K, V, F> FixedTable<K, V, HashFn<K, F>>
where
    K: Eq,
    F: Fn(&K) -> u64,
{
    /// Shorthand for a table hashed by `hash` and compared with `K: Eq`
    pub fn with_hash_fn(bucket_count: usize, hash: F) -> Result<Self, TableError> {
        Self::new_with_buckets(bucket_count, HashFn::new(hash))
    }
}

impl<K, V, H> FixedTable<K, V, H>
where
    H: KeyOps<Key = K>,
{
    /// Creates a table with `bucket_count` empty buckets
    pub fn new_with_buckets(bucket_count: usize, hasher: H) -> Result<Self, TableError> {
        Ok(Self {
            inner: ChainedTable::with_ops(bucket_count, hasher)?,
        })
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        self.inner.insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(key)
    }

    pub fn get_entry(&self, key: &K) -> Option<&Node<K, V>> {
        self.inner.get_entry(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }
}

impl<K, V, H> FixedTable<K, V, H> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.inner.bucket_count()
    }

    pub fn load_factor(&self) -> f32 {
        self.inner.load_factor()
    }

    pub fn hasher(&self) -> &H {
        self.inner.ops()
    }

    pub fn bucket(&self, idx: usize) -> Option<linked_list::Iter<'_, K, V>> {
        self.inner.bucket(idx)
    }

    pub fn chain_lens(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.inner.chain_lens()
    }

    pub fn longest_chain(&self) -> usize {
        self.inner.longest_chain()
    }

    pub fn deinit(self) -> usize {
        self.inner.deinit()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.inner.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for FixedTable<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
