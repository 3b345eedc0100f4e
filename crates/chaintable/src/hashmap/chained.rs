use std::borrow::Borrow;
use std::fmt;

use log::{debug, trace};

use super::{KeyOps, TableError};
use crate::alloc::try_box;
use crate::linked_list::{self, Chain, Node};

/// Separate-chaining hash table with a bucket count fixed at construction.
///
/// `hash(key) % bucket_count` picks the bucket; every bucket holds a singly
/// linked chain. Inserts prepend without checking for an existing equal key,
/// so the newest of several equal keys shadows the older ones until it is
/// removed. The table never rehashes or grows.
pub struct ChainedTable<K, V, O> {
    buckets: Vec<Chain<K, V>>,
    items: usize,
    ops: O,
}

pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Chain<K, V>>,
    chain: Option<linked_list::Iter<'a, K, V>>,
    remaining: usize,
}

impl<K, V, O> ChainedTable<K, V, O>
where
    O: KeyOps,
    K: Borrow<O::Key>,
{
    /// Creates a table with `bucket_count` empty buckets
    pub fn with_ops(bucket_count: usize, ops: O) -> Result<Self, TableError> {
        if bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|_| TableError::OutOfMemory {
                what: "bucket array",
                bytes: bucket_count.saturating_mul(size_of::<Chain<K, V>>()),
            })?;
        buckets.extend((0..bucket_count).map(|_| Chain::new()));

        debug!(target: "chaintable", "new table with {bucket_count} buckets");
        Ok(Self {
            buckets,
            items: 0,
            ops,
        })
    }

    /// Inserts `key` at the head of its bucket's chain.
    ///
    /// No uniqueness check is made: inserting a key that is already present
    /// adds a second entry that shadows the first. On allocation failure the
    /// table is left exactly as it was.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        let hash = self.ops.hash_key(key.borrow());
        let node = try_box(Node::new(key, value, hash), "chain node").inspect_err(|e| {
            trace!(target: "insert", "{e}");
        })?;

        let i = self.index_of(hash);
        self.buckets[i].push_front(node);
        self.items += 1;
        trace!(target: "insert", "bucket {i} now holds {} entries", self.buckets[i].len());
        Ok(())
    }

    /// The most recently inserted entry whose key equals `key`
    pub fn get_entry(&self, key: &O::Key) -> Option<&Node<K, V>> {
        let hash = self.ops.hash_key(key);
        let ops = &self.ops;
        self.buckets[self.index_of(hash)]
            .find(|n| n.hash == hash && ops.eq_key(n.key.borrow(), key))
    }

    pub fn get(&self, key: &O::Key) -> Option<&V> {
        self.get_entry(key).map(Node::value)
    }

    pub fn get_mut(&mut self, key: &O::Key) -> Option<&mut V> {
        let hash = self.ops.hash_key(key);
        let i = self.index_of(hash);
        let ops = &self.ops;
        self.buckets[i]
            .find_mut(|n| n.hash == hash && ops.eq_key(n.key.borrow(), key))
            .map(Node::value_mut)
    }

    pub fn contains_key(&self, key: &O::Key) -> bool {
        self.get_entry(key).is_some()
    }

    /// Unlinks the first entry in `key`'s chain that matches and returns its
    /// value. `None` means nothing matched and nothing changed.
    pub fn remove(&mut self, key: &O::Key) -> Option<V> {
        let hash = self.ops.hash_key(key);
        let i = self.index_of(hash);
        let ops = &self.ops;
        let removed = self.buckets[i]
            .remove_first(|n| n.hash == hash && ops.eq_key(n.key.borrow(), key))?;

        self.items -= 1;
        trace!(target: "remove", "unlinked entry from bucket {i}, {} entries left", self.items);
        Some(removed.into_value())
    }
}

impl<K, V, O> ChainedTable<K, V, O> {
    /// Returns the number of entries in the table
    pub fn len(&self) -> usize {
        self.items
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Returns the number of buckets, fixed for the lifetime of the table
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket
    pub fn load_factor(&self) -> f32 {
        self.items as f32 / self.bucket_count() as f32
    }

    /// The key capability this table was built with
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Chain of bucket `idx`, head first
    pub fn bucket(&self, idx: usize) -> Option<linked_list::Iter<'_, K, V>> {
        self.buckets.get(idx).map(Chain::iter)
    }

    pub fn chain_lens(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.buckets.iter().map(Chain::len)
    }

    pub fn longest_chain(&self) -> usize {
        self.chain_lens().max().unwrap_or(0)
    }

    /// Releases every entry and the bucket array, returning how many entries
    /// were released.
    pub fn deinit(self) -> usize {
        let released = self.items;
        trace!(target: "deinit", "releasing {released} entries from {} buckets", self.bucket_count());
        drop(self);
        released
    }

    // [adapters]

    /// Every entry, bucket by bucket, each chain head first
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.items,
        }
    }

    // [private]

    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        // the bucket count fits in a usize, so the remainder does too
        (hash % self.buckets.len() as u64) as usize
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(node);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, O> IntoIterator for &'a ChainedTable<K, V, O> {
    type Item = &'a Node<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Non-empty buckets only, keyed by index
struct Occupied<'a, K, V>(&'a [Chain<K, V>]);

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Occupied<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().enumerate().filter(|(_, c)| !c.is_empty()))
            .finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O> fmt::Debug for ChainedTable<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedTable")
            .field("items", &self.items)
            .field("bucket_count", &self.bucket_count())
            .field("buckets", &Occupied(&self.buckets))
            .finish()
    }
}
