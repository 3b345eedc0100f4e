use std::borrow::Borrow;
use std::fmt;

use super::{ByteKeys, ChainedTable, Iter, TableError};
use crate::alloc::try_copy_bytes;
use crate::hash::nul_len;
use crate::linked_list;

/// A table-owned copy of a byte-string key.
///
/// Keys inserted through the null-terminated path keep a trailing `0` byte
/// after the key; it is never part of the key itself.
#[derive(Clone)]
pub struct OwnedKey {
    bytes: Box<[u8]>,
    len: usize,
}

impl OwnedKey {
    fn copy_terminated(key: &[u8]) -> Result<Self, TableError> {
        Ok(Self {
            bytes: try_copy_bytes(key, true)?,
            len: key.len(),
        })
    }

    fn copy_sized(key: &[u8]) -> Result<Self, TableError> {
        Ok(Self {
            bytes: try_copy_bytes(key, false)?,
            len: key.len(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the copy carries a trailing terminator
    pub fn is_terminated(&self) -> bool {
        self.bytes.len() > self.len
    }

    pub fn as_bytes_with_nul(&self) -> Option<&[u8]> {
        self.is_terminated().then_some(&self.bytes[..])
    }
}

impl Borrow<[u8]> for OwnedKey {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for OwnedKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
impl Eq for OwnedKey {}

impl fmt::Debug for OwnedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Hash table keyed by byte strings, hashed with 32 bit shift-add.
///
/// The table keeps a private heap copy of every key, so callers may reuse or
/// mutate their key buffers as soon as an insert returns. Keys passed to
/// [`insert`](Self::insert), [`get`](Self::get) and [`remove`](Self::remove)
/// are null-terminated: anything from the first `0` byte on is ignored. Use
/// [`insert_sized`](Self::insert_sized) and the `*_bytes` lookups for keys
/// with embedded zeros.
pub struct ByteTable<V> {
    inner: ChainedTable<OwnedKey, V, ByteKeys>,
}

impl<V> ByteTable<V> {
    /// Creates a table with `bucket_count` empty buckets
    pub fn new_with_buckets(bucket_count: usize) -> Result<Self, TableError> {
        Ok(Self {
            inner: ChainedTable::with_ops(bucket_count, ByteKeys)?,
        })
    }

    /// Inserts a null-terminated key; its length is found by scanning for
    /// the terminator (or is the whole slice if there is none).
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<(), TableError> {
        let key = key.as_ref();
        let key = OwnedKey::copy_terminated(&key[..nul_len(key)])?;
        self.inner.insert(key, value)
    }

    /// Inserts the first `len` bytes of `key`, zeros included.
    pub fn insert_sized(
        &mut self,
        key: impl AsRef<[u8]>,
        len: usize,
        value: V,
    ) -> Result<(), TableError> {
        let key = key.as_ref();
        let key = key.get(..len).ok_or(TableError::KeyLength {
            len,
            available: key.len(),
        })?;
        self.inner.insert(OwnedKey::copy_sized(key)?, value)
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        self.inner.get(terminated(key.as_ref()))
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        self.inner.get_mut(terminated(key.as_ref()))
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.inner.contains_key(terminated(key.as_ref()))
    }

    /// Removes the most recently inserted entry for `key`
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.remove(terminated(key.as_ref()))
    }

    /// Lookup by exact bytes, for keys inserted with embedded zeros
    pub fn get_bytes(&self, key: &[u8]) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn remove_bytes(&mut self, key: &[u8]) -> Option<V> {
        self.inner.remove(key)
    }

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

    pub fn bucket(&self, idx: usize) -> Option<linked_list::Iter<'_, OwnedKey, V>> {
        self.inner.bucket(idx)
    }

    pub fn chain_lens(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.inner.chain_lens()
    }

    pub fn longest_chain(&self) -> usize {
        self.inner.longest_chain()
    }

    /// Releases every entry, its key copy and the bucket array
    pub fn deinit(self) -> usize {
        self.inner.deinit()
    }

    pub fn iter(&self) -> Iter<'_, OwnedKey, V> {
        self.inner.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for ByteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

fn terminated(key: &[u8]) -> &[u8] {
    &key[..nul_len(key)]
}
