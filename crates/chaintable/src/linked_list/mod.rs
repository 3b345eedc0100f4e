//! Singly linked collision chains.
//!
//! A [`Chain`] owns its head node and every node owns its successor, so a
//! bucket transitively owns the whole chain hanging off it.

use std::fmt;

pub struct Chain<K, V> {
    head: Option<Box<Node<K, V>>>,
    len: usize,
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Chain<K, V> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Links `boxed` in as the new head; the old head becomes its successor.
    pub(crate) fn push_front(&mut self, mut boxed: Box<Node<K, V>>) {
        boxed.next = self.head.take();
        self.head = Some(boxed);
        self.len += 1;
    }

    #[inline]
    pub(crate) fn pop_front(&mut self) -> Option<Box<Node<K, V>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node)
    }

    pub fn peek(&self) -> Option<&Node<K, V>> {
        self.head.as_deref()
    }

    /// First node, head to tail, for which `pred` holds.
    pub fn find<P>(&self, mut pred: P) -> Option<&Node<K, V>>
    where
        P: FnMut(&Node<K, V>) -> bool,
    {
        self.iter().find(|node| pred(node))
    }

    pub fn find_mut<P>(&mut self, mut pred: P) -> Option<&mut Node<K, V>>
    where
        P: FnMut(&Node<K, V>) -> bool,
    {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if pred(node) {
                return Some(node);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the first node for which `pred` holds and hands it back.
    ///
    /// The removed node's successor is moved into the link that pointed at
    /// the removed node (the head slot or the predecessor's `next`) before the
    /// node is returned, so the rest of the chain keeps its order.
    pub(crate) fn remove_first<P>(&mut self, mut pred: P) -> Option<Box<Node<K, V>>>
    where
        P: FnMut(&Node<K, V>) -> bool,
    {
        let mut link = &mut self.head;
        while link.as_deref().is_some_and(|node| !pred(node)) {
            match link {
                Some(node) => link = &mut node.next,
                None => return None,
            }
        }

        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len -= 1;
        Some(removed)
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }
}

impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        let mut curr = self.head.take();
        while let Some(mut node) = curr {
            curr = node.next.take();
            // node goes out of scope here, its successor is already detached
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Chain<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = <IterOwn<K, V> as Iterator>::Item;
    type IntoIter = IterOwn<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IterOwn::new(self)
    }
}

impl<'a, K, V> IntoIterator for &'a Chain<K, V> {
    type Item = &'a Node<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One stored entry: key, value and the full (pre-modulo) hash of the key.
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) next: Option<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, hash: u64) -> Self {
        Self {
            key,
            value,
            hash,
            next: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Hash cached when the node was inserted
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Node<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}
impl<K: Eq, V: Eq> Eq for Node<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}, {:?} ({:#x})>", self.key, self.value, self.hash)
    }
}

// [iterators]

pub struct Iter<'a, K, V> {
    current: Option<&'a Node<K, V>>,
    len: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.take()?;
        self.current = node.next.as_deref();
        self.len -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(chain: &'a Chain<K, V>) -> Self {
        Self {
            current: chain.head.as_deref(),
            len: chain.len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            len: self.len,
        }
    }
}

pub struct IterOwn<K, V>(Chain<K, V>);

impl<K, V> Iterator for IterOwn<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front().map(|node| {
            let node = *node;
            (node.key, node.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<K, V> IterOwn<K, V> {
    pub fn new(chain: Chain<K, V>) -> Self {
        Self(chain)
    }
}
