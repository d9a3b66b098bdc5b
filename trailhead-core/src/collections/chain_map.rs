//! Separately chained hash map.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use log::debug;

const INITIAL_BUCKETS: usize = 16;
// Load factor 0.75 expressed as a ratio so resizing stays in integer maths.
const LOAD_NUMERATOR: usize = 3;
const LOAD_DENOMINATOR: usize = 4;

struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Box<Node<K, V>>>,
}

type Bucket<K, V> = Option<Box<Node<K, V>>>;

/// Hash map built from an array of singly linked buckets.
///
/// Keys are unique; [`ChainMap::put`] replaces the value of an existing
/// key and otherwise prepends a new node to its bucket. The bucket array
/// starts at 16 slots and doubles, rehashing every entry, whenever an
/// insertion would find the map at or above a 0.75 load factor.
///
/// # Examples
/// ```
/// use trailhead_core::collections::ChainMap;
///
/// let mut map = ChainMap::new();
/// map.put("moderate", 1);
/// map.put("moderate", 2);
/// assert_eq!(map.get("moderate"), Some(&2));
/// assert_eq!(map.len(), 1);
/// ```
pub struct ChainMap<K, V, S = RandomState> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: S,
}

impl<K, V> ChainMap<K, V, RandomState> {
    /// Construct an empty map with 16 buckets.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S> ChainMap<K, V, S> {
    /// Construct an empty map that hashes keys with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: empty_buckets(INITIAL_BUCKETS),
            len: 0,
            hasher,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Report whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets currently allocated.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every entry and return to the initial bucket count.
    pub fn clear(&mut self) {
        self.drain_buckets();
        self.buckets = empty_buckets(INITIAL_BUCKETS);
        self.len = 0;
    }

    /// Iterate over `(key, value)` pairs in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// Iterate over keys in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over values in bucket order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    // Unlink chains node by node so long buckets never recurse on drop.
    fn drain_buckets(&mut self) {
        for bucket in &mut self.buckets {
            let mut cursor = bucket.take();
            while let Some(mut node) = cursor {
                cursor = node.next.take();
            }
        }
    }
}

impl<K, V, S> ChainMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Insert or replace the value stored under `key`.
    ///
    /// Returns the previous value when the key was already present.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        if self.len * LOAD_DENOMINATOR >= self.buckets.len() * LOAD_NUMERATOR {
            self.resize();
        }
        let index = self.bucket_of(&key);
        if let Some(bucket) = self.buckets.get_mut(index) {
            let next = bucket.take();
            *bucket = Some(Box::new(Node { key, value, next }));
            self.len += 1;
        }
        None
    }

    /// Return the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cursor = self.buckets.get(self.bucket_of(key))?.as_deref();
        while let Some(node) = cursor {
            if node.key.borrow() == key {
                return Some(&node.value);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    /// Return a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_of(key);
        let mut cursor = self.buckets.get_mut(index)?.as_deref_mut();
        while let Some(node) = cursor {
            if node.key.borrow() == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Return the value under `key`, inserting `make()` first when absent.
    ///
    /// The entry is moved to the head of its bucket either way.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let value = match self.remove(&key) {
            Some(existing) => existing,
            None => {
                if self.len * LOAD_DENOMINATOR >= self.buckets.len() * LOAD_NUMERATOR {
                    self.resize();
                }
                make()
            }
        };
        let index = self.bucket_of(&key);
        self.len += 1;
        let bucket = &mut self.buckets[index];
        let next = bucket.take();
        &mut bucket.insert(Box::new(Node { key, value, next })).value
    }

    /// Report whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its value when it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_of(key);
        let mut cursor = self.buckets.get_mut(index)?;
        while cursor
            .as_ref()
            .is_some_and(|node| node.key.borrow() != key)
        {
            cursor = &mut cursor.as_mut()?.next;
        }
        let mut removed = cursor.take()?;
        *cursor = removed.next.take();
        self.len -= 1;
        Some(removed.value)
    }

    fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        bucket_index(self.hasher.hash_one(key), self.buckets.len())
    }

    fn resize(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(doubled));
        for mut cursor in old {
            while let Some(mut node) = cursor {
                cursor = node.next.take();
                let index = bucket_index(self.hasher.hash_one(&node.key), doubled);
                if let Some(bucket) = self.buckets.get_mut(index) {
                    node.next = bucket.take();
                    *bucket = Some(node);
                }
            }
        }
        debug!("chain map resized to {doubled} buckets holding {} entries", self.len);
    }
}

impl<K, V, S> ChainMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Remove `key` only when it currently maps to `value`.
    ///
    /// Returns `true` when an entry was removed.
    pub fn remove_value<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.get(key) != Some(value) {
            return false;
        }
        self.remove(key).is_some()
    }
}

impl<K, V> Default for ChainMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Drop for ChainMap<K, V, S> {
    fn drop(&mut self) {
        self.drain_buckets();
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug, S> std::fmt::Debug for ChainMap<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ChainMap<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}

/// Borrowing iterator over a [`ChainMap`].
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    current: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current {
                self.current = node.next.as_deref();
                return Some((&node.key, &node.value));
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }
}

fn empty_buckets<K, V>(count: usize) -> Vec<Bucket<K, V>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

fn bucket_index(hash: u64, buckets: usize) -> usize {
    (hash % buckets as u64) as usize
}
