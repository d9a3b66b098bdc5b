//! Unbalanced binary search tree with multi-map semantics.

use std::cmp::Ordering;
use std::ops::Bound;

use super::SeqList;

/// Totally ordered `f64` key.
///
/// Ordering follows [`f64::total_cmp`], so `NaN` sorts above every finite
/// value instead of poisoning comparisons. Negative zero is stored as zero.
#[derive(Debug, Clone, Copy)]
pub struct OrderedF64(f64);

impl OrderedF64 {
    /// Wrap a raw value.
    pub const fn new(value: f64) -> Self {
        if value == 0.0 { Self(0.0) } else { Self(value) }
    }

    /// Return the wrapped value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for OrderedF64 {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for OrderedF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    values: SeqList<V>,
    left: Link<K, V>,
    right: Link<K, V>,
}

/// Ordered multi-map backed by an unbalanced binary search tree.
///
/// Inserting an existing key appends to that node's value list rather than
/// overwriting it. No rebalancing takes place, so sorted insertion degrades
/// the tree to a list; every traversal is iterative for that reason.
///
/// # Examples
/// ```
/// use trailhead_core::collections::{OrderedF64, OrderedMap};
///
/// let mut lengths = OrderedMap::new();
/// lengths.put(OrderedF64::new(2.0), "Pond Loop");
/// lengths.put(OrderedF64::new(2.0), "Meadow Walk");
/// lengths.put(OrderedF64::new(9.0), "Summit Ridge");
///
/// let short = lengths.get_range(&OrderedF64::new(0.0), &OrderedF64::new(2.0));
/// assert_eq!(short, vec![&"Pond Loop", &"Meadow Walk"]);
/// ```
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    key_count: usize,
    value_count: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// Construct an empty tree.
    pub const fn new() -> Self {
        Self {
            root: None,
            key_count: 0,
            value_count: 0,
        }
    }

    /// Number of distinct keys (tree nodes).
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Number of stored values across every key.
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// Report whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        release(self.root.take());
        self.key_count = 0;
        self.value_count = 0;
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Append `value` to the list stored under `key`, creating the node
    /// when the key is new.
    pub fn put(&mut self, key: K, value: V) {
        let slot = locate(&mut self.root, &key);
        match slot {
            Some(node) => node.values.add(value),
            None => {
                let mut values = SeqList::new();
                values.add(value);
                *slot = Some(Box::new(Node {
                    key,
                    values,
                    left: None,
                    right: None,
                }));
                self.key_count += 1;
            }
        }
        self.value_count += 1;
    }

    /// Return the first value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_all(key)?.first()
    }

    /// Return every value stored under `key` in insertion order.
    pub fn get_all(&self, key: &K) -> Option<&[V]> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.values.as_slice()),
            };
        }
        None
    }

    /// Return every value whose key lies in `min..=max`, in key order.
    ///
    /// An inverted range yields no values.
    pub fn get_range(&self, min: &K, max: &K) -> Vec<&V> {
        if min > max {
            return Vec::new();
        }
        self.collect_values(Bound::Included(min), Bound::Included(max))
    }

    /// Return every value whose key is `<= max`, in key order.
    pub fn values_up_to(&self, max: &K) -> Vec<&V> {
        self.collect_values(Bound::Unbounded, Bound::Included(max))
    }

    /// Return every value whose key is `>= min`, in key order.
    pub fn values_from(&self, min: &K) -> Vec<&V> {
        self.collect_values(Bound::Included(min), Bound::Unbounded)
    }

    /// Return every value in key order.
    pub fn values(&self) -> Vec<&V> {
        self.collect_values(Bound::Unbounded, Bound::Unbounded)
    }

    /// Return every key in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.key_count);
        self.walk(Bound::Unbounded, Bound::Unbounded, |node| keys.push(&node.key));
        keys
    }

    /// Remove the first value under `key` matching `predicate`.
    ///
    /// The node itself is unlinked once its value list becomes empty.
    pub fn remove_value<P>(&mut self, key: &K, predicate: P) -> Option<V>
    where
        P: FnMut(&V) -> bool,
    {
        let slot = locate(&mut self.root, key);
        let node = slot.as_mut()?;
        let position = node.values.iter().position(predicate)?;
        let removed = node.values.remove_at(position).ok()?;
        if node.values.is_empty() {
            unlink(slot);
            self.key_count -= 1;
        }
        self.value_count -= 1;
        Some(removed)
    }

    fn collect_values<'a>(&'a self, lower: Bound<&K>, upper: Bound<&K>) -> Vec<&'a V> {
        let mut values = Vec::new();
        self.walk(lower, upper, |node| values.extend(node.values.iter()));
        values
    }

    // In-order traversal that never descends into subtrees lying wholly
    // outside the bounds.
    fn walk<'a, F>(&'a self, lower: Bound<&K>, upper: Bound<&K>, mut visit: F)
    where
        F: FnMut(&'a Node<K, V>),
    {
        let mut stack: Vec<&'a Node<K, V>> = Vec::new();
        let mut cursor = self.root.as_deref();
        loop {
            while let Some(node) = cursor {
                if at_or_above(lower, &node.key) {
                    stack.push(node);
                    cursor = node.left.as_deref();
                } else {
                    cursor = node.right.as_deref();
                }
            }
            let Some(node) = stack.pop() else { break };
            if !at_or_below(upper, &node.key) {
                break;
            }
            visit(node);
            cursor = node.right.as_deref();
        }
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<K: Ord + std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        self.walk(Bound::Unbounded, Bound::Unbounded, |node| {
            map.entry(&node.key, &node.values.as_slice());
        });
        map.finish()
    }
}

fn at_or_above<K: Ord>(lower: Bound<&K>, key: &K) -> bool {
    match lower {
        Bound::Included(bound) => key >= bound,
        Bound::Excluded(bound) => key > bound,
        Bound::Unbounded => true,
    }
}

fn at_or_below<K: Ord>(upper: Bound<&K>, key: &K) -> bool {
    match upper {
        Bound::Included(bound) => key <= bound,
        Bound::Excluded(bound) => key < bound,
        Bound::Unbounded => true,
    }
}

// Returns the slot holding `key`, or the empty slot where it belongs.
fn locate<'a, K: Ord, V>(mut slot: &'a mut Link<K, V>, key: &K) -> &'a mut Link<K, V> {
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => key.cmp(&node.key),
            None => return slot,
        };
        if ordering == Ordering::Equal {
            return slot;
        }
        let Some(node) = slot else { return slot };
        slot = if ordering == Ordering::Less {
            &mut node.left
        } else {
            &mut node.right
        };
    }
}

// Replaces the node in `slot` by its in-order successor (or its only child).
fn unlink<K, V>(slot: &mut Link<K, V>) -> Link<K, V> {
    let mut node = slot.take()?;
    *slot = match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let mut right = Some(right);
            let mut successor = take_min(&mut right)?;
            successor.left = Some(left);
            successor.right = right;
            Some(successor)
        }
    };
    Some(node)
}

fn take_min<K, V>(mut slot: &mut Link<K, V>) -> Link<K, V> {
    while slot.as_ref().is_some_and(|node| node.left.is_some()) {
        slot = &mut slot.as_mut()?.left;
    }
    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

fn release<K, V>(root: Link<K, V>) {
    let mut pending: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn key(value: f64) -> OrderedF64 {
        OrderedF64::new(value)
    }

    #[fixture]
    fn lengths() -> OrderedMap<OrderedF64, &'static str> {
        let mut map = OrderedMap::new();
        for (length, name) in [
            (5.0, "e"),
            (2.0, "b"),
            (8.0, "h"),
            (1.0, "a"),
            (3.0, "c"),
            (7.0, "g"),
            (9.0, "i"),
            (3.0, "c2"),
        ] {
            map.put(key(length), name);
        }
        map
    }

    #[rstest]
    fn negative_zero_shares_the_zero_key() {
        let mut map = OrderedMap::new();
        map.put(key(-0.0), "signed");
        map.put(key(0.0), "plain");
        assert_eq!(map.key_count(), 1);
        assert_eq!(map.get_range(&key(0.0), &key(1.0)), vec![&"signed", &"plain"]);
    }

    #[rstest]
    fn duplicate_keys_accumulate(lengths: OrderedMap<OrderedF64, &'static str>) {
        assert_eq!(lengths.get_all(&key(3.0)), Some(&["c", "c2"][..]));
        assert_eq!(lengths.get(&key(3.0)), Some(&"c"));
        assert_eq!(lengths.key_count(), 7);
        assert_eq!(lengths.value_count(), 8);
    }

    #[rstest]
    #[case(2.0, 7.0, vec!["b", "c", "c2", "e", "g"])]
    #[case(3.0, 3.0, vec!["c", "c2"])]
    #[case(3.5, 4.5, vec![])]
    #[case(9.0, 1.0, vec![])]
    #[case(0.0, 100.0, vec!["a", "b", "c", "c2", "e", "g", "h", "i"])]
    fn range_is_inclusive_on_both_ends(
        lengths: OrderedMap<OrderedF64, &'static str>,
        #[case] min: f64,
        #[case] max: f64,
        #[case] expected: Vec<&'static str>,
    ) {
        let found: Vec<_> = lengths
            .get_range(&key(min), &key(max))
            .into_iter()
            .copied()
            .collect();
        assert_eq!(found, expected);
    }

    #[rstest]
    fn head_and_tail_views(lengths: OrderedMap<OrderedF64, &'static str>) {
        assert_eq!(lengths.values_up_to(&key(2.0)), vec![&"a", &"b"]);
        assert_eq!(lengths.values_from(&key(8.0)), vec![&"h", &"i"]);
    }

    #[rstest]
    #[case(1.0, "a")]
    #[case(2.0, "b")]
    #[case(5.0, "e")]
    #[case(8.0, "h")]
    fn removing_last_value_unlinks_node(
        mut lengths: OrderedMap<OrderedF64, &'static str>,
        #[case] length: f64,
        #[case] name: &'static str,
    ) {
        assert_eq!(lengths.remove_value(&key(length), |v| *v == name), Some(name));
        assert_eq!(lengths.get(&key(length)), None);
        assert_eq!(lengths.key_count(), 6);
        let keys: Vec<f64> = lengths.keys().into_iter().map(|k| k.get()).collect();
        let mut sorted = keys.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(keys, sorted);
        assert_eq!(lengths.values().len(), 7);
    }

    #[rstest]
    fn removing_one_duplicate_keeps_node(mut lengths: OrderedMap<OrderedF64, &'static str>) {
        assert_eq!(lengths.remove_value(&key(3.0), |v| *v == "c"), Some("c"));
        assert_eq!(lengths.get_all(&key(3.0)), Some(&["c2"][..]));
        assert_eq!(lengths.remove_value(&key(3.0), |v| *v == "zz"), None);
        assert_eq!(lengths.remove_value(&key(4.0), |_| true), None);
    }

    #[rstest]
    fn degenerate_tree_does_not_overflow_stack() {
        let mut map = OrderedMap::new();
        for value in 0..4_000_u32 {
            map.put(value, value);
        }
        assert_eq!(map.get_range(&3_990, &9_000).len(), 10);
        assert_eq!(map.values_up_to(&4).len(), 5);
        drop(map);
    }

    #[rstest]
    fn nan_keys_sort_last() {
        let mut map = OrderedMap::new();
        map.put(key(f64::NAN), "nan");
        map.put(key(1.0), "one");
        assert_eq!(map.values_up_to(&key(f64::MAX)), vec![&"one"]);
    }
}
