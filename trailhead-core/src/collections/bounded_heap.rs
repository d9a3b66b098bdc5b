//! Comparator-driven binary heap with top-K admission.

use std::cmp::Ordering;

use log::debug;

use super::CollectionError;

/// Ordering callback deciding which element sits on top of the heap.
///
/// The element comparing as [`Ordering::Less`] against every other is the
/// top ("smallest on top").
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Binary heap ordered by a swappable comparator.
///
/// With a bound of `k`, [`BoundedHeap::offer`] implements the classic
/// top-K selection: the heap keeps the `k` "largest" elements seen so far
/// with the weakest of them on top, ready to be evicted.
///
/// # Examples
/// ```
/// use trailhead_core::collections::BoundedHeap;
///
/// let mut best = BoundedHeap::with_bound(2, |a: &u32, b: &u32| a.cmp(b));
/// for score in [4, 9, 1, 7] {
///     best.offer(score);
/// }
/// assert_eq!(best.into_sorted_vec(), vec![7, 9]);
/// ```
pub struct BoundedHeap<T> {
    items: Vec<T>,
    compare: Comparator<T>,
    bound: Option<usize>,
}

impl<T> BoundedHeap<T> {
    /// Construct an unbounded heap ordered by `compare`.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            items: Vec::new(),
            compare: Box::new(compare),
            bound: None,
        }
    }

    /// Construct a heap that [`BoundedHeap::offer`] caps at `bound` elements.
    pub fn with_bound<F>(bound: usize, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            items: Vec::with_capacity(bound),
            compare: Box::new(compare),
            bound: Some(bound),
        }
    }

    /// Insert an element regardless of the bound.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Offer an element for top-K admission.
    ///
    /// Below the bound the element is always admitted. At the bound it
    /// replaces the current top only when it compares strictly greater.
    /// Returns whichever element did not make it into the heap.
    pub fn offer(&mut self, item: T) -> Option<T> {
        let Some(bound) = self.bound else {
            self.add(item);
            return None;
        };
        if self.items.len() < bound {
            self.add(item);
            return None;
        }
        let beats_top = self
            .items
            .first()
            .is_some_and(|top| (self.compare)(&item, top) == Ordering::Greater);
        if !beats_top {
            return Some(item);
        }
        let evicted = std::mem::replace(&mut self.items[0], item);
        self.sift_down(0);
        Some(evicted)
    }

    /// Borrow the top element.
    ///
    /// # Errors
    /// Returns [`CollectionError::EmptyStructure`] when the heap is empty.
    pub fn peek_top(&self) -> Result<&T, CollectionError> {
        self.items.first().ok_or(CollectionError::EmptyStructure)
    }

    /// Remove and return the top element.
    ///
    /// # Errors
    /// Returns [`CollectionError::EmptyStructure`] when the heap is empty.
    pub fn pop_top(&mut self) -> Result<T, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyStructure);
        }
        let top = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    /// Replace the comparator and rebuild the heap under the new order.
    pub fn set_comparator<F>(&mut self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.compare = Box::new(compare);
        let old = std::mem::take(&mut self.items);
        debug!("rebuilding heap of {} elements after comparator swap", old.len());
        for item in old {
            self.add(item);
        }
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Report whether the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Capacity enforced by [`BoundedHeap::offer`], if any.
    pub fn bound(&self) -> Option<usize> {
        self.bound
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drain the heap top-first, so the result ascends under the comparator.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.items.len());
        while let Ok(top) = self.pop_top() {
            sorted.push(top);
        }
        sorted
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if (self.compare)(&self.items[index], &self.items[parent]) != Ordering::Less {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let mut smallest = index;
            for child in [2 * index + 1, 2 * index + 2] {
                if child < len
                    && (self.compare)(&self.items[child], &self.items[smallest]) == Ordering::Less
                {
                    smallest = child;
                }
            }
            if smallest == index {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: PartialEq> BoundedHeap<T> {
    /// Remove an arbitrary element equal to `item`.
    ///
    /// The last element fills the hole and is sifted in both directions.
    /// Returns `Ok(false)` when no element matches.
    ///
    /// # Errors
    /// Returns [`CollectionError::EmptyStructure`] when the heap is empty.
    pub fn remove(&mut self, item: &T) -> Result<bool, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyStructure);
        }
        let Some(index) = self.items.iter().position(|candidate| candidate == item) else {
            return Ok(false);
        };
        self.items.swap_remove(index);
        if index < self.items.len() {
            self.sift_up(index);
            self.sift_down(index);
        }
        Ok(true)
    }
}

impl<T: Clone> BoundedHeap<T> {
    /// Copy the elements in heap (array) order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for BoundedHeap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedHeap")
            .field("items", &self.items)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn min_heap() -> BoundedHeap<i32> {
        BoundedHeap::new(|a: &i32, b: &i32| a.cmp(b))
    }

    fn assert_heap_order(heap: &BoundedHeap<i32>) {
        let items = heap.to_vec();
        for (index, item) in items.iter().enumerate().skip(1) {
            let parent = &items[(index - 1) / 2];
            assert!(parent <= item, "heap order broken at {index}: {items:?}");
        }
    }

    #[rstest]
    fn empty_heap_reports_empty_structure() {
        let mut heap = min_heap();
        assert_eq!(heap.peek_top().err(), Some(CollectionError::EmptyStructure));
        assert_eq!(heap.pop_top().err(), Some(CollectionError::EmptyStructure));
        assert_eq!(heap.remove(&1), Err(CollectionError::EmptyStructure));
    }

    #[rstest]
    fn pop_top_yields_ascending_order() {
        let mut heap = min_heap();
        for value in [5, 3, 8, 1, 9, 2, 2] {
            heap.add(value);
        }
        assert_eq!(heap.peek_top(), Ok(&1));
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 2, 3, 5, 8, 9]);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(6)]
    fn remove_restores_heap_order(#[case] victim_index: usize) {
        let mut heap = min_heap();
        for value in [10, 20, 15, 30, 40, 16, 17, 50, 60] {
            heap.add(value);
        }
        let victim = heap.to_vec()[victim_index];
        assert_eq!(heap.remove(&victim), Ok(true));
        assert_eq!(heap.remove(&999), Ok(false));
        assert_eq!(heap.len(), 8);
        assert_heap_order(&heap);
        assert!(!heap.into_sorted_vec().contains(&victim));
    }

    #[rstest]
    fn set_comparator_rebuilds_heap() {
        let mut heap = min_heap();
        for value in [4, 1, 7, 3] {
            heap.add(value);
        }
        heap.set_comparator(|a: &i32, b: &i32| b.cmp(a));
        assert_eq!(heap.peek_top(), Ok(&7));
        assert_eq!(heap.into_sorted_vec(), vec![7, 4, 3, 1]);
    }

    #[rstest]
    fn offer_keeps_the_largest_k() {
        let mut heap = BoundedHeap::with_bound(3, |a: &i32, b: &i32| a.cmp(b));
        let mut rejected = Vec::new();
        for value in [5, 1, 9, 3, 7, 2, 8] {
            rejected.extend(heap.offer(value));
        }
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.into_sorted_vec(), vec![7, 8, 9]);
        rejected.sort_unstable();
        assert_eq!(rejected, vec![1, 2, 3, 5]);
    }

    #[rstest]
    fn offer_rejects_ties_with_the_top() {
        let mut heap = BoundedHeap::with_bound(1, |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(heap.offer(4), None);
        assert_eq!(heap.offer(4), Some(4));
        assert_eq!(heap.len(), 1);
    }

    #[rstest]
    fn zero_bound_admits_nothing() {
        let mut heap = BoundedHeap::with_bound(0, |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(heap.offer(1), Some(1));
        assert!(heap.is_empty());
    }
}
