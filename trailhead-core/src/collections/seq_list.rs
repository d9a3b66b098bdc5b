//! Growable array list.

use std::cmp::Ordering;

use super::CollectionError;

const INITIAL_CAPACITY: usize = 10;

/// Growable array list.
///
/// Out-of-range access is an error rather than a silent `None`, so callers
/// cannot confuse "no element" with "bad position".
///
/// # Examples
/// ```
/// use trailhead_core::collections::SeqList;
///
/// let mut list = SeqList::new();
/// list.add(3);
/// list.add(1);
/// list.add(2);
/// list.sort_by(|a, b| a.cmp(b));
/// assert_eq!(list.to_vec(), vec![1, 2, 3]);
/// assert!(list.get(5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeqList<T> {
    items: Vec<T>,
}

impl<T> SeqList<T> {
    /// Construct an empty list with the default initial capacity.
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Append an element.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Return the element at `index`.
    ///
    /// # Errors
    /// Returns [`CollectionError::IndexOutOfBounds`] when `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(CollectionError::IndexOutOfBounds { index, len })
    }

    /// Return a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`CollectionError::IndexOutOfBounds`] when `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfBounds { index, len })
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Report whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocated slots in the backing storage.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Drop every element and shrink back to the initial capacity.
    pub fn clear(&mut self) {
        self.items = Vec::with_capacity(INITIAL_CAPACITY);
    }

    /// Iterate over the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Sort in place with a middle-pivot quicksort. Not stable.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        quick_sort(&mut self.items, &mut compare);
    }

    /// Remove the element at `index`, shifting later elements left.
    ///
    /// # Errors
    /// Returns [`CollectionError::IndexOutOfBounds`] when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        let len = self.items.len();
        if index >= len {
            return Err(CollectionError::IndexOutOfBounds { index, len });
        }
        Ok(self.items.remove(index))
    }
}

impl<T: PartialEq> SeqList<T> {
    /// Remove the first element equal to `item`.
    ///
    /// Linear scan followed by a left shift. Returns `false` when absent.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(position) => {
                self.items.remove(position);
                true
            }
            None => false,
        }
    }

    /// Report whether an element equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|candidate| candidate == item)
    }
}

impl<T: Clone> SeqList<T> {
    /// Copy the elements into a `Vec` in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Default for SeqList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SeqList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.add(item);
        }
        list
    }
}

impl<T> IntoIterator for SeqList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SeqList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// Hoare partition around the middle element; recursion always descends into
// the smaller half so depth stays logarithmic.
fn quick_sort<T, F>(items: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut slice = items;
    while slice.len() > 1 {
        let split = partition(slice, compare);
        let (left, right) = slice.split_at_mut(split);
        if left.len() < right.len() {
            quick_sort(left, compare);
            slice = right;
        } else {
            quick_sort(right, compare);
            slice = left;
        }
    }
}

// Returns `split` such that every element of `items[..split]` is <= every
// element of `items[split..]`, with both halves non-empty.
fn partition<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let last = items.len() - 1;
    let middle = last / 2;
    items.swap(0, middle);
    let mut i = 0;
    let mut j = last;
    loop {
        while i < last && compare(&items[i + 1], &items[0]) == Ordering::Less {
            i += 1;
        }
        while j > 0 && compare(&items[j], &items[0]) == Ordering::Greater {
            j -= 1;
        }
        if i + 1 >= j {
            break;
        }
        items.swap(i + 1, j);
        i += 1;
        j -= 1;
    }
    items.swap(0, j);
    j.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn add_grows_past_initial_capacity() {
        let mut list = SeqList::new();
        for value in 0..25 {
            list.add(value);
        }
        assert_eq!(list.len(), 25);
        assert!(list.capacity() >= 25);
        assert_eq!(list.get(24), Ok(&24));
    }

    #[rstest]
    fn get_out_of_bounds_is_an_error() {
        let list: SeqList<u8> = [1, 2].into_iter().collect();
        assert_eq!(
            list.get(2),
            Err(CollectionError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }

    #[rstest]
    fn remove_shifts_remaining_elements() {
        let mut list: SeqList<char> = "abcd".chars().collect();
        assert!(list.remove(&'b'));
        assert!(!list.remove(&'z'));
        assert_eq!(list.to_vec(), vec!['a', 'c', 'd']);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![1])]
    #[case(vec![2, 1])]
    #[case(vec![5, 3, 9, 1, 1, 7, 3, 0, 8])]
    #[case(vec![4, 4, 4, 4, 4])]
    #[case((0..50).rev().collect())]
    fn sort_orders_elements(#[case] input: Vec<i32>) {
        let mut expected = input.clone();
        expected.sort_unstable();
        let mut list: SeqList<i32> = input.into_iter().collect();
        list.sort_by(|a, b| a.cmp(b));
        assert_eq!(list.to_vec(), expected);
    }

    #[rstest]
    fn sort_honours_reversed_comparator() {
        let mut list: SeqList<f64> = [1.5, 9.0, 4.25, 0.0].into_iter().collect();
        list.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(list.to_vec(), vec![9.0, 4.25, 1.5, 0.0]);
    }

    #[rstest]
    fn clear_empties_the_list() {
        let mut list: SeqList<u8> = [1, 2, 3].into_iter().collect();
        list.clear();
        assert!(list.is_empty());
        assert!(list.get(0).is_err());
    }
}
