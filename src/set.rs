//! An ordered set based on a red-black tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug};
use std::iter;
use crate::error::Violation;
use crate::levels::Levels;
use crate::map::{self, NodeRef, RedBlackMap};

/// An ordered set based on a red-black tree.
///
/// Inserting an item equal to one already present adds it again, after the existing one.
///
/// The behavior of this set is undefined if an item's ordering relative to any other item changes
/// while the item is in the set. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct RedBlackSet<T, C = Natural<T>> where C: Compare<T> {
    map: RedBlackMap<T, (), C>,
}

impl<T> RedBlackSet<T> where T: Ord {
    /// Creates an empty set ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = redblack::RedBlackSet::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { RedBlackSet { map: RedBlackMap::new() } }
}

impl<T, C> RedBlackSet<T, C> where C: Compare<T> {
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut set = redblack::RedBlackSet::with_cmp(natural().rev());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [&3, &2, &1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { RedBlackSet { map: RedBlackMap::with_cmp(cmp) } }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the number of items in the set, counting equal items separately.
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { self.map.cmp() }

    /// Removes all items from the set.
    pub fn clear(&mut self) { self.map.clear(); }

    /// Inserts an item into the set and rebalances it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = redblack::RedBlackSet::new();
    /// for key in [3, 5, 6, 7] { set.insert(key); }
    ///
    /// assert_eq!(set.len(), 4);
    /// assert!(set.contains(&6));
    /// assert!(!set.contains(&4));
    /// ```
    pub fn insert(&mut self, item: T) { self.map.insert(item, ()); }

    /// Removes and returns an item equal to the given item, returning `None` if the set does not
    /// contain it.
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where C: Compare<Q, T> {
        self.map.remove(item).map(|e| e.0)
    }

    /// Removes an item equal to the given item, returning whether one was found.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = redblack::RedBlackSet::new();
    /// for key in [3, 5, 6, 7] { set.insert(key); }
    ///
    /// assert!(set.delete(&7));
    /// assert!(set.delete(&5));
    /// assert!(!set.delete(&5));
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [&3, &6]);
    /// ```
    pub fn delete<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.delete(item)
    }

    /// Returns a handle to a node holding an item equal to the given item, or `None` if the set
    /// does not contain it.
    pub fn search<Q: ?Sized>(&self, item: &Q) -> Option<NodeRef<T, ()>> where C: Compare<Q, T> {
        self.map.search(item)
    }

    /// Checks if the set contains the given item.
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.contains_key(item)
    }

    /// Returns a handle to the root node, or `None` if the set is empty.
    pub fn root(&self) -> Option<NodeRef<T, ()>> { self.map.root() }

    /// Returns a handle to the node with the minimum item, or `None` if the set is empty.
    pub fn minimum(&self) -> Option<NodeRef<T, ()>> { self.map.minimum() }

    /// Returns a handle to the node with the maximum item, or `None` if the set is empty.
    pub fn maximum(&self) -> Option<NodeRef<T, ()>> { self.map.maximum() }

    /// Returns the black height of the whole tree: `1` when empty, `0` if some node's subtrees
    /// disagree.
    pub fn black_height(&self) -> usize { self.map.black_height() }

    /// Returns the number of nodes on the longest root-to-leaf path, `0` when empty.
    pub fn height(&self) -> usize { self.map.height() }

    /// Checks every red-black and search-tree invariant.
    pub fn validate(&self) -> Result<(), Violation> { self.map.validate() }

    /// Returns a lazy in-order walk over the set's items, paired with their depth in the tree.
    pub fn traverse_in_order(&self) -> map::InOrder<T, ()> { self.map.traverse_in_order() }

    /// Returns the set's items grouped by depth.
    pub fn levels(&self) -> Levels<T> { self.map.levels() }

    /// Returns an iterator over the set's items in ascending order.
    pub fn iter(&self) -> Iter<T> { Iter(self.map.keys()) }
}

impl<T, C> Debug for RedBlackSet<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_set().entries(self.iter()).finish() }
}

impl<T, C> Default for RedBlackSet<T, C> where C: Compare<T> + Default {
    fn default() -> Self { RedBlackSet::with_cmp(Default::default()) }
}

impl<T, C> Extend<T> for RedBlackSet<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        for item in it { self.insert(item); }
    }
}

impl<T, C> iter::FromIterator<T> for RedBlackSet<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> Self {
        let mut set: RedBlackSet<T, C> = Default::default();
        set.extend(it);
        set
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackSet<T, C> where C: Compare<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, C> IntoIterator for RedBlackSet<T, C> where C: Compare<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { IntoIter(self.map.into_iter()) }
}

/// An iterator that consumes the set.
///
/// Acquire through the `IntoIterator` trait:
///
/// ```
/// let mut set = redblack::RedBlackSet::new();
///
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
///
/// assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub struct IntoIter<T>(map::IntoIter<T, ()>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back().map(|e| e.0) }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the set's items.
///
/// Acquire through [`RedBlackSet::iter`](struct.RedBlackSet.html#method.iter) or the
/// `IntoIterator` trait.
pub struct Iter<'a, T: 'a>(map::Keys<'a, T, ()>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
