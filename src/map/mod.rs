//! An ordered map based on a red-black tree.

mod node;

use compare::{Compare, Natural};
use log::debug;
use self::node::{Arena, Left, Right, Walk};
use std::fmt::{self, Debug};
use std::iter;
use std::ops;
use std::vec;
use crate::error::Violation;
use crate::levels::Levels;

pub use self::node::Color;

/// An ordered map based on a red-black tree.
///
/// Every insertion adds a new entry, even if an equal key is already present. The new entry
/// is placed after the existing ones in iteration order, and lookups find whichever equal entry
/// lies first on the search path.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct RedBlackMap<K, V, C = Natural<K>> where C: Compare<K> {
    arena: Arena<K, V>,
    len: usize,
    cmp: C,
}

impl<K, V> RedBlackMap<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { RedBlackMap::with_cmp(compare::natural()) }
}

impl<K, V, C> RedBlackMap<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        RedBlackMap { arena: Arena::new(), len: 0, cmp: cmp }
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// map.insert(2, "bb");
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns a reference to the map's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the map.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.len = 0;
    }

    /// Inserts an entry into the map and rebalances it.
    ///
    /// An entry whose key equals an existing key is added after it rather than replacing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, "a");
    /// map.insert(1, "b");
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &"a"), (&1, &"b")]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        self.arena.insert(&self.cmp, key, value);
        self.len += 1;
    }

    /// Removes and returns an entry whose key is equal to the given key, returning `None` if the
    /// map does not contain the key.
    ///
    /// The entry removed is the one `search` would find.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove(&1), Some((1, "a")));
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        match self.arena.search(&self.cmp, key) {
            None => {
                debug!("remove: key not found among {} entries", self.len);
                None
            }
            Some(slot) => {
                self.len -= 1;
                Some(self.arena.remove(slot))
            }
        }
    }

    /// Removes an entry whose key is equal to the given key, returning whether one was found.
    ///
    /// A key that is not present leaves the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(5, ());
    ///
    /// assert!(!map.delete(&6));
    /// assert!(map.delete(&5));
    /// assert!(map.is_empty());
    /// ```
    pub fn delete<Q: ?Sized>(&mut self, key: &Q) -> bool where C: Compare<Q, K> {
        self.remove(key).is_some()
    }

    /// Returns a handle to a node whose key is equal to the given key, or `None` if the map
    /// does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::{Color, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(5, "e");
    ///
    /// let node = map.search(&5).unwrap();
    /// assert_eq!(node.key(), &5);
    /// assert_eq!(node.color(), Color::Black);
    /// assert!(map.search(&4).is_none());
    /// ```
    pub fn search<Q: ?Sized>(&self, key: &Q) -> Option<NodeRef<K, V>> where C: Compare<Q, K> {
        self.arena.search(&self.cmp, key).map(|slot| NodeRef::new(&self.arena, slot))
    }

    /// Checks if the map contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.arena.search(&self.cmp, key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the map does
    /// not contain the key.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.search(key).map(NodeRef::value)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, "a");
    ///
    /// if let Some(value) = map.get_mut(&1) { *value = "b"; }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        let slot = self.arena.search(&self.cmp, key)?;
        Some(&mut self.arena[slot].value)
    }

    /// Returns a handle to the root node, or `None` if the map is empty.
    pub fn root(&self) -> Option<NodeRef<K, V>> {
        self.arena.root().map(|slot| NodeRef::new(&self.arena, slot))
    }

    /// Returns a handle to the node with the minimum key, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert!(map.minimum().is_none());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.minimum().map(|node| node.key()), Some(&1));
    /// assert_eq!(map.maximum().map(|node| node.key()), Some(&3));
    /// ```
    pub fn minimum(&self) -> Option<NodeRef<K, V>> { self.root().map(NodeRef::minimum) }

    /// Returns a handle to the node with the maximum key, or `None` if the map is empty.
    pub fn maximum(&self) -> Option<NodeRef<K, V>> { self.root().map(NodeRef::maximum) }

    /// Returns the black height of the whole tree: `1` when empty, `0` if some node's subtrees
    /// disagree.
    pub fn black_height(&self) -> usize { self.arena.black_height(self.arena.root()) }

    /// Returns the number of nodes on the longest root-to-leaf path, `0` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for i in 1..101 { map.insert(i, ()); }
    ///
    /// assert!(map.height() <= 13);
    /// ```
    pub fn height(&self) -> usize { self.arena.height(self.arena.root()) }

    /// Checks every red-black and search-tree invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let map: RedBlackMap<_, _> = (0..64).map(|i| (i, i)).collect();
    /// assert_eq!(map.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), Violation> { self.arena.validate(&self.cmp, self.len) }

    /// Returns a lazy in-order walk over the map's keys, paired with their depth in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// map.insert(3, ());
    ///
    /// assert_eq!(map.traverse_in_order().collect::<Vec<_>>(), [(1, &1), (0, &2), (1, &3)]);
    /// ```
    pub fn traverse_in_order(&self) -> InOrder<K, V> {
        InOrder { walk: Walk::new(&self.arena, self.len) }
    }

    /// Returns the map's keys grouped by depth.
    pub fn levels(&self) -> Levels<K> { self.traverse_in_order().collect() }

    /// Returns an iterator over the map's entries with immutable references to the values.
    pub fn iter(&self) -> Iter<K, V> { Iter { walk: Walk::new(&self.arena, self.len) } }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// for (_, value) in map.iter_mut() { *value *= 2; }
    ///
    /// assert_eq!(map[&"a"], 2);
    /// assert_eq!(map[&"b"], 4);
    /// assert_eq!(map[&"c"], 6);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        let order: Vec<usize> = Walk::new(&self.arena, self.len).map(|(_, slot)| slot).collect();
        IterMut { nodes: self.arena.slots_mut(), order: order.into_iter() }
    }

    /// Returns an iterator over the map's keys.
    pub fn keys(&self) -> Keys<K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values.
    pub fn values(&self) -> Values<K, V> { Values(self.iter()) }
}

impl<K, V, C> Debug for RedBlackMap<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Default for RedBlackMap<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { RedBlackMap::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for RedBlackMap<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for RedBlackMap<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> Self {
        let mut map: RedBlackMap<K, V, C> = Default::default();
        map.extend(it);
        map
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for RedBlackMap<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &'a Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackMap<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut RedBlackMap<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for RedBlackMap<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Returns an iterator that consumes the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.into_iter();
    /// assert_eq!(it.next(), Some((1, "a")));
    /// assert_eq!(it.next_back(), Some((3, "c")));
    /// assert_eq!(it.next(), Some((2, "b")));
    /// assert_eq!(it.next(), None);
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        let order: Vec<usize> = Walk::new(&self.arena, self.len).map(|(_, slot)| slot).collect();
        IntoIter { nodes: self.arena.into_slots(), order: order.into_iter() }
    }
}

/// A read-only handle to a node of a `RedBlackMap`.
///
/// Acquire through [`RedBlackMap::search`](struct.RedBlackMap.html#method.search),
/// [`RedBlackMap::root`](struct.RedBlackMap.html#method.root) and friends.
pub struct NodeRef<'a, K: 'a, V: 'a> {
    arena: &'a Arena<K, V>,
    slot: usize,
}

impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    fn new(arena: &'a Arena<K, V>, slot: usize) -> Self { NodeRef { arena: arena, slot: slot } }

    fn link(self, link: Option<usize>) -> Option<Self> { link.map(|slot| NodeRef::new(self.arena, slot)) }

    /// Returns the node's arena slot, as reported by [`Violation`](../enum.Violation.html).
    pub fn slot(self) -> usize { self.slot }

    /// Returns a reference to the node's key.
    pub fn key(self) -> &'a K { &self.arena[self.slot].key }

    /// Returns a reference to the node's value.
    pub fn value(self) -> &'a V { &self.arena[self.slot].value }

    /// Returns the node's color.
    pub fn color(self) -> Color { self.arena[self.slot].color }

    /// Checks if the node is red.
    pub fn is_red(self) -> bool { self.color() == Color::Red }

    /// Checks if the node is black.
    pub fn is_black(self) -> bool { self.color() == Color::Black }

    /// Returns the node's left child, if any.
    pub fn left(self) -> Option<Self> { self.link(self.arena[self.slot].left) }

    /// Returns the node's right child, if any.
    pub fn right(self) -> Option<Self> { self.link(self.arena[self.slot].right) }

    /// Returns the node's parent, or `None` for the root.
    pub fn parent(self) -> Option<Self> { self.link(self.arena[self.slot].parent) }

    /// Returns the node with the minimum key in this node's subtree.
    pub fn minimum(self) -> Self { NodeRef::new(self.arena, self.arena.extremum::<Left>(self.slot)) }

    /// Returns the node with the maximum key in this node's subtree.
    pub fn maximum(self) -> Self { NodeRef::new(self.arena, self.arena.extremum::<Right>(self.slot)) }

    /// Returns the black height of this node's subtree, or `0` if its paths disagree.
    pub fn black_height(self) -> usize { self.arena.black_height(Some(self.slot)) }

    /// Returns the number of nodes on the longest path down from this node.
    pub fn height(self) -> usize { self.arena.height(Some(self.slot)) }

    /// Returns the number of edges between this node and the root.
    ///
    /// A search that ends at this node compares against `depth() + 1` nodes.
    pub fn depth(self) -> usize { self.arena.depth(self.slot) }
}

impl<'a, K, V> Debug for NodeRef<'a, K, V> where K: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef").field("key", self.key()).field("color", &self.color()).finish()
    }
}

/// A lazy in-order walk over a map's keys and their depths.
///
/// Acquire through
/// [`RedBlackMap::traverse_in_order`](struct.RedBlackMap.html#method.traverse_in_order).
pub struct InOrder<'a, K: 'a, V: 'a> {
    walk: Walk<'a, K, V>,
}

impl<'a, K, V> Clone for InOrder<'a, K, V> {
    fn clone(&self) -> Self { InOrder { walk: self.walk.clone() } }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (usize, &'a K);

    fn next(&mut self) -> Option<(usize, &'a K)> {
        let arena = self.walk.arena();
        self.walk.next().map(|(depth, slot)| (depth, &arena[slot].key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.walk.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for InOrder<'a, K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// # Examples
///
/// Acquire through [`RedBlackMap::iter`](struct.RedBlackMap.html#method.iter) or the
/// `IntoIterator` trait:
///
/// ```
/// use redblack::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a> {
    walk: Walk<'a, K, V>,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter { walk: self.walk.clone() } }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let arena = self.walk.arena();
        self.walk.next().map(|(_, slot)| (&arena[slot].key, &arena[slot].value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.walk.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        let arena = self.walk.arena();
        self.walk.next_back().map(|(_, slot)| (&arena[slot].key, &arena[slot].value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// Acquire through [`RedBlackMap::iter_mut`](struct.RedBlackMap.html#method.iter_mut) or the
/// `IntoIterator` trait.
pub struct IterMut<'a, K: 'a, V: 'a> {
    nodes: Vec<Option<&'a mut node::Node<K, V>>>,
    order: vec::IntoIter<usize>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn take(&mut self, slot: usize) -> Option<(&'a K, &'a mut V)> {
        self.nodes[slot].take().map(|node| (&node.key, &mut node.value))
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        let slot = self.order.next()?;
        self.take(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.order.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        let slot = self.order.next_back()?;
        self.take(slot)
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator that consumes the map.
///
/// Acquire through the `IntoIterator` trait:
///
/// ```
/// use redblack::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct IntoIter<K, V> {
    nodes: Vec<Option<node::Node<K, V>>>,
    order: vec::IntoIter<usize>,
}

impl<K, V> IntoIter<K, V> {
    fn take(&mut self, slot: usize) -> Option<(K, V)> {
        self.nodes[slot].take().map(|node| (node.key, node.value))
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let slot = self.order.next()?;
        self.take(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.order.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let slot = self.order.next_back()?;
        self.take(slot)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's keys.
///
/// Acquire through [`RedBlackMap::keys`](struct.RedBlackMap.html#method.keys).
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self { Keys(self.0.clone()) }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> { self.0.next_back().map(|e| e.0) }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the map's values.
///
/// Acquire through [`RedBlackMap::values`](struct.RedBlackMap.html#method.values).
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self { Values(self.0.clone()) }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}
