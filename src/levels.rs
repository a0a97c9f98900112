//! Keys grouped by their depth in a tree, for rendering it one level per line.

use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;
use std::ops::Index;

/// A tree's keys grouped by depth. Each level lists its keys in ascending order.
///
/// Built from an in-order walk of `(depth, key)` pairs; acquire through
/// [`RedBlackMap::levels`](map/struct.RedBlackMap.html#method.levels) or
/// [`RedBlackSet::levels`](set/struct.RedBlackSet.html#method.levels).
///
/// # Examples
///
/// ```
/// use redblack::RedBlackSet;
///
/// let set: RedBlackSet<_> = (1..8).collect();
/// let levels = set.levels();
///
/// assert_eq!(levels.len(), 4);
/// assert_eq!(levels[0], [&2]);
/// assert_eq!(levels.to_string(),
///     "-----\nLevel 0: [2]\nLevel 1: [1, 4]\nLevel 2: [3, 6]\nLevel 3: [5, 7]\n");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Levels<'a, T: 'a> {
    rows: Vec<Vec<&'a T>>,
}

impl<'a, T> Levels<'a, T> {
    /// Returns the number of levels, which is the tree's height.
    pub fn len(&self) -> usize { self.rows.len() }

    /// Checks if there are no levels, i.e. the tree was empty.
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Returns an iterator over the levels, from the root down.
    pub fn iter(&self) -> std::slice::Iter<Vec<&'a T>> { self.rows.iter() }
}

impl<'a, T> FromIterator<(usize, &'a T)> for Levels<'a, T> {
    fn from_iter<I: IntoIterator<Item = (usize, &'a T)>>(it: I) -> Self {
        let mut rows: Vec<Vec<&'a T>> = vec![];

        for (depth, key) in it {
            if rows.len() <= depth { rows.resize_with(depth + 1, Vec::new); }
            rows[depth].push(key);
        }

        Levels { rows: rows }
    }
}

impl<'a, T> Index<usize> for Levels<'a, T> {
    type Output = [&'a T];
    fn index(&self, depth: usize) -> &[&'a T] { &self.rows[depth] }
}

impl<'a, T> Debug for Levels<'a, T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_list().entries(&self.rows).finish() }
}

impl<'a, T> Display for Levels<'a, T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "-----")?;
        for (depth, keys) in self.rows.iter().enumerate() {
            writeln!(f, "Level {}: {:?}", depth, keys)?;
        }
        Ok(())
    }
}
