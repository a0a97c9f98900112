mod iter;


use compare::Compare;
use log::trace;
use std::cmp::Ordering::*;
use std::mem;
use std::ops::{Index, IndexMut};
use crate::error::Violation;

pub use self::iter::Walk;

/// An arena slot index. `None` stands for a missing child, or for the parent of the root.
pub type Link = Option<usize>;

/// The color of a red-black tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node. Red nodes never have red children.
    Red,
    /// A black node. Missing children are black as well.
    Black,
}

#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub left: Link,
    pub right: Link,
    pub parent: Link,
    pub color: Color,
    pub key: K,
    pub value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Link) -> Self {
        Node { left: None, right: None, parent: parent, color: Color::Red, key: key, value: value }
    }
}

/// Node storage for a single tree. Slots freed by a removal are reused by later insertions.
#[derive(Clone)]
pub struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    root: Link,
}

impl<K, V> Index<usize> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, slot: usize) -> &Node<K, V> {
        self.slots[slot].as_ref().expect("link to a vacant arena slot")
    }
}

impl<K, V> IndexMut<usize> for Arena<K, V> {
    fn index_mut(&mut self, slot: usize) -> &mut Node<K, V> {
        self.slots[slot].as_mut().expect("link to a vacant arena slot")
    }
}

impl<K, V> Arena<K, V> {
    pub fn new() -> Self { Arena { slots: vec![], free: vec![], root: None } }

    pub fn root(&self) -> Link { self.root }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
    }

    /// Consumes the arena, returning its slots in index order.
    pub fn into_slots(self) -> Vec<Option<Node<K, V>>> { self.slots }

    /// Returns mutable references to every slot, indexed by slot.
    pub fn slots_mut(&mut self) -> Vec<Option<&mut Node<K, V>>> {
        self.slots.iter_mut().map(Option::as_mut).collect()
    }

    fn alloc(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(slot) => { self.slots[slot] = Some(node); slot }
            None => { self.slots.push(Some(node)); self.slots.len() - 1 }
        }
    }

    fn release(&mut self, slot: usize) -> Node<K, V> {
        let node = self.slots[slot].take().expect("released a vacant arena slot");
        self.free.push(slot);
        node
    }

    /// Missing children are black.
    pub fn is_red(&self, link: Link) -> bool {
        link.map_or(false, |slot| self[slot].color == Color::Red)
    }

    // Points `parent`'s link to `old` (or the root, if `parent` is `None`) at `new`.
    fn replace_child(&mut self, parent: Link, old: usize, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => if self[parent].left == Some(old) {
                self[parent].left = new;
            } else {
                self[parent].right = new;
            },
        }
    }

    /// Moves `x` down toward `D`, promoting its child on the opposite side into its place.
    ///
    /// Rotating `Left` promotes `x.right`; rotating `Right` promotes `x.left`. Key order is
    /// unchanged.
    fn rotate<D>(&mut self, x: usize) where D: Dir {
        let y = D::Opposite::child(&self[x]).expect("rotation onto a missing child");
        trace!("rotate {} at slot {}", D::NAME, x);

        let inner = D::child(&self[y]);
        *D::Opposite::child_mut(&mut self[x]) = inner;
        if let Some(inner) = inner { self[inner].parent = Some(x); }

        let parent = self[x].parent;
        self[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        *D::child_mut(&mut self[y]) = Some(x);
        self[x].parent = Some(y);
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`. `v`'s children are left
    /// untouched.
    fn transplant(&mut self, u: usize, v: Link) {
        let parent = self[u].parent;
        self.replace_child(parent, u, v);
        if let Some(v) = v { self[v].parent = parent; }
    }

    pub fn extremum<D>(&self, mut slot: usize) -> usize where D: Dir {
        while let Some(child) = D::child(&self[slot]) { slot = child; }
        slot
    }

    pub fn search<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Link where C: Compare<Q, K> {
        let mut link = self.root;

        while let Some(slot) = link {
            link = match cmp.compare(key, &self[slot].key) {
                Equal => return link,
                Less => self[slot].left,
                Greater => self[slot].right,
            };
        }

        None
    }

    /// Inserts a new red leaf and restores the red-black invariants.
    ///
    /// Keys equal to an existing key descend to the right, so equal keys keep their insertion
    /// order.
    pub fn insert<C>(&mut self, cmp: &C, key: K, value: V) where C: Compare<K> {
        let mut parent = None;
        let mut link = self.root;
        let mut less = false;

        while let Some(slot) = link {
            parent = link;
            less = cmp.compares_lt(&key, &self[slot].key);
            link = if less { self[slot].left } else { self[slot].right };
        }

        let z = self.alloc(Node::new(key, value, parent));

        match parent {
            None => self.root = Some(z),
            Some(parent) => if less {
                self[parent].left = Some(z);
            } else {
                self[parent].right = Some(z);
            },
        }

        self.insert_fixup(z);
    }

    fn insert_fixup(&mut self, mut z: usize) {
        while let Some(parent) = self[z].parent {
            if self[parent].color == Color::Black { break; }

            let grandparent = self[parent].parent.expect("red node without a parent");

            z = if self[grandparent].left == Some(parent) {
                self.insert_step::<Left>(z, parent, grandparent)
            } else {
                self.insert_step::<Right>(z, parent, grandparent)
            };
        }

        if let Some(root) = self.root { self[root].color = Color::Black; }
    }

    // One pass of the insert fixup where `parent` is the `D` child of `grandparent`. Returns the
    // node to continue from.
    fn insert_step<D>(&mut self, mut z: usize, mut parent: usize, grandparent: usize) -> usize
        where D: Dir {

        let uncle = D::Opposite::child(&self[grandparent]);

        if let Some(uncle) = uncle.filter(|&uncle| self[uncle].color == Color::Red) {
            trace!("insert fixup: red uncle at slot {}", uncle);
            self[parent].color = Color::Black;
            self[uncle].color = Color::Black;
            self[grandparent].color = Color::Red;
            return grandparent;
        }

        if D::Opposite::child(&self[parent]) == Some(z) {
            trace!("insert fixup: inner grandchild at slot {}", z);
            self.rotate::<D>(parent);
            mem::swap(&mut z, &mut parent);
        }

        trace!("insert fixup: outer grandchild at slot {}", z);
        self[parent].color = Color::Black;
        self[grandparent].color = Color::Red;
        self.rotate::<D::Opposite>(grandparent);
        z
    }

    /// Unlinks the node in `z`, restores the red-black invariants and returns its key and value.
    ///
    /// If `z` has two children its in-order successor is relinked into `z`'s position, so the
    /// slots of all remaining nodes are unaffected.
    pub fn remove(&mut self, z: usize) -> (K, V) {
        let mut removed_color = self[z].color;
        let x;
        let x_parent;

        match (self[z].left, self[z].right) {
            (None, right) => {
                x = right;
                x_parent = self[z].parent;
                self.transplant(z, right);
            }
            (left, None) => {
                x = left;
                x_parent = self[z].parent;
                self.transplant(z, left);
            }
            (Some(left), Some(right)) => {
                let y = self.extremum::<Left>(right);
                removed_color = self[y].color;
                x = self[y].right;

                if y == right {
                    x_parent = Some(y);
                } else {
                    x_parent = self[y].parent;
                    self.transplant(y, x);
                    self[y].right = Some(right);
                    self[right].parent = Some(y);
                }

                self.transplant(z, Some(y));
                self[y].left = Some(left);
                self[left].parent = Some(y);
                self[y].color = self[z].color;
            }
        }

        if removed_color == Color::Black { self.delete_fixup(x, x_parent); }

        let node = self.release(z);
        (node.key, node.value)
    }

    // `x` carries an extra black. It may be missing, so its parent is tracked alongside it.
    fn delete_fixup(&mut self, mut x: Link, mut parent: Link) {
        while x != self.root && !self.is_red(x) {
            let p = match parent {
                Some(p) => p,
                None => break,
            };

            x = if self[p].left == x {
                self.delete_step::<Left>(p)
            } else {
                self.delete_step::<Right>(p)
            };

            parent = x.and_then(|x| self[x].parent);
        }

        if let Some(x) = x { self[x].color = Color::Black; }
    }

    // One pass of the delete fixup where the doubly black node is the `D` child of `parent`.
    // Returns the node that carries the extra black next, or the root once it is discharged.
    fn delete_step<D>(&mut self, parent: usize) -> Link where D: Dir {
        let mut sibling = D::Opposite::child(&self[parent]).expect("doubly black node without a sibling");

        if self[sibling].color == Color::Red {
            trace!("delete fixup: red sibling at slot {}", sibling);
            self[sibling].color = Color::Black;
            self[parent].color = Color::Red;
            self.rotate::<D>(parent);
            sibling = D::Opposite::child(&self[parent]).expect("doubly black node without a sibling");
        }

        let near = D::child(&self[sibling]);
        let far = D::Opposite::child(&self[sibling]);

        if !self.is_red(near) && !self.is_red(far) {
            trace!("delete fixup: black nephews under slot {}", sibling);
            self[sibling].color = Color::Red;
            return Some(parent);
        }

        if !self.is_red(far) {
            trace!("delete fixup: red near nephew under slot {}", sibling);
            if let Some(near) = near { self[near].color = Color::Black; }
            self[sibling].color = Color::Red;
            self.rotate::<D::Opposite>(sibling);
            sibling = D::Opposite::child(&self[parent]).expect("doubly black node without a sibling");
        }

        trace!("delete fixup: red far nephew under slot {}", sibling);
        self[sibling].color = self[parent].color;
        self[parent].color = Color::Black;
        if let Some(far) = D::Opposite::child(&self[sibling]) { self[far].color = Color::Black; }
        self.rotate::<D>(parent);
        self.root
    }

    /// Returns the number of black nodes on every path from `link` down to a missing child, with
    /// the missing child itself counted, or `0` if the paths disagree.
    pub fn black_height(&self, link: Link) -> usize {
        let slot = match link {
            None => return 1,
            Some(slot) => slot,
        };

        let left = self.black_height(self[slot].left);
        if left == 0 { return 0; }

        let right = self.black_height(self[slot].right);
        if right == 0 { return 0; }

        if left != right {
            0
        } else if self[slot].color == Color::Red {
            left
        } else {
            left + 1
        }
    }

    /// Returns the number of nodes on the longest path down from `link`.
    pub fn height(&self, link: Link) -> usize {
        link.map_or(0, |slot| 1 + self.height(self[slot].left).max(self.height(self[slot].right)))
    }

    /// Returns the number of edges between `slot` and the root.
    pub fn depth(&self, mut slot: usize) -> usize {
        let mut depth = 0;
        while let Some(parent) = self[slot].parent { slot = parent; depth += 1; }
        depth
    }

    /// Checks every structural and red-black invariant, along with the live node count.
    pub fn validate<C>(&self, cmp: &C, len: usize) -> Result<(), Violation> where C: Compare<K> {
        let live = self.slots.len() - self.free.len();
        if live != len { return Err(Violation::Len { expected: len, found: live }); }

        let root = match self.root {
            None => return if len == 0 { Ok(()) } else { Err(Violation::Len { expected: len, found: 0 }) },
            Some(root) => root,
        };

        if self[root].parent.is_some() { return Err(Violation::BrokenParent { slot: root }); }
        if self[root].color == Color::Red { return Err(Violation::RedRoot); }

        let mut count = 0;
        self.validate_subtree(root, &mut count)?;
        if count != len { return Err(Violation::Len { expected: len, found: count }); }

        let mut prev: Option<usize> = None;
        for (_, slot) in Walk::new(self, len) {
            if let Some(prev) = prev {
                if cmp.compares_gt(&self[prev].key, &self[slot].key) {
                    return Err(Violation::OutOfOrder { slot: slot });
                }
            }
            prev = Some(slot);
        }

        Ok(())
    }

    fn validate_subtree(&self, slot: usize, count: &mut usize) -> Result<usize, Violation> {
        *count += 1;
        let node = &self[slot];
        let mut heights = [1, 1];

        for (height, child) in heights.iter_mut().zip([node.left, node.right]) {
            if let Some(child) = child {
                if self[child].parent != Some(slot) {
                    return Err(Violation::BrokenParent { slot: child });
                }
                if node.color == Color::Red && self[child].color == Color::Red {
                    return Err(Violation::RedChild { parent: slot, child: child });
                }
                *height = self.validate_subtree(child, count)?;
            }
        }

        match heights {
            [left, right] if left != right => Err(Violation::BlackHeight { slot: slot, left: left, right: right }),
            [height, _] => Ok(if node.color == Color::Black { height + 1 } else { height }),
        }
    }
}

/// A side of a node. Mirror-image cases of the balancing engine are written once, generic over
/// the side they handle.
pub trait Dir: Sized {
    type Opposite: Dir<Opposite = Self>;

    const NAME: &'static str;

    fn child<K, V>(node: &Node<K, V>) -> Link;
    fn child_mut<K, V>(node: &mut Node<K, V>) -> &mut Link;
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    const NAME: &'static str = "left";

    fn child<K, V>(node: &Node<K, V>) -> Link { node.left }
    fn child_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    const NAME: &'static str = "right";

    fn child<K, V>(node: &Node<K, V>) -> Link { node.right }
    fn child_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.right }
}
