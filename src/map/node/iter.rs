use std::collections::VecDeque;
use self::visit::{Seen, Visit};
use super::Arena;

/// A lazy in-order walk over an arena, yielding `(depth, slot)` pairs. The root has depth `0`.
pub struct Walk<'a, K: 'a, V: 'a> {
    arena: &'a Arena<K, V>,
    visits: VecDeque<Visit>,
    size: usize,
}

impl<'a, K, V> Clone for Walk<'a, K, V> {
    fn clone(&self) -> Self {
        Walk { arena: self.arena, visits: self.visits.clone(), size: self.size }
    }
}

impl<'a, K, V> Walk<'a, K, V> {
    pub fn new(arena: &'a Arena<K, V>, size: usize) -> Self {
        Walk { arena: arena, visits: arena.root().into_iter().map(|slot| Visit::new(slot, 0)).collect(), size: size }
    }

    pub fn arena(&self) -> &'a Arena<K, V> { self.arena }
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        loop {
            let arena = self.arena;

            let op = match self.visits.back_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::R => Op::Push(visit.left(arena)),
                    Seen::L => Op::PopPush(visit.right(arena)),
                    Seen::B => Op::Pop,
                }
            };

            match op {
                Op::Push(visit) =>
                    if let Some(visit) = visit { self.visits.push_back(visit); },
                Op::PopPush(next) => {
                    self.size -= 1;
                    let visit = self.visits.pop_back()?;
                    if let Some(next) = next { self.visits.push_back(next); }
                    return Some(visit.item());
                }
                Op::Pop => {
                    self.size -= 1;
                    return self.visits.pop_back().map(Visit::item);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, K, V> DoubleEndedIterator for Walk<'a, K, V> {
    fn next_back(&mut self) -> Option<(usize, usize)> {
        loop {
            let arena = self.arena;

            let op = match self.visits.front_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::L => Op::Push(visit.right(arena)),
                    Seen::R => Op::PopPush(visit.left(arena)),
                    Seen::B => Op::Pop,
                }
            };

            match op {
                Op::Push(visit) =>
                    if let Some(visit) = visit { self.visits.push_front(visit); },
                Op::PopPush(next) => {
                    self.size -= 1;
                    let visit = self.visits.pop_front()?;
                    if let Some(next) = next { self.visits.push_front(next); }
                    return Some(visit.item());
                }
                Op::Pop => {
                    self.size -= 1;
                    return self.visits.pop_front().map(Visit::item);
                }
            }
        }
    }
}

impl<'a, K, V> ExactSizeIterator for Walk<'a, K, V> {}

enum Op<T> {
    Push(Option<T>),
    PopPush(Option<T>),
    Pop,
}

mod visit {
    use super::super::Arena;

    // A node on the walk's frontier, along with which of its children have been handed out.
    #[derive(Clone, Copy)]
    pub struct Visit {
        slot: usize,
        depth: usize,
        seen: Seen,
    }

    impl Visit {
        pub fn new(slot: usize, depth: usize) -> Visit { Visit { slot: slot, depth: depth, seen: Seen::N } }

        pub fn left<K, V>(&mut self, arena: &Arena<K, V>) -> Option<Visit> {
            match self.seen {
                Seen::N => self.seen = Seen::L,
                Seen::R => self.seen = Seen::B,
                Seen::L | Seen::B => return None,
            }

            arena[self.slot].left.map(|slot| Visit::new(slot, self.depth + 1))
        }

        pub fn right<K, V>(&mut self, arena: &Arena<K, V>) -> Option<Visit> {
            match self.seen {
                Seen::N => self.seen = Seen::R,
                Seen::L => self.seen = Seen::B,
                Seen::R | Seen::B => return None,
            }

            arena[self.slot].right.map(|slot| Visit::new(slot, self.depth + 1))
        }

        pub fn item(self) -> (usize, usize) { (self.depth, self.slot) }

        pub fn seen(&self) -> Seen { self.seen }
    }

    #[derive(Clone, Copy)]
    pub enum Seen {
        N,
        L,
        R,
        B,
    }
}
