use compare::{Compare, natural};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use redblack::{Color, RedBlackMap, RedBlackSet, Violation};
use std::collections::BTreeMap;

fn height_bound(n: usize) -> usize { (2.0 * ((n + 1) as f64).log2()).floor() as usize }

#[test]
fn four_keys() {
    let mut set = RedBlackSet::new();
    for key in [3, 5, 6, 7] { set.insert(key); }

    for key in [3, 5, 6, 7] { assert_eq!(set.search(&key).map(|node| *node.key()), Some(key)); }
    assert!(set.search(&4).is_none());
    assert!(set.height() <= height_bound(4));
    assert_eq!(set.validate(), Ok(()));

    let root = set.root().unwrap();
    assert_eq!((*root.key(), root.color()), (5, Color::Black));
    assert_eq!(root.left().map(|node| (*node.key(), node.color())), Some((3, Color::Black)));
    assert_eq!(root.right().map(|node| (*node.key(), node.color())), Some((6, Color::Black)));
}

#[test]
fn four_keys_then_two_deletes() {
    let mut set = RedBlackSet::new();
    for key in [3, 5, 6, 7] { set.insert(key); }

    assert!(set.delete(&7));
    assert!(set.delete(&5));

    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [3, 6]);
    assert!(set.search(&5).is_none());
    assert!(set.search(&7).is_none());
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn ascending_hundred() {
    let mut set = RedBlackSet::new();
    for key in 1..101 { set.insert(key); }

    assert_eq!(set.len(), 100);
    assert!(set.height() <= 13);
    assert!(set.black_height() > 1);
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn descending_thousand() {
    let mut set = RedBlackSet::new();
    for key in (0..1000).rev() { set.insert(key); }

    assert!(set.height() <= height_bound(1000));
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn random_five_hundred_then_delete_all() {
    let mut rng = StdRng::seed_from_u64(500);
    let mut keys: Vec<u32> = (0..500).map(|_| rng.gen()).collect();
    let mut set = RedBlackSet::new();

    for &key in &keys { set.insert(key); }
    assert_eq!(set.len(), 500);
    assert_eq!(set.validate(), Ok(()));

    keys.shuffle(&mut rng);

    for (i, key) in keys.iter().enumerate() {
        assert!(set.delete(key));
        assert_eq!(set.len(), 499 - i);
        if i % 50 == 0 { assert_eq!(set.validate(), Ok(())); }
    }

    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert!(set.root().is_none());
    for key in &keys { assert!(set.search(key).is_none()); }
}

#[test]
fn minimum_and_maximum() {
    let mut set = RedBlackSet::new();
    assert!(set.minimum().is_none());
    assert!(set.maximum().is_none());

    for key in 1..51 { set.insert(key); }

    let root = set.root().unwrap();
    assert_eq!(*root.key(), 16);
    assert_eq!(set.minimum().map(|node| *node.key()), Some(1));
    assert_eq!(root.left().map(|node| *node.minimum().key()), Some(1));
    assert_eq!(root.right().map(|node| *node.minimum().key()), Some(17));

    let max = set.maximum().unwrap();
    assert_eq!((*max.key(), max.color()), (50, Color::Red));
    assert_eq!(root.left().map(|node| *node.maximum().key()), Some(15));
}

#[test]
fn delete_single_key() {
    let mut set = RedBlackSet::new();
    assert!(!set.delete(&6));

    set.insert(5);
    assert!(set.delete(&5));
    assert!(set.search(&5).is_none());
    assert_eq!(set.len(), 0);
    assert_eq!(set.black_height(), 1);
}

#[test]
fn duplicates_are_kept_in_insertion_order() {
    let mut map = RedBlackMap::new();
    for (i, key) in [2, 1, 2, 3, 2].iter().enumerate() { map.insert(*key, i); }

    assert_eq!(map.len(), 5);
    assert_eq!(map.iter().filter(|e| *e.0 == 2).map(|e| *e.1).collect::<Vec<_>>(), [0, 2, 4]);
    assert_eq!(map.validate(), Ok(()));

    assert!(map.delete(&2));
    assert!(map.delete(&2));
    assert!(map.delete(&2));
    assert!(!map.delete(&2));
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [1, 3]);
}

#[test]
fn custom_comparator() {
    let mut set = RedBlackSet::with_cmp(natural().rev());
    for key in 0..20 { set.insert(key); }

    assert!(set.cmp().compares_gt(&1, &2));
    assert_eq!(set.minimum().map(|node| *node.key()), Some(19));
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), (0..20).rev().collect::<Vec<_>>());
    assert_eq!(set.validate(), Ok(()));

    let mut by_len = RedBlackSet::with_cmp(|l: &&str, r: &&str| l.len().cmp(&r.len()));
    for word in ["ccc", "a", "bb"] { by_len.insert(word); }
    assert_eq!(by_len.iter().cloned().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
}

#[test]
fn map_values() {
    let mut map = RedBlackMap::new();
    for i in 0..10 { map.insert(i, i * 10); }

    assert_eq!(map.get(&3), Some(&30));
    assert_eq!(map[&4], 40);
    *map.get_mut(&5).unwrap() += 1;
    for (_, value) in &mut map { *value += 1; }

    assert_eq!(map.values().cloned().collect::<Vec<_>>(), [1, 11, 21, 31, 41, 52, 61, 71, 81, 91]);
    assert_eq!(map.remove(&9), Some((9, 91)));
    assert_eq!(map.search(&8).map(|node| *node.value()), Some(81));
}

#[test]
fn levels_group_keys_by_depth() {
    let set: RedBlackSet<_> = (1..8).collect();
    let levels = set.levels();

    assert_eq!(levels.len(), set.height());
    assert_eq!(levels[1], [&1, &4]);
    assert_eq!(levels[3], [&5, &7]);
    assert!(RedBlackSet::<u8>::new().levels().is_empty());
}

#[test]
fn clear_resets() {
    let mut set: RedBlackSet<_> = (0..10).collect();
    set.clear();

    assert!(set.is_empty());
    assert_eq!(set.validate(), Ok(()));
    set.insert(1);
    assert_eq!(set.len(), 1);
}

#[test]
fn violation_messages() {
    assert_eq!(Violation::RedRoot.to_string(), "root is red");
    assert_eq!(Violation::Len { expected: 2, found: 1 }.to_string(), "expected 2 nodes, found 1");
}

#[test]
fn interleaved_random_operations() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut set = RedBlackSet::new();
    let mut model: BTreeMap<u8, usize> = BTreeMap::new();

    for _ in 0..5_000 {
        let key: u8 = rng.gen_range(0..64);

        if rng.gen_bool(0.6) {
            set.insert(key);
            *model.entry(key).or_insert(0) += 1;
        } else {
            let present = model.get(&key).map_or(false, |&count| count > 0);
            assert_eq!(set.delete(&key), present);
            if present { *model.get_mut(&key).unwrap() -= 1; }
        }
    }

    assert_eq!(set.validate(), Ok(()));
    assert_eq!(set.len(), model.values().sum::<usize>());
    assert!(set.height() <= height_bound(set.len()));
}
