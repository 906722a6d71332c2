use linked_bst::Tree;

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and to a `BTreeMap` counting each value.
/// This way we can ensure that after a random smattering of inserts
/// and removals we have the same values, with the same multiplicity.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, counts: &mut BTreeMap<i8, usize>) {
    for op in ops {
        match *op {
            Op::Insert(x) => {
                tree.insert(x, false);
                *counts.entry(x).or_insert(0) += 1;
            }
            Op::InsertUnique(x) => {
                if tree.insert(x, true).1 {
                    *counts.entry(x).or_insert(0) += 1;
                }
            }
            Op::Remove(x) => {
                let removed = tree.remove(&x);
                match counts.get_mut(&x) {
                    Some(count) => {
                        assert_eq!(removed, Some(x));
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(&x);
                        }
                    }
                    None => assert_eq!(removed, None),
                }
            }
        }
    }
}

fn expected(counts: &BTreeMap<i8, usize>) -> Vec<i8> {
    counts
        .iter()
        .flat_map(|(&x, &count)| std::iter::repeat(x).take(count))
        .collect()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let expected = expected(&counts);
    tree.len() == expected.len() && tree.iter().copied().eq(expected.into_iter())
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort_unstable();

    tree.iter().copied().eq(sorted.iter().copied())
        && tree.iter().rev().copied().eq(sorted.iter().rev().copied())
}

#[quickcheck]
fn keep_unique_never_grows_on_duplicates(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut inserted = 0;
    for x in &xs {
        if tree.insert(*x, true).1 {
            inserted += 1;
        }
    }
    let distinct: HashSet<_> = xs.iter().collect();

    tree.len() == inserted && inserted == distinct.len()
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_end())
}

#[quickcheck]
fn erase_returns_successor(xs: Vec<i8>, pick: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort_unstable();
    sorted.dedup();
    let target = sorted[pick % sorted.len()];

    let mut cursor = tree.find_mut(&target);
    let erased = cursor.erase();
    let next = cursor.get().copied();
    let still_there = tree.contains(&target);

    // Either another copy of `target` follows, or the next greater value (if any).
    let greater = sorted.iter().copied().find(|&x| x > target);
    erased == Some(target) && (next == greater || (still_there && next == Some(target)))
}

#[quickcheck]
fn clear_empties(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    tree.clear();
    let once = tree.is_empty() && tree.begin() == tree.end();
    tree.clear();
    once && tree.is_empty()
}

#[quickcheck]
fn clone_from_matches_source(dest: Vec<i8>, source: Vec<i8>) -> bool {
    let source: Tree<_> = source.into_iter().collect();
    let mut dest: Tree<_> = dest.into_iter().collect();

    dest.clone_from(&source);
    dest == source && dest.len() == source.len()
}

#[quickcheck]
fn clone_from_same_count(xs: Vec<i8>, ys: Vec<i8>) -> bool {
    // Force the in place case by giving both trees the same number of values.
    let n = xs.len().min(ys.len());
    let source: Tree<_> = xs.into_iter().take(n).collect();
    let mut dest: Tree<_> = ys.into_iter().take(n).collect();

    dest.clone_from(&source);
    dest.iter().eq(source.iter())
}

#[quickcheck]
fn clone_independence(xs: Vec<u8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut cloned = tree.clone();

    for x in xs.iter().take(xs.len() / 2 + 1) {
        cloned.remove(x);
    }

    let fresh: Tree<_> = xs.into_iter().collect();
    tree == fresh
}

#[quickcheck]
fn into_iter_matches_iter(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let borrowed: Vec<_> = tree.iter().copied().collect();
    let owned: Vec<_> = tree.into_iter().collect();
    borrowed == owned
}
