use bstree::Tree;

use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and an ordered map of occurrence
/// counts. This way we can ensure that after a random smattering of inserts
/// and removes the tree holds exactly the multiset the map describes.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, counts: &mut BTreeMap<i8, usize>) {
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(*x);
                *counts.entry(*x).or_insert(0) += 1;
            }
            Op::Remove(x) => {
                tree.remove(x);
                let n = counts.get(x).copied().unwrap_or(0);
                if n > 1 {
                    counts.insert(*x, n - 1);
                } else if n == 1 {
                    counts.remove(x);
                }
            }
            Op::Iter => {
                assert!(tree.iter().copied().eq(expand(counts)));
            }
        }
    }
}

/// Expands occurrence counts back into the sorted elements they stand for.
fn expand(counts: &BTreeMap<i8, usize>) -> impl Iterator<Item = i8> + '_ {
    counts
        .iter()
        .flat_map(|(x, n)| std::iter::repeat(*x).take(*n))
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::natural();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    tree.iter().copied().eq(expand(&counts)) && tree.len() == counts.values().sum::<usize>()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::natural();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::natural();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == None)
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree = Tree::natural();
    let mut counts = BTreeMap::new();
    for x in &xs {
        tree.insert(*x);
        *counts.entry(*x).or_insert(0) += 1;
    }
    for x in &removes {
        // Each removal takes out at most one occurrence.
        tree.remove(x);
        let n = counts.get(x).copied().unwrap_or(0);
        if n > 1 {
            counts.insert(*x, n - 1);
        } else if n == 1 {
            counts.remove(x);
        }
    }

    tree.iter().copied().eq(expand(&counts)) && tree.len() == counts.values().sum::<usize>()
}

#[quickcheck]
fn cleanup_runs_once_per_element(xs: Vec<i8>) -> bool {
    let released = Rc::new(Cell::new(0));
    let hook = Rc::clone(&released);
    let mut tree =
        Tree::with_cleanup(|a: &i8, b: &i8| a.cmp(b), move |_| hook.set(hook.get() + 1));
    for x in &xs {
        tree.insert(*x);
    }

    drop(tree);
    released.get() == xs.len()
}
