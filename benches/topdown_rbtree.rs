/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]
#![allow(clippy::cast_possible_wrap)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use topdown_rbtree::{Entry, RedBlackTree, Traversal};

fn topdown_rbtree_insert(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("top-down red black tree insert", move |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::new();

            for i in 0..limit {
                tree.insert(i).unwrap();
            }

            tree
        });
    });
}

fn topdown_rbtree_insert_entry(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("top-down red black tree insert entry", move |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::new();

            for i in 0..limit {
                tree.insert(Entry::new(i, -(i as isize))).unwrap();
            }

            tree
        });
    });
}

fn topdown_rbtree_erase(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("top-down red black tree erase", move |b| {
        b.iter_with_setup(
            || {
                let mut tree = RedBlackTree::new();

                for i in 0..limit {
                    tree.insert(i).unwrap();
                }

                tree
            },
            |mut tree| {
                for i in 0..limit {
                    black_box(tree.erase(&i));
                }

                tree
            },
        );
    });
}

fn topdown_rbtree_find(c: &mut Criterion) {
    let limit = 100_000;
    let tree: RedBlackTree<usize> = (0..limit).collect();

    c.bench_function("top-down red black tree find", move |b| {
        b.iter(|| {
            for i in 0..limit {
                black_box(tree.find(&i));
            }
        });
    });
}

#[allow(clippy::explicit_iter_loop)]
fn topdown_rbtree_iterate(c: &mut Criterion) {
    let limit = 100_000;
    let tree: RedBlackTree<usize> = (0..limit).collect();

    c.bench_function("top-down red black tree iterate", move |b| {
        b.iter(|| {
            for v in tree.iter() {
                black_box(v);
            }
        });
    });
}

fn topdown_rbtree_traverse_backward(c: &mut Criterion) {
    let limit = 100_000;
    let tree: RedBlackTree<usize> = (0..limit).collect();

    c.bench_function("top-down red black tree traverse backward", move |b| {
        b.iter(|| {
            let mut traversal = Traversal::new();
            let mut it = traversal.last(&tree);

            while let Some(v) = it {
                black_box(v);
                it = traversal.prev();
            }
        });
    });
}

criterion_group!(
    benches,
    topdown_rbtree_insert,
    topdown_rbtree_insert_entry,
    topdown_rbtree_erase,
    topdown_rbtree_find,
    topdown_rbtree_iterate,
    topdown_rbtree_traverse_backward
);
criterion_main!(benches);
