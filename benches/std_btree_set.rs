/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]

use criterion::{Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;

fn std_btree_set_insert(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("std b-tree set insert", move |b| {
        b.iter(|| {
            let mut set: BTreeSet<usize> = BTreeSet::new();

            for i in 0..limit {
                set.insert(i);
            }

            set
        });
    });
}

fn std_btree_set_remove(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("std b-tree set remove", move |b| {
        b.iter_with_setup(
            || (0..limit).collect::<BTreeSet<usize>>(),
            |mut set| {
                for i in 0..limit {
                    black_box(set.remove(&i));
                }

                set
            },
        );
    });
}

fn std_btree_set_get(c: &mut Criterion) {
    let limit = 100_000;
    let set: BTreeSet<usize> = (0..limit).collect();

    c.bench_function("std b-tree set get", move |b| {
        b.iter(|| {
            for i in 0..limit {
                black_box(set.get(&i));
            }
        });
    });
}

#[allow(clippy::explicit_iter_loop)]
fn std_btree_set_iterate(c: &mut Criterion) {
    let limit = 100_000;
    let set: BTreeSet<usize> = (0..limit).collect();

    c.bench_function("std b-tree set iterate", move |b| {
        b.iter(|| {
            for v in set.iter() {
                black_box(v);
            }
        });
    });
}

criterion_group!(
    benches,
    std_btree_set_insert,
    std_btree_set_remove,
    std_btree_set_get,
    std_btree_set_iterate
);
criterion_main!(benches);
