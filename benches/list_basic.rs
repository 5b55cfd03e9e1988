//! Basic benchmarks for the `array_list` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use array_list::ArrayList;
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const ITEM_COUNT: u32 = 1000;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_basic");

    group.bench_function("push_1000", |b| {
        b.iter(|| {
            let mut list = ArrayList::new();

            for value in 0..ITEM_COUNT {
                list.push(black_box(value)).unwrap();
            }

            black_box(&list);
        });
    });

    group.bench_function("insert_front_100", |b| {
        b.iter(|| {
            let mut list = ArrayList::new();

            for value in 0..100_u32 {
                list.insert(0, black_box(value)).unwrap();
            }

            black_box(&list);
        });
    });

    group.bench_function("index_of_last", |b| {
        let mut list = ArrayList::new();
        for value in 0..ITEM_COUNT {
            list.push(value).unwrap();
        }

        b.iter(|| black_box(list.index_of(black_box(&(ITEM_COUNT - 1)))));
    });

    group.bench_function("cursor_sweep_remove", |b| {
        b.iter(|| {
            let mut list = ArrayList::new();
            for value in 0..ITEM_COUNT {
                list.push(value).unwrap();
            }

            let mut cursor = list.cursor_front_mut();
            while let Some(&value) = cursor.current() {
                if value % 2 == 0 {
                    _ = cursor.remove_current();
                } else {
                    cursor.move_next();
                }
            }

            black_box(&list);
        });
    });

    group.finish();
}
