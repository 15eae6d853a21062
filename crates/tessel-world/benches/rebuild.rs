use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use tessel_world::{Probe, RebuildPolicy, WorldGrid};

// Striped terrain: solid floor, patchy middle rows, open sky
fn terrain(w: usize, h: usize) -> Vec<u8> {
    let mut cells = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let id = if y < h / 4 {
                1
            } else if y < h / 2 && (x / 3 + y) % 4 != 0 {
                2 + (x / 7 % 3) as u8
            } else {
                0
            };
            cells[y * w + x] = id;
        }
    }
    cells
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_set");
    let (w, h) = (256, 128);
    let cells = terrain(w, h);
    for (name, policy) in [("full", RebuildPolicy::Full), ("row", RebuildPolicy::RowLocal)] {
        let mut grid = WorldGrid::cpu();
        grid.set_policy(policy);
        grid.load(&cells, w, h).unwrap();
        let mut i = 0usize;
        group.bench_function(name, |b| {
            b.iter(|| {
                i = i.wrapping_add(7919);
                let (x, y) = (i % w, (i / w) % h);
                grid.set(x, y, (i % 4) as u8).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_overlap(c: &mut Criterion) {
    let (w, h) = (256, 128);
    let mut grid = WorldGrid::cpu();
    grid.load(&terrain(w, h), w, h).unwrap();
    c.bench_function("overlap_miss_sky", |b| {
        let probe = Probe::axis_aligned(128.0, 120.0, 1.0, 2.0);
        b.iter(|| black_box(grid.overlaps(black_box(&probe))))
    });
}

criterion_group!(benches, bench_set, bench_overlap);
criterion_main!(benches);
