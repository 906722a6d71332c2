use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use linked_bst::Tree;

/// Builds a tree holding `0..len` inserted middle first, so it stays balanced.
fn get_balanced_tree(len: usize) -> Tree<String> {
    fn fill(tree: &mut Tree<String>, xs: &[usize]) {
        if !xs.is_empty() {
            let mid = xs.len() / 2;
            tree.insert(format!("value-{:08}", xs[mid]), false);
            fill(tree, &xs[..mid]);
            fill(tree, &xs[mid + 1..]);
        }
    }

    let xs = (0..len).collect::<Vec<_>>();
    let mut tree = Tree::new();
    fill(&mut tree, &xs);
    tree
}

/// Compares `clone_from` against dropping the destination and cloning, for each way
/// `clone_from` can reuse the destination's nodes.
///
/// The destination is rebuilt outside the timed section on every iteration, since assigning
/// changes it.
fn bench_assign(c: &mut Criterion, name: &str, dest_len: usize, source_len: usize) {
    let mut group = c.benchmark_group(name);
    let source = get_balanced_tree(source_len);
    let dest = get_balanced_tree(dest_len);

    group.bench_function(BenchmarkId::new("clone_from", source_len), |b| {
        b.iter_custom(|iters| {
            let mut time = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut dest = black_box(dest.clone());
                let instant = std::time::Instant::now();
                dest.clone_from(black_box(&source));
                time += instant.elapsed();
            }
            time
        })
    });

    group.bench_function(BenchmarkId::new("clone", source_len), |b| {
        b.iter_custom(|iters| {
            let mut time = std::time::Duration::ZERO;
            for _ in 0..iters {
                let old = black_box(dest.clone());
                let instant = std::time::Instant::now();
                drop(old);
                let new = black_box(&source).clone();
                time += instant.elapsed();
                black_box(&new);
            }
            time
        })
    });

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_assign(c, "assign-single-source", 1023, 1);
    bench_assign(c, "assign-single-dest", 1, 1023);
    bench_assign(c, "assign-same-count", 1023, 1023);
    bench_assign(c, "assign-different-count", 511, 1023);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
