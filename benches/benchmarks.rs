//! Performance benchmarks for fileaudit

use std::time::SystemTime;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fileaudit::report::{DetailedAggregator, SummaryAggregator, render_detailed};
use fileaudit::test_utils::TestTree;
use fileaudit::{FileRecord, FilePredicate, FilterSpec, RecordSink, TreeWalker};

/// Build a tree of `dirs` directories with `files_per_dir` files each,
/// alternating between a matching and a non-matching extension.
fn build_tree(dirs: usize, files_per_dir: usize) -> TestTree {
    let tree = TestTree::new();
    for d in 0..dirs {
        for f in 0..files_per_dir {
            let ext = if f % 2 == 0 { "txt" } else { "log" };
            tree.add_file(&format!("dir{d}/sub{}/file{f}.{ext}", f % 3), (f * 37) % 4096);
        }
    }
    tree
}

fn bench_filter_compile(c: &mut Criterion) {
    let spec = FilterSpec::with_extension("txt")
        .size("+1024")
        .permissions("u=rw,go=r")
        .modified("-30");

    c.bench_function("filter_compile", |b| {
        b.iter(|| FilePredicate::compile(black_box(&spec), SystemTime::now()).unwrap())
    });
}

fn bench_walk_detailed(c: &mut Criterion) {
    let tree = build_tree(20, 50);
    let predicate =
        FilePredicate::compile(&FilterSpec::with_extension("txt"), SystemTime::now()).unwrap();
    let walker = TreeWalker::new(predicate);

    c.bench_function("walk_detailed_1000_files", |b| {
        b.iter(|| {
            let mut agg = DetailedAggregator::new();
            walker.walk(black_box(tree.path()), &mut agg);
            agg.finalize()
        })
    });
}

fn bench_walk_summary(c: &mut Criterion) {
    let tree = build_tree(20, 50);
    let spec = FilterSpec::with_extension("txt").size("+512");
    let predicate = FilePredicate::compile(&spec, SystemTime::now()).unwrap();
    let walker = TreeWalker::new(predicate);

    c.bench_function("walk_summary_1000_files", |b| {
        b.iter(|| {
            let mut agg = SummaryAggregator::new();
            walker.walk(black_box(tree.path()), &mut agg);
            agg.finalize()
        })
    });
}

fn bench_render_detailed(c: &mut Criterion) {
    let tree = build_tree(10, 50);
    let predicate =
        FilePredicate::compile(&FilterSpec::with_extension("txt"), SystemTime::now()).unwrap();
    let mut agg = DetailedAggregator::new();
    TreeWalker::new(predicate).walk(tree.path(), &mut agg);
    let report = agg.finalize();

    c.bench_function("render_detailed", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            render_detailed(black_box(&report), &mut out).unwrap();
            out
        })
    });
}

fn bench_aggregate_records(c: &mut Criterion) {
    let tree = build_tree(10, 50);
    let predicate =
        FilePredicate::compile(&FilterSpec::with_extension("txt"), SystemTime::now()).unwrap();
    let mut records: Vec<FileRecord> = Vec::new();
    TreeWalker::new(predicate).walk(tree.path(), &mut records);

    c.bench_function("aggregate_records", |b| {
        b.iter(|| {
            let mut agg = DetailedAggregator::new();
            for record in records.iter().cloned() {
                agg.record(record);
            }
            agg.finalize()
        })
    });
}

criterion_group!(
    benches,
    bench_filter_compile,
    bench_walk_detailed,
    bench_walk_summary,
    bench_render_detailed,
    bench_aggregate_records,
);
criterion_main!(benches);
