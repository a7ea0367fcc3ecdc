//! Correlation and board-evaluation benchmarks.
//!
//! The grid recomputes every bias entry after each drag, so the correlation
//! path has to stay cheap at realistic roster sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ninebox_core::analysis::correlate;
use ninebox_core::{Board, CellId, GridConfig, PersonId, PersonRecord};

fn samples(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| ((i % 5) as f64, ((i * 7) % 11) as f64))
        .collect()
}

fn roster(n: usize) -> Vec<PersonRecord> {
    (0..n)
        .map(|i| {
            let team = format!("Team {}", i % 10);
            PersonRecord::new(
                &format!("Employee {:05}", i),
                Some(&team),
                (i % 5) as i32 + 1,
                (i % 2) as u8,
                ((i / 3) % 2) as u8,
            )
        })
        .collect()
}

fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlate");

    for size in [10, 100, 1_000, 10_000] {
        let data = samples(size);
        group.bench_with_input(BenchmarkId::new("pearson_t", size), &data, |b, data| {
            b.iter(|| correlate(black_box(data)));
        });
    }

    group.finish();
}

fn bench_board_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_summary");

    for size in [100, 1_000] {
        let mut board = Board::new(roster(size), GridConfig::nine_box().into())
            .expect("benchmark roster is valid");
        for id in 0..size as u32 {
            let cell = CellId((id % 9) as u8 + 1);
            board
                .assign_cell(PersonId(id), Some(cell))
                .expect("nine-box cell");
        }
        board.toggle_team(Some("Team 3"));

        group.bench_with_input(BenchmarkId::new("summary", size), &board, |b, board| {
            b.iter(|| black_box(board).summary());
        });
    }

    group.finish();
}

criterion_group!(
    name = correlation_benches;
    config = Criterion::default()
        .sample_size(100)
        .measurement_time(std::time::Duration::from_secs(3));
    targets = bench_correlate, bench_board_summary
);

criterion_main!(correlation_benches);
