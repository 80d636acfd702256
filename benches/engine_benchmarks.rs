//! Benchmarks for engine performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use xiangqi_engine::board::{Position, SearchEngine};

/// Cannon opening after a few moves each, plenty of tactics for both sides.
const MIDDLEGAME: &str = "r1bakab1r/9/1cn3nc1/p1p1p1p1p/9/2P6/P3P1P1P/1CN1C1N2/9/R1BAKAB1R b";
const ENDGAME: &str = "3k5/4a4/4b4/9/2p6/9/6R2/4B4/4A4/3AK4 w";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut startpos = Position::new();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let mut middlegame = Position::from_fen(MIDDLEGAME);
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("middlegame", depth), &depth, |b, &depth| {
            b.iter(|| middlegame.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::new();
    group.bench_function("startpos", |b| b.iter(|| black_box(startpos.generate_moves())));

    let middlegame = Position::from_fen(MIDDLEGAME);
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.generate_moves()))
    });
    group.bench_function("middlegame_captures", |b| {
        b.iter(|| black_box(middlegame.generate_captures()))
    });
    group.bench_function("middlegame_legal", |b| {
        b.iter(|| black_box(middlegame.legal_moves()))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut pos = Position::new();
                let mut engine = SearchEngine::new(16);
                engine.search(&mut pos, depth, u64::MAX)
            })
        });
    }

    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("middlegame", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut pos = Position::from_fen(MIDDLEGAME);
                let mut engine = SearchEngine::new(16);
                engine.search(&mut pos, depth, u64::MAX)
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", Position::STARTPOS),
        ("middlegame", MIDDLEGAME),
        ("endgame", ENDGAME),
    ];

    for (name, fen) in positions {
        let pos = Position::from_fen(fen);
        group.bench_with_input(BenchmarkId::new("position", name), &pos, |b, pos| {
            b.iter(|| black_box(pos.evaluate()))
        });
    }

    group.finish();
}

fn bench_repetition(c: &mut Criterion) {
    let mut pos = Position::new();
    for _ in 0..2 {
        for text in ["h0g2", "h9g7", "g2h0", "g7h9"] {
            if let Ok(mv) = pos.parse_move(text) {
                pos.make_move(mv);
            }
        }
    }
    c.bench_function("rep_status", |b| b.iter(|| black_box(pos.rep_status(3))));
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_search,
    bench_eval,
    bench_repetition
);
criterion_main!(benches);
