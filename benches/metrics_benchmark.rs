use cenfind::assignment::{assign, AssignmentPolicy, InsideMargin};
use cenfind::geometry::signed_distance;
use cenfind::matching::match_points;
use cenfind::metrics::frequency::frequency_table;
use cenfind::roi::{Centre, Contour};
use cenfind::types::{Position, ScoreRecord};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn scattered(n: usize, seed: i32) -> Vec<Position> {
    (0..n as i32)
        .map(|i| Position::new((i * 37 + seed * 11) % 2048, (i * 91 + seed * 7) % 2048))
        .collect()
}

fn circle(r0: i32, c0: i32, radius: f64, vertices: usize) -> Vec<Position> {
    (0..vertices)
        .map(|k| {
            let a = k as f64 / vertices as f64 * std::f64::consts::TAU;
            Position::new(
                r0 + (radius * a.sin()).round() as i32,
                c0 + (radius * a.cos()).round() as i32,
            )
        })
        .collect()
}

fn bench_signed_distance(c: &mut Criterion) {
    let polygon = circle(100, 100, 60.0, 120);
    let point = Position::new(110, 95);

    c.bench_function("signed_distance_120_vertices", |b| {
        b.iter(|| signed_distance(black_box(point), black_box(&polygon)));
    });
}

fn bench_point_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_matching");

    for size in [10, 50, 100, 500].iter() {
        let annotation = scattered(*size, 1);
        let predictions = scattered(*size, 2);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| match_points(black_box(&annotation), black_box(&predictions), black_box(3.0)));
        });
    }
    group.finish();
}

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignment");

    let nuclei: Vec<Contour> = (0..16)
        .map(|i| {
            let (r, c) = ((i / 4) * 200 + 100, (i % 4) * 200 + 100);
            Contour::new(circle(r, c, 80.0, 64), i as usize, "Nucleus")
        })
        .collect();

    for num_foci in [10, 100, 500].iter() {
        let foci: Vec<Centre> = scattered(*num_foci, 3)
            .into_iter()
            .enumerate()
            .map(|(i, p)| Centre::new(Position::new(p.row % 800, p.col % 800), i, "Centriole"))
            .collect();

        for policy in [AssignmentPolicy::NearestWithinMargin, AssignmentPolicy::AllWithinMargin] {
            group.bench_with_input(
                BenchmarkId::new(format!("{policy:?}"), num_foci),
                num_foci,
                |b, _| {
                    b.iter(|| assign(black_box(&foci), black_box(&nuclei), InsideMargin(-50.0), policy));
                },
            );
        }
    }
    group.finish();
}

fn bench_frequency(c: &mut Criterion) {
    let records: Vec<ScoreRecord> = (0..10_000)
        .map(|i| ScoreRecord {
            field: format!("field_{}", i % 50),
            channel: 1 + i % 3,
            nucleus_centre: Position::new(0, 0),
            score: i % 9,
            is_full: true,
        })
        .collect();

    c.bench_function("frequency_table_10k", |b| {
        b.iter(|| frequency_table(black_box(&records)));
    });
}

criterion_group!(
    benches,
    bench_signed_distance,
    bench_point_matching,
    bench_assignment,
    bench_frequency,
);
criterion_main!(benches);
