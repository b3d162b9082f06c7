//! Pipeline performance benchmarks.
//!
//! Measures parsing, cleaning and encoding across different table sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datasweep::output::{encode_csv, encode_xlsx};
use datasweep::{CleaningOp, FileFormat, Parser, Table, TransformEngine};

/// Generate synthetic CSV data with the specified number of rows and columns.
///
/// Every tenth row repeats the previous one and every seventh numeric cell is
/// blank, so the cleaning operations have work to do.
fn generate_csv_data(rows: usize, cols: usize) -> String {
    let mut data = String::new();

    // Header row
    for i in 0..cols {
        if i > 0 {
            data.push(',');
        }
        data.push_str(&format!("Column {}", i + 1));
    }
    data.push('\n');

    for row in 0..rows {
        let source = if row % 10 == 9 { row - 1 } else { row };
        for col in 0..cols {
            if col > 0 {
                data.push(',');
            }
            match col % 4 {
                0 => data.push_str(&format!("ID_{:06}", source)),
                1 if source % 7 == 0 => {}
                1 => data.push_str(&format!("{:.2}", source as f64 * 1.5)),
                2 => data.push_str(&format!("{}", source % 100)),
                3 => data.push_str(if source % 2 == 0 { "true" } else { "false" }),
                _ => unreachable!(),
            }
        }
        data.push('\n');
    }

    data
}

fn parse(data: &str) -> Table {
    Parser::new().parse(data.as_bytes(), FileFormat::Csv).unwrap()
}

/// Benchmark parsing CSV of various sizes.
fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 10);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(parse(data)))
        });
    }

    group.finish();
}

/// Benchmark each cleaning operation on its own.
fn bench_cleaning(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleaning");
    let engine = TransformEngine::new();

    for rows in [1_000, 10_000].iter() {
        let table = parse(&generate_csv_data(*rows, 10));

        for op in CleaningOp::ALL {
            group.bench_with_input(BenchmarkId::new(format!("{:?}", op), rows), &table, |b, table| {
                b.iter_with_setup(|| table.clone(), |t| black_box(engine.apply(op, t)))
            });
        }
    }

    group.finish();
}

/// Benchmark encoding for download.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for rows in [100, 1_000, 10_000].iter() {
        let table = parse(&generate_csv_data(*rows, 10));

        group.bench_with_input(BenchmarkId::new("csv", rows), &table, |b, table| {
            b.iter(|| black_box(encode_csv(table).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("xlsx", rows), &table, |b, table| {
            b.iter(|| black_box(encode_xlsx(table).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_csv, bench_cleaning, bench_encode);
criterion_main!(benches);
