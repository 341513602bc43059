use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use member_heatmap::models::RawRow;
use member_heatmap::processors::{
    engagement_weight, Aggregator, ConversionConfig, ParallelProcessor,
};
use member_heatmap::utils::parse_float;

// Create synthetic member rows clustered around a few cities
fn create_test_rows(count: usize) -> Vec<RawRow> {
    let centres = [(40.7128, -74.0060), (51.5074, -0.1278), (35.6762, 139.6503)];

    (0..count)
        .map(|i| {
            let (lat, lon) = centres[i % centres.len()];
            let jitter = (i % 97) as f64 * 0.0007;

            let mut row = RawRow::new();
            row.insert("member_id".to_string(), i.to_string());
            row.insert("lat".to_string(), format!("{:.6}", lat + jitter));
            row.insert("lon".to_string(), format!("{:.6}", lon - jitter));
            row.insert("events_attended".to_string(), (i % 40).to_string());
            row.insert("last_access_time".to_string(), (1_600_000_000 + i).to_string());
            row
        })
        .collect()
}

fn benchmark_field_parsing(c: &mut Criterion) {
    let values = ["40.7128", " -74.0060 ", "null", "", "abc", "1e3"];

    c.bench_function("parse_float", |b| {
        b.iter(|| {
            for value in &values {
                black_box(parse_float(black_box(Some(*value))));
            }
        });
    });

    c.bench_function("engagement_weight", |b| {
        b.iter(|| {
            for value in &values {
                black_box(engagement_weight(black_box(Some(*value))));
            }
        });
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in [1_000, 10_000, 100_000] {
        let rows = create_test_rows(size);

        group.bench_with_input(BenchmarkId::new("aggregated", size), &rows, |b, rows| {
            let aggregator = Aggregator::new(ConversionConfig::default());
            b.iter(|| black_box(aggregator.process_rows(rows.iter().cloned())));
        });

        group.bench_with_input(BenchmarkId::new("pass_through", size), &rows, |b, rows| {
            let aggregator = Aggregator::new(ConversionConfig {
                aggregate: false,
                precision_decimals: 3,
            });
            b.iter(|| black_box(aggregator.process_rows(rows.iter().cloned())));
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &rows, |b, rows| {
            let processor = ParallelProcessor::default().with_chunk_size(2_048);
            b.iter(|| black_box(processor.process_all(rows, None).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_field_parsing, benchmark_pipeline);
criterion_main!(benches);
