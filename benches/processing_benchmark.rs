use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use temperature_heatmap::config::HeatmapLayout;
use temperature_heatmap::heatmap::HeatmapModel;
use temperature_heatmap::models::RawRecord;
use temperature_heatmap::processors::{build_sparklines, TemperatureAggregator};
use temperature_heatmap::readers::TemperatureCsvReader;

// Create daily test data starting on 1 January 1990
fn create_daily_records(days: usize) -> Vec<RawRecord> {
    let base_date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();

    (0..days)
        .map(|day| {
            let date = base_date + chrono::Duration::days(day as i64);
            let seasonal = ((day % 365) as f64 / 365.0 * std::f64::consts::TAU).sin() * 12.0;
            let max_temperature = 15.0 + seasonal + (day % 7) as f64 * 0.3;
            RawRecord::new(date, max_temperature, max_temperature - 8.0)
        })
        .collect()
}

fn create_csv(days: usize) -> String {
    let mut csv = String::from("date,max_temperature,min_temperature\n");
    for record in create_daily_records(days) {
        csv.push_str(&format!(
            "{},{:.1},{:.1}\n",
            record.date, record.max_temperature, record.min_temperature
        ));
    }
    csv
}

fn benchmark_csv_reader(c: &mut Criterion) {
    let csv = create_csv(365 * 20);

    c.bench_function("csv_reader_20_years", |b| {
        b.iter(|| {
            let reader = TemperatureCsvReader::new();
            let loaded = reader.read_from(csv.as_bytes());
            black_box(loaded.map(|l| l.records.len()).unwrap_or(0))
        })
    });
}

fn benchmark_heatmap_model(c: &mut Criterion) {
    let records = create_daily_records(365 * 20);
    let aggregator = TemperatureAggregator::new(1997).with_recent_window();
    let aggregation = aggregator.aggregate(&records);
    let sparklines = build_sparklines(aggregator.select(&records));
    let layout = HeatmapLayout {
        sparklines: true,
        ..HeatmapLayout::default()
    };

    c.bench_function("heatmap_model_with_sparklines", |b| {
        b.iter(|| {
            let model = HeatmapModel::build(&aggregation, Some(&sparklines), &layout);
            black_box(model.map(|m| m.cells.len()).unwrap_or(0))
        })
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation_by_size");

    for &years in &[1, 10, 30, 100] {
        group.bench_with_input(BenchmarkId::new("years", years), &years, |b, &years| {
            let records = create_daily_records(365 * years);
            let aggregator = TemperatureAggregator::new(1990);

            b.iter(|| {
                let aggregation = aggregator.aggregate(&records);
                black_box(aggregation.grid.len())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_csv_reader,
    benchmark_heatmap_model,
    benchmark_varying_data_sizes
);
criterion_main!(benches);
