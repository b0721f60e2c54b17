use chrono::{Days, NaiveDate};
use contrib_heatmap::config::HeatmapConfig;
use contrib_heatmap::ir::{ContributionRecord, HeatmapData, YearSummary};
use contrib_heatmap::layout::compute_layout;
use contrib_heatmap::render::render_svg;
use contrib_heatmap::theme::Theme;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Synthetic history covering `years` calendar years ending in 2020, with a
/// contribution on roughly `density` percent of days.
fn synthetic_data(years: i32, density: u64) -> HeatmapData {
    let mut summaries = Vec::new();
    let mut contributions = Vec::new();
    for year in (2021 - years..=2020).rev() {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date");
        let end = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid date");
        let mut total = 0;
        let mut day = start;
        let mut seed = year as u64;
        while day <= end {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if (seed >> 33) % 100 < density {
                let count = (seed >> 40) % 25 + 1;
                total += count;
                contributions.push(ContributionRecord::new(day.to_string(), count));
            }
            day = day + Days::new(1);
        }
        summaries.push(YearSummary::new(
            year.to_string(),
            total,
            &start.to_string(),
            &end.to_string(),
        ));
    }
    HeatmapData {
        years: summaries,
        contributions,
    }
}

fn config_for(data: &HeatmapData) -> HeatmapConfig {
    HeatmapConfig {
        years: data
            .years
            .iter()
            .filter_map(|summary| summary.year.parse().ok())
            .collect(),
        reference_date: NaiveDate::from_ymd_opt(2020, 12, 31),
        ..Default::default()
    }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::github();
    for (years, density) in [(1, 10), (1, 90), (5, 50), (10, 50)] {
        let data = synthetic_data(years, density);
        let config = config_for(&data);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("years_{years}_density_{density}")),
            &data,
            |b, data| {
                b.iter(|| {
                    let layout = compute_layout(black_box(data), &theme, &config).expect("layout failed");
                    black_box(layout.years.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::github();
    for years in [1, 5] {
        let data = synthetic_data(years, 60);
        let config = config_for(&data);
        group.bench_with_input(BenchmarkId::from_parameter(years), &data, |b, data| {
            b.iter(|| {
                let layout = compute_layout(black_box(data), &theme, &config).expect("layout failed");
                let svg = render_svg(&layout, &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_end_to_end);
criterion_main!(benches);
