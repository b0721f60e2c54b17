use std::path::Path;

use chrono::NaiveDate;
use contrib_heatmap::layout_dump::LayoutDump;
use contrib_heatmap::{
    Composition, HeatmapConfig, HeatmapData, Layout, Theme, YearLayout, compute_layout, parse_data,
    render_heatmap_svg, render_svg,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixture(name: &str) -> HeatmapData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_data(&input).expect("fixture parse failed")
}

fn config_at(reference: NaiveDate) -> HeatmapConfig {
    HeatmapConfig {
        reference_date: Some(reference),
        ..Default::default()
    }
}

fn layout(name: &str, config: &HeatmapConfig) -> Layout {
    compute_layout(&fixture(name), &Theme::github(), config).expect("layout failed")
}

fn cell_on(year: &YearLayout, day: NaiveDate) -> &contrib_heatmap::CellLayout {
    year.cells
        .iter()
        .find(|cell| cell.date == day)
        .unwrap_or_else(|| panic!("no cell for {day}"))
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.starts_with("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{fixture}: missing </svg tag");
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "sample.json",
        "multi_year.json",
        "partial_range.json",
        "empty.json",
    ];
    let config = HeatmapConfig {
        years: vec![2021, 2020, 2019, 2018],
        ..config_at(date(2020, 6, 1))
    };
    for name in candidates {
        let svg = render_heatmap_svg(&fixture(name), &config)
            .unwrap_or_else(|err| panic!("{name}: {err}"));
        assert_valid_svg(&svg, name);
    }
}

#[test]
fn sample_rolling_year() {
    let layout = layout("sample.json", &config_at(date(2020, 6, 1)));
    assert_eq!(layout.years.len(), 1);
    let year = &layout.years[0];
    assert!(year.rolling);
    assert_eq!(year.start, date(2019, 6, 2));
    assert_eq!(year.end, date(2020, 6, 1));
    assert_eq!(year.cells.len(), 366);
    assert_eq!(year.columns, 53);
    assert_eq!(year.width, 740.0);
    assert_eq!(year.title.text, "10 contributions in the last year");

    // 2019-06-02 is a Sunday, so the grid starts in the top-left corner.
    assert_eq!((year.cells[0].column, year.cells[0].row), (0, 0));
    assert_eq!(year.month_labels[0].text, "Jun");
    assert_eq!(year.month_labels.last().unwrap().text, "Jun");

    let theme = Theme::github();
    let busiest = cell_on(year, date(2019, 12, 18));
    assert_eq!(busiest.grade, Some(4));
    assert_eq!(busiest.color, theme.grade4);
    assert_eq!(cell_on(year, date(2019, 12, 13)).grade, Some(2));
    assert_eq!(cell_on(year, date(2019, 12, 24)).grade, Some(3));
    assert_eq!(cell_on(year, date(2019, 12, 14)).grade, Some(1));
    assert_eq!(cell_on(year, date(2020, 1, 2)).grade, Some(3));
    let explicit = cell_on(year, date(2020, 1, 3));
    assert_eq!(explicit.color, "#ff0000");
    assert_eq!(explicit.grade, None);

    let quiet = cell_on(year, date(2019, 12, 15));
    assert_eq!(quiet.count, 0);
    assert_eq!(quiet.color, theme.grade0);
    assert_eq!(quiet.label, "No contributions on Dec 15, 2019");
    assert_eq!(
        cell_on(year, date(2019, 12, 24)).label,
        "7 contributions on Dec 24, 2019"
    );
}

#[test]
fn calendar_year_mode_ignores_reference() {
    let config = HeatmapConfig {
        full_year: false,
        years: vec![2019],
        ..config_at(date(2020, 6, 1))
    };
    let year = &layout("sample.json", &config).years[0];
    assert!(!year.rolling);
    assert_eq!(year.start, date(2019, 1, 1));
    assert_eq!(year.end, date(2019, 12, 31));
    assert_eq!(year.cells.len(), 365);
    assert_eq!(year.title.text, "28 contributions in 2019");
    assert_eq!(year.month_labels.len(), 12);
}

#[test]
fn partial_range_uses_summary_window() {
    let layout = layout("partial_range.json", &config_at(date(2021, 12, 31)));
    let year = &layout.years[0];
    assert!(!year.rolling);
    assert_eq!(year.start, date(2021, 3, 15));
    assert_eq!(year.end, date(2021, 8, 20));
    assert_eq!(year.cells.len(), 159);
    assert_eq!(year.columns, 23);
    // Monday start leaves the Sunday slot of column 0 empty.
    assert_eq!((year.cells[0].column, year.cells[0].row), (0, 1));

    // March opens two columns before April, which is just enough room.
    let months: Vec<&str> = year.month_labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(months, vec!["Mar", "Apr", "May", "Jun", "Jul", "Aug"]);
    assert_eq!(year.month_labels[1].column, 2);

    // The busy day outside the window does not stretch the scale.
    assert_eq!(cell_on(year, date(2021, 3, 15)).grade, Some(4));
    assert_eq!(cell_on(year, date(2021, 8, 20)).grade, Some(3));
    // A blank explicit color falls back to the count.
    assert_eq!(cell_on(year, date(2021, 5, 1)).grade, Some(2));
}

#[test]
fn multi_year_keeps_requested_order() {
    let config = HeatmapConfig {
        years: vec![2018, 2017, 2020, 2019],
        full_year: false,
        ..config_at(date(2020, 6, 1))
    };
    let layout = layout("multi_year.json", &config);
    let years: Vec<i32> = layout.years.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2018, 2020, 2019]);

    let mut expected_y = 0.0;
    for year in &layout.years {
        assert_eq!(year.offset_x, 0.0);
        assert_eq!(year.offset_y, expected_y);
        expected_y += year.height + config.font_size;
    }
    assert_eq!(layout.height, expected_y - config.font_size);

    // Each year grades against its own busiest day.
    let y2018 = &layout.years[0];
    assert_eq!(cell_on(y2018, date(2018, 7, 4)).grade, Some(4));
    let y2019 = &layout.years[2];
    assert_eq!(cell_on(y2019, date(2019, 2, 14)).grade, Some(4));
    assert_eq!(cell_on(y2019, date(2019, 11, 5)).grade, Some(2));
}

#[test]
fn horizontal_composition_lays_years_out_left_to_right() {
    let config = HeatmapConfig {
        years: vec![2020, 2019],
        full_year: false,
        composition: Composition::Horizontal,
        ..config_at(date(2020, 6, 1))
    };
    let layout = layout("multi_year.json", &config);
    let [first, second] = layout.years.as_slice() else {
        panic!("expected two years");
    };
    assert_eq!(second.offset_y, 0.0);
    assert_eq!(second.offset_x, first.content_width() + config.font_size);
    assert_eq!(layout.height, first.height.max(second.height));
}

#[test]
fn empty_data_yields_empty_layout() {
    let layout = layout("empty.json", &config_at(date(2020, 6, 1)));
    assert!(layout.is_empty());
    assert_eq!(layout.width, 0.0);
    assert_eq!(layout.height, 0.0);
    let svg = render_svg(&layout, &Theme::github());
    assert_valid_svg(&svg, "empty.json");
    assert!(!svg.contains("<rect x="));
}

#[test]
fn duplicate_dates_are_rejected() {
    let mut data = fixture("sample.json");
    let repeat = data.contributions[3].clone();
    data.contributions.push(repeat);
    let err = compute_layout(&data, &Theme::github(), &config_at(date(2020, 6, 1))).unwrap_err();
    assert!(err.is_data());
    assert!(err.to_string().contains("contributions[10]"));
}

#[test]
fn color_option_drives_the_ramp() {
    let config = HeatmapConfig {
        color: Some("hsl(203, 82%, 33%)".to_string()),
        ..config_at(date(2020, 6, 1))
    };
    let svg = render_heatmap_svg(&fixture("sample.json"), &config).unwrap();
    assert!(svg.contains("fill=\"hsl(203, 82%, 36%)\""));
    assert!(svg.contains("fill=\"#ebedf0\""));
}

#[test]
fn layout_dump_matches_layout() {
    let theme = Theme::github();
    let layout = layout("sample.json", &config_at(date(2020, 6, 1)));
    let dump = LayoutDump::from_layout(&layout, &theme);
    assert_eq!(dump.years.len(), 1);
    assert_eq!(dump.years[0].cells.len(), layout.years[0].cells.len());
    let json = serde_json::to_value(&dump).unwrap();
    assert_eq!(json["years"][0]["title"], "10 contributions in the last year");
    assert_eq!(json["years"][0]["months"][0]["text"], "Jun");
}
