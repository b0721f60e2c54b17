mod grading;
mod grid;
mod month_labels;
mod text;
pub(crate) mod types;
mod window;

pub use grading::GradeScale;
pub use grid::DAYS_PER_WEEK;
pub use month_labels::MIN_MONTH_LABEL_GAP;
pub use text::DatePattern;
pub use types::*;

use chrono::{Datelike, Local, NaiveDate};

use crate::config::{Composition, HeatmapConfig};
use crate::error::Result;
use crate::ir::{ContributionSet, HeatmapData, Year};
use crate::theme::Theme;

use grading::resolve_color;
use grid::{column_count, grid_position, span};
use month_labels::place_month_labels;
use text::{cell_label, text_width, title_text};
use window::resolve_window;

/// Line height multiplier for title and month label rows.
pub const LINE_HEIGHT: f32 = 1.5;
/// Title font size relative to the base font size.
pub const TITLE_SCALE_FACTOR: f32 = 1.25;

/// Lays out every requested year using the grading policy from `config`.
pub fn compute_layout(data: &HeatmapData, theme: &Theme, config: &HeatmapConfig) -> Result<Layout> {
    compute_layout_with_scale(data, theme, config, &config.grading)
}

/// Same as [`compute_layout`] with a caller-supplied count→grade scale.
///
/// Configuration is validated before anything else; on error no part of the
/// model is returned.
pub fn compute_layout_with_scale(
    data: &HeatmapData,
    theme: &Theme,
    config: &HeatmapConfig,
    scale: &dyn GradeScale,
) -> Result<Layout> {
    config.validate()?;
    let pattern = DatePattern::parse(&config.date_format)?;
    let contributions = ContributionSet::from_data(data)?;
    let reference = config
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());

    let requested = if config.years.is_empty() {
        vec![reference.year()]
    } else {
        config.years.clone()
    };

    let mut years = Vec::with_capacity(requested.len());
    for year in requested {
        // Years without a summary have no data and are left out.
        let Some(summary) = contributions.year(year) else {
            continue;
        };
        years.push(layout_year(
            summary,
            &contributions,
            theme,
            config,
            scale,
            &pattern,
            reference,
        )?);
    }

    let (width, height) = arrange_years(&mut years, config.composition, config.year_spacing());
    Ok(Layout {
        years,
        width,
        height,
        font_size: config.font_size,
        tooltips: config.tooltips,
    })
}

fn layout_year(
    summary: &Year,
    contributions: &ContributionSet,
    theme: &Theme,
    config: &HeatmapConfig,
    scale: &dyn GradeScale,
    pattern: &DatePattern,
    reference: NaiveDate,
) -> Result<YearLayout> {
    let window = resolve_window(summary, config.full_year, reference)?;
    let pitch = config.block_pitch();
    let max_count = contributions.max_count(window.start, window.end);

    let mut cells = Vec::with_capacity(window.len());
    for date in window.days() {
        let day = contributions.get(date);
        let count = day.map(|day| day.count).unwrap_or(0);
        let resolved = resolve_color(day, max_count, theme, scale);
        let (column, row) = grid_position(window.start, date);
        cells.push(CellLayout {
            column,
            row,
            date,
            count,
            grade: resolved.grade,
            color: resolved.color,
            label: cell_label(count, date, pattern),
            x: column as f32 * pitch,
            y: row as f32 * pitch,
        });
    }

    let columns = column_count(window.start, window.end);
    let title_font_size = config.font_size * TITLE_SCALE_FACTOR;
    let heading = title_text(summary.total, summary.year, window.rolling);
    let title = TitleLayout {
        width: text_width(&heading, title_font_size),
        height: (title_font_size * LINE_HEIGHT).round(),
        text: heading,
        font_size: title_font_size,
    };
    let header_height = title.height + (config.font_size * LINE_HEIGHT).round();
    let grid_height = span(DAYS_PER_WEEK, pitch, config.block_margin);

    Ok(YearLayout {
        year: summary.year,
        total: summary.total,
        start: window.start,
        end: window.end,
        rolling: window.rolling,
        columns,
        width: span(columns, pitch, config.block_margin),
        height: header_height + grid_height,
        header_height,
        block_size: config.block_size,
        offset_x: 0.0,
        offset_y: 0.0,
        title,
        cells,
        month_labels: place_month_labels(window.start, window.end, pitch),
    })
}

/// Positions sub-grids on the canvas and returns the canvas size.
fn arrange_years(years: &mut [YearLayout], composition: Composition, spacing: f32) -> (f32, f32) {
    let mut cursor = 0.0_f32;
    let mut cross = 0.0_f32;
    for (idx, year) in years.iter_mut().enumerate() {
        if idx > 0 {
            cursor += spacing;
        }
        match composition {
            Composition::Vertical => {
                year.offset_y = cursor;
                cursor += year.height;
                cross = cross.max(year.content_width());
            }
            Composition::Horizontal => {
                year.offset_x = cursor;
                cursor += year.content_width();
                cross = cross.max(year.height);
            }
        }
    }
    match composition {
        Composition::Vertical => (cross, cursor),
        Composition::Horizontal => (cursor, cross),
    }
}
