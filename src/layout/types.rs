use chrono::NaiveDate;
use serde::Serialize;

/// One day block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellLayout {
    /// Week index within the year's grid.
    pub column: usize,
    /// Day of week, 0 = Sunday.
    pub row: usize,
    pub date: NaiveDate,
    pub count: u64,
    /// `None` when the record supplied its own color.
    pub grade: Option<usize>,
    pub color: String,
    /// Tooltip text, e.g. `5 contributions on Dec 13, 2019`.
    pub label: String,
    /// Grid-relative position of the block's top-left corner.
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLabel {
    pub column: usize,
    pub text: String,
    pub x: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleLayout {
    pub text: String,
    pub font_size: f32,
    pub width: f32,
    pub height: f32,
}

/// One year's sub-grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearLayout {
    pub year: i32,
    pub total: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// True when the window is the rolling year ending at the reference date.
    pub rolling: bool,
    pub columns: usize,
    /// `columns * pitch - margin`.
    pub width: f32,
    /// Header plus `7 * pitch - margin`.
    pub height: f32,
    /// Space above the blocks reserved for title and month labels.
    pub header_height: f32,
    pub block_size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub title: TitleLayout,
    pub cells: Vec<CellLayout>,
    pub month_labels: Vec<MonthLabel>,
}

impl YearLayout {
    pub fn grid_height(&self) -> f32 {
        self.height - self.header_height
    }

    /// Horizontal extent including a title that may overhang the grid.
    pub fn content_width(&self) -> f32 {
        self.width.max(self.title.width)
    }
}

/// The complete render model for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub years: Vec<YearLayout>,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub tooltips: bool,
}

impl Layout {
    pub fn cells(&self) -> impl Iterator<Item = &CellLayout> {
        self.years.iter().flat_map(|year| year.cells.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
