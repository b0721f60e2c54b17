use crate::layout::Layout;
use crate::theme::Theme;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Flattened render model with canvas-absolute coordinates, for tooling
/// that wants to draw the heat-map without re-deriving geometry.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub text: String,
    pub years: Vec<YearDump>,
}

#[derive(Debug, Serialize)]
pub struct YearDump {
    pub year: i32,
    pub total: u64,
    pub start: String,
    pub end: String,
    pub rolling: bool,
    pub title: String,
    pub columns: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub months: Vec<MonthDump>,
    pub cells: Vec<CellDump>,
}

#[derive(Debug, Serialize)]
pub struct MonthDump {
    pub text: String,
    pub column: usize,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub date: String,
    pub count: u64,
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: String,
    pub grade: Option<usize>,
    pub label: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, theme: &Theme) -> Self {
        let years = layout
            .years
            .iter()
            .map(|year| {
                let grid_top = year.offset_y + year.header_height;
                let months = year
                    .month_labels
                    .iter()
                    .map(|label| MonthDump {
                        text: label.text.clone(),
                        column: label.column,
                        x: year.offset_x + label.x,
                        y: year.offset_y + year.title.height,
                    })
                    .collect();
                let cells = year
                    .cells
                    .iter()
                    .map(|cell| CellDump {
                        date: cell.date.to_string(),
                        count: cell.count,
                        column: cell.column,
                        row: cell.row,
                        x: year.offset_x + cell.x,
                        y: grid_top + cell.y,
                        size: year.block_size,
                        color: cell.color.clone(),
                        grade: cell.grade,
                        label: cell.label.clone(),
                    })
                    .collect();
                YearDump {
                    year: year.year,
                    total: year.total,
                    start: year.start.to_string(),
                    end: year.end.to_string(),
                    rolling: year.rolling,
                    title: year.title.text.clone(),
                    columns: year.columns,
                    x: year.offset_x,
                    y: year.offset_y,
                    width: year.width,
                    height: year.height,
                    months,
                    cells,
                }
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            background: theme.background.clone(),
            text: theme.text.clone(),
            years,
        }
    }
}

/// Writes the dump as pretty JSON to `path`, or stdout when `None`.
pub fn write_layout_dump(path: Option<&Path>, layout: &Layout, theme: &Theme) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, theme);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
            tracing::info!(path = %path.display(), "wrote layout dump");
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &dump)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
