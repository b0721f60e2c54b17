use crate::layout::{CellLayout, Layout, YearLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;

const FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, Segoe UI, Helvetica, Arial, sans-serif";

pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    if !is_transparent(&theme.background) {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(&theme.background)
        ));
    }

    for year in &layout.years {
        svg.push_str(&year_svg(year, theme, layout.font_size, layout.tooltips));
    }

    svg.push_str("</svg>");
    svg
}

fn year_svg(year: &YearLayout, theme: &Theme, font_size: f32, tooltips: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<g class=\"year\" data-year=\"{}\" transform=\"translate({:.2}, {:.2})\">",
        year.year, year.offset_x, year.offset_y
    ));

    // Text baselines sit one font size below the top of their row.
    out.push_str(&format!(
        "<text class=\"title\" x=\"0\" y=\"{:.2}\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        year.title.font_size,
        year.title.font_size,
        escape_xml(&theme.text),
        escape_xml(&year.title.text)
    ));

    let label_y = year.title.height + font_size;
    for label in &year.month_labels {
        out.push_str(&format!(
            "<text class=\"month\" x=\"{:.2}\" y=\"{label_y:.2}\" font-family=\"{FONT_FAMILY}\" font-size=\"{font_size}\" fill=\"{}\">{}</text>",
            label.x,
            escape_xml(&theme.text),
            escape_xml(&label.text)
        ));
    }

    out.push_str(&format!(
        "<g class=\"blocks\" transform=\"translate(0, {:.2})\">",
        year.header_height
    ));
    for cell in &year.cells {
        out.push_str(&cell_svg(cell, year.block_size, tooltips));
    }
    out.push_str("</g></g>");
    out
}

fn cell_svg(cell: &CellLayout, size: f32, tooltips: bool) -> String {
    let fill = escape_xml(&cell.color);
    let date = cell.date.format("%Y-%m-%d");
    if tooltips {
        let tip = escape_xml(&cell.label);
        format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{size}\" height=\"{size}\" fill=\"{fill}\" data-date=\"{date}\" data-count=\"{}\" data-tip=\"{tip}\"><title>{tip}</title></rect>",
            cell.x, cell.y, cell.count
        )
    } else {
        format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{size}\" height=\"{size}\" fill=\"{fill}\" data-date=\"{date}\" data-count=\"{}\"/>",
            cell.x, cell.y, cell.count
        )
    }
}

fn is_transparent(color: &str) -> bool {
    crate::color::parse_color(color).is_none_or(|parsed| parsed.a <= 0.0)
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
            tracing::info!(path = %path.display(), bytes = svg.len(), "wrote svg");
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Helvetica".to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = if render_cfg.scale.is_finite() && render_cfg.scale > 0.0 {
        render_cfg.scale
    } else {
        1.0
    };
    let size = tree.size().to_int_size().scale_by(scale).ok_or_else(|| {
        anyhow::anyhow!("PNG size out of range at scale {scale}")
    })?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    tracing::info!(path = %output.display(), width = size.width(), height = size.height(), "wrote png");
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
