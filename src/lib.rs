#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
#[cfg(feature = "cli")]
pub mod logging;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Composition, Config, GradingPolicy, HeatmapConfig, RenderConfig, load_config};
pub use error::HeatmapError;
pub use ir::{ContributionRecord, DateRange, HeatmapData, YearSummary, parse_data};
pub use layout::{
    CellLayout, GradeScale, Layout, MonthLabel, YearLayout, compute_layout,
    compute_layout_with_scale,
};
pub use render::render_svg;
pub use theme::{Theme, ThemeSpec, create_calendar_theme, resolve_theme};

/// Resolves the theme, lays out `data` and renders it to an SVG document.
pub fn render_heatmap_svg(data: &HeatmapData, config: &HeatmapConfig) -> Result<String, HeatmapError> {
    config.validate()?;
    let theme = resolve_theme(config)?;
    let layout = compute_layout(data, &theme, config)?;
    Ok(render_svg(&layout, &theme))
}
