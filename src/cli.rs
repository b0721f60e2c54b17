use crate::config::{Composition, Config, load_config};
use crate::ir::{HeatmapData, parse_data};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_svg};
use crate::theme::resolve_theme;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "heatmap", version, about = "GitHub-style contribution heat-map renderer")]
pub struct Args {
    /// Contribution data (JSON) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Year to render; repeat for several years
    #[arg(short = 'y', long = "year")]
    pub years: Vec<i32>,

    /// Base color to derive the intensity ramp from
    #[arg(long = "color")]
    pub color: Option<String>,

    /// Named theme preset (github, halloween)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    #[arg(long = "blockSize")]
    pub block_size: Option<f32>,

    #[arg(long = "blockMargin")]
    pub block_margin: Option<f32>,

    #[arg(long = "fontSize")]
    pub font_size: Option<f32>,

    /// Show Jan 1 - Dec 31 instead of the last twelve months
    #[arg(long = "calendarYear")]
    pub calendar_year: bool,

    /// date-fns style pattern for tooltip dates
    #[arg(long = "dateFormat")]
    pub date_format: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long = "today")]
    pub today: Option<NaiveDate>,

    /// Omit tooltip attributes from the SVG
    #[arg(long = "noTooltips")]
    pub no_tooltips: bool,

    /// Place years side by side instead of stacking them
    #[arg(long = "horizontal")]
    pub horizontal: bool,

    /// Scale factor for PNG output
    #[arg(short = 's', long = "scale")]
    pub scale: Option<f32>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::logging::init(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_args(&mut config, &args);

    let data = read_data(args.input.as_deref())?;
    tracing::debug!(
        years = data.years.len(),
        contributions = data.contributions.len(),
        "loaded contribution data"
    );

    config.heatmap.validate()?;
    let theme = resolve_theme(&config.heatmap)?;
    let layout = compute_layout(&data, &theme, &config.heatmap)?;
    tracing::debug!(
        years = layout.years.len(),
        width = layout.width,
        height = layout.height,
        "computed layout"
    );
    if layout.is_empty() {
        tracing::warn!("no requested year has data; output will be empty");
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &theme);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &layout, &theme)?;
        }
        OutputFormat::Png => write_png(&layout, &theme, &config, args.output.as_deref())?,
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(
    layout: &crate::layout::Layout,
    theme: &crate::theme::Theme,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
    let svg = render_svg(layout, theme);
    crate::render::write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _layout: &crate::layout::Layout,
    _theme: &crate::theme::Theme,
    _config: &Config,
    _output: Option<&Path>,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

/// Command-line flags override config file values field by field.
fn apply_args(config: &mut Config, args: &Args) {
    let heatmap = &mut config.heatmap;
    if !args.years.is_empty() {
        heatmap.years = args.years.clone();
    }
    if let Some(color) = &args.color {
        heatmap.color = Some(color.clone());
    }
    if let Some(theme) = &args.theme {
        heatmap.theme_name = Some(theme.clone());
    }
    if let Some(v) = args.block_size {
        heatmap.block_size = v;
    }
    if let Some(v) = args.block_margin {
        heatmap.block_margin = v;
    }
    if let Some(v) = args.font_size {
        heatmap.font_size = v;
    }
    if args.calendar_year {
        heatmap.full_year = false;
    }
    if let Some(v) = &args.date_format {
        heatmap.date_format = v.clone();
    }
    if let Some(v) = args.today {
        heatmap.reference_date = Some(v);
    }
    if args.no_tooltips {
        heatmap.tooltips = false;
    }
    if args.horizontal {
        heatmap.composition = Composition::Horizontal;
    }
    if let Some(v) = args.scale {
        config.render.scale = v;
    }
}

fn read_data(path: Option<&Path>) -> Result<HeatmapData> {
    let (source, contents) = match path {
        Some(path) if path != Path::new("-") => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            (path.display().to_string(), contents)
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            ("stdin".to_string(), buf)
        }
    };
    parse_data(&contents).with_context(|| format!("parsing contribution data from {source}"))
}
