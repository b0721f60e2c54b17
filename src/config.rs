use crate::error::{HeatmapError, Result};
use crate::theme::ThemeSpec;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BLOCK_SIZE: f32 = 12.0;
pub const DEFAULT_BLOCK_MARGIN: f32 = 2.0;
pub const DEFAULT_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_DATE_FORMAT: &str = "MMM d, yyyy";

/// How a raw contribution count is bucketed into a grade when the record
/// carries neither an explicit color nor an intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GradingPolicy {
    /// `ceil(4 * count / max)` where `max` is the busiest day in the window.
    Relative,
    /// Grade `k` once `count >= thresholds[k - 1]`.
    Thresholds { thresholds: [u64; 4] },
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self::Relative
    }
}

/// How year sub-grids are arranged on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Composition {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatmapConfig {
    pub block_size: f32,
    pub block_margin: f32,
    pub font_size: f32,
    pub full_year: bool,
    /// date-fns style pattern; only used for label text.
    pub date_format: String,
    /// Years to render, in order. Empty means the reference date's year.
    pub years: Vec<i32>,
    pub color: Option<String>,
    pub theme: Option<ThemeSpec>,
    pub theme_name: Option<String>,
    pub tooltips: bool,
    pub grading: GradingPolicy,
    pub composition: Composition,
    /// Gap between year sub-grids; defaults to the font size.
    pub year_spacing: Option<f32>,
    /// "Today" for rolling windows. `None` reads the local clock.
    pub reference_date: Option<NaiveDate>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            block_margin: DEFAULT_BLOCK_MARGIN,
            font_size: DEFAULT_FONT_SIZE,
            full_year: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            years: Vec::new(),
            color: None,
            theme: None,
            theme_name: None,
            tooltips: true,
            grading: GradingPolicy::default(),
            composition: Composition::default(),
            year_spacing: None,
            reference_date: None,
        }
    }
}

impl HeatmapConfig {
    /// Rejects geometry that cannot produce a sensible grid.
    pub fn validate(&self) -> Result<()> {
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(HeatmapError::config(format!(
                "blockSize must be positive, got {}",
                self.block_size
            )));
        }
        if !(self.block_margin.is_finite() && self.block_margin >= 0.0) {
            return Err(HeatmapError::config(format!(
                "blockMargin must be non-negative, got {}",
                self.block_margin
            )));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(HeatmapError::config(format!(
                "fontSize must be positive, got {}",
                self.font_size
            )));
        }
        if let Some(spacing) = self.year_spacing
            && !(spacing.is_finite() && spacing >= 0.0)
        {
            return Err(HeatmapError::config(format!(
                "yearSpacing must be non-negative, got {spacing}"
            )));
        }
        if let GradingPolicy::Thresholds { thresholds } = self.grading
            && (thresholds[0] == 0 || thresholds.windows(2).any(|pair| pair[0] > pair[1]))
        {
            return Err(HeatmapError::config(
                "grading thresholds must be positive and non-decreasing",
            ));
        }
        Ok(())
    }

    pub fn year_spacing(&self) -> f32 {
        self.year_spacing.unwrap_or(self.font_size)
    }

    /// Distance between the origins of neighbouring blocks.
    pub fn block_pitch(&self) -> f32 {
        self.block_size + self.block_margin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Rasterisation scale for PNG output.
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub heatmap: HeatmapConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    block_size: Option<f32>,
    block_margin: Option<f32>,
    font_size: Option<f32>,
    full_year: Option<bool>,
    date_format: Option<String>,
    years: Option<Vec<i32>>,
    color: Option<String>,
    theme: Option<ThemeSpec>,
    theme_name: Option<String>,
    tooltips: Option<bool>,
    grading: Option<GradingPolicy>,
    composition: Option<Composition>,
    year_spacing: Option<f32>,
    reference_date: Option<NaiveDate>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f32>,
}

impl ConfigFile {
    fn apply(self, config: &mut Config) {
        let heatmap = &mut config.heatmap;
        if let Some(v) = self.block_size {
            heatmap.block_size = v;
        }
        if let Some(v) = self.block_margin {
            heatmap.block_margin = v;
        }
        if let Some(v) = self.font_size {
            heatmap.font_size = v;
        }
        if let Some(v) = self.full_year {
            heatmap.full_year = v;
        }
        if let Some(v) = self.date_format {
            heatmap.date_format = v;
        }
        if let Some(v) = self.years {
            heatmap.years = v;
        }
        if let Some(v) = self.color {
            heatmap.color = Some(v);
        }
        if let Some(v) = self.theme {
            heatmap.theme = Some(v);
        }
        if let Some(v) = self.theme_name {
            heatmap.theme_name = Some(v);
        }
        if let Some(v) = self.tooltips {
            heatmap.tooltips = v;
        }
        if let Some(v) = self.grading {
            heatmap.grading = v;
        }
        if let Some(v) = self.composition {
            heatmap.composition = v;
        }
        if let Some(v) = self.year_spacing {
            heatmap.year_spacing = Some(v);
        }
        if let Some(v) = self.reference_date {
            heatmap.reference_date = Some(v);
        }
        if let Some(render) = self.render
            && let Some(v) = render.scale
        {
            config.render.scale = v;
        }
    }
}

/// Parses a JSON5 config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;
    parsed.apply(&mut config);
    Ok(config)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    tracing::debug!(path = %path.display(), "loading config");
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = HeatmapConfig::default();
        assert_eq!(config.block_size, 12.0);
        assert_eq!(config.block_margin, 2.0);
        assert_eq!(config.font_size, 14.0);
        assert!(config.full_year);
        assert_eq!(config.date_format, "MMM d, yyyy");
        assert!(config.years.is_empty());
        assert!(config.tooltips);
        assert_eq!(config.year_spacing(), 14.0);
        assert_eq!(config.block_pitch(), 14.0);
    }

    #[test]
    fn file_fields_override_independently() {
        let config = parse_config(
            r#"{
                // only two fields set
                blockSize: 10,
                fullYear: false,
                render: { scale: 2 },
            }"#,
        )
        .unwrap();
        assert_eq!(config.heatmap.block_size, 10.0);
        assert!(!config.heatmap.full_year);
        assert_eq!(config.heatmap.block_margin, 2.0);
        assert_eq!(config.heatmap.font_size, 14.0);
        assert_eq!(config.render.scale, 2.0);
    }

    #[test]
    fn parses_theme_grading_and_reference_date() {
        let config = parse_config(
            r##"{
                theme: {
                    background: "transparent", text: "#000",
                    grade4: "#196127", grade3: "#239a3b", grade2: "#7bc96f",
                    grade1: "#c6e48b", grade0: "#ebedf0"
                },
                grading: { kind: "thresholds", thresholds: [1, 3, 6, 10] },
                composition: "horizontal",
                referenceDate: "2020-06-01",
                years: [2020, 2019],
            }"##,
        )
        .unwrap();
        let heatmap = config.heatmap;
        assert!(heatmap.theme.is_some());
        assert_eq!(
            heatmap.grading,
            GradingPolicy::Thresholds {
                thresholds: [1, 3, 6, 10]
            }
        );
        assert_eq!(heatmap.composition, Composition::Horizontal);
        assert_eq!(heatmap.reference_date, NaiveDate::from_ymd_opt(2020, 6, 1));
        assert_eq!(heatmap.years, vec![2020, 2019]);
    }

    #[test]
    fn unknown_theme_slot_is_rejected() {
        let result = parse_config(r##"{ theme: { grade5: "#000" } }"##);
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_bad_geometry() {
        let bad_size = HeatmapConfig {
            block_size: 0.0,
            ..Default::default()
        };
        assert!(bad_size.validate().unwrap_err().is_configuration());

        let bad_margin = HeatmapConfig {
            block_margin: -1.0,
            ..Default::default()
        };
        assert!(bad_margin.validate().is_err());

        let bad_font = HeatmapConfig {
            font_size: f32::NAN,
            ..Default::default()
        };
        assert!(bad_font.validate().is_err());

        let zero_margin = HeatmapConfig {
            block_margin: 0.0,
            ..Default::default()
        };
        assert!(zero_margin.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        let config = HeatmapConfig {
            grading: GradingPolicy::Thresholds {
                thresholds: [5, 3, 6, 10],
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
