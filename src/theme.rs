use crate::color::{Color, Hsl, parse_color};
use crate::config::HeatmapConfig;
use crate::error::{HeatmapError, Result};
use serde::{Deserialize, Serialize};

/// Empty-cell tone used by derived ramps. Independent of the base color so
/// days without activity read the same under every palette.
pub const DEFAULT_EMPTY_CELL_COLOR: &str = "#ebedf0";
pub const DEFAULT_TEXT_COLOR: &str = "#000";
pub const DEFAULT_BACKGROUND: &str = "transparent";

/// Target lightness (percent) for grade1..grade4 of a derived ramp.
const RAMP_LIGHTNESS: [f32; 4] = [78.0, 64.0, 50.0, 36.0];

pub const GRADE_COUNT: usize = 5;

/// A resolved color theme: five intensity grades plus background and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub grade4: String,
    pub grade3: String,
    pub grade2: String,
    pub grade1: String,
    pub grade0: String,
}

impl Theme {
    /// The reference GitHub green ramp.
    pub fn github() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            text: DEFAULT_TEXT_COLOR.to_string(),
            grade4: "#196127".to_string(),
            grade3: "#239a3b".to_string(),
            grade2: "#7bc96f".to_string(),
            grade1: "#c6e48b".to_string(),
            grade0: "#ebedf0".to_string(),
        }
    }

    pub fn halloween() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            text: DEFAULT_TEXT_COLOR.to_string(),
            grade4: "#03001c".to_string(),
            grade3: "#fe9600".to_string(),
            grade2: "#ffc501".to_string(),
            grade1: "#ffee4a".to_string(),
            grade0: "#ebedf0".to_string(),
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "github" | "default" => Some(Self::github()),
            "halloween" => Some(Self::halloween()),
            _ => None,
        }
    }

    /// Color for a grade index; out-of-range indices clamp to the nearest end.
    pub fn grade(&self, index: usize) -> &str {
        match index {
            0 => &self.grade0,
            1 => &self.grade1,
            2 => &self.grade2,
            3 => &self.grade3,
            _ => &self.grade4,
        }
    }

    pub fn grades(&self) -> [&str; GRADE_COUNT] {
        [
            &self.grade0,
            &self.grade1,
            &self.grade2,
            &self.grade3,
            &self.grade4,
        ]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::github()
    }
}

/// A caller-supplied theme as it arrives from configuration. Every slot must
/// be present; unknown keys are rejected at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeSpec {
    pub background: Option<String>,
    pub text: Option<String>,
    pub grade4: Option<String>,
    pub grade3: Option<String>,
    pub grade2: Option<String>,
    pub grade1: Option<String>,
    pub grade0: Option<String>,
}

impl ThemeSpec {
    pub fn into_theme(self) -> Result<Theme> {
        let ThemeSpec {
            background,
            text,
            grade4,
            grade3,
            grade2,
            grade1,
            grade0,
        } = self;
        let mut missing = Vec::new();
        let mut take = |name: &'static str, slot: Option<String>| -> String {
            match slot {
                Some(value) => value,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };
        let theme = Theme {
            background: take("background", background),
            text: take("text", text),
            grade4: take("grade4", grade4),
            grade3: take("grade3", grade3),
            grade2: take("grade2", grade2),
            grade1: take("grade1", grade1),
            grade0: take("grade0", grade0),
        };
        if !missing.is_empty() {
            return Err(HeatmapError::config(format!(
                "theme is missing required slot(s): {}",
                missing.join(", ")
            )));
        }
        validate_theme(&theme)?;
        Ok(theme)
    }
}

impl From<Theme> for ThemeSpec {
    fn from(theme: Theme) -> Self {
        Self {
            background: Some(theme.background),
            text: Some(theme.text),
            grade4: Some(theme.grade4),
            grade3: Some(theme.grade3),
            grade2: Some(theme.grade2),
            grade1: Some(theme.grade1),
            grade0: Some(theme.grade0),
        }
    }
}

fn validate_theme(theme: &Theme) -> Result<()> {
    let slots = [
        ("background", &theme.background),
        ("text", &theme.text),
        ("grade4", &theme.grade4),
        ("grade3", &theme.grade3),
        ("grade2", &theme.grade2),
        ("grade1", &theme.grade1),
        ("grade0", &theme.grade0),
    ];
    for (name, value) in slots {
        require_color(name, value)?;
    }
    Ok(())
}

fn require_color(slot: &str, value: &str) -> Result<Color> {
    parse_color(value)
        .ok_or_else(|| HeatmapError::config(format!("{slot}: unparseable color `{value}`")))
}

/// Resolves the theme a layout should use.
///
/// Precedence: base `color` > explicit `theme` > named preset > GitHub ramp.
/// A set `color` ignores any theme, even an incomplete one.
pub fn resolve_theme(config: &HeatmapConfig) -> Result<Theme> {
    if let Some(base) = &config.color {
        return create_calendar_theme(base, None, None, None);
    }
    if let Some(spec) = &config.theme {
        return spec.clone().into_theme();
    }
    if let Some(name) = &config.theme_name {
        return Theme::preset(name)
            .ok_or_else(|| HeatmapError::config(format!("unknown theme preset `{name}`")));
    }
    Ok(Theme::github())
}

/// Derives a five-grade ramp from a single base color.
///
/// grade1..grade4 keep the base hue and saturation and step the lightness
/// down, so perceived intensity rises monotonically. grade0 is a fixed
/// neutral unless `empty_cell_color` overrides it.
pub fn create_calendar_theme(
    base_color: &str,
    text_color: Option<&str>,
    empty_cell_color: Option<&str>,
    background: Option<&str>,
) -> Result<Theme> {
    let base = require_color("color", base_color)?;
    let hsl = base.to_hsl();
    let [grade1, grade2, grade3, grade4] = RAMP_LIGHTNESS.map(|l| ramp_step(hsl, l));

    let text = text_color.unwrap_or(DEFAULT_TEXT_COLOR);
    let grade0 = empty_cell_color.unwrap_or(DEFAULT_EMPTY_CELL_COLOR);
    let background = background.unwrap_or(DEFAULT_BACKGROUND);
    require_color("text", text)?;
    require_color("grade0", grade0)?;
    require_color("background", background)?;

    Ok(Theme {
        background: background.to_string(),
        text: text.to_string(),
        grade4,
        grade3,
        grade2,
        grade1,
        grade0: grade0.to_string(),
    })
}

fn ramp_step(base: Hsl, lightness: f32) -> String {
    base.with_lightness(lightness).to_string()
}
