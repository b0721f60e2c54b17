//! Minimal CSS color handling: enough to parse the colors a caller can put in a
//! theme or pass as a base color, and to move a color through HSL space.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static FUNC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(rgba?|hsla?)\(\s*([^()]*?)\s*\)$").unwrap());
static ARG_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,/]\s*|\s+").unwrap());

const NAMED_COLORS: [(&str, (u8, u8, u8)); 24] = [
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("navy", (0, 0, 128)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("rebeccapurple", (102, 51, 153)),
    ("fuchsia", (255, 0, 255)),
    ("magenta", (255, 0, 255)),
    ("aqua", (0, 255, 255)),
    ("cyan", (0, 255, 255)),
    ("teal", (0, 128, 128)),
    ("olive", (128, 128, 0)),
    ("maroon", (128, 0, 0)),
    ("silver", (192, 192, 192)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("gold", (255, 215, 0)),
];

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;
        if delta <= f32::EPSILON {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }
        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        Hsl {
            h: h.rem_euclid(360.0),
            s: (s * 100.0).clamp(0.0, 100.0),
            l: l * 100.0,
        }
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(360.0);
        let s = (hsl.s / 100.0).clamp(0.0, 1.0);
        let l = (hsl.l / 100.0).clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }

    /// Relative luminance (WCAG), used to compare perceived intensity.
    pub fn luminance(&self) -> f32 {
        fn linear(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Hsl {
    pub fn with_lightness(self, l: f32) -> Self {
        Self {
            l: l.clamp(0.0, 100.0),
            ..self
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.h.round() as i32 % 360,
            self.s.round() as i32,
            self.l.round() as i32
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.to_hex())
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                (self.a * 1000.0).round() / 1000.0
            )
        }
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Parses a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`,
/// `rgba()`, `hsl()`, `hsla()`, `transparent` and a handful of named colors.
pub fn parse_color(input: &str) -> Option<Color> {
    let value = input.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    if value == "transparent" {
        return Some(Color::TRANSPARENT);
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(caps) = FUNC_RE.captures(&value) {
        let args: Vec<&str> = ARG_SPLIT_RE
            .split(caps.get(2)?.as_str())
            .filter(|part| !part.is_empty())
            .collect();
        return match caps.get(1)?.as_str() {
            "rgb" | "rgba" => parse_rgb_args(&args),
            _ => parse_hsl_args(&args),
        };
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, (r, g, b))| Color::rgb(*r, *g, *b))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let expand = |idx: usize| u8::from_str_radix(&hex[idx..idx + 1], 16).ok().map(|v| v * 17);
    let pair = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(expand(0)?, expand(1)?, expand(2)?)),
        4 => Some(Color::rgb(expand(0)?, expand(1)?, expand(2)?).with_alpha(expand(3)? as f32 / 255.0)),
        6 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
        8 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?).with_alpha(pair(6)? as f32 / 255.0)),
        _ => None,
    }
}

fn parse_rgb_args(args: &[&str]) -> Option<Color> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let channel = |raw: &str| -> Option<u8> {
        let value = if let Some(pct) = raw.strip_suffix('%') {
            pct.parse::<f32>().ok()? / 100.0 * 255.0
        } else {
            raw.parse::<f32>().ok()?
        };
        value.is_finite().then(|| value.clamp(0.0, 255.0).round() as u8)
    };
    let color = Color::rgb(channel(args[0])?, channel(args[1])?, channel(args[2])?);
    match args.get(3) {
        Some(alpha) => Some(color.with_alpha(parse_alpha(alpha)?)),
        None => Some(color),
    }
}

fn parse_hsl_args(args: &[&str]) -> Option<Color> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let h = args[0].strip_suffix("deg").unwrap_or(args[0]).parse::<f32>().ok()?;
    let s = args[1].strip_suffix('%')?.parse::<f32>().ok()?;
    let l = args[2].strip_suffix('%')?.parse::<f32>().ok()?;
    if !(h.is_finite() && s.is_finite() && l.is_finite()) {
        return None;
    }
    let color = Color::from_hsl(Hsl { h, s, l });
    match args.get(3) {
        Some(alpha) => Some(color.with_alpha(parse_alpha(alpha)?)),
        None => Some(color),
    }
}

fn parse_alpha(raw: &str) -> Option<f32> {
    let value = if let Some(pct) = raw.strip_suffix('%') {
        pct.parse::<f32>().ok()? / 100.0
    } else {
        raw.parse::<f32>().ok()?
    };
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(parse_color("#196127"), Some(Color::rgb(0x19, 0x61, 0x27)));
        assert_eq!(parse_color("  #EBEDF0 "), Some(Color::rgb(0xeb, 0xed, 0xf0)));
        let translucent = parse_color("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-4);
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("#ggg").is_none());
    }

    #[test]
    fn parses_functional_notation() {
        assert_eq!(parse_color("rgb(25, 97, 39)"), Some(Color::rgb(25, 97, 39)));
        assert_eq!(parse_color("rgb(25 97 39)"), Some(Color::rgb(25, 97, 39)));
        let rgba = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(rgba.a, 0.5);
        let hsl = parse_color("hsl(203, 82%, 33%)").unwrap();
        let back = hsl.to_hsl();
        assert!((back.h - 203.0).abs() < 1.5);
        assert!((back.s - 82.0).abs() < 1.5);
        assert!((back.l - 33.0).abs() < 1.0);
        assert!(parse_color("hsl(203, 82, 33)").is_none());
        assert!(parse_color("rgb(1, 2)").is_none());
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(parse_color("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(parse_color("Teal"), Some(Color::rgb(0, 128, 128)));
        assert!(parse_color("not-a-color").is_none());
        assert!(parse_color("").is_none());
    }

    #[test]
    fn hsl_round_trip_is_close() {
        let original = Color::rgb(0x23, 0x9a, 0x3b);
        let back = Color::from_hsl(original.to_hsl());
        assert!((original.r as i32 - back.r as i32).abs() <= 1);
        assert!((original.g as i32 - back.g as i32).abs() <= 1);
        assert!((original.b as i32 - back.b as i32).abs() <= 1);
    }

    #[test]
    fn display_uses_hex_for_opaque_and_rgba_otherwise() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(Color::TRANSPARENT.to_string(), "rgba(0, 0, 0, 0)");
        let hsl = Hsl {
            h: 203.4,
            s: 81.6,
            l: 33.2,
        };
        assert_eq!(hsl.to_string(), "hsl(203, 82%, 33%)");
    }

    #[test]
    fn darker_colors_have_lower_luminance() {
        let light = Color::from_hsl(Hsl { h: 120.0, s: 50.0, l: 80.0 });
        let dark = Color::from_hsl(Hsl { h: 120.0, s: 50.0, l: 30.0 });
        assert!(light.luminance() > dark.luminance());
    }
}
