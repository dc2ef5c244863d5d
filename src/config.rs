use std::path::{Path, PathBuf};

use crate::error::ClockError;

/// RGBA color used by every face layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0x00, 0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const RED: Color = Color::new(0xff, 0x3b, 0x30);
    pub const DARK_GRAY: Color = Color::new(0x55, 0x55, 0x55);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue with its opacity scaled by `factor`.
    pub fn with_opacity(self, factor: f64) -> Self {
        let a = (self.a as f64 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// The secondary shade used for minor ticks.
    pub fn dimmed(self) -> Self {
        self.with_opacity(0.5)
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Light or dark palette, as handed over by the theme provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// The five color roles of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub second_hand: Color,
    pub minute_hour_hand: Color,
    pub indicator_hour_number: Color,
    pub time_zone_text: Color,
    pub background: Color,
}

impl ColorScheme {
    pub fn light() -> Self {
        Self {
            second_hand: Color::RED,
            minute_hour_hand: Color::BLACK,
            indicator_hour_number: Color::BLACK,
            time_zone_text: Color::rgba(0x3c, 0x3c, 0x43, 0x99),
            background: Color::WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            second_hand: Color::RED,
            minute_hour_hand: Color::WHITE,
            indicator_hour_number: Color::WHITE,
            time_zone_text: Color::WHITE.with_opacity(0.6),
            background: Color::DARK_GRAY,
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Wider capsule laid over the outer part of a hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentConfig {
    /// Distance from the pivot where the accent begins, as a fraction of the radius.
    pub start: f64,
    /// Accent width as a fraction of the radius.
    pub width: f64,
}

/// Configuration for one hand. Lengths and widths are fractions of the face radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandConfig {
    pub length: f64,
    /// Shifts the hand along its own axis; negative values leave a tail behind the pivot.
    pub offset: f64,
    pub width: f64,
    pub accent: Option<AccentConfig>,
    /// Stroke width of the collar around the pivot hole, in stem widths.
    pub collar: f64,
}

impl HandConfig {
    pub fn hour() -> Self {
        Self {
            length: 0.6,
            offset: 0.0,
            width: 1.0 / 45.0,
            accent: Some(AccentConfig {
                start: 1.0 / 8.0,
                width: 1.0 / 16.0,
            }),
            collar: 2.0,
        }
    }

    pub fn minute() -> Self {
        Self {
            length: 0.9,
            ..Self::hour()
        }
    }

    pub fn second() -> Self {
        Self {
            length: 1.0,
            offset: -0.1,
            width: 1.0 / 45.0,
            accent: None,
            collar: 1.1,
        }
    }
}

/// Configuration for the dial: ticks, numerals, label and pivot.
///
/// Tick and numeral distances are fractions of the face diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialConfig {
    pub major_tick_inner: f64,
    pub major_tick_outer: f64,
    pub minor_tick_inner: f64,
    pub minor_tick_outer: f64,
    pub tick_width: f64,
    pub numeral_distance: f64,
    /// Numeral font size is `diameter / numeral_font_divisor`.
    pub numeral_font_divisor: f64,
    pub label_font_divisor: f64,
    /// The label sits `radius / label_offset_divisor` below the pivot.
    pub label_offset_divisor: f64,
    /// The pivot hole is `diameter / hole_divisor` across.
    pub hole_divisor: f64,
    /// Pivot ring stroke, in second-hand stem widths.
    pub pivot_ring_width: f64,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            major_tick_inner: 0.43,
            major_tick_outer: 0.48,
            minor_tick_inner: 0.44,
            minor_tick_outer: 0.47,
            tick_width: 0.01,
            numeral_distance: 0.35,
            numeral_font_divisor: 9.0,
            label_font_divisor: 9.0,
            label_offset_divisor: 3.0,
            hole_divisor: 32.0,
            pivot_ring_width: 1.1,
        }
    }
}

/// Complete face geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceConfig {
    pub hour: HandConfig,
    pub minute: HandConfig,
    pub second: HandConfig,
    pub dial: DialConfig,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            hour: HandConfig::hour(),
            minute: HandConfig::minute(),
            second: HandConfig::second(),
            dial: DialConfig::default(),
        }
    }
}

/// Where to look for a font when none is given explicitly.
#[derive(Debug, Clone)]
pub struct FontConfig {
    pub search_paths: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            search_paths: [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "/Library/Fonts/Arial.ttf",
                "C:\\Windows\\Fonts\\arial.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

impl FontConfig {
    /// Reads the font at `explicit`, or the first readable search path.
    ///
    /// An explicit path that cannot be read is an error; a failed search is not,
    /// the face is then drawn without text.
    pub fn load(&self, explicit: Option<&Path>) -> Result<Option<Vec<u8>>, ClockError> {
        if let Some(path) = explicit {
            log::debug!("loading font from {}", path.display());
            return Ok(Some(std::fs::read(path)?));
        }
        for path in &self.search_paths {
            if let Ok(data) = std::fs::read(path) {
                log::debug!("using system font {}", path.display());
                return Ok(Some(data));
            }
        }
        log::warn!("no font found, numerals and timezone label will not be drawn");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimmed_halves_opacity() {
        assert_eq!(Color::WHITE.dimmed().a, 0x80);
        assert_eq!(Color::RED.dimmed(), Color::rgba(0xff, 0x3b, 0x30, 0x80));
        assert!(Color::TRANSPARENT.dimmed().is_transparent());
    }

    #[test]
    fn themes_swap_hand_colors() {
        let light = ColorScheme::for_theme(Theme::Light);
        let dark = ColorScheme::for_theme(Theme::Dark);
        assert_eq!(light.minute_hour_hand, Color::BLACK);
        assert_eq!(dark.minute_hour_hand, Color::WHITE);
        assert_eq!(light.second_hand, dark.second_hand);
        assert_eq!(ColorScheme::default(), dark);
    }

    #[test]
    fn minute_hand_differs_from_hour_only_in_length() {
        let hour = HandConfig::hour();
        let minute = HandConfig::minute();
        assert!(minute.length > hour.length);
        assert_eq!(minute.accent, hour.accent);
        assert_eq!(minute.width, hour.width);
    }

    #[test]
    fn missing_explicit_font_is_an_error() {
        let config = FontConfig {
            search_paths: Vec::new(),
        };
        assert!(config
            .load(Some(Path::new("/nonexistent/clockface.ttf")))
            .is_err());
        assert!(matches!(config.load(None), Ok(None)));
    }
}
