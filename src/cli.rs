use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Theme;
use crate::face::{Style, StyleFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Numbered,
    Ticked,
    TimezoneAttributed,
}

impl From<StyleArg> for Style {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Numbered => Style::Numbered,
            StyleArg::Ticked => Style::Ticked,
            StyleArg::TimezoneAttributed => Style::TimezoneAttributed,
        }
    }
}

/// Analog clock face in a window.
#[derive(Parser, Debug)]
#[command(name = "clockface", version)]
pub struct Cli {
    #[clap(long, default_value_t = false)]
    pub debug: bool,

    /// IANA zone name, e.g. "Europe/Paris". Falls back to UTC.
    #[clap(long, env = "TZ")]
    pub timezone: Option<String>,

    #[clap(long, value_enum, default_value_t = ThemeArg::Dark)]
    pub theme: ThemeArg,

    /// Layers to draw; repeat or comma-separate. Defaults to all of them.
    #[clap(long = "style", value_enum, value_delimiter = ',')]
    pub styles: Vec<StyleArg>,

    /// Draw the hands only.
    #[clap(long, default_value_t = false, conflicts_with = "styles")]
    pub bare: bool,

    #[clap(long, default_value_t = 300)]
    pub width: usize,

    #[clap(long, default_value_t = 300)]
    pub height: usize,

    #[clap(long, default_value_t = 60.0)]
    pub max_framerate: f64,

    /// TrueType/OpenType font for numerals and the timezone label.
    #[clap(long)]
    pub font: Option<PathBuf>,

    /// Directory holding pre-rendered `Clock*StaticBackground*.png` images.
    #[clap(long)]
    pub assets: Option<PathBuf>,
}

impl Cli {
    /// Layers selected on the command line; all of them unless narrowed.
    pub fn style(&self) -> StyleFlags {
        if self.bare {
            StyleFlags::NONE
        } else if self.styles.is_empty() {
            StyleFlags::ALL
        } else {
            self.styles.iter().copied().map(Style::from).collect()
        }
    }
}
