//! Turns hand angles into the ordered draw calls of one clock face.

use crate::angles::HandAngles;
use crate::assets::{BackgroundKind, BackgroundProvider, SizeBucket};
use crate::config::{ColorScheme, FaceConfig};
use crate::geometry::{Capsule, Circle, GeometryFrame, HandShape, Point, Ring};
use crate::scene::{DrawCommand, HandKind, Surface};

/// An optional face layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Numbered,
    Ticked,
    TimezoneAttributed,
}

/// Set of enabled [`Style`] layers. Any combination is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleFlags {
    numbered: bool,
    ticked: bool,
    timezone_attributed: bool,
}

impl StyleFlags {
    pub const NONE: StyleFlags = StyleFlags {
        numbered: false,
        ticked: false,
        timezone_attributed: false,
    };
    pub const ALL: StyleFlags = StyleFlags {
        numbered: true,
        ticked: true,
        timezone_attributed: true,
    };

    pub fn contains(self, style: Style) -> bool {
        match style {
            Style::Numbered => self.numbered,
            Style::Ticked => self.ticked,
            Style::TimezoneAttributed => self.timezone_attributed,
        }
    }

    pub fn with(mut self, style: Style) -> Self {
        match style {
            Style::Numbered => self.numbered = true,
            Style::Ticked => self.ticked = true,
            Style::TimezoneAttributed => self.timezone_attributed = true,
        }
        self
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

impl FromIterator<Style> for StyleFlags {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, StyleFlags::with)
    }
}

const TICK_COUNT: usize = 60;

/// Stateless face renderer. Every call is a pure function of its arguments.
pub struct ClockFaceRenderer<'a> {
    config: &'a FaceConfig,
    backgrounds: Option<&'a dyn BackgroundProvider>,
}

impl<'a> ClockFaceRenderer<'a> {
    pub fn new(config: &'a FaceConfig) -> Self {
        Self {
            config,
            backgrounds: None,
        }
    }

    /// Prefer static images over procedural ticks and numerals when available.
    pub fn with_backgrounds(mut self, provider: &'a dyn BackgroundProvider) -> Self {
        self.backgrounds = Some(provider);
        self
    }

    /// Issues the face layers back to front.
    ///
    /// A degenerate frame issues nothing; a missing label only drops the label.
    pub fn render(
        &self,
        surface: &mut impl Surface,
        frame: GeometryFrame,
        angles: HandAngles,
        style: StyleFlags,
        colors: &ColorScheme,
        timezone_label: Option<&str>,
    ) {
        if let Err(err) = frame.validate() {
            log::trace!("skipping frame: {err}");
            return;
        }

        if !colors.background.is_transparent() {
            surface.draw(DrawCommand::FillCircle {
                circle: Circle {
                    center: frame.center(),
                    radius: frame.radius(),
                },
                color: colors.background,
            });
        }

        if !self.draw_static_background(surface, &frame, style) {
            if style.contains(Style::Ticked) {
                self.add_ticks(surface, &frame, colors);
            }
            if style.contains(Style::Numbered) {
                self.add_numerals(surface, &frame, colors);
            }
        }

        if style.contains(Style::TimezoneAttributed) {
            match timezone_label {
                Some(label) if !label.is_empty() => self.add_label(surface, &frame, colors, label),
                _ => log::trace!("no timezone label available"),
            }
        }

        let hole = frame.diameter() / self.config.dial.hole_divisor;
        let hands = [
            (HandKind::Hour, &self.config.hour, angles.hour, colors.minute_hour_hand),
            (HandKind::Minute, &self.config.minute, angles.minute, colors.minute_hour_hand),
            (HandKind::Second, &self.config.second, angles.second, colors.second_hand),
        ];
        for (kind, hand, degrees, color) in hands {
            surface.draw(DrawCommand::Hand {
                kind,
                shape: HandShape::build(&frame, hand, hole, degrees),
                color,
            });
        }

        self.add_pivot(surface, &frame, colors, hole);
    }

    fn draw_static_background(&self, surface: &mut impl Surface, frame: &GeometryFrame, style: StyleFlags) -> bool {
        let Some(provider) = self.backgrounds else {
            return false;
        };
        let Some(kind) = BackgroundKind::for_style(style) else {
            return false;
        };
        let bucket = SizeBucket::for_diameter(frame.diameter());
        match provider.background(kind, bucket) {
            Some(image) => {
                surface.draw(DrawCommand::Image {
                    origin: frame.origin(),
                    size: frame.diameter(),
                    image,
                });
                true
            }
            None => {
                log::trace!("no {kind:?} background for {bucket:?}, drawing procedurally");
                false
            }
        }
    }

    fn add_ticks(&self, surface: &mut impl Surface, frame: &GeometryFrame, colors: &ColorScheme) {
        let dial = &self.config.dial;
        let center = frame.center();
        let diameter = frame.diameter();
        for index in 0..TICK_COUNT {
            let angle = index as f64 / TICK_COUNT as f64 * 360.0;
            let major = index % 5 == 0;
            let (inner, outer, color) = if major {
                (dial.major_tick_inner, dial.major_tick_outer, colors.indicator_hour_number)
            } else {
                (
                    dial.minor_tick_inner,
                    dial.minor_tick_outer,
                    colors.indicator_hour_number.dimmed(),
                )
            };
            surface.draw(DrawCommand::Line {
                capsule: Capsule {
                    start: center.toward(angle, inner * diameter),
                    end: center.toward(angle, outer * diameter),
                    radius: dial.tick_width * diameter / 2.0,
                },
                color,
            });
        }
    }

    fn add_numerals(&self, surface: &mut impl Surface, frame: &GeometryFrame, colors: &ColorScheme) {
        let dial = &self.config.dial;
        let center = frame.center();
        let diameter = frame.diameter();
        let font_size = diameter / dial.numeral_font_divisor;
        // laid out clockwise starting from the 3 o'clock position
        for (index, hour) in (3..=12).chain(1..=2).enumerate() {
            let angle = 90.0 + index as f64 * 30.0;
            surface.draw(DrawCommand::Text {
                center: center.toward(angle, dial.numeral_distance * diameter),
                text: hour.to_string(),
                font_size,
                color: colors.indicator_hour_number,
            });
        }
    }

    fn add_label(&self, surface: &mut impl Surface, frame: &GeometryFrame, colors: &ColorScheme, label: &str) {
        let dial = &self.config.dial;
        let center = frame.center();
        surface.draw(DrawCommand::Text {
            center: Point::new(center.x, center.y + frame.radius() / dial.label_offset_divisor),
            text: label.to_owned(),
            font_size: frame.diameter() / dial.label_font_divisor,
            color: colors.time_zone_text,
        });
    }

    fn add_pivot(&self, surface: &mut impl Surface, frame: &GeometryFrame, colors: &ColorScheme, hole: f64) {
        let center = frame.center();
        let stem = frame.radius() * self.config.second.width;
        surface.draw(DrawCommand::StrokeRing {
            ring: Ring {
                center,
                radius: hole / 2.0,
                width: stem * self.config.dial.pivot_ring_width,
            },
            color: colors.second_hand,
        });
        surface.draw(DrawCommand::ClearCircle {
            circle: Circle {
                center,
                radius: hole / 2.0,
            },
        });
    }
}
