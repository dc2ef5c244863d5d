// ============================================================================
// PIXEL RASTERIZER
// ============================================================================

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::assets::BackgroundImage;
use crate::config::Color;
use crate::geometry::{edge_coverage, Bounds, Point};
use crate::scene::{DrawCommand, Surface};

/// An RGBA8 frame buffer that rasterizes draw commands as they arrive.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a Font<'static>>,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
            font: None,
        }
    }

    /// Text commands are dropped while no font is set.
    pub fn with_font(mut self, font: Option<&'a Font<'static>>) -> Self {
        self.font = font;
        self
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let px = &self.frame[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        (idx + 4 <= self.frame.len()).then_some(idx)
    }

    /// Source-over blend of `color` at `coverage`.
    fn set_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f64) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let a = (color.a as f64 / 255.0) * coverage.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = &mut self.frame[idx..idx + 4];
        let src = [color.r, color.g, color.b];
        for (channel, value) in dst.iter_mut().zip(src) {
            *channel = (value as f64 * a + *channel as f64 * (1.0 - a)).round() as u8;
        }
        dst[3] = (255.0 * a + dst[3] as f64 * (1.0 - a)).round() as u8;
    }

    fn erase_pixel(&mut self, x: usize, y: usize, coverage: f64) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let keep = 1.0 - coverage.clamp(0.0, 1.0);
        for channel in &mut self.frame[idx..idx + 4] {
            *channel = (*channel as f64 * keep).round() as u8;
        }
    }

    /// Pixel index ranges covering `bounds`, clipped to the frame.
    fn span(&self, bounds: Bounds) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let clip = |v: f64, max: usize| (v.max(0.0) as usize).min(max);
        (
            clip(bounds.min.x.floor(), self.width)..clip(bounds.max.x.ceil(), self.width),
            clip(bounds.min.y.floor(), self.height)..clip(bounds.max.y.ceil(), self.height),
        )
    }

    fn fill_by(&mut self, bounds: Bounds, color: Color, signed_distance: impl Fn(Point) -> f64) {
        let (xs, ys) = self.span(bounds);
        for y in ys {
            for x in xs.clone() {
                let aa = edge_coverage(signed_distance(Point::new(x as f64 + 0.5, y as f64 + 0.5)));
                if aa > 0.01 {
                    self.set_pixel(x, y, color, aa);
                }
            }
        }
    }

    fn erase_by(&mut self, bounds: Bounds, signed_distance: impl Fn(Point) -> f64) {
        let (xs, ys) = self.span(bounds);
        for y in ys {
            for x in xs.clone() {
                let aa = edge_coverage(signed_distance(Point::new(x as f64 + 0.5, y as f64 + 0.5)));
                if aa > 0.0 {
                    self.erase_pixel(x, y, aa);
                }
            }
        }
    }

    fn draw_text(&mut self, center: Point, text: &str, font_size: f64, color: Color) {
        let Some(font) = self.font else {
            log::trace!("no font loaded, dropping text {text:?}");
            return;
        };
        let scale = Scale::uniform(font_size as f32);
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<PositionedGlyph> = font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .collect();
        // Calculate bounding box for the whole string
        let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(min_x, max_x, min_y, max_y), bb| {
                (
                    min_x.min(bb.min.x),
                    max_x.max(bb.max.x),
                    min_y.min(bb.min.y),
                    max_y.max(bb.max.y),
                )
            },
        );
        if min_x >= max_x || min_y >= max_y {
            return;
        }
        let offset_x = (center.x - (max_x - min_x) as f64 / 2.0).round() as i64;
        let offset_y = (center.y - (max_y - min_y) as f64 / 2.0).round() as i64;
        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i64 + (bb.min.x - min_x) as i64;
                let py = offset_y + gy as i64 + (bb.min.y - min_y) as i64;
                if px >= 0 && py >= 0 {
                    self.set_pixel(px as usize, py as usize, color, v as f64);
                }
            });
        }
    }

    /// Nearest-neighbour blit of `image` scaled into the square at `origin`.
    fn draw_image(&mut self, origin: Point, size: f64, image: &BackgroundImage) {
        if image.width == 0 || image.height == 0 || size <= 0.0 {
            return;
        }
        let bounds = Bounds {
            min: origin,
            max: Point::new(origin.x + size, origin.y + size),
        };
        let (xs, ys) = self.span(bounds);
        for y in ys {
            let v = ((y as f64 + 0.5 - origin.y) / size * image.height as f64) as u32;
            for x in xs.clone() {
                let u = ((x as f64 + 0.5 - origin.x) / size * image.width as f64) as u32;
                if let Some([r, g, b, a]) = image.pixel(u, v) {
                    self.set_pixel(x, y, Color::rgba(r, g, b, a), 1.0);
                }
            }
        }
    }
}

impl Surface for Canvas<'_> {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::FillCircle { circle, color } => {
                self.fill_by(circle.bounds(), color, |p| circle.signed_distance(p));
            }
            DrawCommand::StrokeRing { ring, color } => {
                self.fill_by(ring.bounds(), color, |p| ring.signed_distance(p));
            }
            DrawCommand::Line { capsule, color } => {
                self.fill_by(capsule.bounds(), color, |p| capsule.signed_distance(p));
            }
            DrawCommand::Text {
                center,
                text,
                font_size,
                color,
            } => self.draw_text(center, &text, font_size, color),
            DrawCommand::Image {
                origin,
                size,
                image,
            } => self.draw_image(origin, size, &image),
            DrawCommand::Hand { shape, color, .. } => {
                self.fill_by(shape.bounds(), color, |p| shape.signed_distance(p));
            }
            DrawCommand::ClearCircle { circle } => {
                self.erase_by(circle.bounds(), |p| circle.signed_distance(p));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::geometry::{Capsule, Circle};

    const SIZE: usize = 40;

    fn buffer() -> Vec<u8> {
        vec![0u8; SIZE * SIZE * 4]
    }

    fn disc(radius: f64) -> Circle {
        Circle {
            center: Point::new(20.0, 20.0),
            radius,
        }
    }

    #[test]
    fn clear_paints_every_pixel() {
        let mut frame = buffer();
        let mut canvas = Canvas::new(&mut frame, SIZE, SIZE);
        canvas.clear(Color::DARK_GRAY);
        assert_eq!(canvas.pixel(0, 0), Some([0x55, 0x55, 0x55, 0xff]));
        assert_eq!(canvas.pixel(39, 39), Some([0x55, 0x55, 0x55, 0xff]));
        assert_eq!(canvas.pixel(40, 0), None);
    }

    #[test]
    fn circle_fills_inside_only() {
        let mut frame = buffer();
        let mut canvas = Canvas::new(&mut frame, SIZE, SIZE);
        canvas.draw(DrawCommand::FillCircle {
            circle: disc(10.0),
            color: Color::RED,
        });
        assert_eq!(canvas.pixel(20, 20), Some([0xff, 0x3b, 0x30, 0xff]));
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn clear_circle_punches_a_hole() {
        let mut frame = buffer();
        let mut canvas = Canvas::new(&mut frame, SIZE, SIZE);
        canvas.clear(Color::WHITE);
        canvas.draw(DrawCommand::ClearCircle { circle: disc(4.0) });
        assert_eq!(canvas.pixel(20, 20), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(20, 30), Some([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn translucent_color_blends() {
        let mut frame = buffer();
        let mut canvas = Canvas::new(&mut frame, SIZE, SIZE);
        canvas.clear(Color::BLACK);
        canvas.draw(DrawCommand::Line {
            capsule: Capsule {
                start: Point::new(0.0, 20.5),
                end: Point::new(40.0, 20.5),
                radius: 3.0,
            },
            color: Color::WHITE.dimmed(),
        });
        let [r, _, _, a] = canvas.pixel(20, 20).expect("in bounds");
        assert!((0x7e..=0x81).contains(&r), "got {r}");
        assert_eq!(a, 0xff);
    }

    #[test]
    fn text_without_font_is_dropped() {
        let mut frame = buffer();
        let mut canvas = Canvas::new(&mut frame, SIZE, SIZE);
        canvas.draw(DrawCommand::Text {
            center: Point::new(20.0, 20.0),
            text: "12".to_string(),
            font_size: 12.0,
            color: Color::WHITE,
        });
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn text_is_centered_on_its_bounding_box() {
        let Ok(Some(data)) = crate::config::FontConfig::default().load(None) else {
            return;
        };
        let font = Font::try_from_vec(data).expect("system font parses");
        let (width, height) = (300, 300);
        let mut frame = vec![0u8; width * height * 4];
        let mut canvas = Canvas::new(&mut frame, width, height).with_font(Some(&font));
        canvas.draw(DrawCommand::Text {
            center: Point::new(150.0, 200.0),
            text: "UTC".to_string(),
            font_size: 300.0 / 9.0,
            color: Color::WHITE,
        });

        let lit: Vec<(f64, f64)> = frame
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| px[3] > 0x80)
            .map(|(i, _)| ((i % width) as f64, (i / width) as f64))
            .collect();
        assert!(lit.len() > 100, "only {} pixels lit", lit.len());
        for &(x, y) in &lit {
            assert!((x - 150.0).abs() < 60.0 && (y - 200.0).abs() < 25.0, "stray pixel at ({x}, {y})");
        }
        let (min_x, max_x) = lit.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
        let (min_y, max_y) = lit.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        assert!(((min_x + max_x) / 2.0 - 150.0).abs() <= 3.0);
        assert!(((min_y + max_y) / 2.0 - 200.0).abs() <= 3.0);
    }

    #[test]
    fn image_is_scaled_into_place() {
        let image = BackgroundImage {
            width: 2,
            height: 1,
            pixels: vec![0xff, 0, 0, 0xff, 0, 0, 0xff, 0xff],
        };
        let mut frame = buffer();
        let mut canvas = Canvas::new(&mut frame, SIZE, SIZE);
        canvas.draw(DrawCommand::Image {
            origin: Point::new(10.0, 10.0),
            size: 20.0,
            image: Arc::new(image),
        });
        assert_eq!(canvas.pixel(12, 15), Some([0xff, 0, 0, 0xff]));
        assert_eq!(canvas.pixel(28, 15), Some([0, 0, 0xff, 0xff]));
        assert_eq!(canvas.pixel(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let mut frame = buffer();
        let mut canvas = Canvas::new(&mut frame, SIZE, SIZE);
        canvas.draw(DrawCommand::FillCircle {
            circle: Circle {
                center: Point::new(-50.0, 100.0),
                radius: 30.0,
            },
            color: Color::WHITE,
        });
        assert!(frame.iter().all(|&b| b == 0));
    }
}
