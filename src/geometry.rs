//! Frame geometry and hand outlines.
//!
//! Screen coordinates: x grows right, y grows down. Hands are authored pointing
//! up (toward 12) and rotated clockwise about the pivot by their angle, so an
//! angle of zero is on screen exactly as authored.

use crate::config::HandConfig;
use crate::error::FaceError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotates clockwise on screen by `degrees` around `pivot`.
    pub fn rotated_about(self, pivot: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }

    /// The point `distance` away from `self` in the direction of a clock angle.
    pub fn toward(self, degrees: f64, distance: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point {
            x: self.x + sin * distance,
            y: self.y - cos * distance,
        }
    }
}

/// Axis-aligned pixel bounds, inclusive of `min` and exclusive of `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn around(center: Point, extent: f64) -> Self {
        Self {
            min: Point::new(center.x - extent, center.y - extent),
            max: Point::new(center.x + extent, center.y + extent),
        }
    }

    pub fn union(self, other: Bounds) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// The square region a face occupies inside the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryFrame {
    pub width: f64,
    pub height: f64,
}

impl GeometryFrame {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), FaceError> {
        // the negated comparison also rejects NaN
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(FaceError::DegenerateGeometry {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn diameter(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn radius(&self) -> f64 {
        self.diameter() / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Top-left corner of the centered square.
    pub fn origin(&self) -> Point {
        let diameter = self.diameter();
        Point::new(
            (self.width - diameter) / 2.0,
            (self.height - diameter) / 2.0,
        )
    }
}

/// Pixel coverage from a signed distance (negative inside), one pixel of falloff.
pub fn edge_coverage(signed_distance: f64) -> f64 {
    (1.0 - signed_distance.clamp(0.0, 1.0)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn signed_distance(&self, point: Point) -> f64 {
        point.distance(self.center) - self.radius
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.center, self.radius + 1.0)
    }
}

/// An annulus: a circle outline stroked with `width`, centered on the outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: Point,
    pub radius: f64,
    pub width: f64,
}

impl Ring {
    pub fn signed_distance(&self, point: Point) -> f64 {
        (point.distance(self.center) - self.radius).abs() - self.width / 2.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.center, self.radius + self.width / 2.0 + 1.0)
    }
}

/// A stadium: all points within `radius` of the segment `start`..`end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
}

impl Capsule {
    /// The capsule inscribed in a `width`-wide band along a clock angle, spanning
    /// distances `from..to` measured outward from `pivot`.
    pub fn along(pivot: Point, degrees: f64, from: f64, to: f64, width: f64) -> Self {
        let radius = width / 2.0;
        let (near, far) = if to - from > width {
            (from + radius, to - radius)
        } else {
            let middle = (from + to) / 2.0;
            (middle, middle)
        };
        Self {
            start: pivot.toward(degrees, near),
            end: pivot.toward(degrees, far),
            radius,
        }
    }

    pub fn rotated_about(self, pivot: Point, degrees: f64) -> Self {
        Self {
            start: self.start.rotated_about(pivot, degrees),
            end: self.end.rotated_about(pivot, degrees),
            radius: self.radius,
        }
    }

    pub fn signed_distance(&self, point: Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq > 0.0 {
            (((point.x - self.start.x) * dx + (point.y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = Point::new(self.start.x + t * dx, self.start.y + t * dy);
        point.distance(closest) - self.radius
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.start, self.radius + 1.0).union(Bounds::around(self.end, self.radius + 1.0))
    }
}

/// A hand outline: stem and accent capsules plus a collar, minus the pivot hole.
#[derive(Debug, Clone, PartialEq)]
pub struct HandShape {
    pub parts: Vec<Capsule>,
    pub collar: Ring,
    pub hole: Circle,
}

impl HandShape {
    /// Builds the hand described by `config` at `degrees` inside `frame`.
    ///
    /// The outline is laid out pointing at 12 and then turned as one rigid body
    /// about the pivot.
    pub fn build(frame: &GeometryFrame, config: &HandConfig, hole_diameter: f64, degrees: f64) -> Self {
        let pivot = frame.center();
        let radius = frame.radius();
        let width = radius * config.width;
        let from = radius * config.offset;
        let to = from + radius * config.length;

        let mut parts = vec![Capsule::along(pivot, 0.0, from, to, width)];
        if let Some(accent) = config.accent {
            parts.push(Capsule::along(
                pivot,
                0.0,
                radius * accent.start,
                to,
                radius * accent.width,
            ));
        }

        let hole_radius = hole_diameter / 2.0;
        Self {
            parts: parts
                .into_iter()
                .map(|capsule| capsule.rotated_about(pivot, degrees))
                .collect(),
            collar: Ring {
                center: pivot,
                radius: hole_radius,
                width: width * config.collar,
            },
            hole: Circle {
                center: pivot,
                radius: hole_radius,
            },
        }
    }

    pub fn signed_distance(&self, point: Point) -> f64 {
        let filled = self
            .parts
            .iter()
            .map(|part| part.signed_distance(point))
            .fold(self.collar.signed_distance(point), f64::min);
        filled.max(-self.hole.signed_distance(point))
    }

    pub fn coverage(&self, point: Point) -> f64 {
        edge_coverage(self.signed_distance(point))
    }

    pub fn bounds(&self) -> Bounds {
        self.parts
            .iter()
            .map(Capsule::bounds)
            .fold(self.collar.bounds(), Bounds::union)
    }
}
