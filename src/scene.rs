use std::sync::Arc;

use crate::assets::BackgroundImage;
use crate::config::Color;
use crate::geometry::{Capsule, Circle, HandShape, Point, Ring};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandKind {
    Hour,
    Minute,
    Second,
}

/// One drawing operation, in face coordinates.
#[derive(Clone, Debug)]
pub enum DrawCommand {
    FillCircle {
        circle: Circle,
        color: Color,
    },
    StrokeRing {
        ring: Ring,
        color: Color,
    },
    /// A round-capped stroke from `capsule.start` to `capsule.end`.
    Line {
        capsule: Capsule,
        color: Color,
    },
    /// Text centered on its own bounding box.
    Text {
        center: Point,
        text: String,
        font_size: f64,
        color: Color,
    },
    Image {
        origin: Point,
        size: f64,
        image: Arc<BackgroundImage>,
    },
    Hand {
        kind: HandKind,
        shape: HandShape,
        color: Color,
    },
    /// Composites the circle as transparent, punching through everything below.
    ClearCircle {
        circle: Circle,
    },
}

/// Anything draw commands can be issued to.
pub trait Surface {
    fn draw(&mut self, command: DrawCommand);
}

/// A recording surface: keeps the commands in the order they were issued.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Issues every recorded command, in order, to `surface`.
    pub fn replay(&self, surface: &mut impl Surface) {
        for command in &self.commands {
            surface.draw(command.clone());
        }
    }
}

impl Surface for Scene {
    fn draw(&mut self, command: DrawCommand) {
        self.add_command(command);
    }
}
