//! The drawing contract between the chase and whatever paints it.
//!
//! The browser implements these traits on top of a `<canvas>` 2D context and a plain
//! element; [`RecordingSurface`] and [`RecordingMarker`] keep a log instead, which is
//! what the tests inspect.

use std::fmt;

use crate::error::GameResult;
use crate::vector::Vector2D;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Formats as a CSS hex colour, e.g. `#DDFF00`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A 2D drawing surface that can be moved around the page as a whole.
pub trait RenderSurface {
    /// Width and height of the drawable area.
    fn size(&self) -> (f64, f64);

    /// Erases the whole drawable area.
    fn clear(&mut self);

    fn begin_path(&mut self);

    /// Adds a clockwise arc around `center` from `start` to `end` (radians) to the current path.
    fn arc(&mut self, center: Vector2D, radius: f64, start: f64, end: f64) -> GameResult<()>;

    fn line_to(&mut self, point: Vector2D);

    fn close_path(&mut self);

    fn fill(&mut self, color: Color);

    fn stroke(&mut self, color: Color, width: f64, miter_limit: f64);

    /// Moves the surface so that its top-left corner sits at `offset` on the page.
    fn translate_to(&mut self, offset: Vector2D) -> GameResult<()>;
}

/// The pellet that follows the pointer around.
pub trait PointerMarker {
    /// Moves the marker so that its top-left corner sits at `offset` on the page.
    fn translate_to(&mut self, offset: Vector2D) -> GameResult<()>;
}

/// A single call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    BeginPath,
    Arc {
        center: Vector2D,
        radius: f64,
        start: f64,
        end: f64,
    },
    LineTo(Vector2D),
    ClosePath,
    Fill(Color),
    Stroke {
        color: Color,
        width: f64,
        miter_limit: f64,
    },
    Translate(Vector2D),
}

/// A headless surface that remembers every call made on it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the recorded commands, leaving the log empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The most recent translation, if any.
    pub fn last_offset(&self) -> Option<Vector2D> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::Translate(offset) => Some(*offset),
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn arc(&mut self, center: Vector2D, radius: f64, start: f64, end: f64) -> GameResult<()> {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
        });
        Ok(())
    }

    fn line_to(&mut self, point: Vector2D) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, color: Color, width: f64, miter_limit: f64) {
        self.commands.push(DrawCommand::Stroke {
            color,
            width,
            miter_limit,
        });
    }

    fn translate_to(&mut self, offset: Vector2D) -> GameResult<()> {
        self.commands.push(DrawCommand::Translate(offset));
        Ok(())
    }
}

/// A headless marker that remembers where it was moved to.
#[derive(Debug, Clone, Default)]
pub struct RecordingMarker {
    pub offsets: Vec<Vector2D>,
}

impl RecordingMarker {
    pub fn last_offset(&self) -> Option<Vector2D> {
        self.offsets.last().copied()
    }
}

impl PointerMarker for RecordingMarker {
    fn translate_to(&mut self, offset: Vector2D) -> GameResult<()> {
        self.offsets.push(offset);
        Ok(())
    }
}
