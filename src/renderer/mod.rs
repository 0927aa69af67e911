//! Rendering module
//!
//! Gameplay code only talks to the `Batch` trait. The terminal backend
//! rasterises sprites into character cells; the recording backend keeps
//! the draw calls for tests.

pub mod camera;
pub mod terminal;

pub use camera::{FitViewport, OrthographicCamera, ScreenRect, project};
pub use terminal::TerminalBatch;

use glam::{Mat4, Vec2};

use crate::assets::Sprite;
use crate::sim::Rect;

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// 8-bit channels
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

/// A sprite batch: collects draw calls between `begin` and `end`
pub trait Batch {
    /// Clear the whole frame
    fn clear(&mut self, color: Color);
    /// Screen area subsequent draws are mapped into
    fn set_viewport(&mut self, viewport: ScreenRect);
    /// World-to-clip transform used by subsequent draws
    fn set_projection(&mut self, projection: Mat4);
    fn begin(&mut self);
    /// Draw `sprite` (animation `frame`) stretched over `dest`, in world units
    fn draw(&mut self, sprite: Sprite, frame: usize, dest: Rect);
    /// Draw a line of text with its lower-left corner at `pos`, in world units
    fn draw_text(&mut self, text: &str, pos: Vec2);
    fn end(&mut self);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Viewport(ScreenRect),
    Projection(Mat4),
    Begin,
    Sprite { sprite: Sprite, frame: usize, dest: Rect },
    Text { text: String, pos: Vec2 },
    End,
}

/// Batch that stores draw calls instead of displaying them
#[derive(Debug, Default)]
pub struct RecordingBatch {
    pub calls: Vec<DrawCall>,
}

impl RecordingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprites drawn, in order
    pub fn sprites(&self) -> Vec<Sprite> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Sprite { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect()
    }

    /// Text lines drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Batch for RecordingBatch {
    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn set_viewport(&mut self, viewport: ScreenRect) {
        self.calls.push(DrawCall::Viewport(viewport));
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.calls.push(DrawCall::Projection(projection));
    }

    fn begin(&mut self) {
        self.calls.push(DrawCall::Begin);
    }

    fn draw(&mut self, sprite: Sprite, frame: usize, dest: Rect) {
        self.calls.push(DrawCall::Sprite { sprite, frame, dest });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
        });
    }

    fn end(&mut self) {
        self.calls.push(DrawCall::End);
    }
}
