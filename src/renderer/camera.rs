//! Orthographic camera and aspect-preserving viewport

use glam::{Mat4, UVec2, Vec2, Vec3};

/// 2D camera looking at `position` (center of view) in world units
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub position: Vec2,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl OrthographicCamera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport_width,
            viewport_height,
        }
    }

    /// Projection * view: world units to clip space ([-1, 1] on both axes)
    pub fn combined(&self) -> Mat4 {
        let half = Vec2::new(self.viewport_width, self.viewport_height) / 2.0;
        let projection =
            Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0);
        let view = Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, 0.0));
        projection * view
    }

    /// Left edge of the view in world units
    pub fn left(&self) -> f32 {
        self.position.x - self.viewport_width / 2.0
    }
}

/// Screen-space rectangle (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub pos: UVec2,
    pub size: UVec2,
}

/// Keeps the world aspect ratio, letterboxing the rest of the screen
#[derive(Debug, Clone, PartialEq)]
pub struct FitViewport {
    world_size: Vec2,
    screen: ScreenRect,
}

impl FitViewport {
    pub fn new(world_width: f32, world_height: f32) -> Self {
        Self {
            world_size: Vec2::new(world_width, world_height),
            screen: ScreenRect::default(),
        }
    }

    pub fn screen_rect(&self) -> ScreenRect {
        self.screen
    }

    /// Recompute the letterboxed area for a new screen size
    pub fn update(&mut self, screen_width: u32, screen_height: u32) {
        let screen = Vec2::new(screen_width as f32, screen_height as f32);
        let scale = (screen / self.world_size).min_element();
        let size = (self.world_size * scale).floor();
        let pos = ((screen - size) / 2.0).floor();
        self.screen = ScreenRect {
            pos: pos.as_uvec2(),
            size: size.as_uvec2(),
        };
    }

    /// Center `camera` on the world
    pub fn apply(&self, camera: &mut OrthographicCamera) {
        camera.viewport_width = self.world_size.x;
        camera.viewport_height = self.world_size.y;
        camera.position = self.world_size / 2.0;
    }
}

/// Map a world point through `projection` into `screen` (y down)
pub fn project(projection: &Mat4, screen: &ScreenRect, world: Vec2) -> Vec2 {
    let clip = *projection * world.extend(0.0).extend(1.0);
    let ndc = Vec2::new(clip.x, clip.y) / clip.w;
    let size = screen.size.as_vec2();
    Vec2::new(
        screen.pos.x as f32 + (ndc.x + 1.0) / 2.0 * size.x,
        screen.pos.y as f32 + (1.0 - ndc.y) / 2.0 * size.y,
    )
}
