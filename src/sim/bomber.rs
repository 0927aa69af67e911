//! The player's bomber
//!
//! Flies right at constant speed. Each time it leaves the right edge it
//! re-enters from the left one lane lower.

use glam::Vec2;

use super::bounds::Rect;
use crate::assets::{Assets, BOMBER_SIZE, Sprite, TextureHandle};
use crate::renderer::Batch;
use crate::tuning::Tuning;

/// Seconds per propeller frame
pub const FRAME_TIME: f32 = 0.15;
/// Number of propeller frames
pub const FRAME_COUNT: usize = 2;

#[derive(Debug, Clone)]
pub struct Bomber {
    /// Lower-left corner of the sprite
    pos: Vec2,
    /// Lanes descended since the last reposition
    row: u32,
    speed: f32,
    row_drop: f32,
    anim_time: f32,
    frame: usize,
    texture: Option<TextureHandle>,
}

impl Bomber {
    pub fn new(assets: &mut Assets, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            row: 0,
            speed: tuning.bomber_speed,
            row_drop: tuning.row_drop,
            anim_time: 0.0,
            frame: 0,
            texture: Some(assets.acquire(Sprite::Bomber)),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Move to `pos` and forget lanes descended so far
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.row = 0;
    }

    /// Where a dropped bomb starts: centered under the fuselage
    pub fn bomb_release_point(&self) -> Vec2 {
        Vec2::new(self.pos.x + BOMBER_SIZE.x / 2.0, self.pos.y)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x += self.speed * dt;

        self.anim_time += dt;
        while self.anim_time >= FRAME_TIME {
            self.anim_time -= FRAME_TIME;
            self.frame = (self.frame + 1) % FRAME_COUNT;
        }
    }

    /// Wrap back to the left edge, one lane lower
    pub fn next_row(&mut self) {
        self.pos.x = -BOMBER_SIZE.x;
        self.pos.y -= self.row_drop;
        self.row += 1;
        log::debug!("Bomber lane {} at y={}", self.row, self.pos.y);
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, BOMBER_SIZE)
    }

    pub fn render(&self, batch: &mut dyn Batch) {
        batch.draw(Sprite::Bomber, self.frame, self.bounds());
    }

    pub fn dispose(&mut self, assets: &mut Assets) {
        if let Some(texture) = self.texture.take() {
            assets.release(texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bomber(assets: &mut Assets) -> Bomber {
        Bomber::new(assets, Vec2::new(0.0, 430.0), &Tuning::default())
    }

    #[test]
    fn test_update_moves_right() {
        let mut assets = Assets::new();
        let mut b = bomber(&mut assets);
        b.update(0.5);
        assert!((b.position().x - Tuning::default().bomber_speed * 0.5).abs() < 1e-4);
        assert_eq!(b.position().y, 430.0);
    }

    #[test]
    fn test_next_row_descends_and_wraps() {
        let mut assets = Assets::new();
        let mut b = bomber(&mut assets);
        b.update(10.0);
        b.next_row();
        assert_eq!(b.row(), 1);
        assert_eq!(b.position().x, -BOMBER_SIZE.x);
        assert_eq!(b.position().y, 430.0 - Tuning::default().row_drop);

        b.set_position(Vec2::new(0.0, 430.0));
        assert_eq!(b.row(), 0);
    }

    #[test]
    fn test_animation_cycles() {
        let mut assets = Assets::new();
        let mut b = bomber(&mut assets);
        assert_eq!(b.frame(), 0);
        b.update(FRAME_TIME);
        assert_eq!(b.frame(), 1);
        b.update(FRAME_TIME);
        assert_eq!(b.frame(), 0);
    }

    #[test]
    fn test_dispose_once() {
        let mut assets = Assets::new();
        let mut b = bomber(&mut assets);
        assert_eq!(assets.live_count(), 1);
        b.dispose(&mut assets);
        b.dispose(&mut assets);
        assert_eq!(assets.live_count(), 0);
        assert_eq!(assets.released_count(), 1);
    }
}
