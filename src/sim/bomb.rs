//! Bombs dropped by the bomber

use glam::Vec2;

use super::bounds::Rect;
use crate::assets::{Assets, BOMB_SIZE, Sprite, TextureHandle};
use crate::consts::BOMB_REMOVAL_Y;
use crate::renderer::Batch;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Bomb {
    /// Lower-left corner
    pos: Vec2,
    /// Downward speed (positive = falling)
    fall_speed: f32,
    gravity: f32,
    texture: Option<TextureHandle>,
}

impl Bomb {
    /// Spawn a bomb whose top-center sits at `release`
    pub fn new(assets: &mut Assets, release: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(release.x - BOMB_SIZE.x / 2.0, release.y - BOMB_SIZE.y),
            fall_speed: tuning.bomb_speed,
            gravity: tuning.bomb_gravity,
            texture: Some(assets.acquire(Sprite::Bomb)),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn update(&mut self, dt: f32) {
        self.fall_speed += self.gravity * dt;
        self.pos.y -= self.fall_speed * dt;
    }

    /// Fallen far enough below the ground to be dropped
    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y <= BOMB_REMOVAL_Y
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, BOMB_SIZE)
    }

    pub fn render(&self, batch: &mut dyn Batch) {
        batch.draw(Sprite::Bomb, 0, self.bounds());
    }

    pub fn dispose(&mut self, assets: &mut Assets) {
        if let Some(texture) = self.texture.take() {
            assets.release(texture);
        }
    }
}
