//! Skyscrapers: stacks of floors standing on the ground
//!
//! Every bomb that lands takes one floor off the top. A skyscraper with no
//! floors left is destroyed and no longer collides with anything.

use super::bounds::Rect;
use crate::assets::{Assets, Sprite, TextureHandle};
use crate::renderer::Batch;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Skyscraper {
    /// Left edge
    x: f32,
    floors: u32,
    initial_floors: u32,
    width: f32,
    floor_height: f32,
    texture: Option<TextureHandle>,
}

impl Skyscraper {
    pub fn new(assets: &mut Assets, x: f32, floors: u32, tuning: &Tuning) -> Self {
        Self {
            x,
            floors,
            initial_floors: floors,
            width: tuning.skyscraper_width,
            floor_height: tuning.floor_height,
            texture: Some(assets.acquire(Sprite::Skyscraper)),
        }
    }

    /// Floors still standing
    pub fn floors(&self) -> u32 {
        self.floors
    }

    /// Height the skyscraper was generated with
    pub fn initial_floors(&self) -> u32 {
        self.initial_floors
    }

    pub fn is_destroyed(&self) -> bool {
        self.floors == 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.floors as f32 * self.floor_height)
    }

    /// Whether `other` touches what is left of the building
    pub fn collides(&self, other: &Rect) -> bool {
        !self.is_destroyed() && self.bounds().overlaps(other)
    }

    /// Knock off the top floor. Returns true if this hit destroyed it.
    pub fn hit(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.floors -= 1;
        self.is_destroyed()
    }

    pub fn render(&self, batch: &mut dyn Batch) {
        if !self.is_destroyed() {
            // Frame 1 marks buildings that have taken damage
            let frame = usize::from(self.floors < self.initial_floors);
            batch.draw(Sprite::Skyscraper, frame, self.bounds());
        }
    }

    pub fn dispose(&mut self, assets: &mut Assets) {
        if let Some(texture) = self.texture.take() {
            assets.release(texture);
        }
    }
}
