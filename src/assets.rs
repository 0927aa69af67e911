//! Sprite catalogue and texture bookkeeping
//!
//! Entities acquire a handle when created and give it back through
//! `dispose`. The registry tracks what is still live so leaks and double
//! releases show up in tests and logs.

use std::collections::HashMap;

use glam::Vec2;

use crate::consts::{HEIGHT, WIDTH};

/// Bomber sprite size
pub const BOMBER_SIZE: Vec2 = Vec2::new(64.0, 24.0);
/// Bomb sprite size
pub const BOMB_SIZE: Vec2 = Vec2::new(8.0, 12.0);
/// Background image size (one tile)
pub const BACKGROUND_SIZE: Vec2 = Vec2::new(WIDTH, HEIGHT);

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Bomber,
    Bomb,
    Skyscraper,
}

/// A live reference to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    id: u32,
    sprite: Sprite,
}

/// Texture registry
#[derive(Debug, Default)]
pub struct Assets {
    live: HashMap<u32, Sprite>,
    next_id: u32,
    released: u64,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or reference) the texture for `sprite`
    pub fn acquire(&mut self, sprite: Sprite) -> TextureHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(id, sprite);
        TextureHandle { id, sprite }
    }

    /// Release a handle. Returns false if it was not live.
    pub fn release(&mut self, handle: TextureHandle) -> bool {
        if self.live.remove(&handle.id).is_some() {
            self.released += 1;
            true
        } else {
            log::warn!("Texture {:?}#{} released twice", handle.sprite, handle.id);
            false
        }
    }

    /// Number of handles not yet released
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of live handles for one sprite kind
    pub fn live_count_of(&self, sprite: Sprite) -> usize {
        self.live.values().filter(|s| **s == sprite).count()
    }

    /// Total successful releases since creation
    pub fn released_count(&self) -> u64 {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release() {
        let mut assets = Assets::new();
        let a = assets.acquire(Sprite::Bomb);
        let b = assets.acquire(Sprite::Bomb);
        assert_ne!(a, b);
        assert_eq!(assets.live_count_of(Sprite::Bomb), 2);

        assert!(assets.release(a));
        assert_eq!(assets.live_count(), 1);
        assert!(assets.release(b));
        assert_eq!(assets.live_count(), 0);
        assert_eq!(assets.released_count(), 1);
    }

    #[test]
    fn test_double_release_is_refused() {
        let mut assets = Assets::new();
        let handle = assets.acquire(Sprite::Background);
        assert!(assets.release(handle));
        assert!(!assets.release(handle));
        assert_eq!(assets.released_count(), 1);
    }
}
