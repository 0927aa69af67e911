//! Game state and world generation
//!
//! Everything a play session simulates lives here. Heights come from a
//! seeded RNG so a seed plus an input sequence replays exactly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bomb::Bomb;
use super::bomber::Bomber;
use super::skyscraper::Skyscraper;
use crate::assets::{Assets, BACKGROUND_SIZE, Sprite, TextureHandle};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{floor_range_for_level, skyscraper_count_for_level};

/// Where the bomber starts every level
pub fn bomber_start() -> Vec2 {
    Vec2::new(0.0, HEIGHT - BOMBER_START_DROP)
}

/// Most floors a skyscraper can have without reaching the bomber's starting lane
pub fn floor_cap(tuning: &Tuning) -> u32 {
    ((bomber_start().y / tuning.floor_height).floor() as u32).max(1)
}

/// Left edges of `count` skyscrapers spread evenly across the screen
///
/// The screen is cut into `count` slots of equal integer width; the space
/// the slots leave over is shared out as a leading gap.
pub fn skyscraper_slots(count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let width = WIDTH as i32;
    let count = count as i32;
    let pos = width / count;
    let gap = (width - (count - 1) * pos) / count;
    (0..count).map(|i| (gap + i * pos) as f32).collect()
}

/// Complete play session state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    /// Skyscrapers still standing in this level
    pub ss_count: usize,
    pub bomber: Bomber,
    /// Rebuilt every level
    pub skyscrapers: Vec<Skyscraper>,
    /// Live bombs, at most `MAX_BOMB_COUNT`
    pub bombs: Vec<Bomb>,
    /// Horizontal background scroll, wraps at the background width
    pub bg_offset: f32,
    /// Frames simulated this session
    pub frames: u64,
    pub tuning: Tuning,
    pub assets: Assets,
    background: Option<TextureHandle>,
}

impl GameState {
    /// Start a session at level 1
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut assets = Assets::new();
        let background = Some(assets.acquire(Sprite::Background));
        let bomber = Bomber::new(&mut assets, bomber_start(), &tuning);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            ss_count: 0,
            bomber,
            skyscrapers: Vec::new(),
            bombs: Vec::new(),
            bg_offset: 0.0,
            frames: 0,
            tuning,
            assets,
            background,
        };
        state.create_world(1);
        state
    }

    /// Build the skyline for `level` and put the bomber back at the start
    pub fn create_world(&mut self, level: u32) {
        for ss in &mut self.skyscrapers {
            ss.dispose(&mut self.assets);
        }
        self.skyscrapers.clear();

        let count = skyscraper_count_for_level(level);
        let (min_floors, max_floors) = floor_range_for_level(level);
        let max_floors = max_floors.min(floor_cap(&self.tuning));
        let min_floors = min_floors.min(max_floors);
        for x in skyscraper_slots(count) {
            let floors = self.rng.random_range(min_floors..=max_floors);
            let ss = Skyscraper::new(&mut self.assets, x, floors, &self.tuning);
            self.skyscrapers.push(ss);
        }
        self.ss_count = count;

        self.bomber.set_position(bomber_start());
        self.clear_bombs();

        log::info!("Level {}: {} skyscrapers", level, count);
        log::debug!(
            "Level {} floors: {:?}",
            level,
            self.skyscrapers.iter().map(|s| s.floors()).collect::<Vec<_>>()
        );
    }

    /// Drop a bomb from the bomber unless the cap is reached
    ///
    /// Returns whether a bomb was spawned.
    pub fn try_spawn_bomb(&mut self) -> bool {
        if self.bombs.len() >= MAX_BOMB_COUNT {
            return false;
        }
        let release = self.bomber.bomb_release_point();
        let bomb = Bomb::new(&mut self.assets, release, &self.tuning);
        self.bombs.push(bomb);
        true
    }

    /// Advance the background scroll, looping over one tile width
    pub fn scroll_background(&mut self, dt: f32) {
        self.bg_offset += BACKGROUND_SPEED * dt;
        if self.bg_offset > BACKGROUND_SIZE.x {
            self.bg_offset = 0.0;
        }
    }

    fn clear_bombs(&mut self) {
        for bomb in &mut self.bombs {
            bomb.dispose(&mut self.assets);
        }
        self.bombs.clear();
    }

    /// Release every texture the session holds
    pub fn dispose(&mut self) {
        if let Some(background) = self.background.take() {
            self.assets.release(background);
        }
        self.bomber.dispose(&mut self.assets);
        for ss in &mut self.skyscrapers {
            ss.dispose(&mut self.assets);
        }
        self.clear_bombs();
    }
}
