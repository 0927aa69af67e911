//! Bomber - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (entities, world generation, per-frame update)
//! - `screen`: Screen lifecycle and the active-screen slot
//! - `renderer`: Camera/viewport math and the terminal sprite batch
//! - `assets`: Sprite sizes and texture handle bookkeeping
//! - `settings` / `tuning`: Data-driven configuration

pub mod assets;
pub mod hud;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use hud::{Hud, Scoreboard};
pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical resolution (world units, y grows upward from the ground)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 480.0;

    /// Maximum number of skyscrapers generated for a level
    pub const MAX_SKYSCRAPER_COUNT: usize = 11;
    /// Maximum number of bombs falling at the same time
    pub const MAX_BOMB_COUNT: usize = 3;

    /// Background scroll speed (world units per second)
    pub const BACKGROUND_SPEED: f32 = 2.0;

    /// Distance of the bomber's starting lane below the top edge
    pub const BOMBER_START_DROP: f32 = 50.0;

    /// Bombs at or below this height are gone for good
    pub const BOMB_REMOVAL_Y: f32 = -1000.0;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Substeps allowed per rendered frame, enough to cover `MAX_FRAME_DT`
    pub const MAX_SUBSTEPS: u32 = 12;

    /// Upper bound on the wall-clock time fed to the accumulator in one frame.
    /// Time lost to a longer stall is dropped, not simulated.
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Number of skyscrapers generated for `level`
#[inline]
pub fn skyscraper_count_for_level(level: u32) -> usize {
    (3 + 2 * level as usize).min(consts::MAX_SKYSCRAPER_COUNT)
}

/// Inclusive floor range a skyscraper's height is sampled from at `level`,
/// before the cap in `sim::floor_cap`
#[inline]
pub fn floor_range_for_level(level: u32) -> (u32, u32) {
    (level, 1 + 2 * level)
}
