//! Deterministic gameplay module
//!
//! All gameplay logic lives here:
//! - Explicit frame delta, no clocks
//! - Seeded RNG only
//! - Input arrives as a per-frame snapshot
//! - No terminal or platform dependencies

pub mod bomb;
pub mod bomber;
pub mod bounds;
pub mod skyscraper;
pub mod state;
pub mod tick;

pub use bomb::Bomb;
pub use bomber::Bomber;
pub use bounds::Rect;
pub use skyscraper::Skyscraper;
pub use state::{GameState, bomber_start, floor_cap, skyscraper_slots};
pub use tick::{DESTROY_BONUS, Flow, HIT_POINTS, TickInput, tick};
