//! Data-driven game balance
//!
//! Entity speeds and sizes. Level formulas and caps stay in `consts`.

use serde::{Deserialize, Serialize};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal bomber speed (units/s)
    pub bomber_speed: f32,
    /// How far the bomber sinks each time it wraps to a new lane
    pub row_drop: f32,
    /// Initial downward bomb speed (units/s)
    pub bomb_speed: f32,
    /// Downward bomb acceleration (units/s²)
    pub bomb_gravity: f32,
    /// Height of one skyscraper floor
    pub floor_height: f32,
    /// Width of every skyscraper
    pub skyscraper_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bomber_speed: 160.0,
            row_drop: 24.0,
            bomb_speed: 120.0,
            bomb_gravity: 360.0,
            floor_height: 16.0,
            skyscraper_width: 48.0,
        }
    }
}

impl Tuning {
    /// Name of the first field that is not strictly positive, if any
    pub fn first_invalid(&self) -> Option<&'static str> {
        let fields = [
            ("bomber_speed", self.bomber_speed),
            ("row_drop", self.row_drop),
            ("bomb_speed", self.bomb_speed),
            ("bomb_gravity", self.bomb_gravity),
            ("floor_height", self.floor_height),
            ("skyscraper_width", self.skyscraper_width),
        ];
        fields
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
            .map(|(name, _)| name)
    }
}
