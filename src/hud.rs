//! Heads-up display: score and level

use glam::Vec2;

use crate::consts::HEIGHT;
use crate::renderer::Batch;

/// Receiver of score and level changes from the simulation
pub trait Scoreboard {
    fn increase_score(&mut self, amount: u64);
    fn set_level(&mut self, level: u32);
}

/// Score/level display drawn over the play field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    score: u64,
    level: u32,
}

impl Hud {
    pub fn new(level: u32) -> Self {
        Self { score: 0, level }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Text shown in the top-left corner
    pub fn label(&self) -> String {
        format!("SCORE {:06}   LEVEL {}", self.score, self.level)
    }

    pub fn render(&self, batch: &mut dyn Batch) {
        batch.begin();
        batch.draw_text(&self.label(), Vec2::new(8.0, HEIGHT - 16.0));
        batch.end();
    }
}

impl Scoreboard for Hud {
    fn increase_score(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingBatch;

    #[test]
    fn test_score_accumulates() {
        let mut hud = Hud::new(1);
        hud.increase_score(1);
        hud.increase_score(10);
        assert_eq!(hud.score(), 11);
    }

    #[test]
    fn test_label() {
        let mut hud = Hud::new(1);
        hud.increase_score(42);
        hud.set_level(3);
        assert_eq!(hud.label(), "SCORE 000042   LEVEL 3");
    }

    #[test]
    fn test_render_draws_label() {
        let hud = Hud::new(2);
        let mut batch = RecordingBatch::new();
        hud.render(&mut batch);
        assert_eq!(batch.texts(), vec!["SCORE 000000   LEVEL 2"]);
    }
}
