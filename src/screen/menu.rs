//! Title menu shown between sessions

use glam::Vec2;

use super::{InputSnapshot, Screen, ScreenBase, Transition};
use crate::assets::{BACKGROUND_SIZE, Sprite};
use crate::consts::HEIGHT;
use crate::renderer::Batch;
use crate::sim::Rect;

pub struct MenuScreen {
    base: ScreenBase,
    last_score: Option<u64>,
    best_score: u64,
}

impl MenuScreen {
    pub fn new(last_score: Option<u64>, best_score: u64) -> Self {
        Self {
            base: ScreenBase::new(),
            last_score,
            best_score,
        }
    }

    /// Lines of text, top to bottom
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["B O M B E R".to_string()];
        if let Some(score) = self.last_score {
            lines.push(format!("LAST SCORE {score}"));
        }
        if self.best_score > 0 {
            lines.push(format!("BEST SCORE {}", self.best_score));
        }
        lines.push("SPACE / CLICK : PLAY".to_string());
        lines.push("ESC : QUIT".to_string());
        lines
    }
}

impl Screen for MenuScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn update(&mut self, _dt: f32, input: &InputSnapshot) -> Option<Transition> {
        if input.action {
            Some(Transition::Play)
        } else if input.cancel {
            Some(Transition::Quit)
        } else {
            None
        }
    }

    fn draw(&self, batch: &mut dyn Batch) {
        batch.begin();
        batch.draw(
            Sprite::Background,
            0,
            Rect::from_pos_size(Vec2::ZERO, BACKGROUND_SIZE),
        );
        let mut y = HEIGHT * 0.7;
        for line in self.lines() {
            batch.draw_text(&line, Vec2::new(260.0, y));
            y -= 40.0;
        }
        batch.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_without_history() {
        let menu = MenuScreen::new(None, 0);
        assert_eq!(menu.lines().len(), 3);
    }

    #[test]
    fn test_lines_with_scores() {
        let menu = MenuScreen::new(Some(12), 40);
        let lines = menu.lines();
        assert!(lines.contains(&"LAST SCORE 12".to_string()));
        assert!(lines.contains(&"BEST SCORE 40".to_string()));
    }

    #[test]
    fn test_inputs() {
        let mut menu = MenuScreen::new(None, 0);
        assert_eq!(menu.update(0.0, &InputSnapshot::default()), None);
        let play = InputSnapshot {
            action: true,
            cancel: true,
        };
        assert_eq!(menu.update(0.0, &play), Some(Transition::Play));
        let quit = InputSnapshot {
            cancel: true,
            ..Default::default()
        };
        assert_eq!(menu.update(0.0, &quit), Some(Transition::Quit));
    }
}
