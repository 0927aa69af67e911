//! The gameplay screen

use glam::Vec2;

use super::{InputSnapshot, Screen, ScreenBase, Transition};
use crate::assets::{BACKGROUND_SIZE, Sprite};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::hud::Hud;
use crate::renderer::Batch;
use crate::sim::{Flow, GameState, Rect, TickInput, tick};
use crate::tuning::Tuning;

pub struct PlayScreen {
    base: ScreenBase,
    state: GameState,
    hud: Hud,
    /// Left edge of the view, where the first background tile starts
    bg_position: f32,
    /// Wall-clock time not yet simulated
    accumulator: f32,
    /// One-shot input waiting for the next simulation step
    pending: TickInput,
    paused: bool,
}

impl PlayScreen {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let base = ScreenBase::new();
        let bg_position = base.camera.left();
        let state = GameState::new(seed, tuning);
        let hud = Hud::new(state.level);
        Self {
            base,
            state,
            hud,
            bg_position,
            accumulator: 0.0,
            pending: TickInput::default(),
            paused: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

impl Screen for PlayScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    /// Run as many fixed steps as the elapsed time allows
    fn update(&mut self, dt: f32, input: &InputSnapshot) -> Option<Transition> {
        if self.paused {
            return None;
        }
        let input = TickInput::from(*input);
        self.pending.drop_bomb |= input.drop_bomb;
        self.pending.cancel |= input.cancel;

        self.accumulator += dt.min(MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let flow = tick(&mut self.state, &mut self.hud, &self.pending, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending = TickInput::default();

            match flow {
                Flow::LevelCleared { level } => {
                    log::info!("Level {} reached, score {}", level, self.hud.score());
                }
                flow if flow.ends_session() => {
                    return Some(Transition::Menu {
                        score: self.hud.score(),
                    });
                }
                _ => {}
            }
        }
        None
    }

    fn draw(&self, batch: &mut dyn Batch) {
        batch.begin();

        // Two tiles side by side give a seamless loop
        let offset = self.state.bg_offset;
        for tile_x in [self.bg_position - offset, self.bg_position + BACKGROUND_SIZE.x - offset] {
            let dest = Rect::from_pos_size(Vec2::new(tile_x, 0.0), BACKGROUND_SIZE);
            batch.draw(Sprite::Background, 0, dest);
        }

        for ss in &self.state.skyscrapers {
            ss.render(batch);
        }
        for bomb in &self.state.bombs {
            bomb.render(batch);
        }
        self.state.bomber.render(batch);

        batch.end();

        self.hud.render(batch);
    }

    fn pause(&mut self) {
        log::debug!("Play paused at frame {}", self.state.frames);
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
        // Time spent unfocused is not simulated
        self.accumulator = 0.0;
    }

    fn dispose(&mut self) {
        self.state.dispose();
        log::debug!(
            "Play screen disposed, {} textures still live",
            self.state.assets.live_count()
        );
    }
}
