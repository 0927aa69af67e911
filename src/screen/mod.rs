//! Screens and the active-screen slot
//!
//! A screen owns its camera and viewport through `ScreenBase`. Every frame
//! the host calls `render`, which runs the screen's `update`, prepares the
//! batch (clear, viewport, projection) and then lets the screen draw.
//! Lifecycle hooks default to no-ops.

pub mod menu;
pub mod play;

pub use menu::MenuScreen;
pub use play::PlayScreen;

use crate::consts::{HEIGHT, WIDTH};
use crate::renderer::{Batch, Color, FitViewport, OrthographicCamera};
use crate::settings::Settings;
use crate::sim::TickInput;

/// Input sampled for one frame (edge-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Click, tap, space or enter happened this frame
    pub action: bool,
    /// Escape pressed this frame
    pub cancel: bool,
}

impl From<InputSnapshot> for TickInput {
    fn from(input: InputSnapshot) -> Self {
        TickInput {
            drop_bomb: input.action,
            cancel: input.cancel,
        }
    }
}

/// Navigation request from a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Back to the menu, reporting the finished session's score
    Menu { score: u64 },
    /// Start a new play session
    Play,
    /// Leave the game
    Quit,
}

/// Camera and viewport shared by every screen
#[derive(Debug, Clone)]
pub struct ScreenBase {
    pub camera: OrthographicCamera,
    pub viewport: FitViewport,
}

impl Default for ScreenBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBase {
    /// Camera centered on the fixed logical resolution
    pub fn new() -> Self {
        let mut camera = OrthographicCamera::new(WIDTH, HEIGHT);
        let viewport = FitViewport::new(WIDTH, HEIGHT);
        viewport.apply(&mut camera);
        Self { camera, viewport }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.update(width, height);
    }

    /// Clear to black and point the batch at this screen's camera
    pub fn prepare(&self, batch: &mut dyn Batch) {
        batch.clear(Color::BLACK);
        batch.set_viewport(self.viewport.screen_rect());
        batch.set_projection(self.camera.combined());
    }
}

/// A full-screen game state driven by the host loop
pub trait Screen {
    fn base(&self) -> &ScreenBase;
    fn base_mut(&mut self) -> &mut ScreenBase;

    /// Advance by `dt` seconds. A returned transition abandons this screen.
    fn update(&mut self, dt: f32, input: &InputSnapshot) -> Option<Transition>;

    /// Issue draw calls for the current state
    fn draw(&self, batch: &mut dyn Batch);

    /// One frame: update, clear, then draw unless the screen is leaving
    fn render(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        batch: &mut dyn Batch,
    ) -> Option<Transition> {
        let transition = self.update(dt, input);
        if transition.is_none() {
            self.base().prepare(batch);
            self.draw(batch);
        }
        transition
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.base_mut().resize(width, height);
    }

    fn show(&mut self) {}

    fn hide(&mut self) {}

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn dispose(&mut self) {}
}

/// Holds the active screen and swaps it on transitions
pub struct ScreenManager {
    active: Box<dyn Screen>,
    settings: Settings,
    screen_size: (u32, u32),
    sessions: u64,
    last_score: Option<u64>,
    best_score: u64,
    running: bool,
}

impl ScreenManager {
    /// Start on the menu
    pub fn new(settings: Settings, screen_width: u32, screen_height: u32) -> Self {
        let mut active: Box<dyn Screen> = Box::new(MenuScreen::new(None, 0));
        active.resize(screen_width, screen_height);
        active.show();
        Self {
            active,
            settings,
            screen_size: (screen_width, screen_height),
            sessions: 0,
            last_score: None,
            best_score: 0,
            running: true,
        }
    }

    /// Whether the game has asked to quit
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn last_score(&self) -> Option<u64> {
        self.last_score
    }

    /// Play sessions started so far
    pub fn sessions(&self) -> u64 {
        self.sessions
    }

    /// Run one frame of the active screen and apply any transition
    pub fn render(&mut self, dt: f32, input: &InputSnapshot, batch: &mut dyn Batch) {
        if !self.running {
            return;
        }
        if let Some(transition) = self.active.render(dt, input, batch) {
            self.apply(transition);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen_size = (width, height);
        self.active.resize(width, height);
    }

    /// Forward a focus loss to the active screen
    pub fn pause(&mut self) {
        log::debug!("Paused");
        self.active.pause();
    }

    pub fn resume(&mut self) {
        log::debug!("Resumed");
        self.active.resume();
    }

    /// Tear down the active screen
    pub fn dispose(&mut self) {
        self.active.hide();
        self.active.dispose();
        self.running = false;
    }

    fn apply(&mut self, transition: Transition) {
        log::info!("Screen transition: {:?}", transition);
        let next: Box<dyn Screen> = match transition {
            Transition::Quit => {
                self.dispose();
                return;
            }
            Transition::Menu { score } => {
                self.last_score = Some(score);
                self.best_score = self.best_score.max(score);
                Box::new(MenuScreen::new(self.last_score, self.best_score))
            }
            Transition::Play => {
                let seed = self.next_seed();
                self.sessions += 1;
                log::info!("Session {} with seed {}", self.sessions, seed);
                Box::new(PlayScreen::new(seed, self.settings.tuning.clone()))
            }
        };

        self.active.hide();
        self.active.dispose();
        self.active = next;
        let (w, h) = self.screen_size;
        self.active.resize(w, h);
        self.active.show();
    }

    /// Configured seed offset by the session number, or a fresh random one
    fn next_seed(&self) -> u64 {
        match self.settings.seed {
            Some(seed) => seed.wrapping_add(self.sessions),
            None => rand::random(),
        }
    }
}
