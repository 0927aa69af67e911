//! Per-frame simulation update
//!
//! Order within a frame: input, background, bomber, collisions and
//! scoring, level completion, bomb motion.

use super::state::GameState;
use crate::consts::WIDTH;
use crate::hud::Scoreboard;

/// Points for every bomb that lands on a skyscraper
pub const HIT_POINTS: u64 = 1;
/// Bonus for bringing a skyscraper down completely
pub const DESTROY_BONUS: u64 = 10;

/// Input commands for a single frame (edge-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Primary action this frame (click/tap/space): drop a bomb
    pub drop_bomb: bool,
    /// Cancel pressed this frame: abandon the session
    pub cancel: bool,
}

/// What the frame did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep playing
    Continue,
    /// Every skyscraper fell; the world was rebuilt for `level`
    LevelCleared { level: u32 },
    /// The bomber flew into a skyscraper
    Crashed,
    /// The player asked to leave
    Cancelled,
}

impl Flow {
    /// Whether the session is over
    pub fn ends_session(&self) -> bool {
        matches!(self, Flow::Crashed | Flow::Cancelled)
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(
    state: &mut GameState,
    scoreboard: &mut impl Scoreboard,
    input: &TickInput,
    dt: f32,
) -> Flow {
    if input.drop_bomb && !state.try_spawn_bomb() {
        log::trace!("Bomb ignored, {} already falling", state.bombs.len());
    }
    if input.cancel {
        log::info!("Session cancelled at level {}", state.level);
        return Flow::Cancelled;
    }

    state.frames += 1;
    state.scroll_background(dt);

    state.bomber.update(dt);
    if state.bomber.position().x > WIDTH {
        state.bomber.next_row();
    }

    if resolve_collisions(state, scoreboard) {
        log::info!(
            "Bomber crashed at level {} ({} skyscrapers left)",
            state.level,
            state.ss_count
        );
        return Flow::Crashed;
    }

    let mut flow = Flow::Continue;
    if state.ss_count == 0 {
        state.level += 1;
        scoreboard.set_level(state.level);
        state.create_world(state.level);
        flow = Flow::LevelCleared { level: state.level };
    }

    let GameState { bombs, assets, .. } = state;
    bombs.retain_mut(|bomb| {
        bomb.update(dt);
        if bomb.is_out_of_bounds() {
            bomb.dispose(assets);
            false
        } else {
            true
        }
    });

    flow
}

/// Skyscrapers against the bomber, then against every bomb.
///
/// Returns true as soon as the bomber hits a skyscraper; skyscrapers after
/// that one are left untouched for this frame.
fn resolve_collisions(state: &mut GameState, scoreboard: &mut impl Scoreboard) -> bool {
    let GameState {
        bomber,
        skyscrapers,
        bombs,
        assets,
        ss_count,
        ..
    } = state;
    let bomber_bounds = bomber.bounds();

    for ss in skyscrapers.iter_mut() {
        if ss.collides(&bomber_bounds) {
            return true;
        }
        bombs.retain_mut(|bomb| {
            if !ss.collides(&bomb.bounds()) {
                return true;
            }
            scoreboard.increase_score(HIT_POINTS);
            bomb.dispose(assets);
            if ss.hit() {
                *ss_count = ss_count.saturating_sub(1);
                scoreboard.increase_score(DESTROY_BONUS);
            }
            false
        });
    }
    false
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::assets::Sprite;
    use crate::hud::Hud;
    use crate::sim::skyscraper::Skyscraper;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 30.0;

    /// State with a single skyscraper of `floors` at `x`
    fn lone_tower(x: f32, floors: u32) -> GameState {
        let mut state = GameState::new(9, Tuning::default());
        for ss in &mut state.skyscrapers {
            ss.dispose(&mut state.assets);
        }
        let tower = Skyscraper::new(&mut state.assets, x, floors, &state.tuning);
        state.skyscrapers = vec![tower];
        state.ss_count = 1;
        state
    }

    #[test]
    fn test_drop_bomb_spawns_one() {
        let mut state = GameState::new(1, Tuning::default());
        let mut hud = Hud::new(1);
        let input = TickInput {
            drop_bomb: true,
            ..Default::default()
        };
        tick(&mut state, &mut hud, &input, DT);
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_bomb_cap_holds_under_spam() {
        let mut state = GameState::new(1, Tuning::default());
        let mut hud = Hud::new(1);
        let input = TickInput {
            drop_bomb: true,
            ..Default::default()
        };
        for _ in 0..4 {
            tick(&mut state, &mut hud, &input, 0.0);
        }
        assert_eq!(state.bombs.len(), 3);
    }

    #[test]
    fn test_cancel_ends_session() {
        let mut state = GameState::new(1, Tuning::default());
        let mut hud = Hud::new(1);
        let input = TickInput {
            cancel: true,
            ..Default::default()
        };
        let flow = tick(&mut state, &mut hud, &input, DT);
        assert_eq!(flow, Flow::Cancelled);
        assert!(flow.ends_session());
        assert_eq!(state.frames, 0);
    }

    #[test]
    fn test_bomber_wraps_to_next_row() {
        let mut state = GameState::new(1, Tuning::default());
        // No skyscrapers in the way up here
        state.bomber.set_position(Vec2::new(WIDTH - 1.0, 430.0));
        let mut hud = Hud::new(1);
        tick(&mut state, &mut hud, &TickInput::default(), DT);
        assert_eq!(state.bomber.row(), 1);
        assert!(state.bomber.position().x < 0.0);
    }

    #[test]
    fn test_crash_stops_frame() {
        let mut state = lone_tower(100.0, 5);
        state.bomber.set_position(Vec2::new(90.0, 10.0));
        state.try_spawn_bomb();
        let bomb_y = state.bombs[0].position().y;
        let mut hud = Hud::new(1);

        let flow = tick(&mut state, &mut hud, &TickInput::default(), DT);
        assert_eq!(flow, Flow::Crashed);
        assert_eq!(hud.score(), 0);
        // Bombs were not advanced
        assert_eq!(state.bombs[0].position().y, bomb_y);
    }

    #[test]
    fn test_hit_scores_and_removes_bomb() {
        let mut state = lone_tower(300.0, 3);
        // Park the bomber high above and to the left
        state.bomber.set_position(Vec2::new(0.0, 430.0));
        state.try_spawn_bomb();
        // Teleport the bomb onto the roof
        let mut bomb = state.bombs.pop().unwrap();
        bomb.dispose(&mut state.assets);
        state.bombs.push(crate::sim::Bomb::new(
            &mut state.assets,
            Vec2::new(320.0, 50.0),
            &state.tuning,
        ));
        let mut hud = Hud::new(1);

        let flow = tick(&mut state, &mut hud, &TickInput::default(), 0.0);
        assert_eq!(flow, Flow::Continue);
        assert_eq!(hud.score(), HIT_POINTS);
        assert!(state.bombs.is_empty());
        assert_eq!(state.skyscrapers[0].floors(), 2);
        assert_eq!(state.ss_count, 1);
        assert_eq!(state.assets.live_count_of(Sprite::Bomb), 0);
    }

    #[test]
    fn test_last_floor_clears_level() {
        let mut state = lone_tower(300.0, 1);
        state.bombs.push(crate::sim::Bomb::new(
            &mut state.assets,
            Vec2::new(320.0, 10.0),
            &state.tuning,
        ));
        let mut hud = Hud::new(1);

        let flow = tick(&mut state, &mut hud, &TickInput::default(), 0.0);
        assert_eq!(flow, Flow::LevelCleared { level: 2 });
        assert_eq!(hud.score(), HIT_POINTS + DESTROY_BONUS);
        assert_eq!(hud.level(), 2);
        assert_eq!(state.level, 2);
        assert_eq!(state.skyscrapers.len(), 7);
        assert_eq!(state.ss_count, 7);
    }

    #[test]
    fn test_two_bombs_one_floor_no_double_bonus() {
        let mut state = lone_tower(300.0, 1);
        // A second standing tower keeps the level from ending
        let other = Skyscraper::new(&mut state.assets, 600.0, 4, &state.tuning);
        state.skyscrapers.push(other);
        state.ss_count = 2;
        for x in [316.0, 328.0] {
            state.bombs.push(crate::sim::Bomb::new(
                &mut state.assets,
                Vec2::new(x, 10.0),
                &state.tuning,
            ));
        }
        let mut hud = Hud::new(1);

        tick(&mut state, &mut hud, &TickInput::default(), 0.0);
        assert_eq!(hud.score(), HIT_POINTS + DESTROY_BONUS);
        assert_eq!(state.ss_count, 1);
        // The second bomb fell through the rubble and is still live
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_bomb_removed_below_threshold() {
        let mut state = GameState::new(1, Tuning::default());
        for ss in &mut state.skyscrapers {
            ss.dispose(&mut state.assets);
        }
        state.skyscrapers.clear();
        state.ss_count = 1; // keep the level alive without buildings
        state.bombs.push(crate::sim::Bomb::new(
            &mut state.assets,
            Vec2::new(100.0, -990.0),
            &state.tuning,
        ));
        let mut hud = Hud::new(1);

        tick(&mut state, &mut hud, &TickInput::default(), 0.1);
        assert!(state.bombs.is_empty());
        assert_eq!(state.assets.live_count_of(Sprite::Bomb), 0);
        assert_eq!(hud.score(), 0);
    }
}
