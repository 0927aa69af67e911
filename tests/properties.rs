//! Property tests for level generation and per-frame invariants

use bomber::consts::{MAX_BOMB_COUNT, MAX_SKYSCRAPER_COUNT};
use bomber::sim::{DESTROY_BONUS, Flow, GameState, HIT_POINTS, TickInput, bomber_start, floor_cap, tick};
use bomber::{Hud, Scoreboard, Tuning, floor_range_for_level, skyscraper_count_for_level};
use proptest::prelude::*;

fn standing_floors(state: &GameState) -> u64 {
    state.skyscrapers.iter().map(|ss| ss.floors() as u64).sum()
}

fn destroyed(state: &GameState) -> usize {
    state.skyscrapers.iter().filter(|ss| ss.is_destroyed()).count()
}

proptest! {
    #[test]
    fn world_matches_level_formulas(seed in any::<u64>(), level in 1u32..60) {
        let mut state = GameState::new(seed, Tuning::default());
        state.create_world(level);

        let expected = (3 + 2 * level as usize).min(MAX_SKYSCRAPER_COUNT);
        prop_assert_eq!(skyscraper_count_for_level(level), expected);
        prop_assert_eq!(state.skyscrapers.len(), expected);
        prop_assert_eq!(state.ss_count, expected);

        let (lo, hi) = floor_range_for_level(level);
        prop_assert_eq!((lo, hi), (level, 1 + 2 * level));
        // Tall levels are capped below the bomber's starting lane
        let hi = hi.min(floor_cap(&state.tuning));
        let lo = lo.min(hi);
        for ss in &state.skyscrapers {
            prop_assert!(ss.floors() >= lo && ss.floors() <= hi);
            prop_assert!(ss.bounds().max().y <= bomber_start().y);
        }
    }

    #[test]
    fn frame_invariants_hold(
        seed in any::<u64>(),
        frames in prop::collection::vec((any::<bool>(), 0.0f32..0.1), 1..300),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        let mut hud = Hud::new(1);

        for (drop_bomb, dt) in frames {
            let level = state.level;
            let ss_count = state.ss_count;
            let floors = standing_floors(&state);
            let fallen = destroyed(&state);
            let score = hud.score();

            let input = TickInput { drop_bomb, cancel: false };
            let flow = tick(&mut state, &mut hud, &input, dt);

            prop_assert!(state.bombs.len() <= MAX_BOMB_COUNT);
            prop_assert!(hud.score() >= score);

            match flow {
                Flow::Crashed => break,
                Flow::Cancelled => unreachable!("cancel never pressed"),
                Flow::LevelCleared { level: next } => {
                    prop_assert_eq!(next, level + 1);
                    prop_assert_eq!(state.ss_count, skyscraper_count_for_level(next));
                    prop_assert_eq!(hud.level(), next);
                }
                Flow::Continue => {
                    prop_assert_eq!(state.level, level);
                    prop_assert!(state.ss_count <= ss_count);
                    let hits = floors - standing_floors(&state);
                    let newly_destroyed = (destroyed(&state) - fallen) as u64;
                    prop_assert_eq!(ss_count - state.ss_count, newly_destroyed as usize);
                    prop_assert_eq!(
                        hud.score() - score,
                        hits * HIT_POINTS + newly_destroyed * DESTROY_BONUS
                    );
                }
            }
        }
    }

    #[test]
    fn spawning_is_capped(seed in any::<u64>(), attempts in 0usize..20) {
        let mut state = GameState::new(seed, Tuning::default());
        let spawned = (0..attempts).filter(|_| state.try_spawn_bomb()).count();
        prop_assert_eq!(spawned, attempts.min(MAX_BOMB_COUNT));
        prop_assert_eq!(state.bombs.len(), attempts.min(MAX_BOMB_COUNT));
    }
}

#[test]
fn hud_scoreboard_is_saturating() {
    let mut hud = Hud::new(1);
    hud.increase_score(u64::MAX);
    hud.increase_score(1);
    assert_eq!(hud.score(), u64::MAX);
}
