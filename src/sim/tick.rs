//! Game state machine and fixed-step pop animation
//!
//! The host owns the `GameState` and calls everything here from one
//! place: `set_viewport` and `handle_tap` as platform events arrive,
//! `tick` from its frame loop. No call blocks; pop animations advance
//! asynchronously relative to the tap that started them.

use glam::Vec2;

use super::geometry::{hover_offset_x, oval_contains};
use super::layout::generate_balloons;
use super::state::{BalloonSprite, GameEvent, GameState, PopClock};
use crate::consts::{POP_FRAME_SECS, POP_STEP_COUNT};

/// Record the viewport and populate the board on the first valid resize
///
/// Non-positive dimensions are ignored outright. Later resizes update the
/// recorded extents but never regenerate the board.
pub fn set_viewport(state: &mut GameState, width: f32, height: f32) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    state.viewport = Vec2::new(width, height);
    if state.initialized {
        return;
    }
    populate_board(state);
}

/// Hit-test a tap and start a pop on the topmost idle balloon under it
///
/// `hover_phase` is the renderer's hover clock in [0, 1); the test sways
/// each center by the same offset the renderer draws with, so pass `None`
/// only when the renderer holds balloons still. Returns true when a pop
/// starts - the host's cue for the pop sound. A tap on empty space or on
/// a balloon that is already popping changes nothing.
pub fn handle_tap(state: &mut GameState, tap: Vec2, hover_phase: Option<f32>) -> bool {
    // Later sprites render on top, so scan newest-first
    let hit = state.sprites.iter_mut().rev().find(|sprite| {
        if sprite.popping {
            return false;
        }
        let sway = hover_phase
            .map(|phase| hover_offset_x(sprite.balloon.id, phase))
            .unwrap_or(0.0);
        let center = sprite.balloon.pos + Vec2::new(sway, 0.0);
        oval_contains(center, sprite.balloon.width, sprite.balloon.height, tap)
    });

    let Some(sprite) = hit else {
        return false;
    };
    sprite.popping = true;
    sprite.pop_progress = 0.0;
    let id = sprite.balloon.id;

    state.pops.push(PopClock::new(id));
    state.events.push(GameEvent::PopStarted { id });
    log::debug!("pop started on balloon {id}");
    true
}

/// Throw away the current board and lay out a fresh one
///
/// A no-op until a valid viewport has been seen. In-flight pop clocks die
/// with the board they belonged to, so a regenerated balloon that reuses
/// an id can never be consumed by a stale animation.
pub fn restore(state: &mut GameState) {
    if !state.has_viewport() {
        return;
    }
    state.generation = state.generation.wrapping_add(1);
    state.pops.clear();
    populate_board(state);
    state.events.push(GameEvent::BoardRestored);
}

/// Advance every active pop by `dt` seconds
///
/// Each clock accumulates time independently and applies whole animation
/// steps, landing progress on step / POP_STEP_COUNT, so concurrent pops
/// never interfere. On the final step the sprite is removed and counted.
/// A clock whose sprite is gone no-ops on its presence check and is
/// discarded.
pub fn tick(state: &mut GameState, dt: f32) {
    if state.pops.is_empty() {
        return;
    }

    let mut pops = std::mem::take(&mut state.pops);
    for clock in &mut pops {
        clock.elapsed += dt;
        let steps = (clock.elapsed / POP_FRAME_SECS) as u32;
        clock.steps_done = steps.min(POP_STEP_COUNT);
        apply_progress(state, clock);
    }
    pops.retain(|clock| {
        if clock.steps_done < POP_STEP_COUNT {
            return true;
        }
        finish_pop(state, clock.balloon_id);
        false
    });
    state.pops = pops;
}

/// Write a clock's progress onto its sprite, if the sprite still exists
fn apply_progress(state: &mut GameState, clock: &PopClock) {
    if let Some(sprite) = state
        .sprites
        .iter_mut()
        .find(|s| s.balloon.id == clock.balloon_id && s.popping)
    {
        sprite.pop_progress = clock.steps_done as f32 / POP_STEP_COUNT as f32;
    }
}

/// Remove a fully-popped sprite and count it
///
/// The presence check makes a second completion for the same id, or a
/// completion against a regenerated board, a silent no-op - the popped
/// counter can never double-count.
fn finish_pop(state: &mut GameState, id: u32) {
    let Some(index) = state
        .sprites
        .iter()
        .position(|s| s.balloon.id == id && s.popping)
    else {
        return;
    };
    state.sprites.remove(index);
    state.popped_count += 1;
    state.events.push(GameEvent::PopCompleted { id });
    log::debug!(
        "balloon {id} popped ({}/{})",
        state.popped_count,
        state.total_count
    );
}

/// Lay out a fresh board for the recorded viewport
fn populate_board(state: &mut GameState) {
    let mut rng = state.board_rng();
    let balloons = generate_balloons(state.balloon_count, state.viewport, &mut rng);
    log::info!(
        "board {}: placed {}/{} balloons in {}x{}",
        state.generation,
        balloons.len(),
        state.balloon_count,
        state.viewport.x,
        state.viewport.y
    );
    state.sprites = balloons.into_iter().map(BalloonSprite::new).collect();
    state.popped_count = 0;
    state.initialized = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALLOON_COUNT;
    use crate::sim::state::{Balloon, Rgb};

    const FRAME: f32 = POP_FRAME_SECS;
    /// Enough frames to finish a pop even with float drift in the
    /// elapsed-time accumulation
    const FULL_POP_FRAMES: u32 = POP_STEP_COUNT + 2;

    fn test_balloon(id: u32, x: f32, y: f32) -> Balloon {
        Balloon {
            id,
            pos: Vec2::new(x, y),
            width: 150.0,
            height: 190.0,
            color: Rgb::new(0.8, 0.7, 0.75),
        }
    }

    /// Hand-built board with a known arrangement
    fn board(balloons: &[Balloon]) -> GameState {
        let mut state = GameState::with_count(1, balloons.len());
        state.viewport = Vec2::new(1080.0, 2160.0);
        state.initialized = true;
        state.sprites = balloons.iter().copied().map(BalloonSprite::new).collect();
        state
    }

    fn generated_board(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        set_viewport(&mut state, 1080.0, 2160.0);
        state
    }

    fn run_frames(state: &mut GameState, frames: u32) {
        for _ in 0..frames {
            tick(state, FRAME);
        }
    }

    #[test]
    fn test_first_valid_viewport_populates_board() {
        let state = generated_board(7);
        assert!(state.initialized);
        assert_eq!(state.sprites.len(), BALLOON_COUNT);
        assert_eq!(state.popped_count, 0);
        assert_eq!(state.total_count, BALLOON_COUNT as u32);
        assert!(state.sprites.iter().all(|s| !s.popping));
    }

    #[test]
    fn test_degenerate_viewport_is_ignored() {
        let mut state = GameState::new(7);
        set_viewport(&mut state, 0.0, 0.0);
        set_viewport(&mut state, -300.0, 900.0);
        set_viewport(&mut state, 900.0, 0.0);
        assert!(!state.initialized);
        assert!(!state.has_viewport());
        assert!(state.sprites.is_empty());
    }

    #[test]
    fn test_resize_after_init_keeps_board() {
        let mut state = generated_board(7);
        let ids: Vec<u32> = state.sprites.iter().map(|s| s.balloon.id).collect();

        set_viewport(&mut state, 900.0, 1440.0);
        let after: Vec<u32> = state.sprites.iter().map(|s| s.balloon.id).collect();
        assert_eq!(ids, after);
        assert_eq!(state.viewport, Vec2::new(900.0, 1440.0));
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = generated_board(1234);
        let b = generated_board(1234);
        assert_eq!(a.sprites, b.sprites);
    }

    #[test]
    fn test_tap_on_empty_space_is_ignored() {
        let mut state = board(&[test_balloon(0, 300.0, 400.0)]);
        assert!(!handle_tap(&mut state, Vec2::new(900.0, 1900.0), None));
        assert!(state.pops.is_empty());
        assert!(state.events.is_empty());
        assert!(!state.sprites[0].popping);
    }

    #[test]
    fn test_repeat_tap_pops_exactly_once() {
        let mut state = board(&[test_balloon(0, 300.0, 400.0)]);
        let tap = Vec2::new(300.0, 400.0);

        assert!(handle_tap(&mut state, tap, None));
        assert!(state.sprites[0].popping);
        // Second tap lands on the same, already-popping balloon
        assert!(!handle_tap(&mut state, tap, None));
        assert_eq!(state.pops.len(), 1);

        run_frames(&mut state, FULL_POP_FRAMES);
        assert_eq!(state.popped_count, 1);
        assert!(state.sprites.is_empty());
        assert!(state.all_popped());

        let completions = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PopCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_progress_advances_in_discrete_steps() {
        let mut state = board(&[test_balloon(0, 300.0, 400.0)]);
        assert!(handle_tap(&mut state, Vec2::new(300.0, 400.0), None));
        assert_eq!(state.sprites[0].pop_progress, 0.0);

        tick(&mut state, FRAME);
        let first = state.sprites[0].pop_progress;
        assert!(first > 0.0);
        assert!((first - 1.0 / POP_STEP_COUNT as f32).abs() < 1e-6);

        tick(&mut state, FRAME);
        let second = state.sprites[0].pop_progress;
        assert!(second >= first);
        assert!(second < 1.0);
    }

    #[test]
    fn test_topmost_balloon_wins_overlapping_tap() {
        // Two overlapping balloons; the tap point sits inside both ovals
        let mut state = board(&[test_balloon(0, 500.0, 500.0), test_balloon(1, 560.0, 500.0)]);
        let tap = Vec2::new(530.0, 500.0);

        assert!(handle_tap(&mut state, tap, None));
        assert!(state.sprites[1].popping, "later balloon is on top");
        assert!(!state.sprites[0].popping);

        // With the top balloon already popping, the same tap falls through
        // to the one underneath
        assert!(handle_tap(&mut state, tap, None));
        assert!(state.sprites[0].popping);

        run_frames(&mut state, FULL_POP_FRAMES);
        assert_eq!(state.popped_count, 2);
    }

    #[test]
    fn test_hover_sway_shifts_the_hit_area() {
        let mut state = board(&[test_balloon(1, 500.0, 500.0)]);
        let sway = hover_offset_x(1, 0.0);
        assert!(sway > 0.1, "phase 0 sways id 1 to the right");

        // Just inside the stored left edge, but outside once the balloon
        // sways away from the tap
        let tap = Vec2::new(500.0 - 75.0 + 0.5, 500.0);
        assert!(!handle_tap(&mut state, tap, Some(0.0)));
        assert!(handle_tap(&mut state, tap, None));
    }

    #[test]
    fn test_concurrent_pops_advance_independently() {
        let mut state = board(&[test_balloon(0, 200.0, 300.0), test_balloon(1, 700.0, 1200.0)]);

        assert!(handle_tap(&mut state, Vec2::new(200.0, 300.0), None));
        run_frames(&mut state, 3);
        assert!(handle_tap(&mut state, Vec2::new(700.0, 1200.0), None));
        run_frames(&mut state, 1);

        // The first pop is three frames ahead of the second
        let lead = state.sprite(0).unwrap().pop_progress;
        let trail = state.sprite(1).unwrap().pop_progress;
        assert!(lead > trail);
        assert!(trail > 0.0);

        // The older pop finishes while the younger one keeps ticking
        run_frames(&mut state, FULL_POP_FRAMES - 4);
        assert!(state.sprite(0).is_none());
        assert!(state.sprite(1).is_some());
        assert_eq!(state.popped_count, 1);

        run_frames(&mut state, FULL_POP_FRAMES);
        assert_eq!(state.popped_count, 2);
        assert!(state.all_popped());
    }

    #[test]
    fn test_restore_builds_fresh_board() {
        let mut state = generated_board(7);
        let tap_target = state.sprites.last().unwrap().balloon;
        assert!(handle_tap(&mut state, tap_target.pos, None));
        run_frames(&mut state, FULL_POP_FRAMES);
        assert_eq!(state.popped_count, 1);
        assert_eq!(state.sprites.len(), BALLOON_COUNT - 1);

        restore(&mut state);
        assert_eq!(state.sprites.len(), BALLOON_COUNT);
        assert_eq!(state.popped_count, 0);
        assert!(state.initialized);
        // Ids restart from zero on the fresh board
        assert_eq!(state.sprites[0].balloon.id, 0);
        assert!(state.sprites.iter().all(|s| !s.popping));
        assert!(state.take_events().contains(&GameEvent::BoardRestored));
    }

    #[test]
    fn test_restore_before_viewport_is_noop() {
        let mut state = GameState::new(7);
        restore(&mut state);
        assert!(!state.initialized);
        assert!(state.sprites.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restore_mid_pop_cancels_the_clock() {
        let mut state = board(&[test_balloon(0, 500.0, 800.0)]);
        assert!(handle_tap(&mut state, Vec2::new(500.0, 800.0), None));
        run_frames(&mut state, 2);

        // The fresh board reuses id 0 for its first balloon; the stale
        // clock must not touch it
        restore(&mut state);
        run_frames(&mut state, FULL_POP_FRAMES);

        assert_eq!(state.popped_count, 0);
        assert_eq!(state.sprites.len(), 1);
        let reborn = state.sprite(0).expect("fresh balloon with reused id");
        assert!(!reborn.popping);
        assert_eq!(reborn.pop_progress, 0.0);
        assert!(state.pops.is_empty());
    }

    #[test]
    fn test_stale_clock_for_missing_sprite_is_dropped() {
        let mut state = board(&[test_balloon(0, 300.0, 400.0)]);
        state.pops.push(PopClock::new(77));

        run_frames(&mut state, FULL_POP_FRAMES);
        assert_eq!(state.popped_count, 0);
        assert_eq!(state.sprites.len(), 1);
        assert!(state.pops.is_empty());
    }

    #[test]
    fn test_snapshot_clone_is_independent() {
        let mut state = generated_board(7);
        let snapshot = state.clone();

        let target = state.sprites.last().unwrap().balloon;
        assert!(handle_tap(&mut state, target.pos, None));
        run_frames(&mut state, FULL_POP_FRAMES);

        // The render snapshot is untouched by later transitions
        assert_eq!(snapshot.sprites.len(), BALLOON_COUNT);
        assert_eq!(snapshot.popped_count, 0);
        assert!(snapshot.sprites.iter().all(|s| !s.popping));
    }

    #[test]
    fn test_pop_events_drain_in_order() {
        let mut state = board(&[test_balloon(0, 300.0, 400.0)]);
        assert!(handle_tap(&mut state, Vec2::new(300.0, 400.0), None));
        run_frames(&mut state, FULL_POP_FRAMES);

        let events = state.take_events();
        assert_eq!(
            events,
            vec![
                GameEvent::PopStarted { id: 0 },
                GameEvent::PopCompleted { id: 0 }
            ]
        );
        assert!(state.take_events().is_empty());
    }
}
