//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::BALLOON_COUNT;

/// Normalized RGB fill color, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Immutable balloon geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    /// Sequential id; the layout counter advances for rejected candidates
    /// too, so ids on a board are strictly increasing but may have gaps
    pub id: u32,
    /// Center position in viewport pixels
    pub pos: Vec2,
    pub width: f32,
    /// Always taller than wide: width times a factor in [1.24, 1.36)
    pub height: f32,
    pub color: Rgb,
}

impl Balloon {
    /// Axis-aligned bounds of the oval
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.width, self.height)
    }
}

/// A balloon's mutable lifecycle wrapper
///
/// Idle until a tap lands, then popping until the animation finishes and
/// the sprite leaves the board. No transition is reversible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalloonSprite {
    pub balloon: Balloon,
    /// Set exactly once by a successful tap; never cleared
    pub popping: bool,
    /// Pop animation progress in [0, 1], advanced in discrete steps
    pub pop_progress: f32,
}

impl BalloonSprite {
    pub fn new(balloon: Balloon) -> Self {
        Self {
            balloon,
            popping: false,
            pop_progress: 0.0,
        }
    }
}

/// Per-pop animation clock
///
/// Registered when a tap lands, dropped when the pop completes or the
/// clock turns stale (its board was regenerated). Clocks accumulate time
/// independently, so concurrent pops never share a budget.
#[derive(Debug, Clone, Copy)]
pub struct PopClock {
    pub balloon_id: u32,
    /// Time accumulated since the pop started
    pub elapsed: f32,
    /// Whole animation steps already applied to the sprite
    pub steps_done: u32,
}

impl PopClock {
    pub fn new(balloon_id: u32) -> Self {
        Self {
            balloon_id,
            elapsed: 0.0,
            steps_done: 0,
        }
    }
}

/// Things the host may want to react to (sound, haptics, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tap landed and a pop animation started - cue the pop sound
    PopStarted { id: u32 },
    /// A pop animation finished and the balloon left the board
    PopCompleted { id: u32 },
    /// `restore` rebuilt the board
    BoardRestored,
}

/// Complete game state for one session
///
/// Owned by a single writer. Render collaborators read a clone and never
/// mutate; every transition replaces fields under the one owner, so a
/// snapshot taken between calls is always consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Board generation, bumped by `restore`; combined with the seed to
    /// derive each board's RNG
    pub generation: u32,
    /// Requested balloons per board
    pub balloon_count: usize,
    /// Live sprites in insertion order (later = rendered on top)
    pub sprites: Vec<BalloonSprite>,
    /// Balloons fully popped on the current board
    pub popped_count: u32,
    /// Fixed at the requested count for the session
    pub total_count: u32,
    /// Set by the first valid `set_viewport`
    pub initialized: bool,
    /// Last-known viewport extents (zero until a valid resize arrives)
    pub viewport: Vec2,
    /// Active pop animation clocks, keyed by balloon id
    #[serde(skip)]
    pub pops: Vec<PopClock>,
    /// Pending events since the last `take_events` drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with the default board size
    pub fn new(seed: u64) -> Self {
        Self::with_count(seed, BALLOON_COUNT)
    }

    /// Create a session that places `count` balloons per board
    pub fn with_count(seed: u64, count: usize) -> Self {
        Self {
            seed,
            generation: 0,
            balloon_count: count,
            sprites: Vec::new(),
            popped_count: 0,
            total_count: count as u32,
            initialized: false,
            viewport: Vec2::ZERO,
            pops: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Whether a valid viewport has ever been recorded
    pub fn has_viewport(&self) -> bool {
        self.viewport.x > 0.0 && self.viewport.y > 0.0
    }

    /// Balloons still on the board
    pub fn remaining(&self) -> usize {
        self.sprites.len()
    }

    /// True once the board initialized and every balloon is gone
    pub fn all_popped(&self) -> bool {
        self.initialized && self.sprites.is_empty()
    }

    /// Sprite lookup by balloon id
    pub fn sprite(&self, id: u32) -> Option<&BalloonSprite> {
        self.sprites.iter().find(|s| s.balloon.id == id)
    }

    /// RNG for the current board: same seed and generation, same board
    pub fn board_rng(&self) -> Pcg32 {
        let board_seed = (self.generation as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        Pcg32::seed_from_u64(board_seed)
    }

    /// Drain pending events for the host to act on
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
