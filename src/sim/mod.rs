//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order = z-order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod layout;
pub mod state;
pub mod tick;

pub use geometry::{Rect, hover_offset_x, oval_contains, overlap_ratio};
pub use layout::generate_balloons;
pub use state::{Balloon, BalloonSprite, GameEvent, GameState, PopClock, Rgb};
pub use tick::{handle_tap, restore, set_viewport, tick};
