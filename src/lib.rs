//! Balloon Pop - a pastel balloon-popping toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board layout, hit testing, pop lifecycle)
//! - `settings`: Host-facing preferences
//!
//! Rendering, audio playback and windowing live in host collaborators.
//! This crate owns the state they read: the host forwards viewport and tap
//! events into `sim`, drives pop animations with `sim::tick`, and hands
//! the renderer a cloned snapshot of the `GameState`.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Balloons placed per board
    pub const BALLOON_COUNT: usize = 30;

    /// Balloon oval width range in pixels (integer-sampled, max exclusive)
    pub const BALLOON_MIN_WIDTH: i32 = 138;
    pub const BALLOON_MAX_WIDTH: i32 = 166;
    /// Height = width * (HEIGHT_FACTOR_BASE + uniform[0, HEIGHT_FACTOR_JITTER))
    pub const HEIGHT_FACTOR_BASE: f32 = 1.24;
    pub const HEIGHT_FACTOR_JITTER: f32 = 0.12;

    /// Vertical placement margin at the top and bottom of the viewport
    pub const VERTICAL_MARGIN: f32 = 24.0;
    /// Candidate budget for the rejection sampler
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 600;
    /// Candidates whose bounding box overlaps an accepted balloon's by more
    /// than this ratio (of the smaller box) are rejected
    pub const MAX_OVERLAP_RATIO: f32 = 0.35;

    /// Pastel fill sampling range per RGB channel, out of 255 (max exclusive)
    pub const PASTEL_CHANNEL_MIN: i32 = 150;
    pub const PASTEL_CHANNEL_MAX: i32 = 236;

    /// Pop animation duration
    pub const POP_DURATION_MS: u32 = 170;
    /// Pop animation frame step
    pub const POP_FRAME_MS: u32 = 16;
    /// Seconds per pop animation step
    pub const POP_FRAME_SECS: f32 = POP_FRAME_MS as f32 / 1000.0;
    /// Discrete steps per pop; progress lands on (step / POP_STEP_COUNT)
    pub const POP_STEP_COUNT: u32 = {
        let steps = POP_DURATION_MS / POP_FRAME_MS;
        if steps == 0 { 1 } else { steps }
    };

    /// Horizontal hover sway amplitude (pixels)
    pub const HOVER_AMPLITUDE: f32 = 9.0;
    /// Per-id phase shift so neighboring balloons don't sway in lockstep
    pub const HOVER_ID_PHASE: f32 = 0.75;
    /// Hover cycle period for the renderer's phase clock
    pub const HOVER_PERIOD_MS: u32 = 3800;
}
