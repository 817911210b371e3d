//! Game settings and preferences
//!
//! Plain data with sensible defaults. Nothing here persists - a host that
//! wants sticky settings serializes the struct itself.

use serde::{Deserialize, Serialize};

use crate::consts::{BALLOON_COUNT, HOVER_AMPLITUDE};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Balloons per board
    pub balloon_count: usize,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Pop sound volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion: hold balloons still instead of hover-swaying them.
    /// Hosts honoring this render without sway and pass `None` as the
    /// hover phase when forwarding taps.
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            balloon_count: BALLOON_COUNT,
            master_volume: 0.8,
            sfx_volume: 0.72,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Volume the host should play the pop sound at
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Hover amplitude the renderer should animate with
    pub fn effective_hover_amplitude(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            HOVER_AMPLITUDE
        }
    }
}
