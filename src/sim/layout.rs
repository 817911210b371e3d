//! Balloon board layout via rejection sampling
//!
//! True non-overlap packing is expensive; generate-and-test against a
//! bounding-box overlap cap is cheap and reads fine for a casual board.
//! The attempt budget bounds runtime, so a crowded viewport yields a
//! short board instead of looping forever.

use glam::Vec2;
use rand::Rng;

use super::geometry::overlap_ratio;
use super::state::{Balloon, Rgb};
use crate::consts::*;

/// Generate up to `count` non-overlapping balloons for the viewport
///
/// Deterministic for a seeded `rng`; there is no hidden global generator.
/// Candidate ids advance even when a candidate is rejected, mirroring the
/// attempt order. Returns fewer than `count` balloons when the attempt
/// budget runs out - a normal outcome on small viewports, not an error.
pub fn generate_balloons<R: Rng>(count: usize, viewport: Vec2, rng: &mut R) -> Vec<Balloon> {
    let mut balloons: Vec<Balloon> = Vec::with_capacity(count);
    let mut next_id: u32 = 0;
    let mut attempts: u32 = 0;

    while balloons.len() < count && attempts < MAX_PLACEMENT_ATTEMPTS {
        attempts += 1;

        let width = rng.random_range(BALLOON_MIN_WIDTH..BALLOON_MAX_WIDTH) as f32;
        let height = width * (HEIGHT_FACTOR_BASE + rng.random::<f32>() * HEIGHT_FACTOR_JITTER);

        // Keep the full oval inside the viewport horizontally; a viewport
        // narrower than the balloon degenerates to a centered column
        let x_span = (viewport.x - width).max(0.0);
        let center_x = rng.random::<f32>() * x_span + width / 2.0;

        // Vertical range is padded by the margin; a too-short viewport
        // collapses the range onto its minimum instead of inverting
        let min_center_y = height / 2.0 + VERTICAL_MARGIN;
        let max_center_y = (viewport.y - height / 2.0 - VERTICAL_MARGIN).max(min_center_y);
        let center_y = rng.random::<f32>() * (max_center_y - min_center_y) + min_center_y;

        let candidate = Balloon {
            id: next_id,
            pos: Vec2::new(center_x, center_y),
            width,
            height,
            color: pastel_color(rng),
        };
        next_id += 1;

        let bounds = candidate.bounds();
        let crowds_a_neighbor = balloons
            .iter()
            .any(|placed| overlap_ratio(&bounds, &placed.bounds()) > MAX_OVERLAP_RATIO);

        if !crowds_a_neighbor {
            balloons.push(candidate);
        }
    }

    if balloons.len() < count {
        log::info!(
            "balloon layout fell short: {}/{} placed after {} attempts",
            balloons.len(),
            count,
            attempts
        );
    }

    balloons
}

/// Uniform pastel fill: every channel sampled from the same pale band
fn pastel_color<R: Rng>(rng: &mut R) -> Rgb {
    let r = rng.random_range(PASTEL_CHANNEL_MIN..PASTEL_CHANNEL_MAX) as f32 / 255.0;
    let g = rng.random_range(PASTEL_CHANNEL_MIN..PASTEL_CHANNEL_MAX) as f32 / 255.0;
    let b = rng.random_range(PASTEL_CHANNEL_MIN..PASTEL_CHANNEL_MAX) as f32 / 255.0;
    Rgb::new(r, g, b)
}
