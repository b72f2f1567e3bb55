//! Runaway No - a proposal page that will not take no for an answer
//!
//! Core modules:
//! - `sim`: Pure page logic (dodge controller, confetti physics, session state)
//! - `frame`: "Schedule next frame" abstraction and the animation loop guard
//! - `renderer`: Confetti draw step (2D canvas on the web)
//! - `platform`: Browser DOM view, viewport and input helpers (wasm32 only)
//! - `tuning`: Typed bundles of the hardcoded constants

pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use frame::{AnimationLoop, FrameHandle, FrameScheduler};
pub use sim::{Session, SessionPhase};
pub use tuning::{ConfettiTuning, DodgeTuning};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Page configuration constants
pub mod consts {
    /// Pointer closer than this (px) to the No button center makes it run
    pub const DODGE_RADIUS: f32 = 90.0;
    /// Random candidate positions sampled per relocation
    pub const DODGE_CANDIDATES: usize = 12;
    /// Total padding kept between the No button and the play area edges
    pub const DODGE_PADDING: f32 = 8.0;
    /// Initial No button placement, as a fraction of the play area
    pub const NO_START_FRACTION: f32 = 0.62;

    /// Yes button growth per dodge
    pub const YES_SCALE_STEP: f32 = 0.12;
    /// Yes button scale cap
    pub const YES_SCALE_MAX: f32 = 2.35;

    /// Particles per confetti burst
    pub const CONFETTI_COUNT: usize = 180;
    /// Per-frame velocity multiplier
    pub const CONFETTI_DRAG: f32 = 0.992;
    /// Added to vertical velocity each frame (px/frame², after drag)
    pub const CONFETTI_GRAVITY: f32 = 0.18;
    /// Particles this far below the viewport bottom are dropped
    pub const CONFETTI_FLOOR_MARGIN: f32 = 40.0;
    /// Lifetime range in frames (min inclusive, span exclusive)
    pub const CONFETTI_TTL_MIN: u32 = 140;
    pub const CONFETTI_TTL_SPAN: u32 = 60;
    /// Launch speed range (px/frame)
    pub const CONFETTI_SPEED_MIN: f32 = 3.0;
    pub const CONFETTI_SPEED_SPAN: f32 = 7.0;
    /// Upward kick added to every launch velocity
    pub const CONFETTI_LIFT: f32 = 4.0;
    /// Particle size range (px)
    pub const CONFETTI_SIZE_MIN: f32 = 4.0;
    pub const CONFETTI_SIZE_SPAN: f32 = 6.0;
    /// Max absolute spin (rad/frame)
    pub const CONFETTI_SPIN: f32 = 0.15;
    /// Probability a particle is a circle rather than a strip
    pub const CONFETTI_CIRCLE_CHANCE: f64 = 0.15;
    /// Rectangle height as a fraction of its width
    pub const CONFETTI_RECT_ASPECT: f32 = 0.65;

    /// Confetti palette
    pub const CONFETTI_COLORS: [&str; 8] = [
        "#ff4d6d", "#c9184a", "#ff758f", "#ffd166", "#06d6a0", "#4ea8de", "#9b5de5", "#f15bb5",
    ];
}

/// Axis-aligned rectangle in client (CSS pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Browser viewport in CSS pixels plus the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f64) -> Self {
        // Some embedded browsers report 0 before layout
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        Self { width, height, dpr }
    }

    /// Backing store size of a full-viewport canvas (device pixels)
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.dpr).floor().max(0.0) as u32,
            (self.height as f64 * self.dpr).floor().max(0.0) as u32,
        )
    }
}

/// Clamp that tolerates an inverted range by collapsing it to `min`
#[inline]
pub fn clamp_collapsed(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_scales_with_dpr() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.backing_size(), (1600, 1200));

        let vp = Viewport::new(333.0, 101.0, 1.5);
        assert_eq!(vp.backing_size(), (499, 151));
    }

    #[test]
    fn test_zero_dpr_falls_back_to_one() {
        let vp = Viewport::new(640.0, 480.0, 0.0);
        assert_eq!(vp.dpr, 1.0);
        assert_eq!(vp.backing_size(), (640, 480));
    }

    #[test]
    fn test_clamp_collapsed_inverted_range() {
        assert_eq!(clamp_collapsed(5.0, 4.0, 2.0), 4.0);
        assert_eq!(clamp_collapsed(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_collapsed(12.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.center(), Vec2::new(60.0, 40.0));
    }
}
