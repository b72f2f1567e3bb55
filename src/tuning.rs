//! Typed constant bundles
//!
//! Everything is hardcoded; these structs only group `consts` so the
//! controllers can be exercised with smaller numbers in tests.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Dodge controller parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DodgeTuning {
    /// Trigger radius around the No button center (px)
    pub radius: f32,
    /// Candidates sampled per relocation
    pub candidates: usize,
    /// Total padding inside the play area (half on each side)
    pub padding: f32,
    pub scale_step: f32,
    pub scale_max: f32,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            radius: DODGE_RADIUS,
            candidates: DODGE_CANDIDATES,
            padding: DODGE_PADDING,
            scale_step: YES_SCALE_STEP,
            scale_max: YES_SCALE_MAX,
        }
    }
}

/// Confetti burst and physics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfettiTuning {
    pub count: usize,
    pub drag: f32,
    pub gravity: f32,
    pub floor_margin: f32,
    pub ttl_min: u32,
    pub ttl_span: u32,
}

impl Default for ConfettiTuning {
    fn default() -> Self {
        Self {
            count: CONFETTI_COUNT,
            drag: CONFETTI_DRAG,
            gravity: CONFETTI_GRAVITY,
            floor_margin: CONFETTI_FLOOR_MARGIN,
            ttl_min: CONFETTI_TTL_MIN,
            ttl_span: CONFETTI_TTL_SPAN,
        }
    }
}

impl ConfettiTuning {
    /// Longest possible particle lifetime in frames
    pub fn max_ttl(&self) -> u32 {
        self.ttl_min + self.ttl_span.saturating_sub(1)
    }
}
