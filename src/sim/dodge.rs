//! No button dodge controller
//!
//! When the pointer comes within the dodge radius of the No button, the
//! button jumps to the farthest of a handful of random spots in the play
//! area. Every dodge also grows the Yes button and may escalate the prompt.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::NO_START_FRACTION;
use crate::tuning::DodgeTuning;
use crate::{Rect, clamp_collapsed};

/// Prompt replacements, keyed by the dodge count that reveals them
pub const ESCALATIONS: [(u32, &str); 3] = [
    (3, "Uhhh sweetness ur supposed to click yes😅"),
    (6, "Okay cmon do u wanna go La Cappola or not🤨"),
    (9, "Last chance… YES????????"),
];

/// Measured page geometry the controller works against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    /// Play area in client coordinates
    pub area: Rect,
    /// Current No button size
    pub button_size: Vec2,
}

/// Mutable dodge state, owned by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DodgeState {
    /// Number of relocations so far
    pub dodges: u32,
    /// Current Yes button scale factor
    pub yes_scale: f32,
    /// No button top-left, relative to the play area
    pub position: Vec2,
}

impl Default for DodgeState {
    fn default() -> Self {
        Self {
            dodges: 0,
            yes_scale: 1.0,
            position: Vec2::ZERO,
        }
    }
}

impl DodgeState {
    /// Latest escalation message reached, if any
    pub fn prompt(&self) -> Option<&'static str> {
        ESCALATIONS
            .iter()
            .rev()
            .find(|(at, _)| self.dodges >= *at)
            .map(|(_, text)| *text)
    }
}

/// Result of a single dodge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dodge {
    /// New No button top-left, relative to the play area
    pub position: Vec2,
    /// Dodge count after this dodge
    pub dodges: u32,
    /// Yes scale after this dodge
    pub yes_scale: f32,
    /// Set only on the dodge that reaches an escalation threshold
    pub prompt: Option<&'static str>,
}

/// Pointer-proximity relocation logic
#[derive(Debug, Clone, Copy, Default)]
pub struct DodgeController {
    tuning: DodgeTuning,
}

impl DodgeController {
    pub fn new(tuning: DodgeTuning) -> Self {
        Self { tuning }
    }

    /// Starting position: a fixed fraction into the play area
    pub fn initial_position(&self, layout: &Layout) -> Vec2 {
        layout.area.size * NO_START_FRACTION
    }

    /// Allowed top-left range (min, max), per axis
    ///
    /// A play area smaller than button + padding collapses to a zero-width
    /// range at `padding / 2`.
    pub fn bounds(&self, layout: &Layout) -> (Vec2, Vec2) {
        let inset = Vec2::splat(self.tuning.padding / 2.0);
        let span = (layout.area.size - layout.button_size - Vec2::splat(self.tuning.padding))
            .max(Vec2::ZERO);
        (inset, inset + span)
    }

    /// Button center in client coordinates for a given top-left
    #[inline]
    pub fn center_of(&self, layout: &Layout, position: Vec2) -> Vec2 {
        layout.area.origin + position + layout.button_size * 0.5
    }

    /// True when the pointer is strictly inside the dodge radius
    pub fn is_threatened(&self, state: &DodgeState, layout: &Layout, pointer: Vec2) -> bool {
        let center = self.center_of(layout, state.position);
        center.distance(pointer) < self.tuning.radius
    }

    /// Draw candidate top-left positions uniformly within bounds
    pub fn sample_candidates<R: Rng>(&self, layout: &Layout, rng: &mut R) -> Vec<Vec2> {
        let (min, max) = self.bounds(layout);
        let span = max - min;
        (0..self.tuning.candidates)
            .map(|_| {
                Vec2::new(
                    rng.random::<f32>() * span.x + min.x,
                    rng.random::<f32>() * span.y + min.y,
                )
            })
            .collect()
    }

    /// Candidate whose center is farthest from the pointer
    ///
    /// Ties keep the earliest candidate.
    pub fn farthest(&self, layout: &Layout, pointer: Vec2, candidates: &[Vec2]) -> Option<Vec2> {
        let mut best: Option<(Vec2, f32)> = None;
        for &candidate in candidates {
            let dist2 = self.center_of(layout, candidate).distance_squared(pointer);
            if best.is_none_or(|(_, d)| dist2 > d) {
                best = Some((candidate, dist2));
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Move the button away from `pointer` unconditionally
    pub fn relocate<R: Rng>(
        &self,
        state: &mut DodgeState,
        layout: &Layout,
        pointer: Vec2,
        rng: &mut R,
    ) -> Dodge {
        let candidates = self.sample_candidates(layout, rng);
        if let Some(best) = self.farthest(layout, pointer, &candidates) {
            let (min, max) = self.bounds(layout);
            state.position = Vec2::new(
                clamp_collapsed(best.x, min.x, max.x),
                clamp_collapsed(best.y, min.y, max.y),
            );
        }

        state.dodges += 1;
        state.yes_scale = (state.yes_scale + self.tuning.scale_step).min(self.tuning.scale_max);

        let prompt = ESCALATIONS
            .iter()
            .find(|(at, _)| *at == state.dodges)
            .map(|(_, text)| *text);

        log::debug!(
            "dodge #{} -> ({:.0}, {:.0}), yes scale {:.2}",
            state.dodges,
            state.position.x,
            state.position.y,
            state.yes_scale
        );

        Dodge {
            position: state.position,
            dodges: state.dodges,
            yes_scale: state.yes_scale,
            prompt,
        }
    }

    /// Relocate only if the pointer is inside the dodge radius
    pub fn on_pointer_move<R: Rng>(
        &self,
        state: &mut DodgeState,
        layout: &Layout,
        pointer: Vec2,
        rng: &mut R,
    ) -> Option<Dodge> {
        if self.is_threatened(state, layout, pointer) {
            Some(self.relocate(state, layout, pointer, rng))
        } else {
            None
        }
    }
}
