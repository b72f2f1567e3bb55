//! Page session state
//!
//! One `Session` per page load. It owns the dodge state, the confetti
//! engine and the animation loop handle, and is the only thing event
//! handlers mutate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::confetti::ConfettiEngine;
use super::dodge::{Dodge, DodgeController, DodgeState, Layout};
use crate::Viewport;
use crate::frame::{AnimationLoop, FrameScheduler};
use crate::renderer::{Surface, draw_confetti};
use crate::tuning::{ConfettiTuning, DodgeTuning};

/// Where the page is in its (one-way) flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No button still running, Yes still clickable
    Asking,
    /// Yes was clicked; terminal
    Accepted,
}

/// Complete page state
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// RNG seed for reproducibility
    pub seed: u64,
    phase: SessionPhase,
    dodge: DodgeState,
    confetti: ConfettiEngine,
    animation: AnimationLoop,
    #[serde(skip)]
    controller: DodgeController,
    #[serde(skip)]
    rng: Pcg32,
}

impl Session {
    /// Create a session with the hardcoded tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, DodgeTuning::default(), ConfettiTuning::default())
    }

    pub fn with_tuning(seed: u64, dodge: DodgeTuning, confetti: ConfettiTuning) -> Self {
        Self {
            seed,
            phase: SessionPhase::Asking,
            dodge: DodgeState::default(),
            confetti: ConfettiEngine::new(confetti),
            animation: AnimationLoop::new(),
            controller: DodgeController::new(dodge),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn dodge_state(&self) -> &DodgeState {
        &self.dodge
    }

    pub fn confetti(&self) -> &ConfettiEngine {
        &self.confetti
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    /// Put the No button at its starting spot (page load and resize).
    /// Ignored once accepted.
    pub fn place_initial(&mut self, layout: &Layout) -> Option<Vec2> {
        if self.phase != SessionPhase::Asking {
            return None;
        }
        self.dodge.position = self.controller.initial_position(layout);
        Some(self.dodge.position)
    }

    /// Pointer (mouse or finger) moved inside the play area
    pub fn on_pointer_move(&mut self, layout: &Layout, pointer: Vec2) -> Option<Dodge> {
        if self.phase != SessionPhase::Asking {
            return None;
        }
        self.controller
            .on_pointer_move(&mut self.dodge, layout, pointer, &mut self.rng)
    }

    /// The No button was somehow clicked: dodge regardless of distance
    pub fn on_no_click(&mut self, layout: &Layout, pointer: Vec2) -> Option<Dodge> {
        if self.phase != SessionPhase::Asking {
            return None;
        }
        Some(
            self.controller
                .relocate(&mut self.dodge, layout, pointer, &mut self.rng),
        )
    }

    /// Yes was clicked. Returns true only on the transition into
    /// `Accepted`; every call fires a confetti burst.
    pub fn on_yes_click<S, F>(
        &mut self,
        viewport: &Viewport,
        surface: &mut S,
        scheduler: &mut F,
    ) -> bool
    where
        S: Surface + ?Sized,
        F: FrameScheduler,
    {
        let first = self.phase == SessionPhase::Asking;
        if first {
            self.phase = SessionPhase::Accepted;
            log::info!("accepted after {} dodges", self.dodge.dodges);
        }
        self.start_confetti(viewport, surface, scheduler);
        first
    }

    /// Spawn a burst and make sure exactly one loop is driving it
    pub fn start_confetti<S, F>(&mut self, viewport: &Viewport, surface: &mut S, scheduler: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler,
    {
        let origin = ConfettiEngine::origin_for(viewport.width, viewport.height);
        self.confetti.spawn(origin, &mut self.rng);
        if !self.animation.is_running() {
            self.frame(viewport, surface, scheduler);
        }
    }

    /// One animation step: update, draw, cull, then reschedule or stop
    pub fn frame<S, F>(&mut self, viewport: &Viewport, surface: &mut S, scheduler: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler,
    {
        self.animation.begin_frame();

        self.confetti.integrate();
        draw_confetti(surface, self.confetti.particles());

        if self.confetti.cull(viewport.height) > 0 {
            self.animation.request(scheduler);
        } else {
            surface.clear();
            self.animation.stop(scheduler);
            log::debug!("confetti done after {} frames", self.animation.frames());
        }
    }

    /// JSON dump of the session for the console
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::frame::ManualScheduler;
    use crate::renderer::CountingSurface;

    fn layout() -> Layout {
        Layout {
            area: Rect::new(0.0, 0.0, 800.0, 600.0),
            button_size: Vec2::new(100.0, 40.0),
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0, 1.0)
    }

    /// Run frames until the scheduler has nothing pending
    fn drain(
        session: &mut Session,
        surface: &mut CountingSurface,
        sched: &mut ManualScheduler,
    ) -> usize {
        let mut frames = 0;
        while sched.take_pending().is_some() {
            session.frame(&viewport(), surface, sched);
            frames += 1;
            assert!(frames < 1_000, "loop never stopped");
        }
        frames
    }

    #[test]
    fn test_initial_placement_and_dodge() {
        let mut session = Session::new(11);
        let start = session.place_initial(&layout()).expect("asking");
        let center = start + Vec2::new(50.0, 20.0);

        // Far pointer: nothing happens
        assert!(session.on_pointer_move(&layout(), Vec2::ZERO).is_none());
        assert_eq!(session.dodge_state().dodges, 0);

        let dodge = session
            .on_pointer_move(&layout(), center + Vec2::new(10.0, 0.0))
            .expect("inside radius");
        assert_eq!(dodge.dodges, 1);
        assert!((dodge.yes_scale - 1.12).abs() < 1e-6);
        assert_eq!(session.dodge_state().position, dodge.position);
    }

    #[test]
    fn test_no_click_always_dodges() {
        let mut session = Session::new(12);
        session.place_initial(&layout());
        let dodge = session.on_no_click(&layout(), Vec2::new(-5000.0, -5000.0));
        assert!(dodge.is_some());
        assert_eq!(session.dodge_state().dodges, 1);
    }

    #[test]
    fn test_yes_transition_is_one_way() {
        let mut session = Session::new(13);
        let mut surface = CountingSurface::default();
        let mut sched = ManualScheduler::new();

        assert!(session.on_yes_click(&viewport(), &mut surface, &mut sched));
        assert_eq!(session.phase(), SessionPhase::Accepted);
        assert!(!session.on_yes_click(&viewport(), &mut surface, &mut sched));
        assert_eq!(session.phase(), SessionPhase::Accepted);

        // Dodging is over
        assert!(session.place_initial(&layout()).is_none());
        assert!(session.on_no_click(&layout(), Vec2::ZERO).is_none());
        assert!(
            session
                .on_pointer_move(&layout(), Vec2::new(546.0, 392.0))
                .is_none()
        );
        assert_eq!(session.dodge_state().dodges, 0);
    }

    #[test]
    fn test_yes_runs_first_frame_immediately() {
        let mut session = Session::new(14);
        let mut surface = CountingSurface::default();
        let mut sched = ManualScheduler::new();

        session.on_yes_click(&viewport(), &mut surface, &mut sched);
        assert_eq!(session.animation().frames(), 1);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.rects + surface.circles, 180);
        assert!(session.animation().is_running());
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn test_respawn_does_not_start_second_loop() {
        let mut session = Session::new(15);
        let mut surface = CountingSurface::default();
        let mut sched = ManualScheduler::new();

        session.on_yes_click(&viewport(), &mut surface, &mut sched);
        session.on_yes_click(&viewport(), &mut surface, &mut sched);
        session.start_confetti(&viewport(), &mut surface, &mut sched);

        assert_eq!(sched.pending_count(), 1);
        assert_eq!(session.animation().frames(), 1);
        assert_eq!(session.confetti().particles().len(), 180);
    }

    #[test]
    fn test_loop_stops_and_surface_ends_clear() {
        let mut session = Session::new(16);
        let mut surface = CountingSurface::default();
        let mut sched = ManualScheduler::new();

        session.on_yes_click(&viewport(), &mut surface, &mut sched);
        let frames = drain(&mut session, &mut surface, &mut sched);

        assert!(frames < 199);
        assert!(session.confetti().is_empty());
        assert!(!session.animation().is_running());
        assert!(surface.blank);
        assert_eq!(sched.pending_count(), 0);

        // Idle until the next spawn, which restarts cleanly
        session.start_confetti(&viewport(), &mut surface, &mut sched);
        assert!(session.animation().is_running());
        assert_eq!(session.confetti().particles().len(), 180);
    }

    #[test]
    fn test_particles_never_outlive_ttl_after_frame() {
        let mut session = Session::new(17);
        let mut surface = CountingSurface::default();
        let mut sched = ManualScheduler::new();

        session.on_yes_click(&viewport(), &mut surface, &mut sched);
        while sched.take_pending().is_some() {
            session.frame(&viewport(), &mut surface, &mut sched);
            let floor = viewport().height + 40.0;
            assert!(session.confetti().particles().iter().all(|p| p.is_alive(floor)));
            assert_eq!(session.animation().is_running(), !session.confetti().is_empty());
        }
    }

    #[test]
    fn test_snapshot_json_has_phase_and_dodges() {
        let mut session = Session::new(18);
        session.place_initial(&layout());
        session.on_no_click(&layout(), Vec2::ZERO);
        let json = session.snapshot_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["phase"], "Asking");
        assert_eq!(value["dodge"]["dodges"], 1);
        assert_eq!(value["seed"], 18);
    }
}
