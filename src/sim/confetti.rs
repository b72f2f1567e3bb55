//! Confetti particle physics
//!
//! A burst spawns every particle at one point; each frame applies drag,
//! then gravity, integrates position and spin, and drops particles that
//! expired or fell out of view.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::ConfettiTuning;

/// Particle silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    /// Rotated strip, `size` wide and `size * 0.65` tall
    Rect,
    /// Disc of radius `size / 2`
    Circle,
}

/// A single confetti fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Index into `CONFETTI_COLORS`
    pub color: u8,
    pub rot: f32,
    /// Angular velocity (rad/frame)
    pub spin: f32,
    /// Frames lived
    pub life: u32,
    /// Frames until removal
    pub ttl: u32,
    pub shape: ParticleShape,
}

impl Particle {
    /// Random particle launched from `origin`
    pub fn random<R: Rng>(origin: Vec2, tuning: &ConfettiTuning, rng: &mut R) -> Self {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = CONFETTI_SPEED_MIN + rng.random::<f32>() * CONFETTI_SPEED_SPAN;
        let shape = if rng.random_bool(CONFETTI_CIRCLE_CHANCE) {
            ParticleShape::Circle
        } else {
            ParticleShape::Rect
        };
        Self {
            pos: origin,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - CONFETTI_LIFT),
            size: CONFETTI_SIZE_MIN + rng.random::<f32>() * CONFETTI_SIZE_SPAN,
            color: rng.random_range(0..CONFETTI_COLORS.len()) as u8,
            rot: rng.random::<f32>() * std::f32::consts::PI,
            spin: (rng.random::<f32>() - 0.5) * 2.0 * CONFETTI_SPIN,
            life: 0,
            ttl: tuning.ttl_min + rng.random_range(0..tuning.ttl_span.max(1)),
            shape,
        }
    }

    /// Advance one frame
    pub fn step(&mut self, drag: f32, gravity: f32) {
        self.life += 1;
        self.vel *= drag;
        self.vel.y += gravity;
        self.pos += self.vel;
        self.rot += self.spin;
    }

    /// Linear fade from 1 at birth to 0 at ttl
    pub fn opacity(&self) -> f32 {
        if self.ttl == 0 {
            return 0.0;
        }
        (1.0 - self.life as f32 / self.ttl as f32).clamp(0.0, 1.0)
    }

    pub fn color_hex(&self) -> &'static str {
        CONFETTI_COLORS[self.color as usize % CONFETTI_COLORS.len()]
    }

    pub fn is_alive(&self, floor: f32) -> bool {
        self.life < self.ttl && self.pos.y < floor
    }
}

/// Active particle set
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfettiEngine {
    tuning: ConfettiTuning,
    particles: Vec<Particle>,
}

impl ConfettiEngine {
    pub fn new(tuning: ConfettiTuning) -> Self {
        Self {
            tuning,
            particles: Vec::with_capacity(tuning.count),
        }
    }

    pub fn tuning(&self) -> &ConfettiTuning {
        &self.tuning
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Burst origin: horizontal center, a third of the way down
    pub fn origin_for(viewport_w: f32, viewport_h: f32) -> Vec2 {
        Vec2::new(viewport_w / 2.0, viewport_h / 3.0)
    }

    /// Replace the active set with a fresh burst
    pub fn spawn<R: Rng>(&mut self, origin: Vec2, rng: &mut R) {
        self.particles.clear();
        let tuning = self.tuning;
        self.particles
            .extend((0..tuning.count).map(|_| Particle::random(origin, &tuning, rng)));
        log::debug!(
            "confetti burst of {} at ({:.0}, {:.0})",
            self.particles.len(),
            origin.x,
            origin.y
        );
    }

    /// Integrate every particle one frame (no removal)
    pub fn integrate(&mut self) {
        let (drag, gravity) = (self.tuning.drag, self.tuning.gravity);
        for p in &mut self.particles {
            p.step(drag, gravity);
        }
    }

    /// Drop expired and fallen particles; returns how many remain
    pub fn cull(&mut self, viewport_h: f32) -> usize {
        let floor = viewport_h + self.tuning.floor_margin;
        self.particles.retain(|p| p.is_alive(floor));
        self.particles.len()
    }

    /// Integrate then cull
    pub fn step(&mut self, viewport_h: f32) -> usize {
        self.integrate();
        self.cull(viewport_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst(seed: u64) -> ConfettiEngine {
        let mut engine = ConfettiEngine::new(ConfettiTuning::default());
        let mut rng = Pcg32::seed_from_u64(seed);
        engine.spawn(ConfettiEngine::origin_for(800.0, 600.0), &mut rng);
        engine
    }

    #[test]
    fn test_spawn_count_and_origin() {
        let engine = burst(1);
        assert_eq!(engine.particles().len(), 180);
        for p in engine.particles() {
            assert_eq!(p.pos, Vec2::new(400.0, 200.0));
            assert_eq!(p.life, 0);
            assert!((140..=199).contains(&p.ttl));
            assert!(p.size >= 4.0 && p.size < 10.0);
            assert!(p.spin.abs() <= 0.15);
        }
    }

    #[test]
    fn test_spawn_launch_spin_and_shape_mix() {
        let mut circles = 0usize;
        let mut total = 0usize;
        for seed in 0..200 {
            for p in burst(seed).particles() {
                let speed = (p.vel + Vec2::new(0.0, CONFETTI_LIFT)).length();
                assert!(
                    (2.999..10.001).contains(&speed),
                    "launch speed {speed} out of range"
                );
                assert!(p.rot >= 0.0 && p.rot < std::f32::consts::PI);
                if p.shape == ParticleShape::Circle {
                    circles += 1;
                }
                total += 1;
            }
        }
        let share = circles as f64 / total as f64;
        assert!((share - 0.15).abs() < 0.03, "circle share {share}");
    }

    #[test]
    fn test_spawn_replaces_previous_burst() {
        let mut engine = burst(1);
        engine.step(600.0);
        let mut rng = Pcg32::seed_from_u64(2);
        engine.spawn(Vec2::ZERO, &mut rng);
        assert_eq!(engine.particles().len(), 180);
        assert!(engine.particles().iter().all(|p| p.life == 0));
    }

    #[test]
    fn test_step_applies_drag_then_gravity() {
        let mut p = Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(2.0, -5.0),
            size: 6.0,
            color: 0,
            rot: 0.0,
            spin: 0.1,
            life: 0,
            ttl: 150,
            shape: ParticleShape::Rect,
        };
        p.step(0.992, 0.18);
        assert!((p.vel.x - 1.984).abs() < 1e-5);
        assert!((p.vel.y - (-5.0 * 0.992 + 0.18)).abs() < 1e-5);
        assert!((p.pos.x - 11.984).abs() < 1e-4);
        assert!((p.rot - 0.1).abs() < 1e-6);
        assert_eq!(p.life, 1);
    }

    #[test]
    fn test_opacity_fades_linearly() {
        let mut p = burst(3).particles()[0].clone();
        p.ttl = 100;
        p.life = 25;
        assert!((p.opacity() - 0.75).abs() < 1e-6);
        p.life = 150;
        assert_eq!(p.opacity(), 0.0);
        p.ttl = 0;
        assert_eq!(p.opacity(), 0.0);
    }

    #[test]
    fn test_cull_removes_fallen_particles() {
        let mut engine = burst(4);
        engine.particles[0].pos.y = 641.0;
        engine.particles[1].pos.y = 639.0;
        let left = engine.cull(600.0);
        assert_eq!(left, 179);
    }

    #[test]
    fn test_burst_dies_out_by_max_ttl() {
        let mut engine = burst(5);
        let max_ttl = engine.tuning().max_ttl();
        for frame in 1..=max_ttl {
            let left = engine.step(600.0);
            assert!(engine.particles().iter().all(|p| p.life < p.ttl));
            if frame == max_ttl {
                assert_eq!(left, 0);
            }
        }
        assert!(engine.is_empty());
    }

    proptest! {
        #[test]
        fn prop_spawn_ttl_in_range(seed in any::<u64>()) {
            let engine = burst(seed);
            prop_assert_eq!(engine.particles().len(), CONFETTI_COUNT);
            for p in engine.particles() {
                prop_assert!(p.ttl >= 140 && p.ttl <= 199);
                prop_assert!((p.color as usize) < CONFETTI_COLORS.len());
            }
        }
    }
}
