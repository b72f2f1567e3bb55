//! Confetti rendering
//!
//! The draw step talks to a `Surface`; on the web that is a 2D canvas.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::consts::CONFETTI_RECT_ASPECT;
use crate::sim::{Particle, ParticleShape};

/// Something the confetti can be painted on
pub trait Surface {
    /// Wipe the whole visible area
    fn clear(&mut self);

    /// Filled rectangle centered on `center`, rotated by `rotation` radians
    fn fill_rect(&mut self, center: Vec2, rotation: f32, size: Vec2, color: &str, alpha: f32);

    /// Filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32);
}

/// Paint one particle at its current transform and opacity
pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, p: &Particle) {
    let alpha = p.opacity();
    match p.shape {
        ParticleShape::Rect => surface.fill_rect(
            p.pos,
            p.rot,
            Vec2::new(p.size, p.size * CONFETTI_RECT_ASPECT),
            p.color_hex(),
            alpha,
        ),
        ParticleShape::Circle => surface.fill_circle(p.pos, p.size / 2.0, p.color_hex(), alpha),
    }
}

/// Clear, then paint every particle
pub fn draw_confetti<S: Surface + ?Sized>(surface: &mut S, particles: &[Particle]) {
    surface.clear();
    for p in particles {
        draw_particle(surface, p);
    }
}

/// Surface that only counts what was drawn
#[derive(Debug, Clone, Default)]
pub struct CountingSurface {
    pub clears: usize,
    pub rects: usize,
    pub circles: usize,
    /// True when nothing was drawn since the last clear
    pub blank: bool,
}

impl Surface for CountingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.blank = true;
    }

    fn fill_rect(&mut self, _center: Vec2, _rotation: f32, _size: Vec2, _color: &str, _alpha: f32) {
        self.rects += 1;
        self.blank = false;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str, _alpha: f32) {
        self.circles += 1;
        self.blank = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(shape: ParticleShape) -> Particle {
        Particle {
            pos: Vec2::new(5.0, 5.0),
            vel: Vec2::ZERO,
            size: 8.0,
            color: 3,
            rot: 0.5,
            spin: 0.0,
            life: 50,
            ttl: 100,
            shape,
        }
    }

    #[derive(Default)]
    struct Recording {
        calls: Vec<String>,
    }

    impl Surface for Recording {
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }
        fn fill_rect(&mut self, c: Vec2, rot: f32, size: Vec2, color: &str, alpha: f32) {
            self.calls.push(format!(
                "rect {} {} {} {}x{} {} {}",
                c.x, c.y, rot, size.x, size.y, color, alpha
            ));
        }
        fn fill_circle(&mut self, c: Vec2, r: f32, color: &str, alpha: f32) {
            self.calls.push(format!("circle {} {} {} {} {}", c.x, c.y, r, color, alpha));
        }
    }

    #[test]
    fn test_draw_confetti_clears_first() {
        let mut surface = Recording::default();
        draw_confetti(
            &mut surface,
            &[particle(ParticleShape::Rect), particle(ParticleShape::Circle)],
        );
        assert_eq!(surface.calls.len(), 3);
        assert_eq!(surface.calls[0], "clear");
        assert_eq!(surface.calls[1], "rect 5 5 0.5 8x5.2 #ffd166 0.5");
        assert_eq!(surface.calls[2], "circle 5 5 4 #ffd166 0.5");
    }

    #[test]
    fn test_counting_surface_tracks_blank() {
        let mut surface = CountingSurface::default();
        draw_confetti(&mut surface, &[particle(ParticleShape::Rect)]);
        assert!(!surface.blank);
        surface.clear();
        assert!(surface.blank);
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.rects, 1);
    }
}
