//! Page logic
//!
//! Everything here is pure and testable off the web:
//! - Seeded RNG only
//! - Frame-counted physics (no wall clock)
//! - No DOM or platform dependencies

pub mod confetti;
pub mod dodge;
pub mod session;

pub use confetti::{ConfettiEngine, Particle, ParticleShape};
pub use dodge::{Dodge, DodgeController, DodgeState, ESCALATIONS, Layout};
pub use session::{Session, SessionPhase};
