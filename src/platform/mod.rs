//! Browser platform layer
//!
//! Handles the web-only parts:
//! - DOM element lookup and mutation (`dom`)
//! - Pointer and viewport reads (`input`)
//! - `requestAnimationFrame` scheduling (`raf`)

pub mod dom;
pub mod input;
pub mod raf;

pub use dom::PageView;
pub use input::{current_viewport, first_touch_point, mouse_point};
pub use raf::RafScheduler;
