//! Pointer and viewport reads

use glam::Vec2;
use web_sys::{MouseEvent, TouchEvent, Window};

use crate::Viewport;

/// Mouse position in client coordinates
pub fn mouse_point(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// First active touch in client coordinates; `None` when the list is empty
pub fn first_touch_point(event: &TouchEvent) -> Option<Vec2> {
    event
        .touches()
        .get(0)
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
}

/// Current viewport size and pixel density
pub fn current_viewport(window: &Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width as f32, height as f32, window.device_pixel_ratio())
}
