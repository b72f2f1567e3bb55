//! `requestAnimationFrame`-backed frame scheduler

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::frame::{FrameHandle, FrameScheduler};

type RafClosure = Closure<dyn FnMut(f64)>;

/// Schedules one persistent frame callback on the display refresh
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<RafClosure>>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Install the function run on every requested frame.
    /// Until this is called, requests fail.
    pub fn set_callback<F>(&self, f: F)
    where
        F: FnMut(f64) + 'static,
    {
        *self.callback.borrow_mut() = Some(Closure::new(f));
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}
