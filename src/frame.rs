//! Frame scheduling
//!
//! The confetti loop never calls the browser directly. It asks a
//! `FrameScheduler` for "one more frame" and remembers the pending handle,
//! which is what keeps a second burst from starting a second loop.

use serde::Serialize;

/// Opaque id of a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameHandle(pub i32);

/// "Schedule next frame" capability
pub trait FrameScheduler {
    /// Ask for the frame callback to run once more.
    /// `None` means the request could not be made.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Withdraw a pending request
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Tracks whether a frame is pending
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimationLoop {
    pending: Option<FrameHandle>,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a frame request is outstanding
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mark the start of a frame; the request that led here is spent
    pub fn begin_frame(&mut self) {
        self.pending = None;
        self.frames += 1;
    }

    /// Request the next frame unless one is already pending
    pub fn request<F: FrameScheduler>(&mut self, scheduler: &mut F) {
        if self.pending.is_none() {
            self.pending = scheduler.request_frame();
        }
    }

    /// Cancel any pending frame; the loop goes idle
    pub fn stop<F: FrameScheduler>(&mut self, scheduler: &mut F) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}

/// Scheduler driven by hand: requests queue up until `take_pending`
///
/// Used by the headless native build and by tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending request, as if the display refreshed
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        self.requested += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}
