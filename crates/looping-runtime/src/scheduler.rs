//! Frame scheduling primitive

use looping_core::FrameHandle;

/// A host facility that runs the loop "before the next repaint".
///
/// The loop calls `request_frame` once per scheduling cycle while running and
/// hands the returned handle back to `cancel_frame` when stopping. When the
/// frame fires, the host calls `FixedStepLoop::on_frame` with the handle.
pub trait FrameScheduler {
    /// Ask for the loop to be invoked on the next available frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A single-slot request queue that the host polls.
///
/// Headless hosts and tests drain it with [`FrameQueue::take_due`]; a windowed
/// host would instead map `request_frame` onto its redraw request.
#[derive(Debug, Default)]
pub struct FrameQueue {
    last_issued: FrameHandle,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the outstanding request, if any, so the host can fire it
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// The outstanding request without consuming it
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Total requests issued
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests withdrawn before firing
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.last_issued.next();
        self.last_issued = handle;
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}
