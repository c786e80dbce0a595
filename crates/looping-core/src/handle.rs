//! Frame request identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one pending "run before the next repaint" request.
///
/// Handles are issued by a frame scheduler in increasing order and are only
/// meaningful to the scheduler that issued them. The loop keeps the handle of
/// its outstanding request so it can cancel it, and so it can recognise a
/// frame that fires after the request was superseded.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameHandle(pub u64);

impl FrameHandle {
    /// Create a handle from a raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The handle that follows this one
    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Default for FrameHandle {
    /// The zero handle, which no scheduler issues
    fn default() -> Self {
        Self(0)
    }
}

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameHandle({})", self.0)
    }
}

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
