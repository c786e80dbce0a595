//! Looping Core - Foundational types for the Looping scheduler
//!
//! This crate provides the types every other Looping crate depends on:
//! - `FrameHandle` - Identifier for a pending frame request
//! - Error types and Result alias

mod error;
mod handle;

pub use error::{LoopError, Result};
pub use handle::FrameHandle;
