//! Looping Runtime - Fixed-timestep loop infrastructure
//!
//! Provides the loop and the collaborators it drives:
//! - `FixedStepLoop` - lag accumulator fanning out to constant-rate and
//!   every-frame listeners
//! - `Clock` - millisecond time sources (`SystemClock`, `ManualClock`)
//! - `FrameScheduler` - the host's "run before next repaint" primitive
//! - `TimerHook` - per-tick entry point of a timer facility
//! - `LoopConfig` - TOML-loadable loop settings

mod clock;
mod config;
mod fixed_step;
mod listeners;
mod scheduler;
mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DrainPolicy, LoopConfig};
pub use fixed_step::{FixedStepLoop, StopHandle};
pub use listeners::{Listener, ListenerRegistry};
pub use scheduler::{FrameQueue, FrameScheduler};
pub use timers::TimerHook;
