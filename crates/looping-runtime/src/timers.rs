//! Timer update hook

use looping_core::Result;

/// The per-tick entry point of a timer facility (one-shot and interval
/// callbacks after N milliseconds, seconds, or minutes).
///
/// The loop calls `update_timers` exactly once per tick, after the
/// every-frame listeners, with the trailing alpha. What the facility does with
/// it is its own business.
pub trait TimerHook {
    fn update_timers(&mut self, alpha: f64) -> Result<()>;
}

impl<F> TimerHook for F
where
    F: FnMut(f64) -> Result<()>,
{
    fn update_timers(&mut self, alpha: f64) -> Result<()> {
        self(alpha)
    }
}
