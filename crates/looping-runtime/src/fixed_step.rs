//! Fixed-timestep loop with a lag accumulator
//!
//! Each tick measures elapsed time, runs constant-rate listeners until the
//! accumulator drops below one step, then runs them once more together with
//! the every-frame listeners and the timer hook, all with the same trailing
//! alpha. The scheduling loop re-arms itself through a [`FrameScheduler`]
//! for as long as the loop is running.

use crate::clock::Clock;
use crate::config::{is_valid_fps, DrainPolicy, LoopConfig};
use crate::listeners::ListenerRegistry;
use crate::scheduler::FrameScheduler;
use crate::timers::TimerHook;
use looping_core::{FrameHandle, LoopError, Result};
use std::cell::Cell;
use std::rc::Rc;

/// Shared running flag.
///
/// Listeners cannot borrow the loop that is calling them, so they stop it
/// through a clone of this handle instead. The flag is only checked when the
/// loop decides whether to request another frame: the current tick always
/// runs to completion.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    /// Ask the loop to stop rescheduling
    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    fn set_running(&self, running: bool) {
        self.0.set(running);
    }
}

/// A fixed-timestep scheduler driving constant-rate and every-frame listeners.
///
/// All listener calls happen synchronously on the caller's thread, in
/// registration order. A listener that never returns stalls the loop.
pub struct FixedStepLoop<C: Clock, S: FrameScheduler> {
    config: LoopConfig,
    /// Step interval in milliseconds, always `1000 / config.fps`
    step_interval_ms: f64,
    previous_time_ms: f64,
    lag_ms: f64,
    frame_count: u64,
    /// Catch-up iterations run by the last tick
    catch_up_steps: u32,
    running: StopHandle,
    scheduled: Option<FrameHandle>,
    listeners: ListenerRegistry,
    timer_hook: Option<Box<dyn TimerHook>>,
    clock: C,
    scheduler: S,
}

impl<C: Clock, S: FrameScheduler> FixedStepLoop<C, S> {
    /// Create a stopped loop. Fails if the config does not validate.
    pub fn new(config: LoopConfig, clock: C, scheduler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            step_interval_ms: 1000.0 / config.fps,
            config,
            previous_time_ms: 0.0,
            lag_ms: 0.0,
            frame_count: 0,
            catch_up_steps: 0,
            running: StopHandle::default(),
            scheduled: None,
            listeners: ListenerRegistry::new(),
            timer_hook: None,
            clock,
            scheduler,
        })
    }

    pub fn fps(&self) -> f64 {
        self.config.fps
    }

    /// Change the simulation rate. Rejects non-positive and non-finite values
    /// without touching the current rate.
    pub fn set_fps(&mut self, fps: f64) -> Result<()> {
        if !is_valid_fps(fps) {
            return Err(LoopError::InvalidFps(fps));
        }
        self.config.fps = fps;
        self.step_interval_ms = 1000.0 / fps;
        Ok(())
    }

    /// Length of one simulation step in milliseconds
    pub fn milliseconds_per_frame(&self) -> f64 {
        self.step_interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    /// Number of ticks run since construction. Survives stop/start.
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Unprocessed time in milliseconds
    pub fn lag(&self) -> f64 {
        self.lag_ms
    }

    /// Clock reading taken by the last tick or start
    pub fn previous_time(&self) -> f64 {
        self.previous_time_ms
    }

    /// Handle of the outstanding frame request, if any
    pub fn request_id(&self) -> Option<FrameHandle> {
        self.scheduled
    }

    /// Catch-up iterations run by the last tick, excluding the trailing call
    pub fn catch_up_steps(&self) -> u32 {
        self.catch_up_steps
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// A handle that stops the loop from inside a listener
    pub fn stop_handle(&self) -> StopHandle {
        self.running.clone()
    }

    /// Register a listener that runs at the fixed simulation rate
    pub fn register_constant<F>(&mut self, listener: F)
    where
        F: FnMut(f64) -> Result<()> + 'static,
    {
        self.listeners.push_constant(Box::new(listener));
    }

    /// Register a listener that runs once per rendered frame
    pub fn register_every_frame<F>(&mut self, listener: F)
    where
        F: FnMut(f64) -> Result<()> + 'static,
    {
        self.listeners.push_every_frame(Box::new(listener));
    }

    /// Install the timer facility driven once per tick, replacing any previous one
    pub fn set_timer_hook<H>(&mut self, hook: H)
    where
        H: TimerHook + 'static,
    {
        self.timer_hook = Some(Box::new(hook));
    }

    /// Start the loop if it is not already running.
    ///
    /// Resets the accumulator and the previous-time reading, runs the first
    /// frame immediately and requests the next one. While running this is a
    /// no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.running.set_running(true);
        self.previous_time_ms = self.clock.now_ms();
        self.lag_ms = 0.0;
        log::debug!(
            "Loop started at {:.3}ms ({} fps, {:?}, {} constant / {} every-frame listeners)",
            self.previous_time_ms,
            self.config.fps,
            self.config.drain,
            self.listeners.constant_len(),
            self.listeners.every_frame_len()
        );
        self.launch_loop()
    }

    /// Stop rescheduling and withdraw the outstanding frame request.
    ///
    /// Counters and listeners are kept, so a later `start` resumes with the
    /// same frame count.
    pub fn stop(&mut self) {
        self.running.stop();
        if let Some(handle) = self.scheduled.take() {
            self.scheduler.cancel_frame(handle);
        }
        log::debug!("Loop stopped after {} frames", self.frame_count);
    }

    /// Entry point for the host when a requested frame fires.
    ///
    /// Frames that do not match the outstanding request were superseded by a
    /// stop or restart and are ignored. On a listener failure the loop stops
    /// and the error is returned.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Result<()> {
        if self.scheduled != Some(handle) {
            log::trace!("Ignoring stale frame request {}", handle);
            return Ok(());
        }
        self.scheduled = None;
        self.run_frame()
    }

    fn launch_loop(&mut self) -> Result<()> {
        if let Some(stale) = self.scheduled.take() {
            self.scheduler.cancel_frame(stale);
        }
        self.run_frame()
    }

    fn run_frame(&mut self) -> Result<()> {
        if let Err(err) = self.tick() {
            log::error!("Frame {} failed, stopping loop: {}", self.frame_count, err);
            self.running.stop();
            return Err(err);
        }
        if self.is_running() {
            self.scheduled = Some(self.scheduler.request_frame());
        }
        Ok(())
    }

    /// Advance the loop by one tick.
    ///
    /// Can be called directly to step the loop without a scheduler. The
    /// first listener error aborts the tick before the frame counter moves.
    pub fn tick(&mut self) -> Result<()> {
        let now = self.clock.now_ms();
        let elapsed = self.clamp_elapsed(now - self.previous_time_ms);
        self.previous_time_ms = now;
        self.lag_ms += elapsed;

        self.catch_up_steps = 0;
        let limit = self.config.max_catch_up_steps;
        while self.lag_ms >= self.step_interval_ms {
            if limit != 0 && self.catch_up_steps >= limit {
                let dropped = self.lag_ms;
                self.lag_ms %= self.step_interval_ms;
                log::warn!(
                    "Catch-up limit of {} steps reached, dropping {:.3}ms of lag",
                    limit,
                    dropped - self.lag_ms
                );
                break;
            }

            let alpha = self.alpha();
            let before = self.clock.now_ms();
            self.listeners.call_constant(alpha)?;
            let update_cost = (self.clock.now_ms() - before).max(0.0);

            match self.config.drain {
                DrainPolicy::FixedStep => self.lag_ms -= self.step_interval_ms,
                DrainPolicy::UpdateCost => self.lag_ms = (self.lag_ms - update_cost).max(0.0),
            }
            self.catch_up_steps += 1;
        }

        let alpha = self.alpha();
        self.listeners.call_constant(alpha)?;
        self.listeners.call_every_frame(alpha)?;
        if let Some(hook) = self.timer_hook.as_mut() {
            hook.update_timers(alpha)?;
        }
        self.frame_count += 1;

        log::trace!(
            "Tick {}: {:.3}ms elapsed, {} catch-up steps, alpha {:.3}",
            self.frame_count,
            elapsed,
            self.catch_up_steps,
            alpha
        );
        Ok(())
    }

    fn alpha(&self) -> f64 {
        self.lag_ms / self.step_interval_ms
    }

    fn clamp_elapsed(&self, elapsed: f64) -> f64 {
        if elapsed < 0.0 {
            log::warn!("Clock went backwards by {:.3}ms", -elapsed);
            return 0.0;
        }
        // Avoid spiral of death after a long stall
        elapsed.min(self.config.max_frame_ms)
    }
}

impl<C: Clock, S: FrameScheduler> Drop for FixedStepLoop<C, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.scheduled.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::scheduler::FrameQueue;
    use proptest::prelude::*;
    use std::cell::RefCell;

    type TestLoop = FixedStepLoop<ManualClock, FrameQueue>;

    fn make_loop(config: LoopConfig) -> (TestLoop, ManualClock) {
        let clock = ManualClock::new(0.0);
        let lp = FixedStepLoop::new(config, clock.clone(), FrameQueue::new()).unwrap();
        (lp, clock)
    }

    fn counting() -> (Rc<Cell<u32>>, impl FnMut(f64) -> Result<()>) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move |_| {
            inner.set(inner.get() + 1);
            Ok(())
        })
    }

    /// Fire queued frames until the loop stops requesting them
    fn pump(lp: &mut TestLoop, clock: &ManualClock, step_ms: f64, max_frames: usize) {
        for _ in 0..max_frames {
            let Some(handle) = lp.scheduler_mut().take_due() else {
                return;
            };
            clock.advance(step_ms);
            lp.on_frame(handle).unwrap();
        }
    }

    #[test]
    fn test_fps_updates_interval() {
        let (mut lp, _) = make_loop(LoopConfig::default());
        assert_eq!(lp.fps(), 60.0);

        lp.set_fps(10.0).unwrap();
        assert_eq!(lp.milliseconds_per_frame(), 100.0);
        lp.set_fps(50.0).unwrap();
        assert_eq!(lp.milliseconds_per_frame(), 1000.0 / 50.0);
        assert_eq!(lp.fps(), 50.0);
    }

    #[test]
    fn test_fps_rejects_invalid() {
        let (mut lp, _) = make_loop(LoopConfig::default().with_fps(25.0));
        for bad in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(lp.set_fps(bad), Err(LoopError::InvalidFps(_))));
        }
        assert_eq!(lp.fps(), 25.0);
        assert_eq!(lp.milliseconds_per_frame(), 40.0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = FixedStepLoop::new(
            LoopConfig::default().with_fps(-1.0),
            ManualClock::new(0.0),
            FrameQueue::new(),
        );
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_interval_tracks_fps(fps in 0.001f64..100_000.0) {
            let (mut lp, _) = make_loop(LoopConfig::default());
            lp.set_fps(fps).unwrap();
            prop_assert_eq!(lp.milliseconds_per_frame(), 1000.0 / fps);
        }
    }

    #[test]
    fn test_start_and_stop() {
        let (mut lp, _) = make_loop(LoopConfig::default());
        assert!(!lp.is_running());

        lp.start().unwrap();
        assert!(lp.is_running());
        assert!(lp.request_id().is_some());

        lp.stop();
        assert!(!lp.is_running());
        assert!(lp.request_id().is_none());
        assert_eq!(lp.scheduler().cancelled(), 1);
    }

    #[test]
    fn test_start_runs_first_frame() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        clock.set(500.0);
        lp.start().unwrap();

        assert_eq!(lp.frame(), 1);
        assert_eq!(lp.previous_time(), 500.0);
        assert_eq!(lp.lag(), 0.0);
        assert_eq!(lp.scheduler().requested(), 1);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        lp.start().unwrap();

        clock.advance(10.0);
        lp.tick().unwrap();
        let lag = lp.lag();
        let previous = lp.previous_time();
        let frame = lp.frame();

        lp.start().unwrap();
        assert_eq!(lp.lag(), lag);
        assert_eq!(lp.previous_time(), previous);
        assert_eq!(lp.frame(), frame);
        assert_eq!(lp.scheduler().requested(), 1);
    }

    #[test]
    fn test_restart_resets_accumulator_not_frame() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        lp.start().unwrap();
        clock.advance(10.0);
        lp.tick().unwrap();
        assert_eq!(lp.lag(), 10.0);
        lp.stop();

        clock.set(1000.0);
        lp.start().unwrap();
        assert_eq!(lp.lag(), 0.0);
        assert_eq!(lp.previous_time(), 1000.0);
        // Two frames before the restart plus the restart's own first frame
        assert_eq!(lp.frame(), 3);
    }

    #[test]
    fn test_tick_sets_previous_time() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        lp.previous_time_ms = 90.0;
        clock.set(100.0);

        lp.tick().unwrap();
        assert_eq!(lp.previous_time(), 100.0);
    }

    #[test]
    fn test_tick_accumulates_lag() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        lp.previous_time_ms = 90.0;
        clock.set(100.0);

        lp.tick().unwrap();
        assert_eq!(lp.lag(), 10.0);

        clock.set(106.0);
        lp.tick().unwrap();
        assert_eq!(lp.lag(), 16.0);
        assert_eq!(lp.catch_up_steps(), 0);
    }

    #[test]
    fn test_tick_increments_frame() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        assert_eq!(lp.frame(), 0);

        clock.set(100.0);
        lp.tick().unwrap();
        assert_eq!(lp.frame(), 1);

        // No time passing still counts as a frame
        lp.tick().unwrap();
        assert_eq!(lp.frame(), 2);
    }

    #[test]
    fn test_every_frame_listeners_once_in_order() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b"] {
            let order = order.clone();
            lp.register_every_frame(move |_| {
                order.borrow_mut().push(name);
                Ok(())
            });
        }

        clock.set(100.0);
        lp.tick().unwrap();
        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_constant_listeners_at_least_once() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        let (a, listener_a) = counting();
        let (b, listener_b) = counting();
        lp.register_constant(listener_a);
        lp.register_constant(listener_b);

        lp.previous_time_ms = 90.0;
        clock.set(100.0);
        lp.tick().unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn test_constant_listeners_catch_up() {
        let (mut lp, clock) = make_loop(LoopConfig::default().with_fps(60.0));
        let (count, listener) = counting();
        lp.register_constant(listener);

        lp.previous_time_ms = 100.0;
        clock.set(140.0);
        lp.tick().unwrap();

        // 40ms at ~16.67ms per step: two catch-up steps plus the trailing call
        assert!(count.get() >= 2);
        assert_eq!(count.get(), 3);
        assert_eq!(lp.catch_up_steps(), 2);
        assert!(lp.lag() >= 0.0 && lp.lag() < lp.milliseconds_per_frame());
    }

    #[test]
    fn test_update_cost_drain() {
        let config = LoopConfig::default()
            .with_fps(60.0)
            .with_drain(DrainPolicy::UpdateCost);
        let (mut lp, clock) = make_loop(config);
        let (count, listener) = counting();
        lp.register_constant(listener);

        lp.previous_time_ms = 100.0;
        // tick start, before the catch-up call, after the catch-up call
        clock.script([120.0, 120.0, 140.0]);
        lp.tick().unwrap();

        assert_eq!(count.get(), 2);
        assert_eq!(lp.lag(), 0.0);
        assert_eq!(clock.reads(), 3);
    }

    #[test]
    fn test_update_cost_larger_than_lag_stops_at_zero() {
        let config = LoopConfig::default()
            .with_fps(100.0)
            .with_drain(DrainPolicy::UpdateCost);
        let (mut lp, clock) = make_loop(config);
        let (count, listener) = counting();
        lp.register_constant(listener);

        // 15ms of lag, then a catch-up step that costs 30ms
        clock.script([15.0, 15.0, 45.0]);
        lp.tick().unwrap();

        assert_eq!(lp.catch_up_steps(), 1);
        assert_eq!(count.get(), 2);
        assert_eq!(lp.lag(), 0.0);
    }

    #[test]
    fn test_update_cost_clock_regression_adds_no_lag() {
        let config = LoopConfig::default()
            .with_fps(100.0)
            .with_drain(DrainPolicy::UpdateCost)
            .with_max_catch_up_steps(2);
        let (mut lp, clock) = make_loop(config);
        let alphas = Rc::new(RefCell::new(Vec::new()));
        let seen = alphas.clone();
        lp.register_constant(move |alpha| {
            seen.borrow_mut().push(alpha);
            Ok(())
        });

        // The clock steps back by 5ms across the first catch-up call
        clock.script([25.0, 25.0, 20.0]);
        lp.tick().unwrap();

        // Lag stays at 25 rather than growing to 30, then the limit trims it
        assert_eq!(*alphas.borrow(), vec![2.5, 2.5, 0.5]);
        assert_eq!(lp.lag(), 5.0);
    }

    #[test]
    fn test_new_rejects_unbounded_update_cost() {
        let config = LoopConfig::default()
            .with_drain(DrainPolicy::UpdateCost)
            .with_max_catch_up_steps(0);
        let result = FixedStepLoop::new(config, ManualClock::new(0.0), FrameQueue::new());
        assert!(matches!(result, Err(LoopError::InvalidConfig(_))));
    }

    #[test]
    fn test_catch_up_limit_terminates_frozen_clock() {
        let config = LoopConfig::default()
            .with_fps(100.0)
            .with_drain(DrainPolicy::UpdateCost)
            .with_max_catch_up_steps(2);
        let (mut lp, clock) = make_loop(config);
        let (count, listener) = counting();
        lp.register_constant(listener);

        clock.set(45.0);
        lp.tick().unwrap();

        assert_eq!(lp.catch_up_steps(), 2);
        assert_eq!(count.get(), 3);
        assert_eq!(lp.lag(), 5.0);
    }

    #[test]
    fn test_elapsed_clamped_to_max_frame() {
        let config = LoopConfig::default()
            .with_fps(100.0)
            .with_max_frame_ms(250.0);
        let (mut lp, clock) = make_loop(config);

        clock.set(1000.0);
        lp.tick().unwrap();
        assert_eq!(lp.catch_up_steps(), 25);
        assert_eq!(lp.lag(), 0.0);
        assert_eq!(lp.previous_time(), 1000.0);
    }

    #[test]
    fn test_clock_regression_adds_no_lag() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        lp.previous_time_ms = 100.0;
        clock.set(50.0);

        lp.tick().unwrap();
        assert_eq!(lp.lag(), 0.0);
        assert_eq!(lp.previous_time(), 50.0);
    }

    #[test]
    fn test_trailing_alpha_shared() {
        let (mut lp, clock) = make_loop(LoopConfig::default().with_fps(100.0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let constant = seen.clone();
        lp.register_constant(move |alpha| {
            constant.borrow_mut().push(("constant", alpha));
            Ok(())
        });
        let frame = seen.clone();
        lp.register_every_frame(move |alpha| {
            frame.borrow_mut().push(("frame", alpha));
            Ok(())
        });
        let timer = seen.clone();
        lp.set_timer_hook(move |alpha: f64| -> Result<()> {
            timer.borrow_mut().push(("timer", alpha));
            Ok(())
        });

        clock.set(25.0);
        lp.tick().unwrap();

        // Two catch-up steps at alpha 2.5 and 1.5, then the trailing calls at 0.5
        assert_eq!(
            *seen.borrow(),
            vec![
                ("constant", 2.5),
                ("constant", 1.5),
                ("constant", 0.5),
                ("frame", 0.5),
                ("timer", 0.5),
            ]
        );
    }

    #[test]
    fn test_timer_hook_once_per_tick() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        let (count, hook) = counting();
        lp.set_timer_hook(hook);

        clock.set(100.0);
        lp.tick().unwrap();
        assert_eq!(count.get(), 1);
        clock.set(500.0);
        lp.tick().unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_scheduling_loop_reschedules_while_running() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        let (count, listener) = counting();
        lp.register_every_frame(listener);

        lp.start().unwrap();
        pump(&mut lp, &clock, 16.0, 4);

        assert_eq!(count.get(), 5);
        assert_eq!(lp.frame(), 5);
        assert!(lp.is_running());
        assert!(lp.request_id().is_some());
    }

    #[test]
    fn test_stop_handle_inside_listener() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        let handle = lp.stop_handle();
        let calls = Rc::new(Cell::new(0));
        let inner = calls.clone();
        lp.register_every_frame(move |_| {
            inner.set(inner.get() + 1);
            if inner.get() == 3 {
                handle.stop();
            }
            Ok(())
        });

        lp.start().unwrap();
        pump(&mut lp, &clock, 16.0, 100);

        // The stopping tick completes, then nothing is rescheduled
        assert_eq!(calls.get(), 3);
        assert_eq!(lp.frame(), 3);
        assert!(!lp.is_running());
        assert!(lp.scheduler().pending().is_none());
    }

    #[test]
    fn test_stale_frame_ignored_after_restart() {
        let (mut lp, _) = make_loop(LoopConfig::default());
        lp.start().unwrap();
        let first = lp.request_id().unwrap();
        lp.stop();
        lp.start().unwrap();
        let frame = lp.frame();

        lp.on_frame(first).unwrap();
        assert_eq!(lp.frame(), frame);
        assert_ne!(lp.request_id(), Some(first));
    }

    #[test]
    fn test_listener_error_halts_loop() {
        let (mut lp, clock) = make_loop(LoopConfig::default());
        let calls = Rc::new(Cell::new(0));
        let inner = calls.clone();
        lp.register_constant(move |_| {
            inner.set(inner.get() + 1);
            if inner.get() > 1 {
                return Err(LoopError::listener("simulation diverged"));
            }
            Ok(())
        });

        lp.start().unwrap();
        assert_eq!(lp.frame(), 1);

        let handle = lp.scheduler_mut().take_due().unwrap();
        clock.advance(5.0);
        let err = lp.on_frame(handle).unwrap_err();

        assert!(matches!(err, LoopError::Listener(_)));
        assert_eq!(lp.frame(), 1);
        assert!(!lp.is_running());
        assert!(lp.request_id().is_none());
        assert!(lp.scheduler().pending().is_none());
    }

    struct RecordingScheduler {
        next: u64,
        cancelled: Rc<RefCell<Vec<FrameHandle>>>,
    }

    impl FrameScheduler for RecordingScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next += 1;
            FrameHandle::from_raw(self.next)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.borrow_mut().push(handle);
        }
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let scheduler = RecordingScheduler {
            next: 0,
            cancelled: cancelled.clone(),
        };
        let mut lp =
            FixedStepLoop::new(LoopConfig::default(), ManualClock::new(0.0), scheduler).unwrap();
        lp.start().unwrap();
        let pending = lp.request_id().unwrap();

        drop(lp);
        assert_eq!(*cancelled.borrow(), vec![pending]);
    }
}
