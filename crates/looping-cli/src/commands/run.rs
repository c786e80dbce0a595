//! Run command - drives a headless loop and reports how it behaved

use anyhow::{Context, Result};
use looping_runtime::{
    Clock, DrainPolicy, FixedStepLoop, FrameQueue, LoopConfig, SystemClock, TimerHook,
};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const GRAVITY: f64 = -9.81;
const RESTITUTION: f64 = 0.8;

pub struct RunArgs {
    pub config: Option<String>,
    pub fps: Option<f64>,
    pub policy: Option<DrainPolicy>,
    pub refresh: f64,
    pub frames: u64,
    pub format: String,
}

/// A ball bouncing on the floor, stepped at the fixed rate
#[derive(Debug, Clone, Copy)]
struct Body {
    height: f64,
    velocity: f64,
    previous_height: f64,
}

impl Body {
    fn dropped_from(height: f64) -> Self {
        Self {
            height,
            velocity: 0.0,
            previous_height: height,
        }
    }

    fn step(&mut self, dt: f64) {
        self.previous_height = self.height;
        self.velocity += GRAVITY * dt;
        self.height += self.velocity * dt;
        if self.height < 0.0 {
            self.height = -self.height;
            self.velocity = -self.velocity * RESTITUTION;
        }
    }

    /// Height blended between the last two steps
    fn interpolated(&self, alpha: f64) -> f64 {
        let alpha = alpha.clamp(0.0, 1.0);
        self.previous_height + (self.height - self.previous_height) * alpha
    }
}

/// Logs a line once every `interval` frames
struct FrameTimer {
    interval: u64,
    elapsed: u64,
    fired: Rc<Cell<u64>>,
}

impl TimerHook for FrameTimer {
    fn update_timers(&mut self, _alpha: f64) -> looping_core::Result<()> {
        self.elapsed += 1;
        if self.elapsed >= self.interval {
            self.elapsed = 0;
            self.fired.set(self.fired.get() + 1);
            log::info!("Timer fired ({} so far)", self.fired.get());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    fps: f64,
    refresh_hz: f64,
    drain: DrainPolicy,
    frames: u64,
    simulation_steps: u64,
    steps_per_frame: f64,
    timer_fires: u64,
    wall_ms: f64,
    final_height: f64,
    peak_render_height: f64,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => LoopConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path))?,
        None => LoopConfig::default(),
    };
    if let Some(fps) = args.fps {
        config = config.with_fps(fps);
    }
    if let Some(policy) = args.policy {
        config = config.with_drain(policy);
    }
    if !(args.refresh.is_finite() && args.refresh > 0.0) {
        anyhow::bail!("Refresh rate must be positive, got {}", args.refresh);
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        log::warn!("Failed to install signal handler: {}", e);
    }

    let summary = simulate(config, args.refresh, args.frames, &interrupted)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Run a bouncing-ball loop for `frames` frames (0 = until interrupted),
/// pacing frames at `refresh_hz`.
fn simulate(
    config: LoopConfig,
    refresh_hz: f64,
    frames: u64,
    interrupted: &AtomicBool,
) -> Result<RunSummary> {
    let mut looped = FixedStepLoop::new(config, SystemClock::new(), FrameQueue::new())
        .context("Invalid loop configuration")?;
    let dt = looped.milliseconds_per_frame() / 1000.0;

    let body = Rc::new(RefCell::new(Body::dropped_from(10.0)));
    let steps = Rc::new(Cell::new(0u64));
    let peak = Rc::new(Cell::new(0.0f64));
    let timer_fires = Rc::new(Cell::new(0u64));

    let sim_body = body.clone();
    let sim_steps = steps.clone();
    looped.register_constant(move |alpha| {
        // Catch-up calls carry alpha >= 1; the trailing call is sub-step
        if alpha >= 1.0 {
            sim_body.borrow_mut().step(dt);
            sim_steps.set(sim_steps.get() + 1);
        }
        Ok(())
    });

    let render_body = body.clone();
    let render_peak = peak.clone();
    looped.register_every_frame(move |alpha| {
        let height = render_body.borrow().interpolated(alpha);
        if height > render_peak.get() {
            render_peak.set(height);
        }
        log::trace!("Render height {:.4} (alpha {:.3})", height, alpha);
        Ok(())
    });

    looped.set_timer_hook(FrameTimer {
        interval: refresh_hz.round().max(1.0) as u64,
        elapsed: 0,
        fired: timer_fires.clone(),
    });

    let frame_interval = Duration::from_secs_f64(1.0 / refresh_hz);
    let started = looped.clock().now_ms();
    looped.start()?;

    while frames == 0 || looped.frame() < frames {
        if interrupted.load(Ordering::SeqCst) {
            log::info!("Interrupted, stopping loop");
            break;
        }
        let Some(handle) = looped.scheduler_mut().take_due() else {
            break;
        };
        std::thread::sleep(frame_interval);
        looped.on_frame(handle)?;
    }
    looped.stop();

    let wall_ms = looped.clock().now_ms() - started;
    let frame_count = looped.frame();
    let simulation_steps = steps.get();
    let final_height = body.borrow().height;
    Ok(RunSummary {
        fps: looped.fps(),
        refresh_hz,
        drain: looped.config().drain,
        frames: frame_count,
        simulation_steps,
        steps_per_frame: if frame_count == 0 {
            0.0
        } else {
            simulation_steps as f64 / frame_count as f64
        },
        timer_fires: timer_fires.get(),
        wall_ms,
        final_height,
        peak_render_height: peak.get(),
    })
}

fn print_summary(summary: &RunSummary) {
    println!("Loop summary:");
    println!("  Simulation rate: {} fps ({:?})", summary.fps, summary.drain);
    println!("  Refresh rate:    {} Hz", summary.refresh_hz);
    println!("  Frames:          {}", summary.frames);
    println!(
        "  Steps:           {} ({:.2} per frame)",
        summary.simulation_steps, summary.steps_per_frame
    );
    println!("  Timer fires:     {}", summary.timer_fires);
    println!("  Wall time:       {:.1}ms", summary.wall_ms);
    println!("  Final height:    {:.3}", summary.final_height);
    println!("  Peak rendered:   {:.3}", summary.peak_render_height);
}
