//! Listener registry

use looping_core::Result;

/// A callback driven by the loop. Receives the interpolation alpha
/// (`lag / step_interval`) of the moment it is called.
pub type Listener = Box<dyn FnMut(f64) -> Result<()>>;

/// Two append-only listener sequences.
///
/// Listeners are invoked in registration order. Constant listeners run at the
/// fixed simulation rate, possibly several times per tick; every-frame
/// listeners run exactly once per tick.
#[derive(Default)]
pub struct ListenerRegistry {
    constant: Vec<Listener>,
    every_frame: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_constant(&mut self, listener: Listener) {
        self.constant.push(listener);
    }

    pub fn push_every_frame(&mut self, listener: Listener) {
        self.every_frame.push(listener);
    }

    /// Run every constant listener once. Stops at the first failure.
    pub fn call_constant(&mut self, alpha: f64) -> Result<()> {
        call_all(&mut self.constant, alpha)
    }

    /// Run every every-frame listener once. Stops at the first failure.
    pub fn call_every_frame(&mut self, alpha: f64) -> Result<()> {
        call_all(&mut self.every_frame, alpha)
    }

    pub fn constant_len(&self) -> usize {
        self.constant.len()
    }

    pub fn every_frame_len(&self) -> usize {
        self.every_frame.len()
    }
}

fn call_all(listeners: &mut [Listener], alpha: f64) -> Result<()> {
    for listener in listeners.iter_mut() {
        listener(alpha)?;
    }
    Ok(())
}
