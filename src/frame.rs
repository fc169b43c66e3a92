//! Per-frame pipeline: recompute uniforms, re-crop the offsets bitmap with a
//! wheel-driven blur, upload, draw.

use std::cell::Cell;
use std::rc::Rc;

use crate::crop::{crop, Bitmap, CroppedFrame, Viewport};
use crate::error::{RefractError, Result};
use crate::input::InputSnapshot;

/// Monotonic start timestamp, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    start_ms: f64,
}

impl Clock {
    pub fn start(now_ms: f64) -> Self {
        Self { start_ms: now_ms }
    }

    pub fn elapsed(&self, now_ms: f64) -> f64 {
        (now_ms - self.start_ms).max(0.0)
    }
}

/// Shared stop flag checked at the top of every tick.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Blur applied to the offsets bitmap. Only positive horizontal scroll blurs;
/// scrolling back below zero clamps to a sharp image.
pub fn blur_radius(wheel_x: f64) -> f32 {
    wheel_x.max(0.0) as f32
}

/// Values written to the shader before each draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Milliseconds since the loop started.
    pub time: f32,
    pub mouse: [f32; 2],
    pub wheel: [f32; 2],
}

/// GPU side of a tick.
pub trait FrameTarget {
    fn upload_offsets(&mut self, frame: &CroppedFrame) -> Result<()>;
    fn write_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<()>;
    /// Draws the full-screen quad.
    fn draw(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Whether the driver should schedule another tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

pub struct FrameLoop {
    offsets: Bitmap,
    viewport: Viewport,
    cancel: CancelToken,
    clock: Clock,
    state: LoopState,
    /// Last offsets crop and the blur radius it was made with.
    last: Option<(f32, CroppedFrame)>,
}

impl FrameLoop {
    pub fn new(offsets: Bitmap, viewport: Viewport, cancel: CancelToken) -> Self {
        Self {
            offsets,
            viewport,
            cancel,
            clock: Clock::start(0.0),
            state: LoopState::Idle,
            last: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Captures the start time and enters the running state. Only the first
    /// call has an effect.
    pub fn start(&mut self, now_ms: f64) {
        if self.state == LoopState::Idle {
            self.clock = Clock::start(now_ms);
            self.state = LoopState::Running;
        }
    }

    /// Runs one frame against `target`.
    ///
    /// Any target failure moves the loop to [`LoopState::Stopped`] and is
    /// returned; nothing in the steady state is retried.
    pub fn tick<T: FrameTarget>(
        &mut self,
        now_ms: f64,
        input: InputSnapshot,
        target: &mut T,
    ) -> Result<Tick> {
        match self.state {
            LoopState::Idle => return Err(RefractError::LoopNotStarted),
            LoopState::Stopped => return Ok(Tick::Stop),
            LoopState::Running => {}
        }
        if self.cancel.is_cancelled() {
            log::info!("frame loop cancelled");
            self.state = LoopState::Stopped;
            return Ok(Tick::Stop);
        }

        match self.render(now_ms, input, target) {
            Ok(()) => Ok(Tick::Continue),
            Err(err) => {
                self.state = LoopState::Stopped;
                Err(err)
            }
        }
    }

    fn render<T: FrameTarget>(
        &mut self,
        now_ms: f64,
        input: InputSnapshot,
        target: &mut T,
    ) -> Result<()> {
        let time = self.clock.elapsed(now_ms);
        let radius = blur_radius(input.wheel[0]);
        log::trace!("frame at {time:.1}ms, blur {radius}");

        // Cropping is pure, so an unchanged radius reuses the previous frame.
        let offsets = match self.last.take() {
            Some((previous, frame)) if previous == radius => frame,
            _ => crop(&self.offsets, self.viewport, radius),
        };
        target.upload_offsets(&offsets)?;
        self.last = Some((radius, offsets));
        target.write_uniforms(&FrameUniforms {
            time: time as f32,
            mouse: [input.pointer[0] as f32, input.pointer[1] as f32],
            wheel: [input.wheel[0] as f32, input.wheel[1] as f32],
        })?;
        target.draw()
    }
}
