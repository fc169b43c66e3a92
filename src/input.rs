use crate::crop::Viewport;

/// Pointer and wheel state fed by platform events and read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pointer: [f64; 2],
    wheel: [f64; 2],
}

/// Value copy of [`InputState`] taken at the start of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Normalized to `[-1, 1]` with y pointing up.
    pub pointer: [f64; 2],
    /// Running sum of wheel deltas per axis.
    pub wheel: [f64; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer position given in page pixels.
    pub fn pointer_moved(&mut self, page_x: f64, page_y: f64, viewport: Viewport) {
        let width = f64::from(viewport.width());
        let height = f64::from(viewport.height());
        // Page y grows downward, shader y grows upward.
        self.pointer = [-1.0 + 2.0 * page_x / width, 1.0 - 2.0 * page_y / height];
    }

    /// Accumulates a wheel delta. No clamping and no decay.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) {
        self.wheel[0] += delta_x;
        self.wheel[1] += delta_y;
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer,
            wheel: self.wheel,
        }
    }
}
