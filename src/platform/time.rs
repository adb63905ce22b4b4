//! Frame timing

use crate::consts::{FRAME_MS, MAX_FRAME_DT};

/// Turns successive host timestamps (ms) into deltas measured in nominal
/// 60 Hz frames, capped so a stalled tab cannot fast-forward the machine.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call. The first call yields 0.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let Some(last) = self.last.replace(timestamp_ms) else {
            return 0.0;
        };
        let frames = ((timestamp_ms - last) / FRAME_MS) as f32;
        if frames.is_finite() {
            frames.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        }
    }

    /// Forget the previous timestamp (next delta is 0)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
