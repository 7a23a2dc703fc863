/// Fixed timestep clock.
/// Turns variable browser frame deltas into whole logic steps, so the runner
/// only wakes the game at the fixed cadence.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// The fixed delta time per step.
    dt: f32,
    /// Frame time not yet consumed by a whole step.
    accumulator: f32,
}

impl FrameClock {
    /// Most steps a single frame may produce (a backgrounded tab returns with a huge delta).
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_nan() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator = (self.accumulator + frame_dt).min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}
