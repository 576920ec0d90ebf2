// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Once-per-second frame rate sampler for the menu bar readout.

use std::time::{Duration, Instant};

const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub struct FpsSampler {
    last_sample: Instant,
    frames: u32,
    fps: f32,
}

impl FpsSampler {
    pub fn new(now: Instant) -> Self {
        Self {
            last_sample: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame; refresh the reading once a full period has passed.
    pub fn tick(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.last_sample);
        if elapsed >= SAMPLE_PERIOD {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.last_sample = now;
            self.frames = 0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_updates_only_after_a_full_second() {
        let t0 = Instant::now();
        let mut s = FpsSampler::new(t0);
        for i in 1..=59 {
            s.tick(t0 + Duration::from_millis(i * 16));
        }
        approx::assert_relative_eq!(s.fps(), 0.0);
        s.tick(t0 + Duration::from_millis(1000));
        approx::assert_relative_eq!(s.fps(), 60.0, epsilon = 1e-3);
    }

    #[test]
    fn counter_resets_after_each_sample() {
        let t0 = Instant::now();
        let mut s = FpsSampler::new(t0);
        s.tick(t0 + Duration::from_secs(1));
        approx::assert_relative_eq!(s.fps(), 1.0);
        for i in 1..=30 {
            s.tick(t0 + Duration::from_secs(1) + Duration::from_millis(i * 66));
        }
        // sampled on the 16th frame, 1.056 s after the previous sample
        approx::assert_relative_eq!(s.fps(), 16.0 / 1.056, epsilon = 1e-3);
    }
}
