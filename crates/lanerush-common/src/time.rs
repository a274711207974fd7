//! Seconds ⇄ frames conversion at a fixed simulation rate.
//!
//! Both directions truncate: `seconds_to_frames(0.26)` at 60 FPS is 15, and
//! `frames_to_seconds(119)` is 1. The HUD countdown relies on the latter.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate {
    fps: u32,
}

impl FrameRate {
    pub const fn new(fps: u32) -> Self {
        // A zero rate would divide by zero in frames_to_seconds
        let fps = if fps == 0 { 1 } else { fps };
        Self { fps }
    }

    pub const fn fps(&self) -> u32 {
        self.fps
    }

    /// `floor(seconds * fps)`; negative input yields 0
    pub fn seconds_to_frames(&self, seconds: f64) -> u32 {
        (seconds * self.fps as f64).floor().max(0.0) as u32
    }

    /// Whole seconds covered by `frames` (integer division)
    pub const fn frames_to_seconds(&self, frames: u32) -> u32 {
        frames / self.fps
    }

    /// Target duration of one frame in milliseconds
    pub fn frame_budget_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_seconds_round_trip() {
        let rate = FrameRate::new(60);
        for s in 0..=120u32 {
            let frames = rate.seconds_to_frames(s as f64);
            assert_eq!(frames, s * 60);
            assert_eq!(rate.frames_to_seconds(frames), s);
        }
    }

    #[test]
    fn fractional_seconds_truncate() {
        let rate = FrameRate::new(60);
        assert_eq!(rate.seconds_to_frames(0.25), 15);
        assert_eq!(rate.seconds_to_frames(0.26), 15);
        assert_eq!(rate.seconds_to_frames(2.0), 120);
        assert_eq!(rate.frames_to_seconds(119), 1);
        assert_eq!(rate.frames_to_seconds(59), 0);
    }

    #[test]
    fn zero_rate_is_clamped() {
        let rate = FrameRate::new(0);
        assert_eq!(rate.fps(), 1);
        assert_eq!(rate.frames_to_seconds(5), 5);
    }
}
