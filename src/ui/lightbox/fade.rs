// SPDX-License-Identifier: MPL-2.0
//! Linear opacity transitions driven by animation frames.

use std::time::{Duration, Instant};

/// Length of every lightbox opacity transition.
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// Opacity moving linearly from one value to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Fade {
    /// A fade that already sits at `value`.
    #[must_use]
    pub fn settled(value: f32, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started: now,
            duration: FADE_DURATION,
        }
    }

    /// Uses `duration` instead of [`FADE_DURATION`] for later transitions.
    #[must_use]
    pub fn over(mut self, duration: Duration) -> Self {
        self.duration = duration.max(Duration::from_millis(1));
        self
    }

    /// Starts moving toward `target` from wherever the fade is at `now`.
    pub fn retarget(&mut self, target: f32, now: Instant) {
        if (self.to - target).abs() < f32::EPSILON {
            return;
        }
        self.from = self.value(now);
        self.to = target;
        self.started = now;
    }

    /// Opacity at `now`, in `[0, 1]`.
    #[must_use]
    pub fn value(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        let progress = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        (self.from + (self.to - self.from) * progress).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Returns whether the fade still changes after `now`.
    #[must_use]
    pub fn is_running(&self, now: Instant) -> bool {
        (self.from - self.to).abs() > f32::EPSILON
            && now.saturating_duration_since(self.started) < self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_fade_is_constant() {
        let now = Instant::now();
        let fade = Fade::settled(1.0, now);
        assert!((fade.value(now + FADE_DURATION) - 1.0).abs() < f32::EPSILON);
        assert!(!fade.is_running(now));
    }

    #[test]
    fn fade_moves_linearly_and_stops() {
        let now = Instant::now();
        let mut fade = Fade::settled(0.0, now);
        fade.retarget(1.0, now);
        assert!((fade.value(now + FADE_DURATION / 2) - 0.5).abs() < 0.01);
        assert!(fade.is_running(now + FADE_DURATION / 2));
        assert!((fade.value(now + FADE_DURATION * 2) - 1.0).abs() < f32::EPSILON);
        assert!(!fade.is_running(now + FADE_DURATION));
    }

    #[test]
    fn custom_duration_stretches_the_fade() {
        let now = Instant::now();
        let mut fade = Fade::settled(0.0, now).over(Duration::from_secs(1));
        fade.retarget(1.0, now);
        assert!((fade.value(now + Duration::from_millis(250)) - 0.25).abs() < 0.01);
        assert!(fade.is_running(now + FADE_DURATION));
    }

    #[test]
    fn retarget_midway_starts_from_current_value() {
        let now = Instant::now();
        let mut fade = Fade::settled(0.0, now);
        fade.retarget(1.0, now);
        let midway = now + FADE_DURATION / 2;
        fade.retarget(0.0, midway);
        assert!((fade.value(midway) - 0.5).abs() < 0.01);
        assert!(fade.value(midway + FADE_DURATION) < f32::EPSILON);
    }
}
