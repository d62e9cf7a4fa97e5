// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition timing.
//!
//! Time is always supplied by the caller as a `Duration` since an arbitrary epoch (for
//! example the timestamp of an animation-frame callback).

use core::time::Duration;

/// Easing curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Symmetric cubic ease-in/ease-out.
    #[default]
    CubicInOut,
}

impl Ease {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// A timed interval with an easing curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    start: Duration,
    duration: Duration,
    ease: Ease,
}

impl Transition {
    /// Starts a transition at `start`.
    pub fn new(start: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            start,
            duration,
            ease,
        }
    }

    /// Returns eased progress at `now`. Times before `start` count as `0`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        self.ease
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Returns `true` once `now` has reached the end of the interval.
    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }
}
