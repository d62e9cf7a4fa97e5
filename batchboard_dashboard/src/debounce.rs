// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncing of bursty events.

use core::time::Duration;

/// Holds the latest value of a burst until the burst has been quiet for `delay`.
///
/// Every [`trigger`](Self::trigger) replaces the pending value and pushes the deadline
/// back; [`poll`](Self::poll) hands the value out once the deadline has passed.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns the quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records an event at `now`, replacing any pending value.
    pub fn trigger(&mut self, value: T, now: Duration) {
        self.pending = Some((now + self.delay, value));
    }

    /// Returns the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Drops the pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns `true` while a value waits for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn a_burst_fires_once_with_the_latest_value() {
        let mut d = Debouncer::new(ms(100));
        d.trigger(1, ms(0));
        d.trigger(2, ms(50));
        d.trigger(3, ms(90));
        assert_eq!(d.poll(ms(150)), None, "deadline moved to 190ms");
        assert_eq!(d.poll(ms(190)), Some(3));
        assert_eq!(d.poll(ms(500)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_the_pending_value() {
        let mut d = Debouncer::new(ms(100));
        d.trigger("scroll", ms(0));
        assert!(d.is_pending());
        d.cancel();
        assert_eq!(d.poll(ms(1000)), None);
    }
}
