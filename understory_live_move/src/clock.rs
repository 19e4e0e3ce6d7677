// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time sources for animated moves.

use alloc::rc::Rc;
use core::cell::Cell;

/// A monotonic time source, in seconds.
pub trait Clock {
    /// Current time in seconds. Only differences are meaningful.
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// A clock that only advances when told to.
///
/// Clones share the same time, so a test can keep one handle and hand the
/// other to an [`AnimatedMove`](crate::AnimatedMove).
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a clock reading `0.0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time.
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    /// Advances the current time by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Wall-clock time since the clock was created.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a clock reading `0.0` now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(0.25);
        assert_eq!(clock.now(), 0.25);
        clock.set(2.0);
        assert_eq!((&handle).now(), 2.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_clock_is_monotonic() {
        let clock = StdClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
