// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::clock::Clock;
use crate::easing::{EaseWay, Easing, ease, lerp};
use crate::live_move::{LiveMove, MoveOutcome};

/// Default ease window for displaced elements, in seconds.
pub const DEFAULT_DURATION: f64 = 0.1;

/// Marks an element whose animation has finished.
const SETTLED: f64 = f64::NEG_INFINITY;

/// A [`LiveMove`] whose stationary elements ease toward their targets.
///
/// When the insertion point changes, every element whose target changed
/// starts a new cubic ease-out from wherever it currently is, so elements
/// shifting several times during a fast drag never jump. Elements whose
/// target did not change keep their running animation. The moving block
/// follows the pointer without easing.
///
/// ```rust
/// use understory_live_move::{AnimatedMove, LiveMove, ManualClock};
///
/// let clock = ManualClock::new();
/// let live = LiveMove::start(0, 1, 0..3, 0.0, |_| 10.0);
/// let mut anim = AnimatedMove::new(live, clock.clone());
///
/// anim.update(20.0);
/// // Element 1 starts easing toward 0 from 10.
/// assert_eq!(anim.positions()[1], 10.0);
/// clock.advance(0.05);
/// assert!(anim.tick());
/// assert!(anim.positions()[1] < 10.0);
/// clock.advance(0.05);
/// assert!(!anim.tick());
/// assert_eq!(anim.positions()[1], 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct AnimatedMove<C> {
    live: LiveMove,
    clock: C,
    duration: f64,
    from: Vec<f64>,
    started: Vec<f64>,
    goal: Vec<f64>,
    current: Vec<f64>,
}

impl<C: Clock> AnimatedMove<C> {
    /// Wraps `live`, using the default ease window.
    #[must_use]
    pub fn new(live: LiveMove, clock: C) -> Self {
        Self::with_duration(live, clock, DEFAULT_DURATION)
    }

    /// Wraps `live` with an ease window of `duration` seconds.
    ///
    /// A zero or negative duration disables easing.
    #[must_use]
    pub fn with_duration(live: LiveMove, clock: C, duration: f64) -> Self {
        let current = live.positions().to_vec();
        Self {
            from: current.clone(),
            started: alloc::vec![SETTLED; current.len()],
            goal: live.targets().to_vec(),
            current,
            live,
            clock,
            duration: duration.max(0.0),
        }
    }

    /// Moves the block's leading edge to `offset` and returns the current
    /// offsets, indexed from the session's range start.
    pub fn update(&mut self, offset: f64) -> &[f64] {
        let now = self.clock.now();
        self.advance(now);
        self.live.update(offset);
        let base = self.live.range().start;
        for (i, target) in self.live.targets().iter().enumerate() {
            if self.live.is_moving(i + base) || self.goal[i] == *target {
                continue;
            }
            self.from[i] = self.current[i];
            self.started[i] = now;
            self.goal[i] = *target;
        }
        self.advance(now);
        &self.current
    }

    /// Advances running animations to the clock's current time.
    ///
    /// Returns `true` while any element is still easing.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.advance(now)
    }

    /// Returns `true` while any element is still easing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.started.iter().any(|t| *t != SETTLED)
    }

    /// Ends the session, snapping every element to its target.
    pub fn stop(&mut self) -> MoveOutcome {
        let outcome = self.live.stop();
        self.goal.clear();
        self.goal.extend_from_slice(self.live.targets());
        self.current.clone_from(&self.goal);
        self.from.clone_from(&self.goal);
        self.started.fill(SETTLED);
        outcome
    }

    /// Current offsets, indexed from the session's range start.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.current
    }

    /// Current offset of element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the session's range.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        let range = self.live.range();
        assert!(
            range.contains(&index),
            "index {index} outside live-move range {range:?}"
        );
        self.current[index - range.start]
    }

    /// The underlying session.
    #[must_use]
    pub fn live(&self) -> &LiveMove {
        &self.live
    }

    /// The clock driving the animation.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn advance(&mut self, now: f64) -> bool {
        let base = self.live.range().start;
        let mut animating = false;
        for i in 0..self.current.len() {
            if self.live.is_moving(i + base) {
                self.current[i] = self.live.positions()[i];
                continue;
            }
            let t0 = self.started[i];
            if t0 == SETTLED {
                continue;
            }
            let v = if self.duration > 0.0 {
                (now - t0) / self.duration
            } else {
                1.0
            };
            if v >= 1.0 {
                self.current[i] = self.goal[i];
                self.started[i] = SETTLED;
            } else {
                let e = ease(Easing::Cubic, EaseWay::Out, v.max(0.0));
                self.current[i] = lerp(self.from[i], self.goal[i], e);
                animating = true;
            }
        }
        animating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn rows(n: usize, moving: usize) -> (AnimatedMove<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let live = LiveMove::start(moving, 1, 0..n, 0.0, |_| 10.0);
        (AnimatedMove::new(live, clock.clone()), clock)
    }

    #[test]
    fn follows_cubic_ease_out() {
        let (mut anim, clock) = rows(2, 0);
        anim.update(10.0);
        clock.advance(0.05);
        anim.tick();
        // 1 - (1 - 0.5)^3 = 0.875 of the way from 10 to 0.
        assert!((anim.offset_of(1) - 1.25).abs() < 1e-9);
    }

    #[test]
    fn moving_block_is_not_eased() {
        let (mut anim, _clock) = rows(3, 0);
        let positions = anim.update(13.0);
        assert_eq!(positions[0], 13.0);
    }

    #[test]
    fn zero_duration_snaps() {
        let clock = ManualClock::new();
        let live = LiveMove::start(0, 1, 0..2, 0.0, |_| 10.0);
        let mut anim = AnimatedMove::with_duration(live, clock, 0.0);
        anim.update(10.0);
        assert!(!anim.is_animating());
        assert_eq!(anim.offset_of(1), 0.0);
    }

    #[test]
    fn stop_settles_everything() {
        let (mut anim, _clock) = rows(3, 0);
        anim.update(25.0);
        assert!(anim.is_animating());
        let out = anim.stop();
        assert_eq!(out.final_index, 2);
        assert!(!anim.is_animating());
        assert_eq!(anim.positions(), anim.live().targets());
    }
}
