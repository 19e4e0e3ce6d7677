// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves over `t` in `0..=1`.
//!
//! Each [`Easing`] is defined in its "in" form; [`EaseWay`] derives the other
//! shapes from it.
//!
//! ```rust
//! use understory_live_move::easing::{ease, EaseWay, Easing};
//!
//! assert_eq!(ease(Easing::Cubic, EaseWay::Out, 0.5), 0.875);
//! assert_eq!(ease(Easing::Linear, EaseWay::InOut, 0.25), 0.25);
//! ```

use core::f64::consts::PI;

/// Base easing curves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// `t`.
    #[default]
    Linear,
    /// `t²`.
    Quad,
    /// `t³`.
    Cubic,
    /// `t⁴`.
    Quart,
    /// `t⁵`.
    Quint,
    /// Exponential, `2^(10(t - 1))`.
    Expo,
    /// Quarter cosine wave.
    Sine,
    /// Circular arc.
    Circ,
    /// Overshoots backwards before accelerating.
    Back,
    /// Decaying bounces.
    Bounce,
}

impl Easing {
    /// Evaluates the curve in its "in" form.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Quart => t * t * t * t,
            Self::Quint => t * t * t * t * t,
            Self::Expo => libm::pow(2.0, 10.0 * (t - 1.0)),
            Self::Sine => 1.0 - libm::cos(t * (PI * 0.5)),
            Self::Circ => 1.0 - libm::sqrt(1.0 - t * t),
            Self::Back => t * t * (2.7 * t - 1.7),
            Self::Bounce => bounce(t),
        }
    }
}

fn bounce(t: f64) -> f64 {
    const K: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        K * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        K * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        K * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        K * t * t + 0.984375
    }
}

/// How a base curve is applied over the interval.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EaseWay {
    /// The curve as defined.
    In,
    /// The curve reversed: fast start, slow finish.
    #[default]
    Out,
    /// "In" for the first half, "out" for the second.
    InOut,
    /// "Out" for the first half, "in" for the second.
    OutIn,
}

/// Eases `t` with curve `f` applied the given way.
#[must_use]
pub fn ease(f: Easing, way: EaseWay, t: f64) -> f64 {
    let out = |t: f64| 1.0 - f.apply(1.0 - t);
    match way {
        EaseWay::In => f.apply(t),
        EaseWay::Out => out(t),
        EaseWay::InOut => {
            if t < 0.5 {
                0.5 * f.apply(t * 2.0)
            } else {
                0.5 * out(t * 2.0 - 1.0) + 0.5
            }
        }
        EaseWay::OutIn => {
            if t < 0.5 {
                0.5 * out(t * 2.0)
            } else {
                0.5 * f.apply(t * 2.0 - 1.0) + 0.5
            }
        }
    }
}

/// Linear interpolation from `a` to `b`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fraction of the way `x` lies from `x0` to `x1`; `0` when the span is empty.
#[must_use]
pub fn progress(x: f64, x0: f64, x1: f64) -> f64 {
    if x1 == x0 { 0.0 } else { (x - x0) / (x1 - x0) }
}
