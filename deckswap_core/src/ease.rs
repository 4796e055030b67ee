// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed set of easing curves.
//!
//! Only out-curves are offered; every deck transition decelerates into its
//! resting pose. The power curves follow the common naming where
//! `power1` is quadratic, `power2` cubic and `power3` quartic.

use core::f64::consts::TAU;

/// An easing curve mapping linear progress in `0.0..=1.0` to eased progress.
///
/// Every curve maps `0.0` to `0.0` and `1.0` to exactly `1.0`, so a finished
/// tween always lands on its target value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Quadratic deceleration.
    Power1Out,
    /// Cubic deceleration.
    #[default]
    Power2Out,
    /// Quartic deceleration.
    Power3Out,
    /// Damped oscillation that overshoots the target before settling.
    ///
    /// Amplitudes below `1.0` do not shrink the overshoot; they stretch the
    /// period instead.
    ElasticOut {
        /// Overshoot amplitude.
        amplitude: f64,
        /// Oscillation period as a fraction of the tween duration.
        period: f64,
    },
}

impl Easing {
    /// The elastic preset offered to deck configurations.
    pub const ELASTIC: Self = Self::ElasticOut {
        amplitude: 0.6,
        period: 0.9,
    };

    /// Evaluates the curve at `t`, which is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Power1Out => power_out(t, 2.0),
            Self::Power2Out => power_out(t, 3.0),
            Self::Power3Out => power_out(t, 4.0),
            Self::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }

    /// Returns the conventional name of this curve, e.g. `"power2.out"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Power1Out => "power1.out",
            Self::Power2Out => "power2.out",
            Self::Power3Out => "power3.out",
            Self::ElasticOut { .. } => "elastic.out",
        }
    }
}

fn power_out(t: f64, exponent: f64) -> f64 {
    1.0 - libm::pow(1.0 - t, exponent)
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    let amp = if amplitude >= 1.0 { amplitude } else { 1.0 };
    let period = if period > 0.0 { period } else { 0.3 };
    let period = if amplitude > 0.0 && amplitude < 1.0 {
        period / amplitude
    } else {
        period
    };
    let shift = period / TAU * libm::asin(1.0 / amp);
    amp * libm::pow(2.0, -10.0 * t) * libm::sin((t - shift) * TAU / period) + 1.0
}
