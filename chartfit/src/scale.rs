// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scale resolution.
//!
//! [`resolve`] turns an unbounded data range plus an [`AxisConfig`] into a
//! [`ScaleResult`]: a minimum, a maximum, and a "nice" tick step. Every chart
//! kind goes through the same resolver; only the data scan differs.

use serde::Serialize;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::AxisConfig;

/// Upper bound on the number of ticks a scale will ever iterate.
pub const MAX_TICKS: usize = 10_000;

/// A resolved tick scale.
///
/// `step` is always positive and finite, and adding it moves both `min` and
/// `max`, so a plain `v += step` walk terminates. Iterating the ticks of a
/// scale stops after at most [`MAX_TICKS`] values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaleResult {
    min: f64,
    max: f64,
    step: f64,
}

impl ScaleResult {
    /// The `0..1` scale with a single step, used for degenerate and unitless axes.
    pub const UNIT: Self = Self {
        min: 0.0,
        max: 1.0,
        step: 1.0,
    };

    /// Creates a scale from explicit bounds.
    ///
    /// A non-finite bound, a step that is not a positive finite number, or a
    /// step too small to change the bounds yields [`ScaleResult::UNIT`].
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        if min.is_finite()
            && max.is_finite()
            && step.is_finite()
            && step > 0.0
            && advances(min, step)
            && advances(max, step)
        {
            Self { min, max, step }
        } else {
            Self::UNIT
        }
    }

    /// Lowest tick value.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Highest tick value.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Interval between ticks.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns whether `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Number of ticks in `min, min + step, ..., <= max`.
    pub fn tick_count(&self) -> usize {
        if self.max < self.min {
            return 0;
        }
        let steps = (self.span() / self.step + 1.0e-9).floor();
        if !steps.is_finite() || steps >= MAX_TICKS as f64 {
            return MAX_TICKS;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "finite, non-negative and below MAX_TICKS"
        )]
        let steps = steps as usize;
        steps + 1
    }

    /// Iterates the tick values.
    ///
    /// Values are computed as `min + i * step` so long ranges do not
    /// accumulate rounding drift; the final tick snaps onto `max` when it
    /// lands within rounding error of it.
    pub fn ticks(&self) -> Ticks {
        Ticks {
            scale: *self,
            index: 0,
            count: self.tick_count(),
        }
    }

    /// Collects the tick values.
    pub fn tick_values(&self) -> SmallVec<[f64; 16]> {
        self.ticks().collect()
    }
}

/// Iterator over the ticks of a [`ScaleResult`].
#[derive(Clone, Debug)]
pub struct Ticks {
    scale: ScaleResult,
    index: usize,
    count: usize,
}

impl Iterator for Ticks {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let s = self.scale;
        let v = s.min + s.step * self.index as f64;
        self.index += 1;
        if (v - s.max).abs() <= s.step * 1.0e-9 {
            Some(s.max)
        } else {
            Some(v)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Ticks {}

/// Resolves a tick scale from an optional data range and an axis configuration.
///
/// - An auto-fit maximum takes `data_max`; an auto-fit minimum takes
///   `data_min` and snaps to zero when it sits in the lower half of
///   `[0, max]`.
/// - An auto-fit step is chosen from the range magnitude (see [`nice_step`]).
///   With no data at all the literal bounds and step are returned untouched.
/// - A zero-width range is widened into a visible window: `0..1` around zero,
///   otherwise one order of magnitude either side of the value.
///
/// Never fails. A literal `minimum > maximum` is a caller precondition and is
/// passed through.
pub fn resolve(data_min: Option<f64>, data_max: Option<f64>, config: &AxisConfig) -> ScaleResult {
    let mut min = config.minimum;
    let mut max = config.maximum;
    let mut step = config.step;

    if config.maximum_auto_fit
        && let Some(v) = data_max
    {
        max = v;
    }
    if config.minimum_auto_fit
        && let Some(v) = data_min
    {
        min = v;
        if min > 0.0 && min <= max - min {
            min = 0.0;
        }
    }

    let has_data = data_min.is_some() || data_max.is_some();
    if config.step_auto_fit && has_data {
        step = nice_step(max - min);
    }
    if !(step.is_finite() && step > 0.0) && max > min {
        // A fixed step of zero over a real range: fall back to the nice step.
        step = nice_step(max - min);
    }
    if !(step.is_finite() && step > 0.0) {
        if min == 0.0 {
            return ScaleResult::UNIT;
        }
        let magnitude = magnitude(min.abs());
        step = magnitude;
        min -= magnitude;
        max += magnitude;
    }

    // A step below the float resolution of the bounds never moves a tick.
    while step.is_finite() && step > 0.0 && !(advances(min, step) && advances(max, step)) {
        step *= 10.0;
        tracing::trace!(min, max, step, "raised step to the float resolution");
    }

    if !(min.is_finite() && max.is_finite() && step.is_finite() && step > 0.0) {
        tracing::warn!(min, max, step, "non-finite axis scale; using 0..1");
        return ScaleResult::UNIT;
    }
    ScaleResult { min, max, step }
}

fn advances(v: f64, step: f64) -> bool {
    v + step > v
}

/// [`resolve`] for a combined `(min, max)` data range.
pub fn resolve_range(range: Option<(f64, f64)>, config: &AxisConfig) -> ScaleResult {
    resolve(range.map(|r| r.0), range.map(|r| r.1), config)
}

/// Picks a tick step for a range of width `diff`.
///
/// With `m = 10^floor(log10(diff))`:
/// `diff <= m` gives `m / 5`, `diff <= 2.5m` gives `m / 2`, `diff <= 5m`
/// gives `m`, anything wider `2m`. Returns `0` for a non-positive or
/// non-finite `diff`.
pub fn nice_step(diff: f64) -> f64 {
    if !diff.is_finite() || diff <= 0.0 {
        return 0.0;
    }
    let m = magnitude(diff);
    if diff <= m {
        m / 5.0
    } else if diff <= m * 2.5 {
        m / 2.0
    } else if diff <= m * 5.0 {
        m
    } else {
        m * 2.0
    }
}

/// Largest power of ten not greater than `x` (`x > 0`).
fn magnitude(x: f64) -> f64 {
    let exponent = x.log10().floor().clamp(-320.0, 320.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to a small integral range"
    )]
    let exponent = exponent as i32;
    let mut m = 10_f64.powi(exponent);
    // `log10` can land a hair below an exact power of ten.
    if m * 10.0 <= x {
        m *= 10.0;
    } else if m > x {
        m /= 10.0;
    }
    m
}
