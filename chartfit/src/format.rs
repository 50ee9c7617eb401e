// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default tick label formatting.

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MAX_DECIMALS: usize = 12;

/// Formats a tick value using just enough decimals for the tick step.
///
/// A step of `0.25` yields two decimals, a step of `20` none. Values that need
/// more precision than the step suggests (an unsnapped data minimum, say) get
/// extra decimals up to a fixed cap. Negative zero prints as `0`.
pub fn format_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return alloc::format!("{value}");
    }

    let mut decimals = decimals_for_step(step);
    while decimals < MAX_DECIMALS && !is_integral(value * pow10(decimals)) {
        decimals += 1;
    }

    let half_ulp = 0.5 / pow10(decimals);
    let value = if value.abs() < half_ulp { 0.0 } else { value };
    alloc::format!("{value:.decimals$}")
}

fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    let mut decimals = 0;
    while decimals < MAX_DECIMALS && !is_integral(step * pow10(decimals)) {
        decimals += 1;
    }
    decimals
}

fn pow10(decimals: usize) -> f64 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "decimals never exceeds MAX_DECIMALS"
    )]
    let exponent = decimals as i32;
    10_f64.powi(exponent)
}

fn is_integral(x: f64) -> bool {
    (x - x.round()).abs() <= 1.0e-6
}
