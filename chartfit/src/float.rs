// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float math for `no_std` builds.
//!
//! `core` lacks the transcendental `f64` methods the scale resolver and the
//! polar projector need, so they are routed through `libm` when `std` is off.

/// The `f64` methods used by the engine that `core` does not provide.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn round(self) -> Self;
    fn log10(self) -> Self;
    fn powi(self, n: i32) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
}

#[cfg(feature = "libm")]
impl FloatExt for f64 {
    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn round(self) -> Self {
        libm::round(self)
    }

    fn log10(self) -> Self {
        libm::log10(self)
    }

    fn powi(self, n: i32) -> Self {
        libm::pow(self, f64::from(n))
    }

    fn sin(self) -> Self {
        libm::sin(self)
    }

    fn cos(self) -> Self {
        libm::cos(self)
    }
}

#[cfg(not(feature = "libm"))]
compile_error!("chartfit requires either the `std` or `libm` feature");
