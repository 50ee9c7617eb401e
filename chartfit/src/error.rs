// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration validation errors.
//!
//! Layout itself never fails: a malformed configuration degrades into a
//! malformed (but finite) layout. These errors are produced only by the opt-in
//! `validate` methods so callers can reject bad input up front.

use thiserror::Error;

use crate::axis::AxisRole;
use crate::layout::ChartKind;

/// A literal axis bound or step that cannot produce a sensible scale.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AxisConfigError {
    /// A literal is NaN or infinite.
    #[error("axis {field} is not finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The literal minimum lies above the literal maximum.
    #[error("axis minimum {min} is greater than maximum {max}")]
    InvertedRange {
        /// Literal minimum.
        min: f64,
        /// Literal maximum.
        max: f64,
    },
    /// A fixed step is zero or negative.
    #[error("axis step {step} must be positive")]
    NonPositiveStep {
        /// Literal step.
        step: f64,
    },
}

/// A chart description that the layout pipeline would render incorrectly.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ChartSpecError {
    /// One of the axis configurations is invalid.
    #[error("invalid {role} axis: {source}")]
    Axis {
        /// Which axis failed.
        role: AxisRole,
        /// The underlying axis error.
        #[source]
        source: AxisConfigError,
    },
    /// The chart kind needs more categories (radar axes) than were supplied.
    #[error("{kind:?} chart needs at least {required} categories, found {found}")]
    TooFewCategories {
        /// Chart kind being validated.
        kind: ChartKind,
        /// Minimum number of categories.
        required: usize,
        /// Categories actually present.
        found: usize,
    },
    /// A spectrum grid whose value count does not fill whole rows.
    #[error("spectrum series {series} has {len} values, not a multiple of {columns} columns")]
    ShapeMismatch {
        /// Index of the offending series.
        series: usize,
        /// Number of values in the series.
        len: usize,
        /// Declared column count.
        columns: usize,
    },
}
