// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis configuration and resolved axis guides.
//!
//! An [`AxisConfig`] is what a client sets up before a draw: literal bounds,
//! per-bound auto-fit flags, and label presentation. Resolving it against the
//! data yields a [`ScaleResult`], and [`AxisConfig::guide`] pairs that scale
//! with the formatted tick labels the margin fitter measures.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use chartfit_text::TextStyle;
use serde::{Deserialize, Serialize};

use crate::error::AxisConfigError;
use crate::format::format_tick;
use crate::scale::{self, ScaleResult};

/// A tick label formatter.
///
/// Called once per visible tick, both when measuring and when drawing.
#[derive(Clone)]
pub struct LabelFormatter(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl LabelFormatter {
    /// Wraps a formatting closure.
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Formats `value`.
    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LabelFormatter(..)")
    }
}

/// Client configuration for one axis.
///
/// Each bound is either a literal or auto-fit from the data. Layout only reads
/// this value; mutate it between draws, never during one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    /// Literal minimum, used when `minimum_auto_fit` is off or there is no data.
    pub minimum: f64,
    /// Derive the minimum from the data.
    pub minimum_auto_fit: bool,
    /// Literal maximum, used when `maximum_auto_fit` is off or there is no data.
    pub maximum: f64,
    /// Derive the maximum from the data.
    pub maximum_auto_fit: bool,
    /// Literal tick step.
    pub step: f64,
    /// Derive the tick step from the resolved range.
    pub step_auto_fit: bool,
    /// Whether tick labels are drawn (and therefore reserved for).
    pub show_labels: bool,
    /// Optional axis title.
    pub title: Option<String>,
    /// Custom tick label formatter; [`format_tick`] when unset.
    #[serde(skip)]
    pub label_formatter: Option<LabelFormatter>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            minimum_auto_fit: true,
            maximum: 10.0,
            maximum_auto_fit: true,
            step: 1.0,
            step_auto_fit: true,
            show_labels: true,
            title: None,
            label_formatter: None,
        }
    }
}

impl AxisConfig {
    /// An axis with every bound auto-fit from the data.
    pub fn auto() -> Self {
        Self::default()
    }

    /// An axis with literal bounds and step; the data is ignored.
    pub fn fixed(minimum: f64, maximum: f64, step: f64) -> Self {
        Self {
            minimum,
            minimum_auto_fit: false,
            maximum,
            maximum_auto_fit: false,
            step,
            step_auto_fit: false,
            ..Self::default()
        }
    }

    /// Sets a literal minimum and turns off its auto-fit.
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = minimum;
        self.minimum_auto_fit = false;
        self
    }

    /// Sets a literal maximum and turns off its auto-fit.
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = maximum;
        self.maximum_auto_fit = false;
        self
    }

    /// Sets a literal step and turns off its auto-fit.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self.step_auto_fit = false;
        self
    }

    /// Enables or disables minimum auto-fit.
    pub fn with_minimum_auto_fit(mut self, auto_fit: bool) -> Self {
        self.minimum_auto_fit = auto_fit;
        self
    }

    /// Enables or disables maximum auto-fit.
    pub fn with_maximum_auto_fit(mut self, auto_fit: bool) -> Self {
        self.maximum_auto_fit = auto_fit;
        self
    }

    /// Enables or disables step auto-fit.
    pub fn with_step_auto_fit(mut self, auto_fit: bool) -> Self {
        self.step_auto_fit = auto_fit;
        self
    }

    /// Enables or disables tick labels.
    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    /// Sets the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Clears the axis title.
    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    /// Sets a custom tick label formatter.
    pub fn with_label_formatter(
        mut self,
        f: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.label_formatter = Some(LabelFormatter::new(f));
        self
    }

    /// Formats one tick label.
    pub fn format_label(&self, value: f64, step: f64) -> String {
        match &self.label_formatter {
            Some(f) => f.format(value),
            None => format_tick(value, step),
        }
    }

    /// Resolves this axis against a data range. See [`scale::resolve`].
    pub fn resolve(&self, data_min: Option<f64>, data_max: Option<f64>) -> ScaleResult {
        scale::resolve(data_min, data_max, self)
    }

    /// Resolves this axis against a combined `(min, max)` data range.
    pub fn resolve_range(&self, range: Option<(f64, f64)>) -> ScaleResult {
        scale::resolve_range(range, self)
    }

    /// Checks the literals for values the resolver would turn into a
    /// misleading scale.
    ///
    /// Layout never calls this; it is for callers that want to reject bad
    /// configuration before drawing.
    pub fn validate(&self) -> Result<(), AxisConfigError> {
        for (field, value) in [
            ("minimum", self.minimum),
            ("maximum", self.maximum),
            ("step", self.step),
        ] {
            if !value.is_finite() {
                return Err(AxisConfigError::NonFinite { field });
            }
        }
        if !self.minimum_auto_fit && !self.maximum_auto_fit && self.minimum > self.maximum {
            return Err(AxisConfigError::InvertedRange {
                min: self.minimum,
                max: self.maximum,
            });
        }
        if !self.step_auto_fit && self.step <= 0.0 {
            return Err(AxisConfigError::NonPositiveStep { step: self.step });
        }
        Ok(())
    }

    /// Builds the guide for a resolved scale: one label per tick when labels
    /// are shown, plus the title.
    pub fn guide(
        &self,
        scale: ScaleResult,
        label_style: &TextStyle,
        title_style: &TextStyle,
    ) -> AxisGuide {
        let labels = if self.show_labels {
            scale
                .ticks()
                .map(|v| TickLabel {
                    position: v,
                    text: self.format_label(v, scale.step()),
                })
                .collect()
        } else {
            Vec::new()
        };
        AxisGuide {
            scale,
            labels,
            label_style: label_style.clone(),
            title: self.title.clone(),
            title_style: title_style.clone(),
        }
    }
}

/// One tick label: its data-space position and text.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    /// Position along the axis in data units.
    pub position: f64,
    /// Rendered text.
    pub text: String,
}

/// A resolved axis ready for measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisGuide {
    /// The resolved scale.
    pub scale: ScaleResult,
    /// Visible tick labels; empty when labels are hidden.
    pub labels: Vec<TickLabel>,
    /// Font for tick labels.
    pub label_style: TextStyle,
    /// Optional axis title.
    pub title: Option<String>,
    /// Font for the title.
    pub title_style: TextStyle,
}

impl AxisGuide {
    /// A guide with no labels and no title.
    pub fn new(scale: ScaleResult, label_style: TextStyle) -> Self {
        Self {
            scale,
            labels: Vec::new(),
            title: None,
            title_style: label_style.clone(),
            label_style,
        }
    }

    /// A categorical guide.
    ///
    /// Categories occupy unit-wide bands on the scale `{0, n, 1}`, and the
    /// label of category `i` is centred at `i + 0.5`.
    pub fn categories<I, S>(names: I, label_style: TextStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<TickLabel> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| TickLabel {
                position: i as f64 + 0.5,
                text: name.into(),
            })
            .collect();
        let scale = ScaleResult::new(0.0, labels.len() as f64, 1.0);
        Self {
            labels,
            ..Self::new(scale, label_style)
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: Option<String>, title_style: TextStyle) -> Self {
        self.title = title;
        self.title_style = title_style;
        self
    }

    /// Returns whether any label has visible text.
    pub fn has_labels(&self) -> bool {
        self.labels.iter().any(|l| !l.text.is_empty())
    }

    /// The title, if set and non-empty.
    pub fn visible_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Which axis of a chart an [`AxisConfig`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisRole {
    /// The value axis: vertical for cartesian charts, radial otherwise.
    Value,
    /// The horizontal axis of scatter and spectrum charts.
    Horizontal,
    /// The color scale of spectrum charts.
    Color,
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Value => "value",
            Self::Horizontal => "horizontal",
            Self::Color => "color",
        })
    }
}
