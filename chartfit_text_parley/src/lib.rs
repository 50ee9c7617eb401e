// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed label measurement.
//!
//! [`ParleyTextMeasurer`] shapes each tick label and title with Parley so the
//! margin fitter in `chartfit` reserves space from real glyph advances instead
//! of a per-character estimate.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use chartfit_text::{FontFamily, FontStyle, LabelMetrics, TextMeasurer, TextStyle};
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight};

/// A [`TextMeasurer`] that shapes text with Parley.
///
/// The font and layout contexts live behind `RefCell`s because
/// [`TextMeasurer::measure`] takes `&self`; a measurer is therefore not `Sync`
/// and belongs to the thread that runs the layout pass.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<parley::LayoutContext<()>>,
    display_scale: f32,
    quantize: bool,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .field("quantize", &self.quantize)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer using Parley's system font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(parley::LayoutContext::new()),
            display_scale: 1.0,
            quantize: true,
        }
    }

    /// Sets the device pixel ratio handed to Parley.
    ///
    /// Returned metrics are always in logical pixels.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    /// Sets whether Parley snaps layout coordinates to pixel boundaries.
    #[must_use]
    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    fn font_stack(family: &FontFamily) -> FontStack<'_> {
        let family = match family {
            FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        };
        FontStack::from(family)
    }

    fn font_style(style: FontStyle) -> ParleyFontStyle {
        match style {
            FontStyle::Normal => ParleyFontStyle::Normal,
            FontStyle::Italic => ParleyFontStyle::Italic,
            FontStyle::Oblique => ParleyFontStyle::Oblique(None),
        }
    }

    /// Converts a pixel font size to Parley's `f32`, mapping non-finite and
    /// negative sizes to zero.
    fn font_size(font_size: f64) -> f32 {
        if !font_size.is_finite() || font_size <= 0.0 {
            return 0.0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to the f32 range before the cast"
        )]
        let size = font_size.min(f64::from(f32::MAX)) as f32;
        size
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> LabelMetrics {
        let line = text.split('\n').next().unwrap_or("");
        if line.is_empty() {
            return LabelMetrics::EMPTY;
        }

        let scale = self.display_scale.max(1.0e-6);
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, line, scale, self.quantize);
        builder.push_default(StyleProperty::FontSize(Self::font_size(style.font_size)));
        builder.push_default(StyleProperty::FontStack(Self::font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontStyle(Self::font_style(style.font_style)));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(line);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        let Some(first) = layout.lines().next() else {
            return LabelMetrics::EMPTY;
        };
        let m = first.metrics();
        let to_logical = |v: f32| f64::from(v) / f64::from(scale);
        LabelMetrics {
            width: to_logical(m.advance),
            ascent: to_logical(m.ascent),
            descent: to_logical(m.descent),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn shaped_label_has_positive_extent() {
        let m = ParleyTextMeasurer::new();
        let metrics = m.measure("100", &TextStyle::new(12.0));
        assert!(metrics.width > 0.0);
        assert!(metrics.height() > 0.0);
    }

    #[test]
    fn only_the_first_line_is_measured() {
        let m = ParleyTextMeasurer::new();
        let style = TextStyle::new(12.0);
        let single = m.measure("40", &style);
        let multi = m.measure("40\nwider second line", &style);
        assert_eq!(single, multi);
    }

    #[test]
    fn margins_are_fitted_from_shaped_labels() {
        let measurer = ParleyTextMeasurer::new();
        let style = TextStyle::new(12.0);
        let vertical = chartfit::AxisConfig::auto().guide(
            chartfit::ScaleResult::new(0.0, 1000.0, 200.0),
            &style,
            &style,
        );
        let horizontal = chartfit::AxisGuide::new(chartfit::ScaleResult::UNIT, style.clone());

        let fitter = chartfit::MarginFitter::new(&measurer);
        let rect = kurbo::Rect::new(0.0, 0.0, 400.0, 300.0);
        let m = fitter.fit_cartesian(rect, &vertical, &horizontal);
        let widest = vertical
            .labels
            .iter()
            .map(|l| measurer.measure(&l.text, &style).width)
            .fold(0.0, f64::max);
        assert!((m.left - (widest + chartfit::DEFAULT_FONT_MARGIN)).abs() < 1e-9);
    }

    #[test]
    fn empty_label_measures_nothing() {
        let m = ParleyTextMeasurer::new();
        assert_eq!(m.measure("", &TextStyle::new(12.0)), LabelMetrics::EMPTY);
    }
}
