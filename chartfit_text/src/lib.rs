// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement boundary for chart layout.
//!
//! Margin fitting needs the rendered extent of every tick label and axis title
//! before any plot geometry is known. Shaping and glyph rendering belong to the
//! drawing surface, so the layout engine only depends on this tiny interface:
//! a [`TextMeasurer`] returns [`LabelMetrics`] for a single line of text.
//!
//! Metrics are requested on demand and are never cached by callers, since the
//! font used for one axis may differ from the next.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// A text measurement provider.
///
/// Implementations may be heuristic, backed by a shaping engine (see
/// `chartfit_text_parley`), or forwarded to a platform canvas.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as one line; callers split on `\n` themselves.
    fn measure(&self, text: &str, style: &TextStyle) -> LabelMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> LabelMetrics {
        (**self).measure(text, style)
    }
}

/// Font selection relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (`400` normal, `700` bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a sans-serif, normal-weight style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Generic serif.
    Serif,
    /// Generic sans-serif.
    SansSerif,
    /// Generic monospace; useful for tabular tick labels.
    Monospace,
    /// A named family such as `"Inter"`.
    Named(Arc<str>),
}

/// CSS-style font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright.
    Normal,
    /// Italic.
    Italic,
    /// Oblique.
    Oblique,
}

/// Extent of one measured line of text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LabelMetrics {
    /// Advance width.
    pub width: f64,
    /// Distance from the baseline to the top of the glyphs.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the glyphs.
    pub descent: f64,
}

impl LabelMetrics {
    /// Metrics of an empty string.
    pub const EMPTY: Self = Self {
        width: 0.0,
        ascent: 0.0,
        descent: 0.0,
    };

    /// Returns `ascent + descent`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// A heuristic measurer for tests and early layout.
///
/// Assumes an average glyph advance of 0.6em and a baseline at 0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> LabelMetrics {
        if text.is_empty() {
            return LabelMetrics::EMPTY;
        }
        LabelMetrics {
            width: 0.6 * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
        }
    }
}
