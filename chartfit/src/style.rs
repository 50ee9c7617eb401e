// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series styling through named slots.
//!
//! A chart carries an explicit [`Palette`] and a [`StyleTable`] of per-series
//! overrides. Each series resolves three slots (stroke, fill, font); a slot
//! with no override falls back to the palette or the table's base font.

use hashbrown::HashMap;
use peniko::Color;
use peniko::color::palette::css;
use smallvec::SmallVec;

use chartfit_text::TextStyle;

/// Alpha applied to a palette color when it is used as a default fill.
const DEFAULT_FILL_ALPHA: f32 = 0.6;

/// An ordered list of colors.
///
/// Categorical lookups cycle through the list; [`Palette::gradient`] treats it
/// as evenly spaced gradient stops.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: SmallVec<[Color; 8]>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new([
            css::CORNFLOWER_BLUE,
            css::ORANGE,
            css::MEDIUM_SEA_GREEN,
            css::CRIMSON,
            css::GOLDENROD,
            css::SLATE_BLUE,
            css::DARK_CYAN,
            css::HOT_PINK,
        ])
    }
}

impl Palette {
    /// Creates a palette from `colors`.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    /// A cold-to-hot ramp for spectrum charts.
    pub fn spectrum() -> Self {
        Self::new([css::NAVY, css::DODGER_BLUE, css::GOLD, css::CRIMSON])
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns whether the palette has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for series `index`, repeating once the palette runs out.
    ///
    /// An empty palette yields black.
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return css::BLACK;
        }
        self.colors[index % self.colors.len()]
    }

    /// Color at `t` in `[0, 1]` along a linear gradient through every color.
    ///
    /// `t` is clamped; NaN maps to the first stop.
    pub fn gradient(&self, t: f64) -> Color {
        let n = self.colors.len();
        if n < 2 {
            return self.color(0);
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (n - 1) as f64;
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "pos is within [0, n - 1]"
        )]
        let i = (pos as usize).min(n - 2);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "interpolation weight is in [0, 1]"
        )]
        let frac = (pos - i as f64) as f32;
        let a = self.colors[i].components;
        let b = self.colors[i + 1].components;
        Color::new(core::array::from_fn(|k| a[k] + (b[k] - a[k]) * frac))
    }
}

/// A named style slot of a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleSlot {
    /// Line and outline color.
    Stroke,
    /// Area color.
    Fill,
    /// Label font.
    Font,
}

/// The value stored in a slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotValue {
    /// A color for [`StyleSlot::Stroke`] or [`StyleSlot::Fill`].
    Color(Color),
    /// A font for [`StyleSlot::Font`].
    Font(TextStyle),
}

/// Fully resolved style of one series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Stroke color.
    pub stroke: Color,
    /// Fill color.
    pub fill: Color,
    /// Label font.
    pub font: TextStyle,
}

/// Per-series slot overrides over a palette and a base font.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleTable {
    palette: Palette,
    font: TextStyle,
    overrides: HashMap<(usize, StyleSlot), SlotValue>,
}

impl StyleTable {
    /// A table with the default palette and font and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Replaces the base font.
    pub fn with_font(mut self, font: TextStyle) -> Self {
        self.font = font;
        self
    }

    /// The palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Overrides the stroke of `series`.
    pub fn set_stroke(&mut self, series: usize, color: Color) {
        self.overrides
            .insert((series, StyleSlot::Stroke), SlotValue::Color(color));
    }

    /// Overrides the fill of `series`.
    pub fn set_fill(&mut self, series: usize, color: Color) {
        self.overrides
            .insert((series, StyleSlot::Fill), SlotValue::Color(color));
    }

    /// Overrides the label font of `series`.
    pub fn set_font(&mut self, series: usize, font: TextStyle) {
        self.overrides
            .insert((series, StyleSlot::Font), SlotValue::Font(font));
    }

    /// Removes every override of `series`.
    pub fn clear(&mut self, series: usize) {
        self.overrides.retain(|(s, _), _| *s != series);
    }

    /// Looks up a raw override.
    pub fn get(&self, series: usize, slot: StyleSlot) -> Option<&SlotValue> {
        self.overrides.get(&(series, slot))
    }

    fn color(&self, series: usize, slot: StyleSlot) -> Option<Color> {
        match self.get(series, slot) {
            Some(SlotValue::Color(c)) => Some(*c),
            _ => None,
        }
    }

    /// Resolves every slot of `series`.
    ///
    /// Stroke falls back to the palette color, fill to the stroke at reduced
    /// alpha, and font to the base font.
    pub fn resolve(&self, series: usize) -> SeriesStyle {
        let stroke = self
            .color(series, StyleSlot::Stroke)
            .unwrap_or_else(|| self.palette.color(series));
        let fill = self
            .color(series, StyleSlot::Fill)
            .unwrap_or_else(|| stroke.with_alpha(DEFAULT_FILL_ALPHA));
        let font = match self.get(series, StyleSlot::Font) {
            Some(SlotValue::Font(f)) => f.clone(),
            _ => self.font.clone(),
        };
        SeriesStyle { stroke, fill, font }
    }
}
