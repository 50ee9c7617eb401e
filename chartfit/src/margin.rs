// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Margin fitting.
//!
//! The fitter reserves room around the plot for tick labels and axis titles.
//! It runs a fixed number of passes; each pass recomputes pixels-per-unit from
//! the margin accumulated so far and then grows the margin. Later passes can
//! in principle invalidate earlier ones (a taller bottom margin moves the
//! vertical ticks), so the result is an approximation rather than a converged
//! fixed point.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use chartfit_text::{LabelMetrics, TextMeasurer, TextStyle};

use crate::axis::AxisGuide;
use crate::project::{pixels_per_unit, radial_geometry};

/// Default gap between a label and the plot edge, in pixels.
pub const DEFAULT_FONT_MARGIN: f64 = 4.0;

/// Number of refinement passes for radial layouts.
const RADIAL_PASSES: usize = 3;

/// Space reserved on each side of the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Top margin.
    pub top: f64,
    /// Bottom margin.
    pub bottom: f64,
}

impl Margin {
    /// No margin.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// Creates a margin.
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Returns `rect` inset by this margin.
    ///
    /// The result never has a negative width or height.
    pub fn shrink(&self, rect: Rect) -> Rect {
        let x0 = rect.x0 + self.left;
        let y0 = rect.y0 + self.top;
        Rect::new(
            x0,
            y0,
            (rect.x1 - self.right).max(x0),
            (rect.y1 - self.bottom).max(y0),
        )
    }

    /// Makes every side finite and non-negative, then scales opposite sides
    /// down together so they fit inside `width` x `height`.
    pub fn fit_within(self, width: f64, height: f64) -> Self {
        let (left, right) = fit_pair(self.left, self.right, width);
        let (top, bottom) = fit_pair(self.top, self.bottom, height);
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Shrinks `a` and `b` proportionally so that `extent - a - b >= 0`.
fn fit_pair(a: f64, b: f64, extent: f64) -> (f64, f64) {
    let (a, b) = (sanitize(a), sanitize(b));
    let extent = sanitize(extent);
    if a + b <= extent {
        return (a, b);
    }
    let a = (a * (extent / (a + b))).min(extent);
    (a, (extent - a).max(0.0))
}

/// Reserves margin for axis labels against a text measurer.
#[derive(Clone, Copy)]
pub struct MarginFitter<'a> {
    measurer: &'a dyn TextMeasurer,
    font_margin: f64,
}

impl core::fmt::Debug for MarginFitter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MarginFitter")
            .field("font_margin", &self.font_margin)
            .finish_non_exhaustive()
    }
}

impl<'a> MarginFitter<'a> {
    /// Creates a fitter with [`DEFAULT_FONT_MARGIN`].
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            measurer,
            font_margin: DEFAULT_FONT_MARGIN,
        }
    }

    /// Sets the label-to-plot gap. Negative or non-finite values become `0`.
    pub fn with_font_margin(mut self, font_margin: f64) -> Self {
        self.font_margin = sanitize(font_margin);
        self
    }

    /// The label-to-plot gap.
    pub fn font_margin(&self) -> f64 {
        self.font_margin
    }

    fn measure(&self, text: &str, style: &TextStyle) -> LabelMetrics {
        let m = self.measurer.measure(text, style);
        LabelMetrics {
            width: sanitize(m.width),
            ascent: sanitize(m.ascent),
            descent: sanitize(m.descent),
        }
    }

    /// Fits a two-axis layout: `vertical` labels sit left of the plot,
    /// `horizontal` labels below it, centred on their positions.
    pub fn fit_cartesian(
        &self,
        candidate: Rect,
        vertical: &AxisGuide,
        horizontal: &AxisGuide,
    ) -> Margin {
        let fm = self.font_margin;
        let width = sanitize(candidate.width());
        let height = sanitize(candidate.height());
        let mut margin = Margin::ZERO;

        // Pass 1: widest vertical label.
        let vertical_metrics: Vec<(f64, LabelMetrics)> = vertical
            .labels
            .iter()
            .filter(|l| !l.text.is_empty())
            .map(|l| (l.position, self.measure(&l.text, &vertical.label_style)))
            .collect();
        if let Some(widest) = vertical_metrics.iter().map(|(_, m)| m.width).reduce(f64::max) {
            margin.left = widest + fm;
        }
        if let Some(title) = vertical.visible_title() {
            // Drawn rotated, so its height is the horizontal thickness.
            margin.left += self.measure(title, &vertical.title_style).height() + fm;
        }
        tracing::trace!(pass = 1, left = margin.left, "margin pass");

        // Pass 2: horizontal label overhang and bottom reservation.
        let x_ppu = pixels_per_unit(width - margin.horizontal(), &horizontal.scale);
        let mut label_height: f64 = 0.0;
        let mut left_overhang: f64 = 0.0;
        let mut right_overhang: f64 = 0.0;
        for label in horizontal.labels.iter().filter(|l| !l.text.is_empty()) {
            let m = self.measure(&label.text, &horizontal.label_style);
            label_height = label_height.max(m.height());
            let cx = margin.left + (label.position - horizontal.scale.min()) * x_ppu;
            left_overhang = left_overhang.max(-(cx - 0.5 * m.width));
            right_overhang = right_overhang.max(cx + 0.5 * m.width - width);
        }
        margin.left += sanitize(left_overhang);
        margin.right += sanitize(right_overhang);
        if horizontal.has_labels() {
            margin.bottom = label_height + fm;
        }
        if let Some(title) = horizontal.visible_title() {
            margin.bottom += self.measure(title, &horizontal.title_style).height() + fm;
        }
        tracing::trace!(
            pass = 2,
            left = margin.left,
            right = margin.right,
            bottom = margin.bottom,
            x_ppu,
            "margin pass"
        );

        // Pass 3: vertical labels centred on their ticks must not cross the top.
        let y_ppu = pixels_per_unit(height - margin.vertical(), &vertical.scale);
        let plot_bottom = height - margin.bottom;
        let mut top_overhang: f64 = 0.0;
        for (position, m) in &vertical_metrics {
            let cy = plot_bottom - (position - vertical.scale.min()) * y_ppu;
            top_overhang = top_overhang.max(-(cy - 0.5 * m.height()));
        }
        margin.top += sanitize(top_overhang);
        tracing::trace!(pass = 3, top = margin.top, y_ppu, "margin pass");

        margin.fit_within(width, height)
    }

    /// Fits a radial layout.
    ///
    /// Radial tick labels are drawn outward along the east spoke, so only the
    /// right margin grows; the plot otherwise centres itself.
    pub fn fit_radial(&self, candidate: Rect, radial: &AxisGuide) -> Margin {
        let fm = self.font_margin;
        let width = sanitize(candidate.width());
        let height = sanitize(candidate.height());
        let metrics: Vec<(f64, f64)> = radial
            .labels
            .iter()
            .filter(|l| !l.text.is_empty())
            .map(|l| (l.position, self.measure(&l.text, &radial.label_style).width))
            .collect();

        let mut margin = Margin::ZERO;
        if metrics.is_empty() {
            return margin;
        }
        for pass in 1..=RADIAL_PASSES {
            let plot = margin.shrink(Rect::new(0.0, 0.0, width, height));
            let (center, radius) = radial_geometry(plot);
            let ppu = pixels_per_unit(radius, &radial.scale);
            let overflow = metrics
                .iter()
                .map(|(position, w)| {
                    let x = center.x + (position - radial.scale.min()) * ppu;
                    x + fm + w - width
                })
                .fold(0.0, f64::max);
            tracing::trace!(pass, right = margin.right, overflow, ppu, "radial margin pass");
            if overflow <= 0.0 {
                break;
            }
            margin.right += overflow;
        }
        margin.fit_within(width, height)
    }
}

/// Returns the anchor for a label placed outside a radial plot at `point`.
///
/// The label is pushed `gap` pixels further along the ray from `center`.
pub fn radial_label_anchor(center: Point, point: Point, gap: f64) -> Point {
    let d = point - center;
    let len = d.hypot();
    if len <= 0.0 || !len.is_finite() {
        return point;
    }
    point + d * (gap / len)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::axis::AxisConfig;
    use crate::scale::ScaleResult;
    use chartfit_text::HeuristicTextMeasurer;

    fn guide(config: &AxisConfig, scale: ScaleResult) -> AxisGuide {
        config.guide(scale, &TextStyle::new(10.0), &TextStyle::new(12.0))
    }

    #[test]
    fn left_margin_fits_the_widest_label() {
        let fitter = MarginFitter::new(&HeuristicTextMeasurer);
        let vertical = guide(&AxisConfig::auto(), ScaleResult::new(0.0, 100.0, 20.0));
        let horizontal = AxisGuide::new(ScaleResult::UNIT, TextStyle::new(10.0));
        let m = fitter.fit_cartesian(Rect::new(0.0, 0.0, 400.0, 300.0), &vertical, &horizontal);
        // "100" at 10px: 3 * 6px wide.
        assert!((m.left - (18.0 + DEFAULT_FONT_MARGIN)).abs() < 1e-9);
        assert_eq!(m.bottom, 0.0);
        // Top label centred on the top edge overhangs by half its height.
        assert!((m.top - 5.0).abs() < 1e-9);
    }

    #[test]
    fn hidden_labels_reserve_nothing() {
        let fitter = MarginFitter::new(&HeuristicTextMeasurer);
        let config = AxisConfig::auto().with_labels(false);
        let vertical = guide(&config, ScaleResult::new(0.0, 100.0, 20.0));
        let horizontal = guide(&config, ScaleResult::new(0.0, 10.0, 1.0));
        let m = fitter.fit_cartesian(Rect::new(0.0, 0.0, 400.0, 300.0), &vertical, &horizontal);
        assert_eq!(m, Margin::ZERO);
    }

    #[test]
    fn horizontal_edge_labels_grow_the_right_margin() {
        let fitter = MarginFitter::new(&HeuristicTextMeasurer).with_font_margin(0.0);
        let vertical = AxisGuide::new(ScaleResult::UNIT, TextStyle::new(10.0));
        let horizontal = guide(&AxisConfig::auto(), ScaleResult::new(0.0, 1000.0, 200.0));
        let m = fitter.fit_cartesian(Rect::new(0.0, 0.0, 400.0, 300.0), &vertical, &horizontal);
        // "0" overhangs left by 3px, "1000" overhangs right by 12px.
        assert!((m.left - 3.0).abs() < 1e-9);
        assert!((m.right - 12.0).abs() < 1e-9);
        assert!((m.bottom - 10.0).abs() < 1e-9);
    }

    #[test]
    fn titles_add_a_line_of_thickness() {
        let fitter = MarginFitter::new(&HeuristicTextMeasurer);
        let vertical = guide(
            &AxisConfig::auto().with_labels(false).with_title("Load"),
            ScaleResult::UNIT,
        );
        let horizontal = guide(
            &AxisConfig::auto().with_labels(false).with_title("Time"),
            ScaleResult::UNIT,
        );
        let m = fitter.fit_cartesian(Rect::new(0.0, 0.0, 400.0, 300.0), &vertical, &horizontal);
        assert!((m.left - 16.0).abs() < 1e-9);
        assert!((m.bottom - 16.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_candidates_never_go_negative() {
        let fitter = MarginFitter::new(&HeuristicTextMeasurer);
        let vertical = guide(&AxisConfig::auto(), ScaleResult::new(0.0, 100000.0, 20000.0));
        let horizontal = guide(&AxisConfig::auto(), ScaleResult::new(0.0, 100000.0, 20000.0));
        let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
        let m = fitter.fit_cartesian(rect, &vertical, &horizontal);
        assert!(m.left >= 0.0 && m.right >= 0.0 && m.top >= 0.0 && m.bottom >= 0.0);
        assert!(rect.width() - m.left - m.right >= 0.0);
        assert!(rect.height() - m.top - m.bottom >= 0.0);
    }

    #[test]
    fn radial_layouts_only_grow_the_right_margin() {
        let fitter = MarginFitter::new(&HeuristicTextMeasurer);
        let radial = guide(&AxisConfig::auto(), ScaleResult::new(0.0, 100.0, 20.0));
        let m = fitter.fit_radial(Rect::new(0.0, 0.0, 300.0, 300.0), &radial);
        assert!(m.right > 0.0);
        assert_eq!((m.left, m.top, m.bottom), (0.0, 0.0, 0.0));

        let plot = m.shrink(Rect::new(0.0, 0.0, 300.0, 300.0));
        let (center, radius) = radial_geometry(plot);
        let outermost = center.x + radius + DEFAULT_FONT_MARGIN + 18.0;
        assert!(outermost <= 300.0 + 1e-6);
    }

    #[test]
    fn wide_radial_candidates_need_no_margin() {
        let fitter = MarginFitter::new(&HeuristicTextMeasurer);
        let radial = guide(&AxisConfig::auto(), ScaleResult::new(0.0, 100.0, 20.0));
        let m = fitter.fit_radial(Rect::new(0.0, 0.0, 600.0, 200.0), &radial);
        assert_eq!(m, Margin::ZERO);
    }

    #[test]
    fn fit_within_scales_opposite_sides_together() {
        let m = Margin::new(30.0, 10.0, f64::NAN, -4.0).fit_within(20.0, 10.0);
        assert!((m.left - 15.0).abs() < 1e-9);
        assert!((m.right - 5.0).abs() < 1e-9);
        assert_eq!((m.top, m.bottom), (0.0, 0.0));
    }

    #[test]
    fn radial_labels_are_pushed_outward() {
        let a = radial_label_anchor(Point::ZERO, Point::new(0.0, -10.0), 5.0);
        assert!((a.y + 15.0).abs() < 1e-9);
        assert_eq!(radial_label_anchor(Point::ZERO, Point::ZERO, 5.0), Point::ZERO);
    }
}
