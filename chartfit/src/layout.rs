// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart layout pipeline.
//!
//! Every chart kind runs the same fixed sequence:
//! - reserve the title strip and the legend box from the view,
//! - resolve the axis scales against the data,
//! - fit the margin for tick labels and titles,
//! - shrink the candidate rectangle into the plot,
//! - project every sample of every series into pixels.
//!
//! The kinds differ only in their projection and how many axes they carry.
//! Nothing survives between calls; drawing the resulting [`ChartLayout`] is
//! left to the caller.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};

use chartfit_text::{TextMeasurer, TextStyle};

use crate::axis::{AxisConfig, AxisGuide, AxisRole};
use crate::error::ChartSpecError;
use crate::margin::{DEFAULT_FONT_MARGIN, Margin, MarginFitter, radial_label_anchor};
use crate::project::{Projection, ProjectionContext, radial_geometry};
use crate::scale::ScaleResult;
use crate::series::{Series, SeriesData, dataset_range, dataset_x_range};
use crate::style::{Palette, SeriesStyle, StyleTable};

/// Fewest spokes a radar chart can be drawn with.
const MIN_RADAR_AXES: usize = 3;

/// The chart families the pipeline lays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Vertical bars per category.
    Bar,
    /// A polyline through category centres.
    Line,
    /// Slices proportional to each value's share.
    Pie,
    /// Angle/value samples.
    Polar,
    /// One polygon per series over evenly spaced spokes.
    Radar,
    /// Equal-angle sectors whose radius encodes the value.
    PolarArea,
    /// X/Y samples on two value axes.
    Scatter,
    /// A colored grid (heat map).
    Spectrum,
}

impl ChartKind {
    /// How values are projected; `vertex_count` is the radar spoke count.
    pub fn projection(self, vertex_count: usize) -> Projection {
        match self {
            Self::Bar | Self::Line | Self::Scatter | Self::Spectrum => Projection::Cartesian,
            Self::Pie | Self::Polar | Self::PolarArea => Projection::Polar,
            Self::Radar => Projection::Polygon { vertex_count },
        }
    }

    /// Number of labelled axes.
    pub fn axis_count(self) -> usize {
        match self {
            Self::Pie => 0,
            Self::Polar | Self::Radar | Self::PolarArea => 1,
            Self::Bar | Self::Line | Self::Scatter | Self::Spectrum => 2,
        }
    }

    /// Returns whether the plot is laid out around a centre.
    pub fn is_radial(self) -> bool {
        !matches!(self.projection(0), Projection::Cartesian)
    }
}

/// Side of the chart a legend is reserved on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendOrient {
    /// Left of the plot.
    Left,
    /// Right of the plot.
    Right,
    /// Above the plot, below the title.
    Top,
    /// Below the plot.
    Bottom,
}

/// Numeric layout settings shared by every chart kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Tick label font size.
    pub label_font_size: f64,
    /// Axis title font size.
    pub title_font_size: f64,
    /// Chart title font size.
    pub chart_title_font_size: f64,
    /// Gap between labels and the plot.
    pub font_margin: f64,
    /// Gap between the legend box and the rest of the chart.
    pub legend_offset: f64,
    /// Fraction of each category band left empty around bars.
    pub bar_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            label_font_size: 10.0,
            title_font_size: 11.0,
            chart_title_font_size: 14.0,
            font_margin: DEFAULT_FONT_MARGIN,
            legend_offset: 18.0,
            bar_padding: 0.2,
        }
    }
}

/// Everything needed to lay out one chart.
#[derive(Clone, Debug)]
pub struct ChartSpec {
    /// Chart kind.
    pub kind: ChartKind,
    /// Vertical (cartesian) or radial axis.
    pub value_axis: AxisConfig,
    /// Horizontal axis of scatter and spectrum charts; only its labels and
    /// title are used by categorical kinds.
    pub horizontal_axis: AxisConfig,
    /// Cell color scale of spectrum charts.
    pub color_axis: AxisConfig,
    /// Category names (bar, line, radar, polar-area, spectrum columns).
    pub categories: Vec<String>,
    /// Series to plot.
    pub series: Vec<Series>,
    /// Numeric layout settings.
    pub options: LayoutOptions,
    /// Chart title.
    pub title: Option<String>,
    /// Legend box size and side.
    pub legend: Option<(Size, LegendOrient)>,
    /// Per-series styling.
    pub styles: StyleTable,
    /// Gradient for spectrum cells.
    pub color_ramp: Palette,
}

impl ChartSpec {
    /// An empty chart of `kind` with auto-fit axes.
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            value_axis: AxisConfig::auto(),
            horizontal_axis: AxisConfig::auto(),
            color_axis: AxisConfig::auto(),
            categories: Vec::new(),
            series: Vec::new(),
            options: LayoutOptions::default(),
            title: None,
            legend: None,
            styles: StyleTable::default(),
            color_ramp: Palette::spectrum(),
        }
    }

    /// Sets the value axis.
    pub fn with_value_axis(mut self, axis: AxisConfig) -> Self {
        self.value_axis = axis;
        self
    }

    /// Sets the horizontal axis.
    pub fn with_horizontal_axis(mut self, axis: AxisConfig) -> Self {
        self.horizontal_axis = axis;
        self
    }

    /// Sets the color axis.
    pub fn with_color_axis(mut self, axis: AxisConfig) -> Self {
        self.color_axis = axis;
        self
    }

    /// Sets the category names.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a series.
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Sets the numeric layout settings.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reserves a legend box of `size` on `orient`.
    pub fn with_legend(mut self, size: Size, orient: LegendOrient) -> Self {
        self.legend = Some((size, orient));
        self
    }

    /// Sets the per-series styling.
    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the spectrum gradient.
    pub fn with_color_ramp(mut self, ramp: Palette) -> Self {
        self.color_ramp = ramp;
        self
    }

    /// Number of categories: the names supplied, or the longest value series.
    pub fn category_count(&self) -> usize {
        let longest = self
            .series
            .iter()
            .filter(|s| matches!(s.data, SeriesData::Values(_)))
            .map(Series::len)
            .max()
            .unwrap_or(0);
        self.categories.len().max(longest)
    }

    /// Checks the configuration for charts that would lay out misleadingly.
    ///
    /// [`ChartSpec::layout`] never fails and does not call this.
    pub fn validate(&self) -> Result<(), ChartSpecError> {
        let axis = |role, config: &AxisConfig| {
            config
                .validate()
                .map_err(|source| ChartSpecError::Axis { role, source })
        };
        if self.kind != ChartKind::Pie {
            axis(AxisRole::Value, &self.value_axis)?;
        }
        if matches!(self.kind, ChartKind::Scatter | ChartKind::Spectrum) {
            axis(AxisRole::Horizontal, &self.horizontal_axis)?;
        }
        if self.kind == ChartKind::Spectrum {
            axis(AxisRole::Color, &self.color_axis)?;
            for (i, s) in self.series.iter().enumerate() {
                if let SeriesData::Grid { columns, values } = &s.data
                    && (*columns == 0 || values.len() % columns != 0)
                {
                    return Err(ChartSpecError::ShapeMismatch {
                        series: i,
                        len: values.len(),
                        columns: *columns,
                    });
                }
            }
        }
        if self.kind == ChartKind::Radar && self.category_count() < MIN_RADAR_AXES {
            return Err(ChartSpecError::TooFewCategories {
                kind: self.kind,
                required: MIN_RADAR_AXES,
                found: self.category_count(),
            });
        }
        Ok(())
    }

    /// Lays the chart out inside `view`.
    pub fn layout(&self, view: Rect, measurer: &dyn TextMeasurer) -> ChartLayout {
        let opts = &self.options;
        let fitter = MarginFitter::new(measurer).with_font_margin(opts.font_margin);
        let fm = fitter.font_margin();
        let label_style = TextStyle::new(opts.label_font_size);
        let title_style = TextStyle::new(opts.title_font_size);

        let (title, legend, candidate) = self.reserve(view, measurer, fm);
        let category_count = self.category_count();

        let mut out = match self.kind {
            ChartKind::Bar | ChartKind::Line | ChartKind::Scatter | ChartKind::Spectrum => {
                self.layout_cartesian(candidate, &fitter, &label_style, &title_style)
            }
            ChartKind::Polar | ChartKind::Radar | ChartKind::PolarArea => {
                self.layout_radial(candidate, &fitter, &label_style, &title_style)
            }
            ChartKind::Pie => self.layout_pie(candidate, fm, &label_style),
        };
        out.kind = self.kind;
        out.view = view;
        out.title = title;
        out.legend = legend;
        out.candidate = candidate;
        out.category_count = category_count;
        out.font_margin = fm;
        out.styles = (0..self.series.len())
            .map(|i| self.styles.resolve(i))
            .collect();

        let scale = out.value_scale();
        tracing::debug!(
            kind = ?self.kind,
            min = scale.min(),
            max = scale.max(),
            step = scale.step(),
            margin = ?out.margin,
            plot = ?out.plot,
            "chart layout"
        );
        out
    }

    /// Splits the title strip and the legend box off `view`.
    fn reserve(
        &self,
        view: Rect,
        measurer: &dyn TextMeasurer,
        fm: f64,
    ) -> (Option<Rect>, Option<Rect>, Rect) {
        let mut candidate = view;

        let title = self.title.as_deref().filter(|t| !t.is_empty()).map(|t| {
            let style = TextStyle::new(self.options.chart_title_font_size);
            let h = nonneg(measurer.measure(t, &style).height() + 2.0 * fm);
            let y1 = (candidate.y0 + h).min(candidate.y1);
            let rect = Rect::new(candidate.x0, candidate.y0, candidate.x1, y1);
            candidate.y0 = y1;
            rect
        });

        let legend = self.legend.map(|(size, orient)| {
            let w = nonneg(size.width);
            let h = nonneg(size.height);
            let gap = nonneg(self.options.legend_offset);
            let c = candidate;
            match orient {
                LegendOrient::Left => {
                    candidate.x0 = (c.x0 + w + gap).min(c.x1);
                    Rect::new(c.x0, c.y0, c.x0 + w, c.y0 + h)
                }
                LegendOrient::Right => {
                    candidate.x1 = (c.x1 - w - gap).max(c.x0);
                    Rect::new(c.x1 - w, c.y0, c.x1, c.y0 + h)
                }
                LegendOrient::Top => {
                    candidate.y0 = (c.y0 + h + gap).min(c.y1);
                    Rect::new(c.x0, c.y0, c.x0 + w, c.y0 + h)
                }
                LegendOrient::Bottom => {
                    candidate.y1 = (c.y1 - h - gap).max(c.y0);
                    Rect::new(c.x0, c.y1 - h, c.x0 + w, c.y1)
                }
            }
        });

        (title, legend, candidate)
    }

    fn categorical_guide(
        &self,
        count: usize,
        label_style: &TextStyle,
        title_style: &TextStyle,
    ) -> AxisGuide {
        let names = (0..count).map(|i| self.categories.get(i).cloned().unwrap_or_default());
        let mut guide = AxisGuide::categories(names, label_style.clone())
            .with_title(self.horizontal_axis.title.clone(), title_style.clone());
        if !self.horizontal_axis.show_labels {
            guide.labels.clear();
        }
        guide
    }

    /// Index of the grid a spectrum chart draws: the first with any columns.
    fn drawn_grid(&self) -> Option<usize> {
        self.series.iter().position(|s| s.columns() > 0)
    }

    fn layout_cartesian(
        &self,
        candidate: Rect,
        fitter: &MarginFitter<'_>,
        label_style: &TextStyle,
        title_style: &TextStyle,
    ) -> ChartLayout {
        let mut color_scale = None;
        let (value_scale, horizontal_guide) = match self.kind {
            ChartKind::Scatter => {
                let x_scale = self.horizontal_axis.resolve_range(dataset_x_range(&self.series));
                (
                    self.value_axis.resolve_range(dataset_range(&self.series)),
                    self.horizontal_axis.guide(x_scale, label_style, title_style),
                )
            }
            ChartKind::Spectrum => {
                let grid = self.drawn_grid().map(|i| &self.series[i]);
                let (columns, rows) = grid.map_or((0, 0), |g| (g.columns(), g.rows()));
                let value_scale = self.value_axis.resolve(Some(0.0), Some(rows as f64));
                let guide = if self.categories.is_empty() {
                    let x_scale = self.horizontal_axis.resolve(Some(0.0), Some(columns as f64));
                    self.horizontal_axis.guide(x_scale, label_style, title_style)
                } else {
                    self.categorical_guide(columns, label_style, title_style)
                };
                color_scale =
                    Some(self.color_axis.resolve_range(grid.and_then(Series::value_range)));
                (value_scale, guide)
            }
            _ => (
                self.value_axis.resolve_range(dataset_range(&self.series)),
                self.categorical_guide(self.category_count(), label_style, title_style),
            ),
        };

        let value_guide = self.value_axis.guide(value_scale, label_style, title_style);
        let margin = fitter.fit_cartesian(candidate, &value_guide, &horizontal_guide);
        let plot = margin.shrink(candidate);
        let value = ProjectionContext::vertical(plot, value_guide.scale);
        let horizontal = ProjectionContext::horizontal(plot, horizontal_guide.scale);

        let geometry = match self.kind {
            ChartKind::Bar => self.bars(&value, &horizontal),
            ChartKind::Spectrum => self.cells(&value, &horizontal, color_scale),
            _ => self
                .series
                .iter()
                .map(|s| {
                    let points = match &s.data {
                        SeriesData::Values(v) => v
                            .iter()
                            .enumerate()
                            .filter(|(_, v)| v.is_finite())
                            .map(|(i, v)| {
                                Point::new(horizontal.project_x(i as f64 + 0.5), value.project_y(*v))
                            })
                            .collect(),
                        SeriesData::Xy(p) => p
                            .iter()
                            .filter(|p| p.is_finite())
                            .map(|p| Point::new(horizontal.project_x(p.x), value.project_y(p.y)))
                            .collect(),
                        SeriesData::Polar(_) | SeriesData::Grid { .. } => Vec::new(),
                    };
                    SeriesGeometry::Points(points)
                })
                .collect(),
        };

        ChartLayout {
            margin,
            plot,
            value_projection: value,
            horizontal_projection: Some(horizontal),
            color_scale,
            geometry,
            ..ChartLayout::empty(value_guide, Some(horizontal_guide))
        }
    }

    fn bars(&self, value: &ProjectionContext, horizontal: &ProjectionContext) -> Vec<SeriesGeometry> {
        let band = horizontal.pixels_per_unit;
        let pad = if self.options.bar_padding.is_finite() {
            self.options.bar_padding.max(0.0).min(1.0)
        } else {
            0.0
        };
        let count = self.series.len().max(1);
        let slot = band * (1.0 - pad) / count as f64;
        let scale = value.scale;
        let base_y = value.project_y(0.0_f64.max(scale.min()).min(scale.max()));

        self.series
            .iter()
            .enumerate()
            .map(|(s, series)| {
                let SeriesData::Values(values) = &series.data else {
                    return SeriesGeometry::Bars(Vec::new());
                };
                let rects = values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, v)| {
                        let x0 = horizontal.project_x(i as f64) + 0.5 * band * pad + s as f64 * slot;
                        Rect::from_points((x0, base_y), (x0 + slot, value.project_y(*v)))
                    })
                    .collect();
                SeriesGeometry::Bars(rects)
            })
            .collect()
    }

    fn cells(
        &self,
        value: &ProjectionContext,
        horizontal: &ProjectionContext,
        color_scale: Option<ScaleResult>,
    ) -> Vec<SeriesGeometry> {
        let color_scale = color_scale.unwrap_or(ScaleResult::UNIT);
        let drawn = self.drawn_grid();
        self.series
            .iter()
            .enumerate()
            .map(|(index, series)| {
                let SeriesData::Grid { columns, values } = &series.data else {
                    return SeriesGeometry::Cells(Vec::new());
                };
                // Only the grid the axes were resolved from is drawn.
                if drawn != Some(index) {
                    return SeriesGeometry::Cells(Vec::new());
                }
                let cells = values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, v)| {
                        let (row, col) = ((i / columns) as f64, (i % columns) as f64);
                        let rect = Rect::from_points(
                            (horizontal.project_x(col), value.project_y(row)),
                            (horizontal.project_x(col + 1.0), value.project_y(row + 1.0)),
                        );
                        let t = if color_scale.span() > 0.0 {
                            (v - color_scale.min()) / color_scale.span()
                        } else {
                            0.0
                        };
                        Cell {
                            rect,
                            value: *v,
                            color: self.color_ramp.gradient(t),
                        }
                    })
                    .collect();
                SeriesGeometry::Cells(cells)
            })
            .collect()
    }

    fn layout_radial(
        &self,
        candidate: Rect,
        fitter: &MarginFitter<'_>,
        label_style: &TextStyle,
        title_style: &TextStyle,
    ) -> ChartLayout {
        let scale = self.value_axis.resolve_range(dataset_range(&self.series));
        let guide = self.value_axis.guide(scale, label_style, title_style);
        let margin = fitter.fit_radial(candidate, &guide);
        let plot = margin.shrink(candidate);
        let n = self.category_count();
        let ctx = ProjectionContext::radial(plot, scale, self.kind.projection(n));
        let extent = ctx.extent().max(0.0);

        let geometry = self
            .series
            .iter()
            .map(|series| match (self.kind, &series.data) {
                (ChartKind::Polar, SeriesData::Polar(points)) => SeriesGeometry::Points(
                    points
                        .iter()
                        .filter(|p| p.angle.is_finite() && p.value.is_finite())
                        .map(|p| ctx.project_polar(p.angle, p.value))
                        .collect(),
                ),
                (ChartKind::Radar, SeriesData::Values(values)) => SeriesGeometry::Polygon(
                    values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| {
                            let v = if v.is_finite() { *v } else { scale.min() };
                            ctx.project_vertex(i, v)
                        })
                        .collect(),
                ),
                (ChartKind::PolarArea, SeriesData::Values(values)) => {
                    let sweep = 360.0 / n.max(1) as f64;
                    SeriesGeometry::Sectors(
                        values
                            .iter()
                            .enumerate()
                            .filter(|(_, v)| v.is_finite())
                            .map(|(i, v)| {
                                let start = 90.0 - sweep * i as f64;
                                let outer = ctx.distance(*v).max(0.0).min(extent);
                                Sector::new(ctx.origin, 0.0, outer, start, start - sweep, i)
                                    .with_anchor(fitter.font_margin())
                            })
                            .collect(),
                    )
                }
                (ChartKind::Polar, _) => SeriesGeometry::Points(Vec::new()),
                (ChartKind::Radar, _) => SeriesGeometry::Polygon(Vec::new()),
                _ => SeriesGeometry::Sectors(Vec::new()),
            })
            .collect();

        ChartLayout {
            margin,
            plot,
            value_projection: ctx,
            geometry,
            ..ChartLayout::empty(guide, None)
        }
    }

    fn layout_pie(&self, candidate: Rect, fm: f64, label_style: &TextStyle) -> ChartLayout {
        let ctx = ProjectionContext::radial(candidate, ScaleResult::UNIT, Projection::Polar);
        let (center, radius) = radial_geometry(candidate);

        let geometry = self
            .series
            .iter()
            .map(|series| {
                let SeriesData::Values(values) = &series.data else {
                    return SeriesGeometry::Sectors(Vec::new());
                };
                let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
                if total <= 0.0 || !total.is_finite() {
                    return SeriesGeometry::Sectors(Vec::new());
                }
                let mut start = 90.0;
                let mut sectors = Vec::new();
                for (i, v) in values.iter().enumerate() {
                    if !(v.is_finite() && *v > 0.0) {
                        continue;
                    }
                    let sweep = 360.0 * v / total;
                    sectors.push(
                        Sector::new(center, 0.0, radius, start, start - sweep, i).with_anchor(fm),
                    );
                    start -= sweep;
                }
                SeriesGeometry::Sectors(sectors)
            })
            .collect();

        ChartLayout {
            margin: Margin::ZERO,
            plot: candidate,
            value_projection: ctx,
            geometry,
            ..ChartLayout::empty(AxisGuide::new(ScaleResult::UNIT, label_style.clone()), None)
        }
    }
}

fn nonneg(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// A slice of a disc or annulus.
///
/// Angles are in degrees, 0° east and counter-clockwise positive; slices laid
/// out clockwise therefore have `end_angle < start_angle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    /// Centre of the disc.
    pub center: Point,
    /// Inner radius (0 for a full wedge).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// End angle in degrees.
    pub end_angle: f64,
    /// Index of the sample this sector was built from.
    pub index: usize,
    /// Label anchor just outside the middle of the outer arc.
    pub anchor: Point,
}

impl Sector {
    /// Creates a sector whose anchor sits on the middle of its outer arc.
    pub fn new(
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        index: usize,
    ) -> Self {
        let mut sector = Self {
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            index,
            anchor: center,
        };
        sector.anchor = sector.point_at(sector.mid_angle(), outer_radius);
        sector
    }

    /// Pushes the anchor `gap` pixels outward from the outer arc.
    pub fn with_anchor(mut self, gap: f64) -> Self {
        let edge = self.point_at(self.mid_angle(), self.outer_radius);
        self.anchor = radial_label_anchor(self.center, edge, gap);
        self
    }

    /// Angle halfway between the start and end angles.
    pub fn mid_angle(&self) -> f64 {
        0.5 * (self.start_angle + self.end_angle)
    }

    /// Angular size in degrees.
    pub fn sweep(&self) -> f64 {
        (self.start_angle - self.end_angle).abs()
    }

    fn point_at(&self, angle_degrees: f64, radius: f64) -> Point {
        ProjectionContext::new(self.center, 1.0, ScaleResult::new(0.0, 1.0, 1.0), Projection::Polar)
            .project_polar(angle_degrees, radius)
    }
}

/// One spectrum cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Pixel rectangle.
    pub rect: Rect,
    /// Cell value.
    pub value: f64,
    /// Color from the spectrum gradient.
    pub color: Color,
}

/// Projected geometry of one series.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesGeometry {
    /// Markers or polyline vertices (line, polar, scatter).
    Points(Vec<Point>),
    /// Bar rectangles.
    Bars(Vec<Rect>),
    /// A closed polygon (radar).
    Polygon(Vec<Point>),
    /// Wedges (pie, polar-area).
    Sectors(Vec<Sector>),
    /// Heat-map cells (spectrum).
    Cells(Vec<Cell>),
}

impl SeriesGeometry {
    /// Number of primitives.
    pub fn len(&self) -> usize {
        match self {
            Self::Points(p) | Self::Polygon(p) => p.len(),
            Self::Bars(r) => r.len(),
            Self::Sectors(s) => s.len(),
            Self::Cells(c) => c.len(),
        }
    }

    /// Returns whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of one pipeline run, ready for a drawing routine.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    /// Chart kind.
    pub kind: ChartKind,
    /// Outer bounds.
    pub view: Rect,
    /// Reserved chart title strip.
    pub title: Option<Rect>,
    /// Reserved legend box.
    pub legend: Option<Rect>,
    /// The view minus title and legend: what the margin was fitted against.
    pub candidate: Rect,
    /// Fitted margin.
    pub margin: Margin,
    /// The candidate shrunk by the margin.
    pub plot: Rect,
    /// Vertical or radial axis.
    pub value_guide: AxisGuide,
    /// Horizontal axis of cartesian charts.
    pub horizontal_guide: Option<AxisGuide>,
    /// Projection for the value axis.
    pub value_projection: ProjectionContext,
    /// Projection for the horizontal axis of cartesian charts.
    pub horizontal_projection: Option<ProjectionContext>,
    /// Color scale of spectrum charts.
    pub color_scale: Option<ScaleResult>,
    /// One entry per series, in series order.
    pub geometry: Vec<SeriesGeometry>,
    /// Resolved style per series.
    pub styles: Vec<SeriesStyle>,
    /// Number of categories (radar spokes, polar-area sectors, bands).
    pub category_count: usize,
    /// Label-to-plot gap used by the fit.
    pub font_margin: f64,
}

impl ChartLayout {
    fn empty(value_guide: AxisGuide, horizontal_guide: Option<AxisGuide>) -> Self {
        let scale = value_guide.scale;
        Self {
            kind: ChartKind::Bar,
            view: Rect::ZERO,
            title: None,
            legend: None,
            candidate: Rect::ZERO,
            margin: Margin::ZERO,
            plot: Rect::ZERO,
            value_guide,
            horizontal_guide,
            value_projection: ProjectionContext::new(Point::ZERO, 0.0, scale, Projection::Cartesian),
            horizontal_projection: None,
            color_scale: None,
            geometry: Vec::new(),
            styles: Vec::new(),
            category_count: 0,
            font_margin: DEFAULT_FONT_MARGIN,
        }
    }

    /// The resolved value scale.
    pub fn value_scale(&self) -> ScaleResult {
        self.value_guide.scale
    }

    /// The resolved horizontal scale of cartesian charts.
    pub fn horizontal_scale(&self) -> Option<ScaleResult> {
        self.horizontal_guide.as_ref().map(|g| g.scale)
    }

    /// Pixel positions of the value gridlines: y coordinates for cartesian
    /// charts, ring radii for radial ones. Pie charts have none.
    pub fn gridlines(&self) -> Vec<f64> {
        let ctx = &self.value_projection;
        match self.kind {
            ChartKind::Pie => Vec::new(),
            kind if kind.is_radial() => ctx.scale.ticks().map(|v| ctx.distance(v)).collect(),
            _ => ctx.scale.ticks().map(|v| ctx.project_y(v)).collect(),
        }
    }

    /// Pixel x coordinates of the horizontal axis ticks.
    pub fn horizontal_gridlines(&self) -> Vec<f64> {
        self.horizontal_projection
            .map(|ctx| ctx.scale.ticks().map(|v| ctx.project_x(v)).collect())
            .unwrap_or_default()
    }

    /// Category label anchors just outside a radar or polar-area plot.
    pub fn spoke_anchors(&self) -> Vec<Point> {
        let ctx = &self.value_projection;
        let n = self.category_count;
        let max = ctx.scale.max();
        match self.kind {
            ChartKind::Radar => (0..n)
                .map(|i| radial_label_anchor(ctx.origin, ctx.project_vertex(i, max), self.font_margin))
                .collect(),
            ChartKind::PolarArea => {
                let sweep = 360.0 / n.max(1) as f64;
                (0..n)
                    .map(|i| {
                        let edge = ctx.project_polar(90.0 - sweep * (i as f64 + 0.5), max);
                        radial_label_anchor(ctx.origin, edge, self.font_margin)
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}
