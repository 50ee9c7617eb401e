// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-to-pixel projection.
//!
//! A [`ProjectionContext`] is built once per layout from a fitted plot
//! rectangle and a resolved scale. Every projected coordinate is clamped to
//! `[-COORD_LIMIT, COORD_LIMIT]`, so extreme data or a near-empty plot never
//! hands a drawing surface an unrepresentable value.

use kurbo::{Point, Rect};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::scale::ScaleResult;

/// Largest magnitude a projected coordinate may have.
pub const COORD_LIMIT: f64 = 100_000.0;

/// How data values map onto the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Projection {
    /// Linear along one axis; the vertical axis grows upward.
    Cartesian,
    /// Radius from the origin at a free angle.
    Polar,
    /// Radius along one of `vertex_count` evenly spaced spokes (radar).
    Polygon {
        /// Number of spokes.
        vertex_count: usize,
    },
}

/// Everything needed to project values for one axis of one layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionContext {
    /// Pixel position of `scale.min()`: the bottom-left plot corner for
    /// cartesian axes, the centre for radial ones.
    pub origin: Point,
    /// Pixels per data unit.
    pub pixels_per_unit: f64,
    /// The scale values are measured against.
    pub scale: ScaleResult,
    /// Projection kind.
    pub projection: Projection,
}

impl ProjectionContext {
    /// Creates a context from its parts.
    pub fn new(
        origin: Point,
        pixels_per_unit: f64,
        scale: ScaleResult,
        projection: Projection,
    ) -> Self {
        Self {
            origin,
            pixels_per_unit,
            scale,
            projection,
        }
    }

    /// Cartesian context mapping `scale` across the width of `plot`.
    pub fn horizontal(plot: Rect, scale: ScaleResult) -> Self {
        Self::new(
            Point::new(plot.x0, plot.y1),
            pixels_per_unit(plot.width(), &scale),
            scale,
            Projection::Cartesian,
        )
    }

    /// Cartesian context mapping `scale` up the height of `plot`.
    pub fn vertical(plot: Rect, scale: ScaleResult) -> Self {
        Self::new(
            Point::new(plot.x0, plot.y1),
            pixels_per_unit(plot.height(), &scale),
            scale,
            Projection::Cartesian,
        )
    }

    /// Radial context centred in `plot`, mapping `scale` onto the inscribed
    /// circle's radius.
    pub fn radial(plot: Rect, scale: ScaleResult, projection: Projection) -> Self {
        let (center, radius) = radial_geometry(plot);
        Self::new(
            center,
            pixels_per_unit(radius, &scale),
            scale,
            projection,
        )
    }

    /// Pixel distance of `value` from the origin along the axis.
    pub fn distance(&self, value: f64) -> f64 {
        (value - self.scale.min()) * self.pixels_per_unit
    }

    /// Pixel length of the whole scale.
    pub fn extent(&self) -> f64 {
        self.distance(self.scale.max())
    }

    /// Horizontal pixel coordinate of `value`.
    pub fn project_x(&self, value: f64) -> f64 {
        clamp_coord(self.origin.x + self.distance(value))
    }

    /// Vertical pixel coordinate of `value`; pixel y grows downward.
    pub fn project_y(&self, value: f64) -> f64 {
        clamp_coord(self.origin.y - self.distance(value))
    }

    /// Polar projection of `value` at `angle_degrees` (0° east,
    /// counter-clockwise positive).
    pub fn project_polar(&self, angle_degrees: f64, value: f64) -> Point {
        let r = self.distance(value);
        let a = angle_degrees.to_radians();
        Point::new(
            clamp_coord(self.origin.x + r * a.cos()),
            clamp_coord(self.origin.y - r * a.sin()),
        )
    }

    /// Projection of `value` onto spoke `index`.
    ///
    /// Non-polygon contexts have a single spoke pointing up.
    pub fn project_vertex(&self, index: usize, value: f64) -> Point {
        self.project_polar(vertex_angle(self.vertex_count(), index), value)
    }

    /// Number of spokes of a polygon projection, `1` otherwise.
    pub fn vertex_count(&self) -> usize {
        match self.projection {
            Projection::Polygon { vertex_count } => vertex_count.max(1),
            Projection::Cartesian | Projection::Polar => 1,
        }
    }
}

/// Angle in degrees of spoke `index` out of `vertex_count`.
///
/// Spoke 0 points up and the rest follow clockwise.
pub fn vertex_angle(vertex_count: usize, index: usize) -> f64 {
    -(360.0 / vertex_count.max(1) as f64) * index as f64 + 90.0
}

/// Pixels per data unit when `scale` spans `extent` pixels.
///
/// Returns `0` for an empty extent or scale, which collapses every projected
/// value onto the origin.
pub fn pixels_per_unit(extent: f64, scale: &ScaleResult) -> f64 {
    let span = scale.span();
    if extent > 0.0 && span > 0.0 && extent.is_finite() && span.is_finite() {
        extent / span
    } else {
        0.0
    }
}

/// Centre and radius of the circle inscribed in `plot`.
pub fn radial_geometry(plot: Rect) -> (Point, f64) {
    let radius = 0.5 * plot.width().min(plot.height()).max(0.0);
    (plot.center(), radius)
}

/// Clamps a pixel coordinate into `[-COORD_LIMIT, COORD_LIMIT]`; NaN becomes `0`.
pub fn clamp_coord(v: f64) -> f64 {
    if v.is_nan() {
        tracing::trace!("projected NaN coordinate; using 0");
        return 0.0;
    }
    if v.abs() > COORD_LIMIT {
        tracing::trace!(raw = v, "clamped projected coordinate");
    }
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> ScaleResult {
        ScaleResult::new(0.0, 100.0, 20.0)
    }

    #[test]
    fn cartesian_y_grows_upward() {
        let plot = Rect::new(10.0, 20.0, 110.0, 220.0);
        let ctx = ProjectionContext::vertical(plot, scale());
        assert!((ctx.project_y(0.0) - 220.0).abs() < 1e-9);
        assert!((ctx.project_y(100.0) - 20.0).abs() < 1e-9);
        assert!((ctx.project_y(50.0) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn cartesian_x_starts_at_the_left_edge() {
        let plot = Rect::new(10.0, 20.0, 110.0, 220.0);
        let ctx = ProjectionContext::horizontal(plot, scale());
        assert!((ctx.project_x(0.0) - 10.0).abs() < 1e-9);
        assert!((ctx.project_x(100.0) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn polar_zero_degrees_points_east() {
        let ctx = ProjectionContext::new(Point::new(50.0, 50.0), 0.5, scale(), Projection::Polar);
        let p = ctx.project_polar(0.0, 100.0);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);
        let p = ctx.project_polar(90.0, 100.0);
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!((p.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn radar_vertices_start_at_the_top_and_go_clockwise() {
        assert_eq!(vertex_angle(5, 0), 90.0);
        assert_eq!(vertex_angle(5, 1), 18.0);

        let ctx = ProjectionContext::new(
            Point::new(0.0, 0.0),
            1.0,
            scale(),
            Projection::Polygon { vertex_count: 4 },
        );
        let right = ctx.project_vertex(1, 10.0);
        assert!((right.x - 10.0).abs() < 1e-9);
        assert!(right.y.abs() < 1e-9);
    }

    #[test]
    fn extreme_values_are_clamped() {
        let ctx = ProjectionContext::new(Point::ZERO, 1.0e9, scale(), Projection::Cartesian);
        assert_eq!(ctx.project_x(1.0), COORD_LIMIT);
        assert_eq!(ctx.project_y(1.0), -COORD_LIMIT);
        assert_eq!(ctx.project_x(f64::NAN), 0.0);
    }

    #[test]
    fn empty_extent_collapses_to_the_origin() {
        let plot = Rect::new(5.0, 5.0, 5.0, 5.0);
        let ctx = ProjectionContext::vertical(plot, scale());
        assert_eq!(ctx.pixels_per_unit, 0.0);
        assert_eq!(ctx.project_y(42.0), 5.0);
    }
}
