// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series data and range scanning.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

/// One angle/value sample of a polar series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolarPoint {
    /// Angle in degrees, 0° east, counter-clockwise positive.
    pub angle: f64,
    /// Radial value.
    pub value: f64,
}

impl PolarPoint {
    /// Creates a polar sample.
    pub const fn new(angle: f64, value: f64) -> Self {
        Self { angle, value }
    }
}

/// The samples of one series.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesData {
    /// One value per category (bar, line, radar, polar-area, pie).
    Values(Vec<f64>),
    /// Angle/value pairs (polar).
    Polar(Vec<PolarPoint>),
    /// X/Y pairs (scatter).
    Xy(Vec<Point>),
    /// A row-major grid of cell values (spectrum).
    Grid {
        /// Cells per row.
        columns: usize,
        /// Cell values, row by row.
        values: Vec<f64>,
    },
}

/// A named series.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Display name, used by legends.
    pub name: String,
    /// Samples.
    pub data: SeriesData,
}

impl Series {
    /// A per-category value series.
    pub fn values(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Values(values.into()),
        }
    }

    /// A polar series.
    pub fn polar(name: impl Into<String>, points: impl Into<Vec<PolarPoint>>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Polar(points.into()),
        }
    }

    /// A scatter series.
    pub fn xy(name: impl Into<String>, points: impl Into<Vec<Point>>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Xy(points.into()),
        }
    }

    /// A spectrum grid with `columns` cells per row.
    pub fn grid(name: impl Into<String>, columns: usize, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Grid {
                columns,
                values: values.into(),
            },
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Values(v) => v.len(),
            SeriesData::Polar(p) => p.len(),
            SeriesData::Xy(p) => p.len(),
            SeriesData::Grid { values, .. } => values.len(),
        }
    }

    /// Returns whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of grid columns. `0` for non-grid data.
    pub fn columns(&self) -> usize {
        match &self.data {
            SeriesData::Grid { columns, .. } => *columns,
            _ => 0,
        }
    }

    /// Number of grid rows, rounding a partial last row up. `0` for non-grid data.
    pub fn rows(&self) -> usize {
        match &self.data {
            SeriesData::Grid { columns, values } if *columns > 0 => values.len().div_ceil(*columns),
            _ => 0,
        }
    }

    /// `(min, max)` of the values this series plots on its value axis,
    /// skipping non-finite samples.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        match &self.data {
            SeriesData::Values(v) | SeriesData::Grid { values: v, .. } => range(v.iter().copied()),
            SeriesData::Polar(p) => range(p.iter().map(|p| p.value)),
            SeriesData::Xy(p) => range(p.iter().map(|p| p.y)),
        }
    }

    /// `(min, max)` of the x values of a scatter series.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        match &self.data {
            SeriesData::Xy(p) => range(p.iter().map(|p| p.x)),
            _ => None,
        }
    }
}

/// Combined value range of every series.
pub fn dataset_range(series: &[Series]) -> Option<(f64, f64)> {
    merge(series.iter().filter_map(Series::value_range))
}

/// Combined x range of every scatter series.
pub fn dataset_x_range(series: &[Series]) -> Option<(f64, f64)> {
    merge(series.iter().filter_map(Series::x_range))
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    merge(values.filter(|v| v.is_finite()).map(|v| (v, v)))
}

fn merge(ranges: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    ranges.reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn non_finite_samples_are_skipped() {
        let s = Series::values("a", vec![3.0, f64::NAN, -1.0, f64::INFINITY]);
        assert_eq!(s.value_range(), Some((-1.0, 3.0)));
        assert_eq!(Series::values("b", vec![f64::NAN]).value_range(), None);
    }

    #[test]
    fn dataset_range_merges_every_series() {
        let series = [
            Series::values("a", vec![50.0, 70.0]),
            Series::polar("b", vec![PolarPoint::new(0.0, 120.0)]),
            Series::values("c", Vec::new()),
        ];
        assert_eq!(dataset_range(&series), Some((50.0, 120.0)));
        assert_eq!(dataset_x_range(&series), None);
    }

    #[test]
    fn scatter_series_report_both_ranges() {
        let s = Series::xy("s", vec![Point::new(-2.0, 4.0), Point::new(8.0, 1.0)]);
        assert_eq!(s.x_range(), Some((-2.0, 8.0)));
        assert_eq!(s.value_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn grid_rows_round_up() {
        let s = Series::grid("g", 3, vec![0.0; 7]);
        assert_eq!(s.rows(), 3);
        assert_eq!(s.columns(), 3);
        assert_eq!(s.len(), 7);
        assert_eq!(Series::grid("empty", 0, vec![1.0]).rows(), 0);
    }
}
