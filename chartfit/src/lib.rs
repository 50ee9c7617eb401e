// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine for statistical charts.
//!
//! Every chart kind (bar, line, pie, polar, radar, polar-area, scatter and
//! spectrum) is laid out by the same three components:
//! - the **scale resolver** turns a data range plus an [`AxisConfig`] into a
//!   readable [`ScaleResult`] (see [`resolve`]),
//! - the **margin fitter** reserves room for tick labels and titles
//!   ([`MarginFitter`]),
//! - the **projector** maps data values into pixels under a cartesian, polar,
//!   or regular-polygon layout ([`ProjectionContext`]).
//!
//! [`ChartSpec::layout`] runs them in order and returns a [`ChartLayout`]
//! holding the plot rectangle, the guides and the projected geometry of every
//! series. Issuing draw calls is left to the caller; text is measured through
//! the [`TextMeasurer`] boundary from `chartfit_text`.
//!
//! ```
//! use chartfit::{ChartKind, ChartSpec, HeuristicTextMeasurer, Series};
//! use kurbo::Rect;
//!
//! let spec = ChartSpec::new(ChartKind::Line)
//!     .with_categories(["Mon", "Tue", "Wed", "Thu", "Fri"])
//!     .with_series(Series::values("load", [50.0, 70.0, 100.0, 100.0, 100.0]));
//! let layout = spec.layout(Rect::new(0.0, 0.0, 640.0, 480.0), &HeuristicTextMeasurer);
//!
//! let scale = layout.value_scale();
//! assert_eq!((scale.min(), scale.max(), scale.step()), (0.0, 100.0, 20.0));
//! assert_eq!(layout.gridlines().len(), 6);
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod axis;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod margin;
mod project;
mod scale;
mod series;
mod style;

pub use axis::{AxisConfig, AxisGuide, AxisRole, LabelFormatter, TickLabel};
pub use chartfit_text::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, LabelMetrics, TextMeasurer,
    TextStyle,
};
pub use error::{AxisConfigError, ChartSpecError};
pub use format::format_tick;
pub use layout::{
    Cell, ChartKind, ChartLayout, ChartSpec, LayoutOptions, LegendOrient, Sector, SeriesGeometry,
};
pub use margin::{DEFAULT_FONT_MARGIN, Margin, MarginFitter, radial_label_anchor};
pub use project::{
    COORD_LIMIT, Projection, ProjectionContext, clamp_coord, pixels_per_unit, radial_geometry,
    vertex_angle,
};
pub use scale::{MAX_TICKS, ScaleResult, Ticks, nice_step, resolve, resolve_range};
pub use series::{PolarPoint, Series, SeriesData, dataset_range, dataset_x_range};
pub use style::{Palette, SeriesStyle, SlotValue, StyleSlot, StyleTable};
