// Copyright 2025 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use approx::assert_abs_diff_eq;
use chartfit::{
    AxisConfig, ChartKind, ChartLayout, ChartSpec, HeuristicTextMeasurer, LabelMetrics,
    LayoutOptions, LegendOrient, PolarPoint, ScaleResult, Series, SeriesGeometry, TextMeasurer,
    TextStyle, resolve, vertex_angle,
};
use kurbo::{Point, Rect, Size};

fn view() -> Rect {
    Rect::new(0.0, 0.0, 640.0, 480.0)
}

fn layout(spec: &ChartSpec) -> ChartLayout {
    spec.layout(view(), &HeuristicTextMeasurer)
}

#[test]
fn single_repeated_value_gets_a_visible_window() {
    let s = resolve(Some(5.0), Some(5.0), &AxisConfig::auto());
    assert!(s.min() < 5.0 && 5.0 < s.max());
    assert!(s.step() > 0.0);
}

#[test]
fn zero_snap_depends_on_where_the_minimum_sits() {
    assert_eq!(resolve(Some(80.0), Some(100.0), &AxisConfig::auto()).min(), 80.0);
    assert_eq!(resolve(Some(5.0), Some(100.0), &AxisConfig::auto()).min(), 0.0);
}

#[test]
fn nice_steps_for_round_ranges() {
    assert_eq!(resolve(Some(0.0), Some(100.0), &AxisConfig::auto()).step(), 20.0);
    assert_eq!(resolve(Some(0.0), Some(150.0), &AxisConfig::auto()).step(), 50.0);
}

#[test]
fn radar_spokes_start_at_the_top() {
    assert_eq!(vertex_angle(5, 0), 90.0);
    assert_eq!(vertex_angle(5, 1), 18.0);
}

#[test]
fn five_day_line_chart_end_to_end() {
    let spec = ChartSpec::new(ChartKind::Line)
        .with_categories(["Mon", "Tue", "Wed", "Thu", "Fri"])
        .with_series(Series::values("load", [50.0, 70.0, 100.0, 100.0, 100.0]));
    let layout = layout(&spec);

    let scale = layout.value_scale();
    assert_eq!((scale.min(), scale.max(), scale.step()), (0.0, 100.0, 20.0));

    let ticks: Vec<f64> = scale.ticks().collect();
    assert_eq!(ticks, [0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

    let labels: Vec<&str> = layout
        .value_guide
        .labels
        .iter()
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(labels, ["0", "20", "40", "60", "80", "100"]);

    let grid = layout.gridlines();
    assert_eq!(grid.len(), 6);
    assert_abs_diff_eq!(grid[0], layout.plot.y1, epsilon = 1e-9);
    assert_abs_diff_eq!(grid[5], layout.plot.y0, epsilon = 1e-9);
    for pair in grid.windows(2) {
        assert_abs_diff_eq!(pair[0] - pair[1], layout.plot.height() / 5.0, epsilon = 1e-9);
    }

    let SeriesGeometry::Points(points) = &layout.geometry[0] else {
        panic!("line charts produce points");
    };
    assert_eq!(points.len(), 5);
    assert_abs_diff_eq!(points[2].y, layout.plot.y0, epsilon = 1e-9);
    assert!(points.windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn margin_leaves_room_for_labels() {
    let spec = ChartSpec::new(ChartKind::Bar)
        .with_categories(["alpha", "beta", "gamma"])
        .with_series(Series::values("s", [10.0, 250.0, 1000.0]));
    let layout = layout(&spec);

    // Widest vertical label is "1000": 4 glyphs of 6px at the default 10px size.
    assert_abs_diff_eq!(layout.margin.left, 24.0 + 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(layout.margin.bottom, 10.0 + 4.0, epsilon = 1e-9);
    assert!(layout.margin.top > 0.0);
    assert_abs_diff_eq!(
        layout.plot.width(),
        layout.candidate.width() - layout.margin.left - layout.margin.right,
        epsilon = 1e-9
    );
}

#[test]
fn scatter_uses_two_value_axes() {
    let spec = ChartSpec::new(ChartKind::Scatter).with_series(Series::xy(
        "s",
        [Point::new(-3.0, 4.0), Point::new(7.0, 40.0), Point::new(f64::NAN, 1.0)],
    ));
    let layout = layout(&spec);
    let x_scale = layout.horizontal_scale().unwrap_or(ScaleResult::UNIT);
    assert!(x_scale.contains(-3.0) && x_scale.contains(7.0));

    let SeriesGeometry::Points(points) = &layout.geometry[0] else {
        panic!("scatter charts produce points");
    };
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|p| layout.plot.contains(*p) || on_edge(layout.plot, *p)));
}

fn on_edge(r: Rect, p: Point) -> bool {
    (p.x - r.x0).abs() < 1e-9
        || (p.x - r.x1).abs() < 1e-9
        || (p.y - r.y0).abs() < 1e-9
        || (p.y - r.y1).abs() < 1e-9
}

#[test]
fn radar_polygons_have_one_vertex_per_category() {
    let spec = ChartSpec::new(ChartKind::Radar)
        .with_categories(["a", "b", "c", "d", "e"])
        .with_series(Series::values("s", [100.0, 50.0, 20.0, 80.0, 60.0]));
    let layout = layout(&spec);
    let ctx = layout.value_projection;

    let SeriesGeometry::Polygon(poly) = &layout.geometry[0] else {
        panic!("radar charts produce polygons");
    };
    assert_eq!(poly.len(), 5);
    // Vertex 0 is straight above the centre at the full radius.
    assert_abs_diff_eq!(poly[0].x, ctx.origin.x, epsilon = 1e-9);
    assert_abs_diff_eq!(ctx.origin.y - poly[0].y, ctx.extent(), epsilon = 1e-9);

    assert_eq!(layout.spoke_anchors().len(), 5);
    let rings = layout.gridlines();
    assert_abs_diff_eq!(rings[0], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(*rings.last().unwrap_or(&0.0), ctx.extent(), epsilon = 1e-9);
}

#[test]
fn radial_layouts_only_reserve_on_the_right() {
    let spec = ChartSpec::new(ChartKind::Polar).with_series(Series::polar(
        "s",
        [PolarPoint::new(0.0, 10.0), PolarPoint::new(120.0, 30.0)],
    ));
    let layout = spec.layout(Rect::new(0.0, 0.0, 400.0, 400.0), &HeuristicTextMeasurer);
    assert_eq!(layout.margin.left, 0.0);
    assert_eq!(layout.margin.top, 0.0);
    assert_eq!(layout.margin.bottom, 0.0);
    assert!(layout.margin.right > 0.0);

    let SeriesGeometry::Points(points) = &layout.geometry[0] else {
        panic!("polar charts produce points");
    };
    let ctx = layout.value_projection;
    assert_abs_diff_eq!(points[0].y, ctx.origin.y, epsilon = 1e-9);
    assert!(points[0].x > ctx.origin.x);
}

#[test]
fn polar_area_sectors_split_the_circle_evenly() {
    let spec = ChartSpec::new(ChartKind::PolarArea)
        .with_categories(["n", "e", "s", "w"])
        .with_series(Series::values("s", [4.0, 8.0, 2.0, 6.0]));
    let layout = layout(&spec);
    let SeriesGeometry::Sectors(sectors) = &layout.geometry[0] else {
        panic!("polar-area charts produce sectors");
    };
    assert_eq!(sectors.len(), 4);
    for (i, s) in sectors.iter().enumerate() {
        assert_abs_diff_eq!(s.sweep(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.start_angle, 90.0 - 90.0 * i as f64, epsilon = 1e-9);
    }
    assert!(sectors[1].outer_radius > sectors[3].outer_radius);
}

#[test]
fn spectrum_cells_are_colored_by_value() {
    let spec = ChartSpec::new(ChartKind::Spectrum).with_series(Series::grid(
        "g",
        3,
        [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
    ));
    let layout = layout(&spec);
    let color = layout.color_scale.unwrap_or(ScaleResult::UNIT);
    assert_eq!((color.min(), color.max()), (0.0, 5.0));

    let SeriesGeometry::Cells(cells) = &layout.geometry[0] else {
        panic!("spectrum charts produce cells");
    };
    assert_eq!(cells.len(), 6);
    assert_eq!(cells[0].color, spec.color_ramp.gradient(0.0));
    assert_eq!(cells[5].color, spec.color_ramp.gradient(1.0));
    // Row 0 sits at the bottom of the plot.
    assert!(cells[0].rect.y1 > cells[3].rect.y1);
}

#[test]
fn empty_charts_still_lay_out() {
    for kind in [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Polar,
        ChartKind::Radar,
        ChartKind::PolarArea,
        ChartKind::Scatter,
        ChartKind::Spectrum,
    ] {
        let layout = layout(&ChartSpec::new(kind));
        assert!(layout.plot.width() >= 0.0 && layout.plot.height() >= 0.0, "{kind:?}");
        assert!(layout.value_scale().step() > 0.0, "{kind:?}");
        assert!(layout.geometry.is_empty(), "{kind:?}");
    }
}

#[test]
fn legend_on_each_side_shrinks_the_candidate() {
    let size = Size::new(80.0, 30.0);
    for (orient, check) in [
        (LegendOrient::Left, Rect::new(98.0, 0.0, 640.0, 480.0)),
        (LegendOrient::Right, Rect::new(0.0, 0.0, 542.0, 480.0)),
        (LegendOrient::Top, Rect::new(0.0, 48.0, 640.0, 480.0)),
        (LegendOrient::Bottom, Rect::new(0.0, 0.0, 640.0, 432.0)),
    ] {
        let spec = ChartSpec::new(ChartKind::Bar).with_legend(size, orient);
        let layout = layout(&spec);
        assert_eq!(layout.candidate, check, "{orient:?}");
        let legend = layout.legend.unwrap_or(Rect::ZERO);
        assert_abs_diff_eq!(legend.width(), 80.0, epsilon = 1e-9);
        assert_abs_diff_eq!(legend.height(), 30.0, epsilon = 1e-9);
    }
}

#[test]
fn tiny_views_degrade_without_negative_sizes() {
    let spec = ChartSpec::new(ChartKind::Bar)
        .with_title("A very long chart title")
        .with_categories(["first category", "second category"])
        .with_series(Series::values("s", [123456.0, 654321.0]));
    let layout = spec.layout(Rect::new(0.0, 0.0, 30.0, 20.0), &HeuristicTextMeasurer);
    assert!(layout.plot.width() >= 0.0);
    assert!(layout.plot.height() >= 0.0);
    assert!(layout.candidate.width() - layout.margin.horizontal() >= 0.0);
}

/// A measurer that reports every label as twice the heuristic width.
struct WideMeasurer;

impl TextMeasurer for WideMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> LabelMetrics {
        let m = HeuristicTextMeasurer.measure(text, style);
        LabelMetrics {
            width: 2.0 * m.width,
            ..m
        }
    }
}

#[test]
fn margins_follow_the_measurer() {
    let spec = ChartSpec::new(ChartKind::Line).with_series(Series::values("s", [1.0, 9.0]));
    let narrow = spec.layout(view(), &HeuristicTextMeasurer);
    let wide = spec.layout(view(), &WideMeasurer);
    assert!(wide.margin.left > narrow.margin.left);
}

#[test]
fn axis_config_loads_from_json() {
    let config: AxisConfig = serde_json::from_str(
        r#"{ "minimum": -10, "minimumAutoFit": false, "maximumAutoFit": true, "title": "Load" }"#,
    )
    .expect("valid axis json");
    assert_eq!(config.minimum, -10.0);
    assert!(!config.minimum_auto_fit);
    assert!(config.step_auto_fit);
    assert_eq!(config.title.as_deref(), Some("Load"));

    let json = serde_json::to_string(&AxisConfig::fixed(0.0, 1.0, 0.25)).expect("serializable");
    assert!(json.contains("\"stepAutoFit\":false"));
}

#[test]
fn layout_options_and_kinds_load_from_json() {
    let options: LayoutOptions =
        serde_json::from_str(r#"{ "fontMargin": 8, "barPadding": 0.5 }"#).expect("valid options");
    assert_eq!(options.font_margin, 8.0);
    assert_eq!(options.label_font_size, LayoutOptions::default().label_font_size);

    let kind: ChartKind = serde_json::from_str(r#""polarArea""#).expect("valid kind");
    assert_eq!(kind, ChartKind::PolarArea);
}
