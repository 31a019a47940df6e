//! Coupling between the radial plot and the 3D cursor sphere.
//!
//! Everything here is presentation state. Plot geometry is produced in plot
//! pixel space (origin top-left, y down) so the web frontend can stroke it on
//! a 2D canvas and the native frontend can map it to clip space.

use crate::constants::{
    CURSOR_LINE_COLOR, CURSOR_SPHERE_MIN_SCALE, CURSOR_SPHERE_RADIUS, SERIES_ACCENT_COLOR,
    SERIES_CUMULATIVE_COLOR, SERIES_DIMMED_COLOR, SERIES_PROBABILITY_COLOR, SERIES_RADIAL_COLOR,
};
use crate::radial::RadialCurveSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Series {
    Radial,
    Probability,
    Cumulative,
}

impl Series {
    pub const ALL: [Series; 3] = [Series::Radial, Series::Probability, Series::Cumulative];

    pub fn label(&self) -> &'static str {
        match self {
            Series::Radial => "R(r)",
            Series::Probability => "P(r)",
            Series::Cumulative => "∫P dr",
        }
    }

    /// Stable key used by hosts (`data-series` attribute on the web).
    pub fn key(&self) -> &'static str {
        match self {
            Series::Radial => "radial",
            Series::Probability => "probability",
            Series::Cumulative => "cumulative",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn base_color(&self) -> [f32; 4] {
        match self {
            Series::Radial => SERIES_RADIAL_COLOR,
            Series::Probability => SERIES_PROBABILITY_COLOR,
            Series::Cumulative => SERIES_CUMULATIVE_COLOR,
        }
    }

    pub fn values<'a>(&self, curves: &'a RadialCurveSet) -> &'a [f64] {
        match self {
            Series::Radial => &curves.radial,
            Series::Probability => &curves.probability,
            Series::Cumulative => &curves.cumulative,
        }
    }

    /// Next series in legend order, wrapping to `None` after the last one.
    pub fn cycle(current: Option<Series>) -> Option<Series> {
        match current {
            None => Some(Series::Radial),
            Some(Series::Radial) => Some(Series::Probability),
            Some(Series::Probability) => Some(Series::Cumulative),
            Some(Series::Cumulative) => None,
        }
    }
}

/// Stroke color for `series` given the legend focus.
pub fn series_color(series: Series, active_legend: Option<Series>) -> [f32; 4] {
    match active_legend {
        None => series.base_color(),
        Some(active) if active == series => SERIES_ACCENT_COLOR,
        Some(_) => SERIES_DIMMED_COLOR,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPadding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for PlotPadding {
    fn default() -> Self {
        Self {
            left: 36.0,
            right: 12.0,
            top: 12.0,
            bottom: 24.0,
        }
    }
}

/// Plot surface size in pixels plus the padding around the plotting area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    pub width: f32,
    pub height: f32,
    pub padding: PlotPadding,
}

impl PlotLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding: PlotPadding::default(),
        }
    }

    pub fn inner_width(&self) -> f32 {
        (self.width - self.padding.left - self.padding.right).max(1.0)
    }

    pub fn inner_height(&self) -> f32 {
        (self.height - self.padding.top - self.padding.bottom).max(1.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x <= self.width && y <= self.height
    }

    /// Pixel x to radius, clamped to `[0, r_max]`.
    pub fn radius_for_x(&self, x: f32, r_max: f64) -> f64 {
        let frac = ((x - self.padding.left) / self.inner_width()).clamp(0.0, 1.0) as f64;
        frac * r_max
    }

    pub fn x_for_radius(&self, r: f64, r_max: f64) -> f32 {
        let frac = if r_max > 0.0 {
            (r / r_max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.padding.left + frac as f32 * self.inner_width()
    }

    /// Pixel y for a display value in `[y_min, 1]`.
    pub fn y_for_value(&self, v: f64, y_min: f64) -> f32 {
        let span = (1.0 - y_min).max(f64::EPSILON);
        let frac = ((v - y_min) / span).clamp(0.0, 1.0) as f32;
        self.padding.top + (1.0 - frac) * self.inner_height()
    }
}

/// Linear interpolation of `values` at radius `r` by fractional sample index.
pub fn interpolate(values: &[f64], r: f64, r_max: f64) -> f64 {
    match values.len() {
        0 => 0.0,
        1 => values[0],
        len => {
            let last = (len - 1) as f64;
            let idx = if r_max > 0.0 {
                (r / r_max * last).clamp(0.0, last)
            } else {
                0.0
            };
            let i0 = idx.floor() as usize;
            let i1 = (i0 + 1).min(len - 1);
            let frac = idx - i0 as f64;
            values[i0] + (values[i1] - values[i0]) * frac
        }
    }
}

/// Series values scaled for display: radial by its max |value|, probability
/// by its max, cumulative as is.
pub fn display_values(series: Series, curves: &RadialCurveSet) -> Vec<f64> {
    let values = series.values(curves);
    let scale = match series {
        Series::Radial => values.iter().fold(0.0f64, |m, v| m.max(v.abs())),
        Series::Probability => values.iter().fold(0.0f64, |m, &v| m.max(v)),
        Series::Cumulative => 1.0,
    };
    if scale > 0.0 {
        values.iter().map(|v| v / scale).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// Pointer-driven cursor over the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub radius: f64,
    pub active: bool,
    pub active_legend: Option<Series>,
}

impl CursorState {
    pub fn hover(&mut self, layout: &PlotLayout, x: f32, r_max: f64) {
        self.radius = layout.radius_for_x(x, r_max);
        self.active = true;
    }

    pub fn leave(&mut self) {
        self.active = false;
    }

    /// Keep the radius valid after the curves were regenerated.
    pub fn clamp_to(&mut self, r_max: f64) {
        self.radius = self.radius.clamp(0.0, r_max.max(0.0));
    }

    /// Cursor sphere transform scale, or `None` while the plot is not hovered.
    pub fn sphere_scale(&self, bound_scale: f64) -> Option<f32> {
        self.active
            .then(|| cursor_sphere_scale(self.radius, bound_scale))
    }
}

/// Scale applied to the radius-0.5 sphere mesh so it sits at physical radius
/// `radius` inside a cube of half-extent `bound_scale`.
pub fn cursor_sphere_scale(radius: f64, bound_scale: f64) -> f32 {
    if bound_scale <= 0.0 {
        return CURSOR_SPHERE_MIN_SCALE;
    }
    let s = (radius / (2.0 * bound_scale) / CURSOR_SPHERE_RADIUS as f64) as f32;
    s.max(CURSOR_SPHERE_MIN_SCALE)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub series: Series,
    pub color: [f32; 4],
    pub points: Vec<[f32; 2]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub series: Series,
    pub color: [f32; 4],
    pub position: [f32; 2],
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotGeometry {
    pub polylines: Vec<Polyline>,
    pub baseline: Option<[[f32; 2]; 2]>,
    pub cursor_line: Option<[[f32; 2]; 2]>,
    pub cursor_color: [f32; 4],
    pub markers: Vec<Marker>,
}

/// Lay out the three series, the zero baseline and, while hovered, the cursor
/// line with one marker per curve.
pub fn build_plot(curves: &RadialCurveSet, cursor: &CursorState, layout: &PlotLayout) -> PlotGeometry {
    let mut geom = PlotGeometry {
        cursor_color: CURSOR_LINE_COLOR,
        ..Default::default()
    };
    if curves.is_empty() {
        return geom;
    }

    let display: Vec<(Series, Vec<f64>)> = Series::ALL
        .into_iter()
        .map(|s| (s, display_values(s, curves)))
        .collect();
    let y_min = display
        .iter()
        .flat_map(|(_, v)| v.iter().copied())
        .fold(0.0f64, f64::min);

    for (series, values) in &display {
        let points = curves
            .r
            .iter()
            .zip(values)
            .map(|(&r, &v)| [layout.x_for_radius(r, curves.r_max), layout.y_for_value(v, y_min)])
            .collect();
        geom.polylines.push(Polyline {
            series: *series,
            color: series_color(*series, cursor.active_legend),
            points,
        });
    }

    let y0 = layout.y_for_value(0.0, y_min);
    geom.baseline = Some([
        [layout.padding.left, y0],
        [layout.padding.left + layout.inner_width(), y0],
    ]);

    if cursor.active {
        let x = layout.x_for_radius(cursor.radius, curves.r_max);
        geom.cursor_line = Some([
            [x, layout.padding.top],
            [x, layout.padding.top + layout.inner_height()],
        ]);
        for (series, values) in &display {
            let value = interpolate(values, cursor.radius, curves.r_max);
            geom.markers.push(Marker {
                series: *series,
                color: series_color(*series, cursor.active_legend),
                position: [x, layout.y_for_value(value, y_min)],
                value: interpolate(series.values(curves), cursor.radius, curves.r_max),
            });
        }
    }
    geom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radial::compute_curves;

    #[test]
    fn pointer_maps_linearly_and_clamps() {
        let layout = PlotLayout::new(248.0, 136.0);
        assert_eq!(layout.radius_for_x(36.0, 50.0), 0.0);
        assert_eq!(layout.radius_for_x(236.0, 50.0), 50.0);
        assert!((layout.radius_for_x(136.0, 50.0) - 25.0).abs() < 1e-9);
        assert_eq!(layout.radius_for_x(-40.0, 50.0), 0.0);
        assert_eq!(layout.radius_for_x(999.0, 50.0), 50.0);
        assert!((layout.x_for_radius(25.0, 50.0) - 136.0).abs() < 1e-4);
    }

    #[test]
    fn interpolation_between_samples() {
        let v = [0.0, 10.0, 20.0];
        assert_eq!(interpolate(&v, 0.0, 2.0), 0.0);
        assert_eq!(interpolate(&v, 0.5, 2.0), 5.0);
        assert_eq!(interpolate(&v, 2.0, 2.0), 20.0);
        assert_eq!(interpolate(&v, 9.0, 2.0), 20.0);
        assert_eq!(interpolate(&[], 1.0, 2.0), 0.0);
    }

    #[test]
    fn sphere_scale_tracks_radius() {
        // radius == bound spans the cube: 1.0 in object space, 2x the 0.5 mesh
        assert!((cursor_sphere_scale(10.0, 10.0) - 1.0).abs() < 1e-6);
        assert_eq!(cursor_sphere_scale(0.0, 10.0), CURSOR_SPHERE_MIN_SCALE);

        let mut cursor = CursorState::default();
        assert_eq!(cursor.sphere_scale(10.0), None);
        cursor.radius = 5.0;
        cursor.active = true;
        assert!((cursor.sphere_scale(10.0).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn legend_focus_dims_others() {
        let focus = Some(Series::Probability);
        assert_eq!(series_color(Series::Probability, focus), SERIES_ACCENT_COLOR);
        assert_eq!(series_color(Series::Radial, focus), SERIES_DIMMED_COLOR);
        assert_eq!(series_color(Series::Cumulative, None), SERIES_CUMULATIVE_COLOR);
    }

    #[test]
    fn plot_has_markers_only_while_hovered() {
        let curves = compute_curves(3, 1, 30.0, 120);
        let layout = PlotLayout::new(300.0, 160.0);
        let mut cursor = CursorState::default();
        let idle = build_plot(&curves, &cursor, &layout);
        assert_eq!(idle.polylines.len(), 3);
        assert!(idle.markers.is_empty() && idle.cursor_line.is_none());

        cursor.hover(&layout, 150.0, curves.r_max);
        let hovered = build_plot(&curves, &cursor, &layout);
        assert_eq!(hovered.markers.len(), 3);
        for m in &hovered.markers {
            assert!(layout.contains(m.position[0], m.position[1]));
        }
    }

    #[test]
    fn cursor_clamps_into_new_range() {
        let mut cursor = CursorState { radius: 80.0, active: true, active_legend: None };
        cursor.clamp_to(40.0);
        assert_eq!(cursor.radius, 40.0);
    }

    #[test]
    fn legend_cycle_wraps() {
        let mut s = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            s = Series::cycle(s);
            seen.push(s);
        }
        assert_eq!(seen, vec![Some(Series::Radial), Some(Series::Probability), Some(Series::Cumulative), None]);
        assert_eq!(Series::from_key("probability"), Some(Series::Probability));
    }
}
