//! Radial plot drawn as a GPU overlay in the bottom-right corner.

use crate::constants::{
    PLOT_BACKGROUND, PLOT_BASELINE_COLOR, PLOT_MARKER_HALF_PX, PLOT_PANEL_HEIGHT_FRAC,
    PLOT_PANEL_MARGIN_PX, PLOT_PANEL_WIDTH_FRAC,
};
use orbital_core::{LineVertex, PlotGeometry, PlotLayout};

/// Panel rectangle in window pixels (origin top-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPanel {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    window: (f32, f32),
}

impl PlotPanel {
    pub fn for_window(width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let pw = (w * PLOT_PANEL_WIDTH_FRAC).max(1.0);
        let ph = (h * PLOT_PANEL_HEIGHT_FRAC).max(1.0);
        Self {
            x: (w - pw - PLOT_PANEL_MARGIN_PX).max(0.0),
            y: (h - ph - PLOT_PANEL_MARGIN_PX).max(0.0),
            width: pw,
            height: ph,
            window: (w, h),
        }
    }

    pub fn layout(&self) -> PlotLayout {
        PlotLayout::new(self.width, self.height)
    }

    /// Window pixel position to panel-local pixels, if inside the panel.
    pub fn local(&self, wx: f32, wy: f32) -> Option<(f32, f32)> {
        let (lx, ly) = (wx - self.x, wy - self.y);
        self.layout().contains(lx, ly).then_some((lx, ly))
    }

    fn to_ndc(&self, p: [f32; 2]) -> [f32; 3] {
        let wx = self.x + p[0];
        let wy = self.y + p[1];
        [
            2.0 * wx / self.window.0 - 1.0,
            1.0 - 2.0 * wy / self.window.1,
            0.0,
        ]
    }

    fn quad(&self, out: &mut Vec<LineVertex>, min: [f32; 2], max: [f32; 2], color: [f32; 4]) {
        let corners = [
            [min[0], min[1]],
            [max[0], min[1]],
            [max[0], max[1]],
            [min[0], max[1]],
        ];
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(LineVertex {
                position: self.to_ndc(corners[i]),
                color,
            });
        }
    }

    fn segment(&self, out: &mut Vec<LineVertex>, a: [f32; 2], b: [f32; 2], color: [f32; 4]) {
        out.push(LineVertex { position: self.to_ndc(a), color });
        out.push(LineVertex { position: self.to_ndc(b), color });
    }
}

/// Clip-space vertex lists for one plot frame.
#[derive(Debug, Default)]
pub struct OverlayMesh {
    pub triangles: Vec<LineVertex>,
    pub lines: Vec<LineVertex>,
}

pub fn build_overlay(panel: &PlotPanel, plot: &PlotGeometry) -> OverlayMesh {
    let mut mesh = OverlayMesh::default();
    panel.quad(&mut mesh.triangles, [0.0, 0.0], [panel.width, panel.height], PLOT_BACKGROUND);

    if let Some([a, b]) = plot.baseline {
        panel.segment(&mut mesh.lines, a, b, PLOT_BASELINE_COLOR);
    }
    for line in &plot.polylines {
        for pair in line.points.windows(2) {
            panel.segment(&mut mesh.lines, pair[0], pair[1], line.color);
        }
    }
    if let Some([a, b]) = plot.cursor_line {
        panel.segment(&mut mesh.lines, a, b, plot.cursor_color);
    }
    let h = PLOT_MARKER_HALF_PX;
    for marker in &plot.markers {
        let [x, y] = marker.position;
        panel.quad(&mut mesh.triangles, [x - h, y - h], [x + h, y + h], marker.color);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbital_core::{build_plot, compute_curves, CursorState};

    #[test]
    fn panel_sits_in_bottom_right() {
        let p = PlotPanel::for_window(1000, 500);
        assert!(p.x > 500.0 && p.y > 250.0);
        assert!(p.x + p.width <= 1000.0 && p.y + p.height <= 500.0);
        assert!(p.local(p.x + 1.0, p.y + 1.0).is_some());
        assert!(p.local(10.0, 10.0).is_none());
    }

    #[test]
    fn overlay_stays_in_clip_space() {
        let panel = PlotPanel::for_window(800, 600);
        let curves = compute_curves(3, 0, 23.8, 100);
        let mut cursor = CursorState::default();
        cursor.hover(&panel.layout(), panel.width / 2.0, curves.r_max);
        let mesh = build_overlay(&panel, &build_plot(&curves, &cursor, &panel.layout()));
        assert_eq!(mesh.lines.len() % 2, 0);
        assert_eq!(mesh.triangles.len(), 6 * 4);
        for v in mesh.lines.iter().chain(&mesh.triangles) {
            assert!(v.position[0].abs() <= 1.0 + 1e-3 && v.position[1].abs() <= 1.0 + 1e-3);
        }
    }
}
