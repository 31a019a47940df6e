use crate::constants::{
    PLOT_BACKGROUND, PLOT_BASELINE_COLOR, PLOT_FONT, PLOT_LINE_WIDTH_CSS, PLOT_MARKER_RADIUS_CSS,
};
use crate::controls::css_rgba;
use orbital_core::{PlotGeometry, PlotLayout};
use web_sys as web;

/// The correlation plot on its own 2D canvas. Drawing happens in CSS pixels;
/// the context is scaled by the device pixel ratio each frame.
pub struct PlotCanvas {
    pub canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl PlotCanvas {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn layout(&self) -> PlotLayout {
        let rect = self.canvas.get_bounding_client_rect();
        PlotLayout::new(rect.width() as f32, rect.height() as f32)
    }

    pub fn draw(&self, layout: &PlotLayout, geom: Option<&PlotGeometry>, dpr: f64) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        let (w, h) = (layout.width as f64, layout.height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(PLOT_BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);
        let Some(geom) = geom else {
            return;
        };

        if let Some([a, b]) = geom.baseline {
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str(PLOT_BASELINE_COLOR);
            self.segment(a, b);
        }

        ctx.set_line_width(PLOT_LINE_WIDTH_CSS);
        for line in &geom.polylines {
            let mut points = line.points.iter();
            let Some(first) = points.next() else {
                continue;
            };
            ctx.set_stroke_style_str(&css_rgba(line.color));
            ctx.begin_path();
            ctx.move_to(first[0] as f64, first[1] as f64);
            for p in points {
                ctx.line_to(p[0] as f64, p[1] as f64);
            }
            ctx.stroke();
        }

        if let Some([a, b]) = geom.cursor_line {
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str(&css_rgba(geom.cursor_color));
            self.segment(a, b);
        }

        ctx.set_font(PLOT_FONT);
        for marker in &geom.markers {
            let [x, y] = marker.position;
            ctx.set_fill_style_str(&css_rgba(marker.color));
            ctx.begin_path();
            let _ = ctx.arc(
                x as f64,
                y as f64,
                PLOT_MARKER_RADIUS_CSS,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
            let _ = ctx.fill_text(
                &format!("{:.3}", marker.value),
                x as f64 + PLOT_MARKER_RADIUS_CSS + 2.0,
                y as f64 - 2.0,
            );
        }
    }

    fn segment(&self, a: [f32; 2], b: [f32; 2]) {
        self.ctx.begin_path();
        self.ctx.move_to(a[0] as f64, a[1] as f64);
        self.ctx.line_to(b[0] as f64, b[1] as f64);
        self.ctx.stroke();
    }
}
