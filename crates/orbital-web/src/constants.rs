// Page wiring and timing for the web front-end

pub const VOLUME_CANVAS_ID: &str = "orbital-canvas";
pub const PLOT_CANVAS_ID: &str = "plot-canvas";

pub const LABEL_ID: &str = "orbital-label";
pub const LOADING_ID: &str = "loading-indicator";
pub const LEGEND_SELECTOR: &str = "[data-series]";

// Delay before a resample starts so the loading indicator gets painted first
pub const LOADING_PAINT_DELAY_MS: i32 = 20;

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.015,
    g: 0.015,
    b: 0.025,
    a: 1.0,
};

pub const PLOT_BACKGROUND: &str = "rgba(10, 10, 18, 0.85)";
pub const PLOT_BASELINE_COLOR: &str = "rgba(255, 255, 255, 0.25)";
pub const PLOT_LINE_WIDTH_CSS: f64 = 1.5;
pub const PLOT_MARKER_RADIUS_CSS: f64 = 3.0;
pub const PLOT_FONT: &str = "11px sans-serif";
