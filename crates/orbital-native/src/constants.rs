// Native frontend tuning: key step sizes, plot panel placement, colors.

pub const WINDOW_TITLE: &str = "Orbital Visualizer";
pub const WINDOW_SIZE: (u32, u32) = (1280, 800);

pub const EXPOSURE_STEP_FACTOR: f32 = 1.15; // E/D multiply/divide
pub const THRESHOLD_STEP: f32 = 0.005; // T/G
pub const SLICE_STEP: f32 = 0.05; // S/X

// Plot panel in the bottom-right corner, as fractions of the window
pub const PLOT_PANEL_WIDTH_FRAC: f32 = 0.36;
pub const PLOT_PANEL_HEIGHT_FRAC: f32 = 0.30;
pub const PLOT_PANEL_MARGIN_PX: f32 = 16.0;
pub const PLOT_MARKER_HALF_PX: f32 = 4.0;
pub const PLOT_BACKGROUND: [f32; 4] = [0.04, 0.04, 0.08, 0.78];
pub const PLOT_BASELINE_COLOR: [f32; 4] = [0.5, 0.5, 0.55, 0.5];

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.01,
    b: 0.025,
    a: 1.0,
};
