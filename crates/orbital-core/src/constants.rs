// Shared physics/visual tuning constants used by both web and native frontends.

// Quantum number ranges exposed to hosts
pub const N_MIN: i32 = 1;
pub const N_MAX: i32 = 16;
pub const INITIAL_QUANTUM: (i32, i32, i32) = (4, 1, 0); // (n, l, m) at startup

// Sampling
pub const FIELD_RESOLUTION: u32 = 192; // voxels per cube edge
pub const CURVE_SAMPLES: usize = 400; // radial plot samples
pub const BOUND_SCALE_BASE: f64 = 4.0;
pub const BOUND_SCALE_PER_N2: f64 = 2.2;

// Raymarch
pub const MIN_RAY_STEPS: u32 = 128;
pub const MAX_RAY_STEPS: u32 = 256;
pub const SLICE_SPAN: f32 = 1.2; // slice 0..1 maps to cut plane z in [-0.6, 0.6]
pub const SLICE_OFFSET: f32 = 0.6;
pub const EDGE_FADE_WIDTH: f32 = 0.08; // object-space distance to a cube face
pub const ALPHA_PER_SAMPLE: f32 = 0.5; // alpha = v * this
pub const EARLY_OUT_ALPHA: f32 = 0.99;
pub const FLASH_RATE: f32 = 3.0; // rad/s fed into sin() for the charge flash

// Default render parameters
pub const DEFAULT_EXPOSURE: f32 = 8.0;
pub const DEFAULT_THRESHOLD: f32 = 0.02;
pub const DEFAULT_SLICE: f32 = 1.0;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 50.0;
pub const CAMERA_START_DISTANCE: f32 = 1.8;
pub const ZOOM_MIN_DISTANCE: f32 = 0.05; // well inside the unit cube
pub const ZOOM_MAX_DISTANCE: f32 = 6.0;
pub const ZOOM_SENSITIVITY: f32 = 0.12; // per wheel notch, multiplicative
pub const ZOOM_SMOOTHING: f32 = 0.15; // fraction of the gap closed per frame
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.008;
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

// Correlation layer
pub const CURSOR_SPHERE_RADIUS: f32 = 0.5; // unit sphere mesh radius in object space
pub const CURSOR_SPHERE_MIN_SCALE: f32 = 1e-3;
pub const CURSOR_SPHERE_SEGMENTS: u32 = 24;

pub const SERIES_RADIAL_COLOR: [f32; 4] = [0.35, 0.75, 1.0, 1.0];
pub const SERIES_PROBABILITY_COLOR: [f32; 4] = [1.0, 0.55, 0.2, 1.0];
pub const SERIES_CUMULATIVE_COLOR: [f32; 4] = [0.55, 0.95, 0.5, 1.0];
pub const SERIES_ACCENT_COLOR: [f32; 4] = [1.0, 0.92, 0.3, 1.0];
pub const SERIES_DIMMED_COLOR: [f32; 4] = [0.45, 0.45, 0.48, 0.8];
pub const CURSOR_LINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
pub const CURSOR_SPHERE_COLOR: [f32; 4] = [0.9, 0.95, 1.0, 0.55];
