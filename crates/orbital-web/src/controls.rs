// Pure mapping from DOM control values to state changes.
// Kept free of web-sys so host tests can include it directly.

use orbital_core::{QuantumState, RenderParamsPatch, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stepper {
    NUp,
    NDown,
    LUp,
    LDown,
    MUp,
    MDown,
}

impl Stepper {
    pub const ALL: [Stepper; 6] = [
        Stepper::NUp,
        Stepper::NDown,
        Stepper::LUp,
        Stepper::LDown,
        Stepper::MUp,
        Stepper::MDown,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            Stepper::NUp => "n-inc",
            Stepper::NDown => "n-dec",
            Stepper::LUp => "l-inc",
            Stepper::LDown => "l-dec",
            Stepper::MUp => "m-inc",
            Stepper::MDown => "m-dec",
        }
    }

    pub fn apply(&self, state: QuantumState) -> QuantumState {
        match self {
            Stepper::NUp => state.step_n(1),
            Stepper::NDown => state.step_n(-1),
            Stepper::LUp => state.step_l(1),
            Stepper::LDown => state.step_l(-1),
            Stepper::MUp => state.step_m(1),
            Stepper::MDown => state.step_m(-1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    Exposure,
    Threshold,
    Slice,
}

impl Slider {
    pub const ALL: [Slider; 3] = [Slider::Exposure, Slider::Threshold, Slider::Slice];

    pub fn element_id(&self) -> &'static str {
        match self {
            Slider::Exposure => "exposure",
            Slider::Threshold => "threshold",
            Slider::Slice => "slice",
        }
    }

    /// Patch for a raw `<input type=range>` value. Unparseable or non-finite
    /// input yields `None` and leaves the renderer untouched.
    pub fn patch(&self, raw: &str) -> Option<RenderParamsPatch> {
        let v = raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())?;
        let mut patch = RenderParamsPatch::default();
        match self {
            Slider::Exposure => patch.exposure = Some(v),
            Slider::Threshold => patch.threshold = Some(v),
            Slider::Slice => patch.slice = Some(v),
        }
        Some(patch)
    }
}

pub const THEME_SELECT_ID: &str = "theme";
pub const FLASH_TOGGLE_ID: &str = "charge-flash";

/// Theme `<select>` value. Anything but `"1"` falls back to Glow.
pub fn theme_patch(raw: &str) -> RenderParamsPatch {
    let index = raw.trim().parse::<i32>().unwrap_or(0);
    RenderParamsPatch {
        theme: Some(Theme::from_index(index)),
        ..Default::default()
    }
}

pub fn flash_patch(checked: bool) -> RenderParamsPatch {
    RenderParamsPatch {
        charge_flash: Some(checked),
        ..Default::default()
    }
}

const WHEEL_PIXELS_PER_NOTCH: f64 = 100.0;
const WHEEL_LINES_PER_NOTCH: f64 = 3.0;

/// Zoom notches for a DOM wheel event; positive zooms in.
/// `delta_mode` follows `WheelEvent.deltaMode` (0 pixels, 1 lines, 2 pages).
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    let notches = match delta_mode {
        0 => delta_y / WHEEL_PIXELS_PER_NOTCH,
        1 => delta_y / WHEEL_LINES_PER_NOTCH,
        _ => delta_y,
    };
    (-notches) as f32
}

/// Text for the `n`, `l` and `m` readouts, keyed by element id.
pub fn quantum_readouts(state: &QuantumState) -> [(&'static str, String); 3] {
    [
        ("n-value", state.n().to_string()),
        ("l-value", state.l().to_string()),
        ("m-value", state.m().to_string()),
    ]
}

/// CSS color for a linear RGBA tuple in `0..=1`.
pub fn css_rgba(c: [f32; 4]) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {:.3})",
        byte(c[0]),
        byte(c[1]),
        byte(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}
