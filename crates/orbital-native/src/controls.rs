//! Keyboard bindings.

use crate::constants::{EXPOSURE_STEP_FACTOR, SLICE_STEP, THRESHOLD_STEP};
use orbital_core::{QuantumState, RenderParams, RenderParamsPatch, Theme};
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    StepN(i32),
    StepL(i32),
    StepM(i32),
    ScaleExposure(f32),
    StepThreshold(f32),
    StepSlice(f32),
    ToggleTheme,
    ToggleFlash,
    CycleLegend,
    Quit,
}

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::ArrowUp => Action::StepN(1),
        KeyCode::ArrowDown => Action::StepN(-1),
        KeyCode::ArrowRight => Action::StepL(1),
        KeyCode::ArrowLeft => Action::StepL(-1),
        KeyCode::BracketRight => Action::StepM(1),
        KeyCode::BracketLeft => Action::StepM(-1),
        KeyCode::KeyE => Action::ScaleExposure(EXPOSURE_STEP_FACTOR),
        KeyCode::KeyD => Action::ScaleExposure(1.0 / EXPOSURE_STEP_FACTOR),
        KeyCode::KeyT => Action::StepThreshold(THRESHOLD_STEP),
        KeyCode::KeyG => Action::StepThreshold(-THRESHOLD_STEP),
        KeyCode::KeyS => Action::StepSlice(SLICE_STEP),
        KeyCode::KeyX => Action::StepSlice(-SLICE_STEP),
        KeyCode::KeyC => Action::ToggleTheme,
        KeyCode::KeyF => Action::ToggleFlash,
        KeyCode::Tab => Action::CycleLegend,
        KeyCode::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// New quantum state for a stepping action, `None` for anything else.
pub fn apply_quantum(action: Action, state: QuantumState) -> Option<QuantumState> {
    match action {
        Action::StepN(d) => Some(state.step_n(d)),
        Action::StepL(d) => Some(state.step_l(d)),
        Action::StepM(d) => Some(state.step_m(d)),
        _ => None,
    }
}

/// Render parameter change for a slider-like action.
pub fn params_patch(action: Action, current: &RenderParams) -> Option<RenderParamsPatch> {
    let patch = match action {
        Action::ScaleExposure(f) => RenderParamsPatch {
            exposure: Some(current.exposure * f),
            ..Default::default()
        },
        Action::StepThreshold(d) => RenderParamsPatch {
            threshold: Some(current.threshold + d),
            ..Default::default()
        },
        Action::StepSlice(d) => RenderParamsPatch {
            slice: Some(current.slice + d),
            ..Default::default()
        },
        Action::ToggleTheme => RenderParamsPatch {
            theme: Some(match current.theme {
                Theme::Glow => Theme::Magma,
                Theme::Magma => Theme::Glow,
            }),
            ..Default::default()
        },
        Action::ToggleFlash => RenderParamsPatch {
            charge_flash: Some(!current.charge_flash),
            ..Default::default()
        },
        _ => return None,
    };
    Some(patch)
}
