// Host-side tests for the DOM control mapping.
// The web crate is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod controls {
    include!("../src/controls.rs");
}

use controls::*;
use orbital_core::{QuantumState, RenderParams, Theme};

#[test]
fn steppers_respect_quantum_bounds() {
    let s = QuantumState::new(2, 1, 1);
    assert_eq!(Stepper::NUp.apply(s), QuantumState::new(3, 1, 1));
    assert_eq!(Stepper::MUp.apply(s), s);
    assert_eq!(Stepper::LUp.apply(s), s);
    assert_eq!(Stepper::NDown.apply(s), QuantumState::new(1, 0, 0));
    assert_eq!(Stepper::MDown.apply(s).m(), 0);
}

#[test]
fn stepper_ids_are_unique() {
    let mut ids: Vec<_> = Stepper::ALL.iter().map(|s| s.element_id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), Stepper::ALL.len());
}

#[test]
fn slider_values_patch_only_their_field() {
    let mut params = RenderParams::default();
    let patch = Slider::Slice.patch(" 0.25 ").unwrap();
    assert_eq!(patch.exposure, None);
    params.apply(patch);
    assert_eq!(params.slice, 0.25);

    params.apply(Slider::Slice.patch("3.0").unwrap());
    assert_eq!(params.slice, 1.0);

    params.apply(Slider::Exposure.patch("12").unwrap());
    assert_eq!(params.exposure, 12.0);
}

#[test]
fn bad_slider_input_is_ignored() {
    assert!(Slider::Threshold.patch("").is_none());
    assert!(Slider::Threshold.patch("abc").is_none());
    assert!(Slider::Threshold.patch("NaN").is_none());
    assert!(Slider::Exposure.patch("inf").is_none());
}

#[test]
fn theme_select_falls_back_to_glow() {
    assert_eq!(theme_patch("1").theme, Some(Theme::Magma));
    assert_eq!(theme_patch("0").theme, Some(Theme::Glow));
    assert_eq!(theme_patch("7").theme, Some(Theme::Glow));
    assert_eq!(theme_patch("magma").theme, Some(Theme::Glow));
}

#[test]
fn flash_checkbox_maps_directly() {
    assert_eq!(flash_patch(true).charge_flash, Some(true));
    assert_eq!(flash_patch(false).charge_flash, Some(false));
}

#[test]
fn wheel_down_zooms_out() {
    assert_eq!(wheel_notches(100.0, 0), -1.0);
    assert_eq!(wheel_notches(-3.0, 1), 1.0);
    assert_eq!(wheel_notches(2.0, 2), -2.0);
    assert_eq!(wheel_notches(0.0, 0), 0.0);
}

#[test]
fn readouts_follow_state() {
    let r = quantum_readouts(&QuantumState::new(4, 2, -1));
    assert_eq!(r[0], ("n-value", "4".to_string()));
    assert_eq!(r[1], ("l-value", "2".to_string()));
    assert_eq!(r[2], ("m-value", "-1".to_string()));
}

#[test]
fn css_colors_are_clamped() {
    assert_eq!(css_rgba([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1.000)");
    assert_eq!(css_rgba([2.0, -1.0, 0.0, 0.5]), "rgba(255, 0, 0, 0.500)");
}
