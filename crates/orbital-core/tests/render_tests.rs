// End-to-end checks through the CPU raymarcher, which mirrors volume.wgsl.

use orbital_core::colormap::{colormap, glow, magma, shade};
use orbital_core::field::sample;
use orbital_core::raymarch::{march, render_reference, Ray};
use orbital_core::{
    compute_curves, OrbitCamera, QuantumState, RenderParams, RenderParamsPatch, Theme,
};
use glam::Vec3;

fn params(patch: RenderParamsPatch) -> RenderParams {
    let mut p = RenderParams::default();
    p.apply(patch);
    p
}

#[test]
fn ground_state_shows_at_the_centre() {
    let field = sample(&QuantumState::new(1, 0, 0), 32);
    let p = params(RenderParamsPatch {
        threshold: Some(0.0),
        exposure: Some(15.0),
        slice: Some(1.0),
        ..Default::default()
    });
    let camera = OrbitCamera::default().camera();

    let ray = Ray {
        origin: camera.eye,
        dir: (-camera.eye).normalize(),
    };
    assert!(march(&field, &ray, &p, 0.0).w > 0.0);

    let image = render_reference(&field, &p, &camera, 9, 9, 0.0);
    assert!(image[4 * 9 + 4].w > 0.0);
}

#[test]
fn slice_zero_is_fully_transparent() {
    let field = sample(&QuantumState::new(2, 1, 0), 24);
    let p = params(RenderParamsPatch {
        slice: Some(0.0),
        threshold: Some(0.0),
        exposure: Some(50.0),
        ..Default::default()
    });
    assert!((p.cut_z() + 0.6).abs() < 1e-6);
    let camera = OrbitCamera::default().camera();
    let image = render_reference(&field, &p, &camera, 12, 12, 1.3);
    assert!(image.iter().all(|px| px.w == 0.0));
}

#[test]
fn colormap_endpoints() {
    assert_eq!(colormap(0.0, Theme::Glow), Vec3::new(0.05, 0.05, 0.35));
    assert_eq!(colormap(1.0, Theme::Glow), Vec3::new(1.0, 0.97, 0.9));
    assert_eq!(colormap(0.0, Theme::Magma), Vec3::ZERO);
    assert_eq!(colormap(1.0, Theme::Magma), Vec3::ONE);
    for v in [0.0, 0.3, 1.0] {
        assert_eq!(colormap(v, Theme::from_index(9)), colormap(v, Theme::from_index(0)));
    }
}

#[test]
fn charge_flash_splits_palettes_by_sign() {
    // sin(3t) == 0 at t == 0
    for v in [0.1, 0.45, 0.9] {
        assert_eq!(shade(v, 0.4, Theme::Glow, true, 0.0), glow(v));
        assert_eq!(shade(v, -0.4, Theme::Glow, true, 0.0), magma(v));
    }
    // and again at t == π/3, up to rounding of sin(π)
    let t = std::f32::consts::PI / 3.0;
    assert!((shade(0.6, 0.4, Theme::Glow, true, t) - glow(0.6)).abs().max_element() < 1e-5);
    assert!((shade(0.6, -0.4, Theme::Glow, true, t) - magma(0.6)).abs().max_element() < 1e-5);
}

#[test]
fn flash_off_uses_theme() {
    assert_eq!(shade(0.5, -1.0, Theme::Magma, false, 2.0), magma(0.5));
    assert_eq!(shade(0.5, -1.0, Theme::Glow, false, 2.0), glow(0.5));
}

#[test]
fn cumulative_is_monotone_and_normalized() {
    for (n, l) in [(1, 0), (2, 1), (4, 0), (6, 3), (9, 8)] {
        let c = compute_curves(n, l, orbital_core::bound_scale(n), 400);
        assert!(c.cumulative.windows(2).all(|w| w[1] >= w[0]), "n={n} l={l}");
        let last = c.cumulative[c.cumulative.len() - 1];
        assert!((last - 1.0).abs() < 1e-12);
        assert!(c.probability.iter().all(|p| p.is_finite() && *p >= 0.0));
    }
}

#[test]
fn curves_are_idempotent() {
    let a = compute_curves(5, 2, 59.0, 400);
    let b = compute_curves(5, 2, 59.0, 400);
    assert_eq!(a, b);
}
