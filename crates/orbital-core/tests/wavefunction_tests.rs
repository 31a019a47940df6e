// Host-side property tests for the wavefunction evaluator and the sampler.

use orbital_core::field::{sample, sample_grid};
use orbital_core::{
    amplitude, angular_real, assoc_laguerre, bound_scale, radial_part, QuantumState, N_MAX,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

fn sign_changes(values: impl Iterator<Item = f64>) -> usize {
    let mut last = 0.0f64;
    let mut changes = 0;
    for v in values {
        if v == 0.0 {
            continue;
        }
        if last != 0.0 && v.signum() != last.signum() {
            changes += 1;
        }
        last = v;
    }
    changes
}

#[test]
fn radial_node_count_law() {
    // Inner nodes of high-n states sit close together, hence the fine grid.
    for n in 1..=N_MAX {
        let bound = bound_scale(n);
        let samples = 200_000;
        for l in 0..n {
            let values: Vec<f64> = (1..=samples)
                .map(|i| radial_part(n, l, bound * i as f64 / samples as f64))
                .collect();
            assert!(values.iter().all(|v| v.is_finite()), "n={n} l={l}");
            assert_eq!(
                sign_changes(values.into_iter()),
                (n - l - 1) as usize,
                "n={n} l={l}"
            );
        }
    }
}

#[test]
fn origin_returns_radial_density() {
    for n in 1..=6 {
        for l in 0..n {
            for m in -l..=l {
                let r0 = radial_part(n, l, 0.0);
                assert_eq!(amplitude(n, l, m, 0.0, 0.0, 0.0), r0 * r0);
            }
        }
    }
}

#[test]
fn near_origin_is_the_unsquared_amplitude() {
    // Just off the origin an s state carries R(0) itself, so the origin value
    // is its square rather than its continuation.
    for n in 1..=4 {
        let near = amplitude(n, 0, 0, 0.0, 0.0, 1e-6);
        let origin = amplitude(n, 0, 0, 0.0, 0.0, 0.0);
        assert!((near * near - origin).abs() / origin < 1e-4, "n={n}");
        assert!((near - radial_part(n, 0, 0.0)).abs() / near.abs() < 1e-4);
    }
}

#[test]
fn laguerre_base_cases() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let alpha: f64 = rng.gen_range(0.0..40.0);
        let x: f64 = rng.gen_range(-10.0..80.0);
        assert_eq!(assoc_laguerre(0, alpha, x), 1.0);
        assert_eq!(assoc_laguerre(1, alpha, x), 1.0 + alpha - x);
    }
}

#[test]
fn sampled_field_peaks_at_exactly_one() {
    for state in [
        QuantumState::new(1, 0, 0),
        QuantumState::new(3, 2, 1),
        QuantumState::new(5, 4, -3),
    ] {
        let field = sample(&state, 20);
        assert!(field.peak() > 0.0);
        let max = field.data().iter().fold(0.0f32, |m, v| m.max(v.abs()));
        assert_eq!(max, 1.0);
    }
}

#[test]
fn degenerate_grid_stays_zero() {
    let field = sample_grid(10, 4.0, |_, _, _| 0.0);
    assert!(field.data().iter().all(|&v| v == 0.0));
}

#[test]
fn bound_scale_grows_with_n() {
    for n in 1..16 {
        assert!(bound_scale(n + 1) > bound_scale(n));
    }
}

#[test]
fn ground_state_is_spherically_symmetric() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let x: f64 = rng.gen_range(-6.0..6.0);
        let y: f64 = rng.gen_range(-6.0..6.0);
        let z: f64 = rng.gen_range(-6.0..6.0);
        let r = (x * x + y * y + z * z).sqrt();
        let reference = amplitude(1, 0, 0, r, 0.0, 0.0);
        for (a, b, c) in [(x, y, z), (y, z, x), (z, x, y), (x, z, y), (y, x, z), (z, y, x)] {
            let v = amplitude(1, 0, 0, a, b, c);
            assert!((v - reference).abs() <= 1e-12 * reference.abs());
        }
    }
}

#[test]
fn inversion_parity_follows_l() {
    let mut rng = StdRng::seed_from_u64(3);
    for l in 0..=6 {
        let n = l + 1;
        for m in -l..=l {
            for _ in 0..20 {
                let x: f64 = rng.gen_range(-5.0..5.0);
                let y: f64 = rng.gen_range(-5.0..5.0);
                let z: f64 = rng.gen_range(-5.0..5.0);
                let a = amplitude(n, l, m, x, y, z);
                let b = amplitude(n, l, m, -x, -y, -z);
                let parity = if l % 2 == 0 { 1.0 } else { -1.0 };
                assert!((b - parity * a).abs() <= 1e-9 * (1.0 + a.abs()), "l={l} m={m}");
            }
        }
    }
}

#[test]
fn pz_is_cos_theta_with_nodal_plane() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let theta: f64 = rng.gen_range(0.0..PI);
        let phi: f64 = rng.gen_range(-PI..PI);
        assert_eq!(angular_real(1, 0, theta, phi), theta.cos());
        assert!(angular_real(1, 0, FRAC_PI_2, phi).abs() < 1e-15);
    }
}
