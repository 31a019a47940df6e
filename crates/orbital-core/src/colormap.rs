//! Transfer functions from normalized density to color.
//!
//! These mirror `fn glow`, `fn magma` and `fn shade` in `volume.wgsl`, which
//! receives the stops below as generated constants (see `shader.rs`). The CPU
//! reference raymarcher uses them directly.

use crate::constants::FLASH_RATE;
use crate::state::Theme;
use glam::Vec3;

pub const GLOW_STOPS: [(f32, [f32; 3]); 4] = [
    (0.0, [0.05, 0.05, 0.35]),
    (0.2, [0.55, 0.15, 0.75]),
    (0.5, [1.0, 0.55, 0.1]),
    (1.0, [1.0, 0.97, 0.9]),
];

const MAGMA_BLACK: [f32; 3] = [0.0, 0.0, 0.0];
pub const MAGMA_RED: [f32; 3] = [0.75, 0.15, 0.05];
pub const MAGMA_GOLD: [f32; 3] = [1.0, 0.75, 0.2];
const MAGMA_WHITE: [f32; 3] = [1.0, 1.0, 1.0];
/// Where the red-to-gold and gold-to-white blends begin.
pub const MAGMA_EDGES: [f32; 2] = [0.4, 0.8];

#[inline]
fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Piecewise linear deep blue → purple → orange → near-white.
pub fn glow(v: f32) -> Vec3 {
    let v = v.clamp(0.0, 1.0);
    for pair in GLOW_STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if v <= t1 {
            return mix(Vec3::from(c0), Vec3::from(c1), (v - t0) / (t1 - t0));
        }
    }
    Vec3::from(GLOW_STOPS[GLOW_STOPS.len() - 1].1)
}

/// Smoothstep-blended black → red-orange → gold → white.
pub fn magma(v: f32) -> Vec3 {
    let v = v.clamp(0.0, 1.0);
    let [lo, hi] = MAGMA_EDGES;
    let mut c = mix(Vec3::from(MAGMA_BLACK), Vec3::from(MAGMA_RED), smoothstep(0.0, lo, v));
    c = mix(c, Vec3::from(MAGMA_GOLD), smoothstep(lo, hi, v));
    mix(c, Vec3::from(MAGMA_WHITE), smoothstep(hi, 1.0, v))
}

pub fn colormap(v: f32, theme: Theme) -> Vec3 {
    match theme {
        Theme::Glow => glow(v),
        Theme::Magma => magma(v),
    }
}

/// Flash oscillator in `[0, 1]` at wall-clock time `t` seconds.
#[inline]
pub fn flash_phase(time: f32) -> f32 {
    0.5 + 0.5 * (FLASH_RATE * time).sin()
}

/// Weight of the Magma palette for a sample of sign `d` at `phase`.
///
/// The two signs are always complementary, so opposite lobes pulse out of
/// phase. At `phase == 0.5` positive lobes are pure Glow and negative lobes
/// pure Magma.
#[inline]
pub fn flash_weight(phase: f32, d: f32) -> f32 {
    let swing = (2.0 * phase - 1.0).abs();
    if d >= 0.0 {
        swing
    } else {
        1.0 - swing
    }
}

/// Color of one sample with signed amplitude `d` and mapped value `v`.
pub fn shade(v: f32, d: f32, theme: Theme, charge_flash: bool, time: f32) -> Vec3 {
    if charge_flash {
        let w = flash_weight(flash_phase(time), d);
        mix(glow(v), magma(v), w)
    } else {
        colormap(v, theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_hits_every_stop() {
        for (t, c) in GLOW_STOPS {
            assert!((glow(t) - Vec3::from(c)).abs().max_element() < 1e-6, "stop {t}");
        }
    }

    #[test]
    fn magma_is_monotonic_in_brightness() {
        let mut last = -1.0;
        for i in 0..=100 {
            let c = magma(i as f32 / 100.0);
            let lum = c.x + c.y + c.z;
            assert!(lum >= last - 1e-6);
            last = lum;
        }
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(glow(-3.0), glow(0.0));
        assert_eq!(magma(7.0), magma(1.0));
    }

    #[test]
    fn flash_weights_are_complementary() {
        for i in 0..=10 {
            let phase = i as f32 / 10.0;
            let sum = flash_weight(phase, 0.3) + flash_weight(phase, -0.3);
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }
}
