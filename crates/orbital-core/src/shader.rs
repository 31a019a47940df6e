//! WGSL sources. The volume shader takes its tuning constants from the Rust
//! side so the GPU march and the CPU reference in `raymarch.rs` share them.

use crate::colormap::{GLOW_STOPS, MAGMA_EDGES, MAGMA_GOLD, MAGMA_RED};
use crate::constants::{
    ALPHA_PER_SAMPLE, EARLY_OUT_ALPHA, EDGE_FADE_WIDTH, FLASH_RATE, SLICE_OFFSET, SLICE_SPAN,
};
use std::fmt::Write;

static VOLUME_WGSL_BODY: &str = include_str!("../shaders/volume.wgsl");
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

fn vec3_literal(c: [f32; 3]) -> String {
    format!("vec3<f32>({:?}, {:?}, {:?})", c[0], c[1], c[2])
}

/// `const` declarations for every tuning value the volume shader reads.
pub fn volume_constants() -> String {
    let mut out = String::new();
    let scalars = [
        ("SLICE_SPAN", SLICE_SPAN),
        ("SLICE_OFFSET", SLICE_OFFSET),
        ("EDGE_FADE_WIDTH", EDGE_FADE_WIDTH),
        ("ALPHA_PER_SAMPLE", ALPHA_PER_SAMPLE),
        ("EARLY_OUT_ALPHA", EARLY_OUT_ALPHA),
        ("FLASH_RATE", FLASH_RATE),
        ("MAGMA_EDGE_LO", MAGMA_EDGES[0]),
        ("MAGMA_EDGE_HI", MAGMA_EDGES[1]),
    ];
    // Writing into a String cannot fail.
    for (name, v) in scalars {
        let _ = writeln!(out, "const {name}: f32 = {v:?};");
    }
    for (i, (t, c)) in GLOW_STOPS.iter().enumerate() {
        let _ = writeln!(out, "const GLOW_T{i}: f32 = {t:?};");
        let _ = writeln!(out, "const GLOW_C{i}: vec3<f32> = {};", vec3_literal(*c));
    }
    let _ = writeln!(out, "const MAGMA_RED: vec3<f32> = {};", vec3_literal(MAGMA_RED));
    let _ = writeln!(out, "const MAGMA_GOLD: vec3<f32> = {};", vec3_literal(MAGMA_GOLD));
    out
}

/// Complete volume shader: generated constants followed by `volume.wgsl`.
pub fn volume_wgsl() -> String {
    let mut src = volume_constants();
    src.push('\n');
    src.push_str(VOLUME_WGSL_BODY);
    src
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_code() -> String {
        VOLUME_WGSL_BODY
            .lines()
            .map(|line| line.split("//").next().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn constant_names(code: &str) -> Vec<String> {
        let mut names: Vec<String> = code
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .filter(|t| t.len() > 1 && t.starts_with(|c: char| c.is_ascii_uppercase()))
            .filter(|t| t.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        names
    }

    #[test]
    fn every_shader_constant_is_generated() {
        let consts = volume_constants();
        let used = constant_names(&body_code());
        assert!(used.len() >= 14, "{used:?}");
        for name in used {
            assert!(consts.contains(&format!("const {name}:")), "{name} is not generated");
        }
    }

    #[test]
    fn generated_values_track_rust_constants() {
        let consts = volume_constants();
        assert!(consts.contains(&format!("const SLICE_SPAN: f32 = {SLICE_SPAN:?};")));
        assert!(consts.contains(&format!("const EARLY_OUT_ALPHA: f32 = {EARLY_OUT_ALPHA:?};")));
        assert!(consts.contains(&format!("const FLASH_RATE: f32 = {FLASH_RATE:?};")));
        let (t, c) = GLOW_STOPS[2];
        assert!(consts.contains(&format!("const GLOW_T2: f32 = {t:?};")));
        assert!(consts.contains(&format!("const GLOW_C2: vec3<f32> = {};", vec3_literal(c))));
    }

    #[test]
    fn body_has_no_inlined_tuning_values() {
        let code = body_code();
        for literal in ["1.2", "0.6", "0.08", "0.99", "3.0", "0.35", "0.75", "0.97"] {
            assert!(!code.contains(literal), "volume.wgsl inlines {literal}");
        }
    }

    #[test]
    fn float_literals_keep_a_decimal_point() {
        assert_eq!(vec3_literal([1.0, 0.0, 0.25]), "vec3<f32>(1.0, 0.0, 0.25)");
    }
}
