//! CPU mirror of the raymarch pass in `volume.wgsl`.
//!
//! Object space is the unit cube `[-0.5, 0.5]³` with identity model matrix,
//! so world and object coordinates coincide. Texture coordinates are
//! `p + 0.5`.

use crate::camera::Camera;
use crate::colormap::{shade, smoothstep};
use crate::constants::{
    ALPHA_PER_SAMPLE, EARLY_OUT_ALPHA, EDGE_FADE_WIDTH, MAX_RAY_STEPS, MIN_RAY_STEPS,
};
use crate::field::ScalarField;
use crate::state::RenderParams;
use glam::{Vec3, Vec4};

/// Raymarch step count for a given field resolution.
#[inline]
pub fn steps_for_resolution(resolution: u32) -> u32 {
    resolution.clamp(MIN_RAY_STEPS, MAX_RAY_STEPS)
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Slab test against the unit cube. Returns `(entry, exit)` with the entry
/// clamped to `0` when the origin is inside.
pub fn intersect_unit_cube(ray: &Ray) -> Option<(f32, f32)> {
    let inv = ray.dir.recip();
    let t0 = (Vec3::splat(-0.5) - ray.origin) * inv;
    let t1 = (Vec3::splat(0.5) - ray.origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near > t_far || t_far < 0.0 || !t_near.is_finite() || !t_far.is_finite() {
        return None;
    }
    Some((t_near.max(0.0), t_far))
}

/// Attenuation toward the cube faces, `0` on a face and `1` from
/// `EDGE_FADE_WIDTH` inward.
#[inline]
pub fn edge_fade(p: Vec3) -> f32 {
    let to_face = (Vec3::splat(0.5) - p.abs()).min_element();
    smoothstep(0.0, EDGE_FADE_WIDTH, to_face)
}

/// March one ray and return premultiplied RGBA.
pub fn march(field: &ScalarField, ray: &Ray, params: &RenderParams, time: f32) -> Vec4 {
    let Some((t_enter, t_exit)) = intersect_unit_cube(ray) else {
        return Vec4::ZERO;
    };
    let steps = params.steps.max(1);
    let dt = (t_exit - t_enter) / steps as f32;
    let cut_z = params.cut_z();
    let mut acc = Vec4::ZERO;

    for i in 0..steps {
        let t = t_enter + (i as f32 + 0.5) * dt;
        let p = ray.origin + ray.dir * t;
        if p.z >= cut_z {
            continue;
        }
        let d = field.sample_trilinear(p + Vec3::splat(0.5));
        let density = d * d * edge_fade(p);
        if density <= params.threshold {
            continue;
        }
        let v = (density * params.exposure).clamp(0.0, 1.0);
        let rgb = shade(v, d, params.theme, params.charge_flash, time);
        let a = v * ALPHA_PER_SAMPLE;
        let src = (rgb * a).extend(a);
        acc += src * (1.0 - acc.w);
        if acc.w > EARLY_OUT_ALPHA {
            break;
        }
    }
    acc
}

/// World-space ray through the centre of pixel `(px, py)`.
pub fn pixel_ray(camera: &Camera, px: u32, py: u32, width: u32, height: u32) -> Ray {
    let ndc_x = 2.0 * (px as f32 + 0.5) / width.max(1) as f32 - 1.0;
    let ndc_y = 1.0 - 2.0 * (py as f32 + 0.5) / height.max(1) as f32;
    let inv = camera.view_proj().inverse();
    let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let far = far.truncate() / far.w;
    Ray {
        origin: camera.eye,
        dir: (far - camera.eye).normalize(),
    }
}

/// Render a whole frame on the CPU, row-major, premultiplied RGBA.
pub fn render_reference(
    field: &ScalarField,
    params: &RenderParams,
    camera: &Camera,
    width: u32,
    height: u32,
    time: f32,
) -> Vec<Vec4> {
    let mut out = Vec::with_capacity((width * height) as usize);
    for py in 0..height {
        for px in 0..width {
            let ray = pixel_ray(camera, px, py, width, height);
            out.push(march(field, &ray, params, time));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_resolution_within_bounds() {
        assert_eq!(steps_for_resolution(32), 128);
        assert_eq!(steps_for_resolution(192), 192);
        assert_eq!(steps_for_resolution(512), 256);
    }

    #[test]
    fn slab_test_hits_and_misses() {
        let hit = Ray { origin: Vec3::new(0.0, 0.0, 2.0), dir: Vec3::NEG_Z };
        let (a, b) = intersect_unit_cube(&hit).unwrap();
        assert!((a - 1.5).abs() < 1e-6 && (b - 2.5).abs() < 1e-6);

        let miss = Ray { origin: Vec3::new(2.0, 0.0, 2.0), dir: Vec3::NEG_Z };
        assert!(intersect_unit_cube(&miss).is_none());

        let behind = Ray { origin: Vec3::new(0.0, 0.0, 2.0), dir: Vec3::Z };
        assert!(intersect_unit_cube(&behind).is_none());
    }

    #[test]
    fn entry_clamps_to_zero_inside_cube() {
        let inside = Ray { origin: Vec3::ZERO, dir: Vec3::X };
        let (a, b) = intersect_unit_cube(&inside).unwrap();
        assert_eq!(a, 0.0);
        assert!((b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn edge_fade_vanishes_on_faces() {
        assert_eq!(edge_fade(Vec3::new(0.5, 0.0, 0.0)), 0.0);
        assert_eq!(edge_fade(Vec3::ZERO), 1.0);
    }

    #[test]
    fn empty_field_is_transparent() {
        let field = ScalarField::empty(16, 1.0);
        let ray = Ray { origin: Vec3::new(0.0, 0.0, 2.0), dir: Vec3::NEG_Z };
        let params = RenderParams { threshold: 0.0, ..Default::default() };
        assert_eq!(march(&field, &ray, &params, 0.0), Vec4::ZERO);
    }
}
