//! Dense voxel sampling of the wavefunction.

use crate::state::QuantumState;
use crate::wavefunction::{amplitude, bound_scale};
use glam::Vec3;

/// Peak-normalized signed amplitude on an `R³` grid.
///
/// Storage is x-fastest (`ix + R * (iy + R * iz)`), matching a 3D texture
/// upload of `R` layers of `R` rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    resolution: u32,
    bound_scale: f64,
    peak: f64,
    data: Vec<f32>,
}

impl ScalarField {
    /// An all-zero field; renders as a fully transparent frame.
    pub fn empty(resolution: u32, bound_scale: f64) -> Self {
        let r = resolution as usize;
        Self {
            resolution,
            bound_scale,
            peak: 0.0,
            data: vec![0.0; r * r * r],
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Physical half-extent of the cube, in Bohr radii.
    pub fn bound_scale(&self) -> f64 {
        self.bound_scale
    }

    /// Max |value| before normalization.
    pub fn peak(&self) -> f64 {
        self.peak
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn index(&self, ix: u32, iy: u32, iz: u32) -> usize {
        let r = self.resolution as usize;
        ix as usize + r * (iy as usize + r * iz as usize)
    }

    #[inline]
    pub fn get(&self, ix: u32, iy: u32, iz: u32) -> f32 {
        self.data[self.index(ix, iy, iz)]
    }

    /// Trilinear fetch at normalized texture coordinates `uvw ∈ [0,1]³`,
    /// texel centres at `(i + 0.5) / R`, clamped at the borders.
    pub fn sample_trilinear(&self, uvw: Vec3) -> f32 {
        if self.resolution == 0 {
            return 0.0;
        }
        let dims = self.resolution as f32;
        let max_i = self.resolution - 1;
        let p = (uvw * dims - Vec3::splat(0.5)).clamp(Vec3::ZERO, Vec3::splat(max_i as f32));
        let base = p.floor();
        let f = p - base;
        let x0 = base.x as u32;
        let y0 = base.y as u32;
        let z0 = base.z as u32;
        let x1 = (x0 + 1).min(max_i);
        let y1 = (y0 + 1).min(max_i);
        let z1 = (z0 + 1).min(max_i);

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let c00 = lerp(self.get(x0, y0, z0), self.get(x1, y0, z0), f.x);
        let c10 = lerp(self.get(x0, y1, z0), self.get(x1, y1, z0), f.x);
        let c01 = lerp(self.get(x0, y0, z1), self.get(x1, y0, z1), f.x);
        let c11 = lerp(self.get(x0, y1, z1), self.get(x1, y1, z1), f.x);
        let c0 = lerp(c00, c10, f.y);
        let c1 = lerp(c01, c11, f.y);
        lerp(c0, c1, f.z)
    }
}

/// Physical coordinate of voxel index `i` along one axis.
#[inline]
pub fn voxel_coord(i: u32, resolution: u32, bound_scale: f64) -> f64 {
    ((i as f64 / resolution as f64) - 0.5) * 2.0 * bound_scale
}

/// Evaluate `eval` on an `R³` grid spanning `[-bound, bound]³` and divide by
/// the peak magnitude found in the same pass.
///
/// Non-finite values are stored as `0.0`. When the peak is `0` the field is
/// left all-zero instead of dividing.
pub fn sample_grid<F>(resolution: u32, bound_scale: f64, eval: F) -> ScalarField
where
    F: Fn(f64, f64, f64) -> f64,
{
    let r = resolution as usize;
    let mut data = Vec::with_capacity(r * r * r);
    let coords: Vec<f64> = (0..resolution)
        .map(|i| voxel_coord(i, resolution, bound_scale))
        .collect();

    let mut peak = 0.0f32;
    for &z in &coords {
        for &y in &coords {
            for &x in &coords {
                let v = eval(x, y, z) as f32;
                let v = if v.is_finite() { v } else { 0.0 };
                peak = peak.max(v.abs());
                data.push(v);
            }
        }
    }

    if peak > 0.0 {
        for v in data.iter_mut() {
            *v /= peak;
        }
    }

    ScalarField {
        resolution,
        bound_scale,
        peak: peak as f64,
        data,
    }
}

/// Sample the orbital for `state`, framed by [`bound_scale`] of its `n`.
///
/// Never fails: an out-of-domain state produces an all-zero field.
pub fn sample(state: &QuantumState, resolution: u32) -> ScalarField {
    let (n, l, m) = (state.n(), state.l(), state.m());
    let field = sample_grid(resolution, bound_scale(n), |x, y, z| amplitude(n, l, m, x, y, z));
    log::debug!(
        "sampled n={} l={} m={} at {}³, bound={:.2}, peak={:.4e}",
        n,
        l,
        m,
        resolution,
        field.bound_scale,
        field.peak
    );
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_spans_symmetric_cube() {
        let b = 10.0;
        assert_eq!(voxel_coord(0, 8, b), -10.0);
        assert_eq!(voxel_coord(4, 8, b), 0.0);
        assert!((voxel_coord(7, 8, b) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn layout_is_x_fastest() {
        let f = ScalarField::empty(4, 1.0);
        assert_eq!(f.index(1, 0, 0), 1);
        assert_eq!(f.index(0, 1, 0), 4);
        assert_eq!(f.index(0, 0, 1), 16);
        assert_eq!(f.data().len(), 64);
    }

    #[test]
    fn trilinear_hits_texel_centres() {
        let mut f = ScalarField::empty(2, 1.0);
        let i = f.index(1, 1, 1);
        f.data[i] = 1.0;
        // centre of texel (1,1,1) is at 0.75 on every axis
        assert!((f.sample_trilinear(Vec3::splat(0.75)) - 1.0).abs() < 1e-6);
        assert!((f.sample_trilinear(Vec3::splat(0.25))).abs() < 1e-6);
        // halfway between the two texel centres on every axis
        assert!((f.sample_trilinear(Vec3::splat(0.5)) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn zero_peak_leaves_field_zero() {
        let f = sample_grid(6, 2.0, |_, _, _| 0.0);
        assert_eq!(f.peak(), 0.0);
        assert!(f.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn non_finite_samples_are_zeroed() {
        let f = sample_grid(4, 1.0, |x, _, _| if x < 0.0 { f64::NAN } else { 2.0 });
        assert!(f.data().iter().all(|v| v.is_finite()));
        assert_eq!(f.peak(), 2.0);
    }

    #[test]
    fn bound_scale_travels_with_field() {
        let s = QuantumState::new(3, 1, 0);
        let f = sample(&s, 8);
        assert_eq!(f.bound_scale(), bound_scale(3));
    }
}
