//! Hydrogenic wavefunction evaluation.
//!
//! Everything here is pure and infallible: out-of-domain quantum numbers
//! evaluate to `0.0` instead of erroring, so a caller that forgot to clamp
//! gets a blank field rather than a crash. Distances are in Bohr radii.

use crate::constants::{BOUND_SCALE_BASE, BOUND_SCALE_PER_N2};

/// Half-extent of the cubic sampling domain for principal number `n`.
///
/// The sampler, the radial plot and the cursor sphere must all agree on this
/// value, so it is only ever computed here.
#[inline]
pub fn bound_scale(n: i32) -> f64 {
    let n = n as f64;
    BOUND_SCALE_BASE + BOUND_SCALE_PER_N2 * n * n
}

fn factorial(k: i32) -> f64 {
    (2..=k.max(0)).fold(1.0, |acc, i| acc * i as f64)
}

/// Double factorial `k!! = k (k-2) (k-4) ...`, with `(-1)!! = 0!! = 1`.
fn double_factorial(k: i32) -> f64 {
    let mut acc = 1.0;
    let mut i = k;
    while i > 1 {
        acc *= i as f64;
        i -= 2;
    }
    acc
}

/// Generalized Laguerre polynomial `L_p^α(x)`.
pub fn assoc_laguerre(p: i32, alpha: f64, x: f64) -> f64 {
    if p <= 0 {
        return 1.0;
    }
    let mut prev = 1.0;
    let mut cur = 1.0 + alpha - x;
    for k in 2..=p {
        let k = k as f64;
        let next = ((2.0 * k - 1.0 + alpha - x) * cur - (k - 1.0 + alpha) * prev) / k;
        prev = cur;
        cur = next;
    }
    cur
}

/// Associated Legendre function `P_l^m(x)` including the Condon-Shortley phase.
pub fn assoc_legendre(l: i32, m: i32, x: f64) -> f64 {
    if m < 0 || m > l {
        return 0.0;
    }
    let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
    let pmm = sign * double_factorial(2 * m - 1) * (1.0 - x * x).max(0.0).powf(m as f64 / 2.0);
    if l == m {
        return pmm;
    }
    let pmm1 = x * (2 * m + 1) as f64 * pmm;
    if l == m + 1 {
        return pmm1;
    }
    let (mut lo, mut hi) = (pmm, pmm1);
    for ll in (m + 2)..=l {
        let next = ((2 * ll - 1) as f64 * x * hi - (ll + m - 1) as f64 * lo) / (ll - m) as f64;
        lo = hi;
        hi = next;
    }
    hi
}

/// Radial part `R(n, l, r)`.
pub fn radial_part(n: i32, l: i32, r: f64) -> f64 {
    if n < 1 || l < 0 || l >= n {
        return 0.0;
    }
    let p = n - l - 1;
    if p < 0 {
        return 0.0;
    }
    let nf = n as f64;
    let rho = 2.0 * r / nf;
    let norm = (2.0 / nf).powi(2) * (factorial(p) / factorial(n + l)).sqrt();
    norm * (-r / nf).exp() * rho.powi(l) * assoc_laguerre(p, (2 * l + 1) as f64, rho)
}

/// Real angular shapes.
///
/// The sixteen hard-coded `(l, m)` pairs for `l <= 3` are the chemistry-style
/// real combinations. Everything above falls back to an unnormalized
/// Legendre shape, which only carries the `cos(|m| φ)` branch: negative `m`
/// at `l >= 4` is drawn the same as positive `m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngularShape {
    S,
    Pz,
    Px,
    Py,
    Dz2,
    Dxz,
    Dyz,
    Dx2y2,
    Dxy,
    Fz3,
    Fxz2,
    Fyz2,
    Fzx2y2,
    Fxyz,
    Fxx2y2,
    Fy3x2y2,
    Legendre { l: i32, m: i32 },
}

impl AngularShape {
    /// Shape for `(l, m)`, or `None` when `l < 0` or `|m| > l`.
    pub fn from_lm(l: i32, m: i32) -> Option<Self> {
        if l < 0 || m.abs() > l {
            return None;
        }
        let shape = match (l, m) {
            (0, 0) => Self::S,
            (1, 0) => Self::Pz,
            (1, 1) => Self::Px,
            (1, -1) => Self::Py,
            (2, 0) => Self::Dz2,
            (2, 1) => Self::Dxz,
            (2, -1) => Self::Dyz,
            (2, 2) => Self::Dx2y2,
            (2, -2) => Self::Dxy,
            (3, 0) => Self::Fz3,
            (3, 1) => Self::Fxz2,
            (3, -1) => Self::Fyz2,
            (3, 2) => Self::Fzx2y2,
            (3, -2) => Self::Fxyz,
            (3, 3) => Self::Fxx2y2,
            (3, -3) => Self::Fy3x2y2,
            _ => Self::Legendre { l, m },
        };
        Some(shape)
    }

    /// Conventional real-orbital name, only known for the hard-coded shapes.
    pub fn conventional_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::S => "s",
            Self::Pz => "pz",
            Self::Px => "px",
            Self::Py => "py",
            Self::Dz2 => "dz²",
            Self::Dxz => "dxz",
            Self::Dyz => "dyz",
            Self::Dx2y2 => "dx²-y²",
            Self::Dxy => "dxy",
            Self::Fz3 => "fz³",
            Self::Fxz2 => "fxz²",
            Self::Fyz2 => "fyz²",
            Self::Fzx2y2 => "fz(x²-y²)",
            Self::Fxyz => "fxyz",
            Self::Fxx2y2 => "fx(x²-3y²)",
            Self::Fy3x2y2 => "fy(3x²-y²)",
            Self::Legendre { .. } => return None,
        };
        Some(name)
    }

    pub fn eval(&self, theta: f64, phi: f64) -> f64 {
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        match *self {
            Self::S => 1.0,
            Self::Pz => ct,
            Self::Px => st * cp,
            Self::Py => st * sp,
            Self::Dz2 => 3.0 * ct * ct - 1.0,
            Self::Dxz => st * ct * cp,
            Self::Dyz => st * ct * sp,
            Self::Dx2y2 => st * st * (2.0 * phi).cos(),
            Self::Dxy => st * st * (2.0 * phi).sin(),
            Self::Fz3 => 5.0 * ct * ct * ct - 3.0 * ct,
            Self::Fxz2 => st * (5.0 * ct * ct - 1.0) * cp,
            Self::Fyz2 => st * (5.0 * ct * ct - 1.0) * sp,
            Self::Fzx2y2 => st * st * ct * (2.0 * phi).cos(),
            Self::Fxyz => st * st * ct * (2.0 * phi).sin(),
            Self::Fxx2y2 => st * st * st * (3.0 * phi).cos(),
            Self::Fy3x2y2 => st * st * st * (3.0 * phi).sin(),
            Self::Legendre { l, m } => {
                let m_abs = m.abs();
                let azimuth = if m == 0 { 1.0 } else { (m_abs as f64 * phi).cos() };
                assoc_legendre(l, m_abs, ct) * azimuth
            }
        }
    }
}

/// Real angular function `Y(l, m, θ, φ)`; `0.0` for invalid `(l, m)`.
pub fn angular_real(l: i32, m: i32, theta: f64, phi: f64) -> f64 {
    AngularShape::from_lm(l, m).map_or(0.0, |shape| shape.eval(theta, phi))
}

/// Signed amplitude `ψ(n, l, m)` at a Cartesian point.
///
/// At the exact origin this returns `R(n, l, 0)²`, the density rather than
/// the amplitude, so `atan2(0, 0)` is never evaluated. The renderer squares
/// field values again, which makes the centre voxel brighter than its
/// neighbours. This is kept as-is.
pub fn amplitude(n: i32, l: i32, m: i32, x: f64, y: f64, z: f64) -> f64 {
    let r = (x * x + y * y + z * z).sqrt();
    if !r.is_finite() {
        return 0.0;
    }
    if r == 0.0 {
        let r0 = radial_part(n, l, 0.0);
        return r0 * r0;
    }
    let Some(shape) = AngularShape::from_lm(l, m) else {
        return 0.0;
    };
    let theta = (z / r).clamp(-1.0, 1.0).acos();
    let phi = y.atan2(x);
    radial_part(n, l, r) * shape.eval(theta, phi)
}
