//! Value types describing what to draw.
//!
//! These types intentionally avoid referencing platform-specific APIs and are
//! suitable for use on both native and web targets. `QuantumState` decides
//! which orbital is sampled; `RenderParams` is the live, per-frame shader
//! input. The two never share storage so that a slider drag does not touch
//! the sampling pipeline.

use crate::constants::{
    CURVE_SAMPLES, DEFAULT_EXPOSURE, DEFAULT_SLICE, DEFAULT_THRESHOLD, FIELD_RESOLUTION,
    INITIAL_QUANTUM, N_MAX, N_MIN,
};

/// Quantum numbers `(n, l, m)` with `1 <= n <= N_MAX`, `0 <= l < n`, `|m| <= l`.
///
/// Every constructor and setter clamps, so an out-of-range value can never be
/// observed. Setters consume and return the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuantumState {
    n: i32,
    l: i32,
    m: i32,
}

impl Default for QuantumState {
    fn default() -> Self {
        let (n, l, m) = INITIAL_QUANTUM;
        Self::new(n, l, m)
    }
}

impl QuantumState {
    pub fn new(n: i32, l: i32, m: i32) -> Self {
        let n = n.clamp(N_MIN, N_MAX);
        let l = l.clamp(0, n - 1);
        let m = m.clamp(-l, l);
        Self { n, l, m }
    }

    pub fn n(&self) -> i32 {
        self.n
    }

    pub fn l(&self) -> i32 {
        self.l
    }

    pub fn m(&self) -> i32 {
        self.m
    }

    /// Lowering `n` drags `l` and `m` down with it.
    #[must_use]
    pub fn with_n(self, n: i32) -> Self {
        Self::new(n, self.l, self.m)
    }

    #[must_use]
    pub fn with_l(self, l: i32) -> Self {
        Self::new(self.n, l, self.m)
    }

    #[must_use]
    pub fn with_m(self, m: i32) -> Self {
        Self::new(self.n, self.l, m)
    }

    #[must_use]
    pub fn step_n(self, delta: i32) -> Self {
        self.with_n(self.n + delta)
    }

    #[must_use]
    pub fn step_l(self, delta: i32) -> Self {
        self.with_l(self.l + delta)
    }

    #[must_use]
    pub fn step_m(self, delta: i32) -> Self {
        self.with_m(self.m + delta)
    }

    /// True when the radial curves of `other` equal ours (same `n` and `l`).
    pub fn same_radial(&self, other: &Self) -> bool {
        self.n == other.n && self.l == other.l
    }
}

/// Colormap selection for the transfer function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Glow,
    Magma,
}

impl Theme {
    /// Host selector index: `1` is Magma, anything else falls back to Glow.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Self::Magma,
            _ => Self::Glow,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Self::Glow => 0,
            Self::Magma => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    pub exposure: f32,
    pub threshold: f32,
    pub slice: f32,
    pub theme: Theme,
    pub charge_flash: bool,
    pub steps: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            exposure: DEFAULT_EXPOSURE,
            threshold: DEFAULT_THRESHOLD,
            slice: DEFAULT_SLICE,
            theme: Theme::Glow,
            charge_flash: false,
            steps: crate::raymarch::steps_for_resolution(FIELD_RESOLUTION),
        }
    }
}

/// Partial update for [`RenderParams`]; `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderParamsPatch {
    pub exposure: Option<f32>,
    pub threshold: Option<f32>,
    pub slice: Option<f32>,
    pub theme: Option<Theme>,
    pub charge_flash: Option<bool>,
    pub steps: Option<u32>,
}

impl RenderParams {
    pub fn apply(&mut self, patch: RenderParamsPatch) {
        if let Some(v) = patch.exposure {
            self.exposure = v.max(0.0);
        }
        if let Some(v) = patch.threshold {
            self.threshold = v.max(0.0);
        }
        if let Some(v) = patch.slice {
            self.slice = v.clamp(0.0, 1.0);
        }
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(v) = patch.charge_flash {
            self.charge_flash = v;
        }
        if let Some(v) = patch.steps {
            self.steps = v;
        }
    }

    /// Object-space z of the cut plane; samples with `z >= cut_z` are skipped.
    pub fn cut_z(&self) -> f32 {
        self.slice * crate::constants::SLICE_SPAN - crate::constants::SLICE_OFFSET
    }
}

/// Startup configuration shared by the frontends.
#[derive(Clone, Debug)]
pub struct VisualizerConfig {
    pub resolution: u32,
    pub curve_samples: usize,
    pub initial_state: QuantumState,
    pub initial_params: RenderParams,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            resolution: FIELD_RESOLUTION,
            curve_samples: CURVE_SAMPLES,
            initial_state: QuantumState::default(),
            initial_params: RenderParams::default(),
        }
    }
}
