//! Resample bookkeeping shared by the native worker and the web task.
//!
//! The frontends own the actual execution. This type decides what to
//! compute, tags each request with a generation number and drops results
//! that were superseded while they were in flight (last write wins). The
//! previously accepted field stays on screen until a newer one arrives.

use crate::error::OrbitalError;
use crate::field::{sample, ScalarField};
use crate::radial::{compute_curves, RadialCurveSet};
use crate::state::QuantumState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResampleRequest {
    pub generation: u64,
    pub state: QuantumState,
    pub resolution: u32,
    pub curve_samples: usize,
    /// False when only `m` changed relative to the accepted curves.
    pub curves_needed: bool,
}

#[derive(Clone, Debug)]
pub struct ResampleResult {
    pub generation: u64,
    pub state: QuantumState,
    pub field: ScalarField,
    pub curves: Option<RadialCurveSet>,
}

/// Execute a request. Pure and deterministic; safe to run on any thread.
pub fn run_resample(request: &ResampleRequest) -> ResampleResult {
    let field = sample(&request.state, request.resolution);
    let curves = request.curves_needed.then(|| {
        compute_curves(
            request.state.n(),
            request.state.l(),
            field.bound_scale(),
            request.curve_samples,
        )
    });
    ResampleResult {
        generation: request.generation,
        state: request.state,
        field,
        curves,
    }
}

/// A current result waiting for its upload. Pass it to
/// [`FieldPipeline::commit`] once the volume is on the GPU, or report the
/// upload error through [`FieldPipeline::fail`].
#[derive(Debug)]
pub struct Accepted {
    pub generation: u64,
    pub state: QuantumState,
    pub field: ScalarField,
    pub curves: Option<RadialCurveSet>,
}

#[derive(Debug)]
pub struct FieldPipeline {
    resolution: u32,
    curve_samples: usize,
    desired: QuantumState,
    displayed: Option<QuantumState>,
    latest_generation: u64,
    loading: bool,
    curves: Option<RadialCurveSet>,
    curves_state: Option<QuantumState>,
}

impl FieldPipeline {
    pub fn new(resolution: u32, curve_samples: usize) -> Self {
        Self {
            resolution,
            curve_samples,
            desired: QuantumState::default(),
            displayed: None,
            latest_generation: 0,
            loading: false,
            curves: None,
            curves_state: None,
        }
    }

    /// Ask for `state`. Returns `None` when it is already shown, or already
    /// being computed, so the in-flight result is not superseded by itself.
    pub fn request(&mut self, state: QuantumState) -> Option<ResampleRequest> {
        if self.loading && self.desired == state {
            return None;
        }
        if !self.loading && self.displayed == Some(state) {
            return None;
        }
        self.desired = state;
        self.latest_generation += 1;
        self.loading = true;
        let curves_needed = !self
            .curves_state
            .is_some_and(|shown| shown.same_radial(&state) && self.curves.is_some());
        log::info!(
            "resample #{} requested for ({}, {}, {}){}",
            self.latest_generation,
            state.n(),
            state.l(),
            state.m(),
            if curves_needed { "" } else { ", reusing curves" }
        );
        Some(ResampleRequest {
            generation: self.latest_generation,
            state,
            resolution: self.resolution,
            curve_samples: self.curve_samples,
            curves_needed,
        })
    }

    /// Filter a finished result. Stale generations are dropped; a current one
    /// is handed back for upload without changing what is displayed.
    pub fn accept(&self, result: ResampleResult) -> Option<Accepted> {
        if result.generation != self.latest_generation {
            log::debug!(
                "dropping stale resample #{} (latest #{})",
                result.generation,
                self.latest_generation
            );
            return None;
        }
        Some(Accepted {
            generation: result.generation,
            state: result.state,
            field: result.field,
            curves: result.curves,
        })
    }

    /// Make an uploaded result the displayed one. Returns `false` if a newer
    /// request arrived in between.
    pub fn commit(&mut self, accepted: Accepted) -> bool {
        if accepted.generation != self.latest_generation {
            log::debug!("not committing superseded resample #{}", accepted.generation);
            return false;
        }
        self.loading = false;
        self.displayed = Some(accepted.state);
        if let Some(curves) = accepted.curves {
            self.curves = Some(curves);
            self.curves_state = Some(accepted.state);
        }
        true
    }

    /// Record a failed resample or upload. Clears the loading flag if it was
    /// the newest request so the indicator never sticks. The displayed state
    /// is untouched, so the same state can be requested again.
    pub fn fail(&mut self, error: &OrbitalError) {
        log::error!("{error}");
        match error.generation() {
            Some(g) if g != self.latest_generation => {}
            _ => self.loading = false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn desired(&self) -> QuantumState {
        self.desired
    }

    pub fn displayed(&self) -> Option<QuantumState> {
        self.displayed
    }

    pub fn curves(&self) -> Option<&RadialCurveSet> {
        self.curves.as_ref()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> FieldPipeline {
        FieldPipeline::new(8, 32)
    }

    /// Accept and commit, as a frontend does after a successful upload.
    fn deliver(p: &mut FieldPipeline, req: &ResampleRequest) -> bool {
        match p.accept(run_resample(req)) {
            Some(accepted) => p.commit(accepted),
            None => false,
        }
    }

    #[test]
    fn newest_request_wins() {
        let mut p = pipeline();
        let first = p.request(QuantumState::new(2, 1, 0)).unwrap();
        let second = p.request(QuantumState::new(3, 2, 1)).unwrap();
        assert!(second.generation > first.generation);

        assert!(p.accept(run_resample(&first)).is_none());
        assert!(p.is_loading());
        let accepted = p.accept(run_resample(&second)).unwrap();
        assert_eq!(accepted.state, QuantumState::new(3, 2, 1));
        assert!(p.is_loading());
        assert!(p.commit(accepted));
        assert!(!p.is_loading());
        assert_eq!(p.displayed(), Some(QuantumState::new(3, 2, 1)));
    }

    #[test]
    fn m_only_change_reuses_curves() {
        let mut p = pipeline();
        let req = p.request(QuantumState::new(3, 2, 0)).unwrap();
        assert!(req.curves_needed);
        assert!(deliver(&mut p, &req));
        let before = p.curves().cloned();

        let req = p.request(QuantumState::new(3, 2, -2)).unwrap();
        assert!(!req.curves_needed);
        let accepted = p.accept(run_resample(&req)).unwrap();
        assert!(accepted.curves.is_none());
        p.commit(accepted);
        assert_eq!(p.curves().cloned(), before);

        let req = p.request(QuantumState::new(3, 1, 0)).unwrap();
        assert!(req.curves_needed);
    }

    #[test]
    fn repeated_request_for_shown_state_is_skipped() {
        let mut p = pipeline();
        let req = p.request(QuantumState::new(2, 0, 0)).unwrap();
        deliver(&mut p, &req);
        assert!(p.request(QuantumState::new(2, 0, 0)).is_none());
    }

    #[test]
    fn clamped_repeat_keeps_the_pending_request() {
        let mut p = pipeline();
        let s = QuantumState::new(2, 1, 1);
        let req = p.request(s).unwrap();
        // m is already at l, so the step clamps back to the pending state
        assert!(p.request(s.step_m(1)).is_none());
        assert_eq!(p.latest_generation(), req.generation);
        assert!(deliver(&mut p, &req));
        assert_eq!(p.displayed(), Some(s));
    }

    #[test]
    fn failed_upload_leaves_state_retryable() {
        let mut p = pipeline();
        let shown = p.request(QuantumState::new(2, 0, 0)).unwrap();
        deliver(&mut p, &shown);
        let before = p.curves().cloned();

        let target = QuantumState::new(3, 1, 0);
        let req = p.request(target).unwrap();
        let accepted = p.accept(run_resample(&req)).unwrap();
        assert_eq!(accepted.state, target);
        // the upload of `accepted` is rejected by the device
        p.fail(&OrbitalError::VolumeTooLarge {
            resolution: 8,
            max: 4,
        });

        assert!(!p.is_loading());
        assert_eq!(p.displayed(), Some(QuantumState::new(2, 0, 0)));
        assert_eq!(p.curves().cloned(), before);
        let retry = p.request(target).unwrap();
        assert!(retry.generation > req.generation);
        assert!(retry.curves_needed);
    }

    #[test]
    fn commit_after_a_newer_request_is_refused() {
        let mut p = pipeline();
        let req = p.request(QuantumState::new(2, 0, 0)).unwrap();
        let accepted = p.accept(run_resample(&req)).unwrap();
        p.request(QuantumState::new(3, 0, 0)).unwrap();
        assert!(!p.commit(accepted));
        assert!(p.is_loading());
        assert_eq!(p.displayed(), None);
    }

    #[test]
    fn failure_clears_loading_only_for_latest() {
        let mut p = pipeline();
        let a = p.request(QuantumState::new(2, 0, 0)).unwrap();
        let _b = p.request(QuantumState::new(3, 0, 0)).unwrap();
        p.fail(&OrbitalError::ResampleFailed {
            generation: a.generation,
            reason: "boom".into(),
        });
        assert!(p.is_loading());
        p.fail(&OrbitalError::WorkerDisconnected);
        assert!(!p.is_loading());
    }

    #[test]
    fn curves_use_the_field_bound() {
        let mut p = pipeline();
        let req = p.request(QuantumState::new(4, 1, 0)).unwrap();
        let bound = run_resample(&req).field.bound_scale();
        assert!(deliver(&mut p, &req));
        assert_eq!(p.curves().map(|c| c.r_max), Some(bound));
    }
}
