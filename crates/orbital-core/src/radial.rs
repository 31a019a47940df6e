//! One-dimensional radial analytics for the plot.

use crate::wavefunction::radial_part;
use std::f64::consts::PI;

/// Radial curves for one `(n, l)` pair, sampled on `[0, r_max]`.
///
/// `probability` integrates to 1 over the sampled range and `cumulative`
/// is its running integral, both all-zero when the raw area is not positive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadialCurveSet {
    pub r: Vec<f64>,
    pub radial: Vec<f64>,
    pub probability: Vec<f64>,
    pub cumulative: Vec<f64>,
    pub r_max: f64,
}

impl RadialCurveSet {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }
}

/// Sample `R(r)` and the shell density `4π r² R²` at `sample_count` evenly
/// spaced radii, then normalize with the composite trapezoid rule.
pub fn compute_curves(n: i32, l: i32, r_max: f64, sample_count: usize) -> RadialCurveSet {
    let step = if sample_count > 1 {
        r_max / (sample_count - 1) as f64
    } else {
        0.0
    };
    let r: Vec<f64> = (0..sample_count).map(|i| i as f64 * step).collect();
    let radial: Vec<f64> = r.iter().map(|&ri| radial_part(n, l, ri)).collect();
    let raw: Vec<f64> = r
        .iter()
        .zip(&radial)
        .map(|(&ri, &rv)| 4.0 * PI * ri * ri * rv * rv)
        .collect();

    let mut running = Vec::with_capacity(sample_count);
    let mut area = 0.0;
    for i in 0..sample_count {
        if i > 0 {
            area += 0.5 * (raw[i - 1] + raw[i]) * (r[i] - r[i - 1]);
        }
        running.push(area);
    }

    let (probability, cumulative) = if area > 0.0 && area.is_finite() {
        (
            raw.iter().map(|p| p / area).collect(),
            running.iter().map(|c| c / area).collect(),
        )
    } else {
        (vec![0.0; sample_count], vec![0.0; sample_count])
    };

    RadialCurveSet {
        r,
        radial,
        probability,
        cumulative,
        r_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_span_zero_to_r_max() {
        let c = compute_curves(2, 0, 10.0, 11);
        assert_eq!(c.len(), 11);
        assert_eq!(c.r[0], 0.0);
        assert!((c.r[10] - 10.0).abs() < 1e-12);
        assert_eq!(c.r_max, 10.0);
    }

    #[test]
    fn degenerate_sample_counts_do_not_panic() {
        let empty = compute_curves(2, 1, 5.0, 0);
        assert!(empty.is_empty());
        let one = compute_curves(2, 1, 5.0, 1);
        assert_eq!(one.cumulative, vec![0.0]);
        assert_eq!(one.probability, vec![0.0]);
    }

    #[test]
    fn invalid_pair_yields_zero_curves() {
        let c = compute_curves(2, 2, 10.0, 50);
        assert!(c.radial.iter().all(|&v| v == 0.0));
        assert!(c.probability.iter().all(|&v| v == 0.0));
        assert!(c.cumulative.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn ground_state_peaks_near_bohr_radius() {
        let c = compute_curves(1, 0, 10.0, 1001);
        let (imax, _) = c
            .probability
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &p)| if p > best.1 { (i, p) } else { best });
        assert!((c.r[imax] - 1.0).abs() < 0.02);
    }
}
