use crate::state::QuantumState;
use crate::wavefunction::AngularShape;

const SPECTROSCOPIC_LETTERS: [char; 16] = [
    's', 'p', 'd', 'f', 'g', 'h', 'i', 'k', 'l', 'm', 'n', 'o', 'q', 'r', 't', 'u',
];

/// Spectroscopic letter for `l` (`j` is skipped by convention).
pub fn spectroscopic_letter(l: i32) -> Option<char> {
    usize::try_from(l)
        .ok()
        .and_then(|i| SPECTROSCOPIC_LETTERS.get(i).copied())
}

/// Display label such as `"4p (pz)"`, `"3d (dx²-y²)"` or `"5g (g)"`.
pub fn orbital_label(state: &QuantumState) -> String {
    let (n, l, m) = (state.n(), state.l(), state.m());
    let letter = spectroscopic_letter(l).map_or_else(|| format!("l={l}"), |c| c.to_string());
    let name = AngularShape::from_lm(l, m)
        .and_then(|shape| shape.conventional_name())
        .map_or_else(|| letter.clone(), str::to_owned);
    format!("{n}{letter} ({name})")
}
