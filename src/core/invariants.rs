// invariants.rs - Invariant site classification

/// Flag every column whose entropy is exactly zero
pub fn invariant_sites(entropies: &[f64]) -> Vec<bool> {
    entropies.iter().map(|&h| h == 0.0).collect()
}

/// True when every flag in the slice marks an invariant column
pub fn all_invariant(flags: &[bool]) -> bool {
    flags.iter().all(|&invariant| invariant)
}
