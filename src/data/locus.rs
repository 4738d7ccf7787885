// locus.rs - Named locus ranges within an alignment

use crate::core::window::Extent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named locus (UCE) occupying a half-open column range of the alignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locus {
    pub name: String,
    pub extent: Extent,
}

impl Locus {
    pub fn new(name: impl Into<String>, start: usize, stop: usize) -> Self {
        Self {
            name: name.into(),
            extent: Extent::new(start, stop),
        }
    }

    pub fn start(&self) -> usize {
        self.extent.start
    }

    pub fn stop(&self) -> usize {
        self.extent.stop
    }

    pub fn len(&self) -> usize {
        self.extent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extent.is_empty()
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.extent)
    }
}

/// Merge loci sharing a name into their hull and order by (start, name)
pub fn merge_loci(loci: Vec<Locus>) -> Vec<Locus> {
    let mut by_name: BTreeMap<String, Extent> = BTreeMap::new();
    for locus in loci {
        by_name
            .entry(locus.name)
            .and_modify(|extent| *extent = extent.hull(&locus.extent))
            .or_insert(locus.extent);
    }

    let mut merged: Vec<Locus> = by_name
        .into_iter()
        .map(|(name, extent)| Locus { name, extent })
        .collect();
    sort_loci(&mut merged);
    merged
}

/// Deterministic locus order used for every output
pub fn sort_loci(loci: &mut [Locus]) {
    loci.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.name.cmp(&b.name)));
}

/// Check every locus is non-empty and lies within `alignment_len` columns
pub fn check_loci_bounds(loci: &[Locus], alignment_len: usize) -> Result<(), String> {
    for locus in loci {
        if locus.is_empty() {
            return Err(format!("Locus {} is empty", locus));
        }
        if locus.stop() > alignment_len {
            return Err(format!(
                "Locus {} extends past the alignment end ({} columns)",
                locus, alignment_len
            ));
        }
    }
    Ok(())
}
