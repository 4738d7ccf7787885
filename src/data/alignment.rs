// alignment.rs - Multiple sequence alignment value type

use std::collections::BTreeMap;

/// Equal-length aligned sequences, addressed by column.
///
/// Read-only once built; every search reads it through shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    ids: Vec<String>,
    sequences: Vec<Vec<u8>>,
}

impl Alignment {
    /// Build an alignment, rejecting empty or ragged input
    pub fn new(ids: Vec<String>, sequences: Vec<Vec<u8>>) -> Result<Self, String> {
        if sequences.is_empty() {
            return Err("Alignment must contain at least one sequence".to_string());
        }
        if ids.len() != sequences.len() {
            return Err(format!(
                "Alignment has {} identifiers for {} sequences",
                ids.len(),
                sequences.len()
            ));
        }
        let length = sequences[0].len();
        if let Some((i, seq)) = sequences.iter().enumerate().find(|(_, s)| s.len() != length) {
            return Err(format!(
                "Sequence '{}' has length {}, expected {}",
                ids[i],
                seq.len(),
                length
            ));
        }
        Ok(Self { ids, sequences })
    }

    /// Convenience constructor with generated identifiers (`seq1`, `seq2`, ...)
    pub fn from_strs(sequences: &[&str]) -> Result<Self, String> {
        let ids = (1..=sequences.len()).map(|i| format!("seq{}", i)).collect();
        let seqs = sequences.iter().map(|s| s.as_bytes().to_vec()).collect();
        Self::new(ids, seqs)
    }

    /// Number of sequences
    pub fn n_seq(&self) -> usize {
        self.sequences.len()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.sequences[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn sequences(&self) -> &[Vec<u8>] {
        &self.sequences
    }

    /// Symbols of every sequence at column `position`
    pub fn column(&self, position: usize) -> Vec<u8> {
        self.sequences.iter().map(|s| s[position]).collect()
    }

    /// Columns `[start, stop)`; bounds are clamped to the alignment
    pub fn subseq(&self, start: usize, stop: usize) -> Alignment {
        let stop = stop.min(self.len());
        let start = start.min(stop);
        Alignment {
            ids: self.ids.clone(),
            sequences: self
                .sequences
                .iter()
                .map(|s| s[start..stop].to_vec())
                .collect(),
        }
    }

    /// Occurrences of each alphabet symbol; other symbols are ignored
    pub fn count(&self, alphabet: &[u8]) -> BTreeMap<u8, usize> {
        let mut counts: BTreeMap<u8, usize> = alphabet
            .iter()
            .map(|b| (b.to_ascii_uppercase(), 0))
            .collect();
        for seq in &self.sequences {
            for &b in seq {
                if let Some(c) = counts.get_mut(&b.to_ascii_uppercase()) {
                    *c += 1;
                }
            }
        }
        counts
    }

    /// Normalized frequency of each alphabet symbol among alphabet symbols
    pub fn frequency(&self, alphabet: &[u8]) -> BTreeMap<u8, f64> {
        symbol_frequencies(&self.count(alphabet))
    }
}

/// Turn symbol counts into frequencies; an all-zero total divides by 1
pub fn symbol_frequencies(counts: &BTreeMap<u8, usize>) -> BTreeMap<u8, f64> {
    let total: usize = counts.values().sum();
    let denominator = if total == 0 { 1.0 } else { total as f64 };
    counts
        .iter()
        .map(|(&b, &c)| (b, c as f64 / denominator))
        .collect()
}
