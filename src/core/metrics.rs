// metrics.rs - Sitewise entropy and GC content

use crate::core::error::{Result, WindowError};
use crate::core::invariants::invariant_sites;
use crate::core::window::Extent;
use crate::data::Alignment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Per-symbol, per-column counts of alphabet symbols
pub type BaseCounts = BTreeMap<u8, Vec<usize>>;

/// Sitewise statistic used to score windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    /// Shannon entropy of the column (natural log)
    Entropy,
    /// Fraction of G/C symbols over all sequences
    Gc,
    /// Multinomial likelihood; recognized but not computed
    Multinomial,
}

impl MetricKind {
    pub fn is_implemented(&self) -> bool {
        !matches!(self, MetricKind::Multinomial)
    }

    pub fn description(&self) -> &str {
        match self {
            MetricKind::Entropy => "Shannon entropy per column",
            MetricKind::Gc => "GC fraction per column",
            MetricKind::Multinomial => "Multinomial likelihood per column (not implemented)",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::Entropy => "Entropy",
            MetricKind::Gc => "GC",
            MetricKind::Multinomial => "Multinomial",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entropy" => Ok(MetricKind::Entropy),
            "gc" => Ok(MetricKind::Gc),
            "multi" | "multinomial" => Ok(MetricKind::Multinomial),
            _ => Err(format!("Invalid metric: {}. Use: entropy, gc", s)),
        }
    }
}

/// Shannon entropy of one column over `alphabet`.
///
/// Symbols outside the alphabet do not count towards the denominator; a
/// column without any alphabet symbol divides by 1 and so scores 0.
pub fn column_entropy(column: &[u8], alphabet: &[u8]) -> f64 {
    let counts: Vec<usize> = alphabet
        .iter()
        .map(|a| {
            let a = a.to_ascii_uppercase();
            column
                .iter()
                .filter(|b| b.to_ascii_uppercase() == a)
                .count()
        })
        .collect();
    let total: usize = counts.iter().sum();
    let denominator = if total == 0 { 1.0 } else { total as f64 };

    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| c as f64 / denominator)
        .fold(0.0, |acc, p| acc - p * p.ln())
}

/// Entropy of every column
pub fn sitewise_entropy(aln: &Alignment, alphabet: &[u8]) -> Vec<f64> {
    (0..aln.len())
        .map(|i| column_entropy(&aln.column(i), alphabet))
        .collect()
}

/// GC fraction of every column, divided by the total sequence count.
///
/// Gaps and missing symbols stay in the denominator, so gap-heavy columns
/// score lower than their determined bases alone would suggest.
pub fn sitewise_gc(aln: &Alignment) -> Vec<f64> {
    let n_seq = aln.n_seq() as f64;
    (0..aln.len())
        .map(|i| {
            let gc = aln
                .sequences()
                .iter()
                .filter(|s| matches!(s[i].to_ascii_uppercase(), b'G' | b'C'))
                .count();
            gc as f64 / n_seq
        })
        .collect()
}

/// Count of every alphabet symbol at every column
pub fn sitewise_base_counts(aln: &Alignment, alphabet: &[u8]) -> BaseCounts {
    let mut counts: BaseCounts = alphabet
        .iter()
        .map(|b| (b.to_ascii_uppercase(), vec![0; aln.len()]))
        .collect();
    for seq in aln.sequences() {
        for (i, b) in seq.iter().enumerate() {
            if let Some(column_counts) = counts.get_mut(&b.to_ascii_uppercase()) {
                column_counts[i] += 1;
            }
        }
    }
    counts
}

/// Compute one metric's series
pub fn sitewise(aln: &Alignment, kind: MetricKind, alphabet: &[u8]) -> Result<Vec<f64>> {
    match kind {
        MetricKind::Entropy => Ok(sitewise_entropy(aln, alphabet)),
        MetricKind::Gc => Ok(sitewise_gc(aln)),
        MetricKind::Multinomial => Err(WindowError::UnsupportedMetric(kind)),
    }
}

/// Everything the window search reads from an alignment, computed once.
#[derive(Debug, Clone)]
pub struct SiteMetrics {
    pub series: BTreeMap<MetricKind, Vec<f64>>,
    pub invariant: Vec<bool>,
    pub base_counts: BaseCounts,
    pub length: usize,
}

impl SiteMetrics {
    pub fn compute(aln: &Alignment, alphabet: &[u8], kinds: &[MetricKind]) -> Result<Self> {
        let entropy = sitewise_entropy(aln, alphabet);
        let mut series = BTreeMap::new();
        for &kind in kinds {
            let values = match kind {
                MetricKind::Entropy => entropy.clone(),
                _ => sitewise(aln, kind, alphabet)?,
            };
            series.insert(kind, values);
        }

        Ok(Self {
            invariant: invariant_sites(&entropy),
            base_counts: sitewise_base_counts(aln, alphabet),
            series,
            length: aln.len(),
        })
    }

    /// Metric kinds present, in their fixed order
    pub fn kinds(&self) -> Vec<MetricKind> {
        self.series.keys().copied().collect()
    }

    /// Metric values restricted to `extent`, checked against the alignment length
    pub fn series_in(&self, extent: Extent) -> Result<BTreeMap<MetricKind, &[f64]>> {
        self.check_extent(extent)?;
        self.series
            .iter()
            .map(|(&kind, values)| {
                if values.len() != self.length {
                    return Err(WindowError::SeriesLength {
                        metric: kind,
                        expected: self.length,
                        actual: values.len(),
                    });
                }
                Ok((kind, &values[extent.range()]))
            })
            .collect()
    }

    pub fn invariant_in(&self, extent: Extent) -> Result<&[bool]> {
        self.check_extent(extent)?;
        Ok(&self.invariant[extent.range()])
    }

    /// Base counts restricted to `extent`
    pub fn base_counts_in(&self, extent: Extent) -> Result<BaseCounts> {
        self.check_extent(extent)?;
        Ok(self
            .base_counts
            .iter()
            .map(|(&b, counts)| (b, counts[extent.range()].to_vec()))
            .collect())
    }

    fn check_extent(&self, extent: Extent) -> Result<()> {
        if extent.stop > self.length || extent.stop > self.invariant.len() {
            return Err(WindowError::ExtentOutOfBounds {
                start: extent.start,
                stop: extent.stop,
                length: self.length,
            });
        }
        Ok(())
    }
}
