use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

use dcmetrics_core::{Dataset, DenialConstraint, MetricsError, Result, violates};

use crate::model::CoverageSemantics;

/// `min_size(batch) / size(dc)` for every constraint, index-aligned with `batch`.
pub fn succinctness(batch: &[DenialConstraint]) -> Result<Vec<f64>> {
    if let Some(index) = batch.iter().position(DenialConstraint::is_empty) {
        return Err(MetricsError::ZeroSizeConstraint { index });
    }
    let min_size = batch
        .iter()
        .map(DenialConstraint::size)
        .min()
        .ok_or(MetricsError::EmptyBatch {
            metric: "succinctness",
        })?;

    Ok(batch
        .iter()
        .map(|dc| min_size as f64 / dc.size() as f64)
        .collect())
}

/// Share of `batch` entries whose constraint also appears in `truth_standard`.
///
/// Both sides are collapsed to sets for the intersection, but the divisor is
/// the raw length of `batch`, so duplicates in the batch lower the score.
pub fn degree_of_approximation(
    batch: &[DenialConstraint],
    truth_standard: &[DenialConstraint],
) -> Result<f64> {
    if batch.is_empty() {
        return Err(MetricsError::EmptyBatch {
            metric: "degree of approximation",
        });
    }
    let discovered: HashSet<&DenialConstraint> = batch.iter().collect();
    let truth: HashSet<&DenialConstraint> = truth_standard.iter().collect();
    let matching = discovered.intersection(&truth).count();
    Ok(matching as f64 / batch.len() as f64)
}

/// Frequency of each distinct constraint divided by the highest frequency.
pub fn interestingness(batch: &[DenialConstraint]) -> Result<HashMap<DenialConstraint, f64>> {
    let mut frequencies: HashMap<&DenialConstraint, usize> = HashMap::new();
    for dc in batch {
        *frequencies.entry(dc).or_default() += 1;
    }
    let max_freq = frequencies
        .values()
        .copied()
        .max()
        .ok_or(MetricsError::EmptyBatch {
            metric: "interestingness",
        })?;

    Ok(frequencies
        .into_iter()
        .map(|(dc, freq)| (dc.clone(), freq as f64 / max_freq as f64))
        .collect())
}

/// Progress snapshot emitted after each outer-loop row of the coverage scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageProgress {
    /// Index of the constraint being scanned.
    pub constraint: usize,
    pub constraints: usize,
    /// Rows of the current constraint whose pairs are fully examined.
    pub rows_done: usize,
    pub rows: usize,
}

impl CoverageProgress {
    /// Completion of the current constraint, in percent.
    pub fn percent(&self) -> f64 {
        if self.rows == 0 {
            return 100.0;
        }
        self.rows_done as f64 / self.rows as f64 * 100.0
    }
}

/// Receives coverage progress; returning `Break` aborts the scan.
pub trait CoverageObserver {
    fn on_row(&mut self, progress: &CoverageProgress) -> ControlFlow<()>;
}

impl<F> CoverageObserver for F
where
    F: FnMut(&CoverageProgress) -> ControlFlow<()>,
{
    fn on_row(&mut self, progress: &CoverageProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Observer that never reports and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl CoverageObserver for NoProgress {
    fn on_row(&mut self, _progress: &CoverageProgress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Pair counts behind a coverage value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageStats {
    pub satisfied_pairs: u64,
    pub pairs_examined: u64,
}

impl CoverageStats {
    /// Satisfied share of examined pairs; 0 when nothing was examined.
    pub fn value(&self) -> f64 {
        if self.pairs_examined == 0 {
            return 0.0;
        }
        self.satisfied_pairs as f64 / self.pairs_examined as f64
    }
}

/// Scan every pair `(i, j)` with `i < j` for every constraint in `batch`.
pub fn coverage_stats<O>(
    batch: &[DenialConstraint],
    dataset: &Dataset,
    semantics: CoverageSemantics,
    observer: &mut O,
) -> Result<CoverageStats>
where
    O: CoverageObserver + ?Sized,
{
    let records = dataset.records();
    let rows = records.len();
    let mut stats = CoverageStats {
        satisfied_pairs: 0,
        pairs_examined: 0,
    };
    let mut rows_scanned = 0;

    for (constraint, dc) in batch.iter().enumerate() {
        for (i, left) in records.iter().enumerate() {
            for right in &records[i + 1..] {
                stats.pairs_examined += 1;
                let holds = violates(left, right, dc)?;
                if semantics.is_satisfied(holds) {
                    stats.satisfied_pairs += 1;
                }
            }
            rows_scanned += 1;

            let progress = CoverageProgress {
                constraint,
                constraints: batch.len(),
                rows_done: i + 1,
                rows,
            };
            if observer.on_row(&progress).is_break() {
                return Err(MetricsError::Cancelled {
                    rows_done: rows_scanned,
                });
            }
        }
    }

    Ok(stats)
}

/// Fraction of examined pairs counted as satisfied under `semantics`.
pub fn coverage<O>(
    batch: &[DenialConstraint],
    dataset: &Dataset,
    semantics: CoverageSemantics,
    observer: &mut O,
) -> Result<f64>
where
    O: CoverageObserver + ?Sized,
{
    coverage_stats(batch, dataset, semantics, observer).map(|stats| stats.value())
}
