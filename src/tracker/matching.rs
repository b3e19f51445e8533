//! Matching utilities for centroid tracking.

use ndarray::Array2;
use tracing::warn;

use crate::tracker::rect::Point;

/// Compute the Euclidean distance matrix between tracked and input centroids.
///
/// Rows follow `tracked`, columns follow `inputs`.
pub fn centroid_distance(tracked: &[Point], inputs: &[Point]) -> Array2<f64> {
    let mut dists = Array2::zeros((tracked.len(), inputs.len()));
    for (i, t) in tracked.iter().enumerate() {
        for (j, d) in inputs.iter().enumerate() {
            dists[[i, j]] = t.distance(d);
        }
    }
    dists
}

/// Output of a matching policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// `(row, col)` pairs in the order they were committed.
    pub matches: Vec<(usize, usize)>,
    /// Rows left without a column, ascending.
    pub unmatched_rows: Vec<usize>,
    /// Columns left without a row, ascending.
    pub unmatched_cols: Vec<usize>,
}

impl AssignmentResult {
    fn unmatched(num_rows: usize, num_cols: usize) -> Self {
        Self {
            matches: vec![],
            unmatched_rows: (0..num_rows).collect(),
            unmatched_cols: (0..num_cols).collect(),
        }
    }

    fn from_matches(matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        let mut row_used = vec![false; num_rows];
        let mut col_used = vec![false; num_cols];
        for &(row, col) in &matches {
            row_used[row] = true;
            col_used[col] = true;
        }
        Self {
            matches,
            unmatched_rows: unused(&row_used),
            unmatched_cols: unused(&col_used),
        }
    }
}

fn unused(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &used)| if used { None } else { Some(i) })
        .collect()
}

/// Strategy for pairing tracked objects (rows) with input centroids (columns).
///
/// Implementations must be deterministic: the same matrix always yields the
/// same result.
pub trait MatchingPolicy {
    fn assign(&self, distances: &Array2<f64>) -> AssignmentResult;
}

/// Greedy nearest-row-first matching.
///
/// Rows are visited in ascending order of their smallest distance, each
/// claiming its closest column unless that column was already taken. The
/// least ambiguous objects are resolved first. This is not a minimum-cost
/// assignment and can mismatch crossing trajectories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyNearest;

impl MatchingPolicy for GreedyNearest {
    fn assign(&self, distances: &Array2<f64>) -> AssignmentResult {
        let (num_rows, num_cols) = distances.dim();
        if num_rows == 0 || num_cols == 0 {
            return AssignmentResult::unmatched(num_rows, num_cols);
        }

        // (row, row minimum, arg-min column); first column wins ties.
        let mut candidates: Vec<(usize, f64, usize)> = distances
            .rows()
            .into_iter()
            .enumerate()
            .map(|(row, values)| {
                let (col, min) = values
                    .iter()
                    .enumerate()
                    .fold((0, f64::INFINITY), |best, (col, &d)| {
                        if d < best.1 { (col, d) } else { best }
                    });
                (row, min, col)
            })
            .collect();
        // Stable: rows with equal minima keep registry order.
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut row_used = vec![false; num_rows];
        let mut col_used = vec![false; num_cols];
        let mut matches = Vec::with_capacity(num_rows.min(num_cols));
        for (row, _, col) in candidates {
            if row_used[row] || col_used[col] {
                continue;
            }
            row_used[row] = true;
            col_used[col] = true;
            matches.push((row, col));
        }

        AssignmentResult {
            matches,
            unmatched_rows: unused(&row_used),
            unmatched_cols: unused(&col_used),
        }
    }
}

/// Minimum total distance assignment solved with LAPJV.
///
/// Pairs farther apart than `max_distance` are rejected, leaving the row to
/// disappear and the column to register as a new object.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimalAssignment {
    pub max_distance: Option<f64>,
}

impl OptimalAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_distance(max_distance: f64) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }
}

/// Cost used for padding cells of a non-square matrix.
const PADDING_COST: f64 = 1e9;

impl MatchingPolicy for OptimalAssignment {
    fn assign(&self, distances: &Array2<f64>) -> AssignmentResult {
        let (num_rows, num_cols) = distances.dim();
        if num_rows == 0 || num_cols == 0 {
            return AssignmentResult::unmatched(num_rows, num_cols);
        }

        let size = num_rows.max(num_cols);
        let mut padded = Array2::<f64>::from_elem((size, size), PADDING_COST);
        padded
            .slice_mut(ndarray::s![..num_rows, ..num_cols])
            .assign(distances);

        let row_to_col = match lapjv::lapjv(&padded) {
            Ok((row_to_col, _)) => row_to_col,
            Err(err) => {
                warn!(?err, "lapjv failed, falling back to greedy matching");
                return GreedyNearest.assign(distances);
            }
        };

        let mut matches: Vec<(usize, usize)> = row_to_col
            .into_iter()
            .enumerate()
            .filter(|&(row, col)| row < num_rows && col < num_cols)
            .filter(|&(row, col)| {
                self.max_distance
                    .is_none_or(|max| distances[[row, col]] <= max)
            })
            .collect();
        // Commit order mirrors the greedy policy: closest pairs first.
        matches.sort_by(|a, b| distances[[a.0, a.1]].total_cmp(&distances[[b.0, b.1]]));

        AssignmentResult::from_matches(matches, num_rows, num_cols)
    }
}
