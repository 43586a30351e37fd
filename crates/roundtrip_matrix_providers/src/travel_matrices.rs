use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatrixError {
    /// The provider could not resolve a cell, e.g. two points not
    /// connected by any land route.
    #[error("no route between point {from} and point {to}")]
    Unreachable { from: usize, to: usize },

    #[error("expected {expected} cells for a {size}x{size} matrix, got {got}")]
    NotSquare {
        size: usize,
        expected: usize,
        got: usize,
    },
}

/// TravelMatrices holds the pairwise travel distance and duration
/// matrices for a set of points, in point order. Stored as flat
/// row-major vectors. Distances are meters, durations are seconds.
///
/// A value can only be constructed when every cell resolved; partial
/// matrices are rejected at the boundary instead of being flagged.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    size: usize,
    distances: Vec<f64>,
    durations: Vec<f64>,
}

impl TravelMatrices {
    /// Builds matrices from per-cell provider results. A `None`
    /// distance or duration anywhere invalidates the whole result.
    pub fn from_cells(
        size: usize,
        cells: Vec<(Option<f64>, Option<f64>)>,
    ) -> Result<Self, MatrixError> {
        if cells.len() != size * size {
            return Err(MatrixError::NotSquare {
                size,
                expected: size * size,
                got: cells.len(),
            });
        }

        let mut distances = Vec::with_capacity(cells.len());
        let mut durations = Vec::with_capacity(cells.len());

        for (index, (distance, duration)) in cells.into_iter().enumerate() {
            match (distance, duration) {
                (Some(distance), Some(duration)) => {
                    distances.push(distance);
                    durations.push(duration);
                }
                _ => {
                    return Err(MatrixError::Unreachable {
                        from: index / size,
                        to: index % size,
                    });
                }
            }
        }

        Ok(Self {
            size,
            distances,
            durations,
        })
    }

    pub fn from_flat(size: usize, distances: Vec<f64>, durations: Vec<f64>) -> Result<Self, MatrixError> {
        let cells = distances
            .into_iter()
            .zip(durations)
            .map(|(distance, duration)| (Some(distance), Some(duration)))
            .collect::<Vec<_>>();

        Self::from_cells(size, cells)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.size + to]
    }

    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.durations[from * self.size + to]
    }

    pub fn distance_rows(&self) -> Vec<Vec<f64>> {
        self.rows(&self.distances)
    }

    pub fn duration_rows(&self) -> Vec<Vec<f64>> {
        self.rows(&self.durations)
    }

    fn rows(&self, cells: &[f64]) -> Vec<Vec<f64>> {
        cells.chunks(self.size).map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_builds_square_matrices() {
        let cells = vec![
            (Some(0.0), Some(0.0)),
            (Some(100.0), Some(10.0)),
            (Some(120.0), Some(12.0)),
            (Some(0.0), Some(0.0)),
        ];

        let matrices = TravelMatrices::from_cells(2, cells).unwrap();

        assert_eq!(matrices.size(), 2);
        assert_eq!(matrices.distance(0, 1), 100.0);
        assert_eq!(matrices.duration(1, 0), 12.0);
        assert_eq!(matrices.distance_rows(), vec![vec![0.0, 100.0], vec![120.0, 0.0]]);
    }

    #[test]
    fn test_missing_cell_invalidates_whole_matrix() {
        let cells = vec![
            (Some(0.0), Some(0.0)),
            (Some(100.0), Some(10.0)),
            (None, Some(12.0)),
            (Some(0.0), Some(0.0)),
        ];

        let error = TravelMatrices::from_cells(2, cells).unwrap_err();

        assert_eq!(error, MatrixError::Unreachable { from: 1, to: 0 });
    }

    #[test]
    fn test_cell_count_must_match_size() {
        let error = TravelMatrices::from_cells(3, vec![(Some(0.0), Some(0.0))]).unwrap_err();

        assert_eq!(
            error,
            MatrixError::NotSquare {
                size: 3,
                expected: 9,
                got: 1
            }
        );
    }
}
