use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CostMatrixError {
    #[error("matrix is not square: row {row} has {got} cells, expected {expected}")]
    NotSquare {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("matrix has {rows} rows, expected {expected}")]
    WrongSize { rows: usize, expected: usize },

    #[error("matrix is empty")]
    Empty,
}

/// Square cost matrix a solver minimizes over. Cell `(i, j)` is the
/// cost of traveling from stop `i` to stop `j`; costs need not be
/// symmetric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl CostMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CostMatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(CostMatrixError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(CostMatrixError::NotSquare {
                    row: row_index,
                    got: row.len(),
                    expected: size,
                });
            }
            cells.extend(row);
        }

        Ok(Self { size, cells })
    }

    /// Like `from_rows`, but also checks the row count a caller
    /// declared out of band (the `numDests` field of a request).
    pub fn from_rows_with_size(
        rows: Vec<Vec<f64>>,
        expected: usize,
    ) -> Result<Self, CostMatrixError> {
        if rows.len() != expected {
            return Err(CostMatrixError::WrongSize {
                rows: rows.len(),
                expected,
            });
        }

        Self::from_rows(rows)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.cells[from * self.size + to]
    }

    /// Total cost of the closed tour visiting `order` and returning to
    /// its first stop.
    pub fn tour_cost(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }

        let legs = order
            .windows(2)
            .map(|leg| self.cost(leg[0], leg[1]))
            .sum::<f64>();

        legs + self.cost(order[order.len() - 1], order[0])
    }
}
