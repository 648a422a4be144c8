use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::{Add, Sub, Mul};

/// Dense row-major matrix. Samples live along the column axis throughout
/// this crate: a batch of m vectors of dimension d is a [d × m] matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Matrix with i.i.d. standard-normal entries drawn from `rng`.
    ///
    /// The caller owns the random source, so seeded runs reproduce
    /// bit-identically and parallel tests cannot interfere.
    pub fn standard_normal<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(rng);
            }
        }
        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_data(
            (self.data)
                .clone()
                .into_iter()
                .map(|row| row.into_iter().map(|x| functor(x)).collect())
                .collect()
        )
    }

    /// Element-wise (Hadamard) product with a same-shape matrix.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.rows, rhs.rows);
        assert_eq!(self.cols, rhs.cols);
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect()
            })
            .collect();
        Matrix::from_data(data)
    }

    /// Adds a [rows × 1] column vector to every column (bias broadcast).
    pub fn add_col_broadcast(&self, col: &Matrix) -> Matrix {
        assert_eq!(col.cols, 1, "broadcast operand must be a column vector");
        assert_eq!(self.rows, col.rows, "broadcast operand has wrong height");

        let mut res = self.clone();
        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] += col.data[i][0];
            }
        }
        res
    }

    /// Sums across the column (batch) axis into a [rows × 1] column vector.
    pub fn sum_cols(&self) -> Matrix {
        let mut res = Matrix::zeros(self.rows, 1);
        for i in 0..self.rows {
            res.data[i][0] = self.data[i].iter().sum();
        }
        res
    }

    /// Copies the contiguous column block [start, end).
    pub fn columns(&self, start: usize, end: usize) -> Matrix {
        assert!(start <= end && end <= self.cols, "column range out of bounds");

        let data = self.data.iter()
            .map(|row| row[start..end].to_vec())
            .collect();
        Matrix::from_data(data)
    }

    /// Returns a new matrix whose column j is this matrix's column `perm[j]`.
    ///
    /// Functional reordering: the receiver is left untouched, so one
    /// training run's shuffle can never corrupt a split another run reads.
    pub fn permute_cols(&self, perm: &[usize]) -> Matrix {
        assert_eq!(perm.len(), self.cols, "permutation length must equal column count");

        let data = self.data.iter()
            .map(|row| perm.iter().map(|&j| row[j]).collect())
            .collect();
        Matrix::from_data(data)
    }

    /// Row index of the maximum entry in each column.
    pub fn argmax_cols(&self) -> Vec<usize> {
        (0..self.cols)
            .map(|j| {
                let mut best = 0;
                for i in 1..self.rows {
                    if self.data[i][j] > self.data[best][j] {
                        best = i;
                    }
                }
                best
            })
            .collect()
    }

    /// Concatenates blocks left-to-right. All blocks must share a row count.
    pub fn hstack(blocks: &[Matrix]) -> Matrix {
        assert!(!blocks.is_empty(), "hstack needs at least one block");
        let rows = blocks[0].rows;

        let data = (0..rows)
            .map(|i| {
                blocks.iter()
                    .flat_map(|block| {
                        assert_eq!(block.rows, rows, "hstack blocks must share a row count");
                        block.data[i].iter().copied()
                    })
                    .collect()
            })
            .collect();
        Matrix::from_data(data)
    }

    /// Concatenates blocks top-to-bottom. All blocks must share a column count.
    pub fn vstack(blocks: &[Matrix]) -> Matrix {
        assert!(!blocks.is_empty(), "vstack needs at least one block");
        let cols = blocks[0].cols;

        let data = blocks.iter()
            .flat_map(|block| {
                assert_eq!(block.cols, cols, "vstack blocks must share a column count");
                block.data.iter().cloned()
            })
            .collect();
        Matrix::from_data(data)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}
