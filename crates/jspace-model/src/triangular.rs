//! 对称矩阵的压缩三角存储
//!
//! N×N 对称矩阵只保存下三角（按列主序），共 `N(N+1)/2` 个元素：
//!
//! ```text
//! | 0            |
//! | 1  N         |
//! | 2  N+1  2N−1 |
//! | …            |
//! ```
//!
//! 下标映射对 `(i, j)` 和 `(j, i)` 给出同一个偏移量。

use nalgebra::DMatrix;

/// 压缩存储长度 `N(N+1)/2`
#[inline]
pub fn packed_len(dim: usize) -> usize {
    dim * (dim + 1) / 2
}

/// `(row, col)` 到压缩偏移量的映射（与参数顺序无关）
///
/// ```
/// use jspace_model::triangular::packed_index;
///
/// assert_eq!(packed_index(3, 0, 0), 0);
/// assert_eq!(packed_index(3, 2, 1), 4);
/// assert_eq!(packed_index(3, 1, 2), 4);
/// assert_eq!(packed_index(3, 2, 2), 5);
/// ```
#[inline]
pub fn packed_index(dim: usize, row: usize, col: usize) -> usize {
    let (r, c) = if row >= col { (row, col) } else { (col, row) };
    r + dim * c - c * (c + 1) / 2
}

/// 压缩存储的对称矩阵
#[derive(Debug, Clone, PartialEq)]
pub struct PackedSymmetric {
    dim: usize,
    data: Vec<f64>,
}

impl PackedSymmetric {
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; packed_len(dim)],
        }
    }

    /// 从稠密矩阵压缩（只读取下三角）
    ///
    /// 非方阵返回 `None`。
    pub fn from_dense(matrix: &DMatrix<f64>) -> Option<Self> {
        if !matrix.is_square() {
            return None;
        }
        let dim = matrix.nrows();
        let mut packed = Self::zeros(dim);
        for c in 0..dim {
            for r in c..dim {
                packed.data[packed_index(dim, r, c)] = matrix[(r, c)];
            }
        }
        Some(packed)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.dim || col >= self.dim {
            return None;
        }
        Some(self.data[packed_index(self.dim, row, col)])
    }

    /// 写入 `(row, col)`，同时也就是 `(col, row)`；越界写入被忽略
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row < self.dim && col < self.dim {
            self.data[packed_index(self.dim, row, col)] = value;
        }
    }

    /// 解压为稠密对称矩阵
    pub fn to_dense(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.dim, self.dim, |r, c| {
            self.data[packed_index(self.dim, r, c)]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_bijection() {
        for dim in 0..8 {
            let mut seen = vec![false; packed_len(dim)];
            for c in 0..dim {
                for r in c..dim {
                    let k = packed_index(dim, r, c);
                    assert!(!seen[k], "offset {} hit twice (dim {})", k, dim);
                    seen[k] = true;
                    assert_eq!(k, packed_index(dim, c, r));
                }
            }
            assert!(seen.iter().all(|&hit| hit));
        }
    }

    #[test]
    fn test_set_get_symmetric() {
        let mut m = PackedSymmetric::zeros(4);
        m.set(3, 1, 2.5);
        assert_eq!(m.get(1, 3), Some(2.5));
        assert_eq!(m.get(4, 0), None);
        m.set(9, 9, 1.0);
        assert_eq!(m.as_slice().iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_from_dense_rejects_non_square() {
        assert!(PackedSymmetric::from_dense(&DMatrix::zeros(2, 3)).is_none());
    }

    #[test]
    fn test_to_dense_is_symmetric() {
        let mut m = PackedSymmetric::zeros(3);
        m.set(1, 0, -1.0);
        m.set(2, 2, 4.0);
        let dense = m.to_dense();
        assert_eq!(dense, dense.transpose());
        assert_eq!(dense[(0, 1)], -1.0);
    }
}
