//! Vectorized distance functions for input space and output space.
//!
//! All functions here are pure and deterministic; the input-space variants
//! operate on a whole matrix of unit weight vectors at once.

use ndarray::{Array1, ArrayView1, ArrayView2, Zip};

/// Euclidean distance between every row of `matrix` and `vector`.
///
/// Returns an array of length `matrix.nrows()`.
pub fn euclid_distance(matrix: ArrayView2<'_, f64>, vector: ArrayView1<'_, f64>) -> Array1<f64> {
    let mut out = Array1::zeros(matrix.nrows());
    Zip::from(&mut out).and(matrix.rows()).for_each(|d, row| {
        *d = row
            .iter()
            .zip(vector.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt();
    });
    out
}

/// Hex-grid step count between every cube-coordinate row of `positions`
/// and the cube coordinate `position`: the Manhattan distance over
/// (q, r, s) divided by two.
pub fn hex_distance(positions: ArrayView2<'_, f64>, position: ArrayView1<'_, f64>) -> Array1<f64> {
    let mut out = Array1::zeros(positions.nrows());
    Zip::from(&mut out).and(positions.rows()).for_each(|d, row| {
        *d = row
            .iter()
            .zip(position.iter())
            .map(|(a, b)| (a - b).abs())
            .sum::<f64>()
            / 2.0;
    });
    out
}

/// Minkowski distance of order `p` between two vectors.
///
/// `p` must be >= 1; `p == 2` takes a fast path without `powf`.
pub fn minkowski_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>, p: f64) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vector dimensions must match");

    if (p - 2.0).abs() < f64::EPSILON {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    } else {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs().powf(p))
            .sum::<f64>()
            .powf(1.0 / p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_euclid_distance() {
        let matrix = arr2(&[[0.0, 0.0], [3.0, 4.0], [1.0, 0.0]]);
        let vector = arr1(&[0.0, 0.0]);
        let d = euclid_distance(matrix.view(), vector.view());
        assert!((d[0] - 0.0).abs() < 1e-12);
        assert!((d[1] - 5.0).abs() < 1e-12);
        assert!((d[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hex_distance_neighbors() {
        // The six neighbors of the origin in cube coordinates.
        let neighbors = arr2(&[
            [1.0, -1.0, 0.0],
            [1.0, 0.0, -1.0],
            [0.0, 1.0, -1.0],
            [-1.0, 1.0, 0.0],
            [-1.0, 0.0, 1.0],
            [0.0, -1.0, 1.0],
        ]);
        let origin = arr1(&[0.0, 0.0, 0.0]);
        let d = hex_distance(neighbors.view(), origin.view());
        for &v in d.iter() {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hex_distance_two_steps() {
        let positions = arr2(&[[2.0, -1.0, -1.0]]);
        let origin = arr1(&[0.0, 0.0, 0.0]);
        let d = hex_distance(positions.view(), origin.view());
        assert!((d[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_minkowski_orders() {
        let a = arr1(&[0.0, 0.0]);
        let b = arr1(&[3.0, 4.0]);
        // p = 1 is Manhattan, p = 2 is Euclidean.
        assert!((minkowski_distance(a.view(), b.view(), 1.0) - 7.0).abs() < 1e-12);
        assert!((minkowski_distance(a.view(), b.view(), 2.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_minkowski_matches_euclid() {
        let matrix = arr2(&[[1.0, 2.0, 3.0]]);
        let v = arr1(&[-1.0, 0.5, 2.0]);
        let expected = euclid_distance(matrix.view(), v.view())[0];
        let got = minkowski_distance(matrix.row(0), v.view(), 2.0);
        assert!((expected - got).abs() < 1e-12);
    }
}
