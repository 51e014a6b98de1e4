//! Neighborhood kernel for SOM training.

use ndarray::{Array1, ArrayView1};

/// Floor applied to the kernel standard deviation so the density stays
/// finite when the radius schedule reaches zero on the final iteration.
pub const SIGMA_FLOOR: f64 = 1e-9;

/// Gaussian neighborhood weights in [0, 1] for the given output-space
/// distances from the BMU and radius `sigma`.
///
/// The unnormalized Gaussian density `exp(-d^2 / (2 sigma^2))` is computed
/// per unit and then rescaled linearly via `(v - min) / (max - min)`, so
/// the minimum-distance unit (the BMU itself) maps to 1.0 and the farthest
/// unit maps to 0.0. If all distances are equal the rescale range is zero
/// and every unit gets weight 1.0.
pub fn gauss_neighborhood(distances: ArrayView1<'_, f64>, sigma: f64) -> Array1<f64> {
    let sigma = sigma.max(SIGMA_FLOOR);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let density = distances.mapv(|d| (-d * d / two_sigma_sq).exp());

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in density.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    let range = max - min;
    if range <= f64::EPSILON {
        return Array1::ones(distances.len());
    }
    density.mapv(|v| (v - min) / range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_bmu_gets_full_weight_and_farthest_gets_none() {
        let distances = arr1(&[0.0, 1.0, 2.0, 5.0]);
        let weights = gauss_neighborhood(distances.view(), 2.0);
        assert!((weights[0] - 1.0).abs() < 1e-12);
        assert!((weights[3] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_decrease_with_distance() {
        let distances = arr1(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let weights = gauss_neighborhood(distances.view(), 1.5);
        for pair in weights.as_slice().unwrap().windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_degenerate_distances_yield_uniform_weight() {
        // A single-unit map, or all units equidistant from the BMU.
        let single = arr1(&[0.0]);
        assert_eq!(gauss_neighborhood(single.view(), 1.0)[0], 1.0);

        let equal = arr1(&[2.0, 2.0, 2.0]);
        let weights = gauss_neighborhood(equal.view(), 1.0);
        assert!(weights.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_zero_sigma_is_clamped() {
        let distances = arr1(&[0.0, 1.0, 2.0]);
        let weights = gauss_neighborhood(distances.view(), 0.0);
        assert!(weights.iter().all(|w| w.is_finite()));
        assert!((weights[0] - 1.0).abs() < 1e-12);
        // Everything but the BMU collapses to zero influence.
        assert!(weights[1].abs() < 1e-12);
        assert!(weights[2].abs() < 1e-12);
    }

    #[test]
    fn test_weights_stay_in_unit_interval() {
        let distances = arr1(&[0.5, 1.5, 7.0, 3.0, 0.0]);
        let weights = gauss_neighborhood(distances.view(), 2.5);
        assert!(weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
    }
}
