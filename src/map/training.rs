//! Decay schedules and the sequential SOM training loop.
//!
//! The loop is strictly sequential across iterations; within one iteration
//! the distance computation, neighborhood weighting, and codebook update
//! are vectorized across all units.

use log::info;
use ndarray::{Array2, ArrayView1, ArrayView2, Zip};
use rand::Rng;

use crate::config::{InputDistance, MapConfig, NeighborhoodKernel};
use crate::map::distance::euclid_distance;
use crate::map::grid::output_distances;
use crate::map::neighborhood::gauss_neighborhood;

/// Linearly spaced decay schedule from `start` down to zero (inclusive),
/// one value per iteration. A single-iteration schedule is just `[start]`.
///
/// The sequence is monotonically non-increasing and non-negative; the
/// kernel clamps the radius when the final value of zero is reached.
pub fn decay_schedule(start: f64, iterations: usize) -> Vec<f64> {
    if iterations <= 1 {
        return vec![start; iterations];
    }
    let last = (iterations - 1) as f64;
    (0..iterations)
        .map(|i| start * (1.0 - i as f64 / last))
        .collect()
}

/// Index of the smallest value; ties resolve to the first occurrence.
pub(crate) fn argmin(values: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v < best_value {
            best_value = v;
            best = i;
        }
    }
    best
}

/// One vectorized update step: `m_i += alpha * h_i * (x - m_i)` for all
/// units simultaneously. No unit's update depends on another's within the
/// same step.
pub(crate) fn update_codebook(
    codebook: &mut Array2<f64>,
    sample: ArrayView1<'_, f64>,
    weights: ArrayView1<'_, f64>,
    alpha: f64,
) {
    Zip::from(codebook.rows_mut())
        .and(weights)
        .for_each(|mut unit, &h| {
            let pull = alpha * h;
            Zip::from(&mut unit).and(sample).for_each(|w, &x| {
                *w += pull * (x - *w);
            });
        });
}

/// Run the training loop over `codebook` in place.
///
/// Each iteration draws one sample uniformly at random with replacement,
/// finds the BMU under the configured input-space distance, and pulls
/// every unit towards the sample weighted by the neighborhood kernel and
/// the decaying learning rate.
pub(crate) fn run<R: Rng>(
    codebook: &mut Array2<f64>,
    positions: ArrayView2<'_, f64>,
    config: &MapConfig,
    data: ArrayView2<'_, f64>,
    alphas: &[f64],
    radii: &[f64],
    rng: &mut R,
) {
    let iterations = alphas.len();
    let n_samples = data.nrows();

    for t in 0..iterations {
        let sample = data.row(rng.gen_range(0..n_samples));

        let input_dist = match config.input_distance {
            InputDistance::Euclidean => euclid_distance(codebook.view(), sample),
        };
        let bmu = argmin(input_dist.view());

        let grid_dist = output_distances(config.topology, positions, positions.row(bmu));
        let weights = match config.kernel {
            NeighborhoodKernel::Gauss => gauss_neighborhood(grid_dist.view(), radii[t]),
        };

        update_codebook(codebook, sample, weights.view(), alphas[t]);

        if t % 10_000 == 0 || t + 1 == iterations {
            info!(
                "iteration {}/{}: alpha={:.4}, radius={:.2}",
                t + 1,
                iterations,
                alphas[t],
                radii[t]
            );
        }
    }
}
