//! Codebook initialization.

use ndarray::{Array2, ArrayView2, Axis};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Result, TopogramError};

/// Initialize a codebook of shape (units, n_features) with entry [i, f]
/// drawn uniformly from `[min_f, max_f)`, the observed range of feature f
/// across the dataset.
///
/// Keeping the initial weight vectors inside the data's support avoids
/// wasted early iterations pulling units into range. A degenerate feature
/// (min == max) initializes to that constant.
pub fn init_codebook<R: Rng>(
    units: usize,
    data: ArrayView2<'_, f64>,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if data.nrows() == 0 {
        return Err(TopogramError::EmptyInput(
            "cannot initialize a codebook from an empty dataset".to_string(),
        ));
    }
    if data.ncols() == 0 {
        return Err(TopogramError::EmptyInput(
            "dataset has no feature columns".to_string(),
        ));
    }

    let mins = data.fold_axis(Axis(0), f64::INFINITY, |acc, &v| acc.min(v));
    let maxs = data.fold_axis(Axis(0), f64::NEG_INFINITY, |acc, &v| acc.max(v));

    let unit_interval = Uniform::new(0.0, 1.0);
    let mut codebook = Array2::zeros((units, data.ncols()));
    for i in 0..units {
        for f in 0..data.ncols() {
            codebook[[i, f]] = mins[f] + unit_interval.sample(rng) * (maxs[f] - mins[f]);
        }
    }
    Ok(codebook)
}
