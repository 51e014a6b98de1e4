//! Map quality metrics: quantization error variants and topographic error.
//!
//! All metrics are derived from the per-sample BMU assignment computed at
//! training completion, so they agree with each other by construction:
//! `qe == sum(qe_m)`, `mqe == qe / units`, `mmqe == mean(mqe_m)`.

use ndarray::Array1;

use crate::error::{Result, TopogramError};
use crate::index::BmuRecord;
use crate::map::grid::adjacent;
use crate::map::Som;

fn trained_records(som: &Som) -> Result<&[BmuRecord]> {
    som.bmu_records()
        .ok_or_else(|| TopogramError::Training("map has not been trained".to_string()))
}

/// Quantization error per unit: the sum of input-space distances between a
/// unit's weight vector and the samples whose first BMU it is. Units with
/// no assigned samples get 0.
pub fn qe_m(som: &Som) -> Result<Array1<f64>> {
    let records = trained_records(som)?;
    let mut result = Array1::zeros(som.units());
    for record in records {
        result[record.first] += record.first_dist;
    }
    Ok(result)
}

/// Mean quantization error per unit: `qe(m)` divided by the number of
/// samples assigned to the unit. Units with no assigned samples get 0.
pub fn mqe_m(som: &Som) -> Result<Array1<f64>> {
    let records = trained_records(som)?;
    let mut sums = Array1::<f64>::zeros(som.units());
    let mut counts = vec![0usize; som.units()];
    for record in records {
        sums[record.first] += record.first_dist;
        counts[record.first] += 1;
    }
    for (sum, &count) in sums.iter_mut().zip(counts.iter()) {
        if count > 0 {
            *sum /= count as f64;
        }
    }
    Ok(sums)
}

/// Map quantization error: the sum of `qe(m)` over all units.
pub fn qe(som: &Som) -> Result<f64> {
    Ok(qe_m(som)?.sum())
}

/// Mean map quantization error: `QE` divided by the unit count.
pub fn mqe(som: &Som) -> Result<f64> {
    Ok(qe(som)? / som.units() as f64)
}

/// Mean of the per-unit mean quantization errors.
pub fn mmqe(som: &Som) -> Result<f64> {
    let per_unit = mqe_m(som)?;
    Ok(per_unit.sum() / per_unit.len() as f64)
}

/// Topographic error: the fraction of samples whose first and second BMU
/// are not adjacent on the map.
///
/// Adjacency is one grid step in the output topology (Euclidean distance 1
/// on rectangular maps, hex step count 1 on hexagonal maps). The result
/// lies in [0, 1]; lower is better. A single-unit map has no topology to
/// violate and yields 0.
pub fn topographic_error(som: &Som) -> Result<f64> {
    let records = trained_records(som)?;
    if som.units() == 1 {
        return Ok(0.0);
    }

    let topology = som.config().topology;
    let positions = som.positions();
    let errors = records
        .iter()
        .filter(|record| {
            let is_adjacent = record.second.map_or(false, |(second, _)| {
                adjacent(topology, positions.row(record.first), positions.row(second))
            });
            !is_adjacent
        })
        .count();

    Ok(errors as f64 / records.len() as f64)
}
