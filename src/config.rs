//! Configuration for the topogram SOM engine.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopogramError};

/// Output-space topology of the unit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Units laid out on a 2D grid; unit-to-unit distance is Euclidean.
    Rectangular,
    /// Units laid out on a hexagonal grid addressed by cube coordinates;
    /// unit-to-unit distance is the hex step count (halved Manhattan
    /// distance over the cube coordinates).
    Hexagonal,
}

/// Neighborhood kernel used to weight codebook updates around the BMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborhoodKernel {
    /// Gaussian density over the output-space distance, rescaled into [0, 1].
    Gauss,
}

/// Input-space distance between samples and codebook weight vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputDistance {
    /// Euclidean (L2) distance.
    Euclidean,
}

/// Configuration of a SOM instance.
///
/// Validated once at construction; the strategy enums are resolved there
/// instead of being re-inspected by downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Output-space topology of the unit grid.
    pub topology: Topology,

    /// Map height in units. Must be positive.
    pub height: usize,

    /// Map width in units. Must be positive.
    pub width: usize,

    /// Neighborhood radius; for the Gauss kernel this is the standard
    /// deviation of the density. Must be positive and finite.
    pub neighborhood_radius: f64,

    /// Neighborhood kernel.
    pub kernel: NeighborhoodKernel,

    /// Input-space distance measure.
    pub input_distance: InputDistance,
}

impl MapConfig {
    /// Convenience constructor for a rectangular map with the default
    /// Gauss kernel and Euclidean input distance.
    pub fn rectangular(height: usize, width: usize, neighborhood_radius: f64) -> Self {
        Self {
            topology: Topology::Rectangular,
            height,
            width,
            neighborhood_radius,
            kernel: NeighborhoodKernel::Gauss,
            input_distance: InputDistance::Euclidean,
        }
    }

    /// Convenience constructor for a hexagonal map with the default
    /// Gauss kernel and Euclidean input distance.
    pub fn hexagonal(height: usize, width: usize, neighborhood_radius: f64) -> Self {
        Self {
            topology: Topology::Hexagonal,
            ..Self::rectangular(height, width, neighborhood_radius)
        }
    }

    /// Returns the total number of units on the map.
    #[inline]
    pub fn units(&self) -> usize {
        self.height * self.width
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(TopogramError::Config(format!(
                "map dimensions must be positive, got {}x{}",
                self.height, self.width
            )));
        }
        if !self.neighborhood_radius.is_finite() || self.neighborhood_radius <= 0.0 {
            return Err(TopogramError::Config(format!(
                "neighborhood radius must be positive, got {}",
                self.neighborhood_radius
            )));
        }
        Ok(())
    }
}

/// Per-call training parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainParams {
    /// Number of training iterations.
    /// Default: 10,000.
    pub iterations: usize,

    /// Initial learning rate; decays linearly towards zero over the
    /// iterations. Default: 0.95.
    pub alpha: f64,

    /// Seed for the sampling RNG and the codebook initializer.
    /// Default: 1.
    pub random_seed: u64,

    /// Externally supplied initial codebook of shape (units, n_features).
    /// Bypasses the range-based initializer when set.
    /// Default: None.
    pub codebook: Option<Array2<f64>>,

    /// Minkowski norm order for the post-training BMU assignment.
    /// Must be >= 1. Default: 2.0 (Euclidean).
    pub bmu_norm: f64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            alpha: 0.95,
            random_seed: 1,
            codebook: None,
            bmu_norm: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_train_params() {
        let params = TrainParams::default();
        assert_eq!(params.iterations, 10_000);
        assert!((params.alpha - 0.95).abs() < 1e-12);
        assert_eq!(params.random_seed, 1);
        assert!(params.codebook.is_none());
        assert!((params.bmu_norm - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_units() {
        let config = MapConfig::rectangular(50, 40, 5.0);
        assert_eq!(config.units(), 2000);
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        assert!(MapConfig::rectangular(0, 10, 1.0).validate().is_err());
        assert!(MapConfig::rectangular(10, 0, 1.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_radius() {
        assert!(MapConfig::rectangular(4, 4, 0.0).validate().is_err());
        assert!(MapConfig::rectangular(4, 4, -1.0).validate().is_err());
        assert!(MapConfig::rectangular(4, 4, f64::NAN).validate().is_err());
        assert!(MapConfig::hexagonal(4, 4, 1.0).validate().is_ok());
    }
}
