//! The SOM instance: construction, training state machine, and query
//! surfaces for downstream consumers.

use std::collections::HashMap;

use log::info;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{MapConfig, TrainParams};
use crate::error::{Result, TopogramError};
use crate::index::{BmuRecord, KdTree};
use crate::map::codebook::init_codebook;
use crate::map::grid::generate_positions;
use crate::map::training::{decay_schedule, run};

/// A self-organizing map.
///
/// Construction fixes the topology, the unit position table, and the
/// kernel and distance strategies. [`Som::train`] fits the codebook to a
/// dataset and computes the per-sample BMU assignment; until it completes,
/// the query methods return `None` so callers can poll the training state.
///
/// A `Som` owns its codebook exclusively and is not safe for concurrent
/// training calls on the same instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Som {
    config: MapConfig,
    positions: Array2<f64>,
    codebook: Option<Array2<f64>>,
    assignment: Option<Vec<BmuRecord>>,
    trained: bool,
}

impl Som {
    /// Creates an untrained SOM. Fails on invalid configuration.
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let positions = generate_positions(config.topology, config.height, config.width);
        Ok(Self {
            config,
            positions,
            codebook: None,
            assignment: None,
            trained: false,
        })
    }

    /// Returns the total number of units on the map.
    #[inline]
    pub fn units(&self) -> usize {
        self.config.units()
    }

    /// Returns the map configuration.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Fits the codebook to `data` with the iterative Kohonen algorithm.
    ///
    /// One sample is drawn uniformly at random with replacement per
    /// iteration; the learning rate and the neighborhood radius decay
    /// linearly from their start values towards zero over the iteration
    /// count. BMU ties are broken towards the lowest unit index. On loop
    /// completion the full dataset is assigned to its nearest and
    /// second-nearest units under the configured Minkowski norm and the
    /// map transitions to the trained state.
    ///
    /// All preconditions are checked before any state is touched; on
    /// failure the map remains untrained. Retraining replaces the codebook
    /// and the BMU assignment wholesale.
    pub fn train(&mut self, data: &Array2<f64>, params: TrainParams) -> Result<()> {
        self.check_preconditions(data, &params)?;

        let mut rng = ChaCha8Rng::seed_from_u64(params.random_seed);
        let mut codebook = match params.codebook {
            Some(codebook) => codebook,
            None => init_codebook(self.units(), data.view(), &mut rng)?,
        };

        let alphas = decay_schedule(params.alpha, params.iterations);
        let radii = decay_schedule(self.config.neighborhood_radius, params.iterations);

        info!(
            "training SOM: {} units, {} samples, {} features, {} iterations",
            self.units(),
            data.nrows(),
            data.ncols(),
            params.iterations
        );

        run(
            &mut codebook,
            self.positions.view(),
            &self.config,
            data.view(),
            &alphas,
            &radii,
            &mut rng,
        );

        let tree = KdTree::build(codebook.view(), params.bmu_norm)?;
        let assignment = tree.assign(data.view());

        info!("training completed: {} samples assigned", assignment.len());

        self.codebook = Some(codebook);
        self.assignment = Some(assignment);
        self.trained = true;
        Ok(())
    }

    fn check_preconditions(&self, data: &Array2<f64>, params: &TrainParams) -> Result<()> {
        if params.iterations == 0 {
            return Err(TopogramError::Training(
                "iterations must be positive".to_string(),
            ));
        }
        if !params.alpha.is_finite() || params.alpha <= 0.0 {
            return Err(TopogramError::Training(format!(
                "learning rate must be positive, got {}",
                params.alpha
            )));
        }
        if !params.bmu_norm.is_finite() || params.bmu_norm < 1.0 {
            return Err(TopogramError::Training(format!(
                "Minkowski norm order must be >= 1, got {}",
                params.bmu_norm
            )));
        }
        if data.nrows() == 0 {
            return Err(TopogramError::EmptyInput(
                "training data has no samples".to_string(),
            ));
        }
        if data.ncols() == 0 {
            return Err(TopogramError::EmptyInput(
                "training data has no feature columns".to_string(),
            ));
        }
        if let Some(codebook) = &params.codebook {
            if codebook.nrows() != self.units() {
                return Err(TopogramError::DimensionMismatch {
                    expected: self.units(),
                    actual: codebook.nrows(),
                });
            }
            if codebook.ncols() != data.ncols() {
                return Err(TopogramError::DimensionMismatch {
                    expected: data.ncols(),
                    actual: codebook.ncols(),
                });
            }
        }
        Ok(())
    }

    /// Whether training has completed.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// The trained codebook, or `None` if the map has not been trained.
    pub fn codebook(&self) -> Option<&Array2<f64>> {
        if self.trained {
            self.codebook.as_ref()
        } else {
            None
        }
    }

    /// The fixed unit position table: shape (units, 2) for rectangular
    /// maps, (units, 3) cube coordinates for hexagonal maps.
    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    /// Per-sample BMU assignment records in dataset order, or `None`
    /// before training. The records reflect the codebook snapshot at
    /// training completion and go stale if the map is retrained.
    pub fn bmu_records(&self) -> Option<&[BmuRecord]> {
        if self.trained {
            self.assignment.as_deref()
        } else {
            None
        }
    }

    /// Sample indices grouped by their first BMU, or `None` before
    /// training. Units with no assigned samples have no entry.
    pub fn first_bmus(&self) -> Option<HashMap<usize, Vec<usize>>> {
        let records = self.bmu_records()?;
        let mut grouped: HashMap<usize, Vec<usize>> = HashMap::new();
        for (sample, record) in records.iter().enumerate() {
            grouped.entry(record.first).or_default().push(sample);
        }
        Some(grouped)
    }

    /// Sample indices grouped by their second BMU, or `None` before
    /// training. Empty on single-unit maps, which have no second BMU.
    pub fn second_bmus(&self) -> Option<HashMap<usize, Vec<usize>>> {
        let records = self.bmu_records()?;
        let mut grouped: HashMap<usize, Vec<usize>> = HashMap::new();
        for (sample, record) in records.iter().enumerate() {
            if let Some((unit, _)) = record.second {
                grouped.entry(unit).or_default().push(sample);
            }
        }
        Some(grouped)
    }

    /// Per-unit count of samples whose first BMU is that unit, or `None`
    /// before training.
    pub fn hits(&self) -> Option<Array1<usize>> {
        let records = self.bmu_records()?;
        let mut hits = Array1::zeros(self.units());
        for record in records {
            hits[record.first] += 1;
        }
        Some(hits)
    }
}
