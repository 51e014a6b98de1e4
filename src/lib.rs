//! # Topogram — Self-Organizing Map engine
//!
//! Topogram trains Kohonen self-organizing maps: unsupervised
//! vector-quantization models that project high-dimensional input vectors
//! onto a low-dimensional grid of units while preserving topological
//! neighborhood relations.
//!
//! ## Overview
//!
//! A map is a fixed grid of units (rectangular, or hexagonal in cube
//! coordinates), each owning a weight vector in the input space. Training
//! repeatedly draws a random sample, finds its best-matching unit (BMU),
//! and pulls the whole codebook towards the sample weighted by a decaying
//! Gaussian neighborhood. After the loop the full dataset is assigned to
//! its nearest and second-nearest units via a k-d tree, which feeds the
//! quality metrics.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use topogram::{quality, MapConfig, Som, TrainParams};
//!
//! let mut som = Som::new(MapConfig::rectangular(50, 50, 5.0))?;
//! som.train(&data, TrainParams::default())?;
//!
//! let codebook = som.codebook().expect("trained");
//! let te = quality::topographic_error(&som)?;
//! let qe = quality::qe(&som)?;
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - map configuration and training parameters
//! - [`map`] - codebook, topology, neighborhood kernel, training loop
//! - [`index`] - k-d tree for post-training BMU assignment
//! - [`quality`] - quantization and topographic error metrics

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod index;
pub mod map;
pub mod quality;

// Re-export commonly used types
pub use config::{InputDistance, MapConfig, NeighborhoodKernel, Topology, TrainParams};
pub use error::{Result, TopogramError};
pub use index::{BmuRecord, KdTree};
pub use map::Som;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
