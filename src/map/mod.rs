//! Self-Organizing Map construction and training.
//!
//! The pieces compose bottom-up: [`grid`] fixes the unit positions,
//! [`codebook`] initializes the weight matrix from the data's feature
//! ranges, [`distance`] and [`neighborhood`] supply the vectorized
//! per-iteration kernels, and [`training`] drives the sequential loop.
//! [`Som`] ties them together behind the query surfaces downstream
//! consumers use.

pub mod codebook;
pub mod distance;
pub mod grid;
pub mod neighborhood;
mod som;
pub mod training;

pub use som::Som;
