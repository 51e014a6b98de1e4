//! Spatial index for post-training BMU assignment.

mod kdtree;

pub use kdtree::{BmuRecord, KdTree};
