//! k-d tree over the trained codebook for batch BMU assignment.
//!
//! The tree is built once from a snapshot of the final codebook and then
//! answers two-nearest-unit queries for every sample. Queries are
//! independent per sample and run in parallel; a brute-force all-pairs
//! scan would be quadratic in unit count times sample count.

use std::cmp::Ordering;

use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopogramError};
use crate::map::distance::minkowski_distance;

/// Nearest and second-nearest unit for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmuRecord {
    /// Index of the best-matching unit.
    pub first: usize,
    /// Input-space distance to the best-matching unit.
    pub first_dist: f64,
    /// Index and distance of the second-best unit; `None` on single-unit
    /// maps.
    pub second: Option<(usize, f64)>,
}

#[derive(Debug, Clone)]
struct Node {
    /// Row index into the point matrix.
    point: usize,
    /// Splitting axis at this depth.
    axis: usize,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

/// A k-d tree over a matrix of points with a Minkowski query norm.
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Array2<f64>,
    root: Option<Box<Node>>,
    norm: f64,
}

impl KdTree {
    /// Builds a balanced tree by median partitioning on cycling axes.
    ///
    /// `norm` is the Minkowski order used by queries and must be >= 1.
    pub fn build(points: ArrayView2<'_, f64>, norm: f64) -> Result<Self> {
        if points.nrows() == 0 || points.ncols() == 0 {
            return Err(TopogramError::EmptyInput(
                "cannot index an empty point set".to_string(),
            ));
        }
        if !norm.is_finite() || norm < 1.0 {
            return Err(TopogramError::Config(format!(
                "Minkowski norm order must be >= 1, got {norm}"
            )));
        }

        let points = points.to_owned();
        let mut indices: Vec<usize> = (0..points.nrows()).collect();
        let root = build_node(&points, &mut indices, 0);
        Ok(Self { points, root, norm })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    /// Whether the tree is empty. Never true for a built tree.
    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// The two nearest units to `query`, nearest first.
    ///
    /// Equal distances resolve towards the lower unit index, so the result
    /// is deterministic regardless of tree layout.
    pub fn nearest_two(&self, query: ArrayView1<'_, f64>) -> BmuRecord {
        let mut best = BestTwo::default();
        self.search(self.root.as_deref(), query, &mut best);

        let (first, first_dist) = best.first.expect("built tree holds at least one point");
        BmuRecord {
            first,
            first_dist,
            second: best.second,
        }
    }

    /// Assigns first and second BMUs to every sample row in parallel.
    pub fn assign(&self, data: ArrayView2<'_, f64>) -> Vec<BmuRecord> {
        (0..data.nrows())
            .into_par_iter()
            .map(|i| self.nearest_two(data.row(i)))
            .collect()
    }

    fn search(&self, node: Option<&Node>, query: ArrayView1<'_, f64>, best: &mut BestTwo) {
        let node = match node {
            Some(node) => node,
            None => return,
        };

        let point = self.points.row(node.point);
        best.offer(node.point, minkowski_distance(point, query, self.norm));

        let diff = query[node.axis] - point[node.axis];
        let (near, far) = if diff < 0.0 {
            (node.left.as_deref(), node.right.as_deref())
        } else {
            (node.right.as_deref(), node.left.as_deref())
        };

        self.search(near, query, best);
        // The axis offset lower-bounds the Minkowski distance for any
        // order >= 1; <= keeps equal-distance candidates reachable so the
        // index tie-break stays exact.
        if diff.abs() <= best.worst() {
            self.search(far, query, best);
        }
    }
}

fn build_node(points: &Array2<f64>, indices: &mut [usize], depth: usize) -> Option<Box<Node>> {
    if indices.is_empty() {
        return None;
    }
    let axis = depth % points.ncols();
    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| {
        points[[a, axis]]
            .partial_cmp(&points[[b, axis]])
            .unwrap_or(Ordering::Equal)
    });

    let point = indices[mid];
    let (left, rest) = indices.split_at_mut(mid);
    let right = &mut rest[1..];

    Some(Box::new(Node {
        point,
        axis,
        left: build_node(points, left, depth + 1),
        right: build_node(points, right, depth + 1),
    }))
}

/// Running best-two candidates ordered by (distance, index).
#[derive(Debug, Default)]
struct BestTwo {
    first: Option<(usize, f64)>,
    second: Option<(usize, f64)>,
}

impl BestTwo {
    fn offer(&mut self, index: usize, dist: f64) {
        let candidate = (index, dist);
        match self.first {
            None => self.first = Some(candidate),
            Some(first) if precedes(candidate, first) => {
                self.second = Some(first);
                self.first = Some(candidate);
            }
            Some(_) => match self.second {
                None => self.second = Some(candidate),
                Some(second) if precedes(candidate, second) => {
                    self.second = Some(candidate);
                }
                Some(_) => {}
            },
        }
    }

    fn worst(&self) -> f64 {
        match self.second {
            Some((_, dist)) => dist,
            None => f64::INFINITY,
        }
    }
}

fn precedes(a: (usize, f64), b: (usize, f64)) -> bool {
    a.1 < b.1 || (a.1 == b.1 && a.0 < b.0)
}
