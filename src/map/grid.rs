//! Unit position generation and output-space geometry for the two grid
//! topologies.
//!
//! The position table is computed once at map construction and never
//! mutated; its row order defines the unit index, which downstream BMU
//! lookups and visualization consumers rely on.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::config::Topology;
use crate::map::distance::{euclid_distance, hex_distance};

/// Tolerance for comparing integer-valued output-space distances.
const ADJACENCY_TOL: f64 = 1e-9;

/// Generate the fixed unit position table for a map of the given size.
///
/// Rectangular maps yield (row, col) pairs in row-major order, shape
/// (height * width, 2). Hexagonal maps yield cube coordinates (q, r, s):
/// for each q in `0..width`, r runs over
/// `-floor(q / 2) .. height - floor(q / 2)` with `s = -q - r`, shape
/// (height * width, 3). Every hexagonal triple satisfies q + r + s = 0.
pub fn generate_positions(topology: Topology, height: usize, width: usize) -> Array2<f64> {
    match topology {
        Topology::Rectangular => {
            let mut positions = Array2::zeros((height * width, 2));
            for r in 0..height {
                for c in 0..width {
                    let i = r * width + c;
                    positions[[i, 0]] = r as f64;
                    positions[[i, 1]] = c as f64;
                }
            }
            positions
        }
        Topology::Hexagonal => {
            let mut positions = Array2::zeros((height * width, 3));
            let mut i = 0;
            for q in 0..width as i64 {
                let shift = q / 2;
                for r in -shift..height as i64 - shift {
                    positions[[i, 0]] = q as f64;
                    positions[[i, 1]] = r as f64;
                    positions[[i, 2]] = (-q - r) as f64;
                    i += 1;
                }
            }
            positions
        }
    }
}

/// Output-space distance from every unit position to a single position.
pub fn output_distances(
    topology: Topology,
    positions: ArrayView2<'_, f64>,
    position: ArrayView1<'_, f64>,
) -> Array1<f64> {
    match topology {
        Topology::Rectangular => euclid_distance(positions, position),
        Topology::Hexagonal => hex_distance(positions, position),
    }
}

/// Output-space distance between two unit positions.
pub fn output_distance(topology: Topology, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    match topology {
        Topology::Rectangular => a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt(),
        Topology::Hexagonal => {
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).abs())
                .sum::<f64>()
                / 2.0
        }
    }
}

/// Whether two units are adjacent in the output topology, i.e. their
/// output-space distance is exactly one grid step.
pub fn adjacent(topology: Topology, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> bool {
    (output_distance(topology, a, b) - 1.0).abs() < ADJACENCY_TOL
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rectangular_positions_row_major() {
        let positions = generate_positions(Topology::Rectangular, 3, 4);
        assert_eq!(positions.shape(), &[12, 2]);
        // Unit (r, c) sits at position (r, c).
        for r in 0..3 {
            for c in 0..4 {
                let i = r * 4 + c;
                assert_eq!(positions[[i, 0]], r as f64);
                assert_eq!(positions[[i, 1]], c as f64);
            }
        }
    }

    #[test]
    fn test_hexagonal_positions_are_distinct_zero_sum_triples() {
        let (h, w) = (5, 7);
        let positions = generate_positions(Topology::Hexagonal, h, w);
        assert_eq!(positions.shape(), &[h * w, 3]);

        let mut seen = HashSet::new();
        for row in positions.rows() {
            let triple = (row[0] as i64, row[1] as i64, row[2] as i64);
            assert_eq!(triple.0 + triple.1 + triple.2, 0);
            assert!(seen.insert(triple), "duplicate position {triple:?}");
        }
        assert_eq!(seen.len(), h * w);
    }

    #[test]
    fn test_hexagonal_r_range_shifts_with_q() {
        let positions = generate_positions(Topology::Hexagonal, 4, 3);
        // q = 2 shifts the r range down by 1.
        let q2: Vec<i64> = positions
            .rows()
            .into_iter()
            .filter(|row| row[0] as i64 == 2)
            .map(|row| row[1] as i64)
            .collect();
        assert_eq!(q2, vec![-1, 0, 1, 2]);
    }

    #[test]
    fn test_rectangular_adjacency() {
        let positions = generate_positions(Topology::Rectangular, 3, 3);
        // Unit 4 is the center of the 3x3 grid; 4-neighbors are adjacent,
        // diagonals are not.
        assert!(adjacent(Topology::Rectangular, positions.row(4), positions.row(1)));
        assert!(adjacent(Topology::Rectangular, positions.row(4), positions.row(3)));
        assert!(!adjacent(Topology::Rectangular, positions.row(4), positions.row(0)));
        assert!(!adjacent(Topology::Rectangular, positions.row(4), positions.row(4)));
    }

    #[test]
    fn test_hexagonal_adjacency() {
        let positions = generate_positions(Topology::Hexagonal, 3, 3);
        // Units 0 and 1 differ by one hex step along r.
        assert!(adjacent(Topology::Hexagonal, positions.row(0), positions.row(1)));
        assert!(!adjacent(Topology::Hexagonal, positions.row(0), positions.row(2)));
    }

    #[test]
    fn test_output_distances_matches_pairwise() {
        for topology in [Topology::Rectangular, Topology::Hexagonal] {
            let positions = generate_positions(topology, 4, 4);
            let all = output_distances(topology, positions.view(), positions.row(5));
            for (i, row) in positions.rows().into_iter().enumerate() {
                let pairwise = output_distance(topology, row, positions.row(5));
                assert!((all[i] - pairwise).abs() < 1e-12);
            }
        }
    }
}
