// Nearest-neighbour construction followed by 2-opt local search

use crate::algorithms::{nearest_neighbor, TourSolver};
use crate::models::{PointIdx, Tour};
use crate::utils::distance::DistanceMatrix;

/// Minimum gain for a 2-opt move; smaller gains are floating-point noise
pub const TWO_OPT_EPSILON: f64 = 1e-6;

/// Multi-start nearest neighbour + 2-opt heuristic for open tours
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborTwoOpt;

impl NearestNeighborTwoOpt {
    pub fn new() -> Self {
        Self
    }

    /// Nearest-neighbour tour from `start`, improved by 2-opt
    pub fn tour_from(&self, matrix: &DistanceMatrix, start: PointIdx) -> Tour {
        let order = two_opt(matrix, nearest_neighbor(matrix, start));
        let length = matrix.path_length(&order);
        Tour::new(order, length)
    }

    /// Best tour over every starting point; the lowest start wins ties
    pub fn best_tour(&self, matrix: &DistanceMatrix) -> Tour {
        let mut best: Option<Tour> = None;
        for start in 0..matrix.len() {
            let tour = self.tour_from(matrix, start);
            log::debug!("heuristic: start={start} km={:.1}", tour.length);
            if best.as_ref().map_or(true, |b| tour.length < b.length) {
                best = Some(tour);
            }
        }
        best.unwrap_or_else(Tour::empty)
    }
}

impl TourSolver for NearestNeighborTwoOpt {
    fn name(&self) -> &'static str {
        "Nearest Neighbor + 2-opt"
    }

    fn solve_tour(&self, matrix: &DistanceMatrix, origin: Option<PointIdx>) -> Tour {
        match origin {
            Some(start) => self.tour_from(matrix, start),
            None => self.best_tour(matrix),
        }
    }
}

/// 2-opt over an open tour. Reverses `order[i..=j]` whenever replacing the
/// edges `(i-1, i)` and `(j, j+1)` shortens the path, and repeats full
/// passes until none does. Both endpoints stay in place.
pub fn two_opt(matrix: &DistanceMatrix, mut order: Vec<PointIdx>) -> Vec<PointIdx> {
    let n = order.len();
    if n < 4 {
        return order;
    }

    let mut improved = true;
    while improved {
        improved = false;
        for i in 1..n - 2 {
            for j in i + 1..n - 1 {
                let (a, b) = (order[i - 1], order[i]);
                let (c, d) = (order[j], order[j + 1]);
                let delta = (matrix.get(a, c) + matrix.get(b, d))
                    - (matrix.get(a, b) + matrix.get(c, d));
                if delta < -TWO_OPT_EPSILON {
                    order[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn crossed_square() -> DistanceMatrix {
        // unit square corners, listed so the greedy path crosses itself
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 1.5, 1.0, 3.0],
            vec![1.0, 0.0, 1.0, 1.5, 3.0],
            vec![1.5, 1.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.5, 1.0, 0.0, 3.0],
            vec![3.0, 3.0, 1.0, 3.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_two_opt_uncrosses() {
        let matrix = crossed_square();
        // 0 -> 2 -> 1 -> 3 -> 4 uses both diagonals
        let before = vec![0, 2, 1, 3, 4];
        let after = two_opt(&matrix, before.clone());

        assert!(matrix.path_length(&after) < matrix.path_length(&before));
        assert_eq!(after[0], 0);
        assert_eq!(after[4], 4);
        let mut sorted = after.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_two_opt_short_tours_unchanged() {
        let matrix = crossed_square();
        assert_eq!(two_opt(&matrix, vec![2, 0, 1]), vec![2, 0, 1]);
        assert!(two_opt(&matrix, vec![]).is_empty());
    }

    #[test]
    fn test_best_tour_visits_every_point() {
        let pts: Vec<Point> = (0..7)
            .map(|i| Point::new(format!("P{i}"), (i * 7 % 5) as f64, (i * 3 % 7) as f64).unwrap())
            .collect();
        let matrix = DistanceMatrix::from_points(&pts);
        let solver = NearestNeighborTwoOpt::new();
        let tour = solver.best_tour(&matrix);

        let mut sorted = tour.order.clone();
        sorted.sort();
        assert_eq!(sorted, (0..7).collect::<Vec<_>>());
        assert!((tour.length - matrix.path_length(&tour.order)).abs() < 1e-9);

        for start in 0..7 {
            let greedy = nearest_neighbor(&matrix, start);
            let improved = solver.tour_from(&matrix, start);
            assert_eq!(improved.order[0], start);
            assert!(improved.length <= matrix.path_length(&greedy));
            assert!(tour.length <= improved.length);
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        let solver = NearestNeighborTwoOpt::new();
        let empty = DistanceMatrix::from_points(&[]);
        assert_eq!(solver.best_tour(&empty), Tour::empty());

        let one = DistanceMatrix::from_points(&[Point::new("Solo", 10.0, 10.0).unwrap()]);
        let tour = solver.best_tour(&one);
        assert_eq!(tour.order, vec![0]);
        assert_eq!(tour.length, 0.0);
    }
}
