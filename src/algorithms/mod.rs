pub mod bfs;
pub mod branch_bound;
pub mod dijkstra;
pub mod heuristic;

// Common algorithm traits
use crate::models::{Point, PointIdx, RouteResult, Tour};
use crate::utils::distance::DistanceMatrix;
use crate::utils::lookup::NameIndex;
use crate::Result;

/// Solvers producing an open tour over every point
pub trait TourSolver {
    /// Human-readable algorithm name
    fn name(&self) -> &'static str;

    /// Computes a tour. With `origin` set the tour starts there; otherwise
    /// the solver chooses its own start.
    fn solve_tour(&self, matrix: &DistanceMatrix, origin: Option<PointIdx>) -> Tour;

    /// Resolves `origin` by name, builds the matrix and names the result.
    /// A blank or missing origin lets the solver choose.
    fn route(&self, points: &[Point], origin: Option<&str>) -> Result<RouteResult> {
        let origin = match origin.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => Some(NameIndex::new(points).find(name)?),
            None => None,
        };
        let matrix = DistanceMatrix::from_points(points);
        let tour = self.solve_tour(&matrix, origin);
        log::info!(
            "{}: n={} km={:.0}",
            self.name(),
            points.len(),
            tour.length
        );
        Ok(RouteResult::new(names_of(points, &tour.order), tour.length))
    }
}

/// Names of the points at the given indices, in order
pub fn names_of(points: &[Point], order: &[PointIdx]) -> Vec<String> {
    order.iter().map(|&i| points[i].name.clone()).collect()
}

/// Greedy open tour from `start`: always move to the nearest unvisited
/// point, ties going to the lowest index.
pub fn nearest_neighbor(matrix: &DistanceMatrix, start: PointIdx) -> Vec<PointIdx> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = start;
    visited[current] = true;
    order.push(current);

    for _ in 1..n {
        let mut best_next = None;
        let mut best_dist = f64::INFINITY;
        for (j, &d) in matrix.row(current).iter().enumerate() {
            if !visited[j] && (best_next.is_none() || d < best_dist) {
                best_dist = d;
                best_next = Some(j);
            }
        }
        let Some(next) = best_next else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}
