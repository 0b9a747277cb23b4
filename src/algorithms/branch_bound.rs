use serde::Serialize;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::algorithms::heuristic::NearestNeighborTwoOpt;
use crate::algorithms::{names_of, TourSolver};
use crate::models::{Km, Point, PointIdx, RouteResult, SearchNode, Tour};
use crate::utils::distance::DistanceMatrix;
use crate::utils::lookup::NameIndex;
use crate::Result;

/// Budget and branching limits of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget, polled between frontier pops
    pub time_limit: Duration,

    /// Maximum number of frontier nodes to pop
    pub max_nodes: usize,

    /// Only the K nearest unvisited candidates are expanded; `None` expands all.
    /// A cap trades exactness for tractable search on larger instances.
    pub expansion_limit: Option<usize>,
}

impl SearchLimits {
    /// Size-tiered defaults: bigger instances get tighter budgets and a
    /// smaller branching factor.
    pub fn for_size(n: usize) -> Self {
        let (time_limit, max_nodes) = if n > 20 {
            (Duration::from_secs(3), 15_000)
        } else if n > 15 {
            (Duration::from_secs(5), 30_000)
        } else {
            (Duration::from_secs(10), 100_000)
        };
        let expansion_limit = if n > 20 {
            Some(4)
        } else if n > 15 {
            Some(5)
        } else if n > 10 {
            Some(7)
        } else {
            None
        };
        Self {
            time_limit,
            max_nodes,
            expansion_limit,
        }
    }
}

/// Counters reported alongside the best tour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped from the frontier
    pub explored: usize,
    /// Nodes discarded by the bound, on push or on pop
    pub pruned: usize,
    /// Times a complete tour beat the incumbent
    pub improvements: usize,
    /// The search stopped on its time or node budget, so the tour may be
    /// suboptimal. This is a normal outcome, not an error.
    pub budget_exhausted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub tour: Tour,
    pub stats: SearchStats,
}

/// Best-first branch and bound over partial open tours from a fixed origin,
/// seeded with the 2-opt heuristic tour from the same origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound {
    limits: Option<SearchLimits>,
}

impl BranchAndBound {
    /// Solver using `SearchLimits::for_size` for every instance
    pub fn new() -> Self {
        Self { limits: None }
    }

    /// Solver with fixed limits regardless of instance size
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            limits: Some(limits),
        }
    }

    pub fn limits_for(&self, n: usize) -> SearchLimits {
        self.limits.unwrap_or_else(|| SearchLimits::for_size(n))
    }

    /// Exact tour by name. A blank or absent origin means the first point;
    /// an unknown one is `NotFound`. The cost is rounded to whole km.
    pub fn solve(&self, points: &[Point], origin: Option<&str>) -> Result<(RouteResult, SearchStats)> {
        let origin_idx = match origin.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => NameIndex::new(points).find(name)?,
            None => 0,
        };
        let matrix = DistanceMatrix::from_points(points);
        let outcome = self.search(&matrix, origin_idx);

        log::info!(
            "branch-bound: n={} km={:.0} explored={} pruned={} improvements={} budget_exhausted={}",
            points.len(),
            outcome.tour.length,
            outcome.stats.explored,
            outcome.stats.pruned,
            outcome.stats.improvements,
            outcome.stats.budget_exhausted
        );

        Ok((
            RouteResult::new(names_of(points, &outcome.tour.order), outcome.tour.length),
            outcome.stats,
        ))
    }

    /// Runs the search from `origin`, returning the best tour found when the
    /// frontier empties or the budget runs out.
    pub fn search(&self, matrix: &DistanceMatrix, origin: PointIdx) -> SearchOutcome {
        let n = matrix.len();
        let mut stats = SearchStats::default();
        match n {
            0 => return SearchOutcome { tour: Tour::empty(), stats },
            1 => return SearchOutcome { tour: Tour::new(vec![0], 0.0), stats },
            _ => {}
        }

        let limits = self.limits_for(n);
        let started = Instant::now();

        let mut best = NearestNeighborTwoOpt::new().tour_from(matrix, origin);
        log::debug!("branch-bound: seed km={:.1} limits={limits:?}", best.length);

        let mut seq = 0u64;
        let mut frontier = BinaryHeap::new();
        let mut visited = vec![false; n];
        visited[origin] = true;
        let root_bound = lower_bound(matrix, &visited, origin);
        frontier.push(SearchNode {
            partial_tour: vec![origin],
            visited,
            cost_so_far: 0.0,
            lower_bound_remaining: root_bound,
            seq,
        });

        while !frontier.is_empty() {
            if started.elapsed() > limits.time_limit || stats.explored >= limits.max_nodes {
                stats.budget_exhausted = true;
                break;
            }
            let Some(node) = frontier.pop() else { break };
            stats.explored += 1;

            if node.estimated_total() >= best.length {
                stats.pruned += 1;
                continue;
            }

            if node.partial_tour.len() == n {
                if node.cost_so_far < best.length {
                    best = Tour::new(node.partial_tour, node.cost_so_far);
                    stats.improvements += 1;
                    log::debug!(
                        "branch-bound: improved km={:.1} after {} nodes",
                        best.length,
                        stats.explored
                    );
                }
                continue;
            }

            let Some(last) = node.last() else { continue };
            for next in expansion_candidates(matrix, &node.visited, last, limits.expansion_limit) {
                let cost = node.cost_so_far + matrix.get(last, next);

                let mut visited = node.visited.clone();
                visited[next] = true;
                let bound = lower_bound(matrix, &visited, next);

                if cost + bound < best.length {
                    let mut partial_tour = node.partial_tour.clone();
                    partial_tour.push(next);
                    seq += 1;
                    frontier.push(SearchNode {
                        partial_tour,
                        visited,
                        cost_so_far: cost,
                        lower_bound_remaining: bound,
                        seq,
                    });
                } else {
                    stats.pruned += 1;
                }
            }
        }

        SearchOutcome { tour: best, stats }
    }
}

impl TourSolver for BranchAndBound {
    fn name(&self) -> &'static str {
        "Branch & Bound"
    }

    fn solve_tour(&self, matrix: &DistanceMatrix, origin: Option<PointIdx>) -> Tour {
        self.search(matrix, origin.unwrap_or(0)).tour
    }
}

/// Unvisited points ordered by distance from `last` (ties by index),
/// truncated to the expansion limit.
fn expansion_candidates(
    matrix: &DistanceMatrix,
    visited: &[bool],
    last: PointIdx,
    limit: Option<usize>,
) -> Vec<PointIdx> {
    let row = matrix.row(last);
    let mut candidates: Vec<PointIdx> = (0..visited.len()).filter(|&j| !visited[j]).collect();
    candidates.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
    if let Some(k) = limit {
        candidates.truncate(k);
    }
    candidates
}

/// Admissible estimate of the cheapest open path that leaves `last` and
/// visits every unvisited point.
///
/// Every unvisited point contributes its two cheapest edges to the other
/// unvisited points or to `last`, and `last` contributes its cheapest edge
/// into the unvisited set. Halving the sum counts each edge once. The path
/// ends at one unvisited point with a single edge, so the largest second
/// edge is removed before halving.
pub fn lower_bound(matrix: &DistanceMatrix, visited: &[bool], last: PointIdx) -> Km {
    let unvisited: Vec<PointIdx> = (0..visited.len()).filter(|&j| !visited[j]).collect();
    match unvisited.len() {
        0 => return 0.0,
        1 => return matrix.get(last, unvisited[0]),
        _ => {}
    }

    let mut total = unvisited
        .iter()
        .map(|&j| matrix.get(last, j))
        .fold(f64::INFINITY, f64::min);
    let mut largest_second: Km = 0.0;

    for &i in &unvisited {
        let mut min1 = matrix.get(i, last);
        let mut min2 = f64::INFINITY;
        for &j in &unvisited {
            if j == i {
                continue;
            }
            let d = matrix.get(i, j);
            if d < min1 {
                min2 = min1;
                min1 = d;
            } else if d < min2 {
                min2 = d;
            }
        }
        total += min1 + min2;
        largest_second = largest_second.max(min2);
    }

    (total - largest_second) / 2.0
}
