// Route models: tours, traversal records and search-tree nodes

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{Km, PointIdx};

/// Ordered visit of point indices with its unrounded length
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Sequence of distinct point indices (open, no return leg)
    pub order: Vec<PointIdx>,

    /// Total length in km
    pub length: Km,
}

impl Tour {
    pub fn new(order: Vec<PointIdx>, length: Km) -> Self {
        Self { order, length }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }
}

/// Named route as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Point names in visiting order
    pub route: Vec<String>,

    /// Total distance, rounded to whole kilometres
    pub total_km: f64,
}

impl RouteResult {
    pub fn new(route: Vec<String>, length: Km) -> Self {
        Self {
            route,
            total_km: length.round(),
        }
    }
}

/// Outcome of a breadth-first level traversal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversalResult {
    pub start: String,
    pub threshold_km: f64,

    /// Names in dequeue order
    pub visit_order: Vec<String>,

    /// Level index to names, in discovery order
    pub levels: BTreeMap<usize, Vec<String>>,

    /// Names never reached, in point order
    pub unreached: Vec<String>,
}

/// Frontier entry of the branch-and-bound search. Each node owns its own
/// copy of the partial tour and visited flags.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub partial_tour: Vec<PointIdx>,
    pub visited: Vec<bool>,
    pub cost_so_far: Km,
    pub lower_bound_remaining: Km,

    /// Creation counter, used to break ties in insertion order
    pub seq: u64,
}

impl SearchNode {
    pub fn estimated_total(&self) -> Km {
        self.cost_so_far + self.lower_bound_remaining
    }

    pub fn last(&self) -> Option<PointIdx> {
        self.partial_tour.last().copied()
    }
}

// Ordering for a min-priority BinaryHeap on the estimated total.
// Reversed so the smallest estimate (then the oldest node) pops first.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_total()
            .total_cmp(&self.estimated_total())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn node(cost: f64, bound: f64, seq: u64) -> SearchNode {
        SearchNode {
            partial_tour: vec![0],
            visited: vec![true, false],
            cost_so_far: cost,
            lower_bound_remaining: bound,
            seq,
        }
    }

    #[test]
    fn test_search_node_ordering() {
        let cheap = node(10.0, 5.0, 1);
        let dear = node(10.0, 8.0, 0);

        // In a min-heap, the lesser estimate comes first
        assert!(cheap > dear);

        let mut heap = BinaryHeap::new();
        heap.push(dear);
        heap.push(node(1.0, 1.0, 3));
        heap.push(cheap);
        heap.push(node(1.0, 1.0, 2));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop()).map(|n| n.seq).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_route_result_rounds() {
        let result = RouteResult::new(vec!["A".into(), "B".into()], 1234.56);
        assert_eq!(result.total_km, 1235.0);
    }
}
