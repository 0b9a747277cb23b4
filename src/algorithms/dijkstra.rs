use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};

use crate::algorithms::names_of;
use crate::models::{Km, Point, PointIdx, RouteResult, Tour};
use crate::utils::distance::DistanceMatrix;
use crate::utils::lookup::NameIndex;
use crate::{Result, RouteError};

// Custom wrapper to make a distance totally ordered; the index breaks ties
#[derive(PartialEq, Copy, Clone, Debug)]
struct QueueKey(Km, PointIdx);

impl Eq for QueueKey {}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0).then_with(|| self.1.cmp(&other.1))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum-distance path between two named points over the complete graph.
/// The reported distance is rounded to whole kilometres.
pub fn shortest_path(points: &[Point], origin: &str, destination: &str) -> Result<RouteResult> {
    let index = NameIndex::new(points);
    let source = index.require(origin, "origin")?;
    let target = index.require(destination, "destination")?;

    if source == target {
        return Ok(RouteResult::new(vec![points[source].name.clone()], 0.0));
    }

    let matrix = DistanceMatrix::from_points(points);
    let path = shortest_path_indices(&matrix, source, target).ok_or_else(|| {
        RouteError::NoPath {
            origin: points[source].name.clone(),
            destination: points[target].name.clone(),
        }
    })?;

    log::info!(
        "dijkstra: {} -> {} hops={} km={:.0}",
        points[source].name,
        points[target].name,
        path.order.len() - 1,
        path.length
    );

    Ok(RouteResult::new(names_of(points, &path.order), path.length))
}

/// Dijkstra over the matrix, stopping once `target` is settled.
/// Returns `None` when `target` stays unreachable.
pub fn shortest_path_indices(
    matrix: &DistanceMatrix,
    source: PointIdx,
    target: PointIdx,
) -> Option<Tour> {
    let n = matrix.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<PointIdx>> = vec![None; n];
    let mut settled = vec![false; n];

    // Reverse turns the max-priority queue into a min-priority frontier
    let mut frontier: PriorityQueue<PointIdx, Reverse<QueueKey>> = PriorityQueue::new();
    dist[source] = 0.0;
    frontier.push(source, Reverse(QueueKey(0.0, source)));

    while let Some((u, _)) = frontier.pop() {
        settled[u] = true;
        if u == target {
            break;
        }

        for (v, &edge) in matrix.row(u).iter().enumerate() {
            if v == u || settled[v] {
                continue;
            }
            let alt = dist[u] + edge;
            if alt < dist[v] {
                dist[v] = alt;
                prev[v] = Some(u);
                // decrease-key: a smaller distance is a higher priority
                frontier.push_increase(v, Reverse(QueueKey(alt, v)));
            }
        }
    }

    if dist[target].is_infinite() {
        return None;
    }

    let mut order = vec![target];
    let mut current = target;
    while let Some(p) = prev[current] {
        order.push(p);
        current = p;
    }
    order.reverse();

    Some(Tour::new(order, dist[target]))
}
