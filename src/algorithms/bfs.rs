use std::collections::{BTreeMap, VecDeque};

use crate::models::{Km, Point, TraversalResult};
use crate::utils::distance::DistanceMatrix;
use crate::utils::lookup::NameIndex;
use crate::{Result, RouteError};

/// Breadth-first traversal over the implicit threshold graph, where two
/// points are adjacent iff their distance is at most `threshold_km`.
///
/// Levels are assigned on discovery (start is level 0); the visit order is
/// the dequeue order. Neighbours are scanned in point order, so the result
/// is deterministic for a fixed input ordering.
pub fn level_traversal(points: &[Point], start: &str, threshold_km: Km) -> Result<TraversalResult> {
    let start_idx = NameIndex::new(points).require(start, "start point")?;
    if !threshold_km.is_finite() || threshold_km <= 0.0 {
        return Err(RouteError::invalid_argument(format!(
            "threshold must be positive, got {threshold_km}"
        )));
    }

    let matrix = DistanceMatrix::from_points(points);
    let n = points.len();

    let mut level: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::new();
    let mut visit_order = Vec::with_capacity(n);
    let mut levels: BTreeMap<usize, Vec<String>> = BTreeMap::new();

    level[start_idx] = Some(0);
    levels.insert(0, vec![points[start_idx].name.clone()]);
    queue.push_back(start_idx);

    while let Some(u) = queue.pop_front() {
        visit_order.push(points[u].name.clone());
        let next_level = level[u].unwrap_or(0) + 1;

        for (v, &d) in matrix.row(u).iter().enumerate() {
            if level[v].is_none() && d <= threshold_km {
                level[v] = Some(next_level);
                levels
                    .entry(next_level)
                    .or_default()
                    .push(points[v].name.clone());
                queue.push_back(v);
            }
        }
    }

    let unreached: Vec<String> = points
        .iter()
        .zip(&level)
        .filter(|(_, l)| l.is_none())
        .map(|(p, _)| p.name.clone())
        .collect();

    log::info!(
        "bfs: start={} threshold={threshold_km} visited={} unreached={}",
        points[start_idx].name,
        visit_order.len(),
        unreached.len()
    );

    Ok(TraversalResult {
        start: points[start_idx].name.clone(),
        threshold_km,
        visit_order,
        levels,
        unreached,
    })
}
