use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::models::{Km, Point};
use crate::utils::distance::DistanceMatrix;

/// Weighted connection between two points of the threshold graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub distance_km: Km,
}

/// Materialises the threshold graph: one node per point (in point order,
/// so `NodeIndex::new(i)` is point `i`) and an edge wherever the distance
/// is within `threshold_km`.
pub fn connection_graph(
    points: &[Point],
    matrix: &DistanceMatrix,
    threshold_km: Km,
) -> UnGraph<String, Km> {
    let mut graph = UnGraph::with_capacity(points.len(), 0);
    let nodes: Vec<NodeIndex> = points
        .iter()
        .map(|p| graph.add_node(p.name.clone()))
        .collect();

    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = matrix.get(i, j);
            if d <= threshold_km {
                graph.add_edge(nodes[i], nodes[j], d);
            }
        }
    }

    graph
}

/// Edge list of the threshold graph, ordered by endpoint indices
pub fn connections(points: &[Point], matrix: &DistanceMatrix, threshold_km: Km) -> Vec<Connection> {
    let graph = connection_graph(points, matrix, threshold_km);
    graph
        .edge_indices()
        .filter_map(|e| {
            let (a, b) = graph.edge_endpoints(e)?;
            Some(Connection {
                from: graph[a].clone(),
                to: graph[b].clone(),
                distance_km: graph[e].round(),
            })
        })
        .collect()
}
