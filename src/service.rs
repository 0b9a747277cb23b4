// Route service: loads the point set, runs one algorithm and assembles
// a serialisable response with the map display projection

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::algorithms::bfs::level_traversal;
use crate::algorithms::branch_bound::{BranchAndBound, SearchStats};
use crate::algorithms::dijkstra::shortest_path;
use crate::algorithms::heuristic::NearestNeighborTwoOpt;
use crate::algorithms::TourSolver;
use crate::config::RouteConfig;
use crate::models::Point;
use crate::utils::connections::{connections, Connection};
use crate::utils::distance::DistanceMatrix;
use crate::utils::lookup::normalize_name;
use crate::utils::point_source::PointSource;
use crate::Result;

/// A point as drawn on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Point> for DisplayPoint {
    fn from(point: &Point) -> Self {
        Self {
            name: point.name.clone(),
            lat: point.latitude(),
            lon: point.longitude(),
        }
    }
}

/// Display projection of every point
pub fn display_points(points: &[Point]) -> Vec<DisplayPoint> {
    points.iter().map(DisplayPoint::from).collect()
}

/// Display projection ordered to follow `names`; unknown names are skipped
pub fn display_points_in_order(points: &[Point], names: &[String]) -> Vec<DisplayPoint> {
    let mut by_name: HashMap<String, &Point> = HashMap::with_capacity(points.len());
    for point in points {
        by_name.entry(point.key()).or_insert(point);
    }
    names
        .iter()
        .filter_map(|name| by_name.get(&normalize_name(name)))
        .map(|point| DisplayPoint::from(*point))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourResponse {
    pub algorithm: &'static str,
    pub point_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub route: Vec<String>,
    pub total_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchStats>,
    pub points: Vec<DisplayPoint>,
    pub route_points: Vec<DisplayPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResponse {
    pub algorithm: &'static str,
    pub origin: String,
    pub destination: String,
    pub route: Vec<String>,
    pub total_km: f64,
    pub points: Vec<DisplayPoint>,
    pub route_points: Vec<DisplayPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversalResponse {
    pub algorithm: &'static str,
    pub start: String,
    pub max_km: f64,
    pub visit_order: Vec<String>,
    pub levels: BTreeMap<usize, Vec<String>>,
    pub unreached: Vec<String>,
    pub total_visited: usize,
    pub total_points: usize,
    pub points: Vec<DisplayPoint>,
    pub ordered_points: Vec<DisplayPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionsResponse {
    pub max_km: f64,
    pub connections: Vec<Connection>,
    pub points: Vec<DisplayPoint>,
}

/// Entry point for the four route operations. Every call loads a fresh
/// point set and builds its own distance matrix.
pub struct RouteService<S: PointSource> {
    source: S,
    config: RouteConfig,
}

impl<S: PointSource> RouteService<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, RouteConfig::default())
    }

    pub fn with_config(source: S, config: RouteConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Heuristic tour over every point
    pub fn nearest(&self) -> Result<TourResponse> {
        let points = self.source.load_points()?;
        let solver = NearestNeighborTwoOpt::new();
        let result = solver.route(&points, None)?;

        Ok(TourResponse {
            algorithm: solver.name(),
            point_count: points.len(),
            origin: None,
            route_points: display_points_in_order(&points, &result.route),
            route: result.route,
            total_km: result.total_km,
            search: None,
            points: display_points(&points),
        })
    }

    /// Shortest path between two named points
    pub fn dijkstra(&self, origin: &str, destination: &str) -> Result<PathResponse> {
        let points = self.source.load_points()?;
        let result = shortest_path(&points, origin, destination)?;

        Ok(PathResponse {
            algorithm: "Dijkstra",
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            route_points: display_points_in_order(&points, &result.route),
            route: result.route,
            total_km: result.total_km,
            points: display_points(&points),
        })
    }

    /// Level traversal; a missing or non-positive threshold uses the
    /// configured default
    pub fn bfs(&self, start: &str, max_km: Option<f64>) -> Result<TraversalResponse> {
        let points = self.source.load_points()?;
        let threshold = self.config.threshold_or_default(max_km);
        let result = level_traversal(&points, start, threshold)?;

        Ok(TraversalResponse {
            algorithm: "BFS",
            start: result.start,
            max_km: result.threshold_km,
            total_visited: result.visit_order.len(),
            total_points: points.len(),
            ordered_points: display_points_in_order(&points, &result.visit_order),
            visit_order: result.visit_order,
            levels: result.levels,
            unreached: result.unreached,
            points: display_points(&points),
        })
    }

    /// Exact tour from `origin`, or from the first point when none is given
    pub fn branch_bound(&self, origin: Option<&str>) -> Result<TourResponse> {
        let points = self.source.load_points()?;
        let limits = self.config.branch_bound.resolve(points.len());
        let solver = BranchAndBound::with_limits(limits);
        let (result, stats) = solver.solve(&points, origin)?;

        let origin = match origin.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => points[0].name.clone(),
        };

        Ok(TourResponse {
            algorithm: solver.name(),
            point_count: points.len(),
            origin: Some(origin),
            route_points: display_points_in_order(&points, &result.route),
            route: result.route,
            total_km: result.total_km,
            search: Some(stats),
            points: display_points(&points),
        })
    }

    /// Edge list of the threshold graph used by `bfs`
    pub fn connections(&self, max_km: Option<f64>) -> Result<ConnectionsResponse> {
        let points = self.source.load_points()?;
        let threshold = self.config.threshold_or_default(max_km);
        let matrix = DistanceMatrix::from_points(&points);

        Ok(ConnectionsResponse {
            max_km: threshold,
            connections: connections(&points, &matrix, threshold),
            points: display_points(&points),
        })
    }
}
