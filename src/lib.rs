// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod utils;

// Re-exports for convenience
pub use algorithms::branch_bound::{BranchAndBound, SearchLimits, SearchStats};
pub use algorithms::heuristic::NearestNeighborTwoOpt;
pub use algorithms::TourSolver;
pub use config::RouteConfig;
pub use error::{Result, RouteError};
pub use models::{Point, RouteResult, Tour, TraversalResult};
pub use service::RouteService;
pub use utils::distance::DistanceMatrix;
