// Models module - exports all model types

mod point;
mod route;

// Re-export model types
pub use self::point::Point;
pub use self::route::{RouteResult, SearchNode, Tour, TraversalResult};

// Common type aliases for improved code readability
pub type PointIdx = usize;
pub type Km = f64;
