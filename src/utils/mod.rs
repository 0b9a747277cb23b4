pub mod connections;
pub mod distance;
pub mod lookup;
pub mod point_source;
