// Case-insensitive name resolution over a point set

use std::collections::HashMap;

use crate::models::{Point, PointIdx};
use crate::{Result, RouteError};

/// Canonical form of a point name used for comparisons
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Maps normalized names to point indices. The first occurrence of a
/// duplicated name wins.
#[derive(Debug, Clone)]
pub struct NameIndex {
    by_name: HashMap<String, PointIdx>,
}

impl NameIndex {
    pub fn new(points: &[Point]) -> Self {
        let mut by_name = HashMap::with_capacity(points.len());
        for (idx, point) in points.iter().enumerate() {
            by_name.entry(point.key()).or_insert(idx);
        }
        Self { by_name }
    }

    /// Index of `name`, or `NotFound`
    pub fn find(&self, name: &str) -> Result<PointIdx> {
        self.by_name
            .get(&normalize_name(name))
            .copied()
            .ok_or_else(|| RouteError::not_found(name.trim()))
    }

    /// Like `find`, but a blank name is an `InvalidArgument` naming `what`
    pub fn require(&self, name: &str, what: &str) -> Result<PointIdx> {
        if name.trim().is_empty() {
            return Err(RouteError::invalid_argument(format!("{what} must not be blank")));
        }
        self.find(name)
    }
}

/// Returns the names that occur more than once after normalization
pub fn duplicate_names(points: &[Point]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for point in points {
        let count = seen.entry(point.key()).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(point.name.clone());
        }
    }
    duplicates
}
