use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Point;
use crate::utils::lookup::duplicate_names;
use crate::{Result, RouteError};

/// Provider of the current point set
pub trait PointSource {
    /// Loads every point in source order. Fails with `DataUnavailable`
    /// when the source cannot be read or holds no points.
    fn load_points(&self) -> Result<Vec<Point>>;
}

/// A missing source is reported the same way as an unreadable one
impl<S: PointSource> PointSource for Option<S> {
    fn load_points(&self) -> Result<Vec<Point>> {
        match self {
            Some(source) => source.load_points(),
            None => Err(RouteError::data_unavailable("no point source configured")),
        }
    }
}

/// On-disk record; accepts both English and Spanish field names
#[derive(Debug, Deserialize)]
struct PointRecord {
    #[serde(alias = "nombre")]
    name: String,
    #[serde(alias = "latitud", alias = "lat")]
    latitude: f64,
    #[serde(alias = "longitud", alias = "lon")]
    longitude: f64,
}

/// Reads points from a JSON array file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PointSource for JsonFileSource {
    fn load_points(&self) -> Result<Vec<Point>> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            RouteError::data_unavailable(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let points = parse_points(&text).map_err(|e| match e {
            RouteError::DataUnavailable(msg) => {
                RouteError::data_unavailable(format!("{}: {msg}", self.path.display()))
            }
            other => other,
        })?;
        log::debug!(
            "loaded {} points from {}",
            points.len(),
            self.path.display()
        );
        Ok(points)
    }
}

/// Parses a JSON array of point records
pub fn parse_points(json: &str) -> Result<Vec<Point>> {
    let records: Vec<PointRecord> = serde_json::from_str(json)
        .map_err(|e| RouteError::data_unavailable(format!("malformed point data: {e}")))?;

    let points = records
        .into_iter()
        .map(|r| Point::new(r.name, r.latitude, r.longitude))
        .collect::<Result<Vec<_>>>()?;

    check_points(points)
}

/// In-memory point set
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    points: Vec<Point>,
}

impl StaticSource {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl PointSource for StaticSource {
    fn load_points(&self) -> Result<Vec<Point>> {
        check_points(self.points.clone())
    }
}

fn check_points(points: Vec<Point>) -> Result<Vec<Point>> {
    if points.is_empty() {
        return Err(RouteError::data_unavailable("point source returned no points"));
    }
    for name in duplicate_names(&points) {
        log::warn!("duplicate point name {name:?}; lookups resolve to the first occurrence");
    }
    Ok(points)
}
