// Distance calculation utilities

use crate::models::{Km, Point, PointIdx};
use crate::{Result, RouteError};

/// Mean Earth radius used by every distance in the crate
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two (lon, lat) points in km
pub fn haversine_km(p1: &geo::Point<f64>, p2: &geo::Point<f64>) -> Km {
    let phi1 = p1.y().to_radians();
    let phi2 = p2.y().to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (p2.x() - p1.x()).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // clamp guards asin against rounding just above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Dense, symmetric N x N matrix of pairwise distances.
/// Built once per computation and never shared between computations.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<Km>,
}

impl DistanceMatrix {
    /// Evaluates the haversine distance for every pair; the diagonal is zero
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        log::debug!("distance matrix: built n={n}");
        Self { n, data }
    }

    /// Wraps precomputed distances. Rows must form a square matrix of
    /// non-negative values; infinity marks a missing edge.
    pub fn from_rows(rows: Vec<Vec<Km>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(RouteError::invalid_argument(format!(
                    "distance row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            if row.iter().any(|d| d.is_nan() || *d < 0.0) {
                return Err(RouteError::invalid_argument(format!(
                    "distance row {i} holds a negative or NaN entry"
                )));
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: PointIdx, j: PointIdx) -> Km {
        self.data[i * self.n + j]
    }

    /// Distances from `i` to every point, in point order
    pub fn row(&self, i: PointIdx) -> &[Km] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Length of an open path through the given indices
    pub fn path_length(&self, order: &[PointIdx]) -> Km {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
