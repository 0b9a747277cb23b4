// Runtime configuration for the route service

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::algorithms::branch_bound::SearchLimits;
use crate::{Result, RouteError};

/// BFS threshold used when the caller does not supply a usable one
pub const DEFAULT_THRESHOLD_KM: f64 = 3000.0;

/// Service-level settings. Every field has a default, so an empty JSON
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Connection threshold for BFS when the request carries none
    pub default_threshold_km: f64,

    /// Overrides for the branch-and-bound search limits
    pub branch_bound: SearchLimitsOverride,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            default_threshold_km: DEFAULT_THRESHOLD_KM,
            branch_bound: SearchLimitsOverride::default(),
        }
    }
}

impl RouteConfig {
    /// Reads a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            RouteError::invalid_argument(format!(
                "failed to read config {}: {e}",
                path.display()
            ))
        })?;
        let config: RouteConfig = serde_json::from_str(&text).map_err(|e| {
            RouteError::invalid_argument(format!("invalid config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.default_threshold_km.is_finite() || self.default_threshold_km <= 0.0 {
            return Err(RouteError::invalid_argument(format!(
                "default_threshold_km must be positive, got {}",
                self.default_threshold_km
            )));
        }
        Ok(())
    }

    /// Resolves the BFS threshold: missing or non-positive values fall back
    /// to the configured default.
    pub fn threshold_or_default(&self, max_km: Option<f64>) -> f64 {
        match max_km {
            Some(km) if km.is_finite() && km > 0.0 => km,
            _ => self.default_threshold_km,
        }
    }
}

/// Partial search limits; unset fields keep the size-tiered defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchLimitsOverride {
    pub time_limit_ms: Option<u64>,
    pub max_nodes: Option<usize>,
    pub expansion_limit: Option<usize>,
}

impl SearchLimitsOverride {
    pub fn is_empty(&self) -> bool {
        self.time_limit_ms.is_none() && self.max_nodes.is_none() && self.expansion_limit.is_none()
    }

    /// Applies the overrides on top of the defaults for `n` points
    pub fn resolve(&self, n: usize) -> SearchLimits {
        let mut limits = SearchLimits::for_size(n);
        if let Some(ms) = self.time_limit_ms {
            limits.time_limit = Duration::from_millis(ms);
        }
        if let Some(nodes) = self.max_nodes {
            limits.max_nodes = nodes;
        }
        if let Some(k) = self.expansion_limit {
            limits.expansion_limit = Some(k.max(1));
        }
        limits
    }
}
