//! Per-analysis parameters.

use crate::{AccessError, AccessResult};

/// How many nearest POIs to report and how far to search.
///
/// The same radius bounds both the nearest-k search and the radius count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AccessConfig {
    /// `k`: number of nearest POIs reported per category.  Must be >= 1.
    pub num_pois: usize,
    /// Search radius along the network, metres.  Must be finite and > 0.
    pub max_distance_m: f64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self { num_pois: 1, max_distance_m: 2_000.0 }
    }
}

impl AccessConfig {
    pub fn new(num_pois: usize, max_distance_m: f64) -> AccessResult<Self> {
        let config = Self { num_pois, max_distance_m };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AccessResult<()> {
        if self.num_pois < 1 {
            return Err(AccessError::InvalidInput("num_pois must be at least 1".into()));
        }
        if !self.max_distance_m.is_finite() || self.max_distance_m <= 0.0 {
            return Err(AccessError::InvalidInput(format!(
                "max_distance_m must be a positive number of metres, got {}",
                self.max_distance_m
            )));
        }
        Ok(())
    }
}
